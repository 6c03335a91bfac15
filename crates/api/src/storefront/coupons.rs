//! Coupon validation at checkout.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::CouponValidation;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest<'a> {
    code: &'a str,
    subtotal: Decimal,
}

/// Client for the public coupon endpoints.
///
/// Validation is deliberately uncached: the verdict depends on usage counters
/// and the clock, both of which only the server sees.
#[derive(Clone)]
pub struct CouponsApi {
    transport: Transport,
}

impl CouponsApi {
    pub(crate) const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Ask the server whether a coupon code applies to the given subtotal.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. An inapplicable code is not an
    /// error; it comes back as `valid == false` with a message.
    #[instrument(skip(self, code))]
    pub async fn validate(&self, code: &str, subtotal: Decimal) -> Result<CouponValidation, ApiError> {
        self.transport
            .post("/coupons/validate", &ValidateRequest { code, subtotal })
            .await
    }
}
