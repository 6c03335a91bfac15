//! Store-wide settings managed from the admin panel.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use copperleaf_core::{CurrencyCode, Email};

/// Store configuration. The same shape is read and written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    pub support_email: Email,
    pub currency: CurrencyCode,
    /// Order subtotal above which standard shipping is free.
    pub free_shipping_threshold: Decimal,
    pub standard_shipping_fee: Decimal,
    pub express_shipping_fee: Decimal,
    /// Banner text shown across the storefront, when set.
    #[serde(default)]
    pub announcement: Option<String>,
    pub maintenance_mode: bool,
}
