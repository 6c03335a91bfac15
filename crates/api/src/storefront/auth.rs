//! Authentication endpoints and session wiring.
//!
//! Login and registration exchange credentials for a bearer token; the
//! resulting [`Session`] is installed into the shared [`SessionProvider`] so
//! the transport starts attaching it immediately. Logout clears the provider
//! even when the server-side revoke fails.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use copperleaf_core::{CustomerId, Email, UserRole};

use crate::error::ApiError;
use crate::session::{Session, SessionProvider};
use crate::transport::Transport;
use crate::types::{Acknowledgement, Address};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    display_name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUser {
    id: CustomerId,
    display_name: String,
    email: Email,
    role: UserRole,
    #[serde(default)]
    address: Option<Address>,
}

/// Client for the authentication endpoints.
#[derive(Clone)]
pub struct AuthApi {
    transport: Transport,
    session: SessionProvider,
}

impl AuthApi {
    pub(crate) const fn new(transport: Transport, session: SessionProvider) -> Self {
        Self { transport, session }
    }

    /// Exchange credentials for a session and install it.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid credentials or transport failure; the
    /// provider is left untouched in that case.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<Session, ApiError> {
        let response: AuthResponse = self
            .transport
            .post(
                "/auth/login",
                &LoginRequest {
                    email: email.as_str(),
                    password,
                },
            )
            .await?;

        let session = into_session(response);
        self.session.set_session(session.clone());
        Ok(session)
    }

    /// Create an account and install the resulting session.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected or the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        display_name: &str,
        email: &Email,
        password: &str,
    ) -> Result<Session, ApiError> {
        let response: AuthResponse = self
            .transport
            .post(
                "/auth/register",
                &RegisterRequest {
                    display_name,
                    email: email.as_str(),
                    password,
                },
            )
            .await?;

        let session = into_session(response);
        self.session.set_session(session.clone());
        Ok(session)
    }

    /// End the session.
    ///
    /// The local session is always cleared; the server-side revoke is
    /// best-effort and a failure there is only logged.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let result: Result<Acknowledgement, ApiError> =
            self.transport.post("/auth/logout", &()).await;
        if let Err(error) = result {
            warn!(error = %error, "server-side logout failed, clearing local session anyway");
        }
        self.session.clear_session();
    }
}

fn into_session(response: AuthResponse) -> Session {
    Session {
        user_id: response.user.id,
        display_name: response.user.display_name,
        email: response.user.email,
        role: response.user.role,
        token: SecretString::from(response.token),
        address: response.user.address,
    }
}
