//! Authenticated session state.
//!
//! One [`SessionProvider`] is created at client bootstrap and passed by
//! reference into the transport. It is the only place the bearer token lives:
//! login stores it with [`SessionProvider::set_session`], logout removes it
//! with [`SessionProvider::clear_session`], and the transport reads it on each
//! request. Nothing else holds a divergent copy.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use secrecy::SecretString;
use tracing::debug;

use copperleaf_core::{CustomerId, Email, UserRole};

use crate::types::Address;

/// An authenticated session, as established by a successful login.
///
/// Destroyed on logout or token expiry. Only one session is active per client.
#[derive(Clone)]
pub struct Session {
    /// Server-assigned user id.
    pub user_id: CustomerId,
    /// Name shown in the account menu.
    pub display_name: String,
    /// Account email.
    pub email: Email,
    /// Role carried by the token's subject; enforced server-side.
    pub role: UserRole,
    /// Bearer token attached to every authenticated request.
    pub token: SecretString,
    /// Default shipping address, when the account has one.
    pub address: Option<Address>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("token", &"[REDACTED]")
            .field("address", &self.address)
            .finish()
    }
}

/// Shared handle to the (at most one) active session.
///
/// Cheap to clone; all clones observe the same state.
#[derive(Clone, Default)]
pub struct SessionProvider {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionProvider {
    /// Create an empty provider (no active session).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session, replacing any previous one.
    pub fn set_session(&self, session: Session) {
        debug!(user_id = %session.user_id, role = ?session.role, "session established");
        *self.write() = Some(session);
    }

    /// Remove the active session, if any.
    pub fn clear_session(&self) {
        debug!("session cleared");
        *self.write() = None;
    }

    /// The active session's bearer token, if one exists.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    /// Snapshot of the active session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    /// Whether any session is active.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Whether the active session carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read()
            .as_ref()
            .is_some_and(|s| s.role == UserRole::Admin)
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
