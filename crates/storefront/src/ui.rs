//! Transient UI flags and the notification queue.
//!
//! Mutation failures are never swallowed: every call site pushes the error
//! through [`UiState::push_api_error`] so the user sees a toast, and none are
//! retried automatically.

use copperleaf_api::ApiError;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Store-assigned id used to dismiss it.
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Actions the UI reducer understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    ToggleCartDrawer,
    ToggleMobileNav,
    OpenModal(String),
    CloseModal,
    PushToast(ToastLevel, String),
    DismissToast(u64),
    ClearToasts,
}

/// Transient UI state. Nothing here survives a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    cart_drawer_open: bool,
    mobile_nav_open: bool,
    active_modal: Option<String>,
    toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl UiState {
    /// Everything closed, no notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Cannot fail.
    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleCartDrawer => self.cart_drawer_open = !self.cart_drawer_open,
            UiAction::ToggleMobileNav => self.mobile_nav_open = !self.mobile_nav_open,
            UiAction::OpenModal(name) => self.active_modal = Some(name),
            UiAction::CloseModal => self.active_modal = None,
            UiAction::PushToast(level, message) => {
                let id = self.next_toast_id;
                self.next_toast_id += 1;
                self.toasts.push(Toast { id, level, message });
            }
            UiAction::DismissToast(id) => self.toasts.retain(|toast| toast.id != id),
            UiAction::ClearToasts => self.toasts.clear(),
        }
    }

    /// Surface a failed mutation as an error toast.
    pub fn push_api_error(&mut self, error: &ApiError) {
        self.apply(UiAction::PushToast(ToastLevel::Error, error.user_message()));
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub const fn cart_drawer_open(&self) -> bool {
        self.cart_drawer_open
    }

    /// Whether the mobile nav is open.
    #[must_use]
    pub const fn mobile_nav_open(&self) -> bool {
        self.mobile_nav_open
    }

    /// Name of the open modal, if any.
    #[must_use]
    pub fn active_modal(&self) -> Option<&str> {
        self.active_modal.as_deref()
    }

    /// Pending notifications, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles() {
        let mut ui = UiState::new();
        ui.apply(UiAction::ToggleCartDrawer);
        assert!(ui.cart_drawer_open());
        ui.apply(UiAction::ToggleCartDrawer);
        assert!(!ui.cart_drawer_open());
    }

    #[test]
    fn test_modal_open_close() {
        let mut ui = UiState::new();
        ui.apply(UiAction::OpenModal("quick-view".into()));
        assert_eq!(ui.active_modal(), Some("quick-view"));
        ui.apply(UiAction::CloseModal);
        assert_eq!(ui.active_modal(), None);
    }

    #[test]
    fn test_toast_ids_are_unique_across_dismissals() {
        let mut ui = UiState::new();
        ui.apply(UiAction::PushToast(ToastLevel::Info, "saved".into()));
        ui.apply(UiAction::PushToast(ToastLevel::Success, "ordered".into()));

        let first_id = ui.toasts()[0].id;
        ui.apply(UiAction::DismissToast(first_id));
        ui.apply(UiAction::PushToast(ToastLevel::Info, "again".into()));

        assert_eq!(ui.toasts().len(), 2);
        assert!(ui.toasts().iter().all(|t| t.id != first_id));
    }

    #[test]
    fn test_api_error_becomes_error_toast() {
        let mut ui = UiState::new();
        let error = ApiError::Status {
            status: 409,
            message: "Coupon already used".into(),
        };
        ui.push_api_error(&error);

        assert_eq!(ui.toasts().len(), 1);
        assert_eq!(ui.toasts()[0].level, ToastLevel::Error);
        assert_eq!(ui.toasts()[0].message, "Coupon already used");
    }
}
