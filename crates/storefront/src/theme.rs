//! Theme store.
//!
//! Client-only presentational palette with no server counterpart. The
//! dark-mode toggle flips a boolean and remaps the palette to a fixed dark
//! set; there is no intermediate state.

/// The five palette slots the storefront styles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub muted: &'static str,
}

/// Palette used when dark mode is off.
pub const LIGHT_PALETTE: Palette = Palette {
    background: "#f8fafc",
    surface: "#ffffff",
    text_primary: "#0f172a",
    text_secondary: "#475569",
    muted: "#94a3b8",
};

/// Palette used when dark mode is on.
pub const DARK_PALETTE: Palette = Palette {
    background: "#0f172a",
    surface: "#1e293b",
    text_primary: "#f1f5f9",
    text_secondary: "#cbd5e1",
    muted: "#64748b",
};

/// Actions the theme reducer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    ToggleDarkMode,
    SetDarkMode(bool),
}

/// Theme state: the flag plus the palette it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    dark_mode: bool,
    palette: Palette,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            dark_mode: false,
            palette: LIGHT_PALETTE,
        }
    }
}

impl ThemeState {
    /// Light theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Cannot fail.
    pub const fn apply(&mut self, action: ThemeAction) {
        self.dark_mode = match action {
            ThemeAction::ToggleDarkMode => !self.dark_mode,
            ThemeAction::SetDarkMode(on) => on,
        };
        self.palette = if self.dark_mode {
            DARK_PALETTE
        } else {
            LIGHT_PALETTE
        };
    }

    /// Whether dark mode is on.
    #[must_use]
    pub const fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// The current palette.
    #[must_use]
    pub const fn palette(&self) -> Palette {
        self.palette
    }
}
