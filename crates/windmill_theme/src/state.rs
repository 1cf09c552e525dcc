//! Active theme and mode
//!
//! Components read the active theme through [`ThemeState::get`]. Hosts may
//! also create their own [`ThemeState`] and pass its theme around explicitly.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::theme::{ColorScheme, Theme};

/// Active theme plus light/dark mode
pub struct ThemeState {
    theme: RwLock<Arc<Theme>>,
    scheme: RwLock<ColorScheme>,
}

static THEME_STATE: LazyLock<ThemeState> =
    LazyLock::new(|| ThemeState::new(Theme::windmill()));

impl ThemeState {
    /// Create a state for `theme`, starting in the mode the theme requests
    pub fn new(theme: Theme) -> Self {
        let scheme = theme.mode.unwrap_or_default();
        Self {
            theme: RwLock::new(Arc::new(theme)),
            scheme: RwLock::new(scheme),
        }
    }

    /// The process-wide theme state (defaults to the Windmill theme)
    pub fn get() -> &'static ThemeState {
        &THEME_STATE
    }

    /// Current theme
    pub fn theme(&self) -> Arc<Theme> {
        self.theme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the theme, adopting its mode if it requests one
    pub fn set_theme(&self, theme: Theme) {
        if let Some(mode) = theme.mode {
            self.set_scheme(mode);
        }
        *self.theme.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(theme);
    }

    /// Current mode
    pub fn scheme(&self) -> ColorScheme {
        *self.scheme.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_scheme(&self, scheme: ColorScheme) {
        *self.scheme.write().unwrap_or_else(PoisonError::into_inner) = scheme;
        tracing::debug!(?scheme, "color scheme changed");
    }

    /// Flip between light and dark, returning the new mode
    pub fn toggle_mode(&self) -> ColorScheme {
        let mut scheme = self.scheme.write().unwrap_or_else(PoisonError::into_inner);
        *scheme = scheme.toggle();
        tracing::debug!(scheme = ?*scheme, "color scheme toggled");
        *scheme
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(Theme::windmill())
    }
}
