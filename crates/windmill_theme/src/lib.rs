//! Windmill Theme System
//!
//! Components never hard-code their classes. They look up a base class string
//! and any variant class strings in the active [`Theme`] and forward them
//! unchanged to whatever renders the markup.
//!
//! - [`Theme`] - component key to [`ComponentStyle`] lookup table
//! - [`ColorScheme`] - light/dark mode
//! - [`ThemeState`] - the active theme and mode
//!
//! # Example
//!
//! ```rust
//! use windmill_theme::{keys, Theme};
//!
//! let theme = Theme::windmill();
//! assert_eq!(theme.classes(keys::DROPDOWN, &["right"]).ends_with("right-0"), true);
//! ```

mod defaults;
mod state;
mod theme;

pub use defaults::keys;
pub use state::ThemeState;
pub use theme::{ColorScheme, ComponentStyle, Result, Theme, ThemeError};
