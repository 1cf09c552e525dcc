//! Theme definition and loading

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Theme-related errors
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Theme file could not be read
    #[error("Failed to read theme file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Theme file is not valid TOML or has the wrong shape
    #[error("Invalid theme file: {0}")]
    Parse(#[from] toml::de::Error),

    /// No style registered for a component
    #[error("Unknown component: {0}")]
    UnknownComponent(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Light or dark mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The opposite scheme
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    /// Class applied to the document root for this scheme
    pub fn root_class(self) -> &'static str {
        match self {
            ColorScheme::Light => "",
            ColorScheme::Dark => "dark",
        }
    }
}

/// Base and variant class strings for one component kind
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComponentStyle {
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub variants: FxHashMap<String, String>,
}

impl ComponentStyle {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            variants: FxHashMap::default(),
        }
    }

    pub fn variant(mut self, name: impl Into<String>, classes: impl Into<String>) -> Self {
        self.variants.insert(name.into(), classes.into());
        self
    }
}

/// Style lookup table keyed by component kind
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Mode requested by the theme file, if any
    #[serde(default)]
    pub mode: Option<ColorScheme>,
    #[serde(default)]
    pub components: FxHashMap<String, ComponentStyle>,
}

impl Theme {
    /// An empty theme
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a theme from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a theme file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let theme = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            components = theme.components.len(),
            "loaded theme"
        );
        Ok(theme)
    }

    /// Register or replace a component style
    pub fn with_component(mut self, name: impl Into<String>, style: ComponentStyle) -> Self {
        self.components.insert(name.into(), style);
        self
    }

    /// Layer `overrides` on top of this theme
    ///
    /// A component present in `overrides` replaces its base string when that
    /// string is non-empty, and replaces variants one by one.
    pub fn merge(mut self, overrides: Theme) -> Self {
        if overrides.mode.is_some() {
            self.mode = overrides.mode;
        }
        for (name, style) in overrides.components {
            let entry = self.components.entry(name).or_default();
            if !style.base.is_empty() {
                entry.base = style.base;
            }
            entry.variants.extend(style.variants);
        }
        self
    }

    pub fn style(&self, component: &str) -> Option<&ComponentStyle> {
        self.components.get(component)
    }

    /// Style for a component, or an error if the theme has none
    pub fn require(&self, component: &str) -> Result<&ComponentStyle> {
        self.style(component)
            .ok_or_else(|| ThemeError::UnknownComponent(component.to_string()))
    }

    /// Base classes for a component (empty if missing)
    pub fn base(&self, component: &str) -> &str {
        match self.style(component) {
            Some(style) => &style.base,
            None => {
                tracing::warn!(component, "no theme entry for component");
                ""
            }
        }
    }

    /// Classes for one variant of a component (empty if missing)
    pub fn variant(&self, component: &str, variant: &str) -> &str {
        self.style(component)
            .and_then(|s| s.variants.get(variant))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Base classes followed by each requested variant, space separated
    pub fn classes(&self, component: &str, variants: &[&str]) -> String {
        let mut parts = vec![self.base(component)];
        parts.extend(variants.iter().map(|v| self.variant(component, v)));
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scheme_toggle() {
        assert_eq!(ColorScheme::Light.toggle(), ColorScheme::Dark);
        assert_eq!(ColorScheme::Dark.toggle(), ColorScheme::Light);
        assert_eq!(ColorScheme::Dark.root_class(), "dark");
    }

    #[test]
    fn test_classes_join_base_and_variants() {
        let theme = Theme::empty().with_component(
            "button",
            ComponentStyle::new("px-4 py-2")
                .variant("primary", "bg-purple-600")
                .variant("disabled", "opacity-50"),
        );

        assert_eq!(theme.classes("button", &[]), "px-4 py-2");
        assert_eq!(
            theme.classes("button", &["primary", "disabled"]),
            "px-4 py-2 bg-purple-600 opacity-50"
        );
        assert_eq!(theme.classes("button", &["missing"]), "px-4 py-2");
        assert_eq!(theme.classes("nothing", &["primary"]), "");
    }

    #[test]
    fn test_from_toml() {
        let theme = Theme::from_toml_str(
            r#"
            mode = "dark"

            [components.pagination]
            base = "flex"

            [components.pagination.variants]
            active = "bg-blue-600"
            "#,
        )
        .unwrap();

        assert_eq!(theme.mode, Some(ColorScheme::Dark));
        assert_eq!(theme.base("pagination"), "flex");
        assert_eq!(theme.variant("pagination", "active"), "bg-blue-600");
    }

    #[test]
    fn test_from_toml_rejects_bad_mode() {
        let err = Theme::from_toml_str(r#"mode = "sepia""#).unwrap_err();
        assert!(matches!(err, ThemeError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Theme::load("/definitely/not/here/theme.toml").unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }

    #[test]
    fn test_merge_overrides() {
        let base = Theme::empty().with_component(
            "dropdown",
            ComponentStyle::new("absolute w-56")
                .variant("left", "left-0")
                .variant("right", "right-0"),
        );
        let overrides = Theme::from_toml_str(
            r#"
            [components.dropdown.variants]
            right = "right-4"
            "#,
        )
        .unwrap();

        let merged = base.merge(overrides);
        assert_eq!(merged.base("dropdown"), "absolute w-56");
        assert_eq!(merged.variant("dropdown", "left"), "left-0");
        assert_eq!(merged.variant("dropdown", "right"), "right-4");
        assert_eq!(merged.mode, None);
    }

    #[test]
    fn test_require() {
        let theme = Theme::empty();
        let err = theme.require("modal").unwrap_err();
        assert_eq!(err.to_string(), "Unknown component: modal");
    }
}
