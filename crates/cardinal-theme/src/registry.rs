//! The style registry: every theme's raw style text, keyed by component and mode.
//!
//! The registry is built once per run (usually by [`StyleLoader`](crate::StyleLoader))
//! and is read-only while commands execute. Style text is stored verbatim and
//! never inspected.
//!
//! Components and modes are kept in `BTreeMap`s, so iterating a theme always
//! visits components and modes in lexicographic order. Operations rely on
//! that order being stable between runs.

use std::collections::BTreeMap;

use serde::Serialize;

/// Style text per mode name for one component.
pub type ComponentStyles = BTreeMap<String, String>;

/// Component styles per component name for one theme.
pub type ThemeStyles = BTreeMap<String, ComponentStyles>;

/// Immutable mapping `theme → component → mode → style text`.
///
/// # Example
///
/// ```rust
/// use cardinal_theme::StyleRegistry;
///
/// let mut registry = StyleRegistry::new();
/// registry.insert("clear", "button", "default", ".btn { color: red }");
/// registry.insert("clear", "button", "dark", ".btn { color: pink }");
///
/// assert!(registry.contains_theme("clear"));
/// assert_eq!(registry.style("clear", "button", "dark"), Some(".btn { color: pink }"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleRegistry {
    themes: BTreeMap<String, ThemeStyles>,
}

impl StyleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a theme with no components.
    ///
    /// The loader does this for every theme directory so that a theme without
    /// any component styles can still be selected as a base.
    pub fn add_theme(&mut self, theme: impl Into<String>) {
        self.themes.entry(theme.into()).or_default();
    }

    /// Stores the style text for one (theme, component, mode) location,
    /// replacing any previous text.
    pub fn insert(
        &mut self,
        theme: impl Into<String>,
        component: impl Into<String>,
        mode: impl Into<String>,
        code: impl Into<String>,
    ) {
        self.themes
            .entry(theme.into())
            .or_default()
            .entry(component.into())
            .or_default()
            .insert(mode.into(), code.into());
    }

    /// Returns true if the theme is registered.
    pub fn contains_theme(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }

    /// Returns all components of a theme.
    pub fn theme(&self, theme: &str) -> Option<&ThemeStyles> {
        self.themes.get(theme)
    }

    /// Returns the modes a theme defines for a component.
    ///
    /// A component with no modes is reported as absent.
    pub fn modes(&self, theme: &str, component: &str) -> Option<&ComponentStyles> {
        self.themes
            .get(theme)?
            .get(component)
            .filter(|modes| !modes.is_empty())
    }

    /// Returns the style text for one location.
    pub fn style(&self, theme: &str, component: &str, mode: &str) -> Option<&str> {
        self.themes
            .get(theme)?
            .get(component)?
            .get(mode)
            .map(String::as_str)
    }

    /// Returns the component names a theme defines, in natural order.
    pub fn components<'a>(&'a self, theme: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.themes
            .get(theme)
            .into_iter()
            .flat_map(|components| components.keys().map(String::as_str))
    }

    /// Returns an iterator over all registered theme names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Returns the number of registered themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Returns true if no themes are registered.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
