//! Payload validation for each operation kind.
//!
//! Validation happens before an operation touches the composition state, so a
//! rejected payload never leaves partial writes behind.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::OptionError;
use crate::registry::StyleRegistry;

/// Granularity at which locations are tested and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOn {
    /// Test and write whole components.
    Component,
    /// Test and write individual (component, mode) pairs.
    Mode,
}

impl MatchOn {
    const EXPECTED: &'static str = "component, mode";

    pub fn as_str(self) -> &'static str {
        match self {
            MatchOn::Component => "component",
            MatchOn::Mode => "mode",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "component" => Some(MatchOn::Component),
            "mode" => Some(MatchOn::Mode),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which locations offered by the tail themes take part in an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    /// Every location the tail theme offers.
    All,
    /// Only locations absent from the table when the operation starts.
    Difference,
    /// Only locations already present in the table.
    Intersect,
}

impl SetKind {
    const EXPECTED: &'static str = "all, difference, intersect";

    pub fn as_str(self) -> &'static str {
        match self {
            SetKind::All => "all",
            SetKind::Difference => "difference",
            SetKind::Intersect => "intersect",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(SetKind::All),
            "difference" => Some(SetKind::Difference),
            "intersect" => Some(SetKind::Intersect),
            _ => None,
        }
    }
}

impl std::fmt::Display for SetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated options for `overridden` and `extended`.
///
/// # Example
///
/// ```rust
/// use cardinal_theme::{MatchOn, MergeOptions, SetKind};
/// use serde_json::json;
///
/// let options = MergeOptions::from_payload(&json!({
///     "match": "mode",
///     "type": "intersect",
///     "components": ["psk-button"]
/// })).unwrap();
///
/// assert_eq!(options, MergeOptions::new(MatchOn::Mode, SetKind::Intersect)
///     .with_components(["psk-button"]));
///
/// assert!(MergeOptions::from_payload(&json!({ "match": "mode" })).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    pub match_on: MatchOn,
    pub kind: SetKind,
    /// Restricts the candidate components. `None` means every component the
    /// tail theme defines.
    pub components: Option<Vec<String>>,
}

impl MergeOptions {
    pub fn new(match_on: MatchOn, kind: SetKind) -> Self {
        Self {
            match_on,
            kind,
            components: None,
        }
    }

    /// Restricts the operation to the given components.
    pub fn with_components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = Some(components.into_iter().map(Into::into).collect());
        self
    }

    /// Validates a raw `overridden`/`extended` payload.
    ///
    /// The payload must be an object with `match` and `type`, plus an optional
    /// `components` list of strings. Any other field is rejected.
    pub fn from_payload(payload: &Value) -> Result<Self, OptionError> {
        let object = payload.as_object().ok_or(OptionError::NotAnObject)?;

        if let Some(unknown) = object
            .keys()
            .find(|key| !matches!(key.as_str(), "match" | "type" | "components"))
        {
            return Err(OptionError::UnknownField(unknown.clone()));
        }

        let match_on = enum_field(object.get("match"), "match", MatchOn::EXPECTED, MatchOn::parse)?;
        let kind = enum_field(object.get("type"), "type", SetKind::EXPECTED, SetKind::parse)?;

        let components = match object.get("components") {
            None => None,
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or(OptionError::InvalidComponents)?,
            ),
            Some(_) => return Err(OptionError::InvalidComponents),
        };

        Ok(Self {
            match_on,
            kind,
            components,
        })
    }
}

fn enum_field<T>(
    value: Option<&Value>,
    field: &'static str,
    expected: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, OptionError> {
    let value = value.ok_or(OptionError::MissingField(field))?;
    value
        .as_str()
        .and_then(parse)
        .ok_or_else(|| OptionError::InvalidValue {
            field,
            value: value.to_string(),
            expected,
        })
}

/// Validates a `themes` payload against the registry.
///
/// The payload must be a non-empty list of unique strings, each naming a
/// registered theme. Returns the names in their given order.
pub fn validate_themes(
    payload: &Value,
    registry: &StyleRegistry,
) -> Result<Vec<String>, OptionError> {
    let items = payload.as_array().ok_or(OptionError::NotASequence)?;
    if items.is_empty() {
        return Err(OptionError::EmptyThemes);
    }

    let mut seen = HashSet::new();
    let mut themes = Vec::with_capacity(items.len());
    for item in items {
        let name = item
            .as_str()
            .ok_or_else(|| OptionError::NonStringTheme(item.to_string()))?;
        if !seen.insert(name) {
            return Err(OptionError::DuplicateTheme(name.to_string()));
        }
        if !registry.contains_theme(name) {
            return Err(OptionError::UnknownTheme(name.to_string()));
        }
        themes.push(name.to_string());
    }

    Ok(themes)
}
