//! Operation commands and the ordered command list.
//!
//! Each record in a command file names exactly one operation by keyword:
//!
//! | Keyword | Operation |
//! |---------|-----------|
//! | `themes` | [`OperationKind::Themes`] |
//! | `reset` | [`OperationKind::Reset`] |
//! | `overridden` | [`OperationKind::Override`] |
//! | `extended` | [`OperationKind::Extend`] |
//!
//! Payloads are kept as raw values here. They are validated by the pipeline
//! right before the command runs, so a bad payload only costs that one
//! command. A list whose *shape* is wrong is rejected up front instead, since
//! the operation order cannot be trusted.

use serde_json::Value;

use crate::error::{Result, ThemeError};

/// The four operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Select active themes and seed the table from the base theme.
    Themes,
    /// Clear the generated table.
    Reset,
    /// Replace locations with tail theme styles.
    Override,
    /// Add tail theme styles as ranked contributors.
    Extend,
}

impl OperationKind {
    /// All kinds, in keyword-table order.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Themes,
        OperationKind::Reset,
        OperationKind::Override,
        OperationKind::Extend,
    ];

    /// Returns the config keyword for this operation.
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Themes => "themes",
            OperationKind::Reset => "reset",
            OperationKind::Override => "overridden",
            OperationKind::Extend => "extended",
        }
    }

    /// Looks up an operation by its config keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// One operation record with its unvalidated payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Themes(Value),
    Reset(Value),
    Override(Value),
    Extend(Value),
}

impl Command {
    /// Builds a command from its kind and payload.
    pub fn new(kind: OperationKind, payload: Value) -> Self {
        match kind {
            OperationKind::Themes => Command::Themes(payload),
            OperationKind::Reset => Command::Reset(payload),
            OperationKind::Override => Command::Override(payload),
            OperationKind::Extend => Command::Extend(payload),
        }
    }

    /// The operation kind of this command.
    pub fn kind(&self) -> OperationKind {
        match self {
            Command::Themes(_) => OperationKind::Themes,
            Command::Reset(_) => OperationKind::Reset,
            Command::Override(_) => OperationKind::Override,
            Command::Extend(_) => OperationKind::Extend,
        }
    }

    /// The raw option payload.
    pub fn payload(&self) -> &Value {
        match self {
            Command::Themes(payload)
            | Command::Reset(payload)
            | Command::Override(payload)
            | Command::Extend(payload) => payload,
        }
    }

    /// Parses one `{ keyword: payload }` record.
    ///
    /// `index` is the record's position, used in error messages.
    fn from_record(index: usize, record: &Value) -> Result<Self> {
        let object = record.as_object().ok_or_else(|| {
            ThemeError::MalformedCommandList(format!("record {index} is not an object"))
        })?;

        let mut entries = object.iter();
        let (keyword, payload) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            (None, _) => {
                return Err(ThemeError::MalformedCommandList(format!(
                    "record {index} names no operation"
                )))
            }
            (Some(_), Some(_)) => {
                return Err(ThemeError::MalformedCommandList(format!(
                    "record {index} names more than one operation"
                )))
            }
        };

        let kind = OperationKind::from_keyword(keyword).ok_or_else(|| {
            ThemeError::MalformedCommandList(format!(
                "record {index} has unknown operation '{keyword}'"
            ))
        })?;

        Ok(Command::new(kind, payload.clone()))
    }
}

/// An ordered, immutable sequence of commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    commands: Vec<Command>,
}

impl CommandList {
    /// Creates a command list from already-built commands.
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Parses a command list from a value tree.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::MalformedCommandList`] if the value is not an
    /// array, or any element is not an object with exactly one recognized
    /// operation keyword.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cardinal_theme::{CommandList, OperationKind};
    /// use serde_json::json;
    ///
    /// let list = CommandList::from_value(&json!([
    ///     { "themes": ["clear", "citrus"] },
    ///     { "overridden": { "match": "mode", "type": "all" } }
    /// ])).unwrap();
    ///
    /// assert_eq!(list.len(), 2);
    /// assert!(CommandList::from_value(&json!({ "themes": [] })).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let records = value.as_array().ok_or_else(|| {
            ThemeError::MalformedCommandList("expected a list of operation records".to_string())
        })?;

        let commands = records
            .iter()
            .enumerate()
            .map(|(index, record)| Command::from_record(index, record))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { commands })
    }

    /// Iterates the commands in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Returns the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if there are no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a CommandList {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl FromIterator<Command> for CommandList {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
