//! Pipeline driver: folds a command list over the composition state.
//!
//! Each command is validated into an [`Operation`] first and only then
//! applied, so a rejected payload leaves the state exactly as the previous
//! command left it. Rejections are logged and collected in the
//! [`RunReport`]; they never stop the run.

use crate::command::{Command, CommandList, OperationKind};
use crate::error::OptionError;
use crate::executor::{apply_extend, apply_override, apply_reset, apply_themes};
use crate::options::{validate_themes, MergeOptions};
use crate::registry::StyleRegistry;
use crate::state::{CompositionState, GeneratedStyles};

/// A command whose payload passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Themes(Vec<String>),
    Reset,
    Override(MergeOptions),
    Extend(MergeOptions),
}

impl Operation {
    /// Validates a command's payload against the registry.
    pub fn validate(command: &Command, registry: &StyleRegistry) -> Result<Self, OptionError> {
        match command {
            Command::Themes(payload) => validate_themes(payload, registry).map(Operation::Themes),
            Command::Reset(_) => Ok(Operation::Reset),
            Command::Override(payload) => MergeOptions::from_payload(payload).map(Operation::Override),
            Command::Extend(payload) => MergeOptions::from_payload(payload).map(Operation::Extend),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Themes(_) => OperationKind::Themes,
            Operation::Reset => OperationKind::Reset,
            Operation::Override(_) => OperationKind::Override,
            Operation::Extend(_) => OperationKind::Extend,
        }
    }

    /// Applies the operation, returning the next state.
    pub fn apply(self, state: CompositionState, registry: &StyleRegistry) -> CompositionState {
        match self {
            Operation::Themes(themes) => apply_themes(state, themes, registry),
            Operation::Reset => apply_reset(state),
            Operation::Override(options) => apply_override(state, &options, registry),
            Operation::Extend(options) => apply_extend(state, &options, registry),
        }
    }
}

/// A command that was skipped because its payload was invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCommand {
    /// Position of the command in the list.
    pub index: usize,
    pub kind: OperationKind,
    pub reason: OptionError,
}

impl std::fmt::Display for SkippedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "command {} ({}) skipped: {}",
            self.index, self.kind, self.reason
        )
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// State after the last command.
    pub state: CompositionState,
    /// Commands rejected along the way, in order.
    pub skipped: Vec<SkippedCommand>,
}

impl RunReport {
    /// Returns true if every command was applied.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Consumes the report, returning the generated table.
    pub fn into_generated(self) -> GeneratedStyles {
        self.state.into_generated()
    }
}

/// Runs command lists against one style registry.
///
/// # Example
///
/// ```rust
/// use cardinal_theme::{Command, CommandList, Pipeline, StyleRegistry};
/// use serde_json::json;
///
/// let mut registry = StyleRegistry::new();
/// registry.insert("clear", "button", "default", "A");
///
/// let commands: CommandList = vec![
///     Command::Themes(json!(["clear"])),
///     Command::Extend(json!({ "match": "mode" })),
/// ]
/// .into_iter()
/// .collect();
///
/// let report = Pipeline::new(&registry).run(&commands);
/// assert_eq!(report.skipped.len(), 1);
/// assert_eq!(report.state.generated().len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'r> {
    registry: &'r StyleRegistry,
}

impl<'r> Pipeline<'r> {
    pub fn new(registry: &'r StyleRegistry) -> Self {
        Self { registry }
    }

    /// Applies one command to a state.
    ///
    /// On a rejected payload the state is returned unchanged together with
    /// the reason.
    pub fn step(
        &self,
        state: CompositionState,
        command: &Command,
    ) -> (CompositionState, Option<OptionError>) {
        match Operation::validate(command, self.registry) {
            Ok(operation) => (operation.apply(state, self.registry), None),
            Err(reason) => (state, Some(reason)),
        }
    }

    /// Runs every command in order, starting from an empty state.
    pub fn run(&self, commands: &CommandList) -> RunReport {
        self.run_from(CompositionState::new(), commands)
    }

    /// Runs every command in order, starting from `initial`.
    pub fn run_from(&self, initial: CompositionState, commands: &CommandList) -> RunReport {
        let (state, skipped) = commands.iter().enumerate().fold(
            (initial, Vec::new()),
            |(state, mut skipped), (index, command)| {
                let kind = command.kind();
                let (state, rejected) = self.step(state, command);

                match rejected {
                    None => {
                        tracing::debug!(
                            index,
                            operation = %kind,
                            active_themes = state.active_themes().len(),
                            buckets = state.generated().len(),
                            "applied command"
                        );
                    }
                    Some(reason) => {
                        tracing::warn!(index, operation = %kind, %reason, "skipping command");
                        skipped.push(SkippedCommand {
                            index,
                            kind,
                            reason,
                        });
                    }
                }

                (state, skipped)
            },
        );

        tracing::info!(
            commands = commands.len(),
            skipped = skipped.len(),
            components = state.generated().component_names().count(),
            buckets = state.generated().len(),
            "theme composition finished"
        );

        RunReport { state, skipped }
    }
}
