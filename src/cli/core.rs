use std::{cell::RefCell, io, rc::Rc};

use strsim::levenshtein;

use crate::cli::commands::{all_definitions, CommandDefinition, CommandRegistry};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::render;
use crate::cli::shell::parse_command_line;
use crate::config::{Config, ConfigManager};
use crate::core::format::DisplayFormat;
use crate::core::utils::PathResolver;
use crate::core::{LedgerEvent, LedgerManager};
use crate::errors::{ConfigError, LedgerError};
use crate::storage::{JsonStorage, StorageBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// State shared by every command for the lifetime of one shell session.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    pub(crate) manager: LedgerManager,
    pub(crate) config: Config,
    pub(crate) format: DisplayFormat,
    pub(crate) registry: CommandRegistry,
    pending: Rc<RefCell<Vec<LedgerEvent>>>,
}

impl ShellContext {
    /// Opens the ledger and config found under the data home.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        let config = ConfigManager::with_base_dir(base.clone())?.load()?;
        let storage = JsonStorage::new(Some(base))?;
        Self::with_parts(mode, Box::new(storage), config)
    }

    pub fn with_parts(
        mode: CliMode,
        storage: Box<dyn StorageBackend>,
        config: Config,
    ) -> Result<Self, CliError> {
        let plain_mode = mode == CliMode::Script || !config.ui_color_enabled;
        output::set_preferences(OutputPreferences { plain_mode });
        if plain_mode {
            colored::control::set_override(false);
        }

        let mut manager = LedgerManager::open(storage)?;
        for warning in manager.load_warnings() {
            output::warning(warning);
        }

        // the shell re-renders from these after each command
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        manager.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Ok(Self {
            mode,
            running: true,
            format: config.display_format(),
            config,
            manager,
            registry: CommandRegistry::new(all_definitions()),
            pending,
        })
    }

    pub fn manager(&self) -> &LedgerManager {
        &self.manager
    }

    /// The prompt doubles as the input form and pre-fills the last category.
    pub fn prompt(&self) -> String {
        match self.manager.last_category() {
            Some(category) => format!("ledger [{category}]> "),
            None => "ledger> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CliError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            Ok(LoopControl::Continue) => Ok(LoopControl::Continue),
            Err(err) => {
                self.report_error(err)?;
                Ok(LoopControl::Continue)
            }
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(definition) = self.registry.get(command).cloned() else {
            output::error(format!("Unknown command `{raw}`."));
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        tracing::debug!(command = definition.name, "dispatching command");
        match (definition.handler)(self, args) {
            Ok(()) => {
                self.flush_events();
                Ok(LoopControl::Continue)
            }
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    fn flush_events(&mut self) {
        let changed = {
            let mut pending = self.pending.borrow_mut();
            let changed = !pending.is_empty();
            pending.clear();
            changed
        };
        if changed {
            output::info(render::status_line(&self.manager.aggregates(), &self.format));
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> bool {
        // interrupting an interactive prompt only clears the line
        self.mode == CliMode::Script
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(err) if err.is_validation() => {
                output::error(format!("Transaction rejected: {err}"));
                output::info("Please complete all fields (description, amount, and date).");
                Ok(())
            }
            CommandError::Ledger(err) => {
                output::error(err);
                Ok(())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    use crate::storage::MemoryStorage;

    let mut app = ShellContext::with_parts(
        CliMode::Script,
        Box::new(MemoryStorage::new()),
        Config::default(),
    )?;
    for line in lines {
        match app.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SortOrder;

    #[test]
    fn script_adds_and_removes_transactions() {
        let app = process_script(&[
            "add Salary 1000 2024-01-01",
            "add Groceries -50 2024-01-02 Food",
            "add Coffee -3.5 2024-01-02",
            "remove 3",
        ])
        .expect("script runs");

        let aggregates = app.manager().aggregates();
        assert_eq!(aggregates.balance, 950.0);
        assert_eq!(aggregates.expense, 50.0);
        let texts: Vec<_> = app
            .manager()
            .sorted_view(SortOrder::DateDesc)
            .iter()
            .map(|txn| txn.text.clone())
            .collect();
        assert_eq!(texts, vec!["Groceries", "Salary"]);
    }

    #[test]
    fn quoted_descriptions_stay_together() {
        let app = process_script(&["add \"Weekly shop\" -80 2024-03-04 \"Food & drink\""])
            .expect("script runs");
        let txn = &app.manager().transactions()[0];
        assert_eq!(txn.text, "Weekly shop");
        assert_eq!(txn.category, "Food & drink");
    }

    #[test]
    fn invalid_lines_do_not_stop_the_script() {
        let app = process_script(&[
            "add Nothing 0 2024-01-01",
            "ad Typo 1 2024-01-01",
            "remove not-a-number",
            "add Salary 1000 2024-01-01",
        ])
        .expect("script runs");
        assert_eq!(app.manager().transactions().len(), 1);
    }

    #[test]
    fn exit_stops_processing() {
        let app = process_script(&["exit", "add Salary 1000 2024-01-01"]).expect("script runs");
        assert!(!app.running);
        assert!(app.manager().transactions().is_empty());
    }

    #[test]
    fn omitted_category_uses_remembered_expense_label() {
        let app = process_script(&[
            "category Food",
            "add Lunch -10 2024-01-01",
            "add Salary 1000 2024-01-02",
            "add Taxi -7 2024-01-03",
            "add Parking -3 2024-01-04 \"\"",
        ])
        .expect("script runs");
        let categories: Vec<_> = app
            .manager()
            .transactions()
            .iter()
            .map(|txn| txn.category.as_str())
            .collect();
        assert_eq!(
            categories,
            vec!["Food", "Income", "Uncategorized", "Uncategorized"]
        );
    }

    #[test]
    fn prompt_shows_last_category() {
        let app = process_script(&["category Travel"]).expect("script runs");
        assert_eq!(app.prompt(), "ledger [Travel]> ");
    }
}
