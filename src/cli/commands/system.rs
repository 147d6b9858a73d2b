use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandDefinition::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let Some(definition) = context.command(&name.to_lowercase()) else {
            return Err(CommandError::InvalidArguments(format!(
                "no help for unknown command `{name}`"
            )));
        };
        output::section(definition.name);
        output::lines(&[
            definition.description.to_string(),
            format!("Usage: {}", definition.usage),
        ]);
        return Ok(());
    }

    output::section("Commands");
    let lines: Vec<String> = context
        .registry
        .iter()
        .map(|definition| format!("  {:<44} {}", definition.usage, definition.description))
        .collect();
    output::lines(&lines);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
