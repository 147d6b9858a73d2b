use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::render;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Show balance, totals and the expense breakdown",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "chart",
            "Compare income, expenses and net balance",
            "chart",
            cmd_chart,
        ),
    ]
}

fn no_arguments(args: &[&str], usage: &str) -> CommandResult {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!("usage: {usage}")))
    }
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_arguments(args, "summary")?;
    let aggregates = context.manager.aggregates();

    output::section("Summary");
    output::lines(&render::totals_lines(&aggregates, &context.format));
    output::section("Expenses by category");
    output::lines(&render::breakdown_lines(&aggregates, &context.format));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    no_arguments(args, "chart")?;
    let aggregates = context.manager.aggregates();

    output::section("Income vs Expenses");
    output::lines(&render::chart_lines(&aggregates, &context.format));
    Ok(())
}
