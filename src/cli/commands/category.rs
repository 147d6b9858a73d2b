use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "categories",
            "List default and previously used categories",
            "categories",
            cmd_categories,
        ),
        CommandDefinition::new(
            "category",
            "Show or set the category suggested for the next entry",
            "category [value]",
            cmd_category,
        ),
    ]
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: categories".into()));
    }
    output::section("Categories");
    let lines: Vec<String> = context
        .manager
        .category_catalog()
        .into_iter()
        .map(|name| format!("  {name}"))
        .collect();
    output::lines(&lines);
    Ok(())
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            match context.manager.last_category() {
                Some(category) => output::info(format!("Last category: {category}")),
                None => output::info("No category remembered."),
            }
            Ok(())
        }
        [value] => {
            let value = value.trim();
            context.manager.remember_category(value)?;
            if value.is_empty() {
                output::success("Category suggestion cleared.");
            } else {
                output::success(format!("Category suggestion set to {value}."));
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: category [value] (quote names with spaces)".into(),
        )),
    }
}
