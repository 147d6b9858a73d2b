use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::render;
use crate::core::services::{TransactionDraft, TransactionService};
use crate::ledger::{SortOrder, TransactionId, INCOME_CATEGORY};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "add",
            "Record a transaction (negative amounts are expenses)",
            "add <description> <amount> <yyyy-mm-dd> [category]",
            cmd_add,
        ),
        CommandDefinition::new(
            "remove",
            "Delete a transaction by id",
            "remove <id>",
            cmd_remove,
        ),
        CommandDefinition::new(
            "list",
            "Show transactions, newest first by default",
            "list [desc|asc]",
            cmd_list,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args.len() > 4 {
        return Err(CommandError::InvalidArguments(
            "usage: add <description> <amount> <yyyy-mm-dd> [category]".into(),
        ));
    }
    // missing fields are left blank so validation can name them
    let field = |index: usize| args.get(index).copied().unwrap_or_default();
    let mut draft = TransactionDraft::new(field(0), field(1), field(2));
    let category = match args.get(3) {
        Some(category) => Some(category.trim().to_string()),
        None => prefilled_category(context, field(1)),
    };
    let new_label = category
        .as_deref()
        .filter(|label| !label.is_empty() && !context.manager.is_known_category(label))
        .map(str::to_string);
    if let Some(category) = category {
        draft = draft.with_category(category);
    }

    let txn = context.manager.add_transaction(&draft)?;
    output::success(format!(
        "Added #{} {} {}",
        txn.id,
        txn.text,
        context.format.format_signed(txn.amount)
    ));
    if let Some(label) = new_label {
        output::info(format!("New category `{label}` added to suggestions."));
    }
    Ok(())
}

/// The remembered category fills an omitted category field. Income entries and
/// a remembered `Income` label are left to category resolution.
fn prefilled_category(context: &ShellContext, amount: &str) -> Option<String> {
    let is_income = TransactionService::parse_amount(amount).is_ok_and(|value| value > 0.0);
    if is_income {
        return None;
    }
    context
        .manager
        .last_category()
        .filter(|label| !label.eq_ignore_ascii_case(INCOME_CATEGORY))
        .map(str::to_string)
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments("usage: remove <id>".into()));
    };
    let id = raw
        .trim_start_matches('#')
        .parse::<u64>()
        .map(TransactionId)
        .map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a transaction id"))
        })?;

    let text = context.manager.transaction(id).map(|txn| txn.text.clone());
    if context.manager.remove_transaction(id)? {
        output::success(format!("Removed #{id} {}", text.unwrap_or_default()));
    } else {
        output::info(format!("No transaction #{id}; nothing to remove."));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let order = match args {
        [] => context.config.default_sort,
        [raw] => SortOrder::parse(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown sort order `{raw}`; use desc or asc"))
        })?,
        _ => return Err(CommandError::InvalidArguments("usage: list [desc|asc]".into())),
    };

    let view = context.manager.sorted_view(order);
    output::section(match view.order() {
        SortOrder::DateDesc => "Transactions (newest first)",
        SortOrder::DateAsc => "Transactions (oldest first)",
    });
    output::lines(&render::transaction_rows(&view, &context.format));
    Ok(())
}
