//! Category labels and the rules that assign one to a new transaction.

pub const INCOME_CATEGORY: &str = "Income";
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Suggested labels offered before any transaction has been recorded.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    INCOME_CATEGORY,
    "Food",
    "Travel",
    "Utilities",
    "Entertainment",
    "Other",
    UNCATEGORIZED,
];

/// Picks the category stored on a new transaction.
///
/// A non-blank label supplied by the caller wins. Otherwise positive amounts are
/// filed as `Income` and everything else as `Uncategorized`.
pub fn resolve_category(supplied: Option<&str>, amount: f64) -> String {
    match supplied.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ if amount > 0.0 => INCOME_CATEGORY.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}
