use std::{cmp::Ordering, collections::HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionId};

/// Ordered collection of transactions, kept in insertion order.
///
/// Ids handed out by [`Ledger::allocate_id`] come from a counter that starts
/// above the largest loaded id and only moves forward, so within a process they
/// never collide and a larger id always means a later insertion. Once the
/// counter passes `u64::MAX` no further ids are issued.
#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_id: Option<u64>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Builds a ledger from persisted records, dropping duplicate ids.
    ///
    /// Returns the ledger together with a warning per dropped record.
    pub fn from_transactions(records: Vec<Transaction>) -> (Self, Vec<String>) {
        let mut seen = HashSet::new();
        let mut warnings = Vec::new();
        let mut transactions = Vec::with_capacity(records.len());
        for txn in records {
            if seen.insert(txn.id) {
                transactions.push(txn);
            } else {
                warnings.push(format!(
                    "dropped transaction `{}` with duplicate id {}",
                    txn.text, txn.id
                ));
            }
        }
        let next_id = transactions
            .iter()
            .map(|txn| txn.id.0)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        if next_id.is_none() {
            warnings.push(format!(
                "stored id {} is the largest possible; new transactions cannot be added",
                u64::MAX
            ));
        }
        (
            Self {
                transactions,
                next_id,
            },
            warnings,
        )
    }

    /// Reserves the next identifier without touching the collection. `None`
    /// once the id space is used up.
    pub fn allocate_id(&mut self) -> Option<TransactionId> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(TransactionId(id))
    }

    pub fn append(&mut self, transaction: Transaction) {
        if let Some(next) = self.next_id {
            if transaction.id.0 >= next {
                self.next_id = transaction.id.0.checked_add(1);
            }
        }
        self.transactions.push(transaction);
    }

    /// Removes the transaction with `id`, returning it with its former position.
    pub fn remove(&mut self, id: TransactionId) -> Option<(usize, Transaction)> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some((index, self.transactions.remove(index)))
    }

    /// Puts a removed transaction back where it was.
    pub fn restore(&mut self, index: usize, transaction: Transaction) {
        let index = index.min(self.transactions.len());
        self.transactions.insert(index, transaction);
    }

    /// Drops the most recently appended transaction if it carries `id`.
    pub fn pop_if(&mut self, id: TransactionId) -> Option<Transaction> {
        match self.transactions.last() {
            Some(last) if last.id == id => self.transactions.pop(),
            _ => None,
        }
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn sorted_view(&self, order: SortOrder) -> SortedView<'_> {
        SortedView {
            ledger: self,
            order,
        }
    }
}

/// Display order for transaction lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recent date first; same-day entries newest id first.
    #[default]
    DateDesc,
    /// Oldest date first; same-day entries oldest id first.
    DateAsc,
}

impl SortOrder {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "desc" | "date-desc" | "newest" => Some(SortOrder::DateDesc),
            "asc" | "date-asc" | "oldest" => Some(SortOrder::DateAsc),
            _ => None,
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        let key = |txn: &Transaction| -> (NaiveDate, TransactionId) { (txn.date, txn.id) };
        match self {
            SortOrder::DateDesc => key(b).cmp(&key(a)),
            SortOrder::DateAsc => key(a).cmp(&key(b)),
        }
    }
}

/// Sorted, read-only view over a [`Ledger`].
///
/// Nothing is computed until the view is iterated, and each call to
/// [`SortedView::iter`] starts over. The ledger itself keeps its insertion order.
#[derive(Debug, Clone, Copy)]
pub struct SortedView<'a> {
    ledger: &'a Ledger,
    order: SortOrder,
}

impl<'a> SortedView<'a> {
    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn iter(&self) -> std::vec::IntoIter<&'a Transaction> {
        let mut rows: Vec<&'a Transaction> = self.ledger.transactions.iter().collect();
        let order = self.order;
        rows.sort_by(|a, b| order.compare(a, b));
        rows.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }
}

impl<'a> IntoIterator for &SortedView<'a> {
    type Item = &'a Transaction;
    type IntoIter = std::vec::IntoIter<&'a Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn push(ledger: &mut Ledger, text: &str, day: u32) -> TransactionId {
        let id = ledger.allocate_id().expect("ids available");
        ledger.append(Transaction::new(id, text, -1.0, date(day), "Food"));
        id
    }

    #[test]
    fn allocated_ids_are_monotonic_and_unique() {
        let mut ledger = Ledger::new();
        let first = push(&mut ledger, "a", 1);
        let second = push(&mut ledger, "b", 1);
        ledger.remove(second);
        let third = push(&mut ledger, "c", 1);
        assert!(first < second && second < third);
    }

    #[test]
    fn loaded_ids_seed_the_counter() {
        let records = vec![
            Transaction::new(TransactionId(40_000_123), "legacy", 5.0, date(1), "Income"),
            Transaction::new(TransactionId(17), "older", -2.0, date(2), "Food"),
        ];
        let (mut ledger, warnings) = Ledger::from_transactions(records);
        assert!(warnings.is_empty());
        assert_eq!(ledger.allocate_id(), Some(TransactionId(40_000_124)));
    }

    #[test]
    fn exhausted_id_space_stops_allocation() {
        let records = vec![Transaction::new(
            TransactionId(u64::MAX),
            "edge",
            -1.0,
            date(1),
            "Food",
        )];
        let (mut ledger, warnings) = Ledger::from_transactions(records);
        assert_eq!(warnings.len(), 1);
        assert_eq!(ledger.allocate_id(), None);

        let mut fresh = Ledger::new();
        fresh.append(Transaction::new(TransactionId(u64::MAX - 1), "a", -1.0, date(1), "Food"));
        assert_eq!(fresh.allocate_id(), Some(TransactionId(u64::MAX)));
        assert_eq!(fresh.allocate_id(), None);
    }

    #[test]
    fn default_matches_new() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.allocate_id(), Some(TransactionId(1)));
    }

    #[test]
    fn duplicate_ids_are_dropped_with_warning() {
        let records = vec![
            Transaction::new(TransactionId(3), "first", 5.0, date(1), "Income"),
            Transaction::new(TransactionId(3), "second", -2.0, date(2), "Food"),
        ];
        let (ledger, warnings) = Ledger::from_transactions(records);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transactions()[0].text, "first");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn sorted_view_orders_by_date_then_id() {
        let mut ledger = Ledger::new();
        let early = push(&mut ledger, "early", 1);
        let late_a = push(&mut ledger, "late-a", 5);
        let late_b = push(&mut ledger, "late-b", 5);

        let desc: Vec<_> = ledger
            .sorted_view(SortOrder::DateDesc)
            .iter()
            .map(|txn| txn.id)
            .collect();
        assert_eq!(desc, vec![late_b, late_a, early]);

        let asc: Vec<_> = ledger
            .sorted_view(SortOrder::DateAsc)
            .iter()
            .map(|txn| txn.id)
            .collect();
        assert_eq!(asc, vec![early, late_a, late_b]);
    }

    #[test]
    fn sorted_view_is_restartable_and_leaves_ledger_order_alone() {
        let mut ledger = Ledger::new();
        push(&mut ledger, "early", 1);
        push(&mut ledger, "late", 9);
        let before: Vec<_> = ledger.transactions().to_vec();

        let view = ledger.sorted_view(SortOrder::default());
        let first: Vec<_> = view.iter().map(|txn| txn.id).collect();
        let second: Vec<_> = (&view).into_iter().map(|txn| txn.id).collect();
        assert_eq!(first, second);
        assert_eq!(ledger.transactions(), before.as_slice());
    }

    #[test]
    fn restore_reinserts_at_original_position() {
        let mut ledger = Ledger::new();
        push(&mut ledger, "a", 1);
        let middle = push(&mut ledger, "b", 2);
        push(&mut ledger, "c", 3);
        let (index, txn) = ledger.remove(middle).unwrap();
        ledger.restore(index, txn);
        let texts: Vec<_> = ledger.transactions().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn sort_order_parses_aliases() {
        assert_eq!(SortOrder::parse("DESC"), Some(SortOrder::DateDesc));
        assert_eq!(SortOrder::parse("date-asc"), Some(SortOrder::DateAsc));
        assert_eq!(SortOrder::parse("sideways"), None);
    }
}
