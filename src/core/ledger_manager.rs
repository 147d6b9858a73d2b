use crate::core::services::{
    Aggregates, CategoryService, SummaryService, TransactionDraft, TransactionService,
};
use crate::errors::LedgerError;
use crate::ledger::{Ledger, SortOrder, SortedView, Transaction, TransactionId};
use crate::storage::{ledger_warnings, StorageBackend};

/// Change notifications emitted after the ledger has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Loaded { count: usize },
    TransactionAdded(Transaction),
    TransactionRemoved(TransactionId),
}

type Listener = Box<dyn FnMut(&LedgerEvent)>;

/// Facade that owns the ledger and keeps it in step with storage.
///
/// Every mutation is validated, applied, and saved as one step: if the save
/// fails the in-memory ledger is put back the way it was and the error is
/// returned.
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    last_category: Option<String>,
    load_warnings: Vec<String>,
    listeners: Vec<Listener>,
}

impl LedgerManager {
    /// Loads persisted state. Unreadable transaction data is replaced by an
    /// empty ledger and reported through [`LedgerManager::load_warnings`].
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self, LedgerError> {
        let mut manager = Self {
            ledger: Ledger::new(),
            storage,
            last_category: None,
            load_warnings: Vec::new(),
            listeners: Vec::new(),
        };
        manager.load_from_storage()?;
        Ok(manager)
    }

    /// Re-reads storage, discarding in-memory state.
    pub fn reload(&mut self) -> Result<(), LedgerError> {
        self.load_from_storage()?;
        self.notify(LedgerEvent::Loaded {
            count: self.ledger.len(),
        });
        Ok(())
    }

    fn load_from_storage(&mut self) -> Result<(), LedgerError> {
        let mut warnings = Vec::new();
        let records = match self.storage.load() {
            Ok(records) => records,
            Err(LedgerError::StorageRead { path, reason }) => {
                tracing::warn!(
                    path = %path.display(),
                    %reason,
                    "stored transactions are unreadable, starting with an empty ledger"
                );
                warnings.push(format!(
                    "ignored unreadable data in {}: {}",
                    path.display(),
                    reason
                ));
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        warnings.extend(ledger_warnings(&records));
        let (ledger, dropped) = Ledger::from_transactions(records);
        warnings.extend(dropped);
        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        self.last_category = self
            .storage
            .load_last_category()?
            .filter(|category| !category.is_empty());
        self.ledger = ledger;
        self.load_warnings = warnings;
        tracing::info!(count = self.ledger.len(), "ledger loaded");
        Ok(())
    }

    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Registers a callback invoked after every successful change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&LedgerEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Validates `draft`, appends it under a fresh id, and saves the ledger.
    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<Transaction, LedgerError> {
        let valid = TransactionService::validate(draft).map_err(|err| {
            tracing::debug!(error = %err, "rejected transaction draft");
            err
        })?;

        let id = self.ledger.allocate_id().ok_or(LedgerError::IdsExhausted)?;
        let transaction = Transaction::new(id, valid.text, valid.amount, valid.date, valid.category);
        self.ledger.append(transaction.clone());
        if let Err(err) = self.storage.save(self.ledger.transactions()) {
            self.ledger.pop_if(id);
            tracing::error!(error = %err, "failed to persist new transaction");
            return Err(err);
        }

        tracing::info!(
            %id,
            amount = transaction.amount,
            category = %transaction.category,
            "transaction added"
        );
        if let Err(err) = self.store_last_category(&transaction.category) {
            tracing::warn!(error = %err, "could not remember last category");
        }
        self.notify(LedgerEvent::TransactionAdded(transaction.clone()));
        Ok(transaction)
    }

    /// Removes the transaction with `id`. Unknown ids are a no-op that returns
    /// `Ok(false)` without touching storage.
    pub fn remove_transaction(&mut self, id: TransactionId) -> Result<bool, LedgerError> {
        let Some((index, removed)) = self.ledger.remove(id) else {
            tracing::debug!(%id, "remove requested for unknown transaction");
            return Ok(false);
        };
        if let Err(err) = self.storage.save(self.ledger.transactions()) {
            self.ledger.restore(index, removed);
            tracing::error!(error = %err, %id, "failed to persist removal");
            return Err(err);
        }
        tracing::info!(%id, "transaction removed");
        self.notify(LedgerEvent::TransactionRemoved(id));
        Ok(true)
    }

    pub fn aggregates(&self) -> Aggregates {
        SummaryService::aggregates(&self.ledger)
    }

    pub fn sorted_view(&self, order: SortOrder) -> SortedView<'_> {
        self.ledger.sorted_view(order)
    }

    pub fn category_catalog(&self) -> Vec<String> {
        CategoryService::catalog(&self.ledger)
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.ledger.transaction(id)
    }

    /// Whether `label` already appears in the category catalog.
    pub fn is_known_category(&self, label: &str) -> bool {
        CategoryService::is_known(&self.ledger, label)
    }

    /// Category to pre-fill in the input form, if any.
    pub fn last_category(&self) -> Option<&str> {
        self.last_category.as_deref()
    }

    /// Records an edit of the category field. Any string is accepted; an empty
    /// one clears the suggestion.
    pub fn remember_category(&mut self, category: &str) -> Result<(), LedgerError> {
        self.store_last_category(category)
    }

    fn store_last_category(&mut self, category: &str) -> Result<(), LedgerError> {
        self.storage.save_last_category(category)?;
        self.last_category = Some(category.to_string()).filter(|value| !value.is_empty());
        Ok(())
    }

    fn notify(&mut self, event: LedgerEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
