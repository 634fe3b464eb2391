//! In-memory [`UserStore`] for exercising the HTTP contract without PostgreSQL.

use crate::error::AppError;
use crate::model::{User, UserPayload};
use crate::service::UserStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Which storage failure to inject on the next calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    Connection,
    Prepare,
    Execute,
    Scan,
    Extraction,
    Deadline,
}

impl Fault {
    fn into_error(self) -> AppError {
        match self {
            Fault::Connection => AppError::Connection(sqlx::Error::PoolTimedOut),
            Fault::Prepare => AppError::StatementPrepare(sqlx::Error::Protocol("prepare".into())),
            Fault::Execute => AppError::StatementExecute(sqlx::Error::Protocol("execute".into())),
            Fault::Scan => AppError::Scan(sqlx::Error::ColumnNotFound("email".into())),
            Fault::Extraction => AppError::ResultExtraction("no id".into()),
            Fault::Deadline => AppError::DeadlineExceeded,
        }
    }
}

#[derive(Default)]
struct Table {
    next_id: u32,
    rows: BTreeMap<u32, User>,
}

/// Auto-incrementing, ordered, and countable so tests can assert storage was (not) reached.
#[derive(Default)]
pub struct MemoryUserStore {
    table: Mutex<Table>,
    fault: Mutex<Option<Fault>>,
    calls: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(fault: Fault) -> Self {
        let store = Self::default();
        store.set_fault(Some(fault));
        store
    }

    pub fn set_fault(&self, fault: Option<Fault>) {
        *self.fault.lock().unwrap() = fault;
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, Table>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = *self.fault.lock().unwrap() {
            return Err(fault.into_error());
        }
        Ok(self.table.lock().unwrap())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &UserPayload) -> Result<u32, AppError> {
        let mut table = self.enter()?;
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(id, user.clone().into_user(id));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let table = self.enter()?;
        Ok(table.rows.values().rev().cloned().collect())
    }

    async fn find(&self, id: u32) -> Result<Option<User>, AppError> {
        let table = self.enter()?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(&self, id: u32, user: &UserPayload) -> Result<(), AppError> {
        let mut table = self.enter()?;
        if let Some(row) = table.rows.get_mut(&id) {
            row.name = user.name.clone();
            row.email = user.email.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: u32) -> Result<(), AppError> {
        let mut table = self.enter()?;
        table.rows.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.enter().map(|_| ())
    }
}
