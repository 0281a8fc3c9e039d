use std::sync::{Condvar, Mutex, OnceLock, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Pending,
    Open,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitError {
    TimedOut,
    Failed,
}

/// Write-once slot with a blocking, bounded wait for readers.
///
/// The value only becomes visible once it is complete, so readers never see a
/// partially built table. Waiters are woken as soon as it is published, or as
/// soon as the gate is marked failed.
pub(crate) struct Gate<T> {
    value: OnceLock<T>,
    status: Mutex<Status>,
    cond: Condvar,
}

impl<T> Gate<T> {
    pub fn new() -> Self {
        Self {
            value: OnceLock::new(),
            status: Mutex::new(Status::Pending),
            cond: Condvar::new(),
        }
    }

    /// Publish the value. Returns `false` (and drops `value`) if the gate was
    /// already open.
    pub fn publish(&self, value: T) -> bool {
        if self.value.set(value).is_err() {
            return false;
        }
        self.settle(Status::Open);
        true
    }

    /// Give up on the value. Returns `false` if it was already published.
    pub fn fail(&self) -> bool {
        if self.is_open() {
            return false;
        }
        self.settle(Status::Failed);
        true
    }

    fn settle(&self, to: Status) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if *status != Status::Open {
            *status = to;
        }
        self.cond.notify_all();
    }

    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    pub fn is_open(&self) -> bool {
        self.value.get().is_some()
    }

    pub fn is_failed(&self) -> bool {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) == Status::Failed
    }

    /// Block until published, failed, or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> Result<&T, WaitError> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        let status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        let (status, _) = self
            .cond
            .wait_timeout_while(status, timeout, |s| *s == Status::Pending)
            .unwrap_or_else(PoisonError::into_inner);
        let failed = *status == Status::Failed;
        drop(status);
        match self.value.get() {
            Some(value) => Ok(value),
            None if failed => Err(WaitError::Failed),
            None => Err(WaitError::TimedOut),
        }
    }
}
