//! In-memory adapters for the repository ports.
//!
//! They back the server when no database URL is configured and give tests a
//! real store without PostgreSQL. Records live for the lifetime of the
//! process and listings preserve insertion order.

mod projects;
mod test_cases;
mod users;

pub use projects::InMemoryProjectRepository;
pub use test_cases::InMemoryTestCaseRepository;
pub use users::InMemoryUserRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Read-lock `lock`, turning poisoning into an adapter error via `poisoned`.
fn read<'a, T, E>(
    lock: &'a RwLock<T>,
    poisoned: impl FnOnce() -> E,
) -> Result<RwLockReadGuard<'a, T>, E> {
    lock.read().map_err(|_| poisoned())
}

/// Write-lock `lock`, turning poisoning into an adapter error via `poisoned`.
fn write<'a, T, E>(
    lock: &'a RwLock<T>,
    poisoned: impl FnOnce() -> E,
) -> Result<RwLockWriteGuard<'a, T>, E> {
    lock.write().map_err(|_| poisoned())
}
