//! Optimistic apply-then-confirm transaction
//!
//! Shared UI state mutates before the backend confirms. The write lock is
//! held only for the local transitions, never across the remote call, so
//! readers observe the optimistic state while the call is in flight. A
//! confirmed call reconciles with the authoritative value; a rejected call
//! runs the rollback and propagates the error unchanged.

use shared::AppResult;
use std::future::Future;
use tokio::sync::RwLock;

/// Run one optimistic transaction against `state`.
///
/// `mutate` applies the optimistic local change, `commit` reconciles the
/// state with the value the backend returned, `rollback` undoes exactly
/// what `mutate` did. Each closure runs under its own short-lived write
/// guard.
pub async fn apply_optimistic<S, T, M, F, C, R>(
    state: &RwLock<S>,
    mutate: M,
    remote: F,
    commit: C,
    rollback: R,
) -> AppResult<T>
where
    M: FnOnce(&mut S),
    F: Future<Output = AppResult<T>>,
    C: FnOnce(&mut S, &T),
    R: FnOnce(&mut S),
{
    {
        let mut guard = state.write().await;
        mutate(&mut guard);
    }
    match remote.await {
        Ok(value) => {
            let mut guard = state.write().await;
            commit(&mut guard, &value);
            drop(guard);
            Ok(value)
        }
        Err(e) => {
            let mut guard = state.write().await;
            rollback(&mut guard);
            drop(guard);
            Err(e)
        }
    }
}
