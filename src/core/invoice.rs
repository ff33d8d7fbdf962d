//! Invoice numbering service.
//!
//! Issues strictly increasing invoice numbers with no gaps and no
//! repeats, surviving restarts: the counter holds the next number to
//! issue and is persisted before `next` returns, so after a reload the
//! sequence simply continues.

use crate::repository::Repository;
use tracing::{info, instrument};

/// Issues the next invoice number: returns the current counter value and
/// durably advances the counter by exactly one before returning.
#[instrument(skip(repo))]
pub async fn next(repo: &mut Repository) -> u64 {
    let issued = repo.invoice_counter();
    repo.mutate_invoice_counter(|counter| *counter += 1).await;
    info!("Issued invoice number {}.", issued);
    issued
}
