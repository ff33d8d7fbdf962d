//! Checkout: turns the open cart into a recorded sale.
//!
//! The flow issues independent mutations per collection (stock, sales,
//! today's sales, cart). There is no cross-collection transaction: if a
//! write fails mid-flow the durable copies can desynchronize, which is
//! accepted for a single-device tool and must not be papered over with
//! a transactional layer that would change the flush-per-key timing.

use crate::errors::{Error, Result};
use crate::models::Sale;
use crate::repository::Repository;
use chrono::Utc;
use tracing::{info, instrument};

use super::invoice;

/// Records the open cart as a sale: issues the next invoice number,
/// decrements stock per line (clamped at zero by the repository
/// boundary), appends the sale to the sale history and to today's
/// sales, and clears the cart.
///
/// # Errors
///
/// Returns `Error::Invariant` if the cart is empty.
#[instrument(skip(repo))]
pub async fn record_sale(repo: &mut Repository) -> Result<Sale> {
    if repo.cart().is_empty() {
        return Err(Error::Invariant(
            "Cannot record a sale from an empty cart".to_string(),
        ));
    }

    let items = repo.cart().to_vec();
    let total: f64 = items.iter().map(|line| line.price * line.qty as f64).sum();
    let invoice_number = invoice::next(repo).await;
    let sale = Sale {
        id: invoice_number as i64,
        invoice_number,
        items,
        total,
        timestamp: Utc::now(),
    };

    repo.mutate_products(|products| {
        for line in &sale.items {
            if let Some(product) = products.iter_mut().find(|p| p.id == line.product_id) {
                product.qty -= line.qty;
            }
        }
    })
    .await;
    repo.mutate_sales(|sales| sales.push(sale.clone())).await;
    repo.mutate_today_sales(|sales| sales.push(sale.clone())).await;
    repo.mutate_cart(|cart| cart.clear()).await;

    info!(
        "Recorded sale #{} with {} line(s), total {}.",
        sale.invoice_number,
        sale.items.len(),
        sale.total
    );
    Ok(sale)
}
