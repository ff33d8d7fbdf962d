//! Notification engine.
//!
//! Maintains a newest-first log capped at 50 entries and derives
//! operational alerts from repository state: out-of-stock and low-stock
//! products, and customer debts older than a week. The log itself is a
//! repository collection and is flushed on every append.

use crate::models::{Notification, NotificationKind};
use crate::repository::Repository;
use chrono::{Duration, Utc};
use tracing::{debug, info, instrument};

/// Most recent entries kept; the tail is evicted beyond this.
pub const LOG_CAP: usize = 50;

/// Inclusive quantity at or below which a product counts as low stock.
const LOW_STOCK_THRESHOLD: i64 = 5;

/// Age in days past which an open customer debt triggers a reminder.
const DEBT_REMINDER_DAYS: i64 = 7;

/// Prepends an unread entry to the log and persists it. Once the log
/// exceeds [`LOG_CAP`] the oldest entry is dropped.
#[instrument(skip(repo, message))]
pub async fn append(repo: &mut Repository, message: String, kind: NotificationKind) {
    debug!("Appending {:?} notification: {}", kind, message);
    repo.mutate_notifications(|log| {
        log.insert(
            0,
            Notification {
                message,
                kind,
                timestamp: Utc::now(),
                read: false,
            },
        );
        if log.len() > LOG_CAP {
            log.pop();
        }
    })
    .await;
}

/// Sweeps repository state and appends one alert per qualifying product
/// and customer: danger for `qty <= 0`, warning for `0 < qty <= 5`, and
/// a warning per customer whose debt is positive and older than 7 days.
///
/// The sweep does not deduplicate: calling it twice appends the same
/// alerts twice, mirroring its refresh semantics. Callers decide when a
/// sweep is due (startup, stock mutation, debt mutation).
#[instrument(skip(repo))]
pub async fn scan(repo: &mut Repository) {
    let mut alerts: Vec<(String, NotificationKind)> = Vec::new();

    for product in repo.products() {
        if product.qty <= 0 {
            alerts.push((
                format!("نفاد مخزون: {}", product.name),
                NotificationKind::Danger,
            ));
        } else if product.qty <= LOW_STOCK_THRESHOLD {
            alerts.push((
                format!("مخزون منخفض: {} ({})", product.name, product.qty),
                NotificationKind::Warning,
            ));
        }
    }

    let week_ago = Utc::now() - Duration::days(DEBT_REMINDER_DAYS);
    for customer in repo.customers() {
        if customer.debt > 0.0
            && customer.debt_date.is_some_and(|date| date < week_ago)
        {
            alerts.push((
                format!("تذكير: دين {} لأكثر من أسبوع", customer.name),
                NotificationKind::Warning,
            ));
        }
    }

    info!("Notification sweep produced {} alert(s).", alerts.len());
    for (message, kind) in alerts {
        append(repo, message, kind).await;
    }
}

/// Marks every entry as read and persists the full log. Called when the
/// user opens the notification panel.
#[instrument(skip(repo))]
pub async fn acknowledge_all(repo: &mut Repository) {
    repo.mutate_notifications(|log| {
        for entry in log.iter_mut() {
            entry.read = true;
        }
    })
    .await;
}

/// Number of unread entries, consumed by the badge display.
pub fn unread_count(repo: &Repository) -> usize {
    repo.notifications().iter().filter(|n| !n.read).count()
}
