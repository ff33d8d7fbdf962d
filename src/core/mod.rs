/// Login, auto-login, and logout around the single credential check
pub mod auth;

/// Record-sale flow tying the cart, stock, and sale history together
pub mod checkout;

/// Strictly monotonic invoice numbering, persisted across restarts
pub mod invoice;

/// Bounded notification log and the stock/debt alert sweep
pub mod notifications;

/// Settings projection with schema-driven defaults and patch merging
pub mod settings;
