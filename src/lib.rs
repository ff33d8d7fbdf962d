//! `Shopkeeper` - local persistent state & notification engine for a
//! single-station retail point of sale.
//!
//! This crate keeps an authoritative, durable record of the station's
//! business entities (inventory, customers, sales, debts, notifications,
//! and a monotonically increasing invoice counter) across restarts,
//! using only local storage. It hydrates every collection on startup,
//! flushes each collection after every mutation, and derives
//! operational alerts (low/out-of-stock, overdue debt) from the state
//! it owns. Rendering, navigation, and the rest of the presentation
//! layer are external collaborators.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Performance
    clippy::inefficient_to_string,
    clippy::needless_pass_by_value,

    // Correctness
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Application configuration (store location) from the environment
pub mod config;
/// Business logic - invoicing, notifications, auth, checkout, settings
pub mod core;
/// Unified error types and result handling
pub mod errors;
/// Entity records persisted by the repository
pub mod models;
/// In-memory owner of all collections, flushed to the store per mutation
pub mod repository;
/// Durable key-value store over a local SQLite file
pub mod store;
