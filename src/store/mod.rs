pub mod connection;
pub mod kv;
#[cfg(test)]
pub(crate) mod test_utils;

pub use connection::{StorePool, init_store};
pub use kv::Store;
