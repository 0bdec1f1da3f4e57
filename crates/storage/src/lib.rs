#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
mod store;

pub use local_storage::LocalStorage;
pub use store::{FileStore, Key, KeyValueStore, MemoryStore, StoreError};
