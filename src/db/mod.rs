pub mod connection;
pub mod entities;
pub mod kv;
pub mod list_repo;

pub use kv::{KeyValueStore, MemoryKv, SeaKv};
