//! Repository implementations for the cache store.

pub mod kv;
pub mod menu;
