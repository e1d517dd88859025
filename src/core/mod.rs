//! Core library components.
//!
//! Records, the search index, the record store, and recipient rotation,
//! plus the encryption and configuration pieces they sit on.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod fs;
pub mod identity;
pub mod index;
pub mod recipients;
pub mod record;
pub mod rotation;
pub mod store;
pub mod types;
