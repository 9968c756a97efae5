//! Shared types and the listing store for the UMKM Directory
//!
//! This crate contains the record model, submission validation, moderation
//! lifecycle and query views shared by the browser bridge (via WASM) and the
//! console front end.

pub mod error;
pub mod format;
pub mod models;
pub mod store;
pub mod types;
pub mod validation;

pub use error::*;
pub use format::*;
pub use models::*;
pub use store::*;
pub use types::*;
pub use validation::*;
