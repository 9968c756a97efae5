//! Domain models for the UMKM directory

mod contact;
mod listing;

pub use listing::*;
