//! UMKM Directory - console front end
//!
//! A line-oriented presentation layer over the in-memory listing store:
//! public search, detail pages and the admin moderation panel.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use crate::config::Config;
pub use crate::error::{AppError, AppResult};
pub use crate::session::{Session, SessionSettings};
