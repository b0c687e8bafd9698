//! # noticeboard-core
//!
//! Core crate for Noticeboard. Contains configuration schemas, typed
//! identifiers, UTC day-window arithmetic, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Noticeboard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
