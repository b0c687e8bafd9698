//! Route handlers organized by domain.

pub mod health;
pub mod notification;
pub mod ws;
