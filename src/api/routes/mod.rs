//! API Routes
//!
//! Route handlers organized by view.

pub mod export;
pub mod health;
pub mod items;
pub mod summary;
