//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod footer;
pub mod header;
pub mod logs;
pub mod summary;
pub mod table;
pub mod toast;
