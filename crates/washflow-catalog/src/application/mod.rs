//! Catalog and directory stores.

pub mod catalog;
pub mod directory;
pub mod seed;
