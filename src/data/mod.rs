//! Core engines over course data: storage, filtering, search, enrichment,
//! room derivation, and the salary table.

pub mod catalog;
pub mod enrich;
pub mod filters;
pub mod fuzzy;
pub mod names;
pub mod rooms;
pub mod salary;
pub mod search;
pub mod store;
