//! Web API module.

pub mod courses;
pub mod error;
pub mod rooms;
pub mod routes;
pub mod salary;
pub mod status;

pub use routes::*;
