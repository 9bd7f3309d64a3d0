//! # doable-core: data and service layer for the doable todo app
//!
//! Entity model, SQLite-backed persistence access (connection pool plus a
//! scoped unit-of-work), and the todo service every frontend goes through.

pub mod database;
pub mod error;
pub mod model;
pub mod service;
pub mod transaction;

pub use database::*;
pub use error::*;
pub use model::*;
pub use service::*;
pub use transaction::*;
