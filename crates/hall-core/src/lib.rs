pub mod auth;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod rotation;
pub mod schedule;
pub mod slot;
pub mod store;

pub use error::{HallError, Result};
