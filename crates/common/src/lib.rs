//! Common types shared by the custom select crates.

pub mod error;

pub use error::{SelectError, SelectResult};
