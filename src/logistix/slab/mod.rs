pub mod config;
pub mod constraints;
pub mod error;
pub mod extract;
pub mod io;
pub mod model;
pub mod pricing;
pub mod reconcile;
pub mod scan;
pub mod sync;
pub mod text;

pub use error::{Result, ToolError};
