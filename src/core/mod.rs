//! Core types shared across the build pipeline.

mod category;
mod error;

pub use category::{Category, CategoryRegistry, Link};
pub use error::BuildError;
