//! Utility modules.
//!
//! - [`html`]: read-only HTML tree with parent links and source spans
//! - [`path`]: slugs, URL fragments and filesystem helpers

pub mod html;
pub mod path;
