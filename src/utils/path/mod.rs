//! Path and URL utilities.
//!
//! - [`fs`]: Filesystem helpers (`normalize_path`, `copy_path`)
//! - [`route`]: URL fragment handling (`split_path_fragment`, `fragment_id`)
//! - [`slug`]: URL slugification (`slugify_path`, `slugify_fragment`)

pub mod fs;
pub mod route;
pub mod slug;

pub use fs::{copy_path, normalize_path};
