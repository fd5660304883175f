//! Configuration section definitions.
//!
//! Each module corresponds to a section in `site.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `build` | `[build]`    | Source, output, templates, assets        |
//! | `site`  | `[site]`     | Site metadata shared by every template   |

pub mod build;
mod site;

pub use build::{BuildSectionConfig, IndexConfig};
pub use site::SiteInfoConfig;
