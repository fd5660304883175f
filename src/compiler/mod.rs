//! Markdown conversion and template rendering.

pub mod markdown;
pub mod template;
