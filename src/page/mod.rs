//! Index page processing: category extraction, category pages and link
//! rewriting.

mod extract;
mod links;
mod render;

pub use extract::extract_categories;
pub use links::rewrite_index_links;
pub use render::render_category_pages;
