//! URL handling module for Shelf-Scraper
//!
//! Relative links found in catalog markup (`../../page-2.html`,
//! `catalogue/category/books_1/index.html`) are turned into absolute URLs
//! here, and cover image URLs are mapped to local file names.

mod file_name;
mod resolve;

pub use file_name::image_file_name;
pub use resolve::{parse_base, resolve};
