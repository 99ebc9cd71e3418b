// src/extract/mod.rs
// =============================================================================
// This module contains everything that looks inside a fetched page.
//
// Submodules:
// - page: Parses HTML into text + anchor hrefs
// - email: Finds email addresses in text and mailto: links
// - links: Resolves hrefs and decides which ones are worth following
// =============================================================================

mod email;
mod links;
mod page;

pub use email::{extract_from_mailto, extract_from_text, is_mailto};
pub use links::resolve;
pub use page::Page;
