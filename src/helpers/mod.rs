//! Helper functions shared by the loader and the generators

mod date;
mod url;

pub use date::*;
pub use url::*;
