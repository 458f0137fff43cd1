//! Content module - loading, indexing and resolving documents

pub mod category;
mod document;
mod frontmatter;
pub mod index;
pub mod loader;
pub mod markdown;
pub mod resolver;
pub mod store;

pub use document::{Category, CategoryDescriptor, Document, UNCATEGORIZED};
pub use frontmatter::{FrontMatter, Seo};
pub use index::{CategoryTree, ContentIndex, IndexBuilder, IndexOptions};
pub use loader::DocumentLoader;
pub use resolver::{LocaleScope, Resolver, SlugEntry};
