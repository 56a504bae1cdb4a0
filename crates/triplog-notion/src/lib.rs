pub mod client;
pub mod error;
pub mod fields;
pub mod types;

pub use client::{NotionClient, DEFAULT_PAGE_SIZE};
pub use error::NotionError;
pub use types::{
    DateRange, Filter, Page, PropertyFilter, PropertyValue, QueryResponse, RichTextCondition,
};
