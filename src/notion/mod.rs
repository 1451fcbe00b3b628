//! Notion API adapter

mod client;
pub mod types;

pub use client::{NotionClient, NOTION_VERSION};
pub use types::{PropertyMap, PropertyValue};
