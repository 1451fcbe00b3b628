//! Notion API request and response types
//!
//! Only the subset of the page-creation schema the relay writes is modelled.
//! Property values serialize into the externally tagged shape Notion expects,
//! e.g. `PropertyValue::Number(Some(1.5))` becomes `{"number": 1.5}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property name -> value, as sent in `properties`
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// One database property value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Date(Option<DateValue>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Number(Option<f64>),
    Url(String),
}

impl PropertyValue {
    pub fn title(content: impl Into<String>) -> Self {
        PropertyValue::Title(vec![RichText::plain(content)])
    }

    pub fn rich_text(content: impl Into<String>) -> Self {
        PropertyValue::RichText(vec![RichText::plain(content)])
    }

    pub fn select(name: Option<String>) -> Self {
        PropertyValue::Select(name.map(|name| SelectOption { name }))
    }

    pub fn multi_select<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        PropertyValue::MultiSelect(names.into_iter().map(|name| SelectOption { name }).collect())
    }

    pub fn date(start: Option<String>) -> Self {
        PropertyValue::Date(start.map(|start| DateValue { start }))
    }
}

/// Rich text segment (`{"text": {"content": ...}}`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichText {
    pub text: TextContent,
}

impl RichText {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateValue {
    pub start: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub name: String,
}

/// Body of `POST /v1/pages`
#[derive(Debug, Clone, Serialize)]
pub struct CreatePageRequest<'a> {
    pub parent: Parent<'a>,
    pub properties: &'a PropertyMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct Parent<'a> {
    pub database_id: &'a str,
}

/// The part of a created page the relay reads back
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPage {
    pub id: Option<String>,
}
