// List Record
// The canonical, serializable state of a list block.
// The live view is the source of truth while editing; a record is derived
// from it on demand (see `ListTool::save`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendering mode of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    Unordered,
}

impl Default for ListStyle {
    fn default() -> Self {
        ListStyle::Ordered
    }
}

impl ListStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListStyle::Ordered => "ordered",
            ListStyle::Unordered => "unordered",
        }
    }
}

impl fmt::Display for ListStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(ListStyle::Ordered),
            "unordered" => Ok(ListStyle::Unordered),
            other => Err(format!("unknown list style '{other}'")),
        }
    }
}

/// Persisted list block data.
///
/// Each item is an HTML fragment holding that item's inline content.
/// An empty `items` sequence is valid and renders as one empty item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub style: ListStyle,
    pub items: Vec<String>,
}

impl ListRecord {
    pub fn new(style: ListStyle, items: Vec<String>) -> Self {
        ListRecord { style, items }
    }

    pub fn empty(style: ListStyle) -> Self {
        Self::new(style, Vec::new())
    }

    /// Conversion export: items joined with ". ".
    /// Lossy, the style and item boundaries collapse into punctuation.
    pub fn export(&self) -> String {
        self.items.join(". ")
    }

    /// Conversion import: the whole string becomes the sole item of an unordered list
    pub fn import(text: &str) -> Self {
        Self::new(ListStyle::Unordered, vec![text.to_string()])
    }
}

/// Incoming data as handed over by the host (saved data, conversion result, paste).
/// Both fields may be missing; see [`ListData::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ListStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

impl ListData {
    /// Fill missing fields: style falls back to `default_style`, items to an empty list
    pub fn resolve(self, default_style: ListStyle) -> ListRecord {
        ListRecord {
            style: self.style.unwrap_or(default_style),
            items: self.items.unwrap_or_default(),
        }
    }
}

impl From<ListRecord> for ListData {
    fn from(record: ListRecord) -> Self {
        ListData {
            style: Some(record.style),
            items: Some(record.items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_joins_with_dot() {
        let record = ListRecord::new(ListStyle::Ordered, vec!["a".into(), "b".into()]);
        assert_eq!(record.export(), "a. b");
        assert_eq!(ListRecord::empty(ListStyle::Ordered).export(), "");
    }

    #[test]
    fn test_import_is_single_unordered_item() {
        let record = ListRecord::import("hello");
        assert_eq!(record.style, ListStyle::Unordered);
        assert_eq!(record.items, vec!["hello".to_string()]);
    }

    #[test]
    fn test_resolve_defaults() {
        let record = ListData::default().resolve(ListStyle::Ordered);
        assert_eq!(record, ListRecord::empty(ListStyle::Ordered));

        let data = ListData {
            style: Some(ListStyle::Unordered),
            items: None,
        };
        assert_eq!(data.resolve(ListStyle::Ordered).style, ListStyle::Unordered);
    }

    #[test]
    fn test_missing_style_in_json_is_defaulted() {
        let data: ListData = serde_json::from_str(r#"{"items":["x"]}"#).unwrap();
        let record = data.resolve(ListStyle::Unordered);
        assert_eq!(record.style, ListStyle::Unordered);
        assert_eq!(record.items, vec!["x".to_string()]);
    }

    #[test]
    fn test_record_json_layout() {
        let record = ListRecord::new(ListStyle::Unordered, vec!["one<br>two".into()]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"style":"unordered","items":["one<br>two"]}"#);
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("ordered".parse::<ListStyle>(), Ok(ListStyle::Ordered));
        assert!("numbered".parse::<ListStyle>().is_err());
    }
}
