// Declarative tables the list block hands to the host editor.
// The host enforces them; nothing here runs during editing.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::html::PasteTag;
use crate::record::ListRecord;

/// Toolbox entry of the list block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolbox {
    pub title: &'static str,
}

pub const TOOLBOX: Toolbox = Toolbox { title: "List" };

/// Native Enter is allowed inside items, the host must not split the block on it
pub const ENABLE_LINE_BREAKS: bool = true;

/// Allowed inline markup per record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizePolicy {
    pub style: BTreeMap<&'static str, bool>,
    pub items: BTreeMap<&'static str, bool>,
}

pub fn sanitize_policy() -> SanitizePolicy {
    SanitizePolicy {
        style: BTreeMap::new(),
        items: BTreeMap::from([("br", true)]),
    }
}

/// Tags whose paste the host should route to this block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteConfig {
    pub tags: Vec<&'static str>,
}

pub fn paste_config() -> PasteConfig {
    PasteConfig {
        tags: PasteTag::ALL.iter().map(|tag| tag.tag_name()).collect(),
    }
}

/// Conversion bridge used when the host turns this block into another type or back
#[derive(Debug, Clone, Copy)]
pub struct ConversionConfig {
    pub export: fn(&ListRecord) -> String,
    pub import: fn(&str) -> ListRecord,
}

pub const CONVERSION: ConversionConfig = ConversionConfig {
    export: ListRecord::export,
    import: ListRecord::import,
};

/// Everything the host reads from the tool, bundled together
#[derive(Debug, Clone, Serialize)]
pub struct ToolPolicy {
    pub toolbox: Toolbox,
    pub enable_line_breaks: bool,
    pub sanitize: SanitizePolicy,
    pub paste: PasteConfig,
    #[serde(skip)]
    pub conversion: ConversionConfig,
}

pub fn tool_policy() -> ToolPolicy {
    ToolPolicy {
        toolbox: TOOLBOX,
        enable_line_breaks: ENABLE_LINE_BREAKS,
        sanitize: sanitize_policy(),
        paste: paste_config(),
        conversion: CONVERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_tags() {
        assert_eq!(paste_config().tags, vec!["OL", "UL", "LI"]);
    }

    #[test]
    fn test_sanitize_allows_only_line_breaks_in_items() {
        let policy = sanitize_policy();
        assert!(policy.style.is_empty());
        assert_eq!(policy.items.get("br"), Some(&true));
        assert_eq!(policy.items.len(), 1);
    }

    #[test]
    fn test_conversion_bridge() {
        let record = (CONVERSION.import)("hello");
        assert_eq!(record.items, vec!["hello".to_string()]);
        assert_eq!((CONVERSION.export)(&record), "hello");
    }
}
