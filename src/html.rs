// Inline markup helpers
// Item contents are stored as HTML fragments. Only the small amount of
// structure the list block cares about is recognized here: line breaks,
// list containers and list items. Everything else passes through verbatim.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::error::{ListError, Result};
use crate::record::{ListRecord, ListStyle};

// Attribute values may be quoted and contain '>'
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9-]*)(?:[\s/](?:"[^"]*"|'[^']*'|[^'">])*)?>"#).unwrap()
});

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z]+);").unwrap());

/// Replace the first line break of an item's markup with a space.
///
/// An item whose only content is a `<br>` (what an editable surface leaves
/// behind after the text is deleted) must count as empty.
pub fn collapse_line_break(html: &str) -> Cow<'_, str> {
    LINE_BREAK_RE.replace(html, " ")
}

/// True if the markup is empty once a lone line break is collapsed and whitespace trimmed
pub fn is_blank_markup(html: &str) -> bool {
    collapse_line_break(html).trim().is_empty()
}

/// Text content of a fragment: tags removed, common entities decoded
pub fn text_content(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");
    ENTITY_RE
        .replace_all(&stripped, |caps: &Captures| decode_entity(&caps[1], &caps[0]))
        .into_owned()
}

fn decode_entity(name: &str, raw: &str) -> String {
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                None
            }
        }
    };
    decoded.map(String::from).unwrap_or_else(|| raw.to_string())
}

fn is_list_tag(name: &str) -> bool {
    name.eq_ignore_ascii_case("ul") || name.eq_ignore_ascii_case("ol")
}

enum Open {
    List,
    Item { slot: usize, start: usize },
}

fn close_top_item(html: &str, stack: &mut Vec<Open>, items: &mut [String], end: usize) -> bool {
    if let Some(&Open::Item { slot, start }) = stack.last() {
        items[slot] = html[start..end].to_string();
        stack.pop();
        true
    } else {
        false
    }
}

/// Inner markup of every list item in the fragment, in document order.
///
/// Nested items are included (each item's markup contains its nested list too).
/// Unclosed items end where their parent list ends, at the next sibling item,
/// or at the end of the fragment.
pub fn list_item_markup(html: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    let mut stack: Vec<Open> = Vec::new();

    for caps in TAG_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        let closing = !caps[1].is_empty();
        let name = &caps[2];

        if name.eq_ignore_ascii_case("li") {
            if closing {
                close_top_item(html, &mut stack, &mut items, whole.start());
            } else {
                // A new item implicitly ends an open sibling
                close_top_item(html, &mut stack, &mut items, whole.start());
                stack.push(Open::Item {
                    slot: items.len(),
                    start: whole.end(),
                });
                items.push(String::new());
            }
        } else if is_list_tag(name) {
            if closing {
                while close_top_item(html, &mut stack, &mut items, whole.start()) {}
                if matches!(stack.last(), Some(Open::List)) {
                    stack.pop();
                }
            } else {
                stack.push(Open::List);
            }
        }
    }

    while let Some(open) = stack.pop() {
        if let Open::Item { slot, start } = open {
            items[slot] = html[start..].to_string();
        }
    }

    items
}

/// Tags the list block accepts from the host's paste pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteTag {
    OrderedList,
    UnorderedList,
    ListItem,
}

impl PasteTag {
    pub const ALL: [PasteTag; 3] = [
        PasteTag::OrderedList,
        PasteTag::UnorderedList,
        PasteTag::ListItem,
    ];

    pub fn from_tag_name(name: &str) -> Result<Self> {
        match name.to_ascii_uppercase().as_str() {
            "OL" => Ok(PasteTag::OrderedList),
            "UL" => Ok(PasteTag::UnorderedList),
            "LI" => Ok(PasteTag::ListItem),
            _ => Err(ListError::UnsupportedPasteTag(name.to_ascii_lowercase())),
        }
    }

    pub fn tag_name(&self) -> &'static str {
        match self {
            PasteTag::OrderedList => "OL",
            PasteTag::UnorderedList => "UL",
            PasteTag::ListItem => "LI",
        }
    }

    /// Style a pasted element of this kind produces. Bare items become unordered lists.
    pub fn style(&self) -> ListStyle {
        match self {
            PasteTag::OrderedList => ListStyle::Ordered,
            PasteTag::UnorderedList | PasteTag::ListItem => ListStyle::Unordered,
        }
    }
}

/// An element handed over by the host's paste pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastedElement {
    pub tag: PasteTag,
    pub inner_html: String,
}

impl PastedElement {
    pub fn new(tag: PasteTag, inner_html: impl Into<String>) -> Self {
        PastedElement {
            tag,
            inner_html: inner_html.into(),
        }
    }

    /// Parse the outermost element of a markup string, e.g. `<ol><li>a</li></ol>`
    pub fn parse(markup: &str) -> Result<Self> {
        let open = TAG_RE
            .captures_iter(markup)
            .find(|caps| caps[1].is_empty())
            .ok_or(ListError::MalformedPaste)?;
        let Some(whole) = open.get(0) else {
            return Err(ListError::MalformedPaste);
        };
        if !markup[..whole.start()].trim().is_empty() {
            return Err(ListError::MalformedPaste);
        }

        let name = &open[2];
        let tag = PasteTag::from_tag_name(name)?;
        let body = &markup[whole.end()..];

        let mut depth = 0usize;
        let mut end = body.len();
        for caps in TAG_RE.captures_iter(body) {
            if !caps[2].eq_ignore_ascii_case(name) {
                continue;
            }
            if caps[1].is_empty() {
                depth += 1;
            } else if depth == 0 {
                end = caps.get(0).map_or(body.len(), |m| m.start());
                break;
            } else {
                depth -= 1;
            }
        }

        Ok(PastedElement::new(tag, &body[..end]))
    }

    /// Normalize into list data.
    ///
    /// A bare item is taken verbatim as the only item. A list contributes the
    /// inner markup of each contained item, skipping items that are blank
    /// after trimming.
    pub fn to_record(&self) -> ListRecord {
        let items = match self.tag {
            PasteTag::ListItem => vec![self.inner_html.clone()],
            PasteTag::OrderedList | PasteTag::UnorderedList => list_item_markup(&self.inner_html)
                .into_iter()
                .filter(|item| !item.trim().is_empty())
                .collect(),
        };
        ListRecord::new(self.tag.style(), items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_only_first_line_break() {
        assert_eq!(collapse_line_break("<br>"), " ");
        assert_eq!(collapse_line_break("a<br>b<br>"), "a b<br>");
        assert_eq!(collapse_line_break("a<BR/>"), "a ");
        assert_eq!(collapse_line_break("plain"), "plain");
    }

    #[test]
    fn test_blank_markup() {
        assert!(is_blank_markup(""));
        assert!(is_blank_markup("  <br> "));
        assert!(!is_blank_markup("<br><br>"));
        assert!(!is_blank_markup("x"));
        assert!(!is_blank_markup("<b></b>"));
    }

    #[test]
    fn test_text_content() {
        assert_eq!(text_content("<b>bold</b> &amp; <i>it</i>"), "bold & it");
        assert_eq!(text_content("<br>"), "");
        assert_eq!(text_content("&nbsp;").trim(), "");
        assert_eq!(text_content("&#65;&#x42;"), "AB");
        assert_eq!(text_content("&unknown;"), "&unknown;");
    }

    #[test]
    fn test_list_item_markup_nested_and_implied() {
        let items = list_item_markup("<li>a<ul><li>b</li></ul></li><li>c");
        assert_eq!(items, vec!["a<ul><li>b</li></ul>", "b", "c"]);

        let items = list_item_markup("<li>one<li>two</li>");
        assert_eq!(items, vec!["one", "two"]);

        let items = list_item_markup(r#"<li class="x"><b>bold</b></li>"#);
        assert_eq!(items, vec!["<b>bold</b>"]);
    }

    #[test]
    fn test_quoted_attribute_with_angle_bracket() {
        assert_eq!(list_item_markup(r#"<li title="a>b">x</li>"#), vec!["x"]);
        assert_eq!(list_item_markup("<li data-x='1>0'>y</li>"), vec!["y"]);
        assert_eq!(text_content(r#"<span title="a>b">z</span>"#), "z");

        let el = PastedElement::parse(r#"<ol><li title="a>b">x</li></ol>"#).unwrap();
        assert_eq!(el.to_record().items, vec!["x"]);
    }

    #[test]
    fn test_parse_pasted_element() {
        let el = PastedElement::parse("  <OL start=\"2\"><li>a</li></OL>").unwrap();
        assert_eq!(el.tag, PasteTag::OrderedList);
        assert_eq!(el.inner_html, "<li>a</li>");

        let el = PastedElement::parse("<ul><li>x<ul><li>y</li></ul></li></ul>").unwrap();
        assert_eq!(el.inner_html, "<li>x<ul><li>y</li></ul></li>");
    }

    #[test]
    fn test_parse_rejects_other_tags() {
        assert!(matches!(
            PastedElement::parse("<p>hello</p>"),
            Err(ListError::UnsupportedPasteTag(tag)) if tag == "p"
        ));
        assert!(matches!(
            PastedElement::parse("text <ul></ul>"),
            Err(ListError::MalformedPaste)
        ));
        assert!(matches!(PastedElement::parse(""), Err(ListError::MalformedPaste)));
    }

    #[test]
    fn test_ordered_paste_drops_empty_items() {
        let el = PastedElement::new(PasteTag::OrderedList, "<li>a</li><li></li><li>b</li>");
        let record = el.to_record();
        assert_eq!(record.style, ListStyle::Ordered);
        assert_eq!(record.items, vec!["a", "b"]);
    }

    #[test]
    fn test_item_paste_is_verbatim() {
        let el = PastedElement::new(PasteTag::ListItem, " ");
        let record = el.to_record();
        assert_eq!(record.style, ListStyle::Unordered);
        assert_eq!(record.items, vec![" "]);
    }
}
