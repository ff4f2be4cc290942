// List View
// The live editable surface of a list block, abstracted so the controller
// can run against a browser DOM, a native widget or the in-memory view below.

use std::cmp::min;
use unicode_segmentation::UnicodeSegmentation;

use crate::host::StyleTokens;
use crate::html;
use crate::record::ListStyle;

/// Class names applied to the view and the settings panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCss {
    pub base_block: String,
    pub wrapper: String,
    pub wrapper_ordered: String,
    pub wrapper_unordered: String,
    pub item: String,
    pub settings_wrapper: String,
    pub settings_button: String,
    pub settings_button_active: String,
}

impl ListCss {
    /// Combine the block's own class names with the host's style tokens
    pub fn new(tokens: &StyleTokens) -> Self {
        ListCss {
            base_block: tokens.block.clone(),
            wrapper: "cdx-list".to_string(),
            wrapper_ordered: "cdx-list--ordered".to_string(),
            wrapper_unordered: "cdx-list--unordered".to_string(),
            item: "cdx-list__item".to_string(),
            settings_wrapper: "cdx-list-settings".to_string(),
            settings_button: tokens.settings_button.clone(),
            settings_button_active: tokens.settings_button_active.clone(),
        }
    }

    /// Style marker class for the container
    pub fn style_marker(&self, style: ListStyle) -> &str {
        match style {
            ListStyle::Ordered => &self.wrapper_ordered,
            ListStyle::Unordered => &self.wrapper_unordered,
        }
    }
}

/// Where the caret is at the moment an event is dispatched.
///
/// Resolved by the host from its native selection: `item` is the index of
/// the list item element containing the caret, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaretContext {
    pub item: Option<usize>,
}

impl CaretContext {
    pub fn in_item(index: usize) -> Self {
        CaretContext { item: Some(index) }
    }

    pub fn outside() -> Self {
        CaretContext { item: None }
    }
}

/// The live view of a list block.
///
/// Items are addressed by their position among the container's direct item
/// elements, in document order.
pub trait ListView {
    /// Inner markup of every item, in document order
    fn list_item_contents(&self) -> Vec<String>;

    /// Replace the whole view: one editable item per entry (or a single empty
    /// item if `items` is empty) and the container marked with `style`
    fn rebuild(&mut self, items: &[String], style: ListStyle);

    /// Swap the container's style marker in place, leaving items untouched
    fn set_style(&mut self, style: ListStyle);

    /// Detach one item element
    fn remove_item(&mut self, index: usize);

    /// Constrain the native selection to the contents of one item
    fn select_item_contents(&mut self, index: usize);

    fn item_count(&self) -> usize {
        self.list_item_contents().len()
    }

    /// Inner markup of one item
    fn item_html(&self, index: usize) -> Option<String> {
        self.list_item_contents().into_iter().nth(index)
    }

    /// Text content of one item (markup stripped)
    fn item_text(&self, index: usize) -> Option<String> {
        self.item_html(index).map(|markup| html::text_content(&markup))
    }
}

/// A selection inside a single item, in grapheme offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSelection {
    pub item: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    pub html: String,
    pub editable: bool,
}

/// In-memory list view.
///
/// Keeps the same state a DOM rendering would (container classes, item
/// markup, selection) and can render itself as HTML.
#[derive(Debug, Clone)]
pub struct MemoryView {
    css: ListCss,
    classes: Vec<String>,
    editable: bool,
    items: Vec<ViewItem>,
    selection: Option<ItemSelection>,
}

impl MemoryView {
    pub fn new(css: ListCss) -> Self {
        MemoryView {
            css,
            classes: Vec::new(),
            editable: false,
            items: Vec::new(),
            selection: None,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn items(&self) -> &[ViewItem] {
        &self.items
    }

    pub fn selection(&self) -> Option<ItemSelection> {
        self.selection
    }

    /// Simulate native typing: overwrite an item's markup
    pub fn set_item_html(&mut self, index: usize, markup: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.html = markup.into();
        }
    }

    /// Simulate the native Enter behaviour: a new empty item after `index`
    pub fn insert_item_after(&mut self, index: usize) -> usize {
        let at = min(index + 1, self.items.len());
        self.items.insert(
            at,
            ViewItem {
                html: String::new(),
                editable: true,
            },
        );
        at
    }

    /// Render the container and its items as HTML
    pub fn to_html(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "<ul class=\"{}\" contenteditable=\"{}\">",
            self.classes.join(" "),
            self.editable
        ));
        for item in &self.items {
            output.push_str(&format!(
                "<li class=\"{}\" contenteditable=\"{}\">{}</li>",
                self.css.item, item.editable, item.html
            ));
        }
        output.push_str("</ul>");
        output
    }
}

impl ListView for MemoryView {
    fn list_item_contents(&self) -> Vec<String> {
        self.items.iter().map(|item| item.html.clone()).collect()
    }

    fn rebuild(&mut self, items: &[String], style: ListStyle) {
        self.classes = [
            self.css.base_block.as_str(),
            self.css.wrapper.as_str(),
            self.css.style_marker(style),
        ]
        .iter()
        .filter(|class| !class.is_empty())
        .map(|class| class.to_string())
        .collect();
        self.editable = true;
        self.selection = None;

        self.items = if items.is_empty() {
            vec![ViewItem {
                html: String::new(),
                editable: true,
            }]
        } else {
            items
                .iter()
                .map(|markup| ViewItem {
                    html: markup.clone(),
                    editable: true,
                })
                .collect()
        };
    }

    fn set_style(&mut self, style: ListStyle) {
        let ordered = self.css.wrapper_ordered.clone();
        let unordered = self.css.wrapper_unordered.clone();
        self.classes.retain(|c| *c != ordered && *c != unordered);
        self.classes.push(self.css.style_marker(style).to_string());
    }

    fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
            if self.selection.is_some_and(|sel| sel.item >= index) {
                self.selection = None;
            }
        }
    }

    fn select_item_contents(&mut self, index: usize) {
        self.selection = self.items.get(index).map(|item| ItemSelection {
            item: index,
            start: 0,
            end: html::text_content(&item.html).graphemes(true).count(),
        });
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_html(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| item.html.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn css() -> ListCss {
        ListCss::new(&StyleTokens::default())
    }

    #[test]
    fn test_rebuild_empty_materializes_one_item() {
        let mut view = MemoryView::new(css());
        view.rebuild(&[], ListStyle::Unordered);
        assert_eq!(view.item_count(), 1);
        assert_eq!(view.item_html(0).as_deref(), Some(""));
        assert!(view.is_editable());
        assert!(view.has_class("cdx-list--unordered"));
        assert_eq!(
            view.classes(),
            ["cdx-block", "cdx-list", "cdx-list--unordered"]
        );
        assert!(view.items().iter().all(|item| item.editable));
    }

    #[test]
    fn test_set_style_swaps_marker_only() {
        let mut view = MemoryView::new(css());
        view.rebuild(&["a".to_string()], ListStyle::Ordered);
        view.set_item_html(0, "typed");
        view.set_style(ListStyle::Unordered);

        assert!(view.has_class("cdx-list--unordered"));
        assert!(!view.has_class("cdx-list--ordered"));
        assert!(view.has_class("cdx-list"));
        assert_eq!(view.item_html(0).as_deref(), Some("typed"));
    }

    #[test]
    fn test_select_item_counts_graphemes() {
        let mut view = MemoryView::new(css());
        view.rebuild(&["a".to_string(), "<b>e\u{301}x</b>".to_string()], ListStyle::Ordered);
        view.select_item_contents(1);
        assert_eq!(
            view.selection(),
            Some(ItemSelection {
                item: 1,
                start: 0,
                end: 2
            })
        );

        view.select_item_contents(7);
        assert_eq!(view.selection(), None);
    }

    #[test]
    fn test_item_text_strips_markup() {
        let mut view = MemoryView::new(css());
        view.rebuild(&["<i>x</i>&amp;y".to_string()], ListStyle::Ordered);
        assert_eq!(view.item_text(0).as_deref(), Some("x&y"));
        assert_eq!(view.item_text(3), None);
    }
}
