// List Tool
// Binds a ListRecord to a live ListView and implements the keyboard, paste and
// settings handling of a list block.
//
// The view is the source of truth while the user types. The record is only
// brought in sync at explicit points: `save` derives it from the view,
// `set_data` projects it into the view.

use tracing::{debug, trace};

use crate::config::ToolConfig;
use crate::error::Result;
use crate::host::BlockHost;
use crate::html::{self, PastedElement};
use crate::record::{ListData, ListRecord, ListStyle};
use crate::settings::{SettingsPanel, StyleOption, style_options};
use crate::view::{CaretContext, ListCss, ListView};

/// Keys the list block reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    /// Ctrl/Cmd+A
    SelectAll,
    Other,
}

/// What the host should do with the native behaviour of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Prevent the default action and stop propagation
    Suppress,
    /// Let the native behaviour run
    Continue,
}

pub struct ListTool<V: ListView, H: BlockHost> {
    config: ToolConfig,
    options: [StyleOption; 2],
    css: ListCss,
    host: H,
    record: ListRecord,
    view: Option<V>,
    settings: Option<SettingsPanel>,
}

impl<V: ListView, H: BlockHost> ListTool<V, H> {
    /// Create a tool seeded from saved or converted data (or defaults if `None`)
    pub fn new(data: Option<ListData>, config: ToolConfig, host: H) -> Self {
        let css = ListCss::new(host.styles());
        let options = style_options(config.default_style);
        let record = data.unwrap_or_default().resolve(config.default_style);

        ListTool {
            config,
            options,
            css,
            host,
            record,
            view: None,
            settings: None,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn css(&self) -> &ListCss {
        &self.css
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    /// Mutable access to the live view, as native typing would have
    pub fn view_mut(&mut self) -> Option<&mut V> {
        self.view.as_mut()
    }

    pub fn style(&self) -> ListStyle {
        self.record.style
    }

    pub fn style_options(&self) -> &[StyleOption] {
        &self.options
    }

    /// Project the current record into `view` and make it the live view
    pub fn render(&mut self, mut view: V) -> &mut V {
        view.rebuild(&self.record.items, self.record.style);
        self.view.insert(view)
    }

    /// Current data, freshly derived from the view
    pub fn save(&mut self) -> ListRecord {
        self.sync_from_view();
        self.record.clone()
    }

    /// Re-derive the record's items from the live view.
    ///
    /// Items that are blank once a lone line break is collapsed are left out
    /// of the record, but stay in the view.
    fn sync_from_view(&mut self) {
        let contents = match &self.view {
            Some(view) => view.list_item_contents(),
            None => std::mem::take(&mut self.record.items),
        };
        let total = contents.len();

        self.record.items = contents
            .into_iter()
            .filter(|markup| !html::is_blank_markup(markup))
            .collect();

        trace!(
            total,
            kept = self.record.items.len(),
            "derived list items from view"
        );
    }

    /// Replace the block's data. Missing fields fall back to defaults; a live
    /// view is rebuilt wholesale.
    pub fn set_data(&mut self, data: ListData) {
        self.record = data.resolve(self.config.default_style);

        if let Some(view) = self.view.as_mut() {
            view.rebuild(&self.record.items, self.record.style);
        }
        if self.settings.is_some() {
            self.settings = Some(SettingsPanel::build(
                &self.options,
                self.record.style,
                &self.css,
            ));
        }

        debug!(
            style = %self.record.style,
            items = self.record.items.len(),
            "list data replaced"
        );
    }

    /// Switch between ordered and unordered without rebuilding the view,
    /// so the caret and typed content survive.
    pub fn toggle_style(&mut self, style: ListStyle) {
        if let Some(view) = self.view.as_mut() {
            view.set_style(style);
        }
        self.record.style = style;
    }

    /// Keydown handler of the view container
    pub fn handle_key(&mut self, key: Key, caret: CaretContext) -> KeyOutcome {
        match key {
            Key::Enter => self.exit_list(caret),
            Key::Backspace => self.backspace(),
            Key::SelectAll => self.select_item(caret),
            Key::Other => KeyOutcome::Continue,
        }
    }

    /// Enter on an empty last item leaves the list: the item is removed and
    /// the host inserts a new block after this one.
    ///
    /// Lists with fewer than two items are never shortened here.
    fn exit_list(&mut self, caret: CaretContext) -> KeyOutcome {
        let Some(view) = self.view.as_mut() else {
            return KeyOutcome::Continue;
        };

        let count = view.item_count();
        if count < 2 {
            return KeyOutcome::Continue;
        }

        let last = count - 1;
        if caret.item != Some(last) {
            return KeyOutcome::Continue;
        }

        let last_is_empty = view
            .item_text(last)
            .is_some_and(|text| text.trim().is_empty());
        if !last_is_empty {
            return KeyOutcome::Continue;
        }

        view.remove_item(last);
        self.host.insert_block_after_current();
        debug!(removed = last, "enter on empty last item, leaving list");
        KeyOutcome::Suppress
    }

    /// Backspace in a single empty item is swallowed, so the host does not
    /// delete the block out from under the caret.
    fn backspace(&mut self) -> KeyOutcome {
        let Some(view) = self.view.as_ref() else {
            return KeyOutcome::Continue;
        };
        let Some(first) = view.item_html(0) else {
            return KeyOutcome::Continue;
        };

        if view.item_count() < 2 && html::is_blank_markup(&first) {
            debug!("backspace in the only empty item suppressed");
            return KeyOutcome::Suppress;
        }
        KeyOutcome::Continue
    }

    /// Select the contents of the caret's item instead of the whole block
    pub fn select_item(&mut self, caret: CaretContext) -> KeyOutcome {
        let Some(view) = self.view.as_mut() else {
            return KeyOutcome::Continue;
        };
        match caret.item {
            Some(index) if index < view.item_count() => {
                view.select_item_contents(index);
                KeyOutcome::Suppress
            }
            _ => KeyOutcome::Continue,
        }
    }

    /// Paste handler: the normalized element replaces all current data
    pub fn on_paste(&mut self, element: &PastedElement) {
        let record = element.to_record();
        debug!(
            tag = element.tag.tag_name(),
            items = record.items.len(),
            "list markup pasted"
        );
        self.set_data(record.into());
    }

    /// Parse pasted markup and hand it to [`ListTool::on_paste`].
    /// Unsupported markup leaves the block untouched.
    pub fn paste_markup(&mut self, markup: &str) -> Result<()> {
        let element = PastedElement::parse(markup)?;
        self.on_paste(&element);
        Ok(())
    }

    /// Build the settings panel, marking the control of the current style
    pub fn render_settings(&mut self) -> &SettingsPanel {
        let panel = SettingsPanel::build(&self.options, self.record.style, &self.css);
        self.settings.insert(panel)
    }

    pub fn settings(&self) -> Option<&SettingsPanel> {
        self.settings.as_ref()
    }

    /// Click on a settings control: switch style and move the active mark
    pub fn click_setting(&mut self, index: usize) {
        let Some(style) = self
            .settings
            .as_ref()
            .and_then(|panel| panel.control(index))
            .map(|control| control.style)
        else {
            return;
        };

        self.toggle_style(style);
        if let Some(panel) = self.settings.as_mut() {
            panel.mark_active(index);
        }
    }
}
