// Host capabilities
// The editor runtime a list block lives in. The block only ever asks the host
// for these few things, injected at construction.

/// Style class tokens owned by the host editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTokens {
    pub block: String,
    pub settings_button: String,
    pub settings_button_active: String,
}

impl Default for StyleTokens {
    fn default() -> Self {
        StyleTokens {
            block: "cdx-block".to_string(),
            settings_button: "cdx-settings-button".to_string(),
            settings_button_active: "cdx-settings-button--active".to_string(),
        }
    }
}

/// Operations the list block needs from the host editor
pub trait BlockHost {
    /// Insert a new default block right after the current one and move the caret there
    fn insert_block_after_current(&mut self);

    fn styles(&self) -> &StyleTokens;
}

/// A host that records insertion requests instead of acting on them.
///
/// Used by the command-line front end and in tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub styles: StyleTokens,
    pub inserted_blocks: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockHost for RecordingHost {
    fn insert_block_after_current(&mut self) {
        self.inserted_blocks += 1;
    }

    fn styles(&self) -> &StyleTokens {
        &self.styles
    }
}
