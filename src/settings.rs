// Settings panel
// One control per style option; exactly one control carries the active class.

use crate::record::ListStyle;
use crate::view::ListCss;

/// A style the user can switch the list to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOption {
    pub style: ListStyle,
    pub title: &'static str,
    pub default: bool,
}

impl StyleOption {
    pub fn new(style: ListStyle, default_style: ListStyle) -> Self {
        let title = match style {
            ListStyle::Ordered => "Ordered",
            ListStyle::Unordered => "Unordered",
        };
        StyleOption {
            style,
            title,
            default: style == default_style,
        }
    }
}

/// Both styles, unordered first, so every record style has a control
pub fn style_options(default_style: ListStyle) -> [StyleOption; 2] {
    [
        StyleOption::new(ListStyle::Unordered, default_style),
        StyleOption::new(ListStyle::Ordered, default_style),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsControl {
    pub style: ListStyle,
    pub title: &'static str,
    pub classes: Vec<String>,
}

impl SettingsControl {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// The rendered settings panel of a list block
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    pub classes: Vec<String>,
    controls: Vec<SettingsControl>,
    active_class: String,
}

impl SettingsPanel {
    /// Render one control per option, marking the one matching `current` as active
    pub fn build(options: &[StyleOption], current: ListStyle, css: &ListCss) -> Self {
        let controls = options
            .iter()
            .map(|option| {
                let mut classes = vec![css.settings_button.clone()];
                if option.style == current {
                    classes.push(css.settings_button_active.clone());
                }
                SettingsControl {
                    style: option.style,
                    title: option.title,
                    classes,
                }
            })
            .collect();

        SettingsPanel {
            classes: vec![css.settings_wrapper.clone()],
            controls,
            active_class: css.settings_button_active.clone(),
        }
    }

    pub fn controls(&self) -> &[SettingsControl] {
        &self.controls
    }

    pub fn control(&self, index: usize) -> Option<&SettingsControl> {
        self.controls.get(index)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.controls
            .get(index)
            .is_some_and(|control| control.has_class(&self.active_class))
    }

    /// Style of the active control, if any
    pub fn active_style(&self) -> Option<ListStyle> {
        self.controls
            .iter()
            .find(|control| control.has_class(&self.active_class))
            .map(|control| control.style)
    }

    /// Clear the active class from every control, then set it on `index`
    pub fn mark_active(&mut self, index: usize) {
        if index >= self.controls.len() {
            return;
        }
        let active = self.active_class.clone();
        for control in &mut self.controls {
            control.classes.retain(|c| *c != active);
        }
        self.controls[index].classes.push(active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StyleTokens;

    fn options() -> [StyleOption; 2] {
        style_options(ListStyle::Ordered)
    }

    #[test]
    fn test_options_titles_and_default() {
        let options = options();
        assert_eq!(options[0].title, "Unordered");
        assert!(!options[0].default);
        assert_eq!(options[1].title, "Ordered");
        assert!(options[1].default);
    }

    #[test]
    fn test_both_styles_offered_for_either_default() {
        for default_style in [ListStyle::Ordered, ListStyle::Unordered] {
            let styles: Vec<ListStyle> =
                style_options(default_style).iter().map(|o| o.style).collect();
            assert_eq!(styles, vec![ListStyle::Unordered, ListStyle::Ordered]);
        }
    }

    #[test]
    fn test_build_marks_current_style() {
        let css = ListCss::new(&StyleTokens::default());
        let panel = SettingsPanel::build(&options(), ListStyle::Unordered, &css);
        assert!(panel.is_active(0));
        assert!(!panel.is_active(1));
        assert_eq!(panel.active_style(), Some(ListStyle::Unordered));
        assert_eq!(panel.classes, vec!["cdx-list-settings".to_string()]);
    }

    #[test]
    fn test_mark_active_is_exclusive() {
        let css = ListCss::new(&StyleTokens::default());
        let mut panel = SettingsPanel::build(&options(), ListStyle::Unordered, &css);
        panel.mark_active(1);
        panel.mark_active(1);
        assert!(!panel.is_active(0));
        assert!(panel.is_active(1));
        assert_eq!(
            panel.control(1).map(|c| c.classes.len()),
            Some(2),
            "active class must not be duplicated"
        );

        panel.mark_active(5);
        assert_eq!(panel.active_style(), Some(ListStyle::Ordered));
    }
}
