use crate::localization::{self, Language};
use tracker_common::settings::{BorderStyle, Theme};

/// Process-wide presentation state the controller mutates as a side effect:
/// the active locale, theme and border decoration.
///
/// The controller only talks to this trait so tests can substitute a fake
/// and assert on the applied values without a window or a real locale
/// switch.
pub trait PresentationContext {
    fn language(&self) -> Language;
    fn set_language(&mut self, lang: Language);
    fn theme(&self) -> Theme;
    /// Replaces the active theme outright; repeated calls never accumulate.
    fn set_theme(&mut self, theme: Theme);
    fn border(&self) -> BorderStyle;
    fn set_border(&mut self, border: BorderStyle);
}

/// The live surface: locale switches go to the fluent loader, theme and
/// border are read back by the page renderer every frame.
pub struct StageContext {
    theme: Theme,
    border: BorderStyle,
}

impl StageContext {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            border: BorderStyle::default(),
        }
    }
}

impl PresentationContext for StageContext {
    fn language(&self) -> Language {
        localization::current()
    }

    fn set_language(&mut self, lang: Language) {
        localization::select(lang);
    }

    fn theme(&self) -> Theme {
        self.theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn border(&self) -> BorderStyle {
        self.border
    }

    fn set_border(&mut self, border: BorderStyle) {
        self.border = border;
    }
}
