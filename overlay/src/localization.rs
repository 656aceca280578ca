use i18n_embed::{
    LanguageLoader,
    fluent::{FluentLanguageLoader, fluent_language_loader},
};
use log::error;
use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Localizations;

static LANGUAGE_LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let loader = fluent_language_loader!();
    loader
        .load_fallback_language(&Localizations)
        .expect("Failed to load the fallback language");
    loader
});

pub fn language_loader() -> &'static FluentLanguageLoader {
    &LANGUAGE_LOADER
}

/// Looks up a localized string by message id, optionally with arguments.
macro_rules! fl {
    ($message_id:literal) => {{
        i18n_embed_fl::fl!($crate::localization::language_loader(), $message_id)
    }};
    ($message_id:literal, $($args:tt)*) => {{
        i18n_embed_fl::fl!($crate::localization::language_loader(), $message_id, $($args)*)
    }};
}
pub(crate) use fl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    French,
    Spanish,
}

impl Language {
    pub fn as_lang_id(&self) -> LanguageIdentifier {
        match self {
            Self::English => LanguageIdentifier::from_bytes(b"en").unwrap(),
            Self::French => LanguageIdentifier::from_bytes(b"fr").unwrap(),
            Self::Spanish => LanguageIdentifier::from_bytes(b"es").unwrap(),
        }
    }

    pub fn from_lang_id(lang_id: &LanguageIdentifier) -> Self {
        if lang_id.matches(&"en".parse::<LanguageIdentifier>().unwrap(), false, true) {
            Self::English
        } else if lang_id.matches(&"fr".parse::<LanguageIdentifier>().unwrap(), false, true) {
            Self::French
        } else if lang_id.matches(&"es".parse::<LanguageIdentifier>().unwrap(), false, true) {
            Self::Spanish
        } else {
            error!("Unsupported language: {}", lang_id);
            Self::English // Default to English if unsupported
        }
    }

    /// Parses the settings service's language code ("en", "fr-CA", ...).
    pub fn from_code(code: &str) -> Self {
        match code.parse::<LanguageIdentifier>() {
            Ok(lang_id) => Self::from_lang_id(&lang_id),
            Err(_) => {
                error!("Unparseable language code: {code}");
                Self::English
            }
        }
    }
}

/// Switches every subsequent string lookup to `lang`.
pub fn select(lang: Language) {
    if let Err(e) = i18n_embed::select(&*LANGUAGE_LOADER, &Localizations, &[lang.as_lang_id()]) {
        error!("Failed to switch language to {lang:?}: {e}");
    }
}

pub fn current() -> Language {
    Language::from_lang_id(&LANGUAGE_LOADER.current_language())
}
