// src/application/locale.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::content::Locale;

/// The locales content may be written in, plus the one used when a request
/// names none.
#[derive(Debug, Clone)]
pub struct LocaleSettings {
    default: Locale,
    supported: Vec<Locale>,
}

impl LocaleSettings {
    /// The default locale is always supported, even when not listed.
    pub fn new(default: Locale, supported: Vec<Locale>) -> Self {
        let mut supported = supported;
        if !supported.contains(&default) {
            supported.insert(0, default.clone());
        }
        Self { default, supported }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    pub fn resolve(&self, requested: Option<&str>) -> ApplicationResult<Locale> {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(self.default.clone()),
            Some(raw) => {
                let locale = Locale::new(raw)?;
                if self.supported.contains(&locale) {
                    Ok(locale)
                } else {
                    Err(ApplicationError::validation(format!(
                        "unsupported locale '{locale}'"
                    )))
                }
            }
        }
    }
}
