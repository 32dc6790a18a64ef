// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use crate::ui::notifications::Notification;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
    fallback_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                tracing::warn!(filename, "skipping translation file with invalid locale name");
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(res) => res,
                Err((res, errors)) => {
                    tracing::warn!(filename, errors = errors.len(), "translation file has syntax errors");
                    res
                }
            };
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(filename, errors = errors.len(), "duplicate translation keys");
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }
        available_locales.sort_by_key(ToString::to_string);

        let fallback_locale: LanguageIdentifier = DEFAULT_LOCALE.parse().unwrap_or_default();
        let current_locale = resolve_locale(cli_lang, config, &available_locales)
            .unwrap_or_else(|| fallback_locale.clone());

        Self {
            bundles,
            available_locales,
            current_locale,
            fallback_locale,
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.tr_with_args(key, &[])
    }

    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let fluent_args = (!args.is_empty()).then(|| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(name.to_string(), value.to_string());
            }
            fluent_args
        });

        [&self.current_locale, &self.fallback_locale]
            .into_iter()
            .find_map(|locale| self.format(locale, key, fluent_args.as_ref()))
            .unwrap_or_else(|| format!("MISSING: {key}"))
    }

    /// Resolves a toast's text in the current locale.
    pub fn notification_text(&self, notification: &Notification) -> String {
        let args: Vec<(&str, &str)> = notification
            .message_args()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.tr_with_args(notification.message_key(), &args)
    }

    fn format(
        &self,
        locale: &LanguageIdentifier,
        key: &str,
        args: Option<&FluentArgs<'_>>,
    ) -> Option<String> {
        let bundle = self.bundles.get(locale)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        errors.is_empty().then(|| value.to_string())
    }
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let os_locale = sys_locale::get_locale();
    let found = [cli_lang.as_deref(), config.general.language.as_deref(), os_locale.as_deref()]
        .into_iter()
        .flatten()
        .find_map(|candidate| match_available(candidate, available));
    found
}

/// Exact match first, then the first available locale with the same language.
fn match_available(candidate: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = candidate.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    available
        .iter()
        .find(|l| l.language == lang.language)
        .cloned()
}
