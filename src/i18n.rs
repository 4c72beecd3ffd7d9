use std::collections::HashMap;

/// Languages with a built-in dictionary
pub const SUPPORTED: [&str; 2] = ["de", "en"];

/// Language used when nothing else matches
pub const DEFAULT_LANG: &str = "de";

fn dictionary_source(lang: &str) -> &'static str {
    match lang {
        "en" => include_str!("../lang/en.json"),
        _ => include_str!("../lang/de.json"),
    }
}

/// Pick the UI language: a stored choice, else the environment's locale, else German.
/// `env_locale` looks like `en_US.UTF-8` or `de-DE`.
pub fn resolve_language(stored: Option<&str>, env_locale: Option<&str>) -> &'static str {
    let supported = |code: &str| SUPPORTED.iter().copied().find(|s| *s == code);

    if let Some(lang) = stored.and_then(supported) {
        return lang;
    }
    env_locale
        .and_then(|locale| locale.split(|c: char| c == '_' || c == '-' || c == '.').next())
        .map(|code| code.to_ascii_lowercase())
        .and_then(|code| supported(&code))
        .unwrap_or(DEFAULT_LANG)
}

/// Key lookup for user-facing labels
#[derive(Debug, Clone)]
pub struct Translator {
    lang: &'static str,
    entries: HashMap<String, String>,
}

impl Translator {
    pub fn new(lang: &str) -> Self {
        let lang = SUPPORTED
            .iter()
            .copied()
            .find(|s| *s == lang)
            .unwrap_or(DEFAULT_LANG);

        let entries = serde_json::from_str(dictionary_source(lang)).unwrap_or_else(|e| {
            tracing::warn!(lang, error = %e, "broken built-in dictionary");
            HashMap::new()
        });

        Self { lang, entries }
    }

    pub fn lang(&self) -> &'static str {
        self.lang
    }

    /// Translation for `key`, or the key itself when unknown
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }
}
