use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Title and `<meta>` values of a document head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub title: String,
    pub metas: HashMap<String, String>,
}

/// Meta keys keep their case but can't carry `:` (`og:title` → `og_title`).
pub fn meta_key(raw: &str) -> String {
    raw.replace(':', "_")
}

/// Resolves the key/value pair a `<meta>` tag contributes.
///
/// `property`, `name` and `itemprop` name the key (the last one present
/// wins), `content` carries the value. A `charset` attribute replaces both,
/// wherever it appears in the tag. Missing parts default to the empty
/// string.
pub fn meta_entry<'a>(attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> (String, String) {
    let mut key = None;
    let mut value = None;
    let mut charset = None;

    for (name, val) in attrs {
        match name {
            "property" | "name" | "itemprop" => key = Some(meta_key(val)),
            "content" => value = Some(val),
            "charset" => charset = Some(val),
            _ => {}
        }
    }

    if let Some(charset) = charset {
        return ("charset".to_string(), charset.to_string());
    }

    (key.unwrap_or_default(), value.unwrap_or_default().to_string())
}
