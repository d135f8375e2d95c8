//! Description and thumbnail lookups against the Wikipedia REST summary endpoint.
//!
//! ```text
//! GET https://en.wikipedia.org/api/rest_v1/page/summary/{key}
//! { "extract": "Sirius is the brightest star ...", "thumbnail": { "source": "https://..." } }
//! ```
//!
//! Lookups are best effort: any failure is logged and answered with `None`.
use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;

use crate::{env_state::MeraiEnv, merai_errors::MeraiError};

pub const WIKI_SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static HTML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid entity pattern")
});

static LEADING_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-zA-Z0-9\-]{2,})").expect("valid name pattern"));

/// Extracted names at least this long are rejected.
const MAX_EXTRACTED_NAME_LEN: usize = 70;

/// Text and image attached to an object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSummary {
    pub text: Option<String>,
    pub image_url: Option<String>,
}

/// Anything able to describe an object from its lookup key.
pub trait SummaryProvider: Sync {
    /// Summary of `key`, `None` when nothing could be obtained.
    fn fetch_summary(&self, key: &str) -> Option<ObjectSummary>;
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

#[derive(Debug, Deserialize)]
struct WikiSummary {
    extract: Option<String>,
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone)]
pub struct WikiSummaryClient {
    env: MeraiEnv,
    base_url: String,
}

impl WikiSummaryClient {
    pub fn new(env: MeraiEnv) -> Self {
        Self::with_base_url(env, WIKI_SUMMARY_URL)
    }

    /// Client for another endpoint serving the same JSON shape (mirrors, local test servers).
    pub fn with_base_url(env: MeraiEnv, base_url: &str) -> Self {
        WikiSummaryClient {
            env,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn summary_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, page_title(key))
    }

    /// Fetch and decode a summary, keeping the reason of a failure.
    pub fn lookup(&self, key: &str) -> Result<ObjectSummary, MeraiError> {
        let body = self.env.get_from_url(&self.summary_url(key))?;
        parse_summary(&body)
    }
}

impl SummaryProvider for WikiSummaryClient {
    fn fetch_summary(&self, key: &str) -> Option<ObjectSummary> {
        match self.lookup(key) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("No summary for {key}: {e}");
                None
            }
        }
    }
}

/// Decode a summary payload.
///
/// A payload without text nor image is a [`MeraiError::LookupMiss`].
pub fn parse_summary(body: &str) -> Result<ObjectSummary, MeraiError> {
    let raw: WikiSummary = serde_json::from_str(body)?;
    let summary = ObjectSummary {
        text: raw
            .extract
            .map(|text| clean_html(&text))
            .filter(|text| !text.is_empty()),
        image_url: raw.thumbnail.map(|t| t.source),
    };

    if summary.text.is_none() && summary.image_url.is_none() {
        return Err(MeraiError::LookupMiss(
            "summary without extract nor thumbnail".to_string(),
        ));
    }
    Ok(summary)
}

/// Page title as used in the URL path: spaces become underscores, the rest is percent-encoded.
pub fn page_title(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.trim().replace(' ', "_").bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

fn unescape_entity(caps: &Captures) -> String {
    let entity = &caps[1];
    let decoded = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse().ok().and_then(char::from_u32)
    } else {
        match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            "ndash" => Some('–'),
            "mdash" => Some('—'),
            "deg" => Some('°'),
            _ => None,
        }
    };

    decoded
        .map(String::from)
        .unwrap_or_else(|| caps[0].to_string())
}

/// Plain text of an HTML fragment: entities decoded, tags removed, whitespace collapsed.
pub fn clean_html(text: &str) -> String {
    let unescaped = HTML_ENTITY.replace_all(text, unescape_entity);
    let stripped = HTML_TAG.replace_all(&unescaped, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Common name found at the start of a description.
///
/// The text before the earliest `" is "` or `","` is taken when it is non-empty, starts with an
/// uppercase letter and is shorter than 70 characters. Otherwise the leading capitalized word of
/// at least three characters is used.
pub fn extract_name_from_description(description: &str) -> Option<String> {
    if description.is_empty() {
        return None;
    }

    let cut = [description.find(" is "), description.find(',')]
        .into_iter()
        .flatten()
        .min();

    if let Some(end) = cut {
        let candidate = description[..end].trim();
        let starts_upper = candidate.chars().next().is_some_and(char::is_uppercase);
        if starts_upper && candidate.chars().count() < MAX_EXTRACTED_NAME_LEN {
            return Some(candidate.to_string());
        }
    }

    LEADING_WORD
        .captures(description)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod test_wiki {
    use super::*;

    #[test]
    fn test_extract_name() {
        assert_eq!(
            extract_name_from_description("Sirius is the brightest star in the night sky."),
            Some("Sirius".to_string())
        );
        assert_eq!(
            extract_name_from_description("Alpha Centauri, also known as Rigil Kentaurus, is ..."),
            Some("Alpha Centauri".to_string())
        );
        assert_eq!(
            extract_name_from_description("Polaris"),
            Some("Polaris".to_string())
        );
        assert_eq!(
            extract_name_from_description("Hd-12345 star , designated"),
            Some("Hd-12345 star".to_string())
        );
        assert_eq!(
            extract_name_from_description("the star is faint"),
            None
        );
        assert_eq!(extract_name_from_description(""), None);
        assert_eq!(extract_name_from_description("Ab is a star"), Some("Ab".to_string()));
    }

    #[test]
    fn test_extract_name_too_long() {
        let long = format!("{} is a star", "Verylongname ".repeat(6));
        assert_eq!(
            extract_name_from_description(&long),
            Some("Verylongname".to_string())
        );
    }

    #[test]
    fn test_clean_html() {
        assert_eq!(
            clean_html("<p><b>Vega</b> is a star &amp; a &lt;standard&gt;   candle&#33;</p>"),
            "Vega is a star & a candle!"
        );
        assert_eq!(clean_html("5&#x00B0; &unknown;"), "5° &unknown;");
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title("HIP 32349"), "HIP_32349");
        assert_eq!(page_title("Barnard's Star"), "Barnard%27s_Star");
        assert_eq!(page_title("Boötes"), "Bo%C3%B6tes");

        let client = WikiSummaryClient::new(MeraiEnv::new());
        assert_eq!(
            client.summary_url("Moon"),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Moon"
        );
    }

    #[test]
    fn test_parse_summary() {
        let body = r#"{"title":"Sirius","extract":"<b>Sirius</b> is the brightest star.","thumbnail":{"source":"https://img/sirius.jpg","width":320}}"#;
        let summary = parse_summary(body).unwrap();
        assert_eq!(summary.text.as_deref(), Some("Sirius is the brightest star."));
        assert_eq!(summary.image_url.as_deref(), Some("https://img/sirius.jpg"));

        let text_only = parse_summary(r#"{"extract":"Mars is a planet."}"#).unwrap();
        assert_eq!(text_only.image_url, None);

        assert!(matches!(
            parse_summary(r#"{"type":"https://mediawiki.org/wiki/HyperSwitch/errors/not_found"}"#),
            Err(MeraiError::LookupMiss(_))
        ));
        assert!(matches!(
            parse_summary("<html>"),
            Err(MeraiError::JsonError(_))
        ));
    }

    #[test]
    fn test_unreachable_endpoint_gives_none() {
        let env = MeraiEnv::with_timeout(std::time::Duration::from_millis(300));
        let client = WikiSummaryClient::with_base_url(env, "http://127.0.0.1:9/summary/");
        assert_eq!(client.summary_url("Vega"), "http://127.0.0.1:9/summary/Vega");
        assert_eq!(client.fetch_summary("Vega"), None);
    }
}
