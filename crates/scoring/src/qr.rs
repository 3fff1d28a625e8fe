use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::payment::PAYMENT_APPS;

/// UPI-style key tokens that mark a payment request payload.
pub const UPI_KEYS: &[&str] = &["pa=", "pn=", "am=", "mc=", "tn="];

/// Categories a decoded barcode payload can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Url,
    Payment,
    Other,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Url => "url",
            PayloadKind::Payment => "payment",
            PayloadKind::Other => "other",
        }
    }
}

static EMBEDDED_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("hard-coded pattern compiles")
});

static BARE_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)+(?:[/?#]\S*)?$")
        .expect("hard-coded pattern compiles")
});

static DOMAIN_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9][a-z0-9-]*\.[a-z]{2,}(?:/\S*|$)").expect("hard-coded pattern compiles")
});

/// Classify raw decoded barcode text and normalize it for downstream
/// scoring. An embedded link anywhere in the text wins over the
/// surrounding payload, even inside a payment request's note.
pub fn classify_payload(raw: &str) -> (String, PayloadKind) {
    let trimmed = raw.trim();

    let payload = EMBEDDED_URL_RE
        .find(trimmed)
        .map(|m| m.as_str())
        .unwrap_or(trimmed);
    let lowered = payload.to_lowercase();

    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return (payload.to_string(), PayloadKind::Url);
    }
    if lowered.starts_with("www.") || BARE_DOMAIN_RE.is_match(payload) {
        return (format!("http://{payload}"), PayloadKind::Url);
    }
    if is_payment_payload(&lowered) {
        return (payload.to_string(), PayloadKind::Payment);
    }
    if let Some(m) = DOMAIN_LIKE_RE.find(payload) {
        return (format!("http://{}", m.as_str()), PayloadKind::Url);
    }
    (payload.to_string(), PayloadKind::Other)
}

fn is_payment_payload(lowered: &str) -> bool {
    lowered.starts_with("upi://")
        || UPI_KEYS.iter().any(|key| lowered.contains(key))
        || PAYMENT_APPS.iter().any(|app| lowered.contains(app))
}
