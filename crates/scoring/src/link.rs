use url::Url;

use crate::config::ScoringConfig;

/// Keywords that phishing URLs tend to carry: impersonated brands, urgency
/// words, account/security vocabulary, with common non-English variants.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login",
    "signin",
    "verify",
    "account",
    "secure",
    "update",
    "confirm",
    "password",
    "banking",
    "wallet",
    "invoice",
    "urgent",
    "suspended",
    "blocked",
    "unlock",
    "expire",
    "alert",
    "free",
    "bonus",
    "prize",
    "winner",
    "lottery",
    "reward",
    "giveaway",
    "paypal",
    "apple",
    "amazon",
    "netflix",
    "microsoft",
    "whatsapp",
    "instagram",
    "verificar",
    "cuenta",
    "banque",
    "compte",
    "konto",
    "sicherheit",
    "conferma",
];

/// Top-level domains with a disproportionate share of abuse reports.
pub const LOW_TRUST_TLDS: &[&str] = &[
    ".tk", ".ml", ".ga", ".cf", ".gq", ".xyz", ".top", ".buzz", ".click", ".work", ".loan",
    ".icu",
];

/// Link-shortener hosts that hide the destination from the user.
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl",
    "goo.gl",
    "t.co",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "cutt.ly",
    "rebrand.ly",
    "rb.gy",
    "shorturl.at",
];

/// Cyrillic characters that render like Latin letters.
pub const HOMOGRAPH_CHARS: &[char] = &['а', 'е', 'о', 'р', 'с', 'у', 'х', 'і', 'ѕ', 'ј', 'ԛ', 'ԝ'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlScore {
    pub suspicious: bool,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Score a URL against the rule tables above. Total for any input: a URL
/// that cannot be parsed yields a zero score with a diagnostic reason.
pub fn score_url(config: &ScoringConfig, raw: &str) -> UrlScore {
    match evaluate(config, raw) {
        Ok(result) => result,
        Err(cause) => UrlScore {
            suspicious: false,
            score: 0,
            reasons: vec![format!("Error analyzing URL: {cause}")],
        },
    }
}

fn evaluate(config: &ScoringConfig, raw: &str) -> Result<UrlScore, url::ParseError> {
    let lowered = raw.trim().to_lowercase();
    let parsed = Url::parse(&lowered)?;
    // The parsed host is IDNA-normalized, which hides lookalike characters
    // and rewrites label/hyphen counts; rules read the host as written.
    let host = raw_host(&lowered);
    let weights = &config.url;

    let mut score = 0u32;
    let mut reasons = Vec::new();

    for keyword in SUSPICIOUS_KEYWORDS {
        if lowered.contains(keyword) {
            score += weights.keyword;
            reasons.push(format!("Contains suspicious keyword: {keyword}"));
        }
    }

    if host.parse::<std::net::Ipv4Addr>().is_ok() {
        score += weights.ip_address;
        reasons.push("Uses a raw IP address instead of a domain name".to_string());
    }

    if host.split('.').count() > 3 {
        score += weights.subdomain_depth;
        reasons.push("Unusually deep subdomain nesting".to_string());
    }

    if host.len() > 40 {
        score += weights.long_host;
        reasons.push("Unusually long host name".to_string());
    }

    for tld in LOW_TRUST_TLDS {
        if host.ends_with(tld) {
            score += weights.low_trust_tld;
            reasons.push(format!("Low-trust top-level domain: {tld}"));
        }
    }

    if let Some(shortener) = SHORTENER_DOMAINS.iter().find(|s| host.contains(*s)) {
        score += weights.shortener;
        reasons.push(format!("Uses URL shortener: {shortener}"));
    }

    if host.matches('-').count() > 3 {
        score += weights.hyphens;
        reasons.push("Excessive hyphens in host name".to_string());
    }

    if parsed.scheme() != "https" {
        score += weights.no_https;
        reasons.push("Connection is not HTTPS".to_string());
    }

    if lowered.contains('@') {
        score += weights.at_symbol;
        reasons.push("Contains an @ character (credential or redirect trick)".to_string());
    }

    if let Some(ch) = host.chars().find(|c| HOMOGRAPH_CHARS.contains(c)) {
        score += weights.homograph;
        reasons.push(format!(
            "Host contains lookalike character '{ch}' (possible homograph attack)"
        ));
    }

    if let Some(port) = parsed.port() {
        if port != 443 && port != 80 {
            score += weights.nonstandard_port;
            reasons.push(format!("Non-standard port: {port}"));
        }
    }

    Ok(UrlScore {
        suspicious: score >= config.thresholds.suspicious_min,
        score,
        reasons,
    })
}

/// Host component as written in the URL, before any IDNA normalization:
/// authority minus userinfo and port.
fn raw_host(lowered: &str) -> &str {
    let after_scheme = lowered
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(lowered);
    let authority = after_scheme.split(['/', '?', '#']).next().unwrap_or("");
    let host = authority
        .rsplit_once('@')
        .map(|(_, h)| h)
        .unwrap_or(authority);
    host.split(':').next().unwrap_or(host)
}
