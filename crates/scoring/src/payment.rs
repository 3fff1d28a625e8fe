use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;

/// Words that scam payment requests lean on: pressure, threats, prizes.
pub const FRAUD_KEYWORDS: &[&str] = &[
    "urgent",
    "kyc",
    "verify",
    "blocked",
    "suspend",
    "expire",
    "lottery",
    "prize",
    "winner",
    "lucky",
    "reward",
    "cashback",
    "refund",
    "gift",
    "penalty",
];

/// Urgency vocabulary checked against the transaction note.
pub const URGENCY_WORDS: &[&str] = &[
    "urgent",
    "immediately",
    "now",
    "hurry",
    "last chance",
    "expires",
    "final",
];

/// UPI handle suffixes issued to personal accounts rather than merchant
/// gateways.
pub const PERSONAL_PROVIDERS: &[&str] = &[
    "ybl",
    "oksbi",
    "okaxis",
    "okhdfcbank",
    "okicici",
    "paytm",
    "apl",
    "axl",
    "ibl",
    "upi",
];

/// Payment app identifiers; more than one in a single payload is unusual.
pub const PAYMENT_APPS: &[&str] = &[
    "paytm",
    "phonepe",
    "gpay",
    "googlepay",
    "bhim",
    "mobikwik",
    "freecharge",
    "amazonpay",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadField {
    PayeeAddress,
    PayeeName,
    Amount,
    Note,
    MerchantCode,
}

/// Declarative extraction table: UPI-style key to first-match pattern.
const FIELD_PATTERNS: &[(PayloadField, &str)] = &[
    (PayloadField::PayeeAddress, r"pa=([^&\s]+)"),
    (PayloadField::PayeeName, r"pn=([^&\s]+)"),
    (PayloadField::Amount, r"am=([^&\s]+)"),
    (PayloadField::Note, r"tn=([^&\s]+)"),
    (PayloadField::MerchantCode, r"mc=([^&\s]+)"),
];

static EXTRACTORS: LazyLock<Vec<(PayloadField, Regex)>> = LazyLock::new(|| {
    FIELD_PATTERNS
        .iter()
        .map(|(field, pattern)| {
            (
                *field,
                Regex::new(pattern).expect("hard-coded field pattern compiles"),
            )
        })
        .collect()
});

fn extract(payload: &str, field: PayloadField) -> Option<String> {
    EXTRACTORS
        .iter()
        .find(|(f, _)| *f == field)
        .and_then(|(_, re)| re.captures(payload))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Fields recovered from a payment payload; each is present only when the
/// corresponding token was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub payee_address: Option<String>,
    pub payee_name: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentScore {
    pub fraudulent: bool,
    pub score: u32,
    pub reasons: Vec<String>,
    pub info: PaymentInfo,
}

/// Score a decoded payment payload (UPI-style `key=value` tokens).
/// Total for any input; unparsable fields are simply absent.
pub fn score_payment(config: &ScoringConfig, payload: &str) -> PaymentScore {
    let weights = &config.payment;
    let lowered = payload.to_lowercase();

    let info = PaymentInfo {
        payee_address: extract(payload, PayloadField::PayeeAddress),
        payee_name: extract(payload, PayloadField::PayeeName).map(|name| name.replace('+', " ")),
        amount: extract(payload, PayloadField::Amount),
    };

    let mut score = 0u32;
    let mut reasons = Vec::new();

    for keyword in FRAUD_KEYWORDS {
        if lowered.contains(keyword) {
            score += weights.keyword;
            reasons.push(format!("Payload mentions '{keyword}'"));
        }
    }

    if let Some(address) = &info.payee_address {
        let address = address.to_lowercase();
        if let Some((local, domain)) = address.split_once('@') {
            if PERSONAL_PROVIDERS.contains(&domain) {
                score += weights.personal_provider;
                reasons.push(format!(
                    "Payee handle '@{domain}' belongs to a personal account provider"
                ));
            }
            if local.len() == 10 && local.chars().all(|c| c.is_ascii_digit()) {
                score += weights.phone_local_part;
                reasons.push("Payee address is a bare phone number".to_string());
            }
        }
    }

    if let Some(amount) = info.amount.as_deref().and_then(|a| a.parse::<f64>().ok()) {
        if amount > config.thresholds.amount_very_high {
            score += weights.amount_very_high;
            reasons.push(format!("Very high amount requested: {amount}"));
        } else if amount > config.thresholds.amount_high {
            score += weights.amount_high;
            reasons.push(format!("High amount requested: {amount}"));
        }
    }

    if let Some(note) = extract(payload, PayloadField::Note) {
        let note = note.replace('+', " ").to_lowercase();
        if URGENCY_WORDS.iter().any(|w| note.contains(w)) {
            score += weights.urgent_note;
            reasons.push("Transaction note pressures the payer".to_string());
        }
    }

    if info.amount.is_some() && extract(payload, PayloadField::MerchantCode).is_none() {
        score += weights.missing_merchant_code;
        reasons.push("Amount requested without a merchant code".to_string());
    }

    let app_mentions = PAYMENT_APPS
        .iter()
        .filter(|app| lowered.contains(*app))
        .count();
    if app_mentions > 1 {
        score += weights.multiple_apps;
        reasons.push("References multiple payment apps".to_string());
    }

    PaymentScore {
        fraudulent: score >= config.thresholds.suspicious_min,
        score,
        reasons,
        info,
    }
}
