use serde::{Deserialize, Serialize};

/// Points added by each URL rule when it triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRuleWeights {
    pub keyword: u32,
    pub ip_address: u32,
    pub subdomain_depth: u32,
    pub long_host: u32,
    pub low_trust_tld: u32,
    pub shortener: u32,
    pub hyphens: u32,
    pub no_https: u32,
    pub at_symbol: u32,
    pub homograph: u32,
    pub nonstandard_port: u32,
}

impl Default for UrlRuleWeights {
    fn default() -> Self {
        Self {
            keyword: 15,
            ip_address: 30,
            subdomain_depth: 25,
            long_host: 20,
            low_trust_tld: 25,
            shortener: 20,
            hyphens: 15,
            no_https: 10,
            at_symbol: 30,
            homograph: 35,
            nonstandard_port: 20,
        }
    }
}

/// Points added by each payment-payload rule when it triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRuleWeights {
    pub keyword: u32,
    pub personal_provider: u32,
    pub phone_local_part: u32,
    pub amount_very_high: u32,
    pub amount_high: u32,
    pub urgent_note: u32,
    pub missing_merchant_code: u32,
    pub multiple_apps: u32,
}

impl Default for PaymentRuleWeights {
    fn default() -> Self {
        Self {
            keyword: 25,
            personal_provider: 15,
            phone_local_part: 10,
            amount_very_high: 35,
            amount_high: 20,
            urgent_note: 15,
            missing_merchant_code: 10,
            multiple_apps: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Accumulated score at or above which an input is flagged.
    pub suspicious_min: u32,
    pub amount_high: f64,
    pub amount_very_high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            suspicious_min: 30,
            amount_high: 10_000.0,
            amount_very_high: 50_000.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub url: UrlRuleWeights,
    pub payment: PaymentRuleWeights,
    pub thresholds: Thresholds,
}
