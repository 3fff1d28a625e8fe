use chrono::{DateTime, Utc};
use linkshield_scoring::{PaymentInfo, PayloadKind, VerdictLabel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DetectLinkResponse {
    pub url: String,
    pub prediction: VerdictLabel,
    pub confidence: f64,
    pub is_fraudulent: bool,
    pub threat_type: String,
    pub risk_score: u32,
    pub reasons: Vec<String>,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DetectQrResponse {
    pub payload: String,
    pub payload_type: PayloadKind,
    pub extracted_from_qr: bool,
    pub prediction: VerdictLabel,
    pub confidence: f64,
    pub is_fraudulent: bool,
    pub threat_type: String,
    pub risk_score: u32,
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,
    pub checked_at: DateTime<Utc>,
}
