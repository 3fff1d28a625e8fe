use serde::{Deserialize, Serialize};

use crate::payment::{PaymentInfo, PaymentScore};

/// Class names of the pretrained URL model, indexed by label.
pub const THREAT_LABELS: &[&str] = &["Benign", "Defacement", "Phishing", "Malware"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictLabel {
    Malicious,
    Safe,
    Unknown,
}

/// Output of the injected text classifier: a label index into
/// [`THREAT_LABELS`] and a confidence in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub label: u32,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub confidence: f64,
    pub is_fraudulent: bool,
    pub threat_type: String,
    pub risk_score: u32,
    pub reasons: Vec<String>,
}

/// Merge the model's classification with the heuristic score. Either
/// signal alone is sufficient to flag the input. Independent of which
/// model produced the prediction.
pub fn combine(
    prediction: &ModelPrediction,
    suspicious: bool,
    score: u32,
    reasons: Vec<String>,
) -> Verdict {
    let ml_is_malicious = prediction.label != 0;
    let is_fraudulent = ml_is_malicious || suspicious;
    let heuristic_confidence = (f64::from(score) / 100.0).min(1.0);

    let confidence = match (ml_is_malicious, suspicious) {
        (true, true) => prediction.confidence.max(heuristic_confidence),
        (false, true) => heuristic_confidence,
        _ => prediction.confidence,
    };

    let threat_type = if ml_is_malicious {
        THREAT_LABELS
            .get(prediction.label as usize)
            .copied()
            .unwrap_or("Malicious")
            .to_string()
    } else if suspicious {
        "Suspicious".to_string()
    } else {
        "Benign".to_string()
    };

    Verdict {
        label: if is_fraudulent {
            VerdictLabel::Malicious
        } else {
            VerdictLabel::Safe
        },
        confidence,
        is_fraudulent,
        threat_type,
        risk_score: score,
        reasons,
    }
}

/// Verdict for a payment payload, where no text-classification model
/// applies.
pub fn payment_verdict(scored: PaymentScore) -> (Verdict, PaymentInfo) {
    let PaymentScore {
        fraudulent,
        score,
        reasons,
        info,
    } = scored;

    let verdict = Verdict {
        label: if fraudulent {
            VerdictLabel::Malicious
        } else {
            VerdictLabel::Safe
        },
        confidence: (f64::from(score) / 100.0).min(1.0),
        is_fraudulent: fraudulent,
        threat_type: if fraudulent {
            "Payment Fraud".to_string()
        } else {
            "Benign".to_string()
        },
        risk_score: score,
        reasons,
    };

    (verdict, info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(label: u32, confidence: f64) -> ModelPrediction {
        ModelPrediction { label, confidence }
    }

    #[test]
    fn model_alone_flags_with_its_confidence() {
        let verdict = combine(&prediction(2, 0.9), false, 5, vec![]);
        assert!(verdict.is_fraudulent);
        assert_eq!(verdict.threat_type, "Phishing");
        assert!((verdict.confidence - 0.9).abs() < f64::EPSILON);
        assert_eq!(verdict.label, VerdictLabel::Malicious);
        assert_eq!(verdict.risk_score, 5);
    }

    #[test]
    fn heuristics_alone_flag_with_scaled_score() {
        let reasons = vec!["Uses URL shortener: bit.ly".to_string()];
        let verdict = combine(&prediction(0, 0.8), true, 40, reasons.clone());
        assert!(verdict.is_fraudulent);
        assert_eq!(verdict.threat_type, "Suspicious");
        assert!((verdict.confidence - 0.4).abs() < f64::EPSILON);
        assert_eq!(verdict.reasons, reasons);
    }

    #[test]
    fn agreeing_signals_take_the_higher_confidence() {
        let verdict = combine(&prediction(3, 0.6), true, 90, vec![]);
        assert_eq!(verdict.threat_type, "Malware");
        assert!((verdict.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn neither_signal_yields_safe_benign() {
        let verdict = combine(&prediction(0, 0.95), false, 10, vec![]);
        assert!(!verdict.is_fraudulent);
        assert_eq!(verdict.label, VerdictLabel::Safe);
        assert_eq!(verdict.threat_type, "Benign");
        assert!((verdict.confidence - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn heuristic_confidence_is_clamped_to_one() {
        let verdict = combine(&prediction(0, 0.5), true, 250, vec![]);
        assert!((verdict.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn defacement_label_is_named() {
        let verdict = combine(&prediction(1, 0.7), false, 0, vec![]);
        assert_eq!(verdict.threat_type, "Defacement");
    }

    #[test]
    fn out_of_range_label_falls_back_without_panicking() {
        let verdict = combine(&prediction(9, 0.7), false, 0, vec![]);
        assert!(verdict.is_fraudulent);
        assert_eq!(verdict.threat_type, "Malicious");
    }

    #[test]
    fn fraudulent_payment_becomes_malicious_verdict() {
        let scored = PaymentScore {
            fraudulent: true,
            score: 60,
            reasons: vec!["Very high amount requested: 75000".to_string()],
            info: PaymentInfo {
                payee_address: Some("merchant@oksbi".to_string()),
                payee_name: Some("John Doe".to_string()),
                amount: Some("75000".to_string()),
            },
        };
        let (verdict, info) = payment_verdict(scored);
        assert_eq!(verdict.label, VerdictLabel::Malicious);
        assert_eq!(verdict.threat_type, "Payment Fraud");
        assert!((verdict.confidence - 0.6).abs() < f64::EPSILON);
        assert_eq!(info.payee_name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn clean_payment_becomes_safe_verdict() {
        let scored = PaymentScore {
            fraudulent: false,
            score: 10,
            reasons: vec![],
            info: PaymentInfo::default(),
        };
        let (verdict, _) = payment_verdict(scored);
        assert_eq!(verdict.label, VerdictLabel::Safe);
        assert_eq!(verdict.threat_type, "Benign");
        assert!(!verdict.is_fraudulent);
    }

    #[test]
    fn verdict_label_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VerdictLabel::Malicious).unwrap(),
            "\"malicious\""
        );
        assert_eq!(
            serde_json::to_string(&VerdictLabel::Unknown).unwrap(),
            "\"unknown\""
        );
    }
}
