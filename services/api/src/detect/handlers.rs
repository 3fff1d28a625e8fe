use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use linkshield_common::error::LinkshieldError;
use linkshield_scoring::{
    classify_payload, combine, payment_verdict, score_payment, score_url, PayloadKind,
    PaymentInfo, Verdict,
};

use crate::decoder;
use crate::error::ApiError;
use crate::AppState;

use super::requests::DetectLinkRequest;
use super::responses::{DetectLinkResponse, DetectQrResponse};

/// Image extensions accepted for QR uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

pub async fn detect_link(
    State(state): State<AppState>,
    Json(body): Json<DetectLinkRequest>,
) -> Result<Json<DetectLinkResponse>, ApiError> {
    let url = body.url.trim();
    if url.is_empty() {
        return Err(LinkshieldError::Validation("url must not be empty".to_string()).into());
    }

    let verdict = classify_url(&state, url).await?;
    tracing::info!(url, score = verdict.risk_score, fraudulent = verdict.is_fraudulent, "link scanned");

    let Verdict {
        label,
        confidence,
        is_fraudulent,
        threat_type,
        risk_score,
        reasons,
    } = verdict;

    Ok(Json(DetectLinkResponse {
        url: url.to_string(),
        prediction: label,
        confidence,
        is_fraudulent,
        threat_type,
        risk_score,
        reasons,
        checked_at: Utc::now(),
    }))
}

pub async fn detect_qr(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DetectQrResponse>, ApiError> {
    let mut image_bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| LinkshieldError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        validate_extension(&filename)?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| LinkshieldError::Validation(format!("failed to read upload: {e}")))?;
        image_bytes = Some(bytes);
        break;
    }

    let bytes = image_bytes
        .ok_or_else(|| LinkshieldError::Validation("no image file provided".to_string()))?;

    let payloads = decoder::decode_payloads(&bytes)?;
    let raw = payloads
        .into_iter()
        .next()
        .ok_or(LinkshieldError::NoQrPayload)?;

    let (payload, kind) = classify_payload(&raw);
    tracing::info!(kind = kind.as_str(), "QR payload classified");

    let (verdict, payment) = match kind {
        PayloadKind::Url => (classify_url(&state, &payload).await?, None),
        PayloadKind::Payment => {
            let (verdict, info) = payment_verdict(score_payment(&state.scoring, &payload));
            (verdict, Some(info))
        }
        PayloadKind::Other => {
            let prediction = state.classifier.classify(&payload).await?;
            (combine(&prediction, false, 0, Vec::new()), None)
        }
    };

    Ok(Json(qr_response(payload, kind, verdict, payment)))
}

/// Run the model and the URL heuristics, then merge the two signals.
async fn classify_url(state: &AppState, url: &str) -> Result<Verdict, LinkshieldError> {
    let prediction = state.classifier.classify(url).await?;
    let heuristics = score_url(&state.scoring, url);
    Ok(combine(
        &prediction,
        heuristics.suspicious,
        heuristics.score,
        heuristics.reasons,
    ))
}

fn validate_extension(filename: &str) -> Result<(), ApiError> {
    let extension = filename.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(LinkshieldError::Validation(format!(
            "invalid file type; allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        ))
        .into()),
    }
}

fn qr_response(
    payload: String,
    kind: PayloadKind,
    verdict: Verdict,
    payment: Option<PaymentInfo>,
) -> DetectQrResponse {
    let Verdict {
        label,
        confidence,
        is_fraudulent,
        threat_type,
        risk_score,
        reasons,
    } = verdict;

    DetectQrResponse {
        payload,
        payload_type: kind,
        extracted_from_qr: true,
        prediction: label,
        confidence,
        is_fraudulent,
        threat_type,
        risk_score,
        reasons,
        payment,
        checked_at: Utc::now(),
    }
}
