use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DetectLinkRequest {
    pub url: String,
}
