use serde::Serialize;

use crate::domain::models::{ClientId, SubmissionOutcome, VerifiedClient};

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub client_id: ClientId,
    pub message: String,
    pub status: &'static str,
}

impl From<VerifiedClient> for VerifyResponse {
    fn from(client: VerifiedClient) -> Self {
        Self {
            success: true,
            message: format!(
                "Welcome back, {}! You can now upload your DNC list.",
                client.name
            ),
            client_id: client.client_id,
            status: "verified",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub redirect_url: String,
    pub status: &'static str,
}

impl From<SubmissionOutcome> for SubmitResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            success: true,
            redirect_url: outcome.redirect_url,
            status: "submitted",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
