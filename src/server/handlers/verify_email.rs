use axum::{Json, extract::State};
use tracing::instrument;

use crate::domain::ports::PlatformClient;
use crate::server::{
    AppState, errors::AppError, extract::FormFields, responses::VerifyResponse,
};

pub const EMAIL_FIELD: &str = "platform_email";

/// Looks up the platform client owning the submitted email.
#[instrument(skip_all)]
pub async fn verify_email_handler<P: PlatformClient + 'static>(
    State(state): State<AppState<P>>,
    form: FormFields,
) -> Result<Json<VerifyResponse>, AppError> {
    let client = state.service.verify_email(form.field(EMAIL_FIELD)).await?;
    Ok(Json(client.into()))
}
