use axum::{Json, extract::State};
use tracing::instrument;

use crate::domain::models::{SubmissionRequest, UploadSource};
use crate::domain::ports::PlatformClient;
use crate::server::{
    AppState, errors::AppError, extract::FormFields, handlers::verify_email::EMAIL_FIELD,
    responses::SubmitResponse,
};

const CLIENT_ID_FIELD: &str = "client_id";
const UPLOAD_TYPE_FIELD: &str = "upload_type";
const SINGLE_ENTRY_FIELD: &str = "single_entry";

/// Builds the submission from the posted form. Any `upload_type` other than
/// `file` is a single-entry upload.
fn submission_from_form(mut form: FormFields) -> SubmissionRequest {
    let is_file_upload = form.field(UPLOAD_TYPE_FIELD) == Some("file");
    let source = if is_file_upload {
        match form.take_file() {
            Some(file) => UploadSource::File {
                filename: file.filename,
                content: file.content,
            },
            None => UploadSource::MissingFile,
        }
    } else {
        UploadSource::Single(form.take_field(SINGLE_ENTRY_FIELD))
    };

    SubmissionRequest {
        client_id: form.take_field(CLIENT_ID_FIELD),
        platform_email: form.take_field(EMAIL_FIELD),
        source,
    }
}

/// Validates the uploaded block list and forwards it to the platform.
#[instrument(skip_all)]
pub async fn submit_blocklist_handler<P: PlatformClient + 'static>(
    State(state): State<AppState<P>>,
    form: FormFields,
) -> Result<Json<SubmitResponse>, AppError> {
    let request = submission_from_form(form);
    let outcome = state.service.submit_block_list(request).await?;
    Ok(Json(outcome.into()))
}
