//! Client verification and block list submission.

use tracing::{debug, info, instrument, warn};

use super::errors::ServiceError;
use super::models::{
    BlockListRequest, ClientId, Entry, SubmissionOutcome, SubmissionRequest, UploadSource,
    VerifiedClient,
};
use super::parser::parse_entries;
use super::ports::PlatformClient;
use super::validator::{is_valid_entry, is_valid_optional_entry};

const LOOKUP_FAILED: &str = "Unable to verify email with Smartlead. Please try again later.";
const SUBMIT_FAILED: &str = "Failed to submit block list to Smartlead";

#[derive(Debug, Clone)]
pub struct DncService<P: PlatformClient> {
    platform: P,
    redirect_url: String,
}

impl<P: PlatformClient> DncService<P> {
    pub fn new(platform: P, redirect_url: impl Into<String>) -> Self {
        Self {
            platform,
            redirect_url: redirect_url.into(),
        }
    }

    /// Resolves the platform client owning `email`.
    ///
    /// The client list is fetched fresh on every call and scanned for the first
    /// record whose email matches exactly.
    #[instrument(skip(self))]
    pub async fn verify_email(&self, email: Option<&str>) -> Result<VerifiedClient, ServiceError> {
        let email = match email {
            Some(email) if !email.is_empty() => email,
            _ => return Err(ServiceError::Validation("Email is required".into())),
        };
        if !is_valid_entry(email) {
            return Err(ServiceError::Validation("Invalid email format".into()));
        }

        let clients = self.platform.list_clients().await.map_err(|e| {
            warn!(error = %e, "Client lookup failed");
            ServiceError::from_platform(e, LOOKUP_FAILED)
        })?;
        debug!(count = clients.len(), "Fetched client list");

        let record = clients
            .into_iter()
            .find(|client| client.email.as_deref() == Some(email))
            .ok_or(ServiceError::NotFound)?;

        let client = VerifiedClient::from(record);
        info!(client_id = %client.client_id, "Email verified");
        Ok(client)
    }

    /// Validates the upload and forwards it to the platform.
    ///
    /// Missing inputs and a malformed single entry are rejected before any
    /// outbound request. Uploaded files are parsed once the client is known.
    #[instrument(skip_all)]
    pub async fn submit_block_list(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionOutcome, ServiceError> {
        let SubmissionRequest {
            client_id,
            platform_email,
            source,
        } = request;

        let client_id = client_id.filter(|id| !id.trim().is_empty());
        let platform_email = platform_email.filter(|e| !e.is_empty());
        if client_id.is_none() && platform_email.is_none() {
            return Err(ServiceError::MissingInput("Client ID is required".into()));
        }

        check_source(&source)?;

        let client_id = match client_id {
            Some(id) => ClientId::new(id.trim()),
            None => self.verify_email(platform_email.as_deref()).await?.client_id,
        };

        let entries = collect_entries(source)?;

        let submitted = entries.len();
        let body = BlockListRequest {
            domain_block_list: entries,
            client_id,
        };
        self.platform
            .add_domain_block_list(&body)
            .await
            .map_err(|e| {
                warn!(error = %e, "Block list submission failed");
                ServiceError::from_platform(e, SUBMIT_FAILED)
            })?;

        info!(client_id = %body.client_id, submitted, "Block list submitted");
        Ok(SubmissionOutcome {
            redirect_url: self.redirect_url.clone(),
            submitted,
        })
    }
}

fn safe_filename(filename: Option<&str>) -> Result<String, ServiceError> {
    let filename = filename.map(sanitize_filename).unwrap_or_default();
    if filename.is_empty() {
        return Err(ServiceError::MissingInput("No file provided".into()));
    }
    Ok(filename)
}

/// Checks that need no parsing: the file is present, the single entry is valid.
fn check_source(source: &UploadSource) -> Result<(), ServiceError> {
    match source {
        UploadSource::MissingFile => Err(ServiceError::MissingInput("No file provided".into())),
        UploadSource::File { filename, .. } => safe_filename(filename.as_deref()).map(|_| ()),
        UploadSource::Single(value) if !is_valid_optional_entry(value.as_deref()) => Err(
            ServiceError::Validation("Invalid email or domain format".into()),
        ),
        UploadSource::Single(_) => Ok(()),
    }
}

fn collect_entries(source: UploadSource) -> Result<Vec<Entry>, ServiceError> {
    match source {
        UploadSource::MissingFile => Err(ServiceError::MissingInput("No file provided".into())),
        UploadSource::File { filename, content } => {
            let filename = safe_filename(filename.as_deref())?;
            let text = String::from_utf8(content).map_err(|_| {
                ServiceError::Validation("File must be UTF-8 encoded text".into())
            })?;

            let entries = parse_entries(&text);
            debug!(%filename, parsed = entries.len(), "Parsed uploaded file");
            if entries.is_empty() {
                return Err(ServiceError::Validation(
                    "No valid emails or domains found in file".into(),
                ));
            }
            Ok(entries)
        }
        UploadSource::Single(value) => {
            if !is_valid_optional_entry(value.as_deref()) {
                return Err(ServiceError::Validation(
                    "Invalid email or domain format".into(),
                ));
            }
            Ok(value.and_then(Entry::parse).into_iter().collect())
        }
    }
}

/// Reduces a client-supplied file name to a safe base name.
///
/// Directory components are discarded, Unicode is transliterated to ASCII
/// ("é" becomes "e"), and only ASCII alphanumerics, `.`, `_` and `-` are kept;
/// whitespace becomes `_`. Leading dots and underscores are stripped, so a name
/// made only of unsafe characters ends up empty.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = deunicode::deunicode(base)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    cleaned.trim_start_matches(['.', '_']).trim_end_matches('_').to_string()
}
