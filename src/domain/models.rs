use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::validator::is_valid_entry;

/// Fallback display name for clients the platform returns without one.
pub const DEFAULT_CLIENT_NAME: &str = "User";

/// A validated email address or bare domain destined for the block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entry(String);

impl Entry {
    /// Builds an entry if `value` passes validation. The value is kept verbatim.
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        is_valid_entry(&value).then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Entry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a client account on the platform.
///
/// The platform is not consistent about sending ids as numbers or strings,
/// so both are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ClientId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// A client account as listed by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Result of a successful email verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClient {
    pub client_id: ClientId,
    pub name: String,
}

impl From<ClientRecord> for VerifiedClient {
    fn from(record: ClientRecord) -> Self {
        Self {
            client_id: record.id,
            name: record
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
        }
    }
}

/// Body of the platform's add-domain-block-list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockListRequest {
    pub domain_block_list: Vec<Entry>,
    pub client_id: ClientId,
}

/// Where the entries of a submission come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    File {
        filename: Option<String>,
        content: Vec<u8>,
    },
    /// `upload_type=file` was sent without a file part.
    MissingFile,
    Single(Option<String>),
}

/// Everything the submit operation needs, as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub client_id: Option<String>,
    /// Used to resolve the client when no `client_id` was sent.
    pub platform_email: Option<String>,
    pub source: UploadSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub redirect_url: String,
    pub submitted: usize,
}
