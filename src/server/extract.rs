use std::collections::HashMap;

use axum::{
    Form,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};

use crate::server::{MAX_UPLOAD_BYTES, errors::AppError};

/// Name of the multipart part carrying an uploaded list.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content: Vec<u8>,
}

/// Form fields of a request, read from either a `multipart/form-data` or an
/// `application/x-www-form-urlencoded` body.
///
/// Any other body yields no fields at all. When a field repeats, the first
/// value wins.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl FormFields {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn take_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn take_file(&mut self) -> Option<UploadedFile> {
        self.file.take()
    }
}

fn content_type(req: &Request) -> Option<&str> {
    req.headers().get(CONTENT_TYPE)?.to_str().ok()
}

impl<S: Send + Sync> FromRequest<S> for FormFields {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = content_type(&req).map(|ct| ct.to_ascii_lowercase());
        match kind.as_deref() {
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(AppError::invalid_form)?;
                read_multipart(multipart).await
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(AppError::invalid_form)?;
                let mut form = FormFields::default();
                for (name, value) in fields {
                    form.fields.entry(name).or_insert(value);
                }
                Ok(form)
            }
            _ => Ok(FormFields::default()),
        }
    }
}

fn multipart_error(error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::info!("Rejected oversized upload: {error}");
        AppError::FileTooLarge
    } else {
        AppError::invalid_form(error)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormFields, AppError> {
    let mut form = FormFields::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == FILE_FIELD {
            let filename = field.file_name().map(str::to_owned);
            let content = field.bytes().await.map_err(multipart_error)?.to_vec();
            if content.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::FileTooLarge);
            }
            if form.file.is_none() {
                form.file = Some(UploadedFile { filename, content });
            }
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.entry(name).or_insert(value);
        }
    }
    Ok(form)
}
