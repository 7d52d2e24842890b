use thiserror::Error;

use crate::EmailFile;

pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["text/plain", "application/pdf"];
pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".txt", ".pdf"];

/// Input rejected before any outbound call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid file type ({file_name}). Use only .txt or .pdf")]
    InvalidFileType { file_name: String },
    #[error("email text is empty")]
    EmptyInput,
}

/// Accept when the declared MIME type is allowed, otherwise fall back to the
/// file name extension.
pub fn validate_file(file: &EmailFile) -> Result<(), InputError> {
    if let Some(mime) = file.declared_mime.as_deref() {
        if is_mime_accepted(mime) {
            return Ok(());
        }
    }

    let name = file.file_name.to_ascii_lowercase();
    if ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        Ok(())
    } else {
        Err(InputError::InvalidFileType {
            file_name: file.file_name.clone(),
        })
    }
}

/// Trimmed text to submit, or `EmptyInput` for blank buffers.
pub fn submission_text(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(InputError::EmptyInput)
    } else {
        Ok(trimmed.to_owned())
    }
}

fn is_mime_accepted(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    ACCEPTED_MIME_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(essence))
}
