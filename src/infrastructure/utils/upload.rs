use derive_more::Display;
use infer::Infer;

use crate::entities::upload::UploadRequest;

const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "application/pdf",
];

#[derive(Debug, Display, PartialEq)]
pub enum UploadError {
    #[display("File is empty.")]
    EmptyFile,

    #[display("File size exceeds maximum allowed ({_0} bytes).")]
    FileTooLarge(usize),

    #[display("Unsupported file type: {_0}")]
    InvalidType(String),

    #[display("Could not determine the file type.")]
    UnknownType,
}

/// Checks size and sniffs the content type from the bytes themselves, not
/// the file name. Returns the MIME type to send with the multipart part.
pub fn inspect_upload(request: &UploadRequest, max_size: usize) -> Result<&'static str, UploadError> {
    if request.bytes.is_empty() {
        return Err(UploadError::EmptyFile);
    }
    if request.bytes.len() > max_size {
        return Err(UploadError::FileTooLarge(max_size));
    }

    let infer = Infer::new();
    match infer.get(&request.bytes) {
        Some(kind) if ALLOWED_MIME_TYPES.contains(&kind.mime_type()) => Ok(kind.mime_type()),
        Some(kind) => Err(UploadError::InvalidType(kind.mime_type().to_string())),
        None => Err(UploadError::UnknownType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    fn request(bytes: &[u8]) -> UploadRequest {
        UploadRequest { file_name: "cover.png".into(), bytes: bytes.to_vec() }
    }

    #[test]
    fn accepts_png() {
        assert_eq!(inspect_upload(&request(PNG_HEADER), 1024), Ok("image/png"));
    }

    #[test]
    fn rejects_oversized_and_empty() {
        assert_eq!(inspect_upload(&request(PNG_HEADER), 4), Err(UploadError::FileTooLarge(4)));
        assert_eq!(inspect_upload(&request(&[]), 1024), Err(UploadError::EmptyFile));
    }

    #[test]
    fn rejects_unknown_bytes() {
        assert_eq!(inspect_upload(&request(b"just some text"), 1024), Err(UploadError::UnknownType));
    }
}
