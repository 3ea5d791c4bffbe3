//! Minimal `multipart/form-data` encoder for a single file field.

use super::types::ImageFile;

/// An encoded form ready to send.
pub(crate) struct MultipartForm {
    pub(crate) content_type: String,
    pub(crate) body: Vec<u8>,
}

/// Encode `file` as the only part of a form under `field`.
pub(crate) fn file_form(field: &str, file: &ImageFile) -> MultipartForm {
    let boundary = format!("nutriscan-{}", uuid::Uuid::new_v4().simple());
    let mut body = Vec::with_capacity(file.bytes.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            escape_quoted(field),
            escape_quoted(&file.name)
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type()).as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    MultipartForm {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        body,
    }
}

/// Percent-encode the characters that would break a quoted header value.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
