//! Minimal multipart/form-data (RFC 7578) encoder.
//!
//! Used only when a submission carries a profile image: the five text fields
//! become text parts and the image becomes a single file part, all inside one
//! body. The boundary is a fresh v4 UUID, so it cannot collide with field
//! content in practice.

use uuid::Uuid;

use crate::types::{EmployeeFields, ImageFile};

/// Wire name of the image part, fixed by the backend contract.
pub(crate) const IMAGE_FIELD: &str = "profileImage";

/// An encoded multipart body plus the exact `Content-Type` value (with
/// boundary parameter) the request must carry.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Encode the submission fields and image into one multipart body.
pub(crate) fn encode(fields: &EmployeeFields, image: &ImageFile) -> MultipartBody {
    let boundary = format!("----employee-{}", Uuid::new_v4().simple());
    let mut bytes = Vec::with_capacity(image.bytes.len() + 512);

    for (name, value) in fields.as_pairs() {
        bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        bytes.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        bytes.extend_from_slice(value.as_bytes());
        bytes.extend_from_slice(b"\r\n");
    }

    bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    bytes.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{IMAGE_FIELD}\"; filename=\"{}\"\r\n",
            image.file_name
        )
        .as_bytes(),
    );
    bytes.extend_from_slice(format!("Content-Type: {}\r\n\r\n", image.content_type).as_bytes());
    bytes.extend_from_slice(&image.bytes);
    bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    MultipartBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        bytes,
    }
}
