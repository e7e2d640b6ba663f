//! Domain DTOs for the employee API.
//!
//! # Design
//! These types mirror the backend's wire schema but are defined independently
//! from the mock-server crate; integration tests catch schema drift. The
//! submission payload is an explicit struct listing exactly the five text
//! fields — the encoder never iterates unknown keys.

use serde::{Deserialize, Serialize};

/// A persisted employee record returned by the API.
///
/// `id` is an opaque backend-assigned string (`_id` on the wire) and only
/// exists once a create has succeeded. `salary` stays a string: the backend
/// stores it verbatim and the client never does arithmetic on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub salary: String,
    /// URL of the stored profile image, if one was ever uploaded.
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// The text fields of a create/update submission.
///
/// Exactly these five fields go on the wire, either as a JSON object or as
/// the text parts of a multipart body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub salary: String,
}

impl EmployeeFields {
    /// Field name/value pairs in wire order, for the multipart encoder.
    pub(crate) fn as_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("department", self.department.as_str()),
            ("salary", self.salary.as_str()),
        ]
    }
}

/// A raw image blob handed over by the host's file picker.
///
/// No MIME or size validation happens here; the backend decides what it
/// accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Response envelope of the mutating endpoints (create/update/delete).
///
/// `success: false` with a 2xx status is an application-level rejection; the
/// server's `message` is meant to be shown to the user verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Employee>,
}

/// Wrapper around list/get responses: `{ "data": ... }`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}
