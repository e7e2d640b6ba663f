//! Client core for the employee management service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `EmployeeClient` is stateless — it holds only `base_url`. Each CRUD
//!   operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `EmployeeForm` owns the transient create/update form state and turns
//!   submission outcomes into UI side effects (`Effects`) as plain data.
//! - Create/update bodies are flat JSON unless a profile image rides along,
//!   in which case they become multipart/form-data.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod multipart;
pub mod types;

pub use client::EmployeeClient;
pub use error::ApiError;
pub use form::{
    Effects, EmployeeForm, Field, FormError, FormMode, Notification, NotifyKind, SubmitTicket,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{ApiEnvelope, Employee, EmployeeFields, ImageFile};
