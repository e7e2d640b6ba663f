//! Employee form controller: transient form state, create/update mode, and
//! the submission state machine.
//!
//! # Design
//! The controller is sans-IO like the rest of the core. `submit` hands the
//! host a [`SubmitTicket`] carrying the fully built `HttpRequest`; the host
//! runs the round-trip and feeds the outcome back through
//! [`EmployeeForm::complete_submit`], which returns the UI side effects
//! ([`Effects`]) as data: at most one notification plus a flag telling the
//! host to re-fetch the employee list.
//!
//! Two guards close historical races:
//! - `submit` refuses while a previous submission is unresolved, so a rapid
//!   double-click cannot fire two requests.
//! - Every ticket carries a generation number. Completions whose generation
//!   no longer matches (the form was closed or resubmitted meanwhile) are
//!   discarded without side effects.

use thiserror::Error;

use crate::client::EmployeeClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::types::{ApiEnvelope, Employee, EmployeeFields, ImageFile};

/// Whether the form was opened blank or seeded from an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// One of the five editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Department,
    Salary,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Department => "department",
            Field::Salary => "salary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

/// A toast for the host's `notify(message, kind)` sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotifyKind,
    pub message: String,
}

/// Side effects of a completed submission, applied by the host: show the
/// notification (if any) and re-fetch the employee list when `refresh` is
/// set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Effects {
    pub notification: Option<Notification>,
    pub refresh: bool,
}

impl Effects {
    fn none() -> Self {
        Self::default()
    }

    fn notify(kind: NotifyKind, message: impl Into<String>, refresh: bool) -> Self {
        Self {
            notification: Some(Notification {
                kind,
                message: message.into(),
            }),
            refresh,
        }
    }
}

/// Why `submit` refused to produce a request.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form is not open")]
    Closed,

    #[error("a submission is already in flight")]
    SubmitInFlight,

    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// An issued submission awaiting its round-trip result.
///
/// The host executes `request` and passes the ticket back to
/// [`EmployeeForm::complete_submit`] together with the parsed outcome.
#[derive(Debug)]
pub struct SubmitTicket {
    pub request: HttpRequest,
    mode: FormMode,
    generation: u64,
}

/// Owns the transient form state and the create/update workflow.
#[derive(Debug)]
pub struct EmployeeForm {
    fields: EmployeeFields,
    image: Option<ImageFile>,
    editing_id: Option<String>,
    mode: FormMode,
    visible: bool,
    generation: u64,
    in_flight: Option<u64>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self {
            fields: EmployeeFields::default(),
            image: None,
            editing_id: None,
            mode: FormMode::Create,
            visible: false,
            generation: 0,
            in_flight: None,
        }
    }

    /// Open the form: blank in create mode, or seeded from `existing` in
    /// update mode. The image slot always starts empty — on update, "no new
    /// file chosen" means the server keeps the stored one.
    pub fn open(&mut self, existing: Option<&Employee>) {
        match existing {
            Some(employee) => {
                self.fields = EmployeeFields {
                    name: employee.name.clone(),
                    email: employee.email.clone(),
                    phone: employee.phone.clone(),
                    department: employee.department.clone(),
                    salary: employee.salary.clone(),
                };
                self.editing_id = Some(employee.id.clone());
                self.mode = FormMode::Update;
            }
            None => {
                self.fields = EmployeeFields::default();
                self.editing_id = None;
                self.mode = FormMode::Create;
            }
        }
        self.image = None;
        self.visible = true;
    }

    /// Merge one field edit into the draft. No cross-field validation.
    pub fn set_field(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Name => &mut self.fields.name,
            Field::Email => &mut self.fields.email,
            Field::Phone => &mut self.fields.phone,
            Field::Department => &mut self.fields.department,
            Field::Salary => &mut self.fields.salary,
        };
        *slot = value.to_string();
    }

    /// Attach a freshly picked image. MIME type and size are not checked
    /// here; the backend decides what it accepts.
    pub fn set_image(&mut self, image: ImageFile) {
        self.image = Some(image);
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &EmployeeFields {
        &self.fields
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    /// Build the create/update request for the current draft.
    ///
    /// Refuses when the form is closed, when a submission is already in
    /// flight, or when a required field is empty — the only validation this
    /// form performs.
    pub fn submit(&mut self, client: &EmployeeClient) -> Result<SubmitTicket, FormError> {
        if !self.visible {
            return Err(FormError::Closed);
        }
        if self.in_flight.is_some() {
            return Err(FormError::SubmitInFlight);
        }
        for field in [
            Field::Name,
            Field::Email,
            Field::Phone,
            Field::Department,
            Field::Salary,
        ] {
            if self.field_value(field).trim().is_empty() {
                return Err(FormError::MissingField(field.label()));
            }
        }

        let request = match self.mode {
            FormMode::Create => client.build_create_employee(&self.fields, self.image.as_ref())?,
            FormMode::Update => {
                // open(Some(_)) is the only way into update mode, so the id
                // is always present here.
                let id = self.editing_id.as_deref().unwrap_or_default();
                client.build_update_employee(id, &self.fields, self.image.as_ref())?
            }
        };

        self.generation += 1;
        self.in_flight = Some(self.generation);
        Ok(SubmitTicket {
            request,
            mode: self.mode,
            generation: self.generation,
        })
    }

    /// Apply the round-trip outcome of an issued ticket.
    ///
    /// Stale tickets — the form was closed or a newer submission was issued
    /// since — are discarded without side effects. Otherwise:
    /// - `success: true` → success toast with the server message, list
    ///   refresh, reset and close;
    /// - `success: false` → error toast with the server message, state kept
    ///   for a corrected resubmit;
    /// - transport/parse failure → generic error toast, state kept.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<ApiEnvelope, ApiError>,
    ) -> Effects {
        if self.in_flight != Some(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                "discarding stale submission completion"
            );
            return Effects::none();
        }
        self.in_flight = None;

        match result {
            Ok(envelope) if envelope.success => {
                self.reset();
                Effects::notify(NotifyKind::Success, envelope.message, true)
            }
            Ok(envelope) => Effects::notify(NotifyKind::Error, envelope.message, false),
            Err(error) => {
                tracing::error!(%error, "employee submission failed");
                let message = match ticket.mode {
                    FormMode::Create => "Failed to create Employee",
                    FormMode::Update => "Failed to update Employee",
                };
                Effects::notify(NotifyKind::Error, message, false)
            }
        }
    }

    /// Close and reset, regardless of any pending submission; its eventual
    /// completion will be discarded by the generation check.
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.fields = EmployeeFields::default();
        self.image = None;
        self.editing_id = None;
        self.mode = FormMode::Create;
        self.visible = false;
        self.in_flight = None;
    }

    fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.fields.name,
            Field::Email => &self.fields.email,
            Field::Phone => &self.fields.phone,
            Field::Department => &self.fields.department,
            Field::Salary => &self.fields.salary,
        }
    }
}
