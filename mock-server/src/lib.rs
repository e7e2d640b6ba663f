//! In-memory implementation of the employee REST backend, used as the live
//! collaborator in tests and for manual client runs.
//!
//! Mutating endpoints answer with the `{success, message, data?}` envelope;
//! list/get answer with a `{data}` wrapper. Error statuses carry plain-text
//! bodies, never the envelope. Create and update accept either a flat JSON
//! object or multipart/form-data, switching on the request Content-Type the
//! same way the real backend does.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub salary: String,
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Envelope returned by create/update/delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Employee>,
}

/// Wrapper returned by list and get.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Text fields of a submission; every field defaults to empty so partial
/// bodies are stored as-is (required-field checks are the client's job).
#[derive(Debug, Default, Deserialize)]
struct EmployeeInput {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    salary: String,
}

/// A decoded create/update body: the text fields plus the uploaded image's
/// filename, when the request was multipart and carried one.
struct Submission {
    input: EmployeeInput,
    image_file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    search: String,
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    5
}

/// Insertion order doubles as the server-determined list order.
pub type Db = Arc<RwLock<Vec<Employee>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_employees(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Json<DataResponse<Vec<Employee>>> {
    let employees = db.read().await;
    let needle = query.search.to_lowercase();
    let page = query.page.max(1);
    let limit = query.limit.max(1);
    let data: Vec<Employee> = employees
        .iter()
        .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect();
    Json(DataResponse { data })
}

async fn get_employee(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Employee>>, (StatusCode, String)> {
    let employees = db.read().await;
    employees
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .map(|data| Json(DataResponse { data }))
        .ok_or(not_found())
}

async fn create_employee(State(db): State<Db>, req: Request) -> Response {
    let submission = match read_submission(req).await {
        Ok(submission) => submission,
        Err(rejection) => return rejection,
    };

    let mut employees = db.write().await;
    if employees.iter().any(|e| e.email == submission.input.email) {
        return application_error("Employee with this email already exists");
    }

    let id = Uuid::new_v4().simple().to_string();
    let employee = Employee {
        profile_image: submission
            .image_file_name
            .as_deref()
            .map(|name| stored_image_url(&id, name)),
        id,
        name: submission.input.name,
        email: submission.input.email,
        phone: submission.input.phone,
        department: submission.input.department,
        salary: submission.input.salary,
    };
    tracing::info!(id = %employee.id, name = %employee.name, "employee created");
    employees.push(employee.clone());

    (
        StatusCode::CREATED,
        Json(Envelope {
            success: true,
            message: "Employee created successfully".to_string(),
            data: Some(employee),
        }),
    )
        .into_response()
}

async fn update_employee(State(db): State<Db>, Path(id): Path<String>, req: Request) -> Response {
    let submission = match read_submission(req).await {
        Ok(submission) => submission,
        Err(rejection) => return rejection,
    };

    let mut employees = db.write().await;
    if employees
        .iter()
        .any(|e| e.id != id && e.email == submission.input.email)
    {
        return application_error("Employee with this email already exists");
    }
    let Some(employee) = employees.iter_mut().find(|e| e.id == id) else {
        return not_found().into_response();
    };

    employee.name = submission.input.name;
    employee.email = submission.input.email;
    employee.phone = submission.input.phone;
    employee.department = submission.input.department;
    employee.salary = submission.input.salary;
    // No image part means the stored image stays.
    if let Some(name) = submission.image_file_name.as_deref() {
        employee.profile_image = Some(stored_image_url(&id, name));
    }
    tracing::info!(id = %employee.id, "employee updated");

    Json(Envelope {
        success: true,
        message: "Employee updated successfully".to_string(),
        data: Some(employee.clone()),
    })
    .into_response()
}

async fn delete_employee(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>, (StatusCode, String)> {
    let mut employees = db.write().await;
    let before = employees.len();
    employees.retain(|e| e.id != id);
    if employees.len() == before {
        return Err(not_found());
    }
    tracing::info!(%id, "employee deleted");
    Ok(Json(Envelope {
        success: true,
        message: "Employee deleted successfully".to_string(),
        data: None,
    }))
}

/// Decode a create/update body as multipart or JSON, depending on the
/// request's Content-Type.
async fn read_submission(req: Request) -> Result<Submission, Response> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        let Json(input) = Json::<EmployeeInput>::from_request(req, &())
            .await
            .map_err(|rejection| (rejection.status(), rejection.body_text()).into_response())?;
        return Ok(Submission {
            input,
            image_file_name: None,
        });
    }

    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|rejection| (rejection.status(), rejection.body_text()).into_response())?;

    let mut input = EmployeeInput::default();
    let mut image_file_name = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), e.body_text()).into_response())?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "profileImage" {
            image_file_name = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (e.status(), e.body_text()).into_response())?;
            tracing::debug!(size = bytes.len(), "received profile image");
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| (e.status(), e.body_text()).into_response())?;
        match name.as_str() {
            "name" => input.name = value,
            "email" => input.email = value,
            "phone" => input.phone = value,
            "department" => input.department = value,
            "salary" => input.salary = value,
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(Submission {
        input,
        image_file_name,
    })
}

fn stored_image_url(id: &str, file_name: &str) -> String {
    format!("/uploads/{id}-{file_name}")
}

fn application_error(message: &str) -> Response {
    Json(Envelope {
        success: false,
        message: message.to_string(),
        data: None,
    })
    .into_response()
}

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Employee not found".to_string())
}
