//! Stateless HTTP request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Create and update pick their encoding from the presence of an image: a
//! flat JSON object when there is none, multipart/form-data when there is.
//! Every non-2xx response is logged with its body as diagnostic text and
//! surfaced as a transport failure; nothing here retries.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart;
use crate::types::{ApiEnvelope, DataEnvelope, Employee, EmployeeFields, ImageFile};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Stateless client for the employee API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base_url: String,
}

impl EmployeeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET `/api/employees?search=&page=&limit=`.
    ///
    /// `page` is 1-based; the server decides ordering and returns one page
    /// slice.
    pub fn build_list_employees(&self, search: &str, page: u32, limit: u32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!(
                "{}/api/employees?search={search}&page={page}&limit={limit}",
                self.base_url
            ),
            headers: json_headers(),
            body: None,
        }
    }

    /// GET `/api/employees/{id}`.
    pub fn build_get_employee(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/api/employees/{id}", self.base_url),
            headers: json_headers(),
            body: None,
        }
    }

    /// POST `/api/employees` — multipart iff `image` is present, JSON
    /// otherwise.
    pub fn build_create_employee(
        &self,
        fields: &EmployeeFields,
        image: Option<&ImageFile>,
    ) -> Result<HttpRequest, ApiError> {
        let (headers, body) = encode_submission(fields, image)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/api/employees", self.base_url),
            headers,
            body: Some(body),
        })
    }

    /// PUT `/api/employees/{id}` — same encoding rule as create. An absent
    /// image means "keep the existing one" on the server.
    pub fn build_update_employee(
        &self,
        id: &str,
        fields: &EmployeeFields,
        image: Option<&ImageFile>,
    ) -> Result<HttpRequest, ApiError> {
        let (headers, body) = encode_submission(fields, image)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/api/employees/{id}", self.base_url),
            headers,
            body: Some(body),
        })
    }

    /// DELETE `/api/employees/{id}`.
    pub fn build_delete_employee(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/api/employees/{id}", self.base_url),
            headers: json_headers(),
            body: None,
        }
    }

    /// Unwrap `{ "data": [...] }` into the employees in server order.
    pub fn parse_list_employees(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        check_status(&response, false)?;
        let envelope: DataEnvelope<Vec<Employee>> = parse_json(&response.body)?;
        Ok(envelope.data)
    }

    /// Unwrap `{ "data": {...} }` into the single employee; 404 → `NotFound`.
    pub fn parse_get_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response, true)?;
        let envelope: DataEnvelope<Employee> = parse_json(&response.body)?;
        Ok(envelope.data)
    }

    /// The full `{success, message, data?}` envelope; the caller decides what
    /// a `success: false` means for its UI state.
    pub fn parse_create_employee(&self, response: HttpResponse) -> Result<ApiEnvelope, ApiError> {
        check_status(&response, false)?;
        parse_json(&response.body)
    }

    pub fn parse_update_employee(&self, response: HttpResponse) -> Result<ApiEnvelope, ApiError> {
        check_status(&response, false)?;
        parse_json(&response.body)
    }

    /// Delete envelope carries no `data`; 404 → `NotFound`.
    pub fn parse_delete_employee(&self, response: HttpResponse) -> Result<ApiEnvelope, ApiError> {
        check_status(&response, true)?;
        parse_json(&response.body)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())]
}

/// Pick the body encoding: multipart when an image rides along, flat JSON
/// otherwise. Returns the headers to send with the encoded bytes.
fn encode_submission(
    fields: &EmployeeFields,
    image: Option<&ImageFile>,
) -> Result<(Vec<(String, String)>, Vec<u8>), ApiError> {
    match image {
        Some(image) => {
            let body = multipart::encode(fields, image);
            Ok((
                vec![("content-type".to_string(), body.content_type)],
                body.bytes,
            ))
        }
        None => {
            let body = serde_json::to_vec(fields).map_err(|e| ApiError::Encode(e.to_string()))?;
            Ok((json_headers(), body))
        }
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Treat any non-2xx status as a failure: log the body as diagnostic text and
/// map to `NotFound` (when the operation distinguishes it) or `Transport`.
fn check_status(response: &HttpResponse, not_found_is_distinct: bool) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    tracing::error!(
        status = response.status,
        body = %response.body,
        "employee API request failed"
    );
    if not_found_is_distinct && response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Transport {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EmployeeClient {
        EmployeeClient::new("http://localhost:8080")
    }

    fn fields() -> EmployeeFields {
        EmployeeFields {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            department: "Engineering".to_string(),
            salary: "90000".to_string(),
        }
    }

    fn image() -> ImageFile {
        ImageFile {
            file_name: "ada.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3, 4],
        }
    }

    fn employee_json(id: &str, name: &str) -> String {
        format!(
            r#"{{"_id":"{id}","name":"{name}","email":"a@b.c","phone":"5","department":"Eng","salary":"1"}}"#
        )
    }

    #[test]
    fn build_list_employees_produces_correct_request() {
        let req = client().build_list_employees("ada", 2, 5);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:8080/api/employees?search=ada&page=2&limit=5"
        );
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_employee_produces_correct_request() {
        let req = client().build_get_employee("65f2");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/api/employees/65f2");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_without_image_is_flat_json() {
        let req = client().build_create_employee(&fields(), None).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8080/api/employees");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Ada Lovelace");
        assert_eq!(body["salary"], "90000");
        assert!(body.get("profileImage").is_none());
    }

    #[test]
    fn build_create_with_image_is_multipart() {
        let req = client()
            .build_create_employee(&fields(), Some(&image()))
            .unwrap();
        let content_type = req.header("content-type").unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let body = req.body.unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("name=\"profileImage\""));
        assert!(text.contains("Ada Lovelace"));
    }

    #[test]
    fn build_update_targets_the_id_path() {
        let req = client()
            .build_update_employee("65f2", &fields(), None)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:8080/api/employees/65f2");
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn build_delete_employee_produces_correct_request() {
        let req = client().build_delete_employee("65f2");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:8080/api/employees/65f2");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_preserves_server_order() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: format!(
                r#"{{"data":[{},{}]}}"#,
                employee_json("1", "First"),
                employee_json("2", "Second")
            ),
        };
        let employees = client().parse_list_employees(response).unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].name, "First");
        assert_eq!(employees[1].name, "Second");
    }

    #[test]
    fn parse_get_employee_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: "Employee not found".to_string(),
        };
        let err = client().parse_get_employee(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_returns_the_envelope() {
        let response = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: format!(
                r#"{{"success":true,"message":"Employee created successfully","data":{}}}"#,
                employee_json("9", "Ada")
            ),
        };
        let envelope = client().parse_create_employee(response).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message, "Employee created successfully");
        assert_eq!(envelope.data.unwrap().id, "9");
    }

    #[test]
    fn parse_create_keeps_success_false_as_data() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"success":false,"message":"Email already exists"}"#.to_string(),
        };
        let envelope = client().parse_create_employee(response).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message, "Email already exists");
    }

    #[test]
    fn parse_create_non_2xx_is_transport_error() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_create_employee(response).unwrap_err();
        assert!(matches!(err, ApiError::Transport { status: 500, .. }));
    }

    #[test]
    fn parse_delete_not_found_is_an_error_not_an_envelope() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: "Employee not found".to_string(),
        };
        let err = client().parse_delete_employee(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"success":true,"message":"Employee deleted successfully"}"#.to_string(),
        };
        let envelope = client().parse_delete_employee(response).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn parse_list_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = client().parse_list_employees(response).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = EmployeeClient::new("http://localhost:8080/");
        let req = client.build_get_employee("1");
        assert_eq!(req.url, "http://localhost:8080/api/employees/1");
    }

    #[test]
    fn any_2xx_status_is_accepted() {
        let response = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: r#"{"success":true,"message":"ok"}"#.to_string(),
        };
        assert!(client().parse_create_employee(response).is_ok());
    }
}
