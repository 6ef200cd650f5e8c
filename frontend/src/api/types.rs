use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: String,
}

impl UserResponse {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub available_copies: i64,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub total_copies: Option<i64>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub book_id: i64,
    #[serde(default)]
    pub book_title: Option<String>,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

impl Loan {
    pub fn can_return(&self) -> bool {
        self.status == "borrowed" && self.return_date.is_none()
    }
}

/// A pending loan as the admin sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub book_id: i64,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub book_available: i64,
    pub request_date: NaiveDate,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub id: i64,
    #[serde(default)]
    pub loan_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub book_title: Option<String>,
    pub days_late: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub days_remaining: i64,
    /// Absent from the borrower's own listing.
    #[serde(default)]
    pub penalty_end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoanRequest {
    pub book_id: i64,
    pub days: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

pub const NETWORK_ERROR_MESSAGE: &str =
    "Cannot reach the server. Please make sure the backend is running.";

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNAUTHORIZED".to_string(),
            details: None,
        }
    }

    pub fn network() -> Self {
        Self {
            error: NETWORK_ERROR_MESSAGE.to_string(),
            code: "NETWORK_ERROR".to_string(),
            details: None,
        }
    }

    pub fn forbidden_role(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "FORBIDDEN_ROLE".to_string(),
            details: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.details = Some(json!({ "status": status }));
        self
    }

    pub fn status(&self) -> Option<u16> {
        self.details
            .as_ref()?
            .get("status")?
            .as_u64()
            .and_then(|s| u16::try_from(s).ok())
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_helpers_set_codes() {
        let validation = ApiError::validation("invalid payload");
        assert_eq!(validation.code, "VALIDATION_ERROR");
        assert_eq!(validation.error, "invalid payload");
        assert!(validation.details.is_none());

        assert_eq!(ApiError::unknown("something failed").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("rejected").code, "REQUEST_FAILED");
        assert!(ApiError::unauthorized("expired").is_unauthorized());
        assert_eq!(ApiError::forbidden_role("admins only").code, "FORBIDDEN_ROLE");

        let network = ApiError::network();
        assert_eq!(network.code, "NETWORK_ERROR");
        assert_eq!(network.error, NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");

        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn api_error_keeps_http_status() {
        let error = ApiError::request_failed("Not allowed").with_status(403);
        assert_eq!(error.status(), Some(403));
        assert_eq!(ApiError::network().status(), None);
    }

    #[test]
    fn user_role_decides_admin() {
        let mut user = UserResponse {
            id: 1,
            full_name: "Ada Admin".into(),
            email: "ada@example.com".into(),
            role: "admin".into(),
        };
        assert!(user.is_admin());
        user.role = "student".into();
        assert!(!user.is_admin());
        user.role = "staff".into();
        assert!(!user.is_admin());
    }

    #[test]
    fn loan_deserializes_with_optional_fields_missing() {
        let loan: Loan = serde_json::from_value(json!({
            "id": 3,
            "book_id": 9,
            "loan_date": "2025-01-02",
            "due_date": "2025-01-16",
            "status": "borrowed"
        }))
        .unwrap();
        assert!(loan.book_title.is_none());
        assert!(loan.return_date.is_none());
        assert!(loan.can_return());
    }

    #[test]
    fn returned_loans_cannot_be_returned_again() {
        let loan: Loan = serde_json::from_value(json!({
            "id": 3,
            "book_id": 9,
            "book_title": "Dune",
            "loan_date": "2025-01-02",
            "due_date": "2025-01-16",
            "status": "borrowed",
            "return_date": "2025-01-10"
        }))
        .unwrap();
        assert!(!loan.can_return());
    }

    #[test]
    fn book_availability_follows_copies() {
        let book: Book = serde_json::from_value(json!({
            "id": 1,
            "title": "Dune",
            "author": "Frank Herbert",
            "category": "Science Fiction",
            "available_copies": 0,
            "isbn": "978-0441013593",
            "total_copies": 3
        }))
        .unwrap();
        assert!(!book.is_available());
        assert_eq!(book.total_copies, Some(3));
    }

    #[test]
    fn admin_penalty_listing_carries_user_fields() {
        let penalty: Penalty = serde_json::from_value(json!({
            "id": 5,
            "user_id": 2,
            "user_name": "Sam Student",
            "user_email": "sam@example.com",
            "loan_id": 8,
            "book_title": "Dune",
            "days_late": 4,
            "penalty_end_date": "2025-02-01",
            "days_remaining": 6,
            "is_active": true,
            "created_at": "2025-01-20T10:00:00"
        }))
        .unwrap();
        assert_eq!(penalty.user_name.as_deref(), Some("Sam Student"));
        assert!(penalty.is_active);
        assert_eq!(penalty.days_remaining, 6);
        assert_eq!(penalty.penalty_end_date, NaiveDate::from_ymd_opt(2025, 2, 1));
    }

    #[test]
    fn borrower_penalty_listing_has_no_end_date() {
        let penalties: Vec<Penalty> = serde_json::from_value(json!([{
            "id": 3,
            "loan_id": 8,
            "book_title": "Dune",
            "amount": 0.0,
            "days_late": 4,
            "is_paid": false,
            "created_at": "2025-01-20T10:00:00"
        }]))
        .unwrap();
        assert_eq!(penalties.len(), 1);
        assert_eq!(penalties[0].days_late, 4);
        assert!(penalties[0].penalty_end_date.is_none());
        assert!(!penalties[0].is_active);
    }
}
