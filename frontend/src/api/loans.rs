use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, CreateLoanRequest, Loan, LoanRequest, MessageResponse, Penalty},
};

impl ApiClient {
    /// Admins get a loan straight away; everyone else files a request.
    pub async fn create_loan(&self, book_id: i64, days: u32) -> Result<MessageResponse, ApiError> {
        self.post_json("/loans/", &CreateLoanRequest { book_id, days })
            .await
    }

    pub async fn my_loans(&self) -> Result<Vec<Loan>, ApiError> {
        self.get_json("/loans/my").await
    }

    pub async fn return_loan(&self, loan_id: i64) -> Result<MessageResponse, ApiError> {
        self.post_json(&format!("/loans/{}/return", loan_id), &json!({}))
            .await
    }

    pub async fn pending_requests(&self) -> Result<Vec<LoanRequest>, ApiError> {
        self.get_json("/loans/requests").await
    }

    pub async fn approve_request(&self, request_id: i64) -> Result<MessageResponse, ApiError> {
        self.post_json(&format!("/loans/{}/approve", request_id), &json!({}))
            .await
    }

    pub async fn reject_request(&self, request_id: i64) -> Result<MessageResponse, ApiError> {
        self.post_json(&format!("/loans/{}/reject", request_id), &json!({}))
            .await
    }

    pub async fn my_penalties(&self) -> Result<Vec<Penalty>, ApiError> {
        self.get_json("/loans/penalties").await
    }
}
