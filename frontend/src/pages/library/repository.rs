use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::api::{ApiClient, ApiError, Book, Loan, LoanRequest, Penalty};
use crate::config;

use super::utils::borrow_notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    MyLoans,
    PendingRequests,
    MyPenalties,
    AllPenalties,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Books,
        Collection::MyLoans,
        Collection::MyPenalties,
        Collection::PendingRequests,
        Collection::AllPenalties,
    ];

    pub fn admin_only(self) -> bool {
        matches!(self, Collection::PendingRequests | Collection::AllPenalties)
    }

    /// Failed background loads of the other collections are only logged.
    pub fn alerts_on_failure(self) -> bool {
        matches!(self, Collection::Books | Collection::MyLoans)
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Collection::Books => "No books found",
            Collection::MyLoans => "You have no loans yet",
            Collection::PendingRequests => "No pending requests",
            Collection::MyPenalties => "You have no penalty records",
            Collection::AllPenalties => "No penalty records",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Borrow { book_id: i64 },
    Return { loan_id: i64 },
    Approve { request_id: i64 },
    Reject { request_id: i64 },
    RemovePenalty { penalty_id: i64 },
}

impl Mutation {
    pub fn invalidates(self) -> &'static [Collection] {
        match self {
            Mutation::Borrow { .. } => &[
                Collection::Books,
                Collection::MyLoans,
                Collection::PendingRequests,
            ],
            Mutation::Return { .. } => &[
                Collection::Books,
                Collection::MyLoans,
                Collection::MyPenalties,
                Collection::PendingRequests,
                Collection::AllPenalties,
            ],
            Mutation::Approve { .. } => &[
                Collection::Books,
                Collection::PendingRequests,
                Collection::AllPenalties,
            ],
            Mutation::Reject { .. } => &[Collection::PendingRequests],
            Mutation::RemovePenalty { .. } => {
                &[Collection::AllPenalties, Collection::MyPenalties]
            }
        }
    }

    pub fn admin_only(self) -> bool {
        matches!(
            self,
            Mutation::Approve { .. } | Mutation::Reject { .. } | Mutation::RemovePenalty { .. }
        )
    }

    pub fn confirmation_prompt(self) -> Option<&'static str> {
        match self {
            Mutation::Reject { .. } => Some("Are you sure you want to reject this request?"),
            Mutation::RemovePenalty { .. } => {
                Some("Are you sure you want to remove this penalty?")
            }
            _ => None,
        }
    }

    fn success_notice(self, is_admin: bool) -> &'static str {
        match self {
            Mutation::Borrow { .. } => borrow_notice(is_admin),
            Mutation::Return { .. } => "Book returned!",
            Mutation::Approve { .. } => "Request approved!",
            Mutation::Reject { .. } => "Request rejected!",
            Mutation::RemovePenalty { .. } => "Penalty removed!",
        }
    }
}

/// Drops admin-only collections for non-admins and repeated entries.
pub fn refresh_plan(collections: &[Collection], is_admin: bool) -> Vec<Collection> {
    let mut plan = Vec::with_capacity(collections.len());
    for collection in collections {
        if (is_admin || !collection.admin_only()) && !plan.contains(collection) {
            plan.push(*collection);
        }
    }
    plan
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionData {
    Books(Vec<Book>),
    MyLoans(Vec<Loan>),
    PendingRequests(Vec<LoanRequest>),
    MyPenalties(Vec<Penalty>),
    AllPenalties(Vec<Penalty>),
}

impl CollectionData {
    pub fn collection(&self) -> Collection {
        match self {
            CollectionData::Books(_) => Collection::Books,
            CollectionData::MyLoans(_) => Collection::MyLoans,
            CollectionData::PendingRequests(_) => Collection::PendingRequests,
            CollectionData::MyPenalties(_) => Collection::MyPenalties,
            CollectionData::AllPenalties(_) => Collection::AllPenalties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub notice: String,
    pub invalidate: Vec<Collection>,
}

#[derive(Clone)]
pub struct LibraryRepository {
    client: Rc<ApiClient>,
    loan_days: Option<u32>,
}

impl LibraryRepository {
    pub fn new(api: ApiClient) -> Self {
        Self::new_with_client(Rc::new(api))
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self {
            client,
            loan_days: None,
        }
    }

    /// Fixes the loan length instead of reading it from the runtime config.
    pub fn with_loan_days(mut self, days: u32) -> Self {
        self.loan_days = Some(days);
        self
    }

    async fn loan_days(&self) -> u32 {
        match self.loan_days {
            Some(days) => days,
            None => config::await_default_loan_days().await,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.client.session().is_admin()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    /// Drops a session whose token has run out. True when no session is left.
    pub fn session_expired(&self, now: DateTime<Utc>) -> bool {
        let session = self.client.session();
        session.expire_if_stale(now) || !session.is_authenticated()
    }

    fn ensure_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden_role("This action requires an administrator"))
        }
    }

    pub async fn fetch(&self, collection: Collection, query: &str) -> Result<CollectionData, ApiError> {
        if collection.admin_only() {
            self.ensure_admin()?;
        }
        let api = &self.client;
        Ok(match collection {
            Collection::Books => CollectionData::Books(api.list_books(query).await?),
            Collection::MyLoans => CollectionData::MyLoans(api.my_loans().await?),
            Collection::PendingRequests => {
                CollectionData::PendingRequests(api.pending_requests().await?)
            }
            Collection::MyPenalties => CollectionData::MyPenalties(api.my_penalties().await?),
            Collection::AllPenalties => CollectionData::AllPenalties(api.all_penalties().await?),
        })
    }

    /// Sends exactly one mutating request. The caller refetches `invalidate`.
    pub async fn apply(&self, mutation: Mutation) -> Result<MutationOutcome, ApiError> {
        if mutation.admin_only() {
            self.ensure_admin()?;
        }
        let is_admin = self.is_admin();
        let api = &self.client;
        match mutation {
            Mutation::Borrow { book_id } => {
                api.create_loan(book_id, self.loan_days().await).await?
            }
            Mutation::Return { loan_id } => api.return_loan(loan_id).await?,
            Mutation::Approve { request_id } => api.approve_request(request_id).await?,
            Mutation::Reject { request_id } => api.reject_request(request_id).await?,
            Mutation::RemovePenalty { penalty_id } => api.remove_penalty(penalty_id).await?,
        };
        Ok(MutationOutcome {
            notice: mutation.success_notice(is_admin).to_string(),
            invalidate: refresh_plan(mutation.invalidates(), self.is_admin()),
        })
    }

    /// Fetches one collection after another, handing each result to `sink`.
    /// Stops once the session has ended.
    pub async fn refresh(
        &self,
        collections: &[Collection],
        query: &str,
        mut sink: impl FnMut(Collection, Result<CollectionData, ApiError>),
    ) {
        for collection in refresh_plan(collections, self.is_admin()) {
            if !self.is_authenticated() {
                log::debug!("Session ended; skipping refresh of {:?}", collection);
                break;
            }
            let result = self.fetch(collection, query).await;
            sink(collection, result);
        }
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{
        admin_user, memory_session, student_user, token_expiring_at,
    };
    use crate::state::session::SessionController;
    use chrono::{Duration, Utc};
    use httpmock::prelude::*;
    use serde_json::json;

    fn logged_in(user: crate::api::UserResponse) -> SessionController {
        let (session, _, _) = memory_session();
        session
            .login(token_expiring_at(Utc::now() + Duration::hours(1)), user)
            .unwrap();
        session
    }

    fn repo(server: &MockServer, session: &SessionController) -> LibraryRepository {
        LibraryRepository::new(ApiClient::new_with_base_url(
            server.url("/api"),
            session.clone(),
        ))
        .with_loan_days(14)
    }

    fn mock_lists(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/api/books/");
            then.status(200).json_body(json!([{
                "id": 1,
                "title": "Dune",
                "author": "Frank Herbert",
                "category": "Science Fiction",
                "available_copies": 1
            }]));
        });
        for path in [
            "/api/loans/my",
            "/api/loans/requests",
            "/api/loans/penalties",
            "/api/admin/penalties",
        ] {
            server.mock(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(json!([]));
            });
        }
    }

    #[tokio::test]
    async fn admin_approval_refreshes_books_requests_and_penalties() {
        let server = MockServer::start_async().await;
        mock_lists(&server);
        let approve = server.mock(|when, then| {
            when.method(POST).path("/api/loans/4/approve");
            then.status(200).json_body(json!({ "message": "Approved" }));
        });
        let session = logged_in(admin_user());
        let repo = repo(&server, &session);

        let outcome = repo
            .apply(Mutation::Approve { request_id: 4 })
            .await
            .unwrap();
        assert_eq!(outcome.notice, "Request approved!");
        assert_eq!(
            outcome.invalidate,
            vec![
                Collection::Books,
                Collection::PendingRequests,
                Collection::AllPenalties
            ]
        );

        let mut refreshed = Vec::new();
        repo.refresh(&outcome.invalidate, "", |collection, result| {
            assert!(result.is_ok());
            refreshed.push(collection);
        })
        .await;
        assert_eq!(refreshed, outcome.invalidate);
        approve.assert_async().await;
    }

    #[tokio::test]
    async fn non_admin_cannot_reach_admin_endpoints() {
        let server = MockServer::start_async().await;
        let approve = server.mock(|when, then| {
            when.method(POST).path("/api/loans/4/approve");
            then.status(200).json_body(json!({}));
        });
        let requests = server.mock(|when, then| {
            when.method(GET).path("/api/loans/requests");
            then.status(200).json_body(json!([]));
        });
        let session = logged_in(student_user());
        let repo = repo(&server, &session);

        let err = repo
            .apply(Mutation::Approve { request_id: 4 })
            .await
            .unwrap_err();
        assert_eq!(err.code, "FORBIDDEN_ROLE");
        let err = repo
            .fetch(Collection::PendingRequests, "")
            .await
            .unwrap_err();
        assert_eq!(err.code, "FORBIDDEN_ROLE");

        approve.assert_hits_async(0).await;
        requests.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn student_borrow_sends_configured_days_and_skips_admin_refresh() {
        let server = MockServer::start_async().await;
        mock_lists(&server);
        let borrow = server.mock(|when, then| {
            when.method(POST)
                .path("/api/loans/")
                .json_body(json!({ "book_id": 1, "days": 7 }));
            then.status(201).json_body(json!({ "message": "Requested", "id": 3 }));
        });
        let session = logged_in(student_user());
        let repo = repo(&server, &session).with_loan_days(7);

        let outcome = repo.apply(Mutation::Borrow { book_id: 1 }).await.unwrap();
        assert_eq!(
            outcome.notice,
            "Loan request sent! Waiting for admin approval."
        );
        assert_eq!(
            outcome.invalidate,
            vec![Collection::Books, Collection::MyLoans]
        );
        borrow.assert_async().await;
    }

    #[tokio::test]
    async fn borrow_reads_loan_days_from_resolved_config() {
        let server = MockServer::start_async().await;
        let expected_days = config::await_default_loan_days().await;
        let borrow = server.mock(|when, then| {
            when.method(POST)
                .path("/api/loans/")
                .json_body(json!({ "book_id": 2, "days": expected_days }));
            then.status(201).json_body(json!({ "message": "Loaned", "id": 4 }));
        });
        let session = logged_in(admin_user());
        let repo = LibraryRepository::new(ApiClient::new_with_base_url(
            server.url("/api"),
            session.clone(),
        ));

        let outcome = repo.apply(Mutation::Borrow { book_id: 2 }).await.unwrap();
        assert_eq!(outcome.notice, "Book loaned!");
        borrow.assert_async().await;
    }

    #[tokio::test]
    async fn refresh_stops_after_the_session_is_rejected() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/books/");
            then.status(401).json_body(json!({ "message": "Token expired" }));
        });
        let loans = server.mock(|when, then| {
            when.method(GET).path("/api/loans/my");
            then.status(200).json_body(json!([]));
        });
        let session = logged_in(student_user());
        let repo = repo(&server, &session);

        let mut results = Vec::new();
        repo.refresh(&Collection::ALL, "", |collection, result| {
            results.push((collection, result));
        })
        .await;

        assert_eq!(results.len(), 1);
        assert!(results[0].1.as_ref().unwrap_err().is_unauthorized());
        assert!(!session.is_authenticated());
        loans.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn search_sends_encoded_query() {
        let server = MockServer::start_async().await;
        let books = server.mock(|when, then| {
            when.method(GET)
                .path("/api/books/")
                .query_param("q", "war and peace");
            then.status(200).json_body(json!([]));
        });
        let session = logged_in(student_user());
        let repo = repo(&server, &session);

        let data = repo.fetch(Collection::Books, "war and peace").await.unwrap();
        assert_eq!(data, CollectionData::Books(Vec::new()));
        books.assert_async().await;
    }
}
