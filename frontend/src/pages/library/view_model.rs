use chrono::Utc;
use leptos::*;

use super::repository::{Collection, CollectionData, LibraryRepository, Mutation};
use crate::api::{ApiError, Book, Loan, LoanRequest, Penalty};
use crate::state::auth::use_api;
use crate::utils::notice::{use_notices, Notices};

#[derive(Clone, Copy)]
pub struct LibraryViewModel {
    pub query: RwSignal<String>,
    pub books: RwSignal<Vec<Book>>,
    pub loans: RwSignal<Vec<Loan>>,
    pub requests: RwSignal<Vec<LoanRequest>>,
    pub my_penalties: RwSignal<Vec<Penalty>>,
    pub all_penalties: RwSignal<Vec<Penalty>>,
    pub refreshing: RwSignal<bool>,
    pub pending_confirmation: RwSignal<Option<Mutation>>,
    repo: StoredValue<LibraryRepository>,
    notices: StoredValue<Notices>,
}

impl LibraryViewModel {
    pub fn new(repo: LibraryRepository, notices: Notices) -> Self {
        Self {
            query: create_rw_signal(String::new()),
            books: create_rw_signal(Vec::new()),
            loans: create_rw_signal(Vec::new()),
            requests: create_rw_signal(Vec::new()),
            my_penalties: create_rw_signal(Vec::new()),
            all_penalties: create_rw_signal(Vec::new()),
            refreshing: create_rw_signal(false),
            pending_confirmation: create_rw_signal(None),
            repo: store_value(repo),
            notices: store_value(notices),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.repo.with_value(LibraryRepository::is_admin)
    }

    /// Replaces the table behind `result`, or reports the failure.
    pub fn apply_result(&self, collection: Collection, result: Result<CollectionData, ApiError>) {
        match result {
            Ok(data) => self.replace(data),
            Err(err) if err.is_unauthorized() => {
                log::warn!("Loading {:?} stopped: session ended", collection)
            }
            Err(err) if collection.alerts_on_failure() => {
                self.notices.with_value(|notices| notices.alert(&err.error))
            }
            Err(err) => log::error!("Failed to load {:?}: {}", collection, err),
        }
    }

    fn replace(&self, data: CollectionData) {
        match data {
            CollectionData::Books(books) => self.books.set(books),
            CollectionData::MyLoans(loans) => self.loans.set(loans),
            CollectionData::PendingRequests(requests) => self.requests.set(requests),
            CollectionData::MyPenalties(penalties) => self.my_penalties.set(penalties),
            CollectionData::AllPenalties(penalties) => self.all_penalties.set(penalties),
        }
    }

    pub fn load_all(&self) {
        self.refresh(Collection::ALL.to_vec());
    }

    pub fn search(&self) {
        self.refresh(vec![Collection::Books]);
    }

    pub fn refresh(&self, collections: Vec<Collection>) {
        let vm = *self;
        let repo = self.repo.get_value();
        let query = self.query.get_untracked();
        spawn_local(async move {
            vm.refresh_now(&repo, &collections, &query).await;
        });
    }

    async fn refresh_now(&self, repo: &LibraryRepository, collections: &[Collection], query: &str) {
        if repo.session_expired(Utc::now()) {
            return;
        }
        self.refreshing.set(true);
        repo.refresh(collections, query, |collection, result| {
            self.apply_result(collection, result)
        })
        .await;
        self.refreshing.set(false);
    }

    /// Asks first when the mutation is destructive.
    pub fn request(&self, mutation: Mutation) {
        if mutation.confirmation_prompt().is_some() {
            self.pending_confirmation.set(Some(mutation));
        } else {
            self.run(mutation);
        }
    }

    pub fn confirm(&self) {
        if let Some(mutation) = self.pending_confirmation.get_untracked() {
            self.pending_confirmation.set(None);
            self.run(mutation);
        }
    }

    pub fn cancel(&self) {
        self.pending_confirmation.set(None);
    }

    pub fn run(&self, mutation: Mutation) {
        let vm = *self;
        let repo = self.repo.get_value();
        spawn_local(async move {
            match repo.apply(mutation).await {
                Ok(outcome) => {
                    vm.notices.with_value(|notices| notices.alert(&outcome.notice));
                    let query = vm.query.get_untracked();
                    vm.refresh_now(&repo, &outcome.invalidate, &query).await;
                }
                Err(err) if err.is_unauthorized() => {}
                Err(err) => vm.notices.with_value(|notices| notices.alert(&err.error)),
            }
        });
    }
}

pub fn use_library_view_model() -> LibraryViewModel {
    let repo = LibraryRepository::new(use_api());
    LibraryViewModel::new(repo, use_notices())
}
