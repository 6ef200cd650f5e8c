use leptos::*;

use super::components::{
    admin_penalties::AdminPenaltiesTable, books::BooksTable, loans::LoansTable,
    penalties::PenaltiesSection, requests::RequestsTable, search::SearchBar,
};
use super::repository::Mutation;
use super::view_model::{use_library_view_model, LibraryViewModel};
use crate::components::{
    confirm_dialog::ConfirmDialog,
    guard::AdminOnly,
    layout::Header,
};
use crate::state::auth::use_auth;

#[component]
pub fn LibraryPanel() -> impl IntoView {
    let vm = use_library_view_model();
    create_effect(move |_| vm.load_all());
    view! { <LibraryView vm=vm /> }
}

#[component]
pub fn LibraryView(vm: LibraryViewModel) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_admin = Signal::derive(move || auth.get().is_admin());
    let on_action = Callback::new(move |mutation: Mutation| vm.request(mutation));
    let confirm_message = Signal::derive(move || {
        vm.pending_confirmation
            .get()
            .and_then(|mutation| mutation.confirmation_prompt())
            .unwrap_or_default()
            .to_string()
    });

    view! {
        <Header />
        <main id="library-section" class="container">
            <section id="books-section">
                <h2>"Books"</h2>
                <SearchBar query=vm.query on_search=Callback::new(move |_| vm.search()) />
                <BooksTable books=vm.books is_admin=is_admin on_action=on_action />
            </section>
            <section id="loans-section">
                <h2>"My loans"</h2>
                <LoansTable loans=vm.loans on_action=on_action />
            </section>
            <PenaltiesSection penalties=vm.my_penalties />
            <AdminOnly>
                <RequestsTable requests=vm.requests on_action=on_action />
                <AdminPenaltiesTable penalties=vm.all_penalties on_action=on_action />
            </AdminOnly>
        </main>
        <ConfirmDialog
            is_open=Signal::derive(move || vm.pending_confirmation.get().is_some())
            title="Please confirm"
            message=confirm_message
            on_confirm=Callback::new(move |_| vm.confirm())
            on_cancel=Callback::new(move |_| vm.cancel())
            destructive=true
        />
    }
}
