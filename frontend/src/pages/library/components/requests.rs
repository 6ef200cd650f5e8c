use leptos::*;

use crate::api::LoanRequest;
use crate::components::table::EmptyRow;
use crate::pages::library::repository::{Collection, Mutation};
use crate::utils::time::format_date;

fn request_row(request: LoanRequest, on_action: Callback<Mutation>) -> impl IntoView {
    let request_id = request.id;
    view! {
        <tr>
            <td>{request.user_name.unwrap_or_default()}</td>
            <td>{request.user_email.unwrap_or_default()}</td>
            <td>{request.book_title.unwrap_or_default()}</td>
            <td>{request.book_available}</td>
            <td>{format_date(request.request_date)}</td>
            <td>
                <button
                    type="button"
                    class="btn approve-btn"
                    on:click=move |_| on_action.call(Mutation::Approve { request_id })
                >
                    "Approve"
                </button>
                <button
                    type="button"
                    class="btn reject-btn"
                    on:click=move |_| on_action.call(Mutation::Reject { request_id })
                >
                    "Reject"
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn RequestsTable(
    #[prop(into)] requests: Signal<Vec<LoanRequest>>,
    on_action: Callback<Mutation>,
) -> impl IntoView {
    view! {
        <section id="requests-section">
            <h2>"Pending requests"</h2>
            <table id="requests-table" class="data-table">
                <thead>
                    <tr>
                        <th>"User"</th>
                        <th>"Email"</th>
                        <th>"Book"</th>
                        <th>"Available"</th>
                        <th>"Requested"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let requests = requests.get();
                        if requests.is_empty() {
                            return view! {
                                <EmptyRow colspan=6 message=Collection::PendingRequests.empty_message() />
                            }
                            .into_view();
                        }
                        requests
                            .into_iter()
                            .map(|request| request_row(request, on_action))
                            .collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}
