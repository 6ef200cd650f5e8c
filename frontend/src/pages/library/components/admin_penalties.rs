use leptos::*;

use crate::api::Penalty;
use crate::components::table::EmptyRow;
use crate::pages::library::{
    repository::{Collection, Mutation},
    utils::{penalty_restriction_label, penalty_status_label},
};
use crate::utils::time::format_date;

fn admin_penalty_row(penalty: Penalty, on_action: Callback<Mutation>) -> impl IntoView {
    let status = penalty_status_label(&penalty);
    let restriction = penalty_restriction_label(&penalty);
    let penalty_id = penalty.id;
    let remove_button = penalty.is_active.then(|| {
        view! {
            <button
                type="button"
                class="btn mark-paid-btn"
                data-penalty-id=penalty_id.to_string()
                on:click=move |_| on_action.call(Mutation::RemovePenalty { penalty_id })
            >
                "Remove penalty"
            </button>
        }
    });
    view! {
        <tr>
            <td>{penalty.user_name.unwrap_or_default()}</td>
            <td>{penalty.user_email.unwrap_or_default()}</td>
            <td>{penalty.book_title.unwrap_or_default()}</td>
            <td>{format!("{} days", penalty.days_late)}</td>
            <td><strong>{restriction}</strong></td>
            <td>{status}</td>
            <td>{penalty.penalty_end_date.map(format_date).unwrap_or_default()}</td>
            <td>{remove_button}</td>
        </tr>
    }
}

#[component]
pub fn AdminPenaltiesTable(
    #[prop(into)] penalties: Signal<Vec<Penalty>>,
    on_action: Callback<Mutation>,
) -> impl IntoView {
    view! {
        <section id="admin-penalties-section">
            <h2>"All penalties"</h2>
            <table id="admin-penalties-table" class="data-table">
                <thead>
                    <tr>
                        <th>"User"</th>
                        <th>"Email"</th>
                        <th>"Book"</th>
                        <th>"Days late"</th>
                        <th>"Restriction"</th>
                        <th>"Status"</th>
                        <th>"Ends"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let penalties = penalties.get();
                        if penalties.is_empty() {
                            return view! {
                                <EmptyRow colspan=8 message=Collection::AllPenalties.empty_message() />
                            }
                            .into_view();
                        }
                        penalties
                            .into_iter()
                            .map(|penalty| admin_penalty_row(penalty, on_action))
                            .collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}
