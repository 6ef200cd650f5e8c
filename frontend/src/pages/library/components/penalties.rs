use leptos::*;

use crate::api::Penalty;
use crate::components::table::EmptyRow;
use crate::pages::library::{
    repository::Collection,
    utils::{
        penalty_restriction_label, penalty_status_label, penalty_summary_label,
        summarize_penalties,
    },
};
use crate::utils::time::format_date;

fn penalty_row(penalty: Penalty) -> impl IntoView {
    let status = penalty_status_label(&penalty);
    let restriction = penalty_restriction_label(&penalty);
    view! {
        <tr class=if penalty.is_active { "penalty-active" } else { "" }>
            <td>{penalty.book_title.unwrap_or_default()}</td>
            <td>{format!("{} days", penalty.days_late)}</td>
            <td><strong>{restriction}</strong></td>
            <td>{status}</td>
            <td>{penalty.penalty_end_date.map(format_date).unwrap_or_default()}</td>
        </tr>
    }
}

#[component]
pub fn PenaltiesSection(#[prop(into)] penalties: Signal<Vec<Penalty>>) -> impl IntoView {
    let has_active = move || {
        penalties.with(|list| {
            summarize_penalties(list)
                .map(|summary| summary.active > 0)
                .unwrap_or(false)
        })
    };
    view! {
        <section id="penalties-section">
            <h2>"My penalties"</h2>
            <div class="penalty-summary" class:penalty-summary-active=has_active>
                <span>"Restriction: "</span>
                <strong id="total-penalty-amount">
                    {move || penalties.with(|list| penalty_summary_label(list))}
                </strong>
            </div>
            <table id="penalties-table" class="data-table">
                <thead>
                    <tr>
                        <th>"Book"</th>
                        <th>"Days late"</th>
                        <th>"Restriction"</th>
                        <th>"Status"</th>
                        <th>"Ends"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let penalties = penalties.get();
                        if penalties.is_empty() {
                            return view! {
                                <EmptyRow colspan=5 message=Collection::MyPenalties.empty_message() />
                            }
                            .into_view();
                        }
                        penalties.into_iter().map(penalty_row).collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}
