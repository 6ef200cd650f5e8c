use chrono::NaiveDate;
use leptos::*;

use crate::api::Loan;
use crate::components::table::EmptyRow;
use crate::pages::library::{
    repository::{Collection, Mutation},
    utils::{loan_urgency, status_label},
};
use crate::utils::time::{format_date, today_local};

fn loan_row(loan: Loan, today: NaiveDate, on_action: Callback<Mutation>) -> impl IntoView {
    let urgency = loan_urgency(&loan, today);
    let status = status_label(&loan, today);
    let loan_id = loan.id;
    let return_button = loan.can_return().then(|| {
        view! {
            <button
                type="button"
                class="btn"
                data-loan-id=loan_id.to_string()
                on:click=move |_| on_action.call(Mutation::Return { loan_id })
            >
                "Return"
            </button>
        }
    });
    view! {
        <tr class=urgency.row_class()>
            <td>{loan.book_title.unwrap_or_default()}</td>
            <td>{format_date(loan.loan_date)}</td>
            <td>{format_date(loan.due_date)}</td>
            <td>{status}</td>
            <td>{return_button}</td>
        </tr>
    }
}

#[component]
pub fn LoansTable(
    #[prop(into)] loans: Signal<Vec<Loan>>,
    on_action: Callback<Mutation>,
    #[prop(optional)] today: Option<NaiveDate>,
) -> impl IntoView {
    view! {
        <table id="loans-table" class="data-table">
            <thead>
                <tr>
                    <th>"Book"</th>
                    <th>"Loan date"</th>
                    <th>"Due date"</th>
                    <th>"Status"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let loans = loans.get();
                    if loans.is_empty() {
                        return view! {
                            <EmptyRow colspan=5 message=Collection::MyLoans.empty_message() />
                        }
                        .into_view();
                    }
                    let today = today.unwrap_or_else(today_local);
                    loans
                        .into_iter()
                        .map(|loan| loan_row(loan, today, on_action))
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    fn loan(id: i64, status: &str, due_date: NaiveDate) -> Loan {
        Loan {
            id,
            book_id: 1,
            book_title: Some(format!("Book {}", id)),
            loan_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            due_date,
            status: status.into(),
            return_date: None,
        }
    }

    #[test]
    fn loans_are_highlighted_by_urgency() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let html = render_to_string(move || {
            let loans = vec![
                loan(1, "borrowed", NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()),
                loan(2, "borrowed", NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()),
                loan(3, "returned", NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()),
            ];
            let loans = create_rw_signal(loans);
            view! { <LoansTable loans=loans on_action=Callback::new(|_| ()) today=today /> }
        });
        assert!(html.contains("overdue-row"));
        assert!(html.contains("Overdue (2 days)"));
        assert!(html.contains("warning-row"));
        assert!(html.contains("Due soon (2 days)"));
        assert!(html.contains("Returned"));
        assert_eq!(html.matches("data-loan-id").count(), 2);
    }

    #[test]
    fn no_loans_renders_placeholder() {
        let html = render_to_string(|| {
            let loans: RwSignal<Vec<Loan>> = create_rw_signal(Vec::new());
            view! { <LoansTable loans=loans on_action=Callback::new(|_| ()) /> }
        });
        assert!(html.contains("You have no loans yet"));
    }
}
