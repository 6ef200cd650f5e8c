use leptos::*;

/// One row spanning the whole table, shown instead of an empty body.
#[component]
pub fn EmptyRow(colspan: u32, message: &'static str) -> impl IntoView {
    view! {
        <tr class="empty-row">
            <td colspan=colspan.to_string() style="text-align: center;">{message}</td>
        </tr>
    }
}
