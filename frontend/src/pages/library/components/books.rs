use leptos::*;

use crate::api::Book;
use crate::components::table::EmptyRow;
use crate::pages::library::{
    repository::{Collection, Mutation},
    utils::borrow_label,
};

fn book_row(book: Book, label: &'static str, on_action: Callback<Mutation>) -> impl IntoView {
    let available = book.is_available();
    let book_id = book.id;
    view! {
        <tr>
            <td>{book.title}</td>
            <td>{book.author}</td>
            <td>{book.category}</td>
            <td>{book.available_copies}</td>
            <td>
                <button
                    type="button"
                    class=if available { "btn" } else { "btn disabled" }
                    disabled=!available
                    aria-disabled=if available { "false" } else { "true" }
                    data-book-id=book_id.to_string()
                    on:click=move |_| {
                        if available {
                            on_action.call(Mutation::Borrow { book_id });
                        }
                    }
                >
                    {label}
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn BooksTable(
    #[prop(into)] books: Signal<Vec<Book>>,
    #[prop(into)] is_admin: Signal<bool>,
    on_action: Callback<Mutation>,
) -> impl IntoView {
    view! {
        <table id="books-table" class="data-table">
            <thead>
                <tr>
                    <th>"Title"</th>
                    <th>"Author"</th>
                    <th>"Category"</th>
                    <th>"Available"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let books = books.get();
                    if books.is_empty() {
                        return view! {
                            <EmptyRow colspan=5 message=Collection::Books.empty_message() />
                        }
                        .into_view();
                    }
                    let label = borrow_label(is_admin.get());
                    books
                        .into_iter()
                        .map(|book| book_row(book, label, on_action))
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

    fn book(id: i64, title: &str, available_copies: i64) -> Book {
        Book {
            id,
            title: title.into(),
            author: "Frank Herbert".into(),
            category: "Science Fiction".into(),
            available_copies,
            isbn: None,
            total_copies: Some(3),
        }
    }

    #[test]
    fn unavailable_books_render_a_disabled_button() {
        let html = render_to_string(|| {
            let books = create_rw_signal(vec![book(1, "Dune", 0)]);
            let is_admin = Signal::derive(|| false);
            view! {
                <BooksTable
                    books=books
                    is_admin=is_admin
                    on_action=Callback::new(|_| ())
                />
            }
        });
        assert!(html.contains("aria-disabled=\"true\""));
        assert!(html.contains("btn disabled"));
        assert!(html.contains("disabled"));
        assert!(html.contains("Request"));
    }

    #[test]
    fn admins_see_borrow_label() {
        let html = render_to_string(|| {
            let books = create_rw_signal(vec![book(1, "Dune", 2)]);
            let is_admin = Signal::derive(|| true);
            view! {
                <BooksTable
                    books=books
                    is_admin=is_admin
                    on_action=Callback::new(|_| ())
                />
            }
        });
        assert!(html.contains("Borrow"));
        assert!(html.contains("aria-disabled=\"false\""));
    }

    #[test]
    fn empty_result_renders_placeholder() {
        let html = render_to_string(|| {
            let books: RwSignal<Vec<Book>> = create_rw_signal(Vec::new());
            let is_admin = Signal::derive(|| false);
            view! {
                <BooksTable books=books is_admin=is_admin on_action=Callback::new(|_| ()) />
            }
        });
        assert!(html.contains("No books found"));
        assert!(html.contains("colspan=\"5\""));
    }
}
