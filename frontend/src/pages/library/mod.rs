use leptos::*;

pub mod components;
pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::{LibraryPanel, LibraryView};

#[component]
pub fn LibraryPage() -> impl IntoView {
    view! { <LibraryPanel /> }
}
