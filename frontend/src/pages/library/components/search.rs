use leptos::{ev::KeyboardEvent, *};

#[component]
pub fn SearchBar(query: RwSignal<String>, on_search: Callback<()>) -> impl IntoView {
    view! {
        <div class="search-bar">
            <input
                id="search-query"
                type="search"
                placeholder="Search by title, author or category"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
                on:keydown=move |ev: KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        on_search.call(());
                    }
                }
            />
            <button id="search-button" type="button" class="btn" on:click=move |_| on_search.call(())>
                "Search"
            </button>
        </div>
    }
}
