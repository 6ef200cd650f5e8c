use leptos::ev::KeyboardEvent;
use leptos::*;

#[component]
pub fn ConfirmDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] confirm_label: MaybeSignal<String>,
    #[prop(optional, into)] cancel_label: MaybeSignal<String>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let confirm_button_class = if destructive {
        "btn btn-danger"
    } else {
        "btn btn-primary"
    };

    let confirm_label_text = Signal::derive(move || {
        let text = confirm_label.get();
        if text.trim().is_empty() {
            "Yes".to_string()
        } else {
            text
        }
    });
    let title_text = Signal::derive(move || title.get());
    let message_text = Signal::derive(move || message.get());
    let cancel_label_text = Signal::derive(move || {
        let text = cancel_label.get();
        if text.trim().is_empty() {
            "No".to_string()
        } else {
            text
        }
    });

    view! {
        <Show when=move || is_open.get()>
            <div class="modal">
                <button
                    type="button"
                    aria-label="Close"
                    class="modal-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="modal-dialog"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <div class="modal-header">
                        <h2>{move || title_text.get()}</h2>
                        <button
                            type="button"
                            aria-label="Close"
                            class="modal-close"
                            on:click=move |_| on_cancel.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    <p class="modal-message">{move || message_text.get()}</p>
                    <div class="modal-actions">
                        <button
                            type="button"
                            class="btn"
                            on:click=move |_| on_cancel.call(())
                        >
                            {move || cancel_label_text.get()}
                        </button>
                        <button
                            type="button"
                            class=confirm_button_class
                            on:click=move |_| on_confirm.call(())
                        >
                            {move || confirm_label_text.get()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
