//! 識別フォーム（説明文 + 識別ボタン）

use florascan_common::{identify_and_store, IdentificationResult, ResultSlot};
use gloo::dialogs::alert;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::identify::FetchClient;
use crate::storage::BrowserStore;

#[component]
pub fn IdentifyForm<F>(staged_image: ReadSignal<Option<String>>, on_identified: F) -> impl IntoView
where
    F: Fn(IdentificationResult) + Copy + 'static,
{
    let (description, set_description) = signal(String::new());
    let (is_pending, set_is_pending) = signal(false);

    let on_identify = move |_| {
        if is_pending.get_untracked() {
            return;
        }
        let image = staged_image.get_untracked();
        let text = description.get_untracked();
        set_is_pending.set(true);

        spawn_local(async move {
            let client = FetchClient::from_page_origin();
            let slot = ResultSlot::new(BrowserStore);
            let outcome = identify_and_store(&client, &slot, image.as_deref(), &text).await;
            set_is_pending.set(false);
            match outcome {
                Ok(result) => on_identified(result),
                Err(e) => alert(&e.to_string()),
            }
        });
    };

    view! {
        <section class="section identify-form">
            <label for="plant-description">"Describe the plant (optional)"</label>
            <textarea
                id="plant-description"
                rows="3"
                placeholder="e.g. broad green leaves with white stripes"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            ></textarea>
            <button
                class="btn btn-primary btn-block"
                disabled=move || is_pending.get()
                on:click=on_identify
            >
                {move || if is_pending.get() { "Identifying..." } else { "Identify Plant" }}
            </button>
        </section>
    }
}
