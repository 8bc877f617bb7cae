//! データセット管理パネル
//!
//! ファイルアップロード・JSON貼り付け・削除・サンプルダウンロード

use florascan_common::{
    sample_dataset_json, saved_message, DatasetManager, DatasetView, SAMPLE_FILE_NAME,
};
use gloo::console;
use gloo::dialogs::{alert, confirm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::download::download_json;
use crate::storage::BrowserStore;

const CLEAR_PROMPT: &str = "Clear the current dataset? The default plants will show on Home again.";

fn manager() -> DatasetManager<BrowserStore> {
    DatasetManager::new(BrowserStore)
}

#[component]
pub fn DatasetPanel() -> impl IntoView {
    let dataset_view = RwSignal::new(manager().refresh_view());
    let (paste_text, set_paste_text) = signal(String::new());

    let refresh = move || dataset_view.set(manager().refresh_view());

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        spawn_local(async move {
            let file = gloo::file::File::from(file);
            let text = match gloo::file::futures::read_as_text(&file).await {
                Ok(text) => text,
                Err(e) => {
                    console::warn!(format!("file read failed: {}", e));
                    return;
                }
            };

            match manager().import_upload(&file.name(), &text) {
                Ok(count) => {
                    refresh();
                    input.set_value("");
                    alert(&saved_message(count));
                }
                Err(e) => alert(&e.to_string()),
            }
        });
    };

    let on_save_paste = move |_| {
        match manager().import_paste(&paste_text.get_untracked()) {
            Ok(count) => {
                refresh();
                alert(&saved_message(count));
            }
            Err(e) => alert(&e.to_string()),
        }
    };

    let on_clear = move |_| {
        if !confirm(CLEAR_PROMPT) {
            return;
        }
        if let Err(e) = manager().clear() {
            console::error!(e.to_string());
        }
        refresh();
    };

    let on_download_sample = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        let result = sample_dataset_json()
            .map_err(|e| e.to_string())
            .and_then(|json| download_json(SAMPLE_FILE_NAME, &json).map_err(|e| format!("{:?}", e)));
        if let Err(e) = result {
            console::error!(e);
        }
    };

    view! {
        <section class="dataset-panel">
            <div class="form-group">
                <label for="dataset-file">"Upload CSV or JSON"</label>
                <input
                    type="file"
                    id="dataset-file"
                    accept=".csv,.json,application/json,text/csv"
                    on:change=on_file_change
                />
                <a href="#" class="sample-link" on:click=on_download_sample>
                    "Download sample dataset"
                </a>
            </div>

            <div class="form-group">
                <label for="dataset-paste">"Or paste JSON"</label>
                <textarea
                    id="dataset-paste"
                    rows="8"
                    placeholder="[{\"name\": \"Spider Plant\", \"scientificName\": \"Chlorophytum comosum\"}]"
                    prop:value=move || paste_text.get()
                    on:input=move |ev| set_paste_text.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" on:click=on_save_paste>
                    "Save dataset"
                </button>
            </div>

            <DatasetPreview dataset_view=dataset_view />

            <button
                class="btn btn-tertiary"
                style:display=move || if dataset_view.get().show_clear { "inline-flex" } else { "none" }
                on:click=on_clear
            >
                "Clear dataset"
            </button>
        </section>
    }
}

#[component]
fn DatasetPreview(dataset_view: RwSignal<DatasetView>) -> impl IntoView {
    view! {
        <p class="dataset-status">{move || dataset_view.get().status}</p>
        <div class="dataset-preview">
            {move || {
                dataset_view
                    .get()
                    .items
                    .into_iter()
                    .map(|item| {
                        view! {
                            <div class="preview-item">
                                {item.name}" "<em>{item.scientific_name}</em>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            {move || {
                dataset_view
                    .get()
                    .more_label()
                    .map(|label| view! { <div class="preview-item">{label}</div> })
            }}
        </div>
    }
}
