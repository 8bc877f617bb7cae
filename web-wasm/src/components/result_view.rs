//! 識別結果ページ

use florascan_common::{IdentificationResult, ResultSlot};
use leptos::prelude::*;

use crate::storage::BrowserStore;

/// 保存済みの識別結果を表示する
#[component]
pub fn ResultView(result: ReadSignal<Option<IdentificationResult>>) -> impl IntoView {
    view! {
        <section class="section result-view">
            {move || match result.get() {
                Some(result) => view! { <ResultCard result=result /> }.into_any(),
                None => view! {
                    <p class="text-muted">"No identification yet. Take or upload a photo first."</p>
                }
                .into_any(),
            }}
        </section>
    }
}

#[component]
fn ResultCard(result: IdentificationResult) -> impl IntoView {
    let image = (!result.image.is_empty()).then_some(result.image);
    let characteristics = result
        .characteristics
        .into_iter()
        .map(|c| view! { <li>{c}</li> })
        .collect_view();

    view! {
        <div class="result-card">
            {image.map(|src| view! { <img class="result-image" src=src alt="Identified plant" /> })}
            <h2>{result.name}</h2>
            <p class="scientific-name"><em>{result.scientific_name}</em></p>
            <span class="confidence">{result.confidence}</span>

            <dl class="result-facts">
                <dt>"Family"</dt><dd>{result.family}</dd>
                <dt>"Category"</dt><dd>{result.category}</dd>
                <dt>"Origin"</dt><dd>{result.origin}</dd>
            </dl>

            <h3>"Definition"</h3>
            <p>{result.definition}</p>
            <h3>"Description"</h3>
            <p>{result.description}</p>
            <h3>"Characteristics"</h3>
            <ul>{characteristics}</ul>
            <h3>"Care"</h3>
            <p>{result.care}</p>
        </div>
    }
}

/// 結果スロットから読み込む（なければNone）
pub fn load_saved_result() -> Option<IdentificationResult> {
    ResultSlot::new(BrowserStore).load()
}
