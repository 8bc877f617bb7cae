//! メインアプリケーションコンポーネント

use florascan_common::IdentificationResult;
use leptos::prelude::*;

use crate::components::{
    capture_area::CaptureArea,
    dataset_panel::DatasetPanel,
    header::Header,
    identify_form::IdentifyForm,
    result_view::{load_saved_result, ResultView},
};

/// 表示中のページ
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Identify,
    Dataset,
    Result,
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::Identify);
    let (staged_image, set_staged_image) = signal(None::<String>);
    let (result, set_result) = signal(load_saved_result());

    // 識別完了で結果ページへ
    let on_identified = move |identified: IdentificationResult| {
        set_result.set(Some(identified));
        set_page.set(Page::Result);
    };

    // ページは表示切替のみ。撮影セッションは常に生きている
    let shown = move |target: Page| if page.get() == target { "block" } else { "none" };

    view! {
        <div class="container">
            <Header page=page set_page=set_page />

            <main>
                <div style:display=move || shown(Page::Identify)>
                    <CaptureArea set_staged_image=set_staged_image />
                    <IdentifyForm staged_image=staged_image on_identified=on_identified />
                </div>
                <div style:display=move || shown(Page::Dataset)>
                    <DatasetPanel />
                </div>
                <div style:display=move || shown(Page::Result)>
                    <ResultView result=result />
                </div>
            </main>
        </div>
    }
}
