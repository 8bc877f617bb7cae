//! ヘッダーコンポーネント

use leptos::prelude::*;
use crate::app::Page;

#[component]
pub fn Header(page: ReadSignal<Page>, set_page: WriteSignal<Page>) -> impl IntoView {
    let nav_button = move |target: Page, label: &'static str| {
        view! {
            <button
                class="nav-link"
                class:active=move || page.get() == target
                on:click=move |_| set_page.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <header class="header">
            <h1>"FloraScan"</h1>
            <nav class="nav">
                {nav_button(Page::Identify, "Identify")}
                {nav_button(Page::Dataset, "Dataset")}
                {nav_button(Page::Result, "Result")}
            </nav>
        </header>
    }
}
