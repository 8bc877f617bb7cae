//! 撮影エリアコンポーネント
//!
//! プレースホルダ・ライブカメラ・プレビューのいずれか1つを表示する

use florascan_common::{
    acquire_camera, is_image_mime_type, is_mobile_user_agent, CameraOutcome, CaptureMode,
    CaptureSession,
};
use gloo::console;
use gloo::dialogs::confirm;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use crate::camera::BrowserCamera;

fn is_mobile_device() -> bool {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| is_mobile_user_agent(&ua))
        .unwrap_or(false)
}

#[component]
pub fn CaptureArea(set_staged_image: WriteSignal<Option<String>>) -> impl IntoView {
    let photo_input = NodeRef::<html::Input>::new();
    let camera_input = NodeRef::<html::Input>::new();
    let video = NodeRef::<html::Video>::new();

    let camera = BrowserCamera::new(video, camera_input);
    let session = StoredValue::new_local(CaptureSession::new(camera));
    let (mode, set_mode) = signal(CaptureMode::Empty);
    let (preview, set_preview) = signal(None::<String>);

    // セッションの状態を表示用シグナルへ反映
    let sync = move || {
        session.with_value(|s| {
            let staged = s.staged_image().map(str::to_string);
            set_mode.set(s.mode());
            set_preview.set(staged.clone());
            set_staged_image.set(staged);
        });
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        if !is_image_mime_type(&file.type_()) {
            return;
        }

        spawn_local(async move {
            let file = gloo::file::File::from(file);
            match gloo::file::futures::read_as_data_url(&file).await {
                Ok(data_url) => {
                    session.update_value(|s| s.stage_image(data_url));
                    sync();
                }
                Err(e) => console::warn!(format!("image read failed: {}", e)),
            }
        });
    };

    let open_file_picker = move || {
        if let Some(input) = photo_input.get_untracked() {
            input.click();
        }
    };

    let on_upload = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        open_file_picker();
    };

    let on_camera = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        let is_mobile = is_mobile_device();
        spawn_local(async move {
            if let CameraOutcome::Live(stream) = acquire_camera(&camera, is_mobile).await {
                session.update_value(|s| {
                    if let Err(e) = s.enter_live_camera(stream) {
                        console::warn!(e.to_string());
                    }
                });
                sync();
            }
        });
    };

    let on_snapshot = move |_| {
        session.update_value(|s| {
            if let Err(e) = s.take_snapshot() {
                console::warn!(e.to_string());
            }
        });
        sync();
    };

    let on_close_camera = move |_| {
        session.update_value(|s| s.close_camera());
        sync();
    };

    let on_preview_click = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        let confirmed = confirm("Remove this photo?");
        session.update_value(|s| {
            s.remove_image(confirmed);
        });
        sync();
    };

    view! {
        <div
            class="photo-upload-area"
            class:has-image=move || mode.get() == CaptureMode::Previewing
        >
            <div
                class="upload-placeholder"
                style:display=move || if mode.get() == CaptureMode::Empty { "flex" } else { "none" }
                on:click=move |_| open_file_picker()
            >
                <div class="upload-icon">"📷"</div>
                <p>"Upload a photo or take a picture of the plant"</p>
                <div class="upload-actions">
                    <button class="btn btn-secondary" on:click=on_upload>"Upload"</button>
                    <button class="btn btn-primary" on:click=on_camera>"Take photo"</button>
                </div>
            </div>

            <div
                class="camera-live"
                style:display=move || if mode.get() == CaptureMode::LiveCamera { "block" } else { "none" }
            >
                <video node_ref=video autoplay=true playsinline=true muted=true />
                <div class="camera-actions">
                    <button class="btn btn-primary" on:click=on_snapshot>"Capture"</button>
                    <button class="btn btn-tertiary" on:click=on_close_camera>"Close"</button>
                </div>
            </div>

            <img
                class="preview-image"
                alt="Plant preview"
                src=move || preview.get().unwrap_or_default()
                style:display=move || if mode.get() == CaptureMode::Previewing { "block" } else { "none" }
                on:click=on_preview_click
            />

            <input
                node_ref=photo_input
                type="file"
                accept="image/*"
                style="display: none"
                on:change=on_file_change
            />
            <input
                node_ref=camera_input
                type="file"
                accept="image/*"
                capture="environment"
                style="display: none"
                on:change=on_file_change
            />
        </div>
    }
}
