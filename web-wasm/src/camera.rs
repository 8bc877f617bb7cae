//! ブラウザのカメラ（getUserMedia + canvasで静止画化）

use async_trait::async_trait;
use florascan_common::{Error, ImageSource, Result};
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

const SNAPSHOT_MIME: &str = "image/jpeg";
const SNAPSHOT_QUALITY: f64 = 0.9;

/// video要素と撮影入力を参照するカメラ
///
/// 要素はマウント後に解決するのでNodeRefで持つ。
#[derive(Clone, Copy)]
pub struct BrowserCamera {
    video: NodeRef<html::Video>,
    capture_input: NodeRef<html::Input>,
}

impl BrowserCamera {
    pub fn new(video: NodeRef<html::Video>, capture_input: NodeRef<html::Input>) -> Self {
        Self { video, capture_input }
    }
}

#[async_trait(?Send)]
impl ImageSource for BrowserCamera {
    type Stream = MediaStream;

    fn supports_live_camera(&self) -> bool {
        web_sys::window()
            .map(|w| w.navigator())
            .and_then(|n| n.media_devices().ok())
            .map(|devices| !JsValue::from(devices).is_undefined())
            .unwrap_or(false)
    }

    async fn open_camera(&self) -> Result<MediaStream> {
        let window = web_sys::window().ok_or_else(|| Error::Capture("window not available".into()))?;
        let devices = window.navigator().media_devices().map_err(capture_error)?;

        let video_constraints = js_sys::Object::new();
        js_sys::Reflect::set(&video_constraints, &"facingMode".into(), &"environment".into())
            .map_err(capture_error)?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video_constraints);
        constraints.set_audio(&JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(capture_error)?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(capture_error)?
            .dyn_into()
            .map_err(capture_error)?;

        if let Some(video) = self.video.get_untracked() {
            video.set_src_object(Some(&stream));
            let _ = video.play();
        }
        Ok(stream)
    }

    fn snapshot(&self, _stream: &MediaStream) -> Result<String> {
        let video = self
            .video
            .get_untracked()
            .ok_or_else(|| Error::Capture("video element not mounted".into()))?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Capture("document not available".into()))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(capture_error)?
            .dyn_into()
            .map_err(capture_error)?;
        canvas.set_width(video.video_width());
        canvas.set_height(video.video_height());

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(capture_error)?
            .ok_or_else(|| Error::Capture("2d context not available".into()))?
            .dyn_into()
            .map_err(capture_error)?;
        context
            .draw_image_with_html_video_element(&video, 0.0, 0.0)
            .map_err(capture_error)?;

        canvas
            .to_data_url_with_type_and_encoder_options(SNAPSHOT_MIME, &JsValue::from_f64(SNAPSHOT_QUALITY))
            .map_err(capture_error)
    }

    fn release(&self, stream: MediaStream) {
        for track in stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        if let Some(video) = self.video.get_untracked() {
            video.set_src_object(None);
        }
    }

    fn open_capture_input(&self) {
        if let Some(input) = self.capture_input.get_untracked() {
            input.click();
        }
    }
}

fn capture_error<E: std::fmt::Debug>(e: E) -> Error {
    Error::Capture(format!("{:?}", e))
}
