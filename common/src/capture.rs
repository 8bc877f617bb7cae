//! 撮影エリアの状態管理
//!
//! 表示モードは Empty / Previewing / LiveCamera のいずれか1つ。
//! カメラストリームはデバイスを占有するので、LiveCameraを抜ける
//! すべての経路（撮影・閉じる・画像差し替え・破棄）で解放する。

use async_trait::async_trait;

use crate::error::{Error, Result};

const MOBILE_TOKENS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// 画像の取得元（ファイル選択・カメラ）
#[async_trait(?Send)]
pub trait ImageSource {
    /// ライブカメラのハンドル
    type Stream;

    /// ライブカメラAPIがあるか
    fn supports_live_camera(&self) -> bool;

    /// ライブカメラを開く。拒否・非対応ならエラー
    async fn open_camera(&self) -> Result<Self::Stream>;

    /// 現在のフレームを静止画のData URLにする
    fn snapshot(&self, stream: &Self::Stream) -> Result<String>;

    /// ストリームを解放する
    fn release(&self, stream: Self::Stream);

    /// 端末の撮影入力（ファイル入力のcapture）を開く
    fn open_capture_input(&self);
}

/// 表示モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    Empty,
    Previewing,
    LiveCamera,
}

/// カメラ要求の結果
#[derive(Debug)]
pub enum CameraOutcome<T> {
    /// ライブストリームを取得した
    Live(T),
    /// 端末の撮影入力にフォールバックした（後でPreviewingになる）
    CaptureInput,
}

/// カメラを要求する
///
/// モバイル、またはライブカメラが使えない・拒否された場合は撮影入力を開く。
pub async fn acquire_camera<S>(source: &S, is_mobile: bool) -> CameraOutcome<S::Stream>
where
    S: ImageSource + ?Sized,
{
    if is_mobile || !source.supports_live_camera() {
        source.open_capture_input();
        return CameraOutcome::CaptureInput;
    }

    match source.open_camera().await {
        Ok(stream) => CameraOutcome::Live(stream),
        Err(e) => {
            tracing::debug!("live camera unavailable, falling back to capture input: {}", e);
            source.open_capture_input();
            CameraOutcome::CaptureInput
        }
    }
}

/// User-Agentがモバイル端末か
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_TOKENS.iter().any(|token| ua.contains(token))
}

enum State<T> {
    Empty,
    Previewing(String),
    LiveCamera(T),
}

/// 撮影セッション
pub struct CaptureSession<S: ImageSource> {
    source: S,
    state: State<S::Stream>,
}

impl<S: ImageSource> CaptureSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: State::Empty,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn mode(&self) -> CaptureMode {
        match self.state {
            State::Empty => CaptureMode::Empty,
            State::Previewing(_) => CaptureMode::Previewing,
            State::LiveCamera(_) => CaptureMode::LiveCamera,
        }
    }

    /// ステージ中の画像（Data URL）
    pub fn staged_image(&self) -> Option<&str> {
        match &self.state {
            State::Previewing(data_url) => Some(data_url),
            _ => None,
        }
    }

    /// ファイル選択・撮影入力の画像をステージする
    pub fn stage_image(&mut self, data_url: String) {
        self.release_camera();
        self.state = State::Previewing(data_url);
    }

    /// ライブカメラ表示に入る（Emptyからのみ）
    pub fn enter_live_camera(&mut self, stream: S::Stream) -> Result<()> {
        match self.state {
            State::Previewing(_) => {
                self.source.release(stream);
                Err(Error::Capture("an image is already staged".into()))
            }
            State::Empty | State::LiveCamera(_) => {
                self.release_camera();
                self.state = State::LiveCamera(stream);
                Ok(())
            }
        }
    }

    /// 現在のフレームを撮影してステージする。ストリームは必ず解放する
    pub fn take_snapshot(&mut self) -> Result<()> {
        let stream = match std::mem::replace(&mut self.state, State::Empty) {
            State::LiveCamera(stream) => stream,
            other => {
                self.state = other;
                return Err(Error::Capture("camera is not open".into()));
            }
        };

        let snapshot = self.source.snapshot(&stream);
        self.source.release(stream);
        self.state = State::Previewing(snapshot?);
        Ok(())
    }

    /// ライブカメラを閉じてEmptyに戻る
    pub fn close_camera(&mut self) {
        if matches!(self.state, State::LiveCamera(_)) {
            self.release_camera();
            self.state = State::Empty;
        }
    }

    /// ステージ中の画像を外す。確認が取れたときだけ
    pub fn remove_image(&mut self, confirmed: bool) -> bool {
        if confirmed && matches!(self.state, State::Previewing(_)) {
            self.state = State::Empty;
            return true;
        }
        false
    }

    fn release_camera(&mut self) {
        if let State::LiveCamera(stream) = std::mem::replace(&mut self.state, State::Empty) {
            self.source.release(stream);
        }
    }
}

impl<S: ImageSource> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.release_camera();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Counters {
        opened: Cell<u32>,
        released: RefCell<Vec<u32>>,
        capture_inputs: Cell<u32>,
    }

    #[derive(Clone)]
    struct FakeSource {
        live: bool,
        grant: bool,
        snapshot_fails: bool,
        counters: Rc<Counters>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                live: true,
                grant: true,
                snapshot_fails: false,
                counters: Rc::new(Counters::default()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ImageSource for FakeSource {
        type Stream = u32;

        fn supports_live_camera(&self) -> bool {
            self.live
        }

        async fn open_camera(&self) -> Result<u32> {
            if !self.grant {
                return Err(Error::Capture("permission denied".into()));
            }
            let id = self.counters.opened.get() + 1;
            self.counters.opened.set(id);
            Ok(id)
        }

        fn snapshot(&self, stream: &u32) -> Result<String> {
            if self.snapshot_fails {
                return Err(Error::Capture("no frame".into()));
            }
            Ok(format!("data:image/jpeg;base64,frame{}", stream))
        }

        fn release(&self, stream: u32) {
            self.counters.released.borrow_mut().push(stream);
        }

        fn open_capture_input(&self) {
            self.counters.capture_inputs.set(self.counters.capture_inputs.get() + 1);
        }
    }

    fn live_session(source: &FakeSource) -> CaptureSession<FakeSource> {
        let mut session = CaptureSession::new(source.clone());
        match block_on(acquire_camera(source, false)) {
            CameraOutcome::Live(stream) => session.enter_live_camera(stream).unwrap(),
            CameraOutcome::CaptureInput => panic!("expected live camera"),
        }
        session
    }

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_mobile_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(!is_mobile_user_agent("Mozilla/5.0 (X11; Linux x86_64) Firefox/130.0"));
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = CaptureSession::new(FakeSource::new());
        assert_eq!(session.mode(), CaptureMode::Empty);
        assert_eq!(session.staged_image(), None);
    }

    #[test]
    fn test_stage_file() {
        let mut session = CaptureSession::new(FakeSource::new());
        session.stage_image("data:image/png;base64,AAAA".into());
        assert_eq!(session.mode(), CaptureMode::Previewing);
        assert_eq!(session.staged_image(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_mobile_uses_capture_input() {
        let source = FakeSource::new();
        let outcome = block_on(acquire_camera(&source, true));
        assert!(matches!(outcome, CameraOutcome::CaptureInput));
        assert_eq!(source.counters.capture_inputs.get(), 1);
        assert_eq!(source.counters.opened.get(), 0);
    }

    #[test]
    fn test_unsupported_camera_uses_capture_input() {
        let source = FakeSource { live: false, ..FakeSource::new() };
        let outcome = block_on(acquire_camera(&source, false));
        assert!(matches!(outcome, CameraOutcome::CaptureInput));
        assert_eq!(source.counters.capture_inputs.get(), 1);
    }

    #[test]
    fn test_denied_camera_uses_capture_input() {
        let source = FakeSource { grant: false, ..FakeSource::new() };
        let outcome = block_on(acquire_camera(&source, false));
        assert!(matches!(outcome, CameraOutcome::CaptureInput));
        assert_eq!(source.counters.capture_inputs.get(), 1);
    }

    #[test]
    fn test_snapshot_releases_stream() {
        let source = FakeSource::new();
        let mut session = live_session(&source);
        assert_eq!(session.mode(), CaptureMode::LiveCamera);

        session.take_snapshot().unwrap();
        assert_eq!(session.mode(), CaptureMode::Previewing);
        assert_eq!(session.staged_image(), Some("data:image/jpeg;base64,frame1"));
        assert_eq!(*source.counters.released.borrow(), vec![1]);
    }

    #[test]
    fn test_failed_snapshot_still_releases() {
        let source = FakeSource { snapshot_fails: true, ..FakeSource::new() };
        let mut session = live_session(&source);

        assert!(session.take_snapshot().is_err());
        assert_eq!(session.mode(), CaptureMode::Empty);
        assert_eq!(*source.counters.released.borrow(), vec![1]);
    }

    #[test]
    fn test_close_camera_releases() {
        let source = FakeSource::new();
        let mut session = live_session(&source);

        session.close_camera();
        assert_eq!(session.mode(), CaptureMode::Empty);
        assert_eq!(*source.counters.released.borrow(), vec![1]);

        session.close_camera();
        assert_eq!(source.counters.released.borrow().len(), 1);
    }

    #[test]
    fn test_stage_while_live_releases() {
        let source = FakeSource::new();
        let mut session = live_session(&source);

        session.stage_image("data:image/png;base64,BBBB".into());
        assert_eq!(session.mode(), CaptureMode::Previewing);
        assert_eq!(*source.counters.released.borrow(), vec![1]);
    }

    #[test]
    fn test_drop_releases() {
        let source = FakeSource::new();
        {
            let _session = live_session(&source);
        }
        assert_eq!(*source.counters.released.borrow(), vec![1]);
    }

    #[test]
    fn test_enter_live_while_previewing_is_rejected() {
        let source = FakeSource::new();
        let mut session = CaptureSession::new(source.clone());
        session.stage_image("data:image/png;base64,CCCC".into());

        assert!(session.enter_live_camera(9).is_err());
        assert_eq!(session.mode(), CaptureMode::Previewing);
        assert_eq!(*source.counters.released.borrow(), vec![9]);
    }

    #[test]
    fn test_snapshot_without_camera() {
        let mut session = CaptureSession::new(FakeSource::new());
        assert!(session.take_snapshot().is_err());
        assert_eq!(session.mode(), CaptureMode::Empty);

        session.stage_image("data:image/png;base64,EEEE".into());
        assert!(session.take_snapshot().is_err());
        assert_eq!(session.staged_image(), Some("data:image/png;base64,EEEE"));
    }

    #[test]
    fn test_remove_image_requires_confirmation() {
        let mut session = CaptureSession::new(FakeSource::new());
        session.stage_image("data:image/png;base64,DDDD".into());

        assert!(!session.remove_image(false));
        assert_eq!(session.mode(), CaptureMode::Previewing);

        assert!(session.remove_image(true));
        assert_eq!(session.mode(), CaptureMode::Empty);
    }
}
