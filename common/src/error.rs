//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// JSONが解析できない、CSVにデータ行がない等
    #[error("{0}")]
    MalformedInput(String),

    /// 解析は成功したが植物が0件
    #[error("{0}")]
    EmptyResult(String),

    /// 画像も説明文もない、貼り付け欄が空
    #[error("{0}")]
    MissingInput(String),

    /// 識別APIに到達できない、または失敗レスポンス
    #[error("Identification endpoint unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// ユーザーに通知すべきエラーか
    ///
    /// RemoteUnavailableはフォールバックで回復するため通知しない
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::MalformedInput(_) | Error::EmptyResult(_) | Error::MissingInput(_)
        )
    }
}
