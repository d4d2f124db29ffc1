// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("临时文件持久化失败: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("无法解析配置文件 '{path}': {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Base64 解码错误: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("无效的下载类型代码: {0},支持的参数 - 「1或2或3」")]
    InvalidDownloadTypeCode(i64),
    #[error("无效的颜色值: '{0}'")]
    InvalidHexColor(String),
    #[error("文件ID:\"{file_id}\",{reason}")]
    InvalidFileId { file_id: String, reason: String },
    #[error("二维码生成失败: {0}")]
    Qrcode(String),
    #[error("配置错误: {0}")]
    Config(String),
    #[error("用户中断")]
    UserInterrupt,
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;
