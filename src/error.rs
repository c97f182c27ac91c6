use std::path::PathBuf;
use thiserror::Error;

/// 运行前的致命错误（加载测试文件、读取配置、参数检查）
///
/// 单个测试的失败不在这里，见 [`crate::validation::TestFailure`]。
#[derive(Error, Debug)]
pub enum ApicheckError {
    #[error("Cannot open file '{}'. File not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Cannot decode JSON from file '{}': {message}", path.display())]
    InvalidJson { path: PathBuf, message: String },

    #[error("Test file '{}' must contain a JSON array of tests.", .0.display())]
    NotAnArray(PathBuf),

    #[error("Malformed test #{index}. Must provide '{key}' in tests file.")]
    MissingKey { index: usize, key: String },

    #[error("Malformed test #{index}. {reason}")]
    InvalidTest { index: usize, reason: String },

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ApicheckError {
    fn from(err: anyhow::Error) -> Self {
        ApicheckError::Other(err.to_string())
    }
}

/// Result type for apicheck crate
pub type Result<T> = std::result::Result<T, ApicheckError>;
