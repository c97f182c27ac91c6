use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::runner::{ExecutorOptions, ReportFormat};
use crate::validation::ValidationOptions;
use crate::{ApicheckError, Result};

/// apicheck.toml 的内容，所有字段可选
///
/// CLI 参数也用同一结构表示，便于逐项覆盖。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub format: Option<ReportFormat>,
    pub timeout_secs: Option<u64>,
    pub concurrency: Option<usize>,
    pub strict_float: Option<bool>,
    pub accept_error_status: Option<bool>,
}

impl RunConfig {
    /// 用 `other` 中已设置的字段覆盖自身
    pub fn merge(self, other: RunConfig) -> RunConfig {
        RunConfig {
            format: other.format.or(self.format),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            concurrency: other.concurrency.or(self.concurrency),
            strict_float: other.strict_float.or(self.strict_float),
            accept_error_status: other.accept_error_status.or(self.accept_error_status),
        }
    }

    /// 填入默认值，得到最终设置
    pub fn resolve(&self) -> RunSettings {
        RunSettings {
            format: self.format.unwrap_or_default(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            concurrency: self.concurrency.unwrap_or(1).max(1),
            executor: ExecutorOptions {
                validation: ValidationOptions {
                    strict_float: self.strict_float.unwrap_or(false),
                },
                accept_error_status: self.accept_error_status.unwrap_or(false),
            },
        }
    }
}

/// 合并后的运行设置
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub format: ReportFormat,
    /// None 表示使用传输层默认值
    pub timeout: Option<Duration>,
    pub concurrency: usize,
    pub executor: ExecutorOptions,
}

impl Default for RunSettings {
    fn default() -> Self {
        RunConfig::default().resolve()
    }
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "apicheck.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ApicheckError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            ApicheckError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/apicheck/
    ///
    /// 自动发现的文件解析失败时跳过并打印警告。
    pub fn find_and_load() -> Option<RunConfig> {
        let path = Self::find_in_ancestors().or_else(Self::find_in_user_dir)?;
        debug!("Using config file {}", path.display());

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                None
            }
        }
    }

    /// 显式路径优先，且其错误是致命的
    pub fn load(explicit: Option<&Path>) -> Result<RunConfig> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::find_and_load().unwrap_or_default()),
        }
    }

    fn find_in_ancestors() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .map(|dir| dir.join(Self::CONFIG_FILE))
            .find(|path| path.is_file())
    }

    fn find_in_user_dir() -> Option<PathBuf> {
        let path = dirs::home_dir()?
            .join(".config")
            .join("apicheck")
            .join(Self::CONFIG_FILE);
        path.is_file().then_some(path)
    }
}
