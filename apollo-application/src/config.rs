//! 外壳配置（Shell Config）
//!
//! 启动期一次性读取并显式传入组合根，不提供任何全局可读的设置入口。
//!
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 配置文件示例：
/// ```toml
/// show_welcome_page_on_startup = false
/// profiling = true
/// log_filter = "apollo_core=trace,info"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// 启动时是否打开欢迎页
    pub show_welcome_page_on_startup: bool,
    /// 是否记录命令耗时
    pub profiling: bool,
    /// `EnvFilter` 语法的日志过滤器；环境变量 `RUST_LOG` 优先
    pub log_filter: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            show_welcome_page_on_startup: true,
            profiling: false,
            log_filter: "info".to_string(),
        }
    }
}

impl ShellConfig {
    pub fn from_toml_str(s: &str) -> AppResult<Self> {
        let cfg: Self = toml::from_str(s).map_err(|e| AppError::Config {
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AppError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }

    /// 文件不存在时退回默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> AppResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(AppError::Config {
                reason: "log_filter must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = ShellConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ShellConfig::default());
        assert!(cfg.show_welcome_page_on_startup);
    }

    #[test]
    fn partial_document_overrides() {
        let cfg = ShellConfig::from_toml_str("show_welcome_page_on_startup = false\n").unwrap();
        assert!(!cfg.show_welcome_page_on_startup);
        assert!(!cfg.profiling);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn rejects_unknown_keys_and_blank_filter() {
        assert!(matches!(
            ShellConfig::from_toml_str("show_start_page = true"),
            Err(AppError::Config { .. })
        ));
        assert!(matches!(
            ShellConfig::from_toml_str("log_filter = \"  \""),
            Err(AppError::Config { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "profiling = true").unwrap();
        writeln!(file, "log_filter = \"apollo_core=trace\"").unwrap();

        let cfg = ShellConfig::load(file.path()).unwrap();
        assert!(cfg.profiling);
        assert_eq!(cfg.log_filter, "apollo_core=trace");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apollo.toml");

        assert!(matches!(
            ShellConfig::load(&path),
            Err(AppError::Config { .. })
        ));
        assert_eq!(
            ShellConfig::load_or_default(&path).unwrap(),
            ShellConfig::default()
        );
    }
}
