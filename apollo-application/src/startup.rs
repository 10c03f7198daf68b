use serde::{Deserialize, Serialize};
use std::fmt;

/// 服务的启动状态
///
/// 只有 `Started` 视为“完全可用”（fully functional）。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartupState {
    #[default]
    NotStarted,
    Started,
    Stopping,
    Stopped,
}

impl StartupState {
    pub fn is_fully_functional(&self) -> bool {
        matches!(self, Self::Started)
    }
}

impl fmt::Display for StartupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not-started",
            Self::Started => "started",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}
