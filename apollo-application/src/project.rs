use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::AppResult;

/// 项目 ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 项目摘要，由项目服务产出，经命令结果槽交回给调用方
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[builder(default)]
    id: ProjectId,
    #[builder(into)]
    name: String,
    /// 从何处加载；新建项目为空
    source: Option<PathBuf>,
    #[builder(default = Utc::now())]
    created_at: DateTime<Utc>,
}

impl ProjectInfo {
    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 描述项目如何被持久化（目前只有文件路径）
///
/// 同时也是加载命令的参数结构：在上下文中以 `path` 键传递。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceInformation {
    pub path: PathBuf,
}

impl PersistenceInformation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// 项目服务（外部协作者）
///
/// 命令通过它完成真正的项目操作；注册表与命令本身不关心项目如何存储。
pub trait ProjectService: Send + Sync {
    fn create_new_project(&self) -> AppResult<ProjectInfo>;

    fn load_project(&self, info: &PersistenceInformation) -> AppResult<ProjectInfo>;

    fn unload_project(&self) -> AppResult<()>;

    fn current(&self) -> Option<ProjectInfo>;

    fn has_active_project(&self) -> bool {
        self.current().is_some()
    }
}
