use crate::error::{AppError, AppResult};
use crate::project::{PersistenceInformation, ProjectInfo, ProjectService};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 基于内存的 ProjectService 实现
/// - 同一时刻最多一个活动项目，新建/加载会替换当前项目
/// - 加载只根据路径生成项目摘要，不读取文件
#[derive(Debug, Default)]
pub struct InMemoryProjectService {
    current: Mutex<Option<ProjectInfo>>,
}

impl InMemoryProjectService {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ProjectInfo>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProjectService for InMemoryProjectService {
    fn create_new_project(&self) -> AppResult<ProjectInfo> {
        let project = ProjectInfo::builder().name("Untitled").build();
        tracing::info!(project = %project.id(), "created new project");
        *self.slot() = Some(project.clone());
        Ok(project)
    }

    fn load_project(&self, info: &PersistenceInformation) -> AppResult<ProjectInfo> {
        let name = info
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::Validation(format!("not a project path: {}", info.path.display()))
            })?;

        let project = ProjectInfo::builder()
            .name(name)
            .source(info.path.clone())
            .build();
        tracing::info!(project = %project.id(), path = %info.path.display(), "loaded project");
        *self.slot() = Some(project.clone());
        Ok(project)
    }

    fn unload_project(&self) -> AppResult<()> {
        match self.slot().take() {
            Some(project) => {
                tracing::info!(project = %project.id(), "unloaded project");
                Ok(())
            }
            None => Err(AppError::NoActiveProject),
        }
    }

    fn current(&self) -> Option<ProjectInfo> {
        self.slot().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_replaces_current() {
        let service = InMemoryProjectService::new();
        assert!(!service.has_active_project());

        let first = service.create_new_project().unwrap();
        let second = service.create_new_project().unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(service.current().map(|p| p.id()), Some(second.id()));
    }

    #[test]
    fn load_names_project_after_file() {
        let service = InMemoryProjectService::new();
        let project = service
            .load_project(&PersistenceInformation::new("/work/robot.apollo"))
            .unwrap();
        assert_eq!(project.name(), "robot");
        assert_eq!(
            project.source().map(|p| p.to_string_lossy().into_owned()),
            Some("/work/robot.apollo".to_string())
        );
    }

    #[test]
    fn load_rejects_empty_path() {
        let service = InMemoryProjectService::new();
        let err = service
            .load_project(&PersistenceInformation::new(""))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!service.has_active_project());
    }

    #[test]
    fn unload_without_project() {
        let service = InMemoryProjectService::new();
        assert!(matches!(
            service.unload_project(),
            Err(AppError::NoActiveProject)
        ));
        service.create_new_project().unwrap();
        service.unload_project().unwrap();
        assert!(service.current().is_none());
    }
}
