use apollo_core::command::NamedCommand;
use apollo_core::context::CommandContext;

use crate::application_commands::{CreateProjectCommand, LoadProjectCommand, UnloadProjectCommand};
use crate::error::{AppError, AppResult};
use crate::project::{PersistenceInformation, ProjectInfo};
use crate::user_interface_service::CommandHost;

/// 界面侧的项目入口
///
/// 不直接依赖项目服务，只通过命令宿主按 ID 调用项目命令，
/// 并从上下文结果槽中取回新建或加载的项目。
pub struct ProjectFacade<H: CommandHost> {
    host: H,
    current: Option<ProjectInfo>,
}

impl<H: CommandHost> ProjectFacade<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            current: None,
        }
    }

    pub fn has_active_project(&self) -> bool {
        self.current.is_some()
    }

    pub fn active_project(&self) -> Option<&ProjectInfo> {
        self.current.as_ref()
    }

    pub fn can_create_new_project(&self) -> bool {
        self.host.contains(&CreateProjectCommand::command_id())
    }

    pub fn can_load_project(&self) -> bool {
        self.host.contains(&LoadProjectCommand::command_id())
    }

    pub fn can_unload_project(&self) -> bool {
        self.has_active_project()
    }

    pub fn new_project(&mut self) -> AppResult<&ProjectInfo> {
        let mut ctx = CommandContext::new();
        self.host
            .invoke_with(&CreateProjectCommand::command_id(), &mut ctx)?;

        let project = ctx
            .take_result::<ProjectInfo>()?
            .ok_or(AppError::FailedToCreateProject)?;
        Ok(self.current.insert(project))
    }

    pub fn load_project(&mut self, info: &PersistenceInformation) -> AppResult<&ProjectInfo> {
        let mut ctx = CommandContext::new().with_param("path", &info.path)?;
        self.host
            .invoke_with(&LoadProjectCommand::command_id(), &mut ctx)?;

        let project = ctx
            .take_result::<ProjectInfo>()?
            .ok_or_else(|| AppError::FailedToLoadProject {
                path: info.path.display().to_string(),
            })?;
        Ok(self.current.insert(project))
    }

    /// 有活动项目时才需要保存
    pub fn should_save_project(&self) -> bool {
        self.has_active_project()
    }

    /// 没有活动项目时返回 `CannotUnloadProject`，不会调用宿主
    pub fn unload_project(&mut self) -> AppResult<()> {
        if !self.can_unload_project() {
            return Err(AppError::CannotUnloadProject);
        }

        self.host
            .invoke(&UnloadProjectCommand::command_id())?;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_core::command_id::CommandId;
    use std::cell::RefCell;

    // 记录调用、按预设返回结果的宿主
    #[derive(Default)]
    struct FakeHost {
        calls: RefCell<Vec<String>>,
        reply: Option<fn() -> ProjectInfo>,
    }

    impl CommandHost for FakeHost {
        fn contains(&self, id: &CommandId) -> bool {
            id.as_str() != "apollo.load_project"
        }

        fn invoke_with(&self, id: &CommandId, ctx: &mut CommandContext) -> AppResult<()> {
            self.calls.borrow_mut().push(id.to_string());
            if let Some(reply) = self.reply {
                ctx.set_result(reply());
            }
            Ok(())
        }
    }

    fn sample() -> ProjectInfo {
        ProjectInfo::builder().name("sample").build()
    }

    #[test]
    fn new_project_reads_result() {
        let mut facade = ProjectFacade::new(FakeHost {
            reply: Some(sample),
            ..Default::default()
        });
        assert!(!facade.can_unload_project());

        assert_eq!(facade.new_project().unwrap().name(), "sample");
        assert!(facade.has_active_project());
        assert!(facade.can_unload_project());
    }

    #[test]
    fn missing_result_is_failure() {
        let mut facade = ProjectFacade::new(FakeHost::default());
        assert!(matches!(
            facade.new_project(),
            Err(AppError::FailedToCreateProject)
        ));
        assert!(matches!(
            facade.load_project(&PersistenceInformation::new("/x.apollo")),
            Err(AppError::FailedToLoadProject { .. })
        ));
        assert!(!facade.has_active_project());
    }

    #[test]
    fn capabilities_follow_host() {
        let facade = ProjectFacade::new(FakeHost::default());
        assert!(facade.can_create_new_project());
        assert!(!facade.can_load_project());
    }

    #[test]
    fn unload_without_project_is_rejected() {
        let mut facade = ProjectFacade::new(FakeHost::default());
        assert!(matches!(
            facade.unload_project(),
            Err(AppError::CannotUnloadProject)
        ));
        assert!(facade.host.calls.borrow().is_empty());
    }

    #[test]
    fn save_follows_active_project() {
        let mut facade = ProjectFacade::new(FakeHost {
            reply: Some(sample),
            ..Default::default()
        });
        assert!(!facade.should_save_project());

        facade.new_project().unwrap();
        assert!(facade.should_save_project());

        facade.unload_project().unwrap();
        assert!(!facade.should_save_project());
        assert_eq!(
            *facade.host.calls.borrow(),
            ["apollo.create_project", "apollo.unload_project"]
        );
    }
}
