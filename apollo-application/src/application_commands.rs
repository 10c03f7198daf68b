//! 应用内置命令
//!
//! 每个命令只包装一个由组合代码提供的动作闭包，真正的工作交给协作者完成：
//! - 关闭应用
//! - 新建 / 加载 / 卸载项目（新建与加载的结果经上下文结果槽交回）
//!
use apollo_core::command;
use apollo_core::command::Command;
use apollo_core::context::CommandContext;
use apollo_core::error::CommandResult;

use crate::error::AppResult;
use crate::project::{PersistenceInformation, ProjectInfo};

#[command(id = "apollo.shutdown_application")]
pub struct ShutdownApplicationCommand {
    shutdown: Box<dyn Fn()>,
}

impl ShutdownApplicationCommand {
    pub fn new(shutdown: impl Fn() + 'static) -> Self {
        Self {
            shutdown: Box::new(shutdown),
        }
    }
}

impl Command for ShutdownApplicationCommand {
    fn execute(&self, _ctx: &mut CommandContext) -> CommandResult<()> {
        (self.shutdown)();
        Ok(())
    }
}

#[command(id = "apollo.create_project")]
pub struct CreateProjectCommand {
    create: Box<dyn Fn() -> AppResult<ProjectInfo>>,
}

impl CreateProjectCommand {
    pub fn new(create: impl Fn() -> AppResult<ProjectInfo> + 'static) -> Self {
        Self {
            create: Box::new(create),
        }
    }
}

impl Command for CreateProjectCommand {
    fn execute(&self, ctx: &mut CommandContext) -> CommandResult<()> {
        let project = (self.create)()?;
        ctx.set_result(project);
        Ok(())
    }
}

/// 需要在上下文中提供 `path` 参数（见 [`PersistenceInformation`]）
#[command(id = "apollo.load_project")]
pub struct LoadProjectCommand {
    load: Box<dyn Fn(&PersistenceInformation) -> AppResult<ProjectInfo>>,
}

impl LoadProjectCommand {
    pub fn new(load: impl Fn(&PersistenceInformation) -> AppResult<ProjectInfo> + 'static) -> Self {
        Self {
            load: Box::new(load),
        }
    }
}

impl Command for LoadProjectCommand {
    fn execute(&self, ctx: &mut CommandContext) -> CommandResult<()> {
        let info: PersistenceInformation = ctx.params()?;
        let project = (self.load)(&info)?;
        ctx.set_result(project);
        Ok(())
    }
}

#[command(id = "apollo.unload_project")]
pub struct UnloadProjectCommand {
    unload: Box<dyn Fn() -> AppResult<()>>,
    has_project: Box<dyn Fn() -> bool>,
}

impl UnloadProjectCommand {
    pub fn new(
        unload: impl Fn() -> AppResult<()> + 'static,
        has_project: impl Fn() -> bool + 'static,
    ) -> Self {
        Self {
            unload: Box::new(unload),
            has_project: Box::new(has_project),
        }
    }
}

impl Command for UnloadProjectCommand {
    fn can_execute(&self, _ctx: &CommandContext) -> bool {
        (self.has_project)()
    }

    fn execute(&self, _ctx: &mut CommandContext) -> CommandResult<()> {
        (self.unload)()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use apollo_core::command::NamedCommand;
    use apollo_core::error::CommandError;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn ids_are_stable() {
        assert_eq!(ShutdownApplicationCommand::ID, "apollo.shutdown_application");
        assert_eq!(CreateProjectCommand::ID, "apollo.create_project");
        assert_eq!(LoadProjectCommand::ID, "apollo.load_project");
        assert_eq!(UnloadProjectCommand::ID, "apollo.unload_project");
    }

    #[test]
    fn shutdown_calls_action() {
        let called = Rc::new(Cell::new(false));
        let c = called.clone();
        let cmd = ShutdownApplicationCommand::new(move || c.set(true));

        cmd.execute(&mut CommandContext::new()).unwrap();
        assert!(called.get());
    }

    #[test]
    fn create_hands_project_back() {
        let cmd = CreateProjectCommand::new(|| Ok(ProjectInfo::builder().name("p").build()));
        let mut ctx = CommandContext::new();
        cmd.execute(&mut ctx).unwrap();

        let project = ctx.take_result::<ProjectInfo>().unwrap().unwrap();
        assert_eq!(project.name(), "p");
    }

    #[test]
    fn load_requires_path() {
        let cmd = LoadProjectCommand::new(|info| {
            Ok(ProjectInfo::builder()
                .name(info.path.display().to_string())
                .build())
        });

        let err = cmd.execute(&mut CommandContext::new()).unwrap_err();
        assert!(matches!(err, CommandError::InvalidContext { .. }));

        let mut ctx = CommandContext::new().with_param("path", "/p.apollo").unwrap();
        cmd.execute(&mut ctx).unwrap();
        let project = ctx.take_result::<ProjectInfo>().unwrap().unwrap();
        assert_eq!(project.name(), "/p.apollo");
    }

    #[test]
    fn action_failure_becomes_execution_error() {
        let cmd = CreateProjectCommand::new(|| Err(AppError::Validation("disk full".into())));
        match cmd.execute(&mut CommandContext::new()).unwrap_err() {
            CommandError::Execution { reason } => assert!(reason.contains("disk full")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unload_guard_follows_project_presence() {
        let cmd = UnloadProjectCommand::new(|| Ok(()), || false);
        assert!(!cmd.can_execute(&CommandContext::new()));

        let cmd = UnloadProjectCommand::new(|| Ok(()), || true);
        assert!(cmd.can_execute(&CommandContext::new()));
    }
}
