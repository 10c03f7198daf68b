use apollo_core::activator::{SharedActivator, activator};
use apollo_core::command::NamedCommand;
use apollo_core::command_id::CommandId;
use apollo_core::container::CommandContainer;
use apollo_core::context::CommandContext;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application_commands::{
    CreateProjectCommand, LoadProjectCommand, ShutdownApplicationCommand, UnloadProjectCommand,
};
use crate::error::{AppError, AppResult};
use crate::project::ProjectService;
use crate::startup::StartupState;

/// 应用核心（外部协作者），负责真正的关闭流程
pub trait ApplicationCore: Send + Sync {
    fn shutdown(&self);
}

/// 可以按 ID 调用命令的宿主
///
/// 与 [`InvokeCommands`](apollo_core::container::InvokeCommands) 的区别在于：
/// 宿主可能因自身状态拒绝调用，因此返回应用层错误。
pub trait CommandHost {
    fn contains(&self, id: &CommandId) -> bool;

    fn invoke_with(&self, id: &CommandId, ctx: &mut CommandContext) -> AppResult<()>;

    fn invoke(&self, id: &CommandId) -> AppResult<()> {
        self.invoke_with(id, &mut CommandContext::default())
    }
}

impl<H: CommandHost + ?Sized> CommandHost for &H {
    fn contains(&self, id: &CommandId) -> bool {
        (**self).contains(id)
    }

    fn invoke_with(&self, id: &CommandId, ctx: &mut CommandContext) -> AppResult<()> {
        (**self).invoke_with(id, ctx)
    }
}

impl<H: CommandHost + ?Sized> CommandHost for Arc<H> {
    fn contains(&self, id: &CommandId) -> bool {
        (**self).contains(id)
    }

    fn invoke_with(&self, id: &CommandId, ctx: &mut CommandContext) -> AppResult<()> {
        (**self).invoke_with(id, ctx)
    }
}

/// 用户界面服务
///
/// 持有命令容器，并在构造时注册应用内置命令。
/// 只有在服务完全可用（`Started`）时才允许调用命令；停止时移除自己注册的命令。
pub struct UserInterfaceService<C: CommandContainer> {
    commands: C,
    registered: Vec<(CommandId, SharedActivator)>,
    state: Mutex<StartupState>,
}

impl<C: CommandContainer> UserInterfaceService<C> {
    /// 注册应用内置命令；任一注册失败时撤销已注册的部分，容器保持原样
    pub fn new(
        commands: C,
        core: Arc<dyn ApplicationCore>,
        projects: Arc<dyn ProjectService>,
    ) -> AppResult<Self> {
        let mut service = Self {
            commands,
            registered: Vec::new(),
            state: Mutex::new(StartupState::NotStarted),
        };
        if let Err(err) = service.register_application_commands(core, projects) {
            service.unregister_all();
            return Err(err);
        }
        Ok(service)
    }

    fn register_application_commands(
        &mut self,
        core: Arc<dyn ApplicationCore>,
        projects: Arc<dyn ProjectService>,
    ) -> AppResult<()> {
        self.register::<ShutdownApplicationCommand>(activator(move || {
            let core = core.clone();
            ShutdownApplicationCommand::new(move || core.shutdown())
        }))?;

        let p = projects.clone();
        self.register::<CreateProjectCommand>(activator(move || {
            let p = p.clone();
            CreateProjectCommand::new(move || p.create_new_project())
        }))?;

        let p = projects.clone();
        self.register::<LoadProjectCommand>(activator(move || {
            let p = p.clone();
            LoadProjectCommand::new(move |info| p.load_project(info))
        }))?;

        self.register::<UnloadProjectCommand>(activator(move || {
            let unload = projects.clone();
            let guard = projects.clone();
            UnloadProjectCommand::new(
                move || unload.unload_project(),
                move || guard.has_active_project(),
            )
        }))?;

        Ok(())
    }

    fn register<N: NamedCommand>(&mut self, activator: SharedActivator) -> AppResult<()> {
        let id = N::command_id();
        self.commands.add(id.clone(), activator.clone())?;
        self.registered.push((id, activator));
        Ok(())
    }

    // 只移除仍由本服务持有的条目
    fn unregister_all(&mut self) {
        for (id, activator) in self.registered.drain(..).rev() {
            self.commands.remove_owned(&id, &activator);
        }
    }

    pub fn state(&self) -> StartupState {
        *self.lock_state()
    }

    pub fn is_fully_functional(&self) -> bool {
        self.state().is_fully_functional()
    }

    pub fn start(&self) -> AppResult<()> {
        let mut state = self.lock_state();
        match *state {
            StartupState::Started => Ok(()),
            StartupState::NotStarted => {
                *state = StartupState::Started;
                tracing::info!("user interface service started");
                Ok(())
            }
            from => Err(AppError::InvalidTransition {
                from,
                to: StartupState::Started,
            }),
        }
    }

    /// 停止服务并移除构造时注册的命令；重复调用无副作用
    pub fn stop(&self) {
        {
            let mut state = self.lock_state();
            if *state == StartupState::Stopped {
                return;
            }
            *state = StartupState::Stopping;
        }

        for (id, activator) in self.registered.iter().rev() {
            self.commands.remove_owned(id, activator);
        }

        *self.lock_state() = StartupState::Stopped;
        tracing::info!("user interface service stopped");
    }

    pub fn commands(&self) -> &C {
        &self.commands
    }

    fn lock_state(&self) -> MutexGuard<'_, StartupState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: CommandContainer> CommandHost for UserInterfaceService<C> {
    fn contains(&self, id: &CommandId) -> bool {
        self.commands.contains(id)
    }

    fn invoke_with(&self, id: &CommandId, ctx: &mut CommandContext) -> AppResult<()> {
        let state = self.state();
        if !state.is_fully_functional() {
            return Err(AppError::ServiceNotFullyFunctional { state });
        }

        let span = tracing::info_span!("command", id = %id);
        let _entered = span.enter();
        tracing::trace!(command = %id, "invoking command");
        self.commands.invoke(id, ctx)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_project_service::InMemoryProjectService;
    use apollo_core::container::{CommandContainerExt, HaveCommands};
    use apollo_core::error::CommandError;
    use apollo_core::registry::CommandRegistry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Core {
        shutdowns: AtomicUsize,
    }

    impl ApplicationCore for Core {
        fn shutdown(&self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn service() -> (UserInterfaceService<CommandRegistry>, Arc<Core>) {
        let core = Arc::new(Core::default());
        let service = UserInterfaceService::new(
            CommandRegistry::new(),
            core.clone(),
            Arc::new(InMemoryProjectService::new()),
        )
        .unwrap();
        (service, core)
    }

    #[test]
    fn registers_application_commands() {
        let (service, _) = service();
        for id in [
            ShutdownApplicationCommand::command_id(),
            CreateProjectCommand::command_id(),
            LoadProjectCommand::command_id(),
            UnloadProjectCommand::command_id(),
        ] {
            assert!(service.contains(&id), "missing {id}");
        }
        assert_eq!(service.commands().len(), 4);
    }

    #[test]
    fn rejects_invoke_until_started() {
        let (service, core) = service();
        let id = ShutdownApplicationCommand::command_id();

        match service.invoke(&id).unwrap_err() {
            AppError::ServiceNotFullyFunctional { state } => {
                assert_eq!(state, StartupState::NotStarted)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(core.shutdowns.load(Ordering::SeqCst), 0);

        service.start().unwrap();
        service.invoke(&id).unwrap();
        assert_eq!(core.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_command_surfaces_as_command_error() {
        let (service, _) = service();
        service.start().unwrap();

        let err = service
            .invoke(&CommandId::new("apollo.missing").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Command(CommandError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn duplicate_registration_fails_construction() {
        let registry = CommandRegistry::new();
        registry
            .register_named(|| ShutdownApplicationCommand::new(|| {}))
            .unwrap();

        let result = UserInterfaceService::new(
            &registry,
            Arc::new(Core::default()),
            Arc::new(InMemoryProjectService::new()),
        );
        assert!(matches!(
            result,
            Err(AppError::Command(CommandError::DuplicateCommand { .. }))
        ));
    }

    #[test]
    fn stop_removes_commands_and_blocks_invoke() {
        let (service, _) = service();
        service.start().unwrap();
        service.stop();
        service.stop();

        assert_eq!(service.state(), StartupState::Stopped);
        assert!(service.commands().is_empty());
        assert!(matches!(
            service.invoke(&CreateProjectCommand::command_id()),
            Err(AppError::ServiceNotFullyFunctional { .. })
        ));
        assert!(matches!(
            service.start(),
            Err(AppError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn failed_construction_leaves_container_untouched() {
        let registry = CommandRegistry::new();
        registry
            .register_named(|| CreateProjectCommand::new(|| Err(AppError::FailedToCreateProject)))
            .unwrap();

        let result = UserInterfaceService::new(
            &registry,
            Arc::new(Core::default()),
            Arc::new(InMemoryProjectService::new()),
        );
        assert!(matches!(
            result,
            Err(AppError::Command(CommandError::DuplicateCommand { .. }))
        ));
        assert_eq!(registry.ids(), vec![CreateProjectCommand::command_id()]);
    }

    #[test]
    fn stop_spares_commands_registered_by_others() {
        let registry = CommandRegistry::new();
        let service = UserInterfaceService::new(
            &registry,
            Arc::new(Core::default()),
            Arc::new(InMemoryProjectService::new()),
        )
        .unwrap();

        // 其他模块替换了关闭命令
        let shutdown = ShutdownApplicationCommand::command_id();
        assert!(registry.remove(&shutdown));
        registry
            .register_named(|| ShutdownApplicationCommand::new(|| {}))
            .unwrap();

        service.stop();
        assert_eq!(registry.ids(), vec![shutdown]);
    }
}
