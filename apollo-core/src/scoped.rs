use crate::activator::SharedActivator;
use crate::command::NamedCommand;
use crate::command_id::CommandId;
use crate::container::CommandContainer;
use crate::error::CommandResult;
use std::ops::Deref;
use std::sync::Arc;

/// 模块级的命令注册范围
///
/// 记录通过自身注册的全部 ID，在 [`teardown`](ScopedCommands::teardown) 或 drop 时
/// 将它们从容器中移除；容器中由其他模块注册的条目不受影响。
///
/// `P` 可以是 `&C`、`Rc<C>`、`Arc<C>` 等任意指向容器的指针。
pub struct ScopedCommands<P>
where
    P: Deref,
    P::Target: CommandContainer,
{
    container: P,
    owned: Vec<(CommandId, SharedActivator)>,
}

impl<P> ScopedCommands<P>
where
    P: Deref,
    P::Target: CommandContainer,
{
    pub fn new(container: P) -> Self {
        Self {
            container,
            owned: Vec::new(),
        }
    }

    pub fn add(&mut self, id: CommandId, activator: SharedActivator) -> CommandResult<()> {
        self.container.add(id.clone(), activator.clone())?;
        self.owned.push((id, activator));
        Ok(())
    }

    pub fn register_named<C, F>(&mut self, factory: F) -> CommandResult<()>
    where
        C: NamedCommand,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.add(C::command_id(), Arc::new(factory))
    }

    /// 本范围注册的 ID（按注册顺序）
    pub fn ids(&self) -> Vec<CommandId> {
        self.owned.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn container(&self) -> &P::Target {
        &self.container
    }

    /// 显式拆除；与 drop 等价
    pub fn teardown(self) {}

    // 只移除仍由本范围持有的条目
    fn remove_all(&mut self) {
        for (id, activator) in self.owned.drain(..).rev() {
            self.container.remove_owned(&id, &activator);
        }
    }
}

impl<P> Drop for ScopedCommands<P>
where
    P: Deref,
    P::Target: CommandContainer,
{
    fn drop(&mut self) {
        if !self.owned.is_empty() {
            tracing::debug!(count = self.owned.len(), "tearing down scoped commands");
        }
        self.remove_all();
    }
}
