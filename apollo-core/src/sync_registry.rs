use crate::activator::SharedActivator;
use crate::command_id::CommandId;
use crate::container::{CommandContainer, HaveCommands, InvokeCommands, activate_and_run};
use crate::context::CommandContext;
use crate::error::CommandResult;
use crate::registry::CommandTable;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 线程安全的命令注册表
///
/// - 注册、移除与查找都在同一把整表互斥锁下串行进行；
/// - 调用时只在锁内克隆激活器，命令在锁外构造与执行，
///   因此命令可以在执行中再次访问本注册表而不会死锁。
#[derive(Default)]
pub struct SyncCommandRegistry {
    table: Mutex<CommandTable>,
}

impl SyncCommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // 每个操作对映射的修改都是单步完成的，中毒后的数据依然一致
    fn lock(&self) -> MutexGuard<'_, CommandTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InvokeCommands for SyncCommandRegistry {
    fn invoke(&self, id: &CommandId, ctx: &mut CommandContext) -> CommandResult<()> {
        let activator = self.lock().lookup(id)?;
        tracing::trace!(command = %id, correlation_id = ctx.correlation_id(), "invoking command");
        activate_and_run(id, &activator, ctx)
    }
}

impl HaveCommands for SyncCommandRegistry {
    fn contains(&self, id: &CommandId) -> bool {
        self.lock().contains(id)
    }

    fn ids(&self) -> Vec<CommandId> {
        self.lock().ids()
    }
}

impl CommandContainer for SyncCommandRegistry {
    fn add(&self, id: CommandId, activator: SharedActivator) -> CommandResult<()> {
        self.lock().add(id, activator)
    }

    fn remove(&self, id: &CommandId) -> bool {
        self.lock().remove(id)
    }

    fn remove_owned(&self, id: &CommandId, activator: &SharedActivator) -> bool {
        self.lock().remove_owned(id, activator)
    }
}

impl fmt::Debug for SyncCommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncCommandRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
