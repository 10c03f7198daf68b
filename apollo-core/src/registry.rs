use crate::activator::SharedActivator;
use crate::command_id::CommandId;
use crate::container::{CommandContainer, HaveCommands, InvokeCommands, activate_and_run};
use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// ID → 激活器映射，两种注册表共用的无锁核心
#[derive(Default)]
pub(crate) struct CommandTable {
    activators: HashMap<CommandId, SharedActivator>,
}

impl CommandTable {
    pub(crate) fn add(&mut self, id: CommandId, activator: SharedActivator) -> CommandResult<()> {
        if self.activators.contains_key(&id) {
            tracing::warn!(command = %id, "rejected duplicate command registration");
            return Err(CommandError::DuplicateCommand { id });
        }

        tracing::debug!(command = %id, "command registered");
        self.activators.insert(id, activator);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &CommandId) -> bool {
        let removed = self.activators.remove(id).is_some();
        if removed {
            tracing::debug!(command = %id, "command removed");
        }
        removed
    }

    pub(crate) fn remove_owned(&mut self, id: &CommandId, activator: &SharedActivator) -> bool {
        let owned = self
            .activators
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, activator));
        if !owned {
            tracing::debug!(command = %id, "skipped removal of a command registered elsewhere");
            return false;
        }
        self.remove(id)
    }

    pub(crate) fn lookup(&self, id: &CommandId) -> CommandResult<SharedActivator> {
        self.activators
            .get(id)
            .cloned()
            .ok_or_else(|| CommandError::UnknownCommand { id: id.clone() })
    }

    pub(crate) fn contains(&self, id: &CommandId) -> bool {
        self.activators.contains_key(id)
    }

    pub(crate) fn ids(&self) -> Vec<CommandId> {
        let mut ids: Vec<CommandId> = self.activators.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn len(&self) -> usize {
        self.activators.len()
    }
}

/// 单线程命令注册表
///
/// 面向 UI/组装线程使用：内部以 `RefCell` 持有映射，类型本身不是 `Sync`，
/// 编译器会阻止它被跨线程共享。多线程宿主请使用
/// [`SyncCommandRegistry`](crate::sync_registry::SyncCommandRegistry)。
///
/// 调用时先取出激活器再释放借用，命令执行期间不持有内部借用。
#[derive(Default)]
pub struct CommandRegistry {
    table: RefCell<CommandTable>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InvokeCommands for CommandRegistry {
    fn invoke(&self, id: &CommandId, ctx: &mut CommandContext) -> CommandResult<()> {
        let activator = self.table.borrow().lookup(id)?;
        tracing::trace!(command = %id, correlation_id = ctx.correlation_id(), "invoking command");
        activate_and_run(id, &activator, ctx)
    }
}

impl HaveCommands for CommandRegistry {
    fn contains(&self, id: &CommandId) -> bool {
        self.table.borrow().contains(id)
    }

    fn ids(&self) -> Vec<CommandId> {
        self.table.borrow().ids()
    }
}

impl CommandContainer for CommandRegistry {
    fn add(&self, id: CommandId, activator: SharedActivator) -> CommandResult<()> {
        self.table.borrow_mut().add(id, activator)
    }

    fn remove(&self, id: &CommandId) -> bool {
        self.table.borrow_mut().remove(id)
    }

    fn remove_owned(&self, id: &CommandId, activator: &SharedActivator) -> bool {
        self.table.borrow_mut().remove_owned(id, activator)
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
