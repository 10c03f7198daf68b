//! 命令容器能力划分
//!
//! - [`InvokeCommands`]：按 ID 调用命令（只读侧）
//! - [`HaveCommands`]：查询已注册的命令（只读侧）
//! - [`CommandContainer`]：在两者之上增加注册与移除（写侧）
//!
//! 所有方法都以 `&self` 接收，具体实现决定内部可变性与线程安全策略。
//!
use crate::activator::{CommandActivator, SharedActivator};
use crate::command::{Command, NamedCommand};
use crate::command_id::CommandId;
use crate::context::CommandContext;
use crate::error::{CommandError, CommandResult};
use std::sync::Arc;

pub trait InvokeCommands {
    /// 构造一个新的命令实例并以 `ctx` 执行
    ///
    /// - 未注册的 `id` 返回 `UnknownCommand`，且不产生任何副作用；
    /// - 守卫返回 false 时返回 `CommandNotExecutable`，命令不会执行；
    /// - 命令自身的错误原样返回。
    fn invoke(&self, id: &CommandId, ctx: &mut CommandContext) -> CommandResult<()>;

    /// 以空上下文调用
    fn invoke_default(&self, id: &CommandId) -> CommandResult<()> {
        self.invoke(id, &mut CommandContext::default())
    }
}

pub trait HaveCommands {
    fn contains(&self, id: &CommandId) -> bool;

    /// 已注册的全部 ID（按 `CommandId` 排序）
    fn ids(&self) -> Vec<CommandId>;
}

pub trait CommandContainer: InvokeCommands + HaveCommands {
    /// 注册激活器；ID 已存在时返回 `DuplicateCommand`，原有条目保持不变
    fn add(&self, id: CommandId, activator: SharedActivator) -> CommandResult<()>;

    /// 移除条目，返回是否确实移除了；移除不存在的 ID 不是错误
    fn remove(&self, id: &CommandId) -> bool;

    /// 仅当 `id` 当前登记的正是 `activator`（同一个 `Arc`）时才移除
    ///
    /// 用于拆除自己注册过的条目：条目若已被移除并由他人重新注册，则保持不动。
    fn remove_owned(&self, id: &CommandId, activator: &SharedActivator) -> bool;
}

/// 便捷注册方法，对所有容器可用
pub trait CommandContainerExt: CommandContainer {
    fn register<A>(&self, id: CommandId, activator: A) -> CommandResult<()>
    where
        A: CommandActivator + 'static,
    {
        self.add(id, Arc::new(activator))
    }

    /// 以命令类型自带的 ID 注册
    fn register_named<C, F>(&self, factory: F) -> CommandResult<()>
    where
        C: NamedCommand,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.add(C::command_id(), Arc::new(factory))
    }

    /// 以命令类型自带的 ID 调用
    fn invoke_named<C: NamedCommand>(&self, ctx: &mut CommandContext) -> CommandResult<()> {
        self.invoke(&C::command_id(), ctx)
    }

    fn remove_named<C: NamedCommand>(&self) -> bool {
        self.remove(&C::command_id())
    }
}

impl<T: CommandContainer + ?Sized> CommandContainerExt for T {}

// 智能指针透传，方便以 `Arc<dyn CommandContainer>` 等形式共享
macro_rules! forward_container {
    ($($ptr:ty),*) => {$(
        impl<T: InvokeCommands + ?Sized> InvokeCommands for $ptr {
            fn invoke(&self, id: &CommandId, ctx: &mut CommandContext) -> CommandResult<()> {
                (**self).invoke(id, ctx)
            }
        }

        impl<T: HaveCommands + ?Sized> HaveCommands for $ptr {
            fn contains(&self, id: &CommandId) -> bool {
                (**self).contains(id)
            }

            fn ids(&self) -> Vec<CommandId> {
                (**self).ids()
            }
        }

        impl<T: CommandContainer + ?Sized> CommandContainer for $ptr {
            fn add(&self, id: CommandId, activator: SharedActivator) -> CommandResult<()> {
                (**self).add(id, activator)
            }

            fn remove(&self, id: &CommandId) -> bool {
                (**self).remove(id)
            }

            fn remove_owned(&self, id: &CommandId, activator: &SharedActivator) -> bool {
                (**self).remove_owned(id, activator)
            }
        }
    )*};
}

forward_container!(&T, Arc<T>, std::rc::Rc<T>, Box<T>);

/// 激活并执行，供各注册表实现复用
pub(crate) fn activate_and_run(
    id: &CommandId,
    activator: &SharedActivator,
    ctx: &mut CommandContext,
) -> CommandResult<()> {
    let command: Box<dyn Command> = activator.activate();
    if !command.can_execute(ctx) {
        tracing::debug!(command = %id, "command refused to execute");
        return Err(CommandError::CommandNotExecutable { id: id.clone() });
    }
    command.execute(ctx)
}

