use crate::{command_id::CommandId, context::CommandContext, error::CommandResult};

/// 命令（Command）
///
/// 一个可被按名调用的工作单元：
/// - `can_execute`：守卫，判断在给定上下文下能否执行，默认总是可以；
/// - `execute`：动作本身，可读取参数并向上下文写入结果。
///
/// 命令实例由激活器（见 [`CommandActivator`](crate::activator::CommandActivator)）
/// 在每次调用时构造，注册表不会缓存命令实例。
pub trait Command: 'static {
    fn can_execute(&self, _ctx: &CommandContext) -> bool {
        true
    }

    fn execute(&self, ctx: &mut CommandContext) -> CommandResult<()>;
}

impl<C: Command + ?Sized> Command for Box<C> {
    fn can_execute(&self, ctx: &CommandContext) -> bool {
        (**self).can_execute(ctx)
    }

    fn execute(&self, ctx: &mut CommandContext) -> CommandResult<()> {
        (**self).execute(ctx)
    }
}

/// 具有稳定 ID 的命令类型
///
/// 通常由 `#[command(id = "...")]` 生成，避免在注册与调用两处重复书写字符串。
pub trait NamedCommand: Command {
    /// 命令的稳定名称（常量字符串，不随重构变化）
    const ID: &'static str;

    fn command_id() -> CommandId;
}
