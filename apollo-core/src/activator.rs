use crate::command::Command;
use std::sync::Arc;

/// 命令激活器
///
/// 零参数工厂：每次调用 [`activate`](CommandActivator::activate) 产出一个命令实例。
/// 返回新实例还是共享实例由激活器自行决定。
/// 任何 `Fn() -> C`（`C: Command`）闭包都自动是激活器。
pub trait CommandActivator: Send + Sync {
    fn activate(&self) -> Box<dyn Command>;
}

impl<F, C> CommandActivator for F
where
    F: Fn() -> C + Send + Sync,
    C: Command,
{
    fn activate(&self) -> Box<dyn Command> {
        Box::new(self())
    }
}

/// 注册表内部保存的激活器句柄
pub type SharedActivator = Arc<dyn CommandActivator>;

/// 把闭包或激活器对象包装成 [`SharedActivator`]
pub fn activator<A>(a: A) -> SharedActivator
where
    A: CommandActivator + 'static,
{
    Arc::new(a)
}
