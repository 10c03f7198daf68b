//! Apollo 命令子系统（apollo-core）
//!
//! 把“谁定义命令”与“谁按名调用命令”解耦：
//! - 命令标识（`command_id`）：以名称为值的 `CommandId`
//! - 命令与激活器（`command` / `activator`）：激活器按需构造命令实例
//! - 执行上下文（`context`）：参数包与结果槽
//! - 容器能力（`container`）：`InvokeCommands` / `HaveCommands` / `CommandContainer`
//! - 注册表实现：单线程 `CommandRegistry` 与整表加锁的 `SyncCommandRegistry`
//! - 模块级注册范围（`scoped`）：拆除时自动移除本模块注册的命令
//!
//! 典型用法：
//! ```rust
//! use apollo_core::prelude::*;
//!
//! #[command(id = "apollo.save")]
//! struct SaveCommand;
//!
//! impl Command for SaveCommand {
//!     fn execute(&self, ctx: &mut CommandContext) -> CommandResult<()> {
//!         ctx.set_result("saved");
//!         Ok(())
//!     }
//! }
//!
//! let registry = CommandRegistry::new();
//! registry.register_named(|| SaveCommand).unwrap();
//!
//! let mut ctx = CommandContext::new();
//! registry.invoke(&SaveCommand::command_id(), &mut ctx).unwrap();
//! assert_eq!(ctx.take_result::<&'static str>().unwrap(), Some("saved"));
//! ```
//!
pub mod activator;
pub mod command;
pub mod command_id;
pub mod container;
pub mod context;
pub mod error;
pub mod registry;
pub mod scoped;
pub mod sync_registry;
pub mod value_object;

pub use apollo_macros::{command, identifier};
pub use registry::CommandRegistry;
pub use scoped::ScopedCommands;
pub use sync_registry::SyncCommandRegistry;

pub mod prelude {
    pub use crate::activator::{CommandActivator, SharedActivator, activator};
    pub use crate::command::{Command, NamedCommand};
    pub use crate::command_id::CommandId;
    pub use crate::container::{CommandContainer, CommandContainerExt, HaveCommands, InvokeCommands};
    pub use crate::context::CommandContext;
    pub use crate::error::{CommandError, CommandResult};
    pub use crate::registry::CommandRegistry;
    pub use crate::scoped::ScopedCommands;
    pub use crate::sync_registry::SyncCommandRegistry;
    pub use apollo_macros::command;
}

// 允许在本 crate 内部通过 ::apollo_core 进行自引用，
// 以便过程宏生成的路径在本 crate 中也能解析。
extern crate self as apollo_core;
