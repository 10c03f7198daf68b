//! 命令子系统统一错误定义
//!
//! 注册冲突与未知命令属于组装期的编程错误：同步返回给调用方，
//! 不重试、不吞掉，由组合根决定是否终止启动。
//!
use thiserror::Error;

use crate::command_id::CommandId;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CommandError {
    // --- 注册表 ---
    #[error("command already registered: id={id}")]
    DuplicateCommand { id: CommandId },
    #[error("unknown command: id={id}")]
    UnknownCommand { id: CommandId },
    #[error("invalid command id: {reason}")]
    InvalidCommandId { reason: String },

    // --- 执行 ---
    #[error("command cannot execute in the current context: id={id}")]
    CommandNotExecutable { id: CommandId },
    #[error("invalid context parameter: key={key}, reason={reason}")]
    InvalidContext { key: String, reason: String },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("command execution failed: {reason}")]
    Execution { reason: String },
}

impl CommandError {
    /// 命令自身的执行失败
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }

    /// 组装期错误（重复注册 / 未知命令 / 非法 id）
    pub fn is_wiring_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCommand { .. }
                | Self::UnknownCommand { .. }
                | Self::InvalidCommandId { .. }
        )
    }
}

/// 统一 Result 类型别名
pub type CommandResult<T> = Result<T, CommandError>;
