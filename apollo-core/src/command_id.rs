//! 命令标识（CommandId）
//!
//! 以名称为值的不可变标识，相等、哈希与排序都只看名称（按字节序比较）。
//!
use apollo_macros::identifier;

use crate::error::CommandError;
use crate::value_object::ValueObject;

/// 命令标识
///
/// # 示例
///
/// ```
/// use apollo_core::command_id::CommandId;
///
/// let save = CommandId::new("save").unwrap();
/// assert_eq!(save.as_str(), "save");
/// assert_eq!(save, "save".parse().unwrap());
/// assert!(CommandId::new("a").unwrap() < CommandId::new("b").unwrap());
/// assert!(CommandId::new("  ").is_err());
/// ```
#[identifier]
pub struct CommandId(String);

impl ValueObject for CommandId {
    type Error = CommandError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.trim().is_empty() {
            return Err(CommandError::InvalidCommandId {
                reason: "name must not be empty".to_string(),
            });
        }
        if self.0.trim() != self.0 {
            return Err(CommandError::InvalidCommandId {
                reason: format!("name must not start or end with whitespace: {:?}", self.0),
            });
        }
        Ok(())
    }
}

impl CommandId {
    // `#[command]` 宏在编译期已校验过字面量
    #[doc(hidden)]
    pub fn __from_checked(name: &'static str) -> Self {
        Self(name.to_string())
    }
}
