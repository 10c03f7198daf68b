//! Apollo 的过程宏
//!
//! - `#[identifier]`：为 `struct X(String);` 形式的标识符类型生成值语义与校验构造
//! - `#[command(id = "...")]`：为命令类型绑定稳定的 `CommandId`
//!
use proc_macro::TokenStream;

mod command;
mod derive_utils;
mod identifier;

/// 标识符宏
///
/// 生成的构造函数都会调用 `ValueObject::validate`，因此目标类型必须实现
/// `::apollo_core::value_object::ValueObject`。
///
/// 参数：`#[identifier(debug = false)]` 可关闭 `Debug` 派生。
#[proc_macro_attribute]
pub fn identifier(attr: TokenStream, item: TokenStream) -> TokenStream {
    identifier::expand(attr, item)
}

/// 命令宏
///
/// ```ignore
/// #[command(id = "apollo.save")]
/// struct SaveCommand;
///
/// assert_eq!(SaveCommand::ID, "apollo.save");
/// ```
#[proc_macro_attribute]
pub fn command(attr: TokenStream, item: TokenStream) -> TokenStream {
    command::expand(attr, item)
}
