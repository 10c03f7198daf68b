use std::any::{Any, type_name};
use std::fmt;

use bon::Builder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{CommandError, CommandResult};

/// 命令执行上下文（Command Context）
///
/// 注册表不关心具体命令的参数形状，只负责把上下文原样交给命令：
/// - 关联追踪 `correlation_id`（可选）；
/// - 键值参数：以 JSON 值保存，读取时按调用方期望的类型解码；
///   需要强类型参数的命令可用 [`CommandContext::params`] 一次解码成专属结构体；
/// - 结果槽：命令可通过 [`CommandContext::set_result`] 把产出交还给调用方。
///
/// 典型用法：
/// ```rust
/// use apollo_core::context::CommandContext;
///
/// let mut ctx = CommandContext::builder()
///     .correlation_id("cor-1".to_string())
///     .build()
///     .with_param("path", &"/tmp/project.apollo")
///     .unwrap();
///
/// let path: String = ctx.get("path").unwrap();
/// assert_eq!(path, "/tmp/project.apollo");
///
/// ctx.set_result(42_u32);
/// assert_eq!(ctx.take_result::<u32>().unwrap(), Some(42));
/// ```
#[derive(Builder, Default)]
pub struct CommandContext {
    /// 关联 ID
    correlation_id: Option<String>,
    /// 命令参数
    #[builder(default)]
    params: Map<String, Value>,
    /// 结果槽：（类型名, 值）
    #[builder(skip)]
    result: Option<(&'static str, Box<dyn Any + Send>)>,
}

impl CommandContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// 写入参数（覆盖同名参数）
    pub fn insert<T>(&mut self, key: impl Into<String>, value: &T) -> CommandResult<()>
    where
        T: Serialize + ?Sized,
    {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| CommandError::InvalidContext {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.params.insert(key, value);
        Ok(())
    }

    pub fn with_param<T>(mut self, key: impl Into<String>, value: &T) -> CommandResult<Self>
    where
        T: Serialize + ?Sized,
    {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.params.remove(key)
    }

    /// 读取必填参数；缺失或类型不符时返回 `InvalidContext`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> CommandResult<T> {
        let value = self
            .params
            .get(key)
            .ok_or_else(|| CommandError::InvalidContext {
                key: key.to_string(),
                reason: "missing".to_string(),
            })?;
        T::deserialize(value).map_err(|e| CommandError::InvalidContext {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// 读取可选参数；存在但类型不符时仍然报错
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> CommandResult<Option<T>> {
        if self.params.contains_key(key) {
            self.get(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// 把全部参数解码为命令专属的参数结构体
    pub fn params<P: DeserializeOwned>(&self) -> CommandResult<P> {
        P::deserialize(Value::Object(self.params.clone())).map_err(|e| {
            CommandError::InvalidContext {
                key: type_name::<P>().to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// 设置结果（覆盖旧值）
    pub fn set_result<T: Any + Send>(&mut self, value: T) {
        self.result = Some((type_name::<T>(), Box::new(value)));
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// 取出结果；槽中类型不符时返回 `TypeMismatch` 且保留原值
    pub fn take_result<T: Any>(&mut self) -> CommandResult<Option<T>> {
        let Some((found, boxed)) = self.result.take() else {
            return Ok(None);
        };

        match boxed.downcast::<T>() {
            Ok(value) => Ok(Some(*value)),
            Err(boxed) => {
                self.result = Some((found, boxed));
                Err(CommandError::TypeMismatch {
                    expected: type_name::<T>(),
                    found,
                })
            }
        }
    }
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("correlation_id", &self.correlation_id)
            .field("params", &self.params)
            .field("result", &self.result.as_ref().map(|(name, _)| *name))
            .finish()
    }
}
