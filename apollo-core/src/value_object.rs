//! 值对象
//!
//! 以值相等为准、构造后不可变的类型。`#[identifier]` 生成的所有构造入口
//! 都会经过 [`ValueObject::validate`]，保证非法值无法被创建出来。
//!

/// 可自校验的值类型
pub trait ValueObject {
    /// 校验失败时返回的错误
    type Error;

    fn validate(&self) -> Result<(), Self::Error>;
}
