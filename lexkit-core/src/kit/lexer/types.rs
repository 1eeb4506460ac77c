use std::fmt;

/// 字符下标（按 Unicode 码点计数，0-based）
pub type Position = usize;

// 定义组合 trait，包含 token 类型需要的所有约束
pub trait TokenKind: fmt::Debug + Copy + PartialEq + Eq + Send + Sync + 'static {}

/// 字符判定函数
pub type CharPredicate = Box<dyn Fn(char) -> bool + Send + Sync + 'static>;
