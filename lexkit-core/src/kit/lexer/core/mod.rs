//! 词法分析基础设施

pub mod span;

pub use span::Span;
