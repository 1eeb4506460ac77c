//! 识别器状态代数
//!
//! 一次识别尝试的状态只有五种：
//!
//! ```text
//! Idle ──首字符──▶ Building ──后续字符──▶ Building
//!   │                 │
//!   └──────────┬──────┘
//!              ▼
//!   Finished | Cancelled | Failed   （本次尝试的终态）
//! ```
//!
//! - `Cancelled` 表示"这里没有 token"，是正常结果
//! - `Failed` 是错误，总是原样传到调用栈顶部
//!
//! 组合子的中间状态（候选列表、子识别器进度）作为 [`Progress`] 挂在 [`Building`] 上，
//! 由本次尝试独占，识别器本身保持无状态。

use std::fmt;

use super::alternative::Candidate;
use super::core::Span;
use super::sequence::SequenceProgress;
use super::token::Token;
use super::types::TokenKind;

/// 识别器状态
#[derive(Debug, Clone, PartialEq)]
pub enum Status<K> {
    /// 尚未处理任何字符
    Idle { kind: K },
    /// 已消费若干字符，还需要下一个字符才能下结论
    Building(Building<K>),
    /// 识别成功
    Finished(Token<K>),
    /// 此处没有 token，不是错误
    Cancelled { kind: K, span: Span },
    /// 解析错误
    Failed {
        kind: K,
        span: Span,
        reason: String,
    },
}

impl<K: TokenKind> Status<K> {
    pub fn cancelled(kind: K, span: Span) -> Self {
        Status::Cancelled { kind, span }
    }

    pub fn failed(kind: K, span: Span, reason: impl Into<String>) -> Self {
        Status::Failed {
            kind,
            span,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> K {
        match self {
            Status::Idle { kind }
            | Status::Cancelled { kind, .. }
            | Status::Failed { kind, .. } => *kind,
            Status::Building(building) => building.kind,
            Status::Finished(token) => token.kind(),
        }
    }

    /// 当前区间，`Idle` 没有区间
    pub fn span(&self) -> Option<Span> {
        match self {
            Status::Idle { .. } => None,
            Status::Building(building) => Some(building.span),
            Status::Finished(token) => Some(token.span()),
            Status::Cancelled { span, .. } | Status::Failed { span, .. } => Some(*span),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Status::Idle { .. } => "IDLE",
            Status::Building(_) => "BUILDING",
            Status::Finished(_) => "FINISHED",
            Status::Cancelled { .. } => "CANCELLED",
            Status::Failed { .. } => "FAILED",
        }
    }

    /// 本次尝试是否已经结束
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Status::Finished(_) | Status::Cancelled { .. } | Status::Failed { .. }
        )
    }

    /// `Finished` 时产出 token
    pub fn create_token(&self) -> Option<Token<K>> {
        match self {
            Status::Finished(token) => Some(token.clone()),
            _ => None,
        }
    }

    /// `Failed` 时返回原因
    pub fn reason(&self) -> Option<&str> {
        match self {
            Status::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl<K: TokenKind> fmt::Display for Status<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {:?}", self.name(), self.kind())
    }
}

/// 进行中的识别：已消费的区间加上识别器私有的进度
///
/// `span.finish()` 总是最后一个已消费字符的下标，下一个字符位于 `finish + 1`。
#[derive(Debug, Clone, PartialEq)]
pub struct Building<K> {
    pub(crate) kind: K,
    pub(crate) span: Span,
    pub(crate) progress: Progress<K>,
}

/// 组合子挂在 [`Building`] 上的进度
#[derive(Debug, Clone, PartialEq)]
pub enum Progress<K> {
    /// 叶子识别器只需要区间
    Leaf,
    /// 择一组合子仍在竞争的候选
    Race(Vec<Candidate<K>>),
    /// 序列组合子的进度记录
    Sequence(Box<SequenceProgress<K>>),
}

impl<K: TokenKind> Building<K> {
    /// 叶子识别器的进行中状态
    pub fn new(kind: K, span: Span) -> Self {
        Self {
            kind,
            span,
            progress: Progress::Leaf,
        }
    }

    pub(crate) fn with_progress(kind: K, span: Span, progress: Progress<K>) -> Self {
        Self {
            kind,
            span,
            progress,
        }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn progress(&self) -> &Progress<K> {
        &self.progress
    }

    /// 下一个字符的位置
    pub fn next_position(&self) -> usize {
        self.span.finish() + 1
    }

    /// 消费当前字符，继续构建
    pub fn extend(mut self) -> Status<K> {
        self.span = self.span.stretch();
        Status::Building(self)
    }

    /// 以已消费的区间结束，当前字符留给下一次尝试
    pub fn finish_here(self) -> Status<K> {
        Status::Finished(Token::new(self.kind, self.span))
    }

    /// 消费当前字符后结束
    pub fn finish_with_next(self) -> Status<K> {
        Status::Finished(Token::new(self.kind, self.span.stretch()))
    }

    /// 以已消费的区间取消
    pub fn cancel_here(self) -> Status<K> {
        Status::Cancelled {
            kind: self.kind,
            span: self.span,
        }
    }

    pub fn fail(self, reason: impl Into<String>) -> Status<K> {
        Status::failed(self.kind, self.span, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Word,
    }

    impl TokenKind for Kind {}

    #[test]
    fn test_status_display() {
        let idle = Status::Idle { kind: Kind::Word };
        assert_eq!(idle.to_string(), "IDLE of Word");
        assert_eq!(idle.span(), None);
        assert!(!idle.is_terminal());

        let cancelled = Status::cancelled(Kind::Word, Span::at(2));
        assert_eq!(cancelled.to_string(), "CANCELLED of Word");
        assert!(cancelled.is_terminal());
    }

    #[test]
    fn test_building_transitions() {
        let building = Building::new(Kind::Word, Span::at(0));
        assert_eq!(building.next_position(), 1);

        let Status::Building(building) = building.extend() else {
            panic!("expected BUILDING");
        };
        assert_eq!(building.span(), Span::new(0, 1).unwrap());

        let here = building.clone().finish_here();
        assert_eq!(
            here.create_token(),
            Some(Token::leaf(Kind::Word, 0, 1).unwrap())
        );

        let next = building.clone().finish_with_next();
        assert_eq!(next.span(), Some(Span::new(0, 2).unwrap()));

        let failed = building.fail("bad");
        assert_eq!(failed.reason(), Some("bad"));
        assert_eq!(failed.create_token(), None);
    }
}
