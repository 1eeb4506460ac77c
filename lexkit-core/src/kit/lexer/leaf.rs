//! 叶子识别器
//!
//! - [`Predicate`]：连续满足判定函数的字符组成一个 token（单词、空白、数字）
//! - [`SingleChar`]：恰好一个目标字符（逗号、括号），从不进入 `Building`

use std::fmt;

use super::core::Span;
use super::recognizer::Recognizer;
use super::status::{Building, Status};
use super::token::Token;
use super::types::{CharPredicate, Position, TokenKind};

/// 判定函数驱动的多字符识别器
///
/// 打破判定的那个字符不会被消费，留给下一次尝试；输入结束时直接 `Finished`。
pub struct Predicate<K> {
    kind: K,
    accepts: CharPredicate,
}

impl<K: TokenKind> Predicate<K> {
    pub fn new<F>(kind: K, accepts: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self {
            kind,
            accepts: Box::new(accepts),
        }
    }

    /// 字母或数字组成的单词
    pub fn word(kind: K) -> Self {
        Self::new(kind, char::is_alphanumeric)
    }

    pub fn whitespace(kind: K) -> Self {
        Self::new(kind, char::is_whitespace)
    }

    /// 无符号整数，允许前导零
    pub fn number(kind: K) -> Self {
        Self::new(kind, |c: char| c.is_ascii_digit())
    }
}

impl<K: TokenKind> Recognizer<K> for Predicate<K> {
    fn kind(&self) -> K {
        self.kind
    }

    fn start(&self, ch: char, pos: Position) -> Status<K> {
        if (self.accepts)(ch) {
            Status::Building(Building::new(self.kind, Span::at(pos)))
        } else {
            Status::cancelled(self.kind, Span::at(pos))
        }
    }

    fn start_last(&self, ch: char, pos: Position) -> Status<K> {
        if (self.accepts)(ch) {
            Status::Finished(Token::new(self.kind, Span::at(pos)))
        } else {
            Status::cancelled(self.kind, Span::at(pos))
        }
    }

    fn resume(&self, ch: char, building: Building<K>) -> Status<K> {
        if (self.accepts)(ch) {
            building.extend()
        } else {
            building.finish_here()
        }
    }

    fn resume_last(&self, ch: char, building: Building<K>) -> Status<K> {
        if (self.accepts)(ch) {
            building.finish_with_next()
        } else {
            building.finish_here()
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Predicate<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("kind", &self.kind)
            .finish()
    }
}

/// 单字符识别器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleChar<K> {
    kind: K,
    target: char,
}

impl<K: TokenKind> SingleChar<K> {
    pub fn new(kind: K, target: char) -> Self {
        Self { kind, target }
    }

    pub fn target(&self) -> char {
        self.target
    }
}

impl<K: TokenKind> Recognizer<K> for SingleChar<K> {
    fn kind(&self) -> K {
        self.kind
    }

    fn start(&self, ch: char, pos: Position) -> Status<K> {
        self.start_last(ch, pos)
    }

    fn start_last(&self, ch: char, pos: Position) -> Status<K> {
        if ch == self.target {
            Status::Finished(Token::new(self.kind, Span::at(pos)))
        } else {
            Status::cancelled(self.kind, Span::at(pos))
        }
    }

    fn resume(&self, _ch: char, building: Building<K>) -> Status<K> {
        let reason = format!(
            "Single char recognizer for '{}' cannot be resumed",
            self.target
        );
        building.fail(reason)
    }

    fn resume_last(&self, ch: char, building: Building<K>) -> Status<K> {
        self.resume(ch, building)
    }
}
