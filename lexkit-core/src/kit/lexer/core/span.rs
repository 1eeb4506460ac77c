//! 源文本区间
//!
//! 闭区间 `[start, finish]`，按字符（码点）计数。构造时校验 `start <= finish`，
//! 下标为 `usize`，天然非负。

use serde::Serialize;

use crate::kit::lexer::error::BuildError;
use crate::kit::lexer::types::Position;

/// 源代码区间（Span），两端都包含
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    start: Position,
    finish: Position,
}

impl Span {
    /// 创建新区间，`start > finish` 时返回错误
    pub fn new(start: Position, finish: Position) -> Result<Self, BuildError> {
        if start > finish {
            return Err(BuildError::InvalidSpan { start, finish });
        }
        Ok(Self { start, finish })
    }

    /// 单字符区间
    pub fn at(pos: Position) -> Self {
        Self {
            start: pos,
            finish: pos,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn finish(&self) -> Position {
        self.finish
    }

    /// 字符个数
    pub fn length(&self) -> usize {
        self.finish - self.start + 1
    }

    /// 向右延伸一个字符
    #[must_use]
    pub fn stretch(self) -> Self {
        self.stretch_by(1)
    }

    /// 向右延伸 `extent` 个字符
    #[must_use]
    pub fn stretch_by(self, extent: usize) -> Self {
        Self {
            start: self.start,
            finish: self.finish + extent,
        }
    }

    /// 把右端延伸到 `finish`（不会收缩）
    #[must_use]
    pub(crate) fn reach(self, finish: Position) -> Self {
        Self {
            start: self.start,
            finish: self.finish.max(finish),
        }
    }

    /// `other` 是否完全落在本区间内
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.finish <= self.finish
    }

    /// 从源文本中截取本区间对应的子串；区间越界时返回 `None`
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        let mut indices = source.char_indices().map(|(offset, _)| offset);
        let begin = indices.nth(self.start)?;
        let end = indices
            .nth(self.finish - self.start)
            .unwrap_or(source.len());
        // nth 返回 None 时需要确认 finish 恰好是最后一个字符
        if end == source.len() && source[begin..].chars().count() != self.length() {
            return None;
        }
        Some(&source[begin..end])
    }
}
