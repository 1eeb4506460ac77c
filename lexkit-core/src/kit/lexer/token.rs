//! Token 与复合 Token
//!
//! Token 一旦产出即不可变。复合 Token 额外持有有序、互不重叠、被父区间包含的子 Token，
//! 构造时校验，违反即报错。

use std::fmt;

use serde::Serialize;

use super::core::Span;
use super::error::BuildError;
use super::types::{Position, TokenKind};

/// Token 结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<K> {
    #[serde(rename = "type")]
    kind: K,
    #[serde(flatten)]
    span: Span,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Token<K>>,
}

impl<K: TokenKind> Token<K> {
    /// 创建叶子 token
    pub fn new(kind: K, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// 由起止下标创建叶子 token
    pub fn leaf(kind: K, start: Position, finish: Position) -> Result<Self, BuildError> {
        Ok(Self::new(kind, Span::new(start, finish)?))
    }

    /// 创建复合 token
    ///
    /// 每个子 token 的 start 不能小于前一个子 token 的 finish（第一个子 token 与父 start 比较），
    /// finish 不能超过父 finish。
    pub fn composite(kind: K, span: Span, children: Vec<Token<K>>) -> Result<Self, BuildError> {
        let mut bound = span.start();
        for child in &children {
            if child.start() < bound {
                return Err(BuildError::ChildStartsEarly {
                    child_start: child.start(),
                    bound,
                });
            }
            if child.finish() > span.finish() {
                return Err(BuildError::ChildFinishesLate {
                    child_finish: child.finish(),
                    parent_finish: span.finish(),
                });
            }
            bound = child.finish();
        }
        Ok(Self {
            kind,
            span,
            children,
        })
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> Position {
        self.span.start()
    }

    pub fn finish(&self) -> Position {
        self.span.finish()
    }

    pub fn length(&self) -> usize {
        self.span.length()
    }

    pub fn children(&self) -> &[Token<K>] {
        &self.children
    }

    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }

    /// 截取 token 对应的源文本
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.span.slice(source)
    }

    /// 调试用的缩进打印，每行 `KIND : <按 start 缩进>'文本'`，子 token 递归输出
    pub fn pretty(&self, source: &str) -> String {
        let mut out = String::new();
        self.write_pretty(source, &mut out);
        out
    }

    fn write_pretty(&self, source: &str, out: &mut String) {
        out.push_str(&format!(
            "{:?} : {}'{}'\n",
            self.kind,
            " ".repeat(self.start()),
            self.slice(source).unwrap_or_default()
        ));
        for child in &self.children {
            child.write_pretty(source, out);
        }
    }
}

impl<K: TokenKind> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(type={:?}, start={}, finish={})",
            self.kind,
            self.start(),
            self.finish()
        )
    }
}
