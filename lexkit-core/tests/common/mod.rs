//! 测试辅助工具
//!
//! 提供测试用的 token 类型和几套常用文法

#![allow(dead_code)]

use lexkit_core::kit::lexer::{
    Alternative, BoxedRecognizer, Brackets, Lexer, Parsed, Predicate, Recognizer, ScanError,
    SingleChar, SubRecognizer, Token, TokenKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Kind {
    Word,
    Whitespace,
    Number,
    Comma,
    Any,
    Group,
    Left,
    Right,
    Content,
}

impl TokenKind for Kind {}

pub fn leaf(kind: Kind, start: usize, finish: usize) -> Token<Kind> {
    Token::leaf(kind, start, finish).unwrap()
}

/// 只认单词，空白由 filler 补齐
pub fn words() -> Predicate<Kind> {
    Predicate::word(Kind::Word)
}

pub fn comma() -> SingleChar<Kind> {
    SingleChar::new(Kind::Comma, ',')
}

/// 单词、空白、逗号三选一
pub fn plain() -> Alternative<Kind> {
    Alternative::new(
        Kind::Any,
        vec![
            Box::new(words()) as BoxedRecognizer<Kind>,
            Box::new(Predicate::whitespace(Kind::Whitespace)),
            Box::new(comma()),
        ],
    )
    .unwrap()
}

/// 括号或单词，括号内容是单词/空白/逗号
pub fn bracketed() -> Alternative<Kind> {
    let brackets = Brackets::new(
        Kind::Group,
        SubRecognizer::unbounded(plain()),
        Kind::Left,
        Kind::Right,
    );
    Alternative::new(
        Kind::Any,
        vec![
            Box::new(brackets) as BoxedRecognizer<Kind>,
            Box::new(words()),
        ],
    )
    .unwrap()
}

/// 扫描并返回 token 列表
pub fn scan<R: Recognizer<Kind>>(
    recognizer: R,
    filler: Option<Kind>,
    source: &str,
) -> Result<Parsed<Kind>, ScanError> {
    Lexer::new(recognizer).filler(filler).tokenize(source)
}

/// 只取顶层 token 的类型和文本
pub fn summary(parsed: &Parsed<Kind>) -> Vec<(Kind, String)> {
    parsed
        .tokens()
        .iter()
        .map(|token| {
            (
                token.kind(),
                token.slice(parsed.source()).unwrap_or_default().to_string(),
            )
        })
        .collect()
}
