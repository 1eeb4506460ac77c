//! 内置文法
//!
//! - words：只认字母单词
//! - plain：单词、数字、空白、逗号
//! - brackets：plain 加上方括号分组，括号内是 plain 的任意重复

use lexkit_config::GrammarKind;
use lexkit_core::kit::lexer::{
    Alternative, BoxedRecognizer, Brackets, BuildError, Predicate, SingleChar, SubRecognizer,
    TokenKind,
};
use serde::Serialize;

/// CLI 输出的 token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CliKind {
    Word,
    Number,
    Whitespace,
    Comma,
    Group,
    LeftBracket,
    RightBracket,
    /// 择一组合子本身（只出现在错误里）
    Any,
    /// 未识别的文本
    Text,
}

impl TokenKind for CliKind {}

/// 构造根识别器
pub fn build(grammar: GrammarKind) -> Result<BoxedRecognizer<CliKind>, BuildError> {
    Ok(match grammar {
        GrammarKind::Words => Box::new(word()),
        GrammarKind::Plain => Box::new(plain()?),
        GrammarKind::Brackets => Box::new(brackets()?),
    })
}

fn word() -> Predicate<CliKind> {
    // 不含数字，避免与 Number 歧义
    Predicate::new(CliKind::Word, char::is_alphabetic)
}

fn plain_candidates() -> Vec<BoxedRecognizer<CliKind>> {
    vec![
        Box::new(word()),
        Box::new(Predicate::number(CliKind::Number)),
        Box::new(Predicate::whitespace(CliKind::Whitespace)),
        Box::new(SingleChar::new(CliKind::Comma, ',')),
    ]
}

fn plain() -> Result<Alternative<CliKind>, BuildError> {
    Alternative::new(CliKind::Any, plain_candidates())
}

fn brackets() -> Result<Alternative<CliKind>, BuildError> {
    let group = Brackets::new(
        CliKind::Group,
        SubRecognizer::unbounded(plain()?),
        CliKind::LeftBracket,
        CliKind::RightBracket,
    );
    let mut candidates = plain_candidates();
    candidates.insert(0, Box::new(group));
    Alternative::new(CliKind::Any, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexkit_core::Lexer;
    use pretty_assertions::assert_eq;

    fn kinds(grammar: GrammarKind, source: &str) -> Vec<CliKind> {
        let parsed = Lexer::with_filler(build(grammar).unwrap(), CliKind::Text)
            .tokenize(source)
            .unwrap();
        parsed.tokens().iter().map(|token| token.kind()).collect()
    }

    #[test]
    fn test_words_grammar() {
        assert_eq!(
            kinds(GrammarKind::Words, "ab 12"),
            vec![CliKind::Word, CliKind::Text]
        );
    }

    #[test]
    fn test_plain_grammar() {
        assert_eq!(
            kinds(GrammarKind::Plain, "ab,12;"),
            vec![
                CliKind::Word,
                CliKind::Comma,
                CliKind::Number,
                CliKind::Text
            ]
        );
    }

    #[test]
    fn test_brackets_grammar() {
        assert_eq!(
            kinds(GrammarKind::Brackets, "x [1, y]"),
            vec![CliKind::Word, CliKind::Whitespace, CliKind::Group]
        );
    }

    #[test]
    fn test_kind_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&CliKind::LeftBracket).unwrap(),
            "\"LEFT_BRACKET\""
        );
    }
}
