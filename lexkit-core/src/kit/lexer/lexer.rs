//! 驱动器
//!
//! 从头到尾扫描整段输入，反复以 Idle 启动根识别器：
//!
//! - `Finished`：产出 token，上一个 token 之后的空隙按需补一个 filler token
//! - `Cancelled`：从本次尝试起点后移一个字符重试，空隙留给之后的 filler
//! - `Failed`：带位置和原因中止，不返回部分结果
//!
//! 输入末尾的空隙在配置了 filler 类型时同样补齐，这样 token 首尾相接覆盖全部输入。
//!
//! # 示例
//!
//! ```
//! use lexkit_core::kit::lexer::{Lexer, Predicate, TokenKind};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Kind {
//!     Word,
//!     Whitespace,
//! }
//!
//! impl TokenKind for Kind {}
//!
//! let lexer = Lexer::with_filler(Predicate::word(Kind::Word), Kind::Whitespace);
//! let parsed = lexer.tokenize("a  b").unwrap();
//! assert_eq!(parsed.slices(), vec!["a", "  ", "b"]);
//! ```

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::core::Span;
use super::error::ScanError;
use super::recognizer::{feed, Recognizer};
use super::status::Status;
use super::token::Token;
use super::types::TokenKind;
use super::DRIVER_TARGET;

/// 驱动器：根识别器加可选的 filler 类型
pub struct Lexer<K, R> {
    recognizer: R,
    filler: Option<K>,
}

impl<K: TokenKind, R: Recognizer<K>> Lexer<K, R> {
    /// 不补 filler，未识别的区域直接跳过
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            filler: None,
        }
    }

    pub fn with_filler(recognizer: R, filler: K) -> Self {
        Self::new(recognizer).filler(Some(filler))
    }

    #[must_use]
    pub fn filler(mut self, filler: Option<K>) -> Self {
        self.filler = filler;
        self
    }

    pub fn filler_kind(&self) -> Option<K> {
        self.filler
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// 扫描整段输入
    pub fn tokenize(&self, source: &str) -> Result<Parsed<K>, ScanError> {
        let chars: Vec<char> = source.chars().collect();
        let total = chars.len();
        let mut tokens = Vec::new();
        let mut cursor = 0;
        // 上一个 token 之后第一个未被覆盖的位置
        let mut gap_start = 0;

        while cursor < total {
            let attempt = cursor;
            trace!(target: DRIVER_TARGET, "Attempt at {}", attempt);

            let mut status = self.recognizer.reset();
            let mut pos = attempt;
            while let Some(&ch) = chars.get(pos) {
                status = feed(&self.recognizer, status, ch, pos, pos + 1 == total);
                if !matches!(status, Status::Building(_)) {
                    break;
                }
                pos += 1;
            }

            match status {
                Status::Finished(token) => {
                    if token.start() > gap_start {
                        self.push_filler(&mut tokens, gap_start, token.start() - 1);
                    }
                    debug!(target: DRIVER_TARGET, "Token {}", token);
                    cursor = (token.finish() + 1).max(attempt + 1);
                    gap_start = cursor;
                    tokens.push(token);
                }
                Status::Cancelled { .. } => {
                    trace!(target: DRIVER_TARGET, "Cancelled at {}", attempt);
                    cursor = attempt + 1;
                }
                Status::Failed { kind, reason, .. } => {
                    warn!(
                        target: DRIVER_TARGET,
                        "Parsing error at position {} in {:?}: {}", pos, kind, reason
                    );
                    return Err(ScanError::Failed {
                        position: pos,
                        kind: format!("{:?}", kind),
                        reason,
                    });
                }
                Status::Building(building) => {
                    // feed 在最后一个字符上已经 settle，这里只会来自不守约的识别器
                    let reason = format!(
                        "Unexpected BUILDING state of {:?} after the last char (position {})",
                        building.kind(),
                        pos
                    );
                    warn!(target: DRIVER_TARGET, "{}", reason);
                    return Err(ScanError::Failed {
                        position: pos,
                        kind: format!("{:?}", building.kind()),
                        reason,
                    });
                }
                Status::Idle { kind } => {
                    warn!(
                        target: DRIVER_TARGET,
                        "Recognizer {:?} returned to IDLE at {}", kind, pos
                    );
                    return Err(ScanError::UnexpectedIdle { position: pos });
                }
            }
        }

        if gap_start < total {
            self.push_filler(&mut tokens, gap_start, total - 1);
        }

        Ok(Parsed {
            source: source.to_string(),
            tokens,
        })
    }

    fn push_filler(&self, tokens: &mut Vec<Token<K>>, start: usize, finish: usize) {
        if let Some(kind) = self.filler {
            let filler = Token::new(kind, Span::at(start).reach(finish));
            debug!(target: DRIVER_TARGET, "Filler {}", filler);
            tokens.push(filler);
        }
    }
}

/// 扫描结果：源文本和 token 列表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parsed<K> {
    source: String,
    tokens: Vec<Token<K>>,
}

impl<K: TokenKind> Parsed<K> {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token<K>] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token<K>> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 每个顶层 token 对应的源文本
    pub fn slices(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|token| token.slice(&self.source))
            .collect()
    }

    /// 顶层 token 文本拼接；配置了 filler 时等于源文本
    pub fn reconstruct(&self) -> String {
        self.slices().concat()
    }

    pub fn pretty(&self) -> String {
        self.tokens
            .iter()
            .map(|token| token.pretty(&self.source))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::lexer::leaf::{Predicate, SingleChar};
    use crate::kit::lexer::status::Building;
    use crate::kit::lexer::types::Position;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    enum Kind {
        Word,
        Whitespace,
        Comma,
        Broken,
    }

    impl TokenKind for Kind {}

    fn leaf(kind: Kind, start: usize, finish: usize) -> Token<Kind> {
        Token::leaf(kind, start, finish).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let lexer = Lexer::with_filler(Predicate::word(Kind::Word), Kind::Whitespace);
        let parsed = lexer.tokenize("").unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed.reconstruct(), "");
    }

    #[test]
    fn test_filler_between_words() {
        let lexer = Lexer::with_filler(Predicate::word(Kind::Word), Kind::Whitespace);
        let parsed = lexer.tokenize("a  b").unwrap();
        assert_eq!(
            parsed.tokens(),
            &[
                leaf(Kind::Word, 0, 0),
                leaf(Kind::Whitespace, 1, 2),
                leaf(Kind::Word, 3, 3)
            ]
        );
    }

    #[test]
    fn test_without_filler_gaps_are_skipped() {
        let lexer = Lexer::new(Predicate::word(Kind::Word));
        let parsed = lexer.tokenize(" a  b ").unwrap();
        assert_eq!(parsed.slices(), vec!["a", "b"]);
        assert_eq!(lexer.filler_kind(), None);
    }

    #[test]
    fn test_trailing_gap_gets_filler() {
        let lexer = Lexer::with_filler(SingleChar::new(Kind::Comma, ','), Kind::Word);
        let parsed = lexer.tokenize(",ab").unwrap();
        assert_eq!(
            parsed.tokens(),
            &[leaf(Kind::Comma, 0, 0), leaf(Kind::Word, 1, 2)]
        );
    }

    #[test]
    fn test_nothing_recognized_is_one_filler() {
        let lexer = Lexer::with_filler(SingleChar::new(Kind::Comma, ','), Kind::Word);
        let parsed = lexer.tokenize("abc").unwrap();
        assert_eq!(parsed.tokens(), &[leaf(Kind::Word, 0, 2)]);
    }

    #[test]
    fn test_pretty_output() {
        let lexer = Lexer::with_filler(Predicate::word(Kind::Word), Kind::Whitespace);
        let parsed = lexer.tokenize("a b").unwrap();
        assert_eq!(
            parsed.pretty(),
            "Word : 'a'\nWhitespace :  ' '\nWord :   'b'\n"
        );
    }

    /// 第一个字符之后就失败的识别器
    struct Fragile;

    impl Recognizer<Kind> for Fragile {
        fn kind(&self) -> Kind {
            Kind::Broken
        }

        fn start(&self, ch: char, pos: Position) -> Status<Kind> {
            if ch == '!' {
                Status::Building(Building::new(Kind::Broken, Span::at(pos)))
            } else {
                Status::cancelled(Kind::Broken, Span::at(pos))
            }
        }

        fn start_last(&self, ch: char, pos: Position) -> Status<Kind> {
            self.start(ch, pos)
        }

        fn resume(&self, _ch: char, building: Building<Kind>) -> Status<Kind> {
            building.fail("broken on purpose")
        }

        fn resume_last(&self, ch: char, building: Building<Kind>) -> Status<Kind> {
            self.resume(ch, building)
        }
    }

    #[test]
    fn test_failure_aborts_with_position() {
        let lexer = Lexer::with_filler(Fragile, Kind::Word);
        let err = lexer.tokenize("ab!cd").unwrap_err();
        assert_eq!(
            err,
            ScanError::Failed {
                position: 3,
                kind: "Broken".to_string(),
                reason: "broken on purpose".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Parsing error at position 3 with reason: broken on purpose"
        );
    }

    #[test]
    fn test_building_on_last_char_is_reported() {
        let lexer = Lexer::new(Fragile);
        let err = lexer.tokenize("ab!").unwrap_err();
        assert_eq!(err.position(), 2);
        assert!(err.to_string().contains("Unexpected BUILDING state"));
    }

    /// 不消费任何字符，直接回到 Idle
    struct Lazy;

    impl Recognizer<Kind> for Lazy {
        fn kind(&self) -> Kind {
            Kind::Broken
        }

        fn start(&self, _ch: char, _pos: Position) -> Status<Kind> {
            self.reset()
        }

        fn start_last(&self, ch: char, pos: Position) -> Status<Kind> {
            self.start(ch, pos)
        }

        fn resume(&self, _ch: char, building: Building<Kind>) -> Status<Kind> {
            building.cancel_here()
        }

        fn resume_last(&self, ch: char, building: Building<Kind>) -> Status<Kind> {
            self.resume(ch, building)
        }
    }

    #[test]
    fn test_idle_recognizer_aborts() {
        let lexer = Lexer::new(Lazy);
        let err = lexer.tokenize("ab").unwrap_err();
        assert_eq!(err, ScanError::UnexpectedIdle { position: 0 });
        assert_eq!(err.to_string(), "Recognizer returned to IDLE at position 0");
    }

    #[test]
    fn test_idle_on_single_char_input() {
        // 只有一个字符时走 start_last 分支
        let lexer = Lexer::with_filler(Lazy, Kind::Word);
        let err = lexer.tokenize("a").unwrap_err();
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn test_accessors_and_into_tokens() {
        let lexer = Lexer::with_filler(SingleChar::new(Kind::Comma, ','), Kind::Word);
        assert_eq!(lexer.recognizer().kind(), Kind::Comma);
        assert_eq!(lexer.filler_kind(), Some(Kind::Word));

        let parsed = lexer.tokenize("a,b").unwrap();
        assert_eq!(parsed.source(), "a,b");
        assert_eq!(parsed.len(), 3);
        assert_eq!(
            parsed.into_tokens(),
            vec![
                leaf(Kind::Word, 0, 0),
                leaf(Kind::Comma, 1, 1),
                leaf(Kind::Word, 2, 2)
            ]
        );
    }

    #[test]
    fn test_parsed_serializes_tokens() {
        let lexer = Lexer::with_filler(Predicate::word(Kind::Word), Kind::Whitespace);
        let parsed = lexer.tokenize("a b").unwrap();
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["source"], "a b");
        assert_eq!(json["tokens"][1]["type"], "Whitespace");
    }
}
