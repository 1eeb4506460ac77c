//! 可组合的词法分析器
//!
//! 把字符序列切分为带类型、带位置的 token 列表：
//! - 叶子识别器：判定函数（单词、空白、数字）和单字符
//! - 择一组合子：候选并行竞争，拒绝歧义
//! - 序列组合子：按顺序驱动带重复边界的子识别器，产出复合 token（括号）
//! - 驱动器：反复启动根识别器，用 filler token 补齐未识别的区域
//!
//! 所有识别器都是无状态的，一次尝试的进度挂在 [`Building`] 上。

pub mod alternative;
pub mod core;
pub mod error;
pub mod leaf;
pub mod lexer;
pub mod recognizer;
pub mod sequence;
pub mod status;
pub mod token;
pub mod types;

pub use self::core::Span;
pub use alternative::{Alternative, Candidate};
pub use error::{BuildError, ScanError};
pub use leaf::{Predicate, SingleChar};
pub use lexer::{Lexer, Parsed};
pub use recognizer::{feed, settle, BoxedRecognizer, Recognizer};
pub use sequence::{Brackets, Sequence, SequenceProgress, SubRecognizer};
pub use status::{Building, Progress, Status};
pub use token::Token;
pub use types::{CharPredicate, Position, TokenKind};

/// 驱动器日志 target
pub(crate) const DRIVER_TARGET: &str = "lexkit::driver";
/// 组合子日志 target
pub(crate) const RECOGNIZER_TARGET: &str = "lexkit::recognizer";

#[cfg(test)]
mod tests {
    use super::*;
    use lexkit_config::Phase;

    #[test]
    fn test_targets_match_phases() {
        assert_eq!(DRIVER_TARGET, Phase::Driver.target());
        assert_eq!(RECOGNIZER_TARGET, Phase::Recognizer.target());
    }
}
