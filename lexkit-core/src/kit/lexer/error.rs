//! Lexer 错误类型
//!
//! 两类错误：
//! - [`BuildError`]：构造期不变量被破坏（区间、复合 token、重复次数边界），立即拒绝，不做修正
//! - [`ScanError`]：扫描期的致命错误，驱动器带着位置和原因中止整个扫描

use thiserror::Error;

/// 构造期错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Start ({start}) is greater than finish ({finish})")]
    InvalidSpan { start: usize, finish: usize },

    #[error("Incorrect start value of a sub-token ({child_start}), expected at least {bound}")]
    ChildStartsEarly { child_start: usize, bound: usize },

    #[error("Incorrect finish value of a sub-token ({child_finish}), parent finishes at {parent_finish}")]
    ChildFinishesLate {
        child_finish: usize,
        parent_finish: usize,
    },

    #[error("minCount ({min}) should be less or equal to maxCount ({max})")]
    InvalidBounds { min: usize, max: usize },

    #[error("Alternative recognizer needs at least one candidate")]
    EmptyAlternatives,

    #[error("Sequence recognizer needs at least one sub-recognizer")]
    EmptySequence,
}

/// 扫描期错误，不返回任何部分结果
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Parsing error at position {position} with reason: {reason}")]
    Failed {
        position: usize,
        /// 报告失败的识别器类型（Debug 形式）
        kind: String,
        reason: String,
    },

    #[error("Recognizer returned to IDLE at position {position}")]
    UnexpectedIdle { position: usize },
}

impl ScanError {
    /// 出错位置（字符下标）
    pub fn position(&self) -> usize {
        match self {
            ScanError::Failed { position, .. } | ScanError::UnexpectedIdle { position } => {
                *position
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_display() {
        let err = BuildError::InvalidSpan {
            start: 3,
            finish: 1,
        };
        assert_eq!(err.to_string(), "Start (3) is greater than finish (1)");

        let err = BuildError::InvalidBounds { min: 2, max: 1 };
        assert!(err.to_string().contains("minCount (2)"));
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::Failed {
            position: 7,
            kind: "Brackets".to_string(),
            reason: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parsing error at position 7 with reason: boom"
        );
        assert_eq!(err.position(), 7);
    }
}
