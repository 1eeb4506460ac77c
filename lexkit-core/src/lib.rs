//! Lexkit Core - 可组合词法分析引擎（纯逻辑，无 IO）
//!
//! 识别器、组合子和驱动器都只处理内存中的数据，不安装日志订阅者，也不读取全局配置。

pub mod kit;

pub use kit::lexer::{
    Alternative, Brackets, BuildError, Lexer, Parsed, Predicate, Recognizer, ScanError, Sequence,
    SingleChar, Span, Status, SubRecognizer, Token, TokenKind,
};

// Re-export config types from lexkit-config
pub use lexkit_config::Phase;
