//! 识别器 trait
//!
//! 所有识别器（叶子和组合子）都实现 [`Recognizer`]。输入是否还有后续字符决定了调用哪组入口：
//! 最后一个字符必须用 `*_last`，此时识别器不能再返回 `Building`。

use super::status::{Building, Status};
use super::types::{Position, TokenKind};

/// 识别器
///
/// 识别器本身不保存扫描状态，进行中的状态全部在 [`Building`] 中，
/// 因此同一个识别器可以被多次 `reset` 后从同一位置重放，结果一致。
pub trait Recognizer<K: TokenKind> {
    /// 产出 token 的类型；组合子返回聚合/失败状态使用的类型
    fn kind(&self) -> K;

    /// 回到初始状态
    fn reset(&self) -> Status<K> {
        Status::Idle { kind: self.kind() }
    }

    /// 从 `pos` 处的字符开始新的识别（后面还有字符）
    fn start(&self, ch: char, pos: Position) -> Status<K>;

    /// 从输入的最后一个字符开始新的识别
    fn start_last(&self, ch: char, pos: Position) -> Status<K>;

    /// 继续识别下一个字符（后面还有字符）
    fn resume(&self, ch: char, building: Building<K>) -> Status<K>;

    /// 以输入的最后一个字符继续识别
    fn resume_last(&self, ch: char, building: Building<K>) -> Status<K>;
}

/// 装箱的识别器，组合子用它持有异构的子识别器
pub type BoxedRecognizer<K> = Box<dyn Recognizer<K> + Send + Sync>;

impl<K: TokenKind, R: Recognizer<K> + ?Sized> Recognizer<K> for Box<R> {
    fn kind(&self) -> K {
        (**self).kind()
    }

    fn reset(&self) -> Status<K> {
        (**self).reset()
    }

    fn start(&self, ch: char, pos: Position) -> Status<K> {
        (**self).start(ch, pos)
    }

    fn start_last(&self, ch: char, pos: Position) -> Status<K> {
        (**self).start_last(ch, pos)
    }

    fn resume(&self, ch: char, building: Building<K>) -> Status<K> {
        (**self).resume(ch, building)
    }

    fn resume_last(&self, ch: char, building: Building<K>) -> Status<K> {
        (**self).resume_last(ch, building)
    }
}

impl<K: TokenKind, R: Recognizer<K> + ?Sized> Recognizer<K> for &R {
    fn kind(&self) -> K {
        (**self).kind()
    }

    fn reset(&self) -> Status<K> {
        (**self).reset()
    }

    fn start(&self, ch: char, pos: Position) -> Status<K> {
        (**self).start(ch, pos)
    }

    fn start_last(&self, ch: char, pos: Position) -> Status<K> {
        (**self).start_last(ch, pos)
    }

    fn resume(&self, ch: char, building: Building<K>) -> Status<K> {
        (**self).resume(ch, building)
    }

    fn resume_last(&self, ch: char, building: Building<K>) -> Status<K> {
        (**self).resume_last(ch, building)
    }
}

/// 把 `pos` 处的字符喂给识别器
///
/// `Idle` 走 `start*`，`Building` 走 `resume*`，终态原样返回。
/// `last` 为真时结果经过 [`settle`]，保证不会是 `Building`。
pub fn feed<K, R>(
    recognizer: &R,
    status: Status<K>,
    ch: char,
    pos: Position,
    last: bool,
) -> Status<K>
where
    K: TokenKind,
    R: Recognizer<K> + ?Sized,
{
    match status {
        Status::Idle { .. } if last => settle(recognizer.start_last(ch, pos)),
        Status::Idle { .. } => recognizer.start(ch, pos),
        Status::Building(building) if last => settle(recognizer.resume_last(ch, building)),
        Status::Building(building) => recognizer.resume(ch, building),
        terminal => terminal,
    }
}

/// 输入已结束：`Building` 是非法结果，转换为 `Failed`
pub fn settle<K: TokenKind>(status: Status<K>) -> Status<K> {
    match status {
        Status::Building(building) => {
            let reason = format!(
                "Unexpected BUILDING state of {:?} at end of input (position {})",
                building.kind,
                building.span.finish()
            );
            building.fail(reason)
        }
        other => other,
    }
}
