//! 序列组合子
//!
//! 按顺序驱动一组带重复次数边界的子识别器，产出一个复合 token。
//! [`Brackets`] 是它的特例：左括号 `[1,1]`、内容、右括号 `[1,1]`。
//!
//! 每个字符的处理：
//!
//! 1. 喂给当前子识别器
//! 2. `Finished`：记录子 token。满足结束条件立即结束；否则还能重复就从 Idle 重试同一个子识别器，
//!    不能重复就换下一个。子 token 没有消费当前字符时，当前字符立刻再喂一次
//! 3. `Cancelled`：当前子识别器已达到最少次数且还有下一个时，用同一个字符重试下一个；
//!    否则尚无子 token 时整体取消，已有子 token 时整体失败
//! 4. `Failed` 原样向上传递

use tracing::debug;

use super::core::Span;
use super::error::BuildError;
use super::leaf::SingleChar;
use super::recognizer::{feed, BoxedRecognizer, Recognizer};
use super::status::{Building, Progress, Status};
use super::token::Token;
use super::types::{Position, TokenKind};
use super::RECOGNIZER_TARGET;

/// 带重复次数边界的子识别器，`max == 0` 表示不限次数
pub struct SubRecognizer<K> {
    recognizer: BoxedRecognizer<K>,
    min: usize,
    max: usize,
}

impl<K: TokenKind> SubRecognizer<K> {
    pub fn new<R>(recognizer: R, min: usize, max: usize) -> Result<Self, BuildError>
    where
        R: Recognizer<K> + Send + Sync + 'static,
    {
        if max != 0 && min > max {
            return Err(BuildError::InvalidBounds { min, max });
        }
        Ok(Self {
            recognizer: Box::new(recognizer),
            min,
            max,
        })
    }

    /// `[0, 不限]`，可以一次都不出现
    pub fn unbounded<R>(recognizer: R) -> Self
    where
        R: Recognizer<K> + Send + Sync + 'static,
    {
        Self {
            recognizer: Box::new(recognizer),
            min: 0,
            max: 0,
        }
    }

    /// 恰好出现一次
    pub fn once<R>(recognizer: R) -> Self
    where
        R: Recognizer<K> + Send + Sync + 'static,
    {
        Self {
            recognizer: Box::new(recognizer),
            min: 1,
            max: 1,
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    /// `None` 表示不限次数
    pub fn max(&self) -> Option<usize> {
        (self.max != 0).then_some(self.max)
    }

    pub fn kind(&self) -> K {
        self.recognizer.kind()
    }
}

/// 序列组合子挂在 `Building` 上的进度
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceProgress<K> {
    /// 当前子识别器下标
    index: usize,
    /// 当前子识别器已产出的 token 数
    count: usize,
    /// 当前子识别器的进行中状态，`None` 表示 Idle
    current: Option<Building<K>>,
    /// 已产出的全部子 token
    children: Vec<Token<K>>,
}

impl<K: TokenKind> SequenceProgress<K> {
    fn new() -> Self {
        Self {
            index: 0,
            count: 0,
            current: None,
            children: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn children(&self) -> &[Token<K>] {
        &self.children
    }

    /// 当前子识别器达到最少次数，且后面没有必需的子识别器
    fn can_finish(&self, subs: &[SubRecognizer<K>]) -> bool {
        let Some(sub) = subs.get(self.index) else {
            return false;
        };
        self.count >= sub.min && subs[self.index + 1..].iter().all(|next| next.min == 0)
    }

    /// 当前子识别器达到最少次数，且存在下一个
    fn can_take_next(&self, subs: &[SubRecognizer<K>]) -> bool {
        subs.get(self.index)
            .is_some_and(|sub| self.count >= sub.min && self.index + 1 < subs.len())
    }

    fn can_produce_more(&self, subs: &[SubRecognizer<K>]) -> bool {
        subs.get(self.index)
            .is_some_and(|sub| sub.max == 0 || self.count < sub.max)
    }

    /// 换到下一个子识别器
    fn advance(&mut self) {
        self.index += 1;
        self.count = 0;
        self.current = None;
    }
}

/// 序列组合子
pub struct Sequence<K> {
    kind: K,
    subs: Vec<SubRecognizer<K>>,
}

impl<K: TokenKind> Sequence<K> {
    pub fn new(kind: K, subs: Vec<SubRecognizer<K>>) -> Result<Self, BuildError> {
        if subs.is_empty() {
            return Err(BuildError::EmptySequence);
        }
        Ok(Self { kind, subs })
    }

    pub fn subs(&self) -> &[SubRecognizer<K>] {
        &self.subs
    }

    fn begin(&self, ch: char, pos: Position, last: bool) -> Status<K> {
        self.drive(ch, pos, pos, pos, SequenceProgress::new(), last)
    }

    fn advance(&self, ch: char, building: Building<K>, last: bool) -> Status<K> {
        let pos = building.next_position();
        let span = building.span;
        match building.progress {
            Progress::Sequence(progress) => {
                self.drive(ch, pos, span.start(), span.finish(), *progress, last)
            }
            _ => Status::failed(
                self.kind,
                span,
                format!("Sequence {:?} resumed without progress", self.kind),
            ),
        }
    }

    /// 把 `pos` 处的字符喂给当前子识别器，必要时换子识别器后重喂，直到能给出本字符的结论
    ///
    /// `reached` 是此前已消费的最右位置（首字符时等于 `start`）。
    fn drive(
        &self,
        ch: char,
        pos: Position,
        start: Position,
        reached: Position,
        mut progress: SequenceProgress<K>,
        last: bool,
    ) -> Status<K> {
        let consumed_span = Span::at(start).reach(pos);
        loop {
            let Some(sub) = self.subs.get(progress.index) else {
                return Status::failed(
                    self.kind,
                    consumed_span,
                    format!("Sequence {:?} ran out of sub-recognizers", self.kind),
                );
            };
            let status = match progress.current.take() {
                Some(building) => Status::Building(building),
                None => sub.recognizer.reset(),
            };

            match feed(&sub.recognizer, status, ch, pos, last) {
                Status::Building(building) => {
                    progress.current = Some(building);
                    return self.building(consumed_span, progress);
                }
                Status::Finished(token) => {
                    let consumed = token.finish() == pos;
                    let finish = token.finish();
                    progress.children.push(token);
                    progress.count += 1;

                    if progress.can_finish(&self.subs) {
                        let span = Span::at(start).reach(reached).reach(finish);
                        return match Token::composite(self.kind, span, progress.children) {
                            Ok(token) => Status::Finished(token),
                            Err(err) => Status::failed(self.kind, span, err.to_string()),
                        };
                    }
                    if progress.can_produce_more(&self.subs) {
                        progress.current = None;
                    } else {
                        progress.advance();
                    }

                    if consumed {
                        if last {
                            return self.incomplete(start, consumed_span);
                        }
                        return self.building(consumed_span, progress);
                    }
                    // 子 token 没有消费当前字符，再喂一次
                }
                Status::Cancelled { span, .. } => {
                    if progress.can_take_next(&self.subs) {
                        progress.advance();
                        continue;
                    }
                    if progress.children.is_empty() {
                        let span = Span::at(start).reach(reached).reach(span.finish());
                        return Status::cancelled(self.kind, span);
                    }
                    return self.incomplete(start, Span::at(start).reach(span.finish()));
                }
                failed @ Status::Failed { .. } => return failed,
                Status::Idle { kind } => {
                    return Status::failed(
                        self.kind,
                        consumed_span,
                        format!(
                            "Sub-recognizer {:?} returned IDLE at position {}",
                            kind, pos
                        ),
                    );
                }
            }
        }
    }

    fn building(&self, span: Span, progress: SequenceProgress<K>) -> Status<K> {
        Status::Building(Building::with_progress(
            self.kind,
            span,
            Progress::Sequence(Box::new(progress)),
        ))
    }

    fn incomplete(&self, start: Position, span: Span) -> Status<K> {
        let reason = format!(
            "could not find all required sub-tokens for {:?} started at {}",
            self.kind, start
        );
        debug!(target: RECOGNIZER_TARGET, "{}", reason);
        Status::failed(self.kind, span, reason)
    }
}

impl<K: TokenKind> Recognizer<K> for Sequence<K> {
    fn kind(&self) -> K {
        self.kind
    }

    fn start(&self, ch: char, pos: Position) -> Status<K> {
        self.begin(ch, pos, false)
    }

    fn start_last(&self, ch: char, pos: Position) -> Status<K> {
        self.begin(ch, pos, true)
    }

    fn resume(&self, ch: char, building: Building<K>) -> Status<K> {
        self.advance(ch, building, false)
    }

    fn resume_last(&self, ch: char, building: Building<K>) -> Status<K> {
        self.advance(ch, building, true)
    }
}

/// 括号识别器：左括号、内容、右括号组成的复合 token
pub struct Brackets<K> {
    sequence: Sequence<K>,
}

impl<K: TokenKind> Brackets<K> {
    pub const LEFT: char = '[';
    pub const RIGHT: char = ']';

    /// 使用默认的 `[` `]`
    pub fn new(kind: K, content: SubRecognizer<K>, left_kind: K, right_kind: K) -> Self {
        Self::with_delimiters(
            kind,
            content,
            left_kind,
            right_kind,
            Self::LEFT,
            Self::RIGHT,
        )
    }

    pub fn with_delimiters(
        kind: K,
        content: SubRecognizer<K>,
        left_kind: K,
        right_kind: K,
        left: char,
        right: char,
    ) -> Self {
        let subs = vec![
            SubRecognizer::once(SingleChar::new(left_kind, left)),
            content,
            SubRecognizer::once(SingleChar::new(right_kind, right)),
        ];
        Self {
            sequence: Sequence { kind, subs },
        }
    }

    /// 内容不限次数（包括零次）
    pub fn around<R>(kind: K, content: R, left_kind: K, right_kind: K) -> Self
    where
        R: Recognizer<K> + Send + Sync + 'static,
    {
        Self::new(
            kind,
            SubRecognizer::unbounded(content),
            left_kind,
            right_kind,
        )
    }
}

impl<K: TokenKind> Recognizer<K> for Brackets<K> {
    fn kind(&self) -> K {
        self.sequence.kind
    }

    fn start(&self, ch: char, pos: Position) -> Status<K> {
        self.sequence.start(ch, pos)
    }

    fn start_last(&self, ch: char, pos: Position) -> Status<K> {
        self.sequence.start_last(ch, pos)
    }

    fn resume(&self, ch: char, building: Building<K>) -> Status<K> {
        self.sequence.resume(ch, building)
    }

    fn resume_last(&self, ch: char, building: Building<K>) -> Status<K> {
        self.sequence.resume_last(ch, building)
    }
}
