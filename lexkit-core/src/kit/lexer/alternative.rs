//! 择一组合子
//!
//! 让多个识别器在同一段输入上并行竞争，只接受唯一的幸存者：
//!
//! 1. 每个字符喂给所有仍然存活的候选
//! 2. 任一候选 `Failed` 立即整体失败
//! 3. 两个候选同时 `Finished`，或 `Finished` 时还有候选在 `Building`，视为歧义并失败，
//!    不按优先级挑选
//! 4. 只剩一个 `Building` 时折叠为该候选自己的状态（保留其 token 类型）
//! 5. 全部 `Cancelled` 时整体 `Cancelled`，区间延伸到任一候选到达过的最远位置

use std::ops::ControlFlow;

use tracing::{debug, trace};

use super::core::Span;
use super::error::BuildError;
use super::recognizer::{feed, BoxedRecognizer, Recognizer};
use super::status::{Building, Progress, Status};
use super::token::Token;
use super::types::{Position, TokenKind};
use super::RECOGNIZER_TARGET;

/// 仍在竞争的候选：候选下标及其进行中状态
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<K> {
    index: usize,
    building: Building<K>,
}

impl<K: TokenKind> Candidate<K> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn building(&self) -> &Building<K> {
        &self.building
    }
}

/// 择一组合子
pub struct Alternative<K> {
    kind: K,
    candidates: Vec<BoxedRecognizer<K>>,
}

impl<K: TokenKind> Alternative<K> {
    /// `kind` 用于聚合的 `Building` 以及歧义、全部取消时的状态
    pub fn new(kind: K, candidates: Vec<BoxedRecognizer<K>>) -> Result<Self, BuildError> {
        if candidates.is_empty() {
            return Err(BuildError::EmptyAlternatives);
        }
        Ok(Self { kind, candidates })
    }

    fn begin(&self, ch: char, pos: Position, last: bool) -> Status<K> {
        let mut race = Race::new(pos);
        for (index, candidate) in self.candidates.iter().enumerate() {
            let status = feed(candidate, candidate.reset(), ch, pos, last);
            if let ControlFlow::Break(failed) = race.absorb(self.kind, index, status, pos) {
                return failed;
            }
        }
        race.conclude(self.kind, Span::at(pos))
    }

    fn advance(&self, ch: char, building: Building<K>, last: bool) -> Status<K> {
        let pos = building.next_position();
        let span = building.span;
        let mut live = match building.progress {
            Progress::Race(live) => live,
            _ => {
                return Status::failed(
                    self.kind,
                    span,
                    format!("Alternative {:?} resumed without candidates", self.kind),
                )
            }
        };

        if live.len() == 1 {
            // 已折叠：直接交给唯一的候选
            if let Some(candidate) = live.pop() {
                return self.forward(candidate, ch, pos, last);
            }
        }

        let mut race = Race::new(span.finish());
        for candidate in live {
            let Some(recognizer) = self.candidates.get(candidate.index) else {
                return Status::failed(self.kind, span, "Unknown alternative candidate");
            };
            let index = candidate.index;
            let status = feed(
                recognizer,
                Status::Building(candidate.building),
                ch,
                pos,
                last,
            );
            if let ControlFlow::Break(failed) = race.absorb(self.kind, index, status, pos) {
                return failed;
            }
        }
        race.conclude(self.kind, span.stretch())
    }

    fn forward(&self, candidate: Candidate<K>, ch: char, pos: Position, last: bool) -> Status<K> {
        let Some(recognizer) = self.candidates.get(candidate.index) else {
            return candidate.building.fail("Unknown alternative candidate");
        };
        let status = feed(
            recognizer,
            Status::Building(candidate.building),
            ch,
            pos,
            last,
        );
        match status {
            Status::Building(building) => collapse(candidate.index, building),
            Status::Idle { kind } => idle(self.kind, kind, pos),
            other => other,
        }
    }
}

impl<K: TokenKind> Recognizer<K> for Alternative<K> {
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

/// 单个幸存者：对外呈现候选自己的类型和区间，内部记住候选下标以便继续转发
fn collapse<K: TokenKind>(index: usize, building: Building<K>) -> Status<K> {
    let kind = building.kind;
    let span = building.span;
    Status::Building(Building::with_progress(
        kind,
        span,
        Progress::Race(vec![Candidate { index, building }]),
    ))
}

/// 一个字符上的竞争结果，只在单次调用内存活
struct Race<K> {
    building: Vec<Candidate<K>>,
    finished: Option<Token<K>>,
    /// 被取消的候选到达过的最远位置
    furthest: Position,
}

impl<K: TokenKind> Race<K> {
    fn new(furthest: Position) -> Self {
        Self {
            building: Vec::new(),
            finished: None,
            furthest,
        }
    }

    fn absorb(
        &mut self,
        kind: K,
        index: usize,
        status: Status<K>,
        pos: Position,
    ) -> ControlFlow<Status<K>> {
        match status {
            Status::Failed { .. } => return ControlFlow::Break(status),
            Status::Finished(token) => {
                if let Some(previous) = &self.finished {
                    return ControlFlow::Break(ambiguous(
                        kind,
                        format!("FINISHED of {:?}", token.kind()),
                        format!("FINISHED of {:?}", previous.kind()),
                        pos,
                    ));
                }
                if let Some(other) = self.building.first() {
                    return ControlFlow::Break(ambiguous(
                        kind,
                        format!("FINISHED of {:?}", token.kind()),
                        format!("BUILDING of {:?}", other.building.kind),
                        pos,
                    ));
                }
                self.finished = Some(token);
            }
            Status::Building(building) => {
                if let Some(previous) = &self.finished {
                    return ControlFlow::Break(ambiguous(
                        kind,
                        format!("BUILDING of {:?}", building.kind),
                        format!("FINISHED of {:?}", previous.kind()),
                        pos,
                    ));
                }
                self.building.push(Candidate { index, building });
            }
            Status::Cancelled { span, .. } => {
                self.furthest = self.furthest.max(span.finish());
            }
            Status::Idle { kind: candidate } => {
                return ControlFlow::Break(idle(kind, candidate, pos));
            }
        }
        ControlFlow::Continue(())
    }

    /// `span` 是消费当前字符之后的聚合区间
    fn conclude(mut self, kind: K, span: Span) -> Status<K> {
        if let Some(token) = self.finished {
            return Status::Finished(token);
        }
        if self.building.len() > 1 {
            return Status::Building(Building::with_progress(
                kind,
                span,
                Progress::Race(self.building),
            ));
        }
        match self.building.pop() {
            Some(Candidate { index, building }) => {
                trace!(
                    target: RECOGNIZER_TARGET,
                    "Alternative {:?} collapsed to {:?} at {}",
                    kind,
                    building.kind,
                    span.finish()
                );
                collapse(index, building)
            }
            None => Status::cancelled(kind, Span::at(span.start()).reach(self.furthest)),
        }
    }
}

fn idle<K: TokenKind>(kind: K, candidate: K, pos: Position) -> Status<K> {
    let reason = format!("Candidate {:?} returned IDLE at position {}", candidate, pos);
    Status::failed(kind, Span::at(pos), reason)
}

fn ambiguous<K: TokenKind>(kind: K, first: String, second: String, pos: Position) -> Status<K> {
    let reason = format!("Ambiguous: {first} and {second} found at position {pos}");
    debug!(target: RECOGNIZER_TARGET, "{}", reason);
    Status::failed(kind, Span::at(pos), reason)
}
