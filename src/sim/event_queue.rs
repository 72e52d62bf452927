//! 事件队列
//!
//! 按 `(时间, 插入序列号)` 排序的待处理事件队列。同一时刻的事件严格按
//! 插入顺序（FIFO）弹出，与事件种类无关。

use super::event::EventKind;
use super::time::SimTime;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::trace;

/// 已调度的事件。排序键只有 `(at, seq)`，`kind` 不参与比较。
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub at: SimTime,
    pub seq: u64,
    pub kind: EventKind,
}

impl ScheduledEvent {
    fn key(&self) -> (SimTime, u64) {
        (self.at, self.seq)
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ScheduledEvent {}

/// 时间有序的事件队列。只负责排序，不包含仿真语义。
#[derive(Debug, Default)]
pub struct EventQueue {
    next_seq: u64,
    // 最小堆：最早的 (at, seq) 在堆顶
    q: BinaryHeap<Reverse<ScheduledEvent>>,
}

impl EventQueue {
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            next_seq: 0,
            q: BinaryHeap::with_capacity(capacity_hint),
        }
    }

    /// 插入事件，返回分配给它的序列号。
    pub fn push(&mut self, at: SimTime, kind: EventKind) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(Reverse(ScheduledEvent { at, seq, kind }));
        trace!(?at, seq, ?kind, queue_size = self.q.len(), "事件已加入队列");
        seq
    }

    /// 弹出最早的事件；队列为空时返回 `None`。
    pub fn pop(&mut self) -> Option<ScheduledEvent> {
        self.q.pop().map(|Reverse(ev)| ev)
    }

    pub fn peek_time(&self) -> Option<SimTime> {
        self.q.peek().map(|Reverse(ev)| ev.at)
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 清空队列。序列号不回退，保证跨 clear 的插入顺序仍然单调。
    pub fn clear(&mut self) {
        self.q.clear();
    }
}
