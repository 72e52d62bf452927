//! 时间点队列原语
//!
//! 与种类无关的时间点优先队列，保留外部调用方依赖的接口约定：
//! `init(capacity_hint)`、`push(instant)`、`pop() -> f64`，
//! 其中 `-1.0` 表示队列为空。调用方必须先检查哨兵值再使用弹出的时间点；
//! 新代码应优先使用 [`InstantQueue::try_pop`]。

use super::event::EventKind;
use super::event_queue::EventQueue;
use super::time::SimTime;

/// 空队列哨兵值。
pub const EMPTY: f64 = -1.0;

#[derive(Debug, Default)]
pub struct InstantQueue {
    inner: EventQueue,
}

impl InstantQueue {
    /// 重新初始化队列并预留容量，已有的时间点全部丢弃。
    pub fn init(&mut self, capacity_hint: usize) {
        self.inner = EventQueue::with_capacity(capacity_hint);
    }

    /// 插入一个时间点（秒）。负数与 NaN 按 0 处理。
    pub fn push(&mut self, instant: f64) {
        // 种类在这一层没有意义，统一记为 Arrival。
        self.inner
            .push(SimTime::from_secs_f64(instant), EventKind::Arrival);
    }

    /// 弹出最早的时间点；为空时返回 [`EMPTY`]。
    pub fn pop(&mut self) -> f64 {
        self.try_pop().unwrap_or(EMPTY)
    }

    pub fn try_pop(&mut self) -> Option<f64> {
        self.inner.pop().map(|ev| ev.at.as_secs_f64())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
