//! 仿真上下文
//!
//! 显式持有一次运行的全部状态（事件队列、时钟、模型、延迟来源），
//! 由调用方拥有并驱动，多个运行之间互不影响。

use tracing::{debug, info, trace};

use super::message::EndReason;
use crate::error::SimError;
use crate::model::{QueueConfig, QueueModel, StatsSnapshot, Transition};
use crate::sim::{DelaySource, EventQueue, ScheduledEvent, SimTime};

/// 单次推进的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// 还有待处理事件，可继续推进
    Continuing,
    /// 运行已结束
    Finished(EndReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Ended(EndReason),
    Failed,
}

pub struct Simulation {
    now: SimTime,
    queue: EventQueue,
    model: QueueModel,
    delays: Box<dyn DelaySource>,
    state: RunState,
    dispatched: u64,
}

impl Simulation {
    /// 新建一次运行，并在 t=0 之后调度第一次到达。
    pub fn new(config: QueueConfig, delays: Box<dyn DelaySource>) -> Self {
        Self::with_capacity_hint(config, delays, 0)
    }

    #[tracing::instrument(skip(delays))]
    pub fn with_capacity_hint(
        config: QueueConfig,
        mut delays: Box<dyn DelaySource>,
        capacity_hint: usize,
    ) -> Self {
        let mut queue = EventQueue::with_capacity(capacity_hint);
        let model = QueueModel::new(config);
        let first = model.schedule_first_arrival(SimTime::ZERO, &mut queue, delays.as_mut());
        info!(first_arrival = %first, horizon = %model.horizon(), "▶️  仿真已初始化");
        Self {
            now: SimTime::ZERO,
            queue,
            model,
            delays,
            state: RunState::Running,
            dispatched: 0,
        }
    }

    /// 当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn model(&self) -> &QueueModel {
        &self.model
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.model.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// 结束原因；仍在运行或因错误中止时为 `None`。
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.state {
            RunState::Ended(reason) => Some(reason),
            _ => None,
        }
    }

    /// 协作式取消：之后不再分派任何事件，已有统计保持不变。
    pub fn cancel(&mut self) {
        if self.state == RunState::Running {
            info!(now = %self.now, "⏹️  仿真被取消");
            self.state = RunState::Ended(EndReason::Cancelled);
        }
    }

    /// 弹出并分派一个事件。队列为空或运行已结束（含取消）时返回 `Ok(None)`，
    /// 因错误中止后返回 `SimError::Halted`。
    pub fn dispatch_next(&mut self) -> Result<Option<(ScheduledEvent, Transition)>, SimError> {
        match self.state {
            RunState::Running => {}
            RunState::Ended(_) => return Ok(None),
            RunState::Failed => return Err(SimError::Halted),
        }
        let Some(ev) = self.queue.pop() else {
            return Ok(None);
        };
        debug_assert!(ev.at >= self.now, "clock must not go backwards");
        self.now = ev.at;
        self.dispatched += 1;
        trace!(seq = ev.seq, kind = ?ev.kind, remaining_queue = self.queue.len(), "弹出事件");

        let transition =
            match self
                .model
                .handle(ev.kind, self.now, &mut self.queue, self.delays.as_mut())
            {
                Ok(t) => t,
                Err(err) => {
                    self.state = RunState::Failed;
                    return Err(err);
                }
            };
        Ok(Some((ev, transition)))
    }

    /// 最多分派 `max_events` 个事件；若给定 `until`，不分派晚于它的事件。
    ///
    /// 队列耗尽或时钟到达仿真时长时运行结束。
    pub fn advance(
        &mut self,
        max_events: usize,
        until: Option<SimTime>,
    ) -> Result<Advance, SimError> {
        for _ in 0..max_events {
            match self.state {
                RunState::Running => {}
                RunState::Ended(reason) => return Ok(Advance::Finished(reason)),
                RunState::Failed => return Err(SimError::Halted),
            }
            if let (Some(until), Some(next)) = (until, self.queue.peek_time()) {
                if next > until {
                    break;
                }
            }
            if self.dispatch_next()?.is_none() {
                self.finish(EndReason::Exhausted);
                break;
            }
            if self.now >= self.model.horizon() {
                self.finish(EndReason::Horizon);
                break;
            }
        }

        match self.state {
            RunState::Running => Ok(Advance::Continuing),
            RunState::Ended(reason) => Ok(Advance::Finished(reason)),
            RunState::Failed => Err(SimError::Halted),
        }
    }

    /// 一直推进到运行结束（供测试与非交互宿主使用）。
    pub fn run_to_end(&mut self) -> Result<EndReason, SimError> {
        loop {
            if let Advance::Finished(reason) = self.advance(usize::MAX, None)? {
                return Ok(reason);
            }
        }
    }

    /// 直接向事件队列注入事件，绕过分派器的调度规则。
    #[cfg(test)]
    pub(crate) fn inject(&mut self, at: SimTime, kind: crate::sim::EventKind) {
        self.queue.push(at, kind);
    }

    fn finish(&mut self, reason: EndReason) {
        let s = self.model.snapshot();
        info!(
            ?reason,
            now = %self.now,
            events = self.dispatched,
            arrived = s.arrived,
            served = s.served,
            dropped = s.dropped,
            "✅ 仿真完成"
        );
        debug!(pending = self.queue.len(), "剩余未处理事件");
        self.state = RunState::Ended(reason);
    }
}
