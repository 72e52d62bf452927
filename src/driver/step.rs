//! 分批推进驱动
//!
//! 每次调用最多分派 `batch_size` 个事件，然后把控制权交还给宿主（例如帧回调）。
//! 批大小只影响表现节奏，不影响仿真结果。

use std::time::Duration;

use tracing::{debug, error};

use super::message::{EndReason, Message, MessageSink};
use super::simulation::{Advance, Simulation};

pub const DEFAULT_BATCH_SIZE: usize = 4;
pub const DEFAULT_STATS_INTERVAL: Duration = Duration::from_millis(120);
pub const DEFAULT_CAPACITY_HINT: usize = 4096;

/// 驱动参数（与模型配置无关）
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// 每次调用最多分派的事件数
    pub batch_size: usize,
    /// 两次统计快照之间的最短墙钟间隔
    pub stats_interval: Duration,
    /// 随机种子；`None` 时从系统熵初始化
    pub seed: Option<u64>,
    pub capacity_hint: usize,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            stats_interval: DEFAULT_STATS_INTERVAL,
            seed: None,
            capacity_hint: DEFAULT_CAPACITY_HINT,
        }
    }
}

/// 单次调用后的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// 宿主应安排下一次调用
    Continue,
    /// 已发出 `done`，不应再调用
    Finished(EndReason),
    /// 已发出 `error`，不应再调用
    Failed,
}

pub struct StepDriver {
    sim: Simulation,
    batch_size: usize,
    stats_interval: Duration,
    last_report: Duration,
    status: StepStatus,
}

impl StepDriver {
    pub fn new(sim: Simulation, opts: &DriverOptions) -> Self {
        Self {
            sim,
            batch_size: opts.batch_size.max(1),
            stats_interval: opts.stats_interval,
            last_report: Duration::ZERO,
            status: StepStatus::Continue,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    pub fn cancel(&mut self) {
        self.sim.cancel();
    }

    /// 推进一批事件。`wall_now` 是宿主的单调墙钟时间戳（自宿主启动起）。
    ///
    /// 运行结束时恰好发出一条 `done`；致命错误时恰好发出一条 `error`。
    /// 终止后再调用不会发出任何消息。
    pub fn step(&mut self, wall_now: Duration, sink: &mut dyn MessageSink) -> StepStatus {
        if self.status != StepStatus::Continue {
            return self.status;
        }

        let advance = match self.sim.advance(self.batch_size, None) {
            Ok(advance) => advance,
            Err(err) => {
                error!(%err, now = %self.sim.now(), "❌ 仿真中止");
                sink.send(Message::Error {
                    message: err.to_string(),
                });
                self.status = StepStatus::Failed;
                return self.status;
            }
        };

        self.report_if_due(wall_now, sink);

        if let Advance::Finished(reason) = advance {
            sink.send(Message::done(&self.sim.snapshot(), reason));
            self.status = StepStatus::Finished(reason);
        }
        self.status
    }

    fn report_if_due(&mut self, wall_now: Duration, sink: &mut dyn MessageSink) {
        if wall_now.saturating_sub(self.last_report) < self.stats_interval {
            return;
        }
        self.last_report = wall_now;
        let snapshot = self.sim.snapshot();
        debug!(?snapshot, "发送统计快照");
        sink.send(Message::stats(&snapshot));
    }
}
