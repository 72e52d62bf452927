//! 统计信息
//!
//! 定义排队仿真的累计计数与对外快照。

use serde::{Deserialize, Serialize};

/// 累计计数
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub arrived: u64,
    pub served: u64,
    pub dropped: u64,
    /// 与仿真时钟同步（秒）
    pub sim_time: f64,
}

/// 某一观测时刻的完整状态快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub sim_time: f64,
    pub arrived: u64,
    pub served: u64,
    pub dropped: u64,
    pub queue_length: usize,
    pub server_busy: bool,
}

impl StatsSnapshot {
    /// 守恒律：arrived == served + dropped + (busy ? 1 : 0) + queue_length
    pub fn is_conserved(&self) -> bool {
        let in_system = u64::from(self.server_busy) + self.queue_length as u64;
        self.arrived == self.served + self.dropped + in_system
    }
}
