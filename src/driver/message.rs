//! 对外消息
//!
//! 引擎向表现层发出的消息，JSON 形式与前端约定一致（`type` 字段区分种类）。

use serde::{Deserialize, Serialize};

use crate::model::StatsSnapshot;

/// 运行结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// 时钟到达或超过仿真时长
    Horizon,
    /// 事件队列耗尽
    Exhausted,
    /// 外部取消
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// 生命周期提示（引擎就绪、开始运行）
    Status { text: String },
    /// 节流后的统计快照
    Stats {
        #[serde(rename = "simTime")]
        sim_time: f64,
        arrived: u64,
        served: u64,
        dropped: u64,
        #[serde(rename = "queueLength")]
        queue_length: usize,
    },
    /// 每次运行恰好一条的终止汇总
    Done {
        #[serde(rename = "simTime")]
        sim_time: f64,
        arrived: u64,
        served: u64,
        dropped: u64,
        reason: EndReason,
    },
    /// 致命错误；之后该次运行不再发出任何消息
    Error { message: String },
}

impl Message {
    pub fn status(text: impl Into<String>) -> Self {
        Message::Status { text: text.into() }
    }

    pub fn stats(s: &StatsSnapshot) -> Self {
        Message::Stats {
            sim_time: s.sim_time,
            arrived: s.arrived,
            served: s.served,
            dropped: s.dropped,
            queue_length: s.queue_length,
        }
    }

    pub fn done(s: &StatsSnapshot, reason: EndReason) -> Self {
        Message::Done {
            sim_time: s.sim_time,
            arrived: s.arrived,
            served: s.served,
            dropped: s.dropped,
            reason,
        }
    }
}

/// 消息接收端（表现层或进程间传输）
pub trait MessageSink {
    fn send(&mut self, msg: Message);
}

impl MessageSink for Vec<Message> {
    fn send(&mut self, msg: Message) {
        self.push(msg);
    }
}
