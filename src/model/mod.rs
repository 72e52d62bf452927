//! 排队模型模块
//!
//! 单服务台、有限等待区的 M/M/1/K 模型：配置、服务台、等待队列、统计与事件分派。

mod config;
mod dispatcher;
mod server;
mod stats;
mod wait_queue;

pub use config::{
    DEFAULT_ARRIVAL_RATE, DEFAULT_DURATION, DEFAULT_QUEUE_CAPACITY, DEFAULT_SERVICE_RATE,
    MIN_DURATION, MIN_RATE, QueueConfig, RawQueueConfig,
};
pub use dispatcher::{QueueModel, Slot, Transition};
pub use server::{EntityId, ServerState};
pub use stats::{Statistics, StatsSnapshot};
pub use wait_queue::WaitQueue;
