//! 驱动模块
//!
//! 仿真上下文、分批推进驱动、对外消息与控制面。

mod controller;
mod message;
mod simulation;
mod step;

pub use controller::Controller;
pub use message::{EndReason, Message, MessageSink};
pub use simulation::{Advance, Simulation};
pub use step::{
    DEFAULT_BATCH_SIZE, DEFAULT_CAPACITY_HINT, DEFAULT_STATS_INTERVAL, DriverOptions, StepDriver,
    StepStatus,
};
