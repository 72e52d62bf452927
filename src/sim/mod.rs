//! 仿真核心模块
//!
//! 此模块包含离散事件仿真的核心组件：仿真时间、事件、事件队列和随机延迟。

// 子模块声明
mod event;
mod event_queue;
mod instant_queue;
mod time;
mod variate;

// 重新导出公共接口
pub use event::EventKind;
pub use event_queue::{EventQueue, ScheduledEvent};
pub use instant_queue::{EMPTY, InstantQueue};
pub use time::SimTime;
pub use variate::{DelaySource, ExpVariates, RATE_FLOOR, ScriptedDelays, exponential};
