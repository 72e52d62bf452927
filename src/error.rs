//! 错误类型
//!
//! 配置异常默认在引擎内部钳制吸收；只有内部一致性破坏与初始化失败
//! 会作为致命错误向调用方传播。

use crate::sim::SimTime;
use thiserror::Error;

/// 仿真运行中的致命错误。
#[derive(Debug, Error)]
pub enum SimError {
    /// 服务台空闲时弹出了 Departure 事件，说明调度逻辑有缺陷。
    #[error("departure dispatched at {at} while the server is idle")]
    DepartureWhileIdle { at: SimTime },
    #[error("simulation halted after a fatal error")]
    Halted,
    #[error("simulation stepped before start")]
    NotStarted,
    #[error("initialization failed: {0}")]
    Init(String),
}

/// 严格校验模式下的配置错误。
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositiveRate { field: &'static str, value: f64 },
    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(f64),
    #[error("queue capacity must be non-negative, got {0}")]
    NegativeCapacity(i64),
}
