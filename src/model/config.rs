//! 运行配置
//!
//! `RawQueueConfig` 对应外部传入的 `start` 负载（字段可缺省、可为字符串），
//! `QueueConfig` 是一次运行中不可变的规范化配置。

use crate::error::ConfigError;
use crate::sim::SimTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_ARRIVAL_RATE: f64 = 1.8;
pub const DEFAULT_SERVICE_RATE: f64 = 2.2;
pub const DEFAULT_QUEUE_CAPACITY: usize = 12;
pub const DEFAULT_DURATION: f64 = 60.0;

pub const MIN_RATE: f64 = 0.1;
pub const MIN_DURATION: f64 = 1.0;

/// 规范化后的 M/M/1/K 配置。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueConfig {
    /// 到达率 λ（每秒）
    pub arrival_rate: f64,
    /// 服务率 μ（每秒）
    pub service_rate: f64,
    /// 等待区容量（不含正在服务的实体），0 表示没有等待区
    pub queue_capacity: usize,
    /// 仿真时长（秒）
    pub duration: f64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            service_rate: DEFAULT_SERVICE_RATE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            duration: DEFAULT_DURATION,
        }
    }
}

impl QueueConfig {
    /// 仿真视界：到达该时刻后不再调度新的到达。
    pub fn horizon(&self) -> SimTime {
        SimTime::from_secs_f64(self.duration)
    }
}

/// 外部输入的原始配置。数字、数字字符串均可；其他值视为缺省。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueueConfig {
    #[serde(default, deserialize_with = "lenient_number")]
    pub arrival_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub service_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub queue_capacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
}

impl RawQueueConfig {
    /// 钳制到文档化的下限，永不失败。
    pub fn sanitize(&self) -> QueueConfig {
        let arrival_rate = self.arrival_rate.unwrap_or(DEFAULT_ARRIVAL_RATE).max(MIN_RATE);
        let service_rate = self.service_rate.unwrap_or(DEFAULT_SERVICE_RATE).max(MIN_RATE);
        let queue_capacity = match self.queue_capacity {
            Some(cap) => cap.max(0.0).floor() as usize,
            None => DEFAULT_QUEUE_CAPACITY,
        };
        let duration = self.duration.unwrap_or(DEFAULT_DURATION).max(MIN_DURATION);
        QueueConfig {
            arrival_rate,
            service_rate,
            queue_capacity,
            duration,
        }
    }

    /// 严格校验：缺省字段取默认值，存在但非法的字段返回错误。
    pub fn validate(&self) -> Result<QueueConfig, ConfigError> {
        let rate = |field: &'static str, value: Option<f64>, default: f64| match value {
            Some(v) if v <= 0.0 => Err(ConfigError::NonPositiveRate { field, value: v }),
            Some(v) => Ok(v),
            None => Ok(default),
        };
        let arrival_rate = rate("arrivalRate", self.arrival_rate, DEFAULT_ARRIVAL_RATE)?;
        let service_rate = rate("serviceRate", self.service_rate, DEFAULT_SERVICE_RATE)?;
        let queue_capacity = match self.queue_capacity {
            Some(cap) if cap < 0.0 => return Err(ConfigError::NegativeCapacity(cap as i64)),
            Some(cap) => cap.floor() as usize,
            None => DEFAULT_QUEUE_CAPACITY,
        };
        let duration = match self.duration {
            Some(d) if d <= 0.0 => return Err(ConfigError::NonPositiveDuration(d)),
            Some(d) => d,
            None => DEFAULT_DURATION,
        };
        Ok(QueueConfig {
            arrival_rate,
            service_rate,
            queue_capacity,
            duration,
        })
    }
}

impl From<QueueConfig> for RawQueueConfig {
    fn from(cfg: QueueConfig) -> Self {
        Self {
            arrival_rate: Some(cfg.arrival_rate),
            service_rate: Some(cfg.service_rate),
            queue_capacity: Some(cfg.queue_capacity as f64),
            duration: Some(cfg.duration),
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });
    Ok(number.filter(|n| n.is_finite()))
}
