//! 事件类型
//!
//! M/M/1/K 模型只有两类事件：到达与离开。

use serde::{Deserialize, Serialize};

/// 事件种类。事件队列本身不按种类排序，只按 `(时间, 序列号)` 排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    Departure,
}
