//! 随机变量生成
//!
//! 指数分布延迟：`-ln(1 - u) / max(rate, ε)`，`u` 取自开区间 (0, 1)。

use super::event::EventKind;
use rand::distributions::Open01;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// 速率下限，防止非正速率导致除零或负延迟。
pub const RATE_FLOOR: f64 = 1e-5;

/// 由均匀抽样 `u ∈ (0, 1)` 计算指数分布延迟（秒）。
pub fn exponential(u: f64, rate: f64) -> f64 {
    -(1.0 - u).ln() / rate.max(RATE_FLOOR)
}

/// 延迟来源：为即将调度的事件给出距离当前时刻的延迟（秒）。
///
/// `kind` 是将要调度的事件种类（Arrival 对应到达间隔，Departure 对应服务时间）。
pub trait DelaySource {
    fn sample(&mut self, kind: EventKind, rate: f64) -> f64;
}

/// 基于 ChaCha8 的指数分布生成器；相同种子给出相同序列。
#[derive(Debug, Clone)]
pub struct ExpVariates {
    rng: ChaCha8Rng,
}

impl ExpVariates {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl DelaySource for ExpVariates {
    fn sample(&mut self, _kind: EventKind, rate: f64) -> f64 {
        let u: f64 = self.rng.sample(Open01);
        exponential(u, rate)
    }
}

/// 预先写好的延迟序列，绕过随机数生成器，用于确定性回放。
/// 序列耗尽后返回对应的常量延迟（默认为无穷大，即不再发生）。
#[derive(Debug, Clone)]
pub struct ScriptedDelays {
    arrivals: VecDeque<f64>,
    services: VecDeque<f64>,
    arrival_fallback: f64,
    service_fallback: f64,
}

impl ScriptedDelays {
    pub fn new(
        arrivals: impl IntoIterator<Item = f64>,
        services: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            arrivals: arrivals.into_iter().collect(),
            services: services.into_iter().collect(),
            arrival_fallback: f64::INFINITY,
            service_fallback: f64::INFINITY,
        }
    }

    /// 固定的到达间隔与服务时间。
    pub fn constant(arrival: f64, service: f64) -> Self {
        Self {
            arrivals: VecDeque::new(),
            services: VecDeque::new(),
            arrival_fallback: arrival,
            service_fallback: service,
        }
    }

    /// 序列耗尽后改用固定延迟。
    pub fn then_constant(mut self, arrival: f64, service: f64) -> Self {
        self.arrival_fallback = arrival;
        self.service_fallback = service;
        self
    }
}

impl DelaySource for ScriptedDelays {
    fn sample(&mut self, kind: EventKind, _rate: f64) -> f64 {
        match kind {
            EventKind::Arrival => self.arrivals.pop_front().unwrap_or(self.arrival_fallback),
            EventKind::Departure => self.services.pop_front().unwrap_or(self.service_fallback),
        }
    }
}
