use crate::driver::Simulation;
use crate::model::QueueConfig;
use crate::sim::{ExpVariates, ScriptedDelays};

/// 每秒一次到达、每次服务 0.5 秒的确定性配置。
pub fn every_second(queue_capacity: usize, duration: f64) -> (QueueConfig, ScriptedDelays) {
    let cfg = QueueConfig {
        arrival_rate: 1.0,
        service_rate: 2.0,
        queue_capacity,
        duration,
    };
    (cfg, ScriptedDelays::constant(1.0, 0.5))
}

pub fn seeded(cfg: QueueConfig, seed: u64) -> Simulation {
    Simulation::new(cfg, Box::new(ExpVariates::seeded(seed)))
}
