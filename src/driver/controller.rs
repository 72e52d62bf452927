//! 控制面
//!
//! 宿主侧的入口：`start` / `cancel` / `resize` / `frame`。
//! 每次 `start` 都新建仿真上下文，之前的运行直接丢弃（不发出其 `done`）。

use std::time::Duration;

use tracing::{error, info};

use super::message::{Message, MessageSink};
use super::simulation::Simulation;
use super::step::{DriverOptions, StepDriver, StepStatus};
use crate::error::SimError;
use crate::model::{QueueConfig, QueueModel, RawQueueConfig};
use crate::sim::{DelaySource, ExpVariates};

pub struct Controller<S: MessageSink> {
    sink: S,
    opts: DriverOptions,
    driver: Option<StepDriver>,
    viewport: (u32, u32),
}

impl<S: MessageSink> Controller<S> {
    pub fn new(sink: S, opts: DriverOptions) -> Self {
        Self {
            sink,
            opts,
            driver: None,
            viewport: (1, 1),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn model(&self) -> Option<&QueueModel> {
        self.driver.as_ref().map(|d| d.simulation().model())
    }

    /// 是否有正在进行、尚未终止的运行。
    pub fn is_active(&self) -> bool {
        self.driver
            .as_ref()
            .is_some_and(|d| d.status() == StepStatus::Continue)
    }

    /// 以原始配置开始一次运行：非法字段钳制到下限，永不失败。
    pub fn start(&mut self, raw: &RawQueueConfig) {
        let config = raw.sanitize();
        let delays = ExpVariates::with_seed(self.opts.seed);
        self.start_with(config, Box::new(delays));
    }

    /// 以 JSON 负载开始一次运行。负载无法解析属于初始化失败：
    /// 发出一条 `error`，不会开始运行。
    pub fn start_json(&mut self, payload: &str) -> Result<(), SimError> {
        match serde_json::from_str::<RawQueueConfig>(payload) {
            Ok(raw) => {
                self.start(&raw);
                Ok(())
            }
            Err(err) => {
                let err = SimError::Init(err.to_string());
                self.fail_init(&err);
                Err(err)
            }
        }
    }

    /// 以给定配置与延迟来源开始一次运行。
    pub fn start_with(&mut self, config: QueueConfig, delays: Box<dyn DelaySource>) {
        if self.driver.take().is_some() {
            info!("丢弃上一次运行");
        }
        self.sink.send(Message::status("engine ready"));
        let sim = Simulation::with_capacity_hint(config, delays, self.opts.capacity_hint);
        self.driver = Some(StepDriver::new(sim, &self.opts));
        info!(?config, "仿真开始运行");
        self.sink.send(Message::status("simulation running"));
    }

    /// 初始化失败：丢弃当前运行并发出一条 `error`。
    pub fn fail_init(&mut self, err: &SimError) {
        error!(%err, "❌ 初始化失败");
        self.driver = None;
        self.sink.send(Message::Error {
            message: err.to_string(),
        });
    }

    /// 在下一次推进前停止；下一帧会发出 `done`。
    pub fn cancel(&mut self) {
        if let Some(driver) = self.driver.as_mut() {
            driver.cancel();
        }
    }

    /// 视口尺寸只转交给表现层，与仿真无关。
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        info!(width = self.viewport.0, height = self.viewport.1, "视口尺寸变更");
    }

    /// 宿主每帧调用一次。
    pub fn frame(&mut self, wall_now: Duration) -> Result<StepStatus, SimError> {
        let driver = self.driver.as_mut().ok_or(SimError::NotStarted)?;
        Ok(driver.step(wall_now, &mut self.sink))
    }
}
