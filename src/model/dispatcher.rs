//! 事件分派器
//!
//! 把弹出的事件解释为到达或离开，修改服务台/等待队列状态，并调度后续事件。
//!
//! 状态机：
//! - Arrival：`arrived += 1`；空闲则直接占用服务台并调度 Departure；
//!   忙且等待区未满则入队；否则 `dropped += 1`。若 `now < horizon`，
//!   再调度下一次 Arrival。
//! - Departure：`served += 1` 并释放服务台；等待队列非空则队首接受服务，
//!   否则服务台变为空闲。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::QueueConfig;
use super::server::{EntityId, ServerState};
use super::stats::{Statistics, StatsSnapshot};
use super::wait_queue::WaitQueue;
use crate::error::SimError;
use crate::sim::{DelaySource, EventKind, EventQueue, SimTime};

/// 一次分派的结果，供表现层做动画关联。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    /// 到达时服务台空闲，直接开始服务
    Admitted { id: EntityId },
    /// 到达时服务台忙，进入等待队列（position 从 0 开始）
    Queued { id: EntityId, position: usize },
    /// 到达时等待区已满，被丢弃
    Dropped { id: EntityId },
    /// 服务完成；`next` 为随后开始服务的等待实体
    Completed {
        id: EntityId,
        next: Option<EntityId>,
    },
}

/// 表现层布局槽位：index 0 是服务台，index i+1 是第 i 个等待位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub entity: EntityId,
    pub index: usize,
}

/// M/M/1/K 模型状态。每次运行新建一个。
#[derive(Debug)]
pub struct QueueModel {
    config: QueueConfig,
    horizon: SimTime,
    server: ServerState,
    waiting: WaitQueue,
    stats: Statistics,
    next_entity: u64,
}

impl QueueModel {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            horizon: config.horizon(),
            waiting: WaitQueue::new(config.queue_capacity),
            config,
            server: ServerState::default(),
            stats: Statistics::default(),
            next_entity: 1,
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn server(&self) -> &ServerState {
        &self.server
    }

    pub fn wait_queue(&self) -> &WaitQueue {
        &self.waiting
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            sim_time: self.stats.sim_time,
            arrived: self.stats.arrived,
            served: self.stats.served,
            dropped: self.stats.dropped,
            queue_length: self.waiting.len(),
            server_busy: self.server.busy(),
        }
    }

    /// 服务中实体与等待实体的槽位。
    pub fn layout(&self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(self.waiting.len() + 1);
        if let Some(entity) = self.server.current() {
            slots.push(Slot { entity, index: 0 });
        }
        slots.extend(
            self.waiting
                .iter()
                .enumerate()
                .map(|(i, entity)| Slot { entity, index: i + 1 }),
        );
        slots
    }

    /// 在 `now` 之后调度第一次到达。
    pub fn schedule_first_arrival(
        &self,
        now: SimTime,
        queue: &mut EventQueue,
        delays: &mut dyn DelaySource,
    ) -> SimTime {
        self.schedule(EventKind::Arrival, now, queue, delays)
    }

    /// 分派一个已弹出的事件。
    pub fn handle(
        &mut self,
        kind: EventKind,
        now: SimTime,
        queue: &mut EventQueue,
        delays: &mut dyn DelaySource,
    ) -> Result<Transition, SimError> {
        self.stats.sim_time = now.as_secs_f64();
        match kind {
            EventKind::Arrival => Ok(self.on_arrival(now, queue, delays)),
            EventKind::Departure => self.on_departure(now, queue, delays),
        }
    }

    fn on_arrival(
        &mut self,
        now: SimTime,
        queue: &mut EventQueue,
        delays: &mut dyn DelaySource,
    ) -> Transition {
        self.stats.arrived += 1;
        let id = EntityId(self.next_entity);
        self.next_entity += 1;

        let transition = if !self.server.busy() {
            self.server.occupy(id);
            let at = self.schedule(EventKind::Departure, now, queue, delays);
            debug!(%id, %now, departure_at = %at, "到达：服务台空闲，开始服务");
            Transition::Admitted { id }
        } else {
            let position = self.waiting.len();
            match self.waiting.enqueue(id) {
                Ok(()) => {
                    debug!(%id, %now, position, "到达：进入等待队列");
                    Transition::Queued { id, position }
                }
                Err(id) => {
                    self.stats.dropped += 1;
                    debug!(%id, %now, dropped = self.stats.dropped, "到达：等待区已满，丢弃");
                    Transition::Dropped { id }
                }
            }
        };

        if now < self.horizon {
            self.schedule(EventKind::Arrival, now, queue, delays);
        }
        transition
    }

    fn on_departure(
        &mut self,
        now: SimTime,
        queue: &mut EventQueue,
        delays: &mut dyn DelaySource,
    ) -> Result<Transition, SimError> {
        let id = self
            .server
            .release()
            .ok_or(SimError::DepartureWhileIdle { at: now })?;
        self.stats.served += 1;

        let next = self.waiting.dequeue();
        match next {
            Some(next_id) => {
                self.server.occupy(next_id);
                let at = self.schedule(EventKind::Departure, now, queue, delays);
                debug!(%id, next = %next_id, %now, departure_at = %at, "离开：队首开始服务");
            }
            None => debug!(%id, %now, "离开：服务台空闲"),
        }
        Ok(Transition::Completed { id, next })
    }

    fn schedule(
        &self,
        kind: EventKind,
        now: SimTime,
        queue: &mut EventQueue,
        delays: &mut dyn DelaySource,
    ) -> SimTime {
        let rate = match kind {
            EventKind::Arrival => self.config.arrival_rate,
            EventKind::Departure => self.config.service_rate,
        };
        let delay = delays.sample(kind, rate);
        let at = now.saturating_add(SimTime::from_secs_f64(delay));
        queue.push(at, kind);
        at
    }
}
