//! 服务台状态

use serde::{Deserialize, Serialize};
use std::fmt;

/// 实体标识符：每次到达分配一个，从 1 开始递增。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 单服务台。`busy()` 当且仅当有实体正在服务。
#[derive(Debug, Default, Clone)]
pub struct ServerState {
    current: Option<EntityId>,
}

impl ServerState {
    pub fn busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<EntityId> {
        self.current
    }

    /// 占用服务台。调用方保证服务台空闲。
    pub(crate) fn occupy(&mut self, id: EntityId) {
        debug_assert!(self.current.is_none(), "server already busy");
        self.current = Some(id);
    }

    /// 释放服务台，返回刚完成服务的实体。
    pub(crate) fn release(&mut self) -> Option<EntityId> {
        self.current.take()
    }
}
