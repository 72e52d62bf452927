//! 等待队列（尾丢弃）
//!
//! 容量按实体个数计算；等待区满时直接拒绝新到达的实体。
//! 容量只是上界，存储随实际排队长度增长。

use std::collections::VecDeque;

use super::server::EntityId;

#[derive(Debug)]
pub struct WaitQueue {
    capacity: usize,
    q: VecDeque<EntityId>,
}

impl WaitQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            q: VecDeque::new(),
        }
    }

    /// 入队：成功返回 Ok；等待区已满则返回 Err(id)
    pub fn enqueue(&mut self, id: EntityId) -> Result<(), EntityId> {
        if self.is_full() {
            return Err(id);
        }
        self.q.push_back(id);
        Ok(())
    }

    /// 出队：FIFO，最早入队的实体先被服务
    pub fn dequeue(&mut self) -> Option<EntityId> {
        self.q.pop_front()
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.q.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.q.iter().copied()
    }
}
