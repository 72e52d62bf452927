use crate::model::{EntityId, WaitQueue};

#[test]
fn wait_queue_enforces_capacity_and_preserves_order() {
    let mut q = WaitQueue::new(2);
    assert_eq!(q.capacity(), 2);
    assert!(q.is_empty());

    assert!(q.enqueue(EntityId(1)).is_ok());
    assert!(q.enqueue(EntityId(2)).is_ok());
    assert!(q.is_full());

    let rejected = q.enqueue(EntityId(3)).expect_err("should drop");
    assert_eq!(rejected, EntityId(3));
    assert_eq!(q.len(), 2);
    assert_eq!(q.iter().collect::<Vec<_>>(), vec![EntityId(1), EntityId(2)]);

    assert_eq!(q.dequeue(), Some(EntityId(1)));
    assert!(q.enqueue(EntityId(4)).is_ok());
    assert_eq!(q.dequeue(), Some(EntityId(2)));
    assert_eq!(q.dequeue(), Some(EntityId(4)));
    assert_eq!(q.dequeue(), None);
}

#[test]
fn zero_capacity_queue_rejects_everything() {
    let mut q = WaitQueue::new(0);
    assert!(q.is_full());
    assert_eq!(q.enqueue(EntityId(1)), Err(EntityId(1)));
    assert_eq!(q.len(), 0);
}

#[test]
fn huge_capacity_does_not_preallocate() {
    let mut q = WaitQueue::new(usize::MAX);
    assert_eq!(q.capacity(), usize::MAX);
    assert!(!q.is_full());
    assert!(q.enqueue(EntityId(1)).is_ok());
    assert_eq!(q.dequeue(), Some(EntityId(1)));
}
