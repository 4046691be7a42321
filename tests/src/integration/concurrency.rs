//! # Integration: Concurrency
//!
//! The managers validate and act per call but never lock across calls,
//! so a read-modify-write spanning two calls races with other callers.
//! These tests pin down both sides: the race window exists, and the
//! registry's per-handle lock closes it.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{chest_storage, session, stone};
    use std::sync::Arc;
    use stockpile::domain::BlockLocation;
    use stockpile::ports::ItemReceiver;
    use stockpile::service::HandleKey;

    #[test]
    fn test_unlocked_compound_update_can_lose_a_write() {
        let (_, world, registry) = session();
        let (storage, _) = chest_storage(&world, &registry, (0, 64, 0), 1);
        storage.set_slot_item(0, Some(stone(10))).unwrap();

        // two interleaved read-then-write sequences, no lock held
        let first_read = storage.slot(0).unwrap().item().unwrap().unwrap();
        let second_read = storage.slot(0).unwrap().item().unwrap().unwrap();
        storage
            .set_slot_item(0, Some(stone(first_read.quantity + 5)))
            .unwrap();
        storage
            .set_slot_item(0, Some(stone(second_read.quantity + 5)))
            .unwrap();

        assert_eq!(
            storage.slot(0).unwrap().item().unwrap(),
            Some(stone(15)),
            "one of the two increments is lost without the handle lock"
        );
    }

    #[test]
    fn test_handle_lock_serializes_compound_updates() {
        let (_, world, registry) = session();
        let (storage, _) = chest_storage(&world, &registry, (0, 64, 0), 1);
        storage.set_slot_item(0, Some(stone(1))).unwrap();

        let storage = Arc::new(storage);
        let registry = Arc::new(registry);
        let key = HandleKey::Block(BlockLocation::new(0, 64, 0, "overworld"));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let storage = Arc::clone(&storage);
                let registry = Arc::clone(&registry);
                let key = key.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        let lock = registry.handle_lock(key.clone());
                        let _guard = lock.lock();
                        let current = storage.slot(0).unwrap().item().unwrap().unwrap();
                        storage
                            .set_slot_item(0, Some(stone(current.quantity + 1)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(
            storage.slot(0).unwrap().item().unwrap(),
            Some(stone(201)),
            "8 workers x 25 increments, none lost under the lock"
        );
    }

    #[test]
    fn test_single_call_bulk_adds_are_atomic_without_a_lock() {
        let (_, world, registry) = session();
        let (storage, holder) = chest_storage(&world, &registry, (0, 64, 0), 4);

        // each add_items call is one holder operation, so concurrent
        // callers need no external lock
        let storage = Arc::new(storage);
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let storage = Arc::clone(&storage);
                std::thread::spawn(move || {
                    let leftover = storage.add_items(vec![stone(16)]).unwrap();
                    assert!(leftover.is_empty(), "256 capacity, 64 offered in total");
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let total: u32 = holder
            .contents_snapshot()
            .into_iter()
            .flatten()
            .map(|item| item.quantity)
            .sum();
        assert_eq!(total, 64, "every delivered item is accounted for");
    }
}
