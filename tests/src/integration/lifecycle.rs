//! # Integration: Holder Lifecycle
//!
//! Exercises validate-then-act across backend invalidation: broken
//! containers, disconnected actors, late-loading worlds and registry
//! teardown.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{chest_storage, session, stone};
    use std::sync::Arc;
    use stockpile::adapters::{ActorHandleSource, MemoryActor};
    use stockpile::domain::BlockLocation;
    use stockpile::ports::{ActorApi, ItemReceiver, Storage};
    use stockpile::service::{DiscreteStorage, HolderManager};
    use stockpile::StorageError;

    #[test]
    fn test_broken_container_invalidates_existing_storage() {
        let (_, world, registry) = session();
        let (storage, _) = chest_storage(&world, &registry, (0, 64, 0), 3);
        storage.set_slot_item(0, Some(stone(10))).unwrap();

        world.break_container((0, 64, 0));
        let err = storage.slot(0).unwrap().item().unwrap_err();
        assert!(matches!(err, StorageError::HolderInvalid { .. }));
        assert_eq!(
            storage.size().unwrap(),
            3,
            "the slot layout is a construction-time snapshot"
        );
    }

    #[test]
    fn test_replaced_container_revalidates_without_reopening() {
        let (_, world, registry) = session();
        let (storage, _) = chest_storage(&world, &registry, (0, 64, 0), 3);

        world.break_container((0, 64, 0));
        assert!(storage.add_all(vec![stone(5)]).is_err());

        // a new chest at the same coordinates picks up transparently
        let replacement = world.place_container((0, 64, 0), "chest", 3);
        storage
            .add_all(vec![stone(5)])
            .expect("resolution retries against the live world");
        assert_eq!(replacement.contents_snapshot()[0], Some(stone(5)));
    }

    #[test]
    fn test_storage_opens_after_world_loads() {
        let (universe, _, registry) = session();
        let location = BlockLocation::new(0, 80, 0, "nether");

        // manager creation is lazy, so a missing world only surfaces
        // on use
        let manager = registry.block_manager(location);
        assert!(matches!(
            manager.validate().unwrap_err(),
            StorageError::HolderInvalid { .. }
        ));

        let nether = universe.add_world("nether");
        nether.place_container((0, 80, 0), "chest", 9);
        let storage = DiscreteStorage::new(manager)
            .expect("the same manager resolves once the world loads");
        assert_eq!(storage.len(), 9);
    }

    #[test]
    fn test_world_unload_stops_new_resolutions() {
        let (universe, world, registry) = session();
        world.place_container((1, 64, 0), "chest", 1);
        let (storage, _) = chest_storage(&world, &registry, (0, 64, 0), 1);

        universe.remove_world("overworld");

        // the already-resolved storage keeps its world reference
        storage.set_slot_item(0, Some(stone(2))).unwrap();

        // a manager created after the unload cannot resolve
        let late = registry.block_manager(BlockLocation::new(1, 64, 0, "overworld"));
        assert!(matches!(
            late.validate().unwrap_err(),
            StorageError::HolderInvalid { .. }
        ));
    }

    #[test]
    fn test_actor_disconnect_blocks_access_until_reconnect() {
        let actor = MemoryActor::new("steve", 36);
        let manager = Arc::new(HolderManager::new(Box::new(ActorHandleSource::new(
            Arc::clone(&actor) as Arc<dyn ActorApi>,
        ))));
        let storage = DiscreteStorage::new(manager).unwrap();
        storage.set_slot_item(0, Some(stone(3))).unwrap();
        assert_eq!(actor.update_notifications(), 1);

        actor.disconnect();
        assert!(matches!(
            storage.slot(0).unwrap().item().unwrap_err(),
            StorageError::HolderInvalid { .. }
        ));

        actor.reconnect();
        assert_eq!(
            storage.slot(0).unwrap().item().unwrap(),
            Some(stone(3)),
            "inventory survives the disconnect"
        );
    }

    #[test]
    fn test_registry_deduplicates_and_clears() {
        let (_, world, registry) = session();
        world.place_container((1, 64, 0), "chest", 1);
        let location = BlockLocation::new(1, 64, 0, "overworld");

        let first = registry.block_manager(location.clone());
        let second = registry.block_manager(location.clone());
        assert!(
            Arc::ptr_eq(&first, &second),
            "one manager per location key"
        );
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
        let third = registry.block_manager(location);
        assert!(!Arc::ptr_eq(&first, &third), "teardown drops old entries");
    }

    #[test]
    fn test_validated_block_manager_surfaces_missing_container() {
        let (_, world, registry) = session();
        let location = BlockLocation::new(9, 9, 9, "overworld");

        let err = registry
            .validated_block_manager(location.clone())
            .unwrap_err();
        assert!(matches!(err, StorageError::HolderInvalid { .. }));

        // the entry stays registered and validates once a chest shows up
        world.place_container((9, 9, 9), "chest", 9);
        let manager = registry
            .validated_block_manager(location.clone())
            .expect("container now exists");
        assert!(Arc::ptr_eq(&manager, &registry.block_manager(location)));
    }
}
