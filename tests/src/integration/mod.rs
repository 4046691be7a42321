pub mod concurrency;
pub mod lifecycle;
pub mod persistence;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;
    use stockpile::adapters::memory::{MemoryHolder, MemoryUniverse, MemoryWorld};
    use stockpile::domain::{BlockLocation, Item, ItemKind};
    use stockpile::service::{DiscreteStorage, HandleRegistry};

    pub fn stone(quantity: u32) -> Item {
        Item::new(ItemKind::new("stone"), quantity)
    }

    /// Route library logs through the test harness, honoring RUST_LOG.
    fn init_tracing() {
        use tracing_subscriber::EnvFilter;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A universe with one world, plus its registry.
    pub fn session() -> (Arc<MemoryUniverse>, Arc<MemoryWorld>, HandleRegistry) {
        init_tracing();
        let universe = MemoryUniverse::new();
        let world = universe.add_world("overworld");
        let registry = HandleRegistry::new(Arc::clone(&universe) as _);
        (universe, world, registry)
    }

    /// Place a chest and open a discrete storage over it.
    pub fn chest_storage(
        world: &MemoryWorld,
        registry: &HandleRegistry,
        position: (i32, i32, i32),
        capacity: usize,
    ) -> (DiscreteStorage, Arc<MemoryHolder>) {
        let holder = world.place_container(position, "chest", capacity);
        let location = BlockLocation::of("overworld", position);
        let storage = DiscreteStorage::new(registry.block_manager(location))
            .expect("freshly placed chest validates");
        (storage, holder)
    }
}
