use core::fmt;
use std::sync::Arc;

use fsv_reflect::info::TypeInfo;
use fsv_utils::TypeIdMap;

use super::{ArrayStrategy, EnumStrategy, ListStrategy, MapStrategy};
use super::{PrimitiveStrategy, ReflectiveStrategy, SerializerStrategy, TypeHandleStrategy};
use crate::error::{Error, Result};

/// The ordered list of strategies and the strategy resolved for each type.
///
/// Later registrations take priority, so a host strategy shadows the
/// built-in one for the types it claims. The cache lives as long as the
/// registry and is cleared whenever a strategy is added.
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn SerializerStrategy>>,
    // type -> index into `strategies`
    cache: TypeIdMap<usize>,
}

impl StrategyRegistry {
    /// Creates a registry without any strategy.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            strategies: Vec::new(),
            cache: TypeIdMap::new(),
        }
    }

    /// Creates a registry with the built-in strategies.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ReflectiveStrategy);
        registry.register(ListStrategy);
        registry.register(ArrayStrategy);
        registry.register(MapStrategy);
        registry.register(EnumStrategy);
        registry.register(TypeHandleStrategy);
        registry.register(PrimitiveStrategy);
        registry
    }

    /// Adds a strategy with the highest priority.
    #[inline]
    pub fn register(&mut self, strategy: impl SerializerStrategy) {
        self.register_arc(Arc::new(strategy));
    }

    pub fn register_arc(&mut self, strategy: Arc<dyn SerializerStrategy>) {
        self.strategies.push(strategy);
        self.cache.clear();
    }

    /// Returns the strategy of the type `info`.
    ///
    /// On a cache miss, strategies are probed from the highest priority
    /// down and the first one that handles the type is cached.
    ///
    /// # Errors
    ///
    /// [`Error::NoStrategyFound`] if no strategy handles the type.
    pub fn resolve(&mut self, info: &'static TypeInfo) -> Result<Arc<dyn SerializerStrategy>> {
        if let Some(&index) = self.cache.get(&info.ty_id()) {
            return Ok(Arc::clone(&self.strategies[index]));
        }

        let index = self
            .strategies
            .iter()
            .rposition(|strategy| strategy.handles(info))
            .ok_or(Error::NoStrategyFound {
                type_path: info.type_path(),
            })?;
        self.cache.insert(info.ty_id(), index);
        Ok(Arc::clone(&self.strategies[index]))
    }

    /// Forgets the resolved strategies, keeping the registered ones.
    #[inline]
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of registered strategies.
    #[inline]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Number of types with a cached strategy.
    #[inline]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Iterates over the strategies from the lowest priority up.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn SerializerStrategy> {
        self.strategies.iter().map(|strategy| &**strategy)
    }
}

impl Default for StrategyRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field(
                "strategies",
                &self.iter().map(|strategy| strategy.name()).collect::<Vec<_>>(),
            )
            .field("cached", &self.cached_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use fsv_reflect::Reflect;
    use fsv_reflect::info::{TypeInfo, Typed};

    use super::StrategyRegistry;
    use crate::engine::{DeserializeDriver, SerializeDriver};
    use crate::error::{Error, Result};
    use crate::strategy::SerializerStrategy;

    struct CountingStub {
        probes: Arc<AtomicUsize>,
    }

    impl SerializerStrategy for CountingStub {
        fn name(&self) -> &'static str {
            "counting stub"
        }

        fn handles(&self, info: &'static TypeInfo) -> bool {
            self.probes.fetch_add(1, Ordering::Relaxed);
            info.is::<u32>()
        }

        fn serialize(&self, _value: &dyn Reflect, _driver: &mut SerializeDriver) -> Result<()> {
            Ok(())
        }

        fn deserialize(&self, _: &mut dyn Reflect, _: &mut DeserializeDriver) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn resolve_probes_once_per_type() {
        let probes = Arc::new(AtomicUsize::new(0));
        let mut registry = StrategyRegistry::new();
        registry.register(CountingStub {
            probes: probes.clone(),
        });

        let info = u32::type_info();
        let first = registry.resolve(info).unwrap();
        let second = registry.resolve(info).unwrap();
        assert!(first.handles(info) && second.handles(info));
        assert_eq!(first.name(), "counting stub");
        assert!(Arc::ptr_eq(&first, &second));
        // one probe per resolve miss, plus the two `handles` calls above
        assert_eq!(probes.load(Ordering::Relaxed), 3);
        assert_eq!(registry.cached_len(), 1);
    }

    #[test]
    fn later_registrations_shadow_builtins() {
        let probes = Arc::new(AtomicUsize::new(0));
        let mut registry = StrategyRegistry::new();
        assert_eq!(
            registry.resolve(u32::type_info()).unwrap().name(),
            core::any::type_name::<crate::strategy::PrimitiveStrategy>()
        );
        assert_eq!(registry.cached_len(), 1);

        registry.register(CountingStub { probes });
        assert_eq!(registry.cached_len(), 0);
        assert_eq!(registry.resolve(u32::type_info()).unwrap().name(), "counting stub");
        // other types fall through to the built-ins
        assert!(registry.resolve(String::type_info()).is_ok());
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn no_strategy_and_clear_cache() {
        let mut registry = StrategyRegistry::empty();
        assert!(matches!(
            registry.resolve(u8::type_info()),
            Err(Error::NoStrategyFound { type_path: "u8" })
        ));

        let mut registry = StrategyRegistry::new();
        registry.resolve(u8::type_info()).unwrap();
        registry.resolve(<Vec<u8>>::type_info()).unwrap();
        assert_eq!(registry.cached_len(), 2);
        registry.clear_cache();
        assert_eq!(registry.cached_len(), 0);
        assert_eq!(registry.len(), 7);
    }
}
