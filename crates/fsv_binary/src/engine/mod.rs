//! The serializer engine and its per-pass drivers.

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::DeserializeDriver;
pub use ser::SerializeDriver;

use core::any::{Any, TypeId};
use core::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use fsv_reflect::Reflect;
use fsv_reflect::info::{StructInfo, TypeInfo};
use fsv_reflect::registry::{GetTypeMeta, TypeRegistry};

use crate::config::{EngineConfig, Mode};
use crate::error::{Error, Result};
use crate::member::{DefaultMemberPolicy, MemberCache, MemberPolicy, SerializableMember};
use crate::strategy::{SerializerStrategy, StrategyRegistry};

// -----------------------------------------------------------------------------
// Engine

/// Serializes and deserializes reflected values.
///
/// The engine owns everything that outlives a single pass: the type
/// registry used for type tags, the strategies with their per-type cache
/// and the member lists of struct types. Every entry point runs one
/// independent pass; reference ids are local to it.
///
/// # Examples
///
/// ```
/// use fsv_binary::{Engine, Mode};
///
/// let mut engine = Engine::builder().mode(Mode::Minimal).build();
/// let bytes = engine.to_bytes(&vec![1_u8, 2, 3]).unwrap();
/// let back: Vec<u8> = engine.from_bytes(&bytes).unwrap();
/// assert_eq!(back, [1, 2, 3]);
/// ```
pub struct Engine {
    config: EngineConfig,
    types: TypeRegistry,
    strategies: StrategyRegistry,
    members: MemberCache,
    policy: Box<dyn MemberPolicy>,
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Creates an engine with the built-in strategies and the default
    /// member policy.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            types: TypeRegistry::new(),
            strategies: StrategyRegistry::new(),
            members: MemberCache::new(),
            policy: Box::new(DefaultMemberPolicy::new()),
        }
    }

    #[inline]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// The registry used to write and resolve type tags.
    #[inline]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    #[inline]
    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    /// Registers `T` and the types it depends on.
    ///
    /// Only needed for the runtime types of polymorphic references, every
    /// declared type is known statically.
    #[inline]
    pub fn register_type<T: GetTypeMeta>(&mut self) {
        self.types.register::<T>();
    }

    /// Adds a strategy that takes priority over all existing ones.
    pub fn register_strategy(&mut self, strategy: impl SerializerStrategy) {
        log::debug!("registered serializer strategy `{}`", strategy.name());
        self.strategies.register(strategy);
    }

    #[inline]
    pub fn strategies(&self) -> &StrategyRegistry {
        &self.strategies
    }

    /// Returns the strategy of the type `info`, see
    /// [`StrategyRegistry::resolve`].
    #[inline]
    pub fn resolve(&mut self, info: &'static TypeInfo) -> Result<Arc<dyn SerializerStrategy>> {
        self.strategies.resolve(info)
    }

    /// Forgets resolved strategies and member lists.
    pub fn clear_cache(&mut self) {
        log::debug!(
            "clearing {} cached strategies and {} member lists",
            self.strategies.cached_len(),
            self.members.len(),
        );
        self.strategies.clear_cache();
        self.members.clear();
    }

    fn env(&mut self) -> PassEnv<'_> {
        PassEnv {
            config: self.config,
            types: &self.types,
            strategies: &mut self.strategies,
            members: &mut self.members,
            policy: &*self.policy,
        }
    }

    // -------------------------------------------------------------------------
    // Serialize

    /// Writes `value` to `writer`.
    ///
    /// # Errors
    ///
    /// Any [`Error`]; the writer may have received part of the output.
    #[inline]
    pub fn serialize<W: Write>(&mut self, writer: W, value: &dyn Reflect) -> Result<()> {
        self.serialize_inner(writer, value, None)
    }

    /// Writes `value` to `writer`, giving strategies access to `context`
    /// through [`SerializeDriver::context`].
    #[inline]
    pub fn serialize_with_context<W: Write>(
        &mut self,
        writer: W,
        value: &dyn Reflect,
        context: &mut dyn Any,
    ) -> Result<()> {
        self.serialize_inner(writer, value, Some(context))
    }

    fn serialize_inner<W: Write>(
        &mut self,
        writer: W,
        value: &dyn Reflect,
        context: Option<&mut dyn Any>,
    ) -> Result<()> {
        let mode = self.config.mode;
        let mut writer = Counted::new(writer);
        let mut driver = SerializeDriver::new(&mut writer, self.env(), context);
        let result = driver.serialize_value(value);
        let shared = driver.shared_count();
        drop(driver);

        match &result {
            Ok(()) => log::trace!(
                "serialized `{}` in {mode:?} mode: {} bytes, {shared} shared objects",
                value.reflect_type_path(),
                writer.count,
            ),
            Err(err) => log::debug!(
                "failed to serialize `{}` after {} bytes: {err}",
                value.reflect_type_path(),
                writer.count,
            ),
        }
        result
    }

    /// Serializes `value` into a new buffer.
    pub fn to_bytes(&mut self, value: &dyn Reflect) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.serialize(&mut bytes, value)?;
        Ok(bytes)
    }

    /// Serializes `value` into the file at `path`, replacing its content.
    pub fn to_file(&mut self, path: impl AsRef<Path>, value: &dyn Reflect) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.serialize(&mut writer, value)?;
        writer.flush()?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Deserialize

    /// Reads a new `T` from `reader`.
    ///
    /// The value starts as `T::default()`; members missing from the stream
    /// keep their default.
    pub fn deserialize<T: Reflect + Default, R: Read>(&mut self, reader: R) -> Result<T> {
        let mut value = T::default();
        self.deserialize_inner(reader, &mut value, None)?;
        Ok(value)
    }

    /// Reads from `reader` into an existing value.
    ///
    /// On error the target may be partially overwritten.
    #[inline]
    pub fn deserialize_into<R: Read>(&mut self, reader: R, target: &mut dyn Reflect) -> Result<()> {
        self.deserialize_inner(reader, target, None)
    }

    /// Reads into `target`, giving strategies access to `context` through
    /// [`DeserializeDriver::context`].
    #[inline]
    pub fn deserialize_into_with_context<R: Read>(
        &mut self,
        reader: R,
        target: &mut dyn Reflect,
        context: &mut dyn Any,
    ) -> Result<()> {
        self.deserialize_inner(reader, target, Some(context))
    }

    fn deserialize_inner<R: Read>(
        &mut self,
        reader: R,
        target: &mut dyn Reflect,
        context: Option<&mut dyn Any>,
    ) -> Result<()> {
        let mode = self.config.mode;
        let mut reader = Counted::new(reader);
        let mut driver = DeserializeDriver::new(&mut reader, self.env(), context);
        let result = driver.deserialize_value(target);
        let shared = driver.shared_count();
        drop(driver);

        match &result {
            Ok(()) => log::trace!(
                "deserialized `{}` in {mode:?} mode: {} bytes, {shared} shared objects",
                target.reflect_type_path(),
                reader.count,
            ),
            Err(err) => log::debug!(
                "failed to deserialize `{}` after {} bytes: {err}",
                target.reflect_type_path(),
                reader.count,
            ),
        }
        result
    }

    /// Deserializes a new `T` from `bytes`.
    ///
    /// Trailing bytes are left unread.
    #[inline]
    pub fn from_bytes<T: Reflect + Default>(&mut self, bytes: &[u8]) -> Result<T> {
        self.deserialize(bytes)
    }

    #[inline]
    pub fn from_bytes_into(&mut self, bytes: &[u8], target: &mut dyn Reflect) -> Result<()> {
        self.deserialize_into(bytes, target)
    }

    /// Deserializes a new `T` from the file at `path`.
    pub fn from_file<T: Reflect + Default>(&mut self, path: impl AsRef<Path>) -> Result<T> {
        self.deserialize(BufReader::new(File::open(path)?))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("types", &self.types.len())
            .field("strategies", &self.strategies)
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// EngineBuilder

/// Builds an [`Engine`].
///
/// # Examples
///
/// ```
/// use fsv_binary::{Engine, Mode};
///
/// let engine = Engine::builder()
///     .mode(Mode::Minimal)
///     .max_depth(64)
///     .build();
/// assert_eq!(engine.mode(), Mode::Minimal);
/// assert_eq!(engine.config().max_depth, 64);
/// ```
#[must_use]
pub struct EngineBuilder {
    config: EngineConfig,
    defaults: DefaultMemberPolicy,
    policy: Option<Box<dyn MemberPolicy>>,
    strategies: Vec<Arc<dyn SerializerStrategy>>,
    types: TypeRegistry,
}

impl Default for EngineBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            defaults: DefaultMemberPolicy::new(),
            policy: None,
            strategies: Vec::new(),
            types: TypeRegistry::new(),
        }
    }

    #[inline]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    #[inline]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Replaces the default member policy.
    ///
    /// Known value types no longer apply once a custom policy is set.
    #[inline]
    pub fn member_policy(mut self, policy: impl MemberPolicy) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Marks the opaque type `T` as serializable under the default member
    /// policy, see [`DefaultMemberPolicy::add_known_value_type`].
    #[inline]
    pub fn known_value_type<T: Any>(mut self) -> Self {
        self.defaults.add_known_value_type(TypeId::of::<T>());
        self
    }

    /// Adds a strategy, later ones taking priority.
    #[inline]
    pub fn strategy(mut self, strategy: impl SerializerStrategy) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    #[inline]
    pub fn register_type<T: GetTypeMeta>(mut self) -> Self {
        self.types.register::<T>();
        self
    }

    pub fn build(self) -> Engine {
        let mut strategies = StrategyRegistry::new();
        for strategy in self.strategies {
            log::debug!("registered serializer strategy `{}`", strategy.name());
            strategies.register_arc(strategy);
        }
        Engine {
            config: self.config,
            types: self.types,
            strategies,
            members: MemberCache::new(),
            policy: self
                .policy
                .unwrap_or_else(|| Box::new(self.defaults)),
        }
    }
}

// -----------------------------------------------------------------------------
// Pass state

// Engine state borrowed by the driver of one pass.
pub(crate) struct PassEnv<'a> {
    pub(crate) config: EngineConfig,
    pub(crate) types: &'a TypeRegistry,
    pub(crate) strategies: &'a mut StrategyRegistry,
    members: &'a mut MemberCache,
    policy: &'a dyn MemberPolicy,
}

impl PassEnv<'_> {
    #[inline]
    pub(crate) fn members(&mut self, info: &'static StructInfo) -> Arc<[SerializableMember]> {
        self.members.members(info, self.policy)
    }
}

pub(crate) struct DepthGuard {
    depth: usize,
    limit: usize,
}

impl DepthGuard {
    #[inline]
    pub(crate) const fn new(limit: usize) -> Self {
        Self { depth: 0, limit }
    }

    #[inline]
    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.depth >= self.limit {
            return Err(Error::DepthLimitExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn exit(&mut self) {
        self.depth -= 1;
    }
}

// Counts the bytes of a pass for the trace log.
struct Counted<T> {
    inner: T,
    count: u64,
}

impl<T> Counted<T> {
    #[inline]
    const fn new(inner: T) -> Self {
        Self { inner, count: 0 }
    }
}

impl<W: Write> Write for Counted<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written as u64;
        Ok(written)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<R: Read> Read for Counted<R> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.count += read as u64;
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::{DepthGuard, Engine};
    use crate::config::{EngineConfig, Mode};
    use crate::error::Error;
    use crate::member::AllFields;

    #[test]
    fn depth_guard_limits_nesting() {
        let mut guard = DepthGuard::new(2);
        guard.enter().unwrap();
        guard.enter().unwrap();
        assert!(matches!(guard.enter(), Err(Error::DepthLimitExceeded { limit: 2 })));
        guard.exit();
        guard.enter().unwrap();
    }

    #[test]
    fn builder_applies_config() {
        let config = EngineConfig::new(Mode::Minimal).with_max_depth(16);
        let engine = Engine::builder()
            .config(config)
            .member_policy(AllFields)
            .build();
        assert_eq!(*engine.config(), config);
        assert_eq!(engine.strategies().len(), 7);
    }

    #[test]
    fn clear_cache_keeps_strategies() {
        let mut engine = Engine::default();
        engine.to_bytes(&vec![1_u32, 2]).unwrap();
        assert_eq!(engine.strategies().cached_len(), 2);
        engine.clear_cache();
        assert_eq!(engine.strategies().cached_len(), 0);
        assert_eq!(engine.strategies().len(), 7);
    }
}
