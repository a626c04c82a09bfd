//! Serializer strategies.
//!
//! ## Menu
//!
//! - [`SerializerStrategy`]: the encoder / decoder of a set of types.
//! - [`StrategyRegistry`]: the ordered strategy list with its per-type cache.
//!
//! Built-in strategies, from lowest to highest priority:
//!
//! - [`ReflectiveStrategy`]: structs, member by member.
//! - [`ListStrategy`], [`ArrayStrategy`], [`MapStrategy`]: containers.
//! - [`EnumStrategy`]: variant index and variant fields.
//! - [`TypeHandleStrategy`]: [`TypeHandle`](fsv_reflect::info::TypeHandle) values.
//! - [`PrimitiveStrategy`]: the fixed primitive set.
//!
//! `Option<T>` and `Shared<T>` are framed by the engine itself and never
//! reach a strategy, their inner values do.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod enum_strategy;
mod list;
mod map;
mod primitive;
mod reflective;
mod registry;
mod type_handle;

// -----------------------------------------------------------------------------
// Exports

pub use array::ArrayStrategy;
pub use enum_strategy::EnumStrategy;
pub use list::ListStrategy;
pub use map::MapStrategy;
pub use primitive::PrimitiveStrategy;
pub use reflective::ReflectiveStrategy;
pub use registry::StrategyRegistry;
pub use type_handle::TypeHandleStrategy;

use fsv_reflect::Reflect;
use fsv_reflect::info::TypeInfo;

use crate::engine::{DeserializeDriver, SerializeDriver};
use crate::error::Result;

// -----------------------------------------------------------------------------
// SerializerStrategy

/// Encodes and decodes the values of the types it [`handles`].
///
/// Strategies are stateless: everything a call needs comes from the driver,
/// which gives access to the stream, the caller's context and the engine
/// for nested values. A strategy must read exactly what it wrote.
///
/// # Examples
///
/// A host type written as a single `u64`:
///
/// ```
/// use fsv_binary::codec::{read_primitive, write_primitive};
/// use fsv_binary::strategy::SerializerStrategy;
/// use fsv_binary::{DeserializeDriver, Engine, Error, Result, SerializeDriver};
/// use fsv_reflect::Reflect;
/// use fsv_reflect::derive::Reflect;
/// use fsv_reflect::info::TypeInfo;
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// #[reflect(opaque, default)]
/// struct MeshId(u64);
///
/// struct MeshIdStrategy;
///
/// impl SerializerStrategy for MeshIdStrategy {
///     fn handles(&self, info: &'static TypeInfo) -> bool {
///         info.is::<MeshId>()
///     }
///
///     fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
///         let id = value.downcast_ref::<MeshId>().map_or(0, |mesh| mesh.0);
///         write_primitive(driver.writer(), &id)
///     }
///
///     fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
///         let mut id = 0_u64;
///         read_primitive(driver.reader(), &mut id)?;
///         if let Some(mesh) = target.downcast_mut::<MeshId>() {
///             mesh.0 = id;
///         }
///         Ok(())
///     }
/// }
///
/// let mut engine = Engine::default();
/// engine.register_strategy(MeshIdStrategy);
///
/// let bytes = engine.to_bytes(&MeshId(42)).unwrap();
/// assert_eq!(bytes, 42_u64.to_le_bytes());
/// assert_eq!(engine.from_bytes::<MeshId>(&bytes).unwrap(), MeshId(42));
/// ```
///
/// [`handles`]: SerializerStrategy::handles
pub trait SerializerStrategy: Send + Sync + 'static {
    /// A name for logs.
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns `true` if the strategy encodes values of the type `info`.
    ///
    /// The answer must only depend on `info`, the registry caches it.
    fn handles(&self, info: &'static TypeInfo) -> bool;

    /// Writes `value`, a value of a handled type.
    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()>;

    /// Reads a value of a handled type into `target`, in place.
    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()>;
}
