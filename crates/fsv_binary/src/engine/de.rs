use core::any::Any;
use std::io::Read;
use std::sync::Arc;

use fsv_reflect::Reflect;
use fsv_reflect::info::{StructInfo, TypeInfo};
use fsv_reflect::ops::{ErasedShared, ReflectMut, SharedRef};
use fsv_reflect::registry::{TypeMeta, TypeRegistry, TypeTraitDefault};

use super::{DepthGuard, PassEnv};
use crate::codec::{read_bool, read_i32, read_type_tag};
use crate::config::Mode;
use crate::error::{Error, Result};
use crate::member::SerializableMember;
use crate::tracker::ReadMarker;

/// The state of one deserialize pass, handed to every strategy.
///
/// Mirrors [`SerializeDriver`](crate::SerializeDriver): shared objects are
/// created, remembered under their id and only then filled, so that their
/// contents can refer back to them.
pub struct DeserializeDriver<'a> {
    reader: &'a mut dyn Read,
    env: PassEnv<'a>,
    context: Option<&'a mut dyn Any>,
    marker: ReadMarker,
    depth: DepthGuard,
}

impl<'a> DeserializeDriver<'a> {
    pub(crate) fn new(
        reader: &'a mut dyn Read,
        env: PassEnv<'a>,
        context: Option<&'a mut dyn Any>,
    ) -> Self {
        let depth = DepthGuard::new(env.config.max_depth);
        Self {
            reader,
            env,
            context,
            marker: ReadMarker::new(),
            depth,
        }
    }

    /// The input stream.
    #[inline]
    pub fn reader(&mut self) -> &mut dyn Read {
        &mut *self.reader
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.env.config.mode
    }

    #[inline]
    pub fn types(&self) -> &TypeRegistry {
        self.env.types
    }

    /// The caller's context object, if it is a `T`.
    #[inline]
    pub fn context<T: Any>(&mut self) -> Option<&mut T> {
        self.context.as_deref_mut()?.downcast_mut::<T>()
    }

    /// Number of shared objects read so far.
    #[inline]
    pub fn shared_count(&self) -> usize {
        self.marker.len()
    }

    /// Reads a type tag, see [`read_type_tag`].
    #[inline]
    pub fn read_type_tag(&mut self) -> Result<&'a TypeMeta> {
        read_type_tag(&mut *self.reader, self.env.types)
    }

    /// The serializable members of a struct type.
    #[inline]
    pub fn members(&mut self, info: &'static StructInfo) -> Arc<[SerializableMember]> {
        self.env.members(info)
    }

    /// Reads a nested value into `target`.
    ///
    /// Only strategy calls count towards `max_depth`.
    pub fn deserialize_value(&mut self, target: &mut dyn Reflect) -> Result<()> {
        match target.reflect_mut() {
            ReflectMut::Optional(optional) => {
                if read_bool(&mut *self.reader)? {
                    optional.set_none();
                    return Ok(());
                }
                // An existing value is filled in place, like a struct member.
                if optional.value().is_none() {
                    optional.insert_default();
                }
                let Some(inner) = optional.value_mut() else {
                    return Err(Error::UnexpectedNull {
                        type_path: optional.reflect_type_path(),
                    });
                };
                match inner.reflect_mut() {
                    ReflectMut::Shared(shared) => self.read_shared(shared),
                    _ => self.deserialize_value(inner),
                }
            }
            ReflectMut::Shared(shared) => {
                if read_bool(&mut *self.reader)? {
                    return Err(Error::UnexpectedNull {
                        type_path: shared.reflect_type_path(),
                    });
                }
                self.read_shared(shared)
            }
            _ => {
                let strategy = self.env.strategies.resolve(target.reflect_type_info())?;
                self.depth.enter()?;
                let result = strategy.deserialize(target, self);
                self.depth.exit();
                result
            }
        }
    }

    // Everything after the null flag.
    fn read_shared(&mut self, shared: &mut dyn SharedRef) -> Result<()> {
        let TypeInfo::Shared(info) = shared.reflect_type_info() else {
            return Err(Error::TypeMismatch {
                expected: "a shared handle",
                found: shared.reflect_type_path(),
            });
        };

        if self.mode() == Mode::Minimal {
            let object = shared.new_erased().ok_or(Error::NoStrategyFound {
                type_path: info.pointee().path(),
            })?;
            assign(shared, &object)?;
            return self.fill(&object);
        }

        let id = read_i32(&mut *self.reader)?;
        let id = u32::try_from(id)
            .map_err(|_| Error::invalid_data(format!("negative reference id {id}")))?;
        let seen = read_bool(&mut *self.reader)?;
        if seen {
            let object = self.marker.resolve(id)?.clone();
            return assign(shared, &object);
        }

        let has_tag = read_bool(&mut *self.reader)?;
        let object = if has_tag {
            let meta = self.read_type_tag()?;
            let default = meta.get_trait::<TypeTraitDefault>().ok_or_else(|| {
                Error::TypeResolution {
                    type_path: meta.type_path().to_owned(),
                    reason: "the type is registered without `#[reflect(default)]`",
                }
            })?;
            default.default_shared()
        } else {
            shared.new_erased().ok_or_else(|| Error::TypeResolution {
                type_path: info.pointee().path().to_owned(),
                reason: "a polymorphic reference was written without a type tag",
            })?
        };

        assign(shared, &object)?;
        self.marker.remember(id, object.clone())?;
        self.fill(&object)
    }

    fn fill(&mut self, object: &ErasedShared) -> Result<()> {
        let mut value = object
            .value()
            .try_borrow_mut()
            .map_err(|_| Error::SharedBorrow {
                type_path: object.type_path(),
            })?;
        self.deserialize_value(&mut *value)
    }
}

// Re-points `shared` at `object`, which must be of the declared pointee type.
fn assign(shared: &mut dyn SharedRef, object: &ErasedShared) -> Result<()> {
    if shared.assign(object) {
        return Ok(());
    }
    let expected = match shared.reflect_type_info() {
        TypeInfo::Shared(info) => info.pointee().path(),
        _ => shared.reflect_type_path(),
    };
    Err(Error::TypeMismatch {
        expected,
        found: object.type_path(),
    })
}
