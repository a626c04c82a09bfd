use core::any::Any;
use std::io::Write;
use std::sync::Arc;

use fsv_reflect::Reflect;
use fsv_reflect::info::{StructInfo, Type, TypeInfo};
use fsv_reflect::ops::{ReflectRef, SharedRef};
use fsv_reflect::registry::TypeRegistry;

use super::{DepthGuard, PassEnv};
use crate::codec::{write_bool, write_i32, write_type_tag};
use crate::config::Mode;
use crate::error::{Error, Result};
use crate::member::SerializableMember;
use crate::tracker::WriteMarker;

/// The state of one serialize pass, handed to every strategy.
///
/// Created by the [`Engine`](crate::Engine) entry points and dropped when
/// the pass ends, whatever its outcome; reference ids never leak from one
/// pass into the next.
pub struct SerializeDriver<'a> {
    writer: &'a mut dyn Write,
    env: PassEnv<'a>,
    context: Option<&'a mut dyn Any>,
    marker: WriteMarker,
    depth: DepthGuard,
}

impl<'a> SerializeDriver<'a> {
    pub(crate) fn new(
        writer: &'a mut dyn Write,
        env: PassEnv<'a>,
        context: Option<&'a mut dyn Any>,
    ) -> Self {
        let depth = DepthGuard::new(env.config.max_depth);
        Self {
            writer,
            env,
            context,
            marker: WriteMarker::new(),
            depth,
        }
    }

    /// The output stream.
    #[inline]
    pub fn writer(&mut self) -> &mut dyn Write {
        &mut *self.writer
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

    /// Number of shared objects written so far.
    #[inline]
    pub fn shared_count(&self) -> usize {
        self.marker.len()
    }

    /// Writes the type tag of `ty`, see [`write_type_tag`].
    #[inline]
    pub fn write_type_tag(&mut self, ty: &Type) -> Result<()> {
        write_type_tag(&mut *self.writer, self.env.types, ty)
    }

    /// The serializable members of a struct type.
    #[inline]
    pub fn members(&mut self, info: &'static StructInfo) -> Arc<[SerializableMember]> {
        self.env.members(info)
    }

    /// Writes a nested value.
    ///
    /// Options and shared handles are framed here; every other value is
    /// written by the strategy of its type. Only strategy calls count
    /// towards `max_depth`.
    pub fn serialize_value(&mut self, value: &dyn Reflect) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Optional(optional) => match optional.value() {
                None => write_bool(&mut *self.writer, true),
                Some(inner) => {
                    write_bool(&mut *self.writer, false)?;
                    match inner.reflect_ref() {
                        ReflectRef::Shared(shared) => self.write_shared(shared),
                        _ => self.serialize_value(inner),
                    }
                }
            },
            ReflectRef::Shared(shared) => {
                write_bool(&mut *self.writer, false)?;
                self.write_shared(shared)
            }
            _ => {
                let strategy = self.env.strategies.resolve(value.reflect_type_info())?;
                self.depth.enter()?;
                let result = strategy.serialize(value, self);
                self.depth.exit();
                result
            }
        }
    }

    // Everything after the null flag.
    fn write_shared(&mut self, shared: &dyn SharedRef) -> Result<()> {
        let TypeInfo::Shared(info) = shared.reflect_type_info() else {
            return Err(Error::TypeMismatch {
                expected: "a shared handle",
                found: shared.reflect_type_path(),
            });
        };

        if self.mode() == Mode::Minimal {
            if info.is_polymorphic() {
                return Err(Error::NoStrategyFound {
                    type_path: info.pointee().path(),
                });
            }
            let value = borrow_value(shared)?;
            return self.serialize_value(&*value);
        }

        let (id, seen) = self.marker.get_or_assign(shared.addr())?;
        write_i32(&mut *self.writer, id as i32)?;
        write_bool(&mut *self.writer, seen)?;
        if seen {
            return Ok(());
        }

        let value = borrow_value(shared)?;
        let has_tag = value.ty_id() != info.pointee_id();
        write_bool(&mut *self.writer, has_tag)?;
        if has_tag {
            self.write_type_tag(value.reflect_type_info().ty())?;
        }
        self.serialize_value(&*value)
    }
}

fn borrow_value(shared: &dyn SharedRef) -> Result<core::cell::Ref<'_, dyn Reflect>> {
    shared
        .try_borrow_value()
        .map_err(|_| Error::SharedBorrow {
            type_path: shared.reflect_type_path(),
        })
}
