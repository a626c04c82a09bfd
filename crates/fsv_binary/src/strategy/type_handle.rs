use fsv_reflect::Reflect;
use fsv_reflect::info::{TypeHandle, TypeInfo, TypePath};

use super::SerializerStrategy;
use crate::codec::{read_bool, write_bool};
use crate::engine::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Result};

/// [`TypeHandle`] values: `<u8 is_none>` and the type tag of the named type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeHandleStrategy;

#[cold]
fn mismatch(value: &dyn Reflect) -> Error {
    Error::TypeMismatch {
        expected: TypeHandle::type_path(),
        found: value.reflect_type_path(),
    }
}

impl SerializerStrategy for TypeHandleStrategy {
    #[inline]
    fn handles(&self, info: &'static TypeInfo) -> bool {
        info.is::<TypeHandle>()
    }

    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
        let handle = value.downcast_ref::<TypeHandle>().ok_or_else(|| mismatch(value))?;
        match handle.ty() {
            Some(ty) => {
                write_bool(driver.writer(), false)?;
                driver.write_type_tag(ty)
            }
            None => write_bool(driver.writer(), true),
        }
    }

    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
        let is_none = read_bool(driver.reader())?;
        let handle = if is_none {
            TypeHandle::none()
        } else {
            TypeHandle::from_type(*driver.read_type_tag()?.ty())
        };
        match target.downcast_mut::<TypeHandle>() {
            Some(target) => {
                *target = handle;
                Ok(())
            }
            None => Err(mismatch(target)),
        }
    }
}
