use fsv_reflect::Reflect;
use fsv_reflect::info::TypeInfo;
use fsv_reflect::ops::{ReflectMut, ReflectRef};

use super::SerializerStrategy;
use super::reflective::kind_mismatch;
use crate::codec::{read_len, write_len};
use crate::engine::{DeserializeDriver, SerializeDriver};
use crate::error::Result;

/// Growable sequences: `<i32 count>` and the elements in order.
///
/// Reading replaces the whole content of the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListStrategy;

impl SerializerStrategy for ListStrategy {
    #[inline]
    fn handles(&self, info: &'static TypeInfo) -> bool {
        matches!(info, TypeInfo::List(_))
    }

    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
        let ReflectRef::List(list) = value.reflect_ref() else {
            return Err(kind_mismatch("a list", value));
        };
        write_len(driver.writer(), list.len())?;
        for item in list.iter() {
            driver.serialize_value(item)?;
        }
        Ok(())
    }

    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
        let ReflectMut::List(list) = target.reflect_mut() else {
            return Err(kind_mismatch("a list", target));
        };
        let len = read_len(driver.reader())?;
        list.clear();
        for _ in 0..len {
            driver.deserialize_value(list.push_default())?;
        }
        Ok(())
    }
}
