use fsv_reflect::Reflect;
use fsv_reflect::info::TypeInfo;
use fsv_reflect::ops::{ReflectMut, ReflectRef};

use super::SerializerStrategy;
use super::reflective::kind_mismatch;
use crate::codec::{read_len, write_len};
use crate::engine::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Result};

/// Fixed-size arrays: `<i32 count>` and the elements in order.
///
/// The count must match the array length when reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayStrategy;

impl SerializerStrategy for ArrayStrategy {
    #[inline]
    fn handles(&self, info: &'static TypeInfo) -> bool {
        matches!(info, TypeInfo::Array(_))
    }

    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
        let ReflectRef::Array(array) = value.reflect_ref() else {
            return Err(kind_mismatch("an array", value));
        };
        write_len(driver.writer(), array.len())?;
        for item in array.iter() {
            driver.serialize_value(item)?;
        }
        Ok(())
    }

    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
        let type_path = target.reflect_type_path();
        let ReflectMut::Array(array) = target.reflect_mut() else {
            return Err(kind_mismatch("an array", target));
        };
        let len = read_len(driver.reader())?;
        let expected = array.len();
        let mismatch = |found| Error::LengthMismatch {
            type_path,
            expected,
            found,
        };
        if len != expected {
            return Err(mismatch(len));
        }
        for index in 0..len {
            let item = array.get_mut(index).ok_or_else(|| mismatch(index))?;
            driver.deserialize_value(item)?;
        }
        Ok(())
    }
}
