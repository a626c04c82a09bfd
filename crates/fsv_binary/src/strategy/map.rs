use fsv_reflect::Reflect;
use fsv_reflect::info::TypeInfo;
use fsv_reflect::ops::{ReflectMut, ReflectRef};

use super::SerializerStrategy;
use super::reflective::kind_mismatch;
use crate::codec::{read_len, write_len};
use crate::engine::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Result};

/// Key-value containers: `<i32 pair count>`, then key and value of each
/// pair.
///
/// Pairs are written in the iteration order of the map and inserted in
/// stream order. Reading replaces the whole content of the map.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapStrategy;

impl SerializerStrategy for MapStrategy {
    #[inline]
    fn handles(&self, info: &'static TypeInfo) -> bool {
        matches!(info, TypeInfo::Map(_))
    }

    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
        let ReflectRef::Map(map) = value.reflect_ref() else {
            return Err(kind_mismatch("a map", value));
        };
        write_len(driver.writer(), map.len())?;
        for (key, value) in map.iter() {
            driver.serialize_value(key)?;
            driver.serialize_value(value)?;
        }
        Ok(())
    }

    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
        let ReflectMut::Map(map) = target.reflect_mut() else {
            return Err(kind_mismatch("a map", target));
        };
        let len = read_len(driver.reader())?;
        map.clear();
        for _ in 0..len {
            let mut key = map.new_key();
            driver.deserialize_value(&mut *key)?;
            let mut value = map.new_value();
            driver.deserialize_value(&mut *value)?;
            map.insert_boxed(key, value)
                .map_err(|(key, _)| Error::TypeMismatch {
                    expected: map.reflect_type_path(),
                    found: key.reflect_type_path(),
                })?;
        }
        Ok(())
    }
}
