use fsv_reflect::Reflect;
use fsv_reflect::info::TypeInfo;

use super::SerializerStrategy;
use crate::codec::{is_primitive, read_primitive, write_primitive};
use crate::engine::{DeserializeDriver, SerializeDriver};
use crate::error::Result;

/// The fixed primitive set, see [`is_primitive`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveStrategy;

impl SerializerStrategy for PrimitiveStrategy {
    #[inline]
    fn handles(&self, info: &'static TypeInfo) -> bool {
        is_primitive(info.ty_id())
    }

    #[inline]
    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
        write_primitive(driver.writer(), value)
    }

    #[inline]
    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
        read_primitive(driver.reader(), target)
    }
}
