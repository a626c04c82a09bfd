use fsv_reflect::Reflect;
use fsv_reflect::info::TypeInfo;
use fsv_reflect::ops::{ReflectMut, ReflectRef};

use super::SerializerStrategy;
use super::reflective::kind_mismatch;
use crate::codec::{read_i32, write_i32};
use crate::engine::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Result};

/// Enums: `<i32 tag>` and the fields of the variant in order.
///
/// The tag of a C-like enum is the discriminant of the variant, so that
/// reordering or inserting variants keeps old data readable. Enums with
/// data use the declaration-order index.
///
/// Like C enums, field-less enums accept any tag: a tag without a variant
/// leaves the value unchanged. Enums with data reject it, the length of
/// the unknown payload is not known.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumStrategy;

impl SerializerStrategy for EnumStrategy {
    #[inline]
    fn handles(&self, info: &'static TypeInfo) -> bool {
        matches!(info, TypeInfo::Enum(_))
    }

    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
        let TypeInfo::Enum(info) = value.reflect_type_info() else {
            return Err(kind_mismatch("an enum", value));
        };
        let ReflectRef::Enum(value) = value.reflect_ref() else {
            return Err(kind_mismatch("an enum", value));
        };
        let tag = info
            .discriminant_at(value.variant_index())
            .and_then(|tag| i32::try_from(tag).ok())
            .ok_or_else(|| {
                Error::invalid_data(format!(
                    "`{}::{}` has no i32 tag",
                    info.type_path(),
                    value.variant_name(),
                ))
            })?;
        write_i32(driver.writer(), tag)?;
        for field in 0..value.field_len() {
            let field = value.field_at(field).ok_or(Error::MemberAccess {
                type_path: value.reflect_type_path(),
                member: "variant field",
            })?;
            driver.serialize_value(field)?;
        }
        Ok(())
    }

    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
        let TypeInfo::Enum(info) = target.reflect_type_info() else {
            return Err(kind_mismatch("an enum", target));
        };
        let ReflectMut::Enum(target) = target.reflect_mut() else {
            return Err(kind_mismatch("an enum", target));
        };

        let index = read_i32(driver.reader())?;
        let Some(variant) = info.index_of_discriminant(i64::from(index)) else {
            if info.is_fieldless() {
                log::debug!(
                    "kept `{}::{}` for unknown variant tag {index}",
                    info.type_path(),
                    target.variant_name(),
                );
                return Ok(());
            }
            return Err(Error::UnknownVariant {
                type_path: info.type_path(),
                index,
            });
        };

        if target.variant_index() != variant && !target.set_variant_default(variant) {
            return Err(Error::UnknownVariant {
                type_path: info.type_path(),
                index,
            });
        }
        for field in 0..target.field_len() {
            let type_path = target.reflect_type_path();
            let value = target.field_at_mut(field).ok_or(Error::MemberAccess {
                type_path,
                member: "variant field",
            })?;
            driver.deserialize_value(value)?;
        }
        Ok(())
    }
}
