use fsv_reflect::Reflect;
use fsv_reflect::info::{StructInfo, TypeInfo};
use fsv_reflect::ops::{ReflectMut, ReflectRef};

use super::SerializerStrategy;
use crate::codec::{read_len, read_string, write_len, write_str};
use crate::engine::{DeserializeDriver, SerializeDriver};
use crate::error::{Error, Result};

/// A handled type whose value is of another kind, a broken `handles`.
#[cold]
pub(crate) fn kind_mismatch(expected: &'static str, found: &dyn Reflect) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.reflect_type_path(),
    }
}

fn struct_info(value: &dyn Reflect) -> Result<&'static StructInfo> {
    match value.reflect_type_info() {
        TypeInfo::Struct(info) => Ok(info),
        _ => Err(kind_mismatch("a struct", value)),
    }
}

/// Structs, member by member.
///
/// The members are the fields selected by the engine's
/// [`MemberPolicy`](crate::member::MemberPolicy). The payload is
/// `<i32 member count>` and, per member, `<string name><value>`.
///
/// Members are matched by name when reading: members missing from the
/// stream keep their current value, so data written before a field was
/// added stays readable. A name the type does not know is an error, its
/// payload cannot be skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectiveStrategy;

impl SerializerStrategy for ReflectiveStrategy {
    #[inline]
    fn handles(&self, info: &'static TypeInfo) -> bool {
        matches!(info, TypeInfo::Struct(_))
    }

    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
        let members = driver.members(struct_info(value)?);
        let ReflectRef::Struct(target) = value.reflect_ref() else {
            return Err(kind_mismatch("a struct", value));
        };

        write_len(driver.writer(), members.len())?;
        for member in members.iter() {
            write_str(driver.writer(), member.name())?;
            driver.serialize_value(member.get(target)?)?;
        }
        Ok(())
    }

    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
        let info = struct_info(target)?;
        let members = driver.members(info);
        let ReflectMut::Struct(target) = target.reflect_mut() else {
            return Err(kind_mismatch("a struct", target));
        };

        let len = read_len(driver.reader())?;
        for _ in 0..len {
            let name = read_string(driver.reader())?;
            let Some(member) = members.iter().find(|member| member.name() == name) else {
                return Err(Error::UnknownMember {
                    type_path: info.type_path(),
                    member: name,
                });
            };
            driver.deserialize_value(member.get_mut(target)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fsv_reflect::derive::Reflect;

    use crate::codec::{write_len, write_primitive, write_str};
    use crate::engine::Engine;
    use crate::error::Error;

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Stats {
        pub hp: i32,
        pub speed: f32,
        cache: u8,
    }

    #[test]
    fn payload_is_named_members() {
        let mut engine = Engine::default();
        let stats = Stats {
            hp: 4,
            speed: 1.5,
            cache: 9,
        };
        let bytes = engine.to_bytes(&stats).unwrap();

        let mut expected = Vec::new();
        write_len(&mut expected, 2).unwrap();
        write_str(&mut expected, "hp").unwrap();
        write_primitive(&mut expected, &4_i32).unwrap();
        write_str(&mut expected, "speed").unwrap();
        write_primitive(&mut expected, &1.5_f32).unwrap();
        assert_eq!(bytes, expected);

        let back: Stats = engine.from_bytes(&bytes).unwrap();
        assert_eq!(back.hp, 4);
        assert_eq!(back.cache, 0);
    }

    #[test]
    fn members_match_by_name() {
        let mut bytes = Vec::new();
        write_len(&mut bytes, 1).unwrap();
        write_str(&mut bytes, "speed").unwrap();
        write_primitive(&mut bytes, &3.0_f32).unwrap();

        let mut engine = Engine::default();
        let mut stats = Stats {
            hp: 7,
            speed: 0.0,
            cache: 1,
        };
        engine.from_bytes_into(&bytes, &mut stats).unwrap();
        assert_eq!(
            stats,
            Stats {
                hp: 7,
                speed: 3.0,
                cache: 1
            }
        );
    }

    #[test]
    fn unknown_member_fails() {
        let mut bytes = Vec::new();
        write_len(&mut bytes, 1).unwrap();
        write_str(&mut bytes, "cache").unwrap();
        write_primitive(&mut bytes, &1_u8).unwrap();

        let mut engine = Engine::default();
        let err = engine.from_bytes::<Stats>(&bytes).unwrap_err();
        let Error::UnknownMember { member, .. } = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(member, "cache");
    }
}
