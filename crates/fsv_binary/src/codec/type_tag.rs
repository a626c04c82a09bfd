use std::io::{Read, Write};

use fsv_reflect::info::Type;
use fsv_reflect::registry::{TypeMeta, TypeRegistry};

use super::{read_string, write_str};
use crate::error::{Error, Result};

/// Writes the tag of `ty`: its type path as a string.
///
/// # Errors
///
/// [`Error::TypeResolution`] if `ty` is not registered, or if its path
/// resolves to another type, a reader could not map the tag back.
pub fn write_type_tag<W: Write + ?Sized>(
    writer: &mut W,
    registry: &TypeRegistry,
    ty: &Type,
) -> Result<()> {
    match registry.get_with_type_path(ty.path()) {
        Some(meta) if meta.ty_id() == ty.id() => write_str(writer, ty.path()),
        Some(_) => Err(Error::TypeResolution {
            type_path: ty.path().to_owned(),
            reason: "the type path belongs to another registered type",
        }),
        None => Err(Error::TypeResolution {
            type_path: ty.path().to_owned(),
            reason: "the type is not registered",
        }),
    }
}

/// Reads a type tag and resolves it through `registry`.
///
/// # Errors
///
/// [`Error::TypeResolution`] if no registered type has the path.
pub fn read_type_tag<'a, R: Read + ?Sized>(
    reader: &mut R,
    registry: &'a TypeRegistry,
) -> Result<&'a TypeMeta> {
    let type_path = read_string(reader)?;
    match registry.get_with_type_path(&type_path) {
        Some(meta) => Ok(meta),
        None => Err(Error::TypeResolution {
            type_path,
            reason: "no registered type has this path",
        }),
    }
}

#[cfg(test)]
mod tests {
    use fsv_reflect::info::{Type, TypePath};
    use fsv_reflect::registry::TypeRegistry;

    use super::{read_type_tag, write_type_tag};
    use crate::codec::write_str;
    use crate::error::Error;

    #[test]
    fn tag_is_the_type_path() {
        let registry = TypeRegistry::new();
        let mut bytes = Vec::new();
        write_type_tag(&mut bytes, &registry, &Type::of::<String>()).unwrap();
        assert_eq!(&bytes[4..], String::type_path().as_bytes());

        let meta = read_type_tag(&mut bytes.as_slice(), &registry).unwrap();
        assert!(meta.is::<String>());
    }

    #[test]
    fn unregistered_types_fail_both_ways() {
        let registry = TypeRegistry::new();
        let err = write_type_tag(&mut Vec::new(), &registry, &Type::of::<Vec<u8>>()).unwrap_err();
        assert!(matches!(err, Error::TypeResolution { .. }));

        let mut bytes = Vec::new();
        write_str(&mut bytes, "game::Missing").unwrap();
        let err = read_type_tag(&mut bytes.as_slice(), &registry).unwrap_err();
        let Error::TypeResolution { type_path, .. } = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(type_path, "game::Missing");
    }
}
