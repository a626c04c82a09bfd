use core::any::TypeId;
use std::io::{Read, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use fsv_reflect::Reflect;

use crate::error::{Error, Result};

const NANOS_PER_SEC: u32 = 1_000_000_000;

// -----------------------------------------------------------------------------
// Framing helpers

/// Writes a `bool` as one byte, `0` or `1`.
#[inline]
pub fn write_bool<W: Write + ?Sized>(writer: &mut W, value: bool) -> Result<()> {
    writer.write_u8(value as u8)?;
    Ok(())
}

/// Reads a one byte `bool`, any byte other than `0` or `1` is invalid.
pub fn read_bool<R: Read + ?Sized>(reader: &mut R) -> Result<bool> {
    match reader.read_u8()? {
        0 => Ok(false),
        1 => Ok(true),
        byte => Err(Error::invalid_data(format!("{byte:#04x} is not a bool"))),
    }
}

#[inline]
pub fn write_i32<W: Write + ?Sized>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_i32::<LittleEndian>(value)?;
    Ok(())
}

#[inline]
pub fn read_i32<R: Read + ?Sized>(reader: &mut R) -> Result<i32> {
    Ok(reader.read_i32::<LittleEndian>()?)
}

/// Writes an element count or byte length as `i32`.
pub fn write_len<W: Write + ?Sized>(writer: &mut W, len: usize) -> Result<()> {
    let len = i32::try_from(len)
        .map_err(|_| Error::invalid_data(format!("length {len} does not fit in i32")))?;
    write_i32(writer, len)
}

/// Reads an `i32` element count or byte length, negative values are invalid.
pub fn read_len<R: Read + ?Sized>(reader: &mut R) -> Result<usize> {
    let len = read_i32(reader)?;
    usize::try_from(len).map_err(|_| Error::invalid_data(format!("negative length {len}")))
}

/// Writes `<i32 byte length><UTF-8 bytes>`.
pub fn write_str<W: Write + ?Sized>(writer: &mut W, value: &str) -> Result<()> {
    write_len(writer, value.len())?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

pub fn read_string<R: Read + ?Sized>(reader: &mut R) -> Result<String> {
    let len = read_len(reader)?;
    // Sized by the bytes actually read, not by the claimed length.
    let mut bytes = Vec::new();
    Read::take(&mut *reader, len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(Error::Io(std::io::ErrorKind::UnexpectedEof.into()));
    }
    String::from_utf8(bytes).map_err(|err| Error::invalid_data(err.to_string()))
}

// -----------------------------------------------------------------------------
// Time

fn write_duration<W: Write + ?Sized>(writer: &mut W, value: Duration) -> Result<()> {
    writer.write_u64::<LittleEndian>(value.as_secs())?;
    writer.write_u32::<LittleEndian>(value.subsec_nanos())?;
    Ok(())
}

fn read_nanos<R: Read + ?Sized>(reader: &mut R) -> Result<u32> {
    let nanos = reader.read_u32::<LittleEndian>()?;
    if nanos >= NANOS_PER_SEC {
        return Err(Error::invalid_data(format!("{nanos} nanoseconds out of range")));
    }
    Ok(nanos)
}

fn read_duration<R: Read + ?Sized>(reader: &mut R) -> Result<Duration> {
    let secs = reader.read_u64::<LittleEndian>()?;
    let nanos = read_nanos(reader)?;
    Ok(Duration::new(secs, nanos))
}

// `<i64 secs><u32 nanos>` since the epoch, `nanos` always counts forward.
fn write_system_time<W: Write + ?Sized>(writer: &mut W, value: SystemTime) -> Result<()> {
    let out_of_range = || Error::invalid_data("system time out of range");
    let (secs, nanos) = match value.duration_since(UNIX_EPOCH) {
        Ok(after) => (
            i64::try_from(after.as_secs()).map_err(|_| out_of_range())?,
            after.subsec_nanos(),
        ),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).map_err(|_| out_of_range())?;
            match before.subsec_nanos() {
                0 => (-secs, 0),
                nanos => (-secs - 1, NANOS_PER_SEC - nanos),
            }
        }
    };
    writer.write_i64::<LittleEndian>(secs)?;
    writer.write_u32::<LittleEndian>(nanos)?;
    Ok(())
}

fn read_system_time<R: Read + ?Sized>(reader: &mut R) -> Result<SystemTime> {
    let secs = reader.read_i64::<LittleEndian>()?;
    let nanos = read_nanos(reader)?;
    let base = if secs >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(secs as u64))
    } else {
        UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))
    };
    base.and_then(|time| time.checked_add(Duration::from_nanos(nanos as u64)))
        .ok_or_else(|| Error::invalid_data("system time out of range"))
}

// -----------------------------------------------------------------------------
// Primitive

/// Returns `true` if `type_id` is in the fixed primitive set.
///
/// The set is `bool`, `u8`..`u64`, `i8`..`i64`, `f32`, `f64`, `char`,
/// `()`, `Duration`, `SystemTime` and `String`.
pub fn is_primitive(type_id: TypeId) -> bool {
    [
        TypeId::of::<bool>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<f32>(),
        TypeId::of::<f64>(),
        TypeId::of::<char>(),
        TypeId::of::<()>(),
        TypeId::of::<Duration>(),
        TypeId::of::<SystemTime>(),
        TypeId::of::<String>(),
    ]
    .contains(&type_id)
}

macro_rules! write_numbers {
    ($writer:ident, $value:ident; $($ty:ty => $method:ident),* $(,)?) => {
        $(
            if let Some(value) = $value.downcast_ref::<$ty>() {
                $writer.$method::<LittleEndian>(*value)?;
                return Ok(());
            }
        )*
    };
}

macro_rules! read_numbers {
    ($reader:ident, $target:ident; $($ty:ty => $method:ident),* $(,)?) => {
        $(
            if let Some(target) = $target.downcast_mut::<$ty>() {
                *target = $reader.$method::<LittleEndian>()?;
                return Ok(());
            }
        )*
    };
}

/// Writes a value of the primitive set in its fixed-width form.
///
/// # Errors
///
/// [`Error::UnsupportedPrimitiveType`] for any type outside the set, see
/// [`is_primitive`].
///
/// # Examples
///
/// ```
/// use fsv_binary::codec::write_primitive;
///
/// let mut bytes = Vec::new();
/// write_primitive(&mut bytes, &7_i32).unwrap();
/// write_primitive(&mut bytes, &String::from("hi")).unwrap();
/// assert_eq!(bytes, [7, 0, 0, 0, 2, 0, 0, 0, b'h', b'i']);
/// ```
pub fn write_primitive<W: Write + ?Sized>(writer: &mut W, value: &dyn Reflect) -> Result<()> {
    write_numbers! { writer, value;
        u16 => write_u16,
        u32 => write_u32,
        u64 => write_u64,
        i16 => write_i16,
        i32 => write_i32,
        i64 => write_i64,
        f32 => write_f32,
        f64 => write_f64,
    }

    if let Some(value) = value.downcast_ref::<bool>() {
        write_bool(writer, *value)
    } else if let Some(value) = value.downcast_ref::<u8>() {
        writer.write_u8(*value)?;
        Ok(())
    } else if let Some(value) = value.downcast_ref::<i8>() {
        writer.write_i8(*value)?;
        Ok(())
    } else if let Some(value) = value.downcast_ref::<char>() {
        writer.write_u32::<LittleEndian>(*value as u32)?;
        Ok(())
    } else if let Some(value) = value.downcast_ref::<String>() {
        write_str(writer, value)
    } else if let Some(value) = value.downcast_ref::<Duration>() {
        write_duration(writer, *value)
    } else if let Some(value) = value.downcast_ref::<SystemTime>() {
        write_system_time(writer, *value)
    } else if value.is::<()>() {
        Ok(())
    } else {
        Err(Error::UnsupportedPrimitiveType {
            type_path: value.reflect_type_path(),
        })
    }
}

/// Reads a value of the primitive set into `target`.
///
/// # Errors
///
/// [`Error::UnsupportedPrimitiveType`] for any type outside the set,
/// [`Error::InvalidData`] for bytes that are not a value of the type.
pub fn read_primitive<R: Read + ?Sized>(reader: &mut R, target: &mut dyn Reflect) -> Result<()> {
    read_numbers! { reader, target;
        u16 => read_u16,
        u32 => read_u32,
        u64 => read_u64,
        i16 => read_i16,
        i32 => read_i32,
        i64 => read_i64,
        f32 => read_f32,
        f64 => read_f64,
    }

    if let Some(target) = target.downcast_mut::<bool>() {
        *target = read_bool(reader)?;
    } else if let Some(target) = target.downcast_mut::<u8>() {
        *target = reader.read_u8()?;
    } else if let Some(target) = target.downcast_mut::<i8>() {
        *target = reader.read_i8()?;
    } else if let Some(target) = target.downcast_mut::<char>() {
        let scalar = reader.read_u32::<LittleEndian>()?;
        *target = char::from_u32(scalar)
            .ok_or_else(|| Error::invalid_data(format!("{scalar:#x} is not a char")))?;
    } else if let Some(target) = target.downcast_mut::<String>() {
        *target = read_string(reader)?;
    } else if let Some(target) = target.downcast_mut::<Duration>() {
        *target = read_duration(reader)?;
    } else if let Some(target) = target.downcast_mut::<SystemTime>() {
        *target = read_system_time(reader)?;
    } else if !target.is::<()>() {
        return Err(Error::UnsupportedPrimitiveType {
            type_path: target.reflect_type_path(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use fsv_reflect::info::TypeHandle;

    use super::*;

    #[test]
    fn fixed_width_little_endian() {
        let mut bytes = Vec::new();
        write_primitive(&mut bytes, &true).unwrap();
        write_primitive(&mut bytes, &0x0102_u16).unwrap();
        write_primitive(&mut bytes, &-2_i8).unwrap();
        write_primitive(&mut bytes, &'A').unwrap();
        write_primitive(&mut bytes, &()).unwrap();
        assert_eq!(bytes, [1, 0x02, 0x01, 0xFE, 0x41, 0, 0, 0]);

        let mut reader = bytes.as_slice();
        let (mut a, mut b, mut c, mut d) = (false, 0_u16, 0_i8, ' ');
        read_primitive(&mut reader, &mut a).unwrap();
        read_primitive(&mut reader, &mut b).unwrap();
        read_primitive(&mut reader, &mut c).unwrap();
        read_primitive(&mut reader, &mut d).unwrap();
        read_primitive(&mut reader, &mut ()).unwrap();
        assert_eq!((a, b, c, d), (true, 0x0102, -2, 'A'));
        assert!(reader.is_empty());
    }

    #[test]
    fn floats_and_wide_integers() {
        let mut bytes = Vec::new();
        write_primitive(&mut bytes, &1.5_f32).unwrap();
        write_primitive(&mut bytes, &-0.25_f64).unwrap();
        write_primitive(&mut bytes, &u64::MAX).unwrap();
        assert_eq!(bytes.len(), 4 + 8 + 8);

        let mut reader = bytes.as_slice();
        let (mut a, mut b, mut c) = (0_f32, 0_f64, 0_u64);
        read_primitive(&mut reader, &mut a).unwrap();
        read_primitive(&mut reader, &mut b).unwrap();
        read_primitive(&mut reader, &mut c).unwrap();
        assert_eq!((a, b, c), (1.5, -0.25, u64::MAX));
    }

    #[test]
    fn invalid_bool_and_char() {
        let mut value = false;
        let err = read_primitive(&mut [2_u8].as_slice(), &mut value).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        let mut value = ' ';
        let surrogate = 0xD800_u32.to_le_bytes();
        let err = read_primitive(&mut surrogate.as_slice(), &mut value).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn strings() {
        let mut bytes = Vec::new();
        write_str(&mut bytes, "héllo").unwrap();
        assert_eq!(&bytes[..4], &6_i32.to_le_bytes());
        assert_eq!(read_string(&mut bytes.as_slice()).unwrap(), "héllo");

        let negative = (-1_i32).to_le_bytes();
        let err = read_string(&mut negative.as_slice()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        let mut truncated = 10_i32.to_le_bytes().to_vec();
        truncated.extend_from_slice(b"abc");
        let err = read_string(&mut truncated.as_slice()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let mut invalid = 2_i32.to_le_bytes().to_vec();
        invalid.extend_from_slice(&[0xC3, 0x28]);
        let err = read_string(&mut invalid.as_slice()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn time_values() {
        let times = [
            UNIX_EPOCH,
            UNIX_EPOCH + Duration::new(1_700_000_000, 123),
            UNIX_EPOCH - Duration::new(5, 250_000_000),
            UNIX_EPOCH - Duration::from_secs(7),
        ];
        for time in times {
            let mut bytes = Vec::new();
            write_primitive(&mut bytes, &time).unwrap();
            assert_eq!(bytes.len(), 12);
            let mut back = SystemTime::now();
            read_primitive(&mut bytes.as_slice(), &mut back).unwrap();
            assert_eq!(back, time);
        }

        let before = UNIX_EPOCH - Duration::new(5, 250_000_000);
        let mut bytes = Vec::new();
        write_primitive(&mut bytes, &before).unwrap();
        assert_eq!(&bytes[..8], &(-6_i64).to_le_bytes());
        assert_eq!(&bytes[8..], &750_000_000_u32.to_le_bytes());

        let mut bytes = Vec::new();
        write_primitive(&mut bytes, &Duration::new(3, 4)).unwrap();
        let mut back = Duration::ZERO;
        read_primitive(&mut bytes.as_slice(), &mut back).unwrap();
        assert_eq!(back, Duration::new(3, 4));

        let mut bad = 0_u64.to_le_bytes().to_vec();
        bad.extend_from_slice(&NANOS_PER_SEC.to_le_bytes());
        let err = read_primitive(&mut bad.as_slice(), &mut back).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn unsupported_types() {
        assert!(is_primitive(TypeId::of::<String>()));
        assert!(!is_primitive(TypeId::of::<Vec<u8>>()));

        let err = write_primitive(&mut Vec::new(), &vec![1_u8]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedPrimitiveType { type_path: "alloc::vec::Vec<u8>" }
        ));
        let mut handle = TypeHandle::none();
        let err = read_primitive(&mut [0_u8].as_slice(), &mut handle).unwrap_err();
        assert!(matches!(err, Error::UnsupportedPrimitiveType { .. }));
    }

    #[test]
    fn lengths() {
        let mut bytes = Vec::new();
        write_len(&mut bytes, 3).unwrap();
        assert_eq!(read_len(&mut bytes.as_slice()).unwrap(), 3);
        assert!(write_len(&mut bytes, usize::MAX).is_err());
    }
}
