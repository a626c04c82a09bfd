//! Per-pass reference tables.

use fsv_reflect::ops::ErasedShared;
use fsv_utils::hash::HashMap;

use crate::error::{Error, Result};

// -----------------------------------------------------------------------------
// WriteMarker

/// Assigns ids to shared objects met during one serialize pass.
///
/// Identity is the object address, two equal but distinct objects get
/// distinct ids. Ids are dense, starting at `0`.
#[derive(Debug, Default)]
pub struct WriteMarker {
    ids: HashMap<usize, u32>,
}

impl WriteMarker {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the object at `addr` and whether it was already seen.
    pub fn get_or_assign(&mut self, addr: usize) -> Result<(u32, bool)> {
        if let Some(&id) = self.ids.get(&addr) {
            return Ok((id, true));
        }
        let id = u32::try_from(self.ids.len())
            .ok()
            .filter(|id| i32::try_from(*id).is_ok())
            .ok_or_else(|| Error::invalid_data("too many shared objects in one pass"))?;
        self.ids.insert(addr, id);
        Ok((id, false))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

// -----------------------------------------------------------------------------
// ReadMarker

/// Remembers the shared objects created during one deserialize pass.
///
/// Objects must be remembered in id order, mirroring the writer: an
/// object is remembered before its contents are read, so that the
/// contents can refer back to it.
#[derive(Debug, Default)]
pub struct ReadMarker {
    objects: Vec<ErasedShared>,
}

impl ReadMarker {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next new object must carry.
    #[inline]
    pub fn next_id(&self) -> u32 {
        self.objects.len() as u32
    }

    /// Remembers `object` under `id`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] unless `id` is [`next_id`](Self::next_id).
    pub fn remember(&mut self, id: u32, object: ErasedShared) -> Result<()> {
        let expected = self.next_id();
        if id != expected {
            return Err(Error::invalid_data(format!(
                "new reference id {id}, expected {expected}"
            )));
        }
        self.objects.push(object);
        Ok(())
    }

    /// Returns the object remembered under `id`.
    ///
    /// # Errors
    ///
    /// [`Error::DanglingReference`] if `id` was never remembered.
    pub fn resolve(&self, id: u32) -> Result<&ErasedShared> {
        self.objects
            .get(id as usize)
            .ok_or(Error::DanglingReference { id })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use fsv_reflect::ops::{ErasedShared, Shared};

    use super::{ReadMarker, WriteMarker};
    use crate::error::Error;

    #[test]
    fn ids_follow_identity() {
        let a = Shared::new(1_i32);
        let b = Shared::new(1_i32);
        let mut marker = WriteMarker::new();

        assert_eq!(marker.get_or_assign(a.addr()).unwrap(), (0, false));
        assert_eq!(marker.get_or_assign(b.addr()).unwrap(), (1, false));
        assert_eq!(marker.get_or_assign(a.clone().addr()).unwrap(), (0, true));
        assert_eq!(marker.len(), 2);

        marker.clear();
        assert!(marker.is_empty());
        assert_eq!(marker.get_or_assign(b.addr()).unwrap(), (0, false));
    }

    #[test]
    fn remember_requires_dense_ids() {
        let mut marker = ReadMarker::new();
        marker.remember(0, ErasedShared::new(1_u8)).unwrap();
        let err = marker.remember(2, ErasedShared::new(2_u8)).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert_eq!(marker.next_id(), 1);
    }

    #[test]
    fn resolve_unknown_id_is_dangling() {
        let mut marker = ReadMarker::new();
        let object = ErasedShared::new(String::from("a"));
        marker.remember(0, object.clone()).unwrap();

        assert_eq!(marker.resolve(0).unwrap().addr(), object.addr());
        assert!(matches!(
            marker.resolve(3),
            Err(Error::DanglingReference { id: 3 })
        ));

        marker.clear();
        assert!(matches!(
            marker.resolve(0),
            Err(Error::DanglingReference { id: 0 })
        ));
    }
}
