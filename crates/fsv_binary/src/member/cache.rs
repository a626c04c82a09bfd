use std::sync::Arc;

use fsv_reflect::Reflect;
use fsv_reflect::info::{NamedField, StructInfo};
use fsv_reflect::ops::Struct;
use fsv_utils::TypeIdMap;

use super::MemberPolicy;
use crate::error::{Error, Result};

// -----------------------------------------------------------------------------
// SerializableMember

/// A field selected by the [`MemberPolicy`] of the engine.
///
/// Members describe a type, not an instance: the target is passed to
/// [`get`](Self::get) / [`get_mut`](Self::get_mut) and is only borrowed for
/// the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct SerializableMember {
    index: usize,
    owner: &'static str,
    field: &'static NamedField,
}

impl SerializableMember {
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.field.name()
    }

    /// Index of the field in the owner's [`StructInfo`].
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn field(&self) -> &'static NamedField {
        self.field
    }

    /// Reads the member of `target`.
    ///
    /// # Errors
    ///
    /// [`Error::MemberAccess`] if `target` has no such field, or a field of
    /// another type.
    pub fn get<'a>(&self, target: &'a dyn Struct) -> Result<&'a dyn Reflect> {
        match target.field_at(self.index) {
            Some(value) if value.ty_id() == self.field.ty_id() => Ok(value),
            _ => Err(self.access_error()),
        }
    }

    /// Same as [`get`](Self::get), mutably.
    pub fn get_mut<'a>(&self, target: &'a mut dyn Struct) -> Result<&'a mut dyn Reflect> {
        match target.field_at_mut(self.index) {
            Some(value) if value.ty_id() == self.field.ty_id() => Ok(value),
            _ => Err(self.access_error()),
        }
    }

    #[cold]
    fn access_error(&self) -> Error {
        Error::MemberAccess {
            type_path: self.owner,
            member: self.field.name(),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberCache

/// The serializable members of each struct type, computed once.
#[derive(Default)]
pub struct MemberCache {
    members: TypeIdMap<Arc<[SerializableMember]>>,
}

impl MemberCache {
    #[inline]
    pub const fn new() -> Self {
        Self {
            members: TypeIdMap::new(),
        }
    }

    /// Returns the members of `info` selected by `policy`, in declaration
    /// order.
    ///
    /// The policy is only asked on the first call for a type.
    pub fn members(
        &mut self,
        info: &'static StructInfo,
        policy: &dyn MemberPolicy,
    ) -> Arc<[SerializableMember]> {
        let members = self.members.get_or_insert(info.ty_id(), || {
            info.iter()
                .enumerate()
                .filter(|(_, field)| policy.is_serializable_member(info, field))
                .map(|(index, field)| SerializableMember {
                    index,
                    owner: info.type_path(),
                    field,
                })
                .collect()
        });
        Arc::clone(members)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use fsv_reflect::derive::Reflect;
    use fsv_reflect::info::{NamedField, StructInfo, Typed};
    use fsv_reflect::ops::Struct;

    use super::MemberCache;
    use crate::error::Error;
    use crate::member::DefaultMemberPolicy;

    #[derive(Reflect, Default)]
    struct Stats {
        pub hp: i32,
        hidden: u8,
        pub speed: f32,
    }

    #[derive(Reflect, Default)]
    struct Other {
        pub name: String,
    }

    #[test]
    fn members_keep_field_indices() {
        let mut cache = MemberCache::new();
        let info = Stats::type_info().as_struct().unwrap();
        let members = cache.members(info, &DefaultMemberPolicy::new());

        let names: Vec<_> = members.iter().map(|member| member.name()).collect();
        assert_eq!(names, ["hp", "speed"]);
        assert_eq!(members[1].index(), 2);

        let mut stats = Stats {
            hp: 3,
            hidden: 1,
            speed: 0.5,
        };
        assert_eq!(
            members[0].get(&stats).unwrap().downcast_ref::<i32>(),
            Some(&3)
        );
        *members[1]
            .get_mut(&mut stats)
            .unwrap()
            .downcast_mut::<f32>()
            .unwrap() = 2.0;
        assert_eq!(stats.speed, 2.0);
        assert_eq!(stats.hidden, 1);
    }

    #[test]
    fn policy_runs_once_per_type() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let policy = |_: &StructInfo, _: &NamedField| {
            CALLS.fetch_add(1, Ordering::Relaxed);
            true
        };

        let mut cache = MemberCache::new();
        let info = Stats::type_info().as_struct().unwrap();
        let first = cache.members(info, &policy);
        let second = cache.members(info, &policy);
        assert_eq!(CALLS.load(Ordering::Relaxed), 3);
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.clear();
        cache.members(info, &policy);
        assert_eq!(CALLS.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn wrong_target_is_an_access_error() {
        let mut cache = MemberCache::new();
        let info = Stats::type_info().as_struct().unwrap();
        let members = cache.members(info, &DefaultMemberPolicy::new());

        let other = Other::default();
        let target: &dyn Struct = &other;
        assert!(matches!(
            members[0].get(target),
            Err(Error::MemberAccess { member: "hp", .. })
        ));
        assert!(matches!(
            members[1].get(target),
            Err(Error::MemberAccess { member: "speed", .. })
        ));
    }
}
