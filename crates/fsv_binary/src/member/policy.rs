use core::any::TypeId;

use fsv_reflect::info::{NamedField, StructInfo, TypeHandle, TypeInfo};
use fsv_utils::hash::HashSet;

use crate::codec::is_primitive;

// -----------------------------------------------------------------------------
// MemberPolicy

/// Decides which fields of a struct are serialized.
///
/// The policy is given to the engine at construction and asked once per
/// struct type, the answer is cached. Closures are policies too.
///
/// # Examples
///
/// ```
/// use fsv_binary::Engine;
/// use fsv_reflect::info::{NamedField, StructInfo};
///
/// // every field except the ones whose name starts with `_`
/// let engine = Engine::builder()
///     .member_policy(|_: &StructInfo, field: &NamedField| !field.name().starts_with('_'))
///     .build();
/// # drop(engine);
/// ```
pub trait MemberPolicy: Send + Sync + 'static {
    fn is_serializable_member(&self, owner: &StructInfo, field: &NamedField) -> bool;
}

impl<F> MemberPolicy for F
where
    F: Fn(&StructInfo, &NamedField) -> bool + Send + Sync + 'static,
{
    #[inline]
    fn is_serializable_member(&self, owner: &StructInfo, field: &NamedField) -> bool {
        self(owner, field)
    }
}

/// Serializes every reflected field, ignoring visibility and markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllFields;

impl MemberPolicy for AllFields {
    #[inline]
    fn is_serializable_member(&self, _owner: &StructInfo, _field: &NamedField) -> bool {
        true
    }
}

// -----------------------------------------------------------------------------
// DefaultMemberPolicy

/// The marker-driven policy.
///
/// A field is serialized when:
///
/// - it is not marked `#[reflect(exclude)]`,
/// - it is `pub` or marked `#[reflect(include)]`,
/// - its declared type is serializable, see
///   [`is_serializable_type`](Self::is_serializable_type).
#[derive(Debug, Clone, Default)]
pub struct DefaultMemberPolicy {
    known_value_types: HashSet<TypeId>,
}

impl DefaultMemberPolicy {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the opaque type `type_id` as serializable.
    ///
    /// Used for host types written by an external strategy.
    #[inline]
    pub fn add_known_value_type(&mut self, type_id: TypeId) {
        self.known_value_types.insert(type_id);
    }

    #[inline]
    pub fn is_known_value_type(&self, type_id: TypeId) -> bool {
        self.known_value_types.contains(&type_id)
    }

    /// Returns `true` if values declared as `info` can be serialized.
    ///
    /// Structs and enums always are. Containers are when their items are,
    /// shared handles when their pointee is or is polymorphic. Opaque types
    /// are serializable if primitive, a [`TypeHandle`] or a known value
    /// type.
    pub fn is_serializable_type(&self, info: &TypeInfo) -> bool {
        match info {
            TypeInfo::Struct(_) | TypeInfo::Enum(_) => true,
            TypeInfo::List(info) => self.is_serializable_type(info.item_info()),
            TypeInfo::Array(info) => self.is_serializable_type(info.item_info()),
            TypeInfo::Map(info) => {
                self.is_serializable_type(info.key_info())
                    && self.is_serializable_type(info.value_info())
            }
            TypeInfo::Optional(info) => self.is_serializable_type(info.inner_info()),
            TypeInfo::Shared(info) => info
                .pointee_info()
                .is_none_or(|pointee| self.is_serializable_type(pointee)),
            TypeInfo::Opaque(info) => {
                let id = info.ty_id();
                is_primitive(id) || id == TypeId::of::<TypeHandle>() || self.is_known_value_type(id)
            }
        }
    }
}

impl MemberPolicy for DefaultMemberPolicy {
    fn is_serializable_member(&self, _owner: &StructInfo, field: &NamedField) -> bool {
        !field.is_excluded()
            && (field.is_public() || field.is_included())
            && self.is_serializable_type(field.type_info())
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use fsv_reflect::derive::Reflect;
    use fsv_reflect::info::{NamedField, StructInfo, Typed};
    use fsv_reflect::ops::Shared;

    use super::{AllFields, DefaultMemberPolicy, MemberPolicy};

    #[derive(Reflect, Default)]
    #[reflect(opaque, default)]
    struct Texture;

    #[derive(Reflect, Default)]
    struct Sample {
        pub hp: i32,
        #[reflect(exclude)]
        pub cached: i32,
        #[reflect(include)]
        secret: String,
        private: u8,
        pub texture: Texture,
        pub textures: Vec<Option<Texture>>,
        pub next: Option<Shared<Sample>>,
    }

    fn selected(policy: &dyn MemberPolicy) -> Vec<&'static str> {
        let info = Sample::type_info().as_struct().unwrap();
        info.iter()
            .filter(|field| policy.is_serializable_member(info, field))
            .map(NamedField::name)
            .collect()
    }

    #[test]
    fn markers_and_visibility() {
        let policy = DefaultMemberPolicy::new();
        assert_eq!(selected(&policy), ["hp", "secret", "next"]);
    }

    #[test]
    fn known_value_types_enable_opaque_members() {
        let mut policy = DefaultMemberPolicy::new();
        policy.add_known_value_type(TypeId::of::<Texture>());
        assert_eq!(selected(&policy), ["hp", "secret", "texture", "textures", "next"]);
    }

    #[test]
    fn other_policies() {
        assert_eq!(selected(&AllFields).len(), 7);

        let only_pub = |_: &StructInfo, field: &NamedField| field.is_public();
        assert_eq!(
            selected(&only_pub),
            ["hp", "cached", "texture", "textures", "next"]
        );
    }
}
