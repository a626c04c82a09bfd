#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `fsv_reflect`, inside the crate itself
// included.
extern crate self as fsv_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use fsv_reflect_derive as derive;
pub use reflection::Reflect;

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use crate::derive::Reflect;
    use crate::info::{FieldVisibility, TypePath, Typed, VariantKind};
    use crate::ops::{Enum, ReflectMut, ReflectRef, Shared, Struct};
    use crate::registry::{TypeRegistry, TypeTraitDefault};

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Player {
        pub name: String,
        pub hp: i32,
        #[reflect(exclude)]
        pub cache: u8,
        #[reflect(include)]
        secret: u16,
        hidden: bool,
        #[reflect(ignore)]
        ignored: f64,
    }

    #[derive(Reflect, Default)]
    #[reflect(type_path = "game::Point")]
    struct Point(f32, f32);

    #[derive(Reflect, Default)]
    struct Wrapper<T> {
        pub inner: T,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    enum Shape {
        #[default]
        Empty,
        Circle(f32),
        Rect {
            w: u32,
            h: u32,
        },
    }

    #[derive(Reflect, Default)]
    #[reflect(opaque, default)]
    struct MeshHandle(#[allow(dead_code)] u64);

    #[derive(Reflect, Default)]
    #[reflect(default)]
    struct Node {
        pub value: i32,
        pub next: Option<Shared<Node>>,
    }

    #[test]
    fn struct_info_records_visibility() {
        let info = Player::type_info().as_struct().unwrap();
        assert_eq!(info.field_names(), ["name", "hp", "cache", "secret", "hidden"]);

        let cache = info.field("cache").unwrap();
        assert!(cache.is_public() && cache.is_excluded());
        let secret = info.field("secret").unwrap();
        assert_eq!(secret.visibility(), FieldVisibility::Restricted);
        assert!(secret.is_included());
        assert!(info.field("ignored").is_none());
    }

    #[test]
    fn struct_access_by_name_and_index() {
        let mut player = Player {
            name: "kim".into(),
            ..Default::default()
        };
        assert_eq!(
            player.field("name").unwrap().downcast_ref::<String>().unwrap(),
            "kim"
        );
        *player.field_at_mut(1).unwrap().downcast_mut::<i32>().unwrap() = 9;
        assert_eq!(player.hp, 9);
        assert_eq!(player.name_at(4), Some("hidden"));
        assert_eq!(Struct::field_len(&player), 5);
    }

    #[test]
    fn type_paths() {
        assert_eq!(
            Player::type_path(),
            concat!(module_path!(), "::Player")
        );
        assert_eq!(Point::type_path(), "game::Point");
        assert_eq!(Point::type_ident(), "Point");
        assert_eq!(Point::module_path(), Some("game"));
        assert_eq!(
            Wrapper::<u8>::type_path(),
            concat!(module_path!(), "::Wrapper<u8>")
        );
        assert_eq!(Wrapper::<String>::type_name(), "Wrapper<String>");

        let point = Point::type_info().as_struct().unwrap();
        assert_eq!(point.field_names(), ["0", "1"]);
    }

    #[test]
    fn enum_reflection() {
        let info = Shape::type_info().as_enum().unwrap();
        assert_eq!(info.variant_len(), 3);
        assert!(!info.is_fieldless());
        assert_eq!(info.variant_at(2).unwrap().kind(), VariantKind::Struct);

        let mut shape = Shape::Rect { w: 2, h: 3 };
        assert_eq!(shape.variant_index(), 2);
        assert_eq!(shape.variant_name(), "Rect");
        assert_eq!(shape.field_at(1).unwrap().downcast_ref::<u32>(), Some(&3));
        assert!(shape.field_at(2).is_none());

        assert!(shape.set_variant_default(1));
        assert_eq!(shape, Shape::Circle(0.0));
        *shape.field_at_mut(0).unwrap().downcast_mut::<f32>().unwrap() = 1.5;
        assert_eq!(shape, Shape::Circle(1.5));
        assert!(!shape.set_variant_default(3));

        let value: &mut dyn crate::Reflect = &mut shape;
        assert!(matches!(value.reflect_mut(), ReflectMut::Enum(_)));
    }

    #[test]
    fn opaque_types_hide_fields() {
        use crate::info::ReflectKind;

        assert_eq!(MeshHandle::type_info().kind(), ReflectKind::Opaque);
        let handle = MeshHandle(3);
        let value: &dyn crate::Reflect = &handle;
        assert!(matches!(value.reflect_ref(), ReflectRef::Opaque(_)));

        let mut registry = TypeRegistry::empty();
        registry.register::<MeshHandle>();
        assert!(
            registry
                .get_type_trait::<TypeTraitDefault>(TypeId::of::<MeshHandle>())
                .is_some()
        );
    }

    #[test]
    fn recursive_types_register() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Node>();
        assert!(registry.contains(TypeId::of::<Node>()));
        assert!(registry.contains(TypeId::of::<Shared<Node>>()));
        assert!(
            registry
                .get_type_trait::<TypeTraitDefault>(TypeId::of::<Node>())
                .is_some()
        );

        let node = Node::default();
        let value: &dyn crate::Reflect = &node;
        let ReflectRef::Struct(node_ref) = value.reflect_ref() else {
            panic!("not a struct");
        };
        assert_eq!(node_ref.field_len(), 2);
    }
}
