use std::collections::HashMap;

use fsv_reflect::Reflect;
use fsv_reflect::derive::Reflect;
use fsv_reflect::info::{TypeHandle, TypeInfo};
use fsv_reflect::ops::Shared;
use fsv_utils::default;

use crate::codec::{read_primitive, read_string, write_bool, write_i32, write_len, write_str};
use crate::strategy::SerializerStrategy;
use crate::{DeserializeDriver, Engine, Error, Mode, Result, SerializeDriver};

// -----------------------------------------------------------------------------
// Types

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Sample {
    pub x: i32,
    pub s: String,
    pub arr: [f32; 2],
}

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Node {
    pub value: i32,
    pub next: Option<Shared<Node>>,
}

#[derive(Reflect, Default)]
struct Scene {
    pub first: Shared<Node>,
    pub second: Shared<Node>,
}

#[derive(Reflect, Default)]
struct Holder {
    pub item: Shared<dyn Reflect>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct SaveV1 {
    pub hp: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct SaveV2 {
    pub hp: i32,
    pub mana: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Inventory {
    pub counts: HashMap<String, i32>,
    pub tags: Vec<String>,
    pub bonus: Option<u16>,
}

#[derive(Reflect, Default, Debug, PartialEq, Clone, Copy)]
enum Color {
    #[default]
    Red,
    Green,
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

#[derive(Reflect, Default, Debug, PartialEq)]
enum Level {
    #[default]
    Low = 10,
    High = 20,
}

// `Level` with a variant inserted and the order changed.
#[derive(Reflect, Default, Debug, PartialEq)]
enum LevelV2 {
    High = 20,
    Mid = 15,
    #[default]
    Low = 10,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Paint {
    pub color: Color,
    pub shape: Shape,
    pub kind: TypeHandle,
}

fn node(value: i32) -> Shared<Node> {
    Shared::new(Node { value, next: None })
}

fn cycle() -> Shared<Node> {
    let a = node(1);
    let b = node(2);
    b.borrow_mut().next = Some(a.clone());
    a.borrow_mut().next = Some(b);
    a
}

// Header of a struct with a single member.
fn single_member(bytes: &mut Vec<u8>, name: &str) {
    write_len(bytes, 1).unwrap();
    write_str(bytes, name).unwrap();
}

// -----------------------------------------------------------------------------
// Values

#[test]
fn struct_wire_format() {
    let sample = Sample {
        x: 7,
        s: "hi".into(),
        arr: [1.0, 2.0],
    };
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&sample).unwrap();

    let mut expected = Vec::new();
    write_len(&mut expected, 3).unwrap();
    write_str(&mut expected, "x").unwrap();
    expected.extend_from_slice(&7_i32.to_le_bytes());
    write_str(&mut expected, "s").unwrap();
    write_str(&mut expected, "hi").unwrap();
    write_str(&mut expected, "arr").unwrap();
    write_len(&mut expected, 2).unwrap();
    expected.extend_from_slice(&1.0_f32.to_le_bytes());
    expected.extend_from_slice(&2.0_f32.to_le_bytes());
    assert_eq!(bytes, expected);

    assert_eq!(engine.from_bytes::<Sample>(&bytes).unwrap(), sample);
}

#[test]
fn both_modes_agree_on_plain_values() {
    let inventory = Inventory {
        counts: HashMap::from([("a".to_owned(), 1), ("b".to_owned(), 2)]),
        tags: vec!["rare".into(), "heavy".into()],
        bonus: Some(3),
    };

    let mut standard = Engine::default();
    let mut minimal = Engine::builder().mode(Mode::Minimal).build();
    let bytes = standard.to_bytes(&inventory).unwrap();
    assert_eq!(minimal.to_bytes(&inventory).unwrap(), bytes);

    let back: Inventory = minimal.from_bytes(&bytes).unwrap();
    assert_eq!(back, inventory);
    assert_eq!(back.counts["b"], 2);
}

#[test]
fn missing_option_reads_as_none() {
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&Inventory::default()).unwrap();

    let mut target = Inventory {
        bonus: Some(9),
        tags: vec!["stale".into()],
        ..default()
    };
    engine.from_bytes_into(&bytes, &mut target).unwrap();
    assert_eq!(target, Inventory::default());
}

#[test]
fn newer_type_reads_older_data() {
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&SaveV1 { hp: 40 }).unwrap();

    let mut save = SaveV2 { hp: 0, mana: 12 };
    engine.from_bytes_into(&bytes, &mut save).unwrap();
    assert_eq!(save, SaveV2 { hp: 40, mana: 12 });
    assert_eq!(engine.from_bytes::<SaveV2>(&bytes).unwrap().mana, 0);

    // the other way round, `mana` is unknown to the old type
    let bytes = engine.to_bytes(&SaveV2 { hp: 1, mana: 2 }).unwrap();
    assert!(matches!(
        engine.from_bytes::<SaveV1>(&bytes),
        Err(Error::UnknownMember { .. })
    ));
}

#[test]
fn enums_and_type_handles() {
    let paint = Paint {
        color: Color::Green,
        shape: Shape::Rect { w: 3, h: 4 },
        kind: TypeHandle::of::<u32>(),
    };
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&paint).unwrap();
    assert_eq!(engine.from_bytes::<Paint>(&bytes).unwrap(), paint);

    let empty = Paint::default();
    let bytes = engine.to_bytes(&empty).unwrap();
    let back: Paint = engine.from_bytes(&bytes).unwrap();
    assert!(back.kind.is_none());
}

#[test]
fn fieldless_enums_write_discriminants() {
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&Level::High).unwrap();
    assert_eq!(bytes, 20_i32.to_le_bytes());
    assert_eq!(engine.from_bytes::<Level>(&bytes).unwrap(), Level::High);
    assert_eq!(engine.from_bytes::<LevelV2>(&bytes).unwrap(), LevelV2::High);

    let bytes = engine.to_bytes(&Level::Low).unwrap();
    assert_eq!(engine.from_bytes::<LevelV2>(&bytes).unwrap(), LevelV2::Low);

    // an index is not a discriminant
    let mut level = Level::High;
    engine.from_bytes_into(&1_i32.to_le_bytes(), &mut level).unwrap();
    assert_eq!(level, Level::High);

    // enums with data keep the variant index
    let bytes = engine.to_bytes(&Shape::Circle(2.0)).unwrap();
    assert_eq!(bytes[..4], 1_i32.to_le_bytes());
}

#[test]
fn unknown_fieldless_variant_keeps_value() {
    let mut bytes = Vec::new();
    write_i32(&mut bytes, 7).unwrap();

    let mut engine = Engine::default();
    let mut color = Color::Green;
    engine.from_bytes_into(&bytes, &mut color).unwrap();
    assert_eq!(color, Color::Green);

    let mut shape = Shape::Circle(1.0);
    let err = engine.from_bytes_into(&bytes, &mut shape).unwrap_err();
    assert!(matches!(err, Error::UnknownVariant { index: 7, .. }));
}

#[test]
fn type_handle_of_unregistered_type_fails() {
    let paint = Paint {
        kind: TypeHandle::of::<Sample>(),
        ..default()
    };
    let mut engine = Engine::default();
    assert!(matches!(
        engine.to_bytes(&paint),
        Err(Error::TypeResolution { .. })
    ));

    engine.register_type::<Sample>();
    let bytes = engine.to_bytes(&paint).unwrap();
    assert_eq!(engine.from_bytes::<Paint>(&bytes).unwrap(), paint);
}

// -----------------------------------------------------------------------------
// References

#[test]
fn cycles_are_rebuilt() {
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&cycle()).unwrap();

    let a: Shared<Node> = engine.from_bytes(&bytes).unwrap();
    let b = a.borrow().next.clone().unwrap();
    assert_eq!(a.borrow().value, 1);
    assert_eq!(b.borrow().value, 2);

    let back = b.borrow().next.clone().unwrap();
    assert!(Shared::ptr_eq(&a, &back));
}

#[test]
fn shared_objects_are_written_once() {
    let shared = node(5);
    let scene = Scene {
        first: shared.clone(),
        second: shared,
    };
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&scene).unwrap();

    let back: Scene = engine.from_bytes(&bytes).unwrap();
    assert!(Shared::ptr_eq(&back.first, &back.second));
    back.first.borrow_mut().value = 9;
    assert_eq!(back.second.borrow().value, 9);

    let distinct = Scene {
        first: node(5),
        second: node(5),
    };
    let bytes = engine.to_bytes(&distinct).unwrap();
    let back: Scene = engine.from_bytes(&bytes).unwrap();
    assert!(!Shared::ptr_eq(&back.first, &back.second));
}

#[test]
fn minimal_mode_duplicates_shared_objects() {
    let shared = node(5);
    let scene = Scene {
        first: shared.clone(),
        second: shared,
    };
    let mut engine = Engine::builder().mode(Mode::Minimal).build();
    let bytes = engine.to_bytes(&scene).unwrap();
    let back: Scene = engine.from_bytes(&bytes).unwrap();
    assert!(!Shared::ptr_eq(&back.first, &back.second));
    assert_eq!(back.second.borrow().value, 5);
}

#[test]
fn polymorphic_references_keep_runtime_type() {
    let holder = Holder {
        item: Shared::new(Node {
            value: 3,
            next: None,
        })
        .into_dyn(),
    };

    let mut engine = Engine::default();
    engine.register_type::<Node>();
    let bytes = engine.to_bytes(&holder).unwrap();
    let back: Holder = engine.from_bytes(&bytes).unwrap();
    let item = back.item.borrow();
    assert_eq!(item.downcast_ref::<Node>().map(|node| node.value), Some(3));

    let mut minimal = Engine::builder().mode(Mode::Minimal).build();
    minimal.register_type::<Node>();
    assert!(matches!(
        minimal.to_bytes(&holder),
        Err(Error::NoStrategyFound { .. })
    ));
}

#[test]
fn unregistered_runtime_type_fails() {
    let holder = Holder {
        item: Shared::new(Sample::default()).into_dyn(),
    };
    let mut engine = Engine::default();
    let err = engine.to_bytes(&holder).unwrap_err();
    assert!(matches!(err, Error::TypeResolution { .. }));
}

#[test]
fn unknown_type_tag_fails() {
    let mut bytes = Vec::new();
    single_member(&mut bytes, "item");
    write_bool(&mut bytes, false).unwrap(); // null
    write_i32(&mut bytes, 0).unwrap(); // id
    write_bool(&mut bytes, false).unwrap(); // seen
    write_bool(&mut bytes, true).unwrap(); // has tag
    write_str(&mut bytes, "game::Missing").unwrap();

    let mut engine = Engine::default();
    let Err(Error::TypeResolution { type_path, .. }) = engine.from_bytes::<Holder>(&bytes) else {
        panic!("expected a type resolution error");
    };
    assert_eq!(type_path, "game::Missing");
}

#[test]
fn dangling_reference_fails() {
    let mut bytes = Vec::new();
    single_member(&mut bytes, "item");
    write_bool(&mut bytes, false).unwrap();
    write_i32(&mut bytes, 3).unwrap();
    write_bool(&mut bytes, true).unwrap();

    let mut engine = Engine::default();
    assert!(matches!(
        engine.from_bytes::<Holder>(&bytes),
        Err(Error::DanglingReference { id: 3 })
    ));
}

#[test]
fn null_for_plain_reference_fails() {
    let mut bytes = Vec::new();
    write_len(&mut bytes, 1).unwrap();
    write_str(&mut bytes, "first").unwrap();
    write_bool(&mut bytes, true).unwrap();

    let mut engine = Engine::default();
    assert!(matches!(
        engine.from_bytes::<Scene>(&bytes),
        Err(Error::UnexpectedNull { .. })
    ));
}

#[test]
fn truncated_input_fails() {
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&cycle()).unwrap();
    for len in [0, 1, bytes.len() / 2, bytes.len() - 1] {
        let err = engine.from_bytes::<Shared<Node>>(&bytes[..len]).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{len}: {err}");
    }
}

fn chain(len: i32) -> Shared<Node> {
    let mut head = node(len - 1);
    for value in (0..len - 1).rev() {
        let next = head;
        head = node(value);
        head.borrow_mut().next = Some(next);
    }
    head
}

#[test]
fn long_chains_round_trip() {
    // Debug builds recurse with large frames.
    let worker = std::thread::Builder::new()
        .stack_size(64 << 20)
        .spawn(|| {
            let mut engine = Engine::default();
            let bytes = engine.to_bytes(&chain(1000)).unwrap();

            let mut current: Shared<Node> = engine.from_bytes(&bytes).unwrap();
            for value in 0..999 {
                assert_eq!(current.borrow().value, value);
                let next = current.borrow().next.clone().unwrap();
                current = next;
            }
            assert_eq!(current.borrow().value, 999);
            assert!(current.borrow().next.is_none());
        })
        .unwrap();
    worker.join().unwrap();
}

#[test]
fn minimal_mode_cycles_hit_depth_limit() {
    let mut engine = Engine::builder().mode(Mode::Minimal).max_depth(64).build();
    assert!(matches!(
        engine.to_bytes(&cycle()),
        Err(Error::DepthLimitExceeded { limit: 64 })
    ));

    // the engine stays usable after a failed pass
    let bytes = engine.to_bytes(&node(4)).unwrap();
    let back: Shared<Node> = engine.from_bytes(&bytes).unwrap();
    assert_eq!(back.borrow().value, 4);
}

// -----------------------------------------------------------------------------
// Host strategies

#[derive(Reflect, Default, Debug, PartialEq, Clone)]
#[reflect(opaque, default)]
struct AssetRef(String);

#[derive(Reflect, Default, Debug, PartialEq)]
struct Sprite {
    pub icon: AssetRef,
    pub frames: Vec<AssetRef>,
}

// Asset names, interned per pass.
#[derive(Default)]
struct AssetTable {
    names: Vec<String>,
}

struct AssetStrategy;

impl SerializerStrategy for AssetStrategy {
    fn handles(&self, info: &'static TypeInfo) -> bool {
        info.is::<AssetRef>()
    }

    fn serialize(&self, value: &dyn Reflect, driver: &mut SerializeDriver) -> Result<()> {
        let Some(asset) = value.downcast_ref::<AssetRef>() else {
            return Err(Error::invalid_data("not an asset"));
        };
        let table = driver
            .context::<AssetTable>()
            .ok_or_else(|| Error::invalid_data("missing asset table"))?;
        let index = match table.names.iter().position(|name| *name == asset.0) {
            Some(index) => index,
            None => {
                table.names.push(asset.0.clone());
                table.names.len() - 1
            }
        };
        write_i32(driver.writer(), index as i32)
    }

    fn deserialize(&self, target: &mut dyn Reflect, driver: &mut DeserializeDriver) -> Result<()> {
        let mut index = 0_i32;
        read_primitive(driver.reader(), &mut index)?;
        let table = driver
            .context::<AssetTable>()
            .ok_or_else(|| Error::invalid_data("missing asset table"))?;
        let name = table
            .names
            .get(index as usize)
            .cloned()
            .ok_or_else(|| Error::invalid_data("unknown asset"))?;
        match target.downcast_mut::<AssetRef>() {
            Some(asset) => {
                asset.0 = name;
                Ok(())
            }
            None => Err(Error::invalid_data("not an asset")),
        }
    }
}

#[test]
fn host_strategy_uses_context() {
    let sprite = Sprite {
        icon: AssetRef("hero.png".into()),
        frames: vec![AssetRef("walk.png".into()), AssetRef("hero.png".into())],
    };
    let mut engine = Engine::builder()
        .known_value_type::<AssetRef>()
        .strategy(AssetStrategy)
        .build();

    let mut table = AssetTable::default();
    let mut bytes = Vec::new();
    engine
        .serialize_with_context(&mut bytes, &sprite, &mut table)
        .unwrap();
    assert_eq!(table.names, ["hero.png", "walk.png"]);

    let mut back = Sprite::default();
    engine
        .deserialize_into_with_context(bytes.as_slice(), &mut back, &mut table)
        .unwrap();
    assert_eq!(back, sprite);

    // no context, no asset table
    assert!(matches!(
        engine.to_bytes(&sprite),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn unknown_value_types_are_skipped() {
    let mut engine = Engine::builder().strategy(AssetStrategy).build();
    let sprite = Sprite {
        icon: AssetRef("hero.png".into()),
        frames: Vec::new(),
    };
    let bytes = engine.to_bytes(&sprite).unwrap();

    let mut expected = Vec::new();
    write_len(&mut expected, 0).unwrap();
    assert_eq!(bytes, expected);
}

// -----------------------------------------------------------------------------
// Files

#[test]
fn file_round_trip() {
    let path = std::env::temp_dir().join(format!("fsv_binary_{}.sav", std::process::id()));
    let sample = Sample {
        x: -3,
        s: "file".into(),
        arr: [0.5, 0.25],
    };

    let mut engine = Engine::default();
    engine.to_file(&path, &sample).unwrap();
    let back: Result<Sample> = engine.from_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(back.unwrap(), sample);

    assert!(matches!(
        engine.from_file::<Sample>(&path),
        Err(Error::Io(_))
    ));
}

#[test]
fn type_tags_are_type_paths() {
    let holder = Holder {
        item: Shared::new(7_u16).into_dyn(),
    };
    let mut engine = Engine::default();
    let bytes = engine.to_bytes(&holder).unwrap();

    let mut reader = &bytes[..];
    assert_eq!(read_string_after_header(&mut reader), "u16");
}

// Skips the member header and reference framing of a `Holder`.
fn read_string_after_header(reader: &mut &[u8]) -> String {
    // count, name, null, id, seen, has tag
    let skip = 4 + (4 + "item".len()) + 1 + 4 + 1 + 1;
    *reader = &reader[skip..];
    read_string(reader).unwrap()
}
