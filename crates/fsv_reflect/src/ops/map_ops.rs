use crate::Reflect;

/// Iterator over the `(key, value)` pairs of a [`Map`].
pub type MapIter<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

/// A key-value container, such as `HashMap<K, V>` or `BTreeMap<K, V>`.
///
/// A decoder rebuilds a map by creating a default key and value with
/// [`new_key`](Map::new_key) / [`new_value`](Map::new_value), filling them
/// in place and inserting the pair.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use fsv_reflect::ops::Map;
///
/// let mut map = BTreeMap::<String, i32>::new();
/// let dyn_map: &mut dyn Map = &mut map;
///
/// let mut key = dyn_map.new_key();
/// *key.downcast_mut::<String>().unwrap() = "a".into();
/// let value = dyn_map.new_value();
/// assert!(dyn_map.insert_boxed(key, value).is_ok());
/// assert_eq!(map["a"], 0);
/// ```
pub trait Map: Reflect {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value of `key`, `None` if missing or of the wrong type.
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    /// Iterates over all pairs, in the container's own order.
    fn iter(&self) -> MapIter<'_>;

    fn clear(&mut self);

    /// Creates a default key.
    fn new_key(&self) -> Box<dyn Reflect>;

    /// Creates a default value.
    fn new_value(&self) -> Box<dyn Reflect>;

    /// Inserts a pair, replacing the previous value of the key.
    ///
    /// Returns the pair back if either has the wrong type.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)>;
}
