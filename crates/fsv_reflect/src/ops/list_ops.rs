use crate::Reflect;

// -----------------------------------------------------------------------------
// List

/// A growable sequence, such as `Vec<T>` or `VecDeque<T>`.
///
/// Elements are only added as defaults and then filled in place, which is
/// how a decoder rebuilds a list without knowing how to construct `T` itself.
///
/// # Examples
///
/// ```
/// use fsv_reflect::ops::List;
///
/// let mut vec = vec![1_i32];
/// let list: &mut dyn List = &mut vec;
/// *list.push_default().downcast_mut::<i32>().unwrap() = 2;
/// assert_eq!(vec, [1, 2]);
/// ```
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements.
    fn clear(&mut self);

    /// Appends a default element and returns it.
    fn push_default(&mut self) -> &mut dyn Reflect;

    /// Iterates over the elements in order.
    #[inline]
    fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self.as_list())
    }

    /// Casts to `&dyn List`.
    fn as_list(&self) -> &dyn List;
}

// -----------------------------------------------------------------------------
// ListItemIter

/// Iterator over the elements of a [`List`].
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> ListItemIter<'a> {
    #[inline]
    pub const fn new(list: &'a dyn List) -> Self {
        Self { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len().saturating_sub(self.index);
        (size, Some(size))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
