use crate::Reflect;

// -----------------------------------------------------------------------------
// Array

/// A fixed-size sequence, `[T; N]`.
pub trait Array: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// The `N` of `[T; N]`.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the elements in order.
    #[inline]
    fn iter(&self) -> ArrayItemIter<'_> {
        ArrayItemIter {
            array: self.as_array(),
            index: 0,
        }
    }

    /// Casts to `&dyn Array`.
    fn as_array(&self) -> &dyn Array;
}

// -----------------------------------------------------------------------------
// ArrayItemIter

/// Iterator over the elements of an [`Array`].
pub struct ArrayItemIter<'a> {
    array: &'a dyn Array,
    index: usize,
}

impl<'a> Iterator for ArrayItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.array.get(self.index)?;
        self.index += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.array.len().saturating_sub(self.index);
        (size, Some(size))
    }
}

impl ExactSizeIterator for ArrayItemIter<'_> {}
