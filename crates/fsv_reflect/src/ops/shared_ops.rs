use core::cell::{BorrowError, BorrowMutError, Ref, RefCell, RefMut};
use core::fmt;
use std::any::Any;
use std::rc::Rc;

use crate::Reflect;
use crate::info::{TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// Shared

/// A shared, mutable reference handle with identity.
///
/// `Shared<T>` is how reflected data models reference-type fields: cloning
/// the handle shares the value, so graphs with shared nodes and cycles can
/// be expressed. Two handles are the same object when
/// [`Shared::ptr_eq`] holds, and serializers preserve exactly that
/// identity.
///
/// `Shared<dyn Reflect>` is the polymorphic form: the field declares no
/// concrete type and the value can be any reflected type.
///
/// # Examples
///
/// ```
/// use fsv_reflect::Reflect;
/// use fsv_reflect::ops::Shared;
///
/// let a = Shared::new(5_i32);
/// let b = a.clone();
/// *b.borrow_mut() += 1;
/// assert_eq!(*a.borrow(), 6);
/// assert!(Shared::ptr_eq(&a, &b));
///
/// let any: Shared<dyn Reflect> = a.clone().into_dyn();
/// assert!(any.borrow().is::<i32>());
/// assert_eq!(any.addr(), a.addr());
/// ```
pub struct Shared<T: ?Sized + 'static>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }
}

impl<T: Reflect> Shared<T> {
    /// Converts into the polymorphic handle, keeping identity.
    #[inline]
    pub fn into_dyn(self) -> Shared<dyn Reflect> {
        Shared(self.0)
    }
}

impl<T: ?Sized + 'static> Shared<T> {
    #[inline]
    pub fn from_rc(rc: Rc<RefCell<T>>) -> Self {
        Self(rc)
    }

    #[inline]
    pub fn as_rc(&self) -> &Rc<RefCell<T>> {
        &self.0
    }

    /// Borrows the value, panicking if it is mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrows the value mutably, panicking if it is borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn try_borrow(&self) -> Result<Ref<'_, T>, BorrowError> {
        self.0.try_borrow()
    }

    #[inline]
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, T>, BorrowMutError> {
        self.0.try_borrow_mut()
    }

    /// Returns `true` if both handles point at the same object.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.addr() == other.addr()
    }

    /// The address of the shared object, its identity.
    ///
    /// Equal for every handle of the same object, whatever the declared
    /// pointee type of the handle.
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    #[inline]
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<T: ?Sized + 'static> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Shared<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Points at a fresh `()`, a placeholder replaced when decoding.
impl Default for Shared<dyn Reflect> {
    #[inline]
    fn default() -> Self {
        Shared::new(()).into_dyn()
    }
}

/// Prints the address only, graphs may be cyclic.
impl<T: ?Sized + 'static> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shared({:#x})", self.addr())
    }
}

// -----------------------------------------------------------------------------
// ErasedShared

/// A type-erased shared object, convertible back into a [`Shared`] of any
/// matching declared type.
///
/// Decoders keep these in their reference tables: the same object may be
/// referenced by a `Shared<Node>` field and by a `Shared<dyn Reflect>` field.
#[derive(Clone)]
pub struct ErasedShared {
    any: Rc<dyn Any>,
    value: Rc<RefCell<dyn Reflect>>,
    type_path: &'static str,
}

impl ErasedShared {
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self::from_shared(Shared::new(value))
    }

    pub fn from_shared<T: Reflect>(shared: Shared<T>) -> Self {
        let type_path = shared.borrow().reflect_type_path();
        let any: Rc<dyn Any> = shared.0.clone();
        Self {
            any,
            value: shared.0,
            type_path,
        }
    }

    /// Same as [`Shared::addr`].
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.value) as *const () as usize
    }

    /// Type path of the runtime type.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn value(&self) -> &RefCell<dyn Reflect> {
        &self.value
    }

    #[inline]
    pub fn to_dyn(&self) -> Shared<dyn Reflect> {
        Shared(self.value.clone())
    }

    /// Returns a typed handle if the runtime type is `T`.
    #[inline]
    pub fn downcast<T: Reflect>(&self) -> Option<Shared<T>> {
        self.any.clone().downcast::<RefCell<T>>().ok().map(Shared)
    }
}

impl fmt::Debug for ErasedShared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ErasedShared({}, {:#x})", self.type_path, self.addr())
    }
}

// -----------------------------------------------------------------------------
// SharedPointee

/// A type that can be the pointee of a reflected [`Shared`].
///
/// Implemented for every defaultable reflected type, and for `dyn Reflect`.
pub trait SharedPointee: TypePath {
    /// Info of the pointee, `None` for the polymorphic `dyn Reflect`.
    fn pointee_info() -> Option<fn() -> &'static TypeInfo>;

    fn as_dyn(&self) -> &(dyn Reflect + 'static);

    /// A new default object of the pointee type, `None` if polymorphic.
    fn new_erased() -> Option<ErasedShared>;

    /// Views `handle` as this pointee type, `None` on a type mismatch.
    fn from_erased(handle: &ErasedShared) -> Option<Rc<RefCell<Self>>>;
}

impl<T: Reflect + Typed + Default> SharedPointee for T {
    #[inline]
    fn pointee_info() -> Option<fn() -> &'static TypeInfo> {
        Some(T::type_info)
    }

    #[inline]
    fn as_dyn(&self) -> &(dyn Reflect + 'static) {
        self
    }

    #[inline]
    fn new_erased() -> Option<ErasedShared> {
        Some(ErasedShared::new(T::default()))
    }

    #[inline]
    fn from_erased(handle: &ErasedShared) -> Option<Rc<RefCell<Self>>> {
        handle.any.clone().downcast::<RefCell<T>>().ok()
    }
}

impl SharedPointee for dyn Reflect {
    #[inline]
    fn pointee_info() -> Option<fn() -> &'static TypeInfo> {
        None
    }

    #[inline]
    fn as_dyn(&self) -> &(dyn Reflect + 'static) {
        self
    }

    #[inline]
    fn new_erased() -> Option<ErasedShared> {
        None
    }

    #[inline]
    fn from_erased(handle: &ErasedShared) -> Option<Rc<RefCell<Self>>> {
        Some(handle.value.clone())
    }
}

// -----------------------------------------------------------------------------
// SharedRef

/// Object-safe access to a reflected [`Shared`] handle.
pub trait SharedRef: Reflect {
    /// See [`Shared::addr`].
    fn addr(&self) -> usize;

    /// Borrows the runtime value.
    fn try_borrow_value(&self) -> Result<Ref<'_, dyn Reflect>, BorrowError>;

    /// A new default object of the declared pointee type, `None` if the
    /// pointee is polymorphic.
    fn new_erased(&self) -> Option<ErasedShared>;

    /// Re-points this handle at `handle`.
    ///
    /// Returns `false`, leaving the handle untouched, if the object is not of
    /// the declared pointee type.
    fn assign(&mut self, handle: &ErasedShared) -> bool;
}

impl<T: SharedPointee + ?Sized> SharedRef for Shared<T> {
    #[inline]
    fn addr(&self) -> usize {
        Shared::addr(self)
    }

    fn try_borrow_value(&self) -> Result<Ref<'_, dyn Reflect>, BorrowError> {
        self.0.try_borrow().map(|value| Ref::map(value, T::as_dyn))
    }

    #[inline]
    fn new_erased(&self) -> Option<ErasedShared> {
        T::new_erased()
    }

    fn assign(&mut self, handle: &ErasedShared) -> bool {
        match T::from_erased(handle) {
            Some(rc) => {
                self.0 = rc;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErasedShared, Shared, SharedRef};
    use crate::Reflect;

    #[test]
    fn erased_views_share_identity() {
        let erased = ErasedShared::new(3_u16);
        assert_eq!(erased.type_path(), "u16");

        let typed = erased.downcast::<u16>().unwrap();
        let any = erased.to_dyn();
        assert_eq!(typed.addr(), erased.addr());
        assert_eq!(any.addr(), erased.addr());
        assert!(erased.downcast::<u32>().is_none());

        *typed.borrow_mut() = 9;
        assert_eq!(any.borrow().downcast_ref::<u16>(), Some(&9));
    }

    #[test]
    fn assign_checks_pointee_type() {
        let mut typed: Shared<u16> = Shared::default();
        let mut any: Shared<dyn Reflect> = Shared::default();

        let wrong = ErasedShared::new(String::from("x"));
        assert!(!typed.assign(&wrong));
        assert!(any.assign(&wrong));
        assert_eq!(any.addr(), wrong.addr());

        let right = ErasedShared::new(1_u16);
        assert!(typed.assign(&right));
        assert_eq!(*typed.borrow(), 1);
    }

    #[test]
    fn borrow_value_fails_while_mutably_borrowed() {
        let shared = Shared::new(1_i64);
        let _guard = shared.borrow_mut();
        assert!(SharedRef::try_borrow_value(&shared).is_err());
    }
}
