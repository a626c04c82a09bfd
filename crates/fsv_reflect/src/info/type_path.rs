use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// The path of a type is its persistent identity: the serializer writes it
/// as the type tag of polymorphic values and resolves it back through the
/// type registry. Unlike [`core::any::type_name`] it is stable across
/// compiler versions, and it can be pinned so that moving a type to another
/// module does not break saved data.
///
/// Names never start with `::`.
///
/// # Implementation
///
/// ```
/// use fsv_reflect::derive::TypePath;
///
/// // path follows the module: "my_crate::module::Moved"
/// #[derive(TypePath)]
/// struct Moved;
///
/// // path is pinned
/// #[derive(TypePath)]
/// #[reflect(type_path = "game::save::Pinned")]
/// struct Pinned;
/// ```
///
/// Manual implementation:
///
/// ```
/// use fsv_reflect::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn type_ident() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
/// ```
pub trait TypePath: 'static {
    /// Returns the fully qualified path with generics.
    ///
    /// For `Option<Vec<usize>>`, this is `"core::option::Option<alloc::vec::Vec<usize>>"`.
    fn type_path() -> &'static str;

    /// Returns the path without module, may be duplicated.
    ///
    /// For `Option<Vec<usize>>`, this is `"Option<Vec<usize>>"`.
    fn type_name() -> &'static str;

    /// Returns the name without module and generics.
    ///
    /// For `Option<Vec<usize>>`, this is `"Option"`.
    fn type_ident() -> &'static str;

    /// Optional module path where the type is defined.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// [`TypePath`] through a value, for `dyn Reflect`.
///
/// # Examples
///
/// ```
/// use fsv_reflect::{info::DynamicTypePath, Reflect};
///
/// let x = String::from("");
/// let y: &dyn Reflect = &x;
/// assert_eq!(y.reflect_type_path(), "alloc::string::String");
/// ```
pub trait DynamicTypePath {
    fn reflect_type_path(&self) -> &'static str;

    fn reflect_type_name(&self) -> &'static str;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        T::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        T::type_name()
    }
}

// -----------------------------------------------------------------------------
// Type

/// A [`TypeId`] that also knows its [`TypePath`].
///
/// Compared and hashed by `TypeId` alone. `Debug` prints the path.
///
/// # Examples
///
/// ```
/// use fsv_reflect::info::Type;
///
/// let ty = Type::of::<String>();
/// assert!(ty.is::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// assert_eq!(ty.name(), "String");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    id: TypeId,
    path: fn() -> &'static str,
    name: fn() -> &'static str,
}

impl Type {
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path,
            name: T::type_name,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// The persistent identity, see [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.path)()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Adds `Type` accessors to an info struct.
///
/// `impl_type_fn!(field)` reads the `Type` from a field, `impl_type_fn!()`
/// only adds the derived accessors on top of an existing `ty()`.
macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying `Type`.
        #[inline(always)]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        $crate::info::impl_type_fn!();
    };
    () => {
        /// Returns the `TypeId`.
        #[inline]
        pub const fn ty_id(&self) -> ::core::any::TypeId {
            self.ty().id()
        }

        /// Returns the type path, see [`TypePath::type_path`](crate::info::TypePath::type_path).
        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.ty().path()
        }

        /// Checks whether the described type is `T`.
        #[inline]
        pub fn is<T: ::core::any::Any>(&self) -> bool {
            self.ty().is::<T>()
        }
    };
}

pub(crate) use impl_type_fn;
