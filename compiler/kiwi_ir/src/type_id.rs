//! Registered type identifier.

use std::fmt;

/// Index of a type name in the type registry.
///
/// Id 0 is always `any`, which doubles as "no type hint".
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// `any`: accepts every value; the id given to unhinted bindings.
    pub const ANY: TypeId = TypeId(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_any(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}
