//! Deterministic hash-based type identity.
//!
//! This module provides [`TypeHash`], a 64-bit hash that identifies types,
//! templates, and template instantiations. Hashes are computed
//! deterministically from names and argument tuples, so the same
//! declaration always produces the same hash regardless of declaration
//! order.
//!
//! Note that hash identity is advisory: templates, parameters, and
//! concrete types compare by object identity. The hash exists for
//! display, diagnostics, and stable instance naming.
//!
//! # Examples
//!
//! ```
//! use type_templates_core::TypeHash;
//!
//! let a = TypeHash::from_name("Sequence");
//! let b = TypeHash::from_name("Sequence");
//! assert_eq!(a, b); // deterministic
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
///
/// Different entity kinds (declared types, argument values) use distinct
/// domain markers so that a value and a type sharing a rendering do not
/// collide.
pub mod hash_constants {
    /// Separator constant used when folding sequences of hashes.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for declared type hashes.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for non-type argument values.
    pub const VALUE: u64 = 0x5ea77ffbcdf5f302;

    /// Argument position mixing constants. Each position gets a unique
    /// constant so that argument order matters.
    pub const ARG_MARKERS: [u64; 8] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
    ];

    /// Marker for argument position `i`, for any `i`.
    #[inline]
    pub fn arg_marker(i: usize) -> u64 {
        ARG_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| ARG_MARKERS[0].wrapping_add(i as u64))
    }
}

/// A deterministic 64-bit hash identifying a type, template, or
/// instantiation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a declared type or template name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create an instantiation hash from a template hash and its
    /// argument hashes.
    ///
    /// Argument order matters: `Pair[1, 2]` hashes differently from
    /// `Pair[2, 1]`.
    #[inline]
    pub fn from_template_instance(template: TypeHash, args: &[TypeHash]) -> Self {
        let mut hash = template.0;
        for (i, arg) in args.iter().enumerate() {
            // wrapping_mul keeps the fold non-commutative
            hash = hash
                .wrapping_mul(hash_constants::SEP)
                .wrapping_add(hash_constants::arg_marker(i) ^ arg.0);
        }
        TypeHash(hash)
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
