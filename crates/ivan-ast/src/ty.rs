// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Native types as written in Ivan source.

use std::fmt;

use crate::Span;

/// A type in a function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// One of the builtin primitives (`int`, `double`, ...)
    Primitive(PrimitiveType),
    /// `i8` .. `u64`
    FixedInteger(FixedIntegerType),
    /// `&T`, `&mut T`, `&own T`, `&raw T`, optionally prefixed by `opt`
    Reference(ReferenceType),
    /// A name not yet matched against the declared types
    Unresolved(UnresolvedType),
    /// A name resolved to an `opaque type` declaration
    Opaque(OpaqueType),
    /// A name resolved to an `interface` declaration
    Interface(InterfaceType),
}

impl NativeType {
    pub const UNIT: NativeType = NativeType::Primitive(PrimitiveType::Unit);

    pub fn reference(target: NativeType, kind: ReferenceKind) -> Self {
        NativeType::Reference(ReferenceType {
            target: Box::new(target),
            kind,
            optional: false,
        })
    }

    /// A reference that may be null, written `opt &T`.
    pub fn optional_reference(target: NativeType, kind: ReferenceKind) -> Self {
        NativeType::Reference(ReferenceType {
            target: Box::new(target),
            kind,
            optional: true,
        })
    }

    pub fn unresolved(name: impl Into<String>, usage_span: Span) -> Self {
        NativeType::Unresolved(UnresolvedType {
            name: name.into(),
            usage_span,
        })
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, NativeType::Primitive(PrimitiveType::Unit))
    }

    /// True when no `Unresolved` type is reachable from this one.
    pub fn is_resolved(&self) -> bool {
        match self {
            NativeType::Unresolved(_) => false,
            NativeType::Reference(r) => r.target.is_resolved(),
            NativeType::Primitive(_)
            | NativeType::FixedInteger(_)
            | NativeType::Opaque(_)
            | NativeType::Interface(_) => true,
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::Primitive(p) => f.write_str(p.name()),
            NativeType::FixedInteger(i) => write!(f, "{}", i),
            NativeType::Reference(r) => {
                if r.optional {
                    f.write_str("opt ")?;
                }
                match r.kind {
                    ReferenceKind::Immutable => write!(f, "&{}", r.target),
                    kind => write!(f, "{} {}", kind.prefix(), r.target),
                }
            }
            NativeType::Unresolved(u) => f.write_str(&u.name),
            NativeType::Opaque(o) => f.write_str(&o.name),
            NativeType::Interface(i) => f.write_str(&i.name),
        }
    }
}

/// The builtin primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// The unit type, for functions that don't return a value
    Unit,
    /// A signed 32-bit integer
    Int,
    Byte,
    /// A 64-bit float
    Double,
    Bool,
    /// A pointer-sized unsigned integer
    Usize,
    /// A pointer-sized signed integer
    Isize,
}

/// Registry row: (ivan name, C spelling, Rust spelling).
const PRIMITIVES: [(PrimitiveType, &str, &str, &str); 7] = [
    (PrimitiveType::Unit, "unit", "void", "()"),
    // NOTE: Assumes sizeof(int) == 4
    (PrimitiveType::Int, "int", "int", "i32"),
    // NOTE: C's char signedness is implementation defined
    (PrimitiveType::Byte, "byte", "char", "u8"),
    (PrimitiveType::Double, "double", "double", "f64"),
    (PrimitiveType::Bool, "bool", "bool", "bool"),
    (PrimitiveType::Usize, "usize", "size_t", "usize"),
    (PrimitiveType::Isize, "isize", "intptr_t", "isize"),
];

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 7] = [
        PrimitiveType::Unit,
        PrimitiveType::Int,
        PrimitiveType::Byte,
        PrimitiveType::Double,
        PrimitiveType::Bool,
        PrimitiveType::Usize,
        PrimitiveType::Isize,
    ];

    /// Look up a primitive by its Ivan name.
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVES.iter().find(|row| row.1 == name).map(|row| row.0)
    }

    fn row(self) -> &'static (PrimitiveType, &'static str, &'static str, &'static str) {
        // The table is indexed in declaration order.
        &PRIMITIVES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.row().1
    }

    pub fn c_name(self) -> &'static str {
        self.row().2
    }

    pub fn rust_name(self) -> &'static str {
        self.row().3
    }
}

/// An integer type with a fixed bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedIntegerType {
    bits: u8,
    signed: bool,
}

impl FixedIntegerType {
    pub const VALID_BITS: [u8; 4] = [8, 16, 32, 64];

    /// Returns `None` unless `bits` is 8, 16, 32 or 64.
    pub fn new(bits: u8, signed: bool) -> Option<Self> {
        Self::VALID_BITS
            .contains(&bits)
            .then_some(Self { bits, signed })
    }

    pub fn bits(self) -> u8 {
        self.bits
    }

    pub fn signed(self) -> bool {
        self.signed
    }
}

impl fmt::Display for FixedIntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.signed { 'i' } else { 'u' };
        write!(f, "{}{}", prefix, self.bits)
    }
}

/// How a reference is meant to be used. Documented convention only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `&` - shared, valid for the duration of the call
    Immutable,
    /// `&mut` - exclusive, valid for the duration of the call
    Mutable,
    /// `&own` - ownership is transferred
    Owned,
    /// `&raw` - no guarantees
    Raw,
}

impl ReferenceKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ReferenceKind::Immutable => "&",
            ReferenceKind::Mutable => "&mut",
            ReferenceKind::Owned => "&own",
            ReferenceKind::Raw => "&raw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceType {
    pub target: Box<NativeType>,
    pub kind: ReferenceKind,
    /// Null is a valid value
    pub optional: bool,
}

/// A type name seen by the parser, waiting for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnresolvedType {
    pub name: String,
    pub usage_span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueType {
    pub name: String,
    /// How the target language spells this type. Usually the name itself,
    /// unless the generator config maps it to an external type.
    pub spelling: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceType {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_registry_round_trips_names() {
        for p in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_name(p.name()), Some(p));
        }
        assert_eq!(PrimitiveType::from_name("float"), None);
    }

    #[test]
    fn primitive_spellings() {
        assert_eq!(PrimitiveType::Unit.c_name(), "void");
        assert_eq!(PrimitiveType::Usize.c_name(), "size_t");
        assert_eq!(PrimitiveType::Isize.c_name(), "intptr_t");
        assert_eq!(PrimitiveType::Byte.rust_name(), "u8");
        assert_eq!(PrimitiveType::Double.rust_name(), "f64");
    }

    #[test]
    fn fixed_integer_bits_are_validated() {
        assert!(FixedIntegerType::new(32, false).is_some());
        assert!(FixedIntegerType::new(128, true).is_none());
        assert!(FixedIntegerType::new(7, true).is_none());
    }

    #[test]
    fn display_uses_source_syntax() {
        let span = Span::new(1, 0);
        let ty = NativeType::reference(
            NativeType::reference(NativeType::unresolved("Example", span), ReferenceKind::Mutable),
            ReferenceKind::Immutable,
        );
        assert_eq!(ty.to_string(), "&&mut Example");
        let optional = NativeType::optional_reference(NativeType::unresolved("Example", span), ReferenceKind::Mutable);
        assert_eq!(optional.to_string(), "opt &mut Example");
        assert_eq!(
            NativeType::FixedInteger(FixedIntegerType::new(16, true).unwrap()).to_string(),
            "i16"
        );
    }

    #[test]
    fn only_the_unit_primitive_is_unit() {
        assert!(NativeType::UNIT.is_unit());
        assert!(!NativeType::Primitive(PrimitiveType::Int).is_unit());
        assert!(!NativeType::reference(NativeType::UNIT, ReferenceKind::Raw).is_unit());
    }

    #[test]
    fn resolution_state_is_transitive() {
        let span = Span::new(1, 0);
        let unresolved = NativeType::reference(NativeType::unresolved("X", span), ReferenceKind::Raw);
        assert!(!unresolved.is_resolved());
        assert!(NativeType::reference(NativeType::UNIT, ReferenceKind::Raw).is_resolved());
    }
}
