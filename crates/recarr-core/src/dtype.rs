//! Element types, field data types, and the [`TypeClass`] subtype test.

use std::fmt;

use crate::schema::RecordSchema;

/// Classification of a leaf (non-record) element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Boolean values.
    Bool,
    /// 32-bit signed integers.
    Int32,
    /// 64-bit signed integers.
    Int64,
    /// 32-bit floating point values.
    Float32,
    /// 64-bit floating point values.
    Float64,
    /// Owned UTF-8 strings.
    Str,
    /// Opaque dynamically typed values (see [`Value`](crate::Value)).
    Object,
}

impl ElementType {
    /// All leaf element types, in promotion order for the numeric ones.
    pub const ALL: [ElementType; 7] = [
        Self::Bool,
        Self::Int32,
        Self::Int64,
        Self::Float32,
        Self::Float64,
        Self::Str,
        Self::Object,
    ];

    /// Returns `true` for the signed integer types.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }

    /// Returns `true` for the floating point types.
    pub fn is_floating(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns `true` for integer and floating point types. `Bool` is not a number.
    pub fn is_number(self) -> bool {
        self.is_integer() || self.is_floating()
    }

    /// Smallest type both `self` and `other` can be losslessly-ish stored in.
    ///
    /// Numeric types follow `Bool < Int32 < Int64 < Float64`; `Float32`
    /// survives only when paired with itself or `Bool`. Strings only combine
    /// with strings. Every other mix widens to `Object`.
    pub fn promote(self, other: Self) -> Self {
        use ElementType::*;
        if self == other {
            return self;
        }
        match (self, other) {
            (Object, _) | (_, Object) => Object,
            (Str, _) | (_, Str) => Object,
            (Bool, t) | (t, Bool) => t,
            (Float64, _) | (_, Float64) => Float64,
            (Float32, _) | (_, Float32) => Float64,
            (Int64, _) | (_, Int64) => Int64,
            _ => Int32,
        }
    }

    /// Short type code used in `Display` output, e.g. `i8` for `Int64`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Bool => "b1",
            Self::Int32 => "i4",
            Self::Int64 => "i8",
            Self::Float32 => "f4",
            Self::Float64 => "f8",
            Self::Str => "U",
            Self::Object => "O",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The data type of one field or one whole array.
#[derive(Clone, Debug, PartialEq)]
pub enum DType {
    /// A leaf element type.
    Scalar(ElementType),
    /// A nested record type.
    Record(RecordSchema),
}

impl DType {
    /// Returns the leaf element type, or `None` for record types.
    pub fn element(&self) -> Option<ElementType> {
        match self {
            Self::Scalar(t) => Some(*t),
            Self::Record(_) => None,
        }
    }

    /// Returns the nested schema, or `None` for leaf types.
    pub fn schema(&self) -> Option<&RecordSchema> {
        match self {
            Self::Scalar(_) => None,
            Self::Record(schema) => Some(schema),
        }
    }

    /// Returns `true` if this is a record type with named fields.
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }
}

impl From<ElementType> for DType {
    fn from(t: ElementType) -> Self {
        Self::Scalar(t)
    }
}

impl From<RecordSchema> for DType {
    fn from(schema: RecordSchema) -> Self {
        Self::Record(schema)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(t) => write!(f, "{t}"),
            Self::Record(schema) => write!(f, "{schema}"),
        }
    }
}

/// A family of element types, used to ask "is this dtype a subtype of X".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeClass {
    /// Exactly one element type.
    Exact(ElementType),
    /// Any signed integer type.
    Integer,
    /// Any floating point type.
    Floating,
    /// Any integer or floating point type.
    Number,
}

impl TypeClass {
    /// Allowed classes used by numeric checks when the caller gives none.
    pub const DEFAULT_NUMERIC: [TypeClass; 4] = [
        Self::Exact(ElementType::Int32),
        Self::Exact(ElementType::Int64),
        Self::Exact(ElementType::Float32),
        Self::Exact(ElementType::Float64),
    ];

    /// Whether `dtype` belongs to this class. Record types belong to none.
    pub fn contains(&self, dtype: &DType) -> bool {
        let Some(t) = dtype.element() else {
            return false;
        };
        match self {
            Self::Exact(expected) => t == *expected,
            Self::Integer => t.is_integer(),
            Self::Floating => t.is_floating(),
            Self::Number => t.is_number(),
        }
    }
}

impl From<ElementType> for TypeClass {
    fn from(t: ElementType) -> Self {
        Self::Exact(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_element() -> impl Strategy<Value = ElementType> {
        prop::sample::select(ElementType::ALL.to_vec())
    }

    #[test]
    fn promote_numeric_lattice() {
        use ElementType::*;
        assert_eq!(Int32.promote(Int64), Int64);
        assert_eq!(Int64.promote(Float32), Float64);
        assert_eq!(Float32.promote(Float32), Float32);
        assert_eq!(Bool.promote(Float32), Float32);
        assert_eq!(Bool.promote(Int32), Int32);
    }

    #[test]
    fn promote_strings_and_objects() {
        use ElementType::*;
        assert_eq!(Str.promote(Str), Str);
        assert_eq!(Str.promote(Int64), Object);
        assert_eq!(Object.promote(Float64), Object);
    }

    #[test]
    fn default_numeric_classes() {
        let numeric = |t: ElementType| {
            TypeClass::DEFAULT_NUMERIC
                .iter()
                .any(|c| c.contains(&DType::Scalar(t)))
        };
        assert!(numeric(ElementType::Int32));
        assert!(numeric(ElementType::Float64));
        assert!(!numeric(ElementType::Bool));
        assert!(!numeric(ElementType::Str));
        assert!(!numeric(ElementType::Object));
    }

    #[test]
    fn abstract_classes() {
        let f = DType::Scalar(ElementType::Float32);
        assert!(TypeClass::Floating.contains(&f));
        assert!(TypeClass::Number.contains(&f));
        assert!(!TypeClass::Integer.contains(&f));
        assert!(!TypeClass::Number.contains(&DType::Record(RecordSchema::empty())));
    }

    proptest! {
        #[test]
        fn promote_commutative(a in arb_element(), b in arb_element()) {
            prop_assert_eq!(a.promote(b), b.promote(a));
        }

        #[test]
        fn promote_idempotent(a in arb_element()) {
            prop_assert_eq!(a.promote(a), a);
        }

        #[test]
        fn promote_associative(a in arb_element(), b in arb_element(), c in arb_element()) {
            prop_assert_eq!(a.promote(b).promote(c), a.promote(b.promote(c)));
        }
    }
}
