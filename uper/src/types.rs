//! Abstract syntax type descriptors.
//!
//! Descriptors are plain data with `'static` references so that a whole
//! module's abstract syntax can be declared as `static` tables.

/// An ASN.1 type, restricted to the constructs WAVE messages use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsnType {
    /// `NULL` (zero bits).
    Null,

    /// `BOOLEAN` (one bit).
    Boolean,

    /// Constrained `INTEGER`, optionally with an extension marker.
    Integer(IntegerRange),

    /// `ENUMERATED` with `root` root enumerations.
    Enumerated { root: u32, extensible: bool },

    /// `OCTET STRING` with a size constraint.
    OctetString(Size),

    /// `SEQUENCE` of named components.
    Sequence {
        fields: &'static [Field],
        extensible: bool,
    },

    /// `SEQUENCE OF` a single element type.
    SequenceOf {
        size: Size,
        element: &'static AsnType,
    },

    /// `CHOICE`; reserved alternatives occupy an index but carry no type.
    Choice {
        alternatives: &'static [Alternative],
        extensible: bool,
    },

    /// An open type: a length-prefixed complete encoding of some other type.
    Open,
}

impl AsnType {
    /// Returns a short human-readable name of the construct.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Boolean => "BOOLEAN",
            Self::Integer(_) => "INTEGER",
            Self::Enumerated { .. } => "ENUMERATED",
            Self::OctetString(_) => "OCTET STRING",
            Self::Sequence { .. } => "SEQUENCE",
            Self::SequenceOf { .. } => "SEQUENCE OF",
            Self::Choice { .. } => "CHOICE",
            Self::Open => "open type",
        }
    }

    /// Shorthand for a non-extensible constrained integer.
    #[must_use]
    pub const fn integer(lower: i64, upper: i64) -> Self {
        Self::Integer(IntegerRange::new(lower, upper))
    }
}

/// Value range of a constrained integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerRange {
    pub lower: i64,
    pub upper: i64,
    /// `(lower..upper, ...)`: values outside the root are still encodable.
    pub extensible: bool,
}

impl IntegerRange {
    #[must_use]
    pub const fn new(lower: i64, upper: i64) -> Self {
        Self {
            lower,
            upper,
            extensible: false,
        }
    }

    #[must_use]
    pub const fn extensible(lower: i64, upper: i64) -> Self {
        Self {
            lower,
            upper,
            extensible: true,
        }
    }

    /// Returns `true` if `value` lies in the root range.
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// A `SIZE` constraint on strings and lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub min: usize,
    /// `None` means no upper bound (general length determinant).
    pub max: Option<usize>,
}

impl Size {
    /// No size constraint.
    pub const UNCONSTRAINED: Self = Self { min: 0, max: None };

    #[must_use]
    pub const fn fixed(len: usize) -> Self {
        Self {
            min: len,
            max: Some(len),
        }
    }

    #[must_use]
    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Returns `true` if `len` satisfies the constraint.
    #[must_use]
    pub const fn allows(&self, len: usize) -> bool {
        if len < self.min {
            return false;
        }
        match self.max {
            Some(max) => len <= max,
            None => true,
        }
    }
}

/// A component of a `SEQUENCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: &'static AsnType,
    pub optional: bool,
}

impl Field {
    #[must_use]
    pub const fn mandatory(name: &'static str, ty: &'static AsnType) -> Self {
        Self {
            name,
            ty,
            optional: false,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, ty: &'static AsnType) -> Self {
        Self {
            name,
            ty,
            optional: true,
        }
    }
}

/// An alternative of a `CHOICE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    pub name: &'static str,
    /// `None` marks a reserved alternative that cannot be selected.
    pub ty: Option<&'static AsnType>,
}

impl Alternative {
    /// Placeholder for an index reserved by the standard.
    pub const RESERVED: Self = Self {
        name: "reserved",
        ty: None,
    };

    #[must_use]
    pub const fn new(name: &'static str, ty: &'static AsnType) -> Self {
        Self { name, ty: Some(ty) }
    }
}
