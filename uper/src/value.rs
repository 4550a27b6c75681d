//! Abstract values.

/// A value of some [`AsnType`](crate::AsnType).
///
/// The shape must mirror the type: a `SEQUENCE` value carries exactly one
/// slot per component (`None` for an absent optional component).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsnValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Enumerated(u32),
    OctetString(Vec<u8>),
    Sequence(Vec<Option<AsnValue>>),
    SequenceOf(Vec<AsnValue>),
    Choice { index: u32, value: Box<AsnValue> },
    /// Complete encoding of the contained value, decoded separately by the caller.
    Open(Vec<u8>),
}

impl AsnValue {
    /// Builds a `CHOICE` value.
    #[must_use]
    pub fn choice(index: u32, value: Self) -> Self {
        Self::Choice {
            index,
            value: Box::new(value),
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_enumerated(&self) -> Option<u32> {
        match self {
            Self::Enumerated(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_octets(&self) -> Option<&[u8]> {
        match self {
            Self::OctetString(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Option<Self>]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence_of(&self) -> Option<&[Self]> {
        match self {
            Self::SequenceOf(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_choice(&self) -> Option<(u32, &Self)> {
        match self {
            Self::Choice { index, value } => Some((*index, value)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_open(&self) -> Option<&[u8]> {
        match self {
            Self::Open(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        assert_eq!(AsnValue::Integer(-3).as_integer(), Some(-3));
        assert_eq!(AsnValue::Boolean(true).as_integer(), None);
        assert_eq!(AsnValue::OctetString(vec![1]).as_octets(), Some(&[1u8][..]));
        assert_eq!(AsnValue::Open(vec![2]).as_octets(), None);
    }

    #[test]
    fn choice_accessor() {
        let value = AsnValue::choice(1, AsnValue::Null);
        let (index, inner) = value.as_choice().unwrap();
        assert_eq!(index, 1);
        assert_eq!(inner, &AsnValue::Null);
    }

    #[test]
    fn sequence_accessor_keeps_absent_slots() {
        let value = AsnValue::Sequence(vec![Some(AsnValue::Integer(1)), None]);
        let slots = value.as_sequence().unwrap();
        assert_eq!(slots.len(), 2);
        assert!(slots[1].is_none());
    }
}
