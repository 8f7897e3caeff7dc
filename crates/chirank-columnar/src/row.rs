use crate::schema::Schema;

/// A decoded field value.
///
/// Attribute fields reduce to `Zero` or `One` when they are the integer `0` or
/// `1`; anything else is a `Sentinel`, meaning the value cannot be expressed as
/// a boolean signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Ternary {
    Zero,
    One,
    #[default]
    Sentinel,
}

impl Ternary {
    #[must_use]
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Self::Zero => Some(false),
            Self::One => Some(true),
            Self::Sentinel => None,
        }
    }

    /// Decodes an attribute field.
    ///
    /// The field must be an integer literal: an optional `+` or `-` followed
    /// by one or more ASCII digits. Leading zeros are accepted, so `"00"` and
    /// `"-0"` are `Zero` and `"+01"` is `One`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chirank_columnar::Ternary;
    /// assert_eq!(Ternary::parse_attribute("0"), Ternary::Zero);
    /// assert_eq!(Ternary::parse_attribute("1"), Ternary::One);
    /// assert_eq!(Ternary::parse_attribute("7"), Ternary::Sentinel);
    /// assert_eq!(Ternary::parse_attribute("tcp"), Ternary::Sentinel);
    /// ```
    #[must_use]
    pub fn parse_attribute(field: &str) -> Self {
        let (negative, digits) = match field.as_bytes().first() {
            Some(b'-') => (true, &field[1..]),
            Some(b'+') => (false, &field[1..]),
            _ => (false, field),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Sentinel;
        }
        // Magnitude is compared textually so arbitrarily long literals never overflow
        match digits.trim_start_matches('0') {
            "" => Self::Zero,
            "1" if !negative => Self::One,
            _ => Self::Sentinel,
        }
    }

    /// Decodes a label field: `Zero` for the normal category, `One` otherwise.
    #[must_use]
    pub fn parse_label(field: &str, normal_label: &str) -> Self {
        if field == normal_label {
            Self::Zero
        } else {
            Self::One
        }
    }
}

/// One record decoded to a fixed width of ternary values.
///
/// The last slot is the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    values: Vec<Ternary>,
}

impl Row {
    /// Decodes the first `schema.width()` fields of a record.
    ///
    /// Extra fields are ignored. Slots with no corresponding field are
    /// `Sentinel`, including the label slot of a short record.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chirank_columnar::{Row, Schema, Ternary};
    /// let schema = Schema::new(4, "normal").unwrap();
    /// let row = Row::decode(&["1", "tcp", "0", "smurf"], &schema);
    /// assert_eq!(row.values(), &[Ternary::One, Ternary::Sentinel, Ternary::Zero, Ternary::One]);
    ///
    /// let short = Row::decode(&["1"], &schema);
    /// assert_eq!(short.label(), Ternary::Sentinel);
    /// ```
    #[must_use]
    pub fn decode<S>(fields: &[S], schema: &Schema) -> Self
    where
        S: AsRef<str>,
    {
        let label_index = schema.label_index();
        let mut values = vec![Ternary::Sentinel; schema.width()];
        for (i, (slot, field)) in values.iter_mut().zip(fields).enumerate() {
            let field = field.as_ref();
            *slot = if i == label_index {
                Ternary::parse_label(field, schema.normal_label())
            } else {
                Ternary::parse_attribute(field)
            };
        }
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[Ternary] {
        &self.values
    }

    #[must_use]
    pub fn label(&self) -> Ternary {
        self.values[self.values.len() - 1]
    }

    /// Attribute values in schema order, excluding the label.
    #[must_use]
    pub fn attribute_values(&self) -> &[Ternary] {
        &self.values[..self.values.len() - 1]
    }
}
