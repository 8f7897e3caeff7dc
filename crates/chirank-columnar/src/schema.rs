use std::fmt;

use serde::{Serialize, Serializer};

use crate::SchemaError;

/// Identifier of a non-label attribute.
///
/// Stored as a zero-based column index; displayed and serialized as the
/// 1-based position of the column in the input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeId(usize);

impl AttributeId {
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.number(), f)
    }
}

impl Serialize for AttributeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.number().serialize(serializer)
    }
}

/// Fixed record layout: `width - 1` attributes followed by the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    width: usize,
    normal_label: String,
}

impl Schema {
    /// Smallest usable schema: one attribute plus the label.
    pub const MIN_WIDTH: usize = 2;
    /// Column count of the KDD Cup 99 dataset (41 attributes and the label).
    pub const KDD_CUP_99_WIDTH: usize = 42;
    /// Label literal denoting benign traffic in the KDD Cup 99 dataset.
    pub const KDD_CUP_99_NORMAL_LABEL: &'static str = "normal";

    /// Creates a schema with `width` columns, the last one being the label.
    ///
    /// Label fields equal to `normal_label` encode as target bit `0`; every
    /// other label encodes as `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chirank_columnar::Schema;
    /// let schema = Schema::new(5, "benign").unwrap();
    /// assert_eq!(schema.num_attributes(), 4);
    /// assert_eq!(schema.label_index(), 4);
    /// assert!(Schema::new(1, "benign").is_err());
    /// ```
    pub fn new(width: usize, normal_label: impl Into<String>) -> Result<Self, SchemaError> {
        if width < Self::MIN_WIDTH {
            return Err(SchemaError::TooNarrow {
                width,
                min: Self::MIN_WIDTH,
            });
        }
        Ok(Self {
            width,
            normal_label: normal_label.into(),
        })
    }

    #[must_use]
    pub fn kdd_cup_99() -> Self {
        Self {
            width: Self::KDD_CUP_99_WIDTH,
            normal_label: Self::KDD_CUP_99_NORMAL_LABEL.to_owned(),
        }
    }

    /// Total number of columns including the label.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn num_attributes(&self) -> usize {
        self.width - 1
    }

    #[must_use]
    pub fn label_index(&self) -> usize {
        self.width - 1
    }

    #[must_use]
    pub fn normal_label(&self) -> &str {
        &self.normal_label
    }

    pub fn attributes(
        &self,
    ) -> impl DoubleEndedIterator<Item = AttributeId> + ExactSizeIterator + use<> {
        (0..self.num_attributes()).map(AttributeId::from_index)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::kdd_cup_99()
    }
}
