use tracing::{debug, warn};

use crate::{
    AppendError,
    bit_column::BitColumn,
    row::{Row, Ternary},
    schema::{AttributeId, Schema},
};

/// Per-attribute binarity latch.
///
/// Starts as `Binary` and moves to `Disqualified` the first time a value other
/// than `0` or `1` is observed. The transition is permanent.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Binarity {
    Binary,
    Disqualified {
        /// Row index at which the non-binary value was seen. For a record
        /// skipped for lack of a label, the index the next row will take.
        row: usize,
        /// Raw field text that triggered the disqualification.
        value: String,
    },
}

/// Addresses one column of a [`ColumnStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Attribute(AttributeId),
    Target,
}

#[derive(Debug, Clone)]
struct AttributeColumn {
    binarity: Binarity,
    bits: BitColumn,
}

impl AttributeColumn {
    fn new() -> Self {
        Self {
            binarity: Binarity::Binary,
            bits: BitColumn::new(),
        }
    }

    /// Routes one decoded value through the latch.
    fn observe(&mut self, id: AttributeId, row: usize, value: Ternary, raw: &str) {
        if self.binarity.is_disqualified() {
            return;
        }
        match value.to_bool() {
            Some(bit) => self.bits.push(bit),
            None => self.disqualify(id, row, raw),
        }
    }

    /// Latches the column without writing a bit. A no-op once disqualified.
    fn disqualify(&mut self, id: AttributeId, row: usize, raw: &str) {
        if self.binarity.is_disqualified() {
            return;
        }
        debug!(
            attribute = %id,
            row,
            value = raw,
            "attribute disqualified: non-binary value"
        );
        self.binarity = Binarity::Disqualified {
            row,
            value: raw.to_owned(),
        };
    }
}

/// Bit-packed columns for every attribute of a schema plus the target label.
///
/// Rows are added in a single sequential pass with [`ColumnStore::push_record`].
/// The target column's length is the row count. Every attribute that is still
/// [`Binarity::Binary`] holds exactly one bit per row; a disqualified attribute
/// keeps the bits written before it was latched and receives no more.
///
/// # Examples
///
/// ```
/// # use chirank_columnar::{AttributeId, ColumnId, ColumnStore, Schema};
/// let schema = Schema::new(3, "normal").unwrap();
/// let mut store = ColumnStore::new(schema);
/// store.push_record(&["1", "0", "normal"]);
/// store.push_record(&["0", "7", "smurf"]);
///
/// let first = AttributeId::from_index(0);
/// let second = AttributeId::from_index(1);
/// assert_eq!(store.num_rows(), 2);
/// assert_eq!(store.get(ColumnId::Target, 1), Some(true));
/// assert_eq!(store.get(ColumnId::Attribute(first), 0), Some(true));
/// assert!(store.binarity(second).unwrap().is_disqualified());
/// assert_eq!(store.qualifying_attributes().collect::<Vec<_>>(), [first]);
/// ```
#[derive(Debug, Clone)]
pub struct ColumnStore {
    schema: Schema,
    attributes: Vec<AttributeColumn>,
    target: BitColumn,
    skipped_records: usize,
}

impl ColumnStore {
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        let attributes = (0..schema.num_attributes())
            .map(|_| AttributeColumn::new())
            .collect();
        Self {
            schema,
            attributes,
            target: BitColumn::new(),
            skipped_records: 0,
        }
    }

    /// Builds a store from a sequence of records in one pass.
    pub fn from_records<I, R, S>(schema: Schema, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut store = Self::new(schema);
        for record in records {
            store.push_record(record.as_ref());
        }
        store
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows encoded so far.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.target.len()
    }

    /// Number of records that produced no row because they had no label field.
    #[must_use]
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    /// Decodes one record and appends it as the next row.
    ///
    /// Returns the row index, or `None` if the record was too short to carry a
    /// label. A skipped record writes no bits, but a non-binary value among
    /// the fields it does carry still disqualifies that attribute.
    pub fn push_record<S>(&mut self, fields: &[S]) -> Option<usize>
    where
        S: AsRef<str>,
    {
        let row = Row::decode(fields, &self.schema);
        self.push_row(&row, fields)
    }

    fn push_row<S>(&mut self, row: &Row, fields: &[S]) -> Option<usize>
    where
        S: AsRef<str>,
    {
        let Some(label) = row.label().to_bool() else {
            self.skipped_records += 1;
            warn!(
                fields = fields.len(),
                width = self.schema.width(),
                "skipping record without a label field"
            );
            self.latch_present_fields(row, fields);
            return None;
        };

        let index = self.num_rows();
        self.target.push(label);
        for (i, (column, &value)) in self
            .attributes
            .iter_mut()
            .zip(row.attribute_values())
            .enumerate()
        {
            let raw = fields.get(i).map_or("", AsRef::as_ref);
            column.observe(AttributeId::from_index(i), index, value, raw);
        }
        Some(index)
    }

    fn latch_present_fields<S>(&mut self, row: &Row, fields: &[S])
    where
        S: AsRef<str>,
    {
        let index = self.num_rows();
        // Missing slots also decode to Sentinel; only fields actually present count
        for (i, ((column, value), raw)) in self
            .attributes
            .iter_mut()
            .zip(row.attribute_values())
            .zip(fields)
            .enumerate()
        {
            if value.is_sentinel() {
                column.disqualify(AttributeId::from_index(i), index, raw.as_ref());
            }
        }
    }

    /// Appends a single bit to one column.
    ///
    /// Rows are aligned on the target column: append the target bit of a row
    /// first, then the attribute bits. An attribute may not run ahead of the
    /// target, and a disqualified attribute rejects every append.
    pub fn append(&mut self, column: ColumnId, value: bool) -> Result<(), AppendError> {
        let attribute = match column {
            ColumnId::Target => {
                self.target.push(value);
                return Ok(());
            }
            ColumnId::Attribute(attribute) => attribute,
        };
        let rows = self.target.len();
        let column = self
            .attributes
            .get_mut(attribute.index())
            .ok_or(AppendError::UnknownAttribute { attribute })?;
        if column.binarity.is_disqualified() {
            return Err(AppendError::Disqualified { attribute });
        }
        if column.bits.len() >= rows {
            return Err(AppendError::RowOutOfStep { attribute, rows });
        }
        column.bits.push(value);
        Ok(())
    }

    /// Reads one bit. Returns `None` for an unknown column or a row past its end.
    #[must_use]
    pub fn get(&self, column: ColumnId, row: usize) -> Option<bool> {
        match column {
            ColumnId::Target => self.target.get(row),
            ColumnId::Attribute(attribute) => self.attribute_column(attribute)?.get(row),
        }
    }

    #[must_use]
    pub fn binarity(&self, attribute: AttributeId) -> Option<&Binarity> {
        self.attributes
            .get(attribute.index())
            .map(|column| &column.binarity)
    }

    /// Packed bits of an attribute, including the frozen bits of a
    /// disqualified one.
    #[must_use]
    pub fn attribute_column(&self, attribute: AttributeId) -> Option<&BitColumn> {
        self.attributes
            .get(attribute.index())
            .map(|column| &column.bits)
    }

    #[must_use]
    pub fn target_column(&self) -> &BitColumn {
        &self.target
    }

    /// Attributes eligible for scoring, in schema order.
    ///
    /// An attribute qualifies when it is still binary and holds a bit for
    /// every row.
    pub fn qualifying_attributes(&self) -> impl Iterator<Item = AttributeId> + '_ {
        let rows = self.num_rows();
        self.attributes
            .iter()
            .enumerate()
            .filter(move |(_, column)| {
                column.binarity.is_binary() && column.bits.len() == rows
            })
            .map(|(i, _)| AttributeId::from_index(i))
    }

    /// Attributes that have been disqualified, in schema order.
    pub fn disqualified_attributes(
        &self,
    ) -> impl Iterator<Item = (AttributeId, &Binarity)> + '_ {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, column)| column.binarity.is_disqualified())
            .map(|(i, column)| (AttributeId::from_index(i), &column.binarity))
    }
}
