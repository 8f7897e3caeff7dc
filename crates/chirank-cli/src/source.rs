//! Comma-separated record source
//!
//! Reads a header line followed by one record per line. Fields are split on
//! `,` with no quoting rules, which matches the KDD Cup 99 export.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::Context;
use chirank_columnar::{ColumnStore, Schema};
use tracing::{debug, info};

#[derive(Debug)]
pub struct RecordSource<R> {
    name: String,
    header: String,
    lines: io::Lines<R>,
    line_number: usize,
}

impl RecordSource<BufReader<File>> {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open input file: {}", path.display()))?;
        Self::from_reader(BufReader::new(file), path.display().to_string())
    }
}

impl<R> RecordSource<R>
where
    R: BufRead,
{
    /// Wraps a reader and consumes its header line.
    ///
    /// Fails if the reader is empty, since a source without a header cannot
    /// be trusted to follow the schema.
    pub fn from_reader(reader: R, name: String) -> anyhow::Result<Self> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(header) => header.with_context(|| format!("Failed to read header of {name}"))?,
            None => anyhow::bail!("Input {name} is empty: missing header"),
        };
        Ok(Self {
            name,
            header,
            lines,
            line_number: 1,
        })
    }

    /// Streams every remaining record into a new column store.
    pub fn encode(self, schema: Schema) -> anyhow::Result<ColumnStore> {
        let name = self.name.clone();
        debug!(source = %name, header = %self.header, "reading records");
        let mut store = ColumnStore::new(schema);
        for line in self {
            let line = line?;
            // A blank line carries no fields at all, not one empty field
            let fields = if line.is_empty() {
                Vec::new()
            } else {
                line.split(',').collect::<Vec<_>>()
            };
            store.push_record(&fields);
        }
        info!(
            source = %name,
            rows = store.num_rows(),
            skipped = store.skipped_records(),
            qualifying = store.qualifying_attributes().count(),
            disqualified = store.disqualified_attributes().count(),
            "encoded records"
        );
        Ok(store)
    }
}

impl<R> Iterator for RecordSource<R>
where
    R: BufRead,
{
    type Item = anyhow::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_number += 1;
        let line_number = self.line_number;
        Some(line.with_context(|| format!("Failed to read line {line_number} of {}", self.name)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chirank_columnar::{AttributeId, ColumnId};

    use super::*;

    fn source(text: &str) -> anyhow::Result<RecordSource<Cursor<&str>>> {
        RecordSource::from_reader(Cursor::new(text), "test".to_owned())
    }

    #[test]
    fn test_header_is_skipped() {
        let source = source("a,b,label\n1,0,normal\n0,1,smurf\n").unwrap();
        assert_eq!(source.header, "a,b,label");
        let lines = source.collect::<anyhow::Result<Vec<_>>>().unwrap();
        assert_eq!(lines, ["1,0,normal", "0,1,smurf"]);
    }

    #[test]
    fn test_empty_source_is_fatal() {
        let err = source("").unwrap_err();
        assert!(err.to_string().contains("missing header"), "{err}");
    }

    #[test]
    fn test_header_only_source_has_no_rows() {
        let store = source("a,label\n")
            .unwrap()
            .encode(Schema::new(2, "normal").unwrap())
            .unwrap();
        assert_eq!(store.num_rows(), 0);
    }

    #[test]
    fn test_crlf_line_endings() {
        let store = source("a,label\r\n1,normal\r\n0,smurf\r\n")
            .unwrap()
            .encode(Schema::new(2, "normal").unwrap())
            .unwrap();
        assert_eq!(store.num_rows(), 2);
        assert_eq!(store.get(ColumnId::Target, 0), Some(false));
        assert_eq!(store.get(ColumnId::Target, 1), Some(true));
    }

    #[test]
    fn test_encode_splits_fields() {
        let text = "a,b,c,label\n0,tcp,1,normal\n1,udp,1,back\n\n";
        let store = source(text)
            .unwrap()
            .encode(Schema::new(4, "normal").unwrap())
            .unwrap();
        assert_eq!(store.num_rows(), 2);
        // The blank line has no label field and no attribute fields
        assert_eq!(store.skipped_records(), 1);
        let qualifying = store.qualifying_attributes().collect::<Vec<_>>();
        assert_eq!(
            qualifying,
            [AttributeId::from_index(0), AttributeId::from_index(2)]
        );
    }

    #[test]
    fn test_truncated_line_latches_its_fields() {
        let text = "a,b,c,label\n0,0,0,normal\n7,1\n1,1,1,smurf\n";
        let store = source(text)
            .unwrap()
            .encode(Schema::new(4, "normal").unwrap())
            .unwrap();
        assert_eq!(store.num_rows(), 2);
        assert_eq!(store.skipped_records(), 1);
        assert!(
            store
                .binarity(AttributeId::from_index(0))
                .unwrap()
                .is_disqualified()
        );
        assert_eq!(store.disqualified_attributes().count(), 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = RecordSource::open(Path::new("/nonexistent/chirank/input.csv")).unwrap_err();
        assert!(err.to_string().contains("Could not open"), "{err}");
    }
}
