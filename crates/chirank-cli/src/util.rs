use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
};

use anyhow::Context;
use chirank_analysis::ranking::Ranking;

/// Output path argument meaning "write to stdout".
pub const STDOUT_PATH: &str = "-";

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Opens `path` for writing, or stdout when the path is `-`.
    pub fn from_output_path(path: PathBuf) -> anyhow::Result<Self> {
        if path.as_os_str() == STDOUT_PATH {
            Ok(Output::stdout())
        } else {
            Output::open(path)
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Output::Stdout { .. })
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }

    pub fn write_ranking_csv(&mut self, ranking: &Ranking) -> anyhow::Result<()> {
        write_ranking_csv(&mut *self, ranking)
            .with_context(|| format!("Failed to write CSV to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Writes the `Column,Score` header and one line per ranked attribute.
pub fn write_ranking_csv<W>(mut writer: W, ranking: &Ranking) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(writer, "Column,Score")?;
    for ranked in ranking {
        writeln!(writer, "{},{}", ranked.attribute, ranked.score)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chirank_analysis::score::ScoreEntry;
    use chirank_columnar::AttributeId;
    use chirank_stats::contingency::ContingencyTable;

    use super::*;

    #[test]
    fn test_csv_layout() {
        let entries = [(0, 0.0), (2, 3.0), (4, 1.0)].map(|(index, statistic)| ScoreEntry {
            attribute: AttributeId::from_index(index),
            table: ContingencyTable::default(),
            statistic,
        });
        let ranking = Ranking::from_scores(&entries, 4);

        let mut buf = Vec::new();
        write_ranking_csv(&mut buf, &ranking).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Column,Score\n3,0.75\n5,0.25\n1,0\n");
    }

    #[test]
    fn test_csv_empty_ranking_has_header() {
        let mut buf = Vec::new();
        write_ranking_csv(&mut buf, &Ranking::default()).unwrap();
        assert_eq!(buf, b"Column,Score\n");
    }
}
