//! Export helpers for CSV tables and JSON sidecars.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod table {
    use std::io::Write;
    use std::path::Path;

    use serde::Serialize;

    use super::{ExportError, writer_for_path};

    /// Write `rows` as CSV with a header taken from the field names. Returns the row count.
    pub fn write_csv<W, T>(writer: W, rows: &[T]) -> Result<usize, ExportError>
    where
        W: Write,
        T: Serialize,
    {
        let mut csv = csv::Writer::from_writer(writer);
        for row in rows {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(rows.len())
    }

    pub fn write_csv_to_path<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize, ExportError> {
        write_csv(writer_for_path(path)?, rows)
    }
}

pub mod sidecar {
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::{ExportError, writer_for_path};

    /// Context recorded alongside every exported result.
    #[derive(Debug, Clone, Serialize)]
    pub struct Metadata<'a> {
        pub aircraft: &'a str,
        pub atmosphere: &'a str,
        pub altitude_m: f64,
    }

    #[derive(Serialize)]
    struct Envelope<'a, T> {
        #[serde(flatten)]
        meta: &'a Metadata<'a>,
        data: &'a T,
    }

    /// Write `data` as pretty JSON wrapped with its metadata.
    pub fn write_json<T: Serialize>(
        path: &Path,
        meta: &Metadata<'_>,
        data: &T,
    ) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, &Envelope { meta, data })?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Path of the JSON sidecar that accompanies a CSV export, `<stem>_<suffix>.json`.
    pub fn sidecar_path(output: &Path, suffix: &str) -> PathBuf {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("export");
        parent.join(format!("{stem}_{suffix}.json"))
    }
}
