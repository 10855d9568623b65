use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::engine::RequestResult;
use crate::error::{AppError, AppResult, ExportError};

pub(crate) const CSV_HEADER: &str =
    "method,url,time_start,time_first_byte,time_finish,status,bytes_received";

/// Microseconds per exported millisecond.
const US_PER_MS: u64 = 1_000;
/// Milliseconds per exported second.
const MS_PER_SEC: u64 = 1_000;
/// Half a millisecond, for round-half-up.
const HALF_MS_US: u64 = 500;

/// Writes the detailed per-request export to `path`.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub(crate) fn export_csv<'res, 'req: 'res, I>(path: &Path, results: I) -> AppResult<u64>
where
    I: IntoIterator<Item = &'res RequestResult<'req>>,
{
    let to_export_error = |err| {
        AppError::export(ExportError::WriteResults {
            path: path.to_path_buf(),
            source: err,
        })
    };
    let file = File::create(path).map_err(to_export_error)?;
    let mut writer = BufWriter::new(file);
    let rows = write_results(&mut writer, results).map_err(to_export_error)?;
    writer.flush().map_err(to_export_error)?;
    Ok(rows)
}

/// Writes the header and one row per result, returning the row count.
pub(crate) fn write_results<'res, 'req: 'res, W, I>(
    writer: &mut W,
    results: I,
) -> std::io::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = &'res RequestResult<'req>>,
{
    writeln!(writer, "{}", CSV_HEADER)?;
    let mut rows = 0u64;
    for result in results {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            result.request.method.as_str(),
            csv_field(&result.request.url),
            format_seconds(result.time_start),
            format_seconds(result.time_first_byte),
            format_seconds(result.time_end),
            result.status,
            result.bytes_received
        )?;
        rows = rows.saturating_add(1);
    }
    Ok(rows)
}

/// Renders microseconds as seconds with three decimals, rounding half up.
pub(crate) fn format_seconds(micros: u64) -> String {
    let millis = micros.saturating_add(HALF_MS_US) / US_PER_MS;
    format!("{}.{:03}", millis / MS_PER_SEC, millis % MS_PER_SEC)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
