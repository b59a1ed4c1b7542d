use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::window::WindowRow;

// ---------------------------------------------------------------------------
// Window export (plain text, tab separated)
// ---------------------------------------------------------------------------

/// Write the window definitions as typed, not the data.
///
/// ```text
/// Data File Location: <pattern>
///
/// Title: <title>
///
/// Start Datetime\t\tEnd Datetime\t\tLabel
/// <start>\t<end>\t<label>
/// ```
pub fn write_export<W: Write>(
    out: &mut W,
    pattern: &str,
    title: &str,
    rows: &[WindowRow],
) -> std::io::Result<()> {
    write!(out, "Data File Location: {pattern}\n\n")?;
    write!(out, "Title: {title}\n\n")?;
    writeln!(out, "Start Datetime\t\tEnd Datetime\t\tLabel")?;
    for row in rows {
        writeln!(out, "{}\t{}\t{}", row.start, row.end, row.label)?;
    }
    Ok(())
}

/// Create (or truncate) `path` and write the export into it.
pub fn export_to_path(path: &Path, pattern: &str, title: &str, rows: &[WindowRow]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_export(&mut out, pattern, title, rows)
        .and_then(|_| out.flush())
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} time window(s) to {}", rows.len(), path.display());
    Ok(())
}
