//! Plain-text shopping-list export.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cart::AggregatedEntry;

const HEADER: &str = "Shopping list:";
const SEPARATOR_WIDTH: usize = 50;

/// Writes the aggregated list in the fixed export format: a header line,
/// a separator of 50 `=` characters, a blank line, then one
/// `• <name>: <quantity> <unit>` line per entry. Numeric quantities are
/// formatted to one decimal place.
pub fn write_shopping_list<W: Write>(writer: &mut W, entries: &[AggregatedEntry]) -> io::Result<()> {
    writeln!(writer, "{}", HEADER)?;
    writeln!(writer, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    writeln!(writer)?;

    for entry in entries {
        // "Numeric" at export time means parseable, not just summed:
        // a lone "8" row still comes out as "8.0".
        match entry.quantity.as_number() {
            Some(n) => writeln!(writer, "\u{2022} {}: {:.1} {}", entry.name, n, entry.unit)?,
            None => writeln!(
                writer,
                "\u{2022} {}: {} {}",
                entry.name, entry.quantity, entry.unit
            )?,
        }
    }
    Ok(())
}

/// Exports the aggregated list to a file, creating or truncating it.
pub fn export_shopping_list(path: &Path, entries: &[AggregatedEntry]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create shopping list file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write_shopping_list(&mut writer, entries)
        .with_context(|| format!("Failed to write shopping list: {:?}", path))?;
    writer.flush()?;
    log::info!("exported {} shopping list entries to {:?}", entries.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{aggregate, CartEntry};

    fn render(entries: &[AggregatedEntry]) -> String {
        let mut buf = Vec::new();
        write_shopping_list(&mut buf, entries).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_numeric_line_format() {
        let entries = aggregate(&[
            CartEntry::new("Salt", "5", "g"),
            CartEntry::new("Salt", "3", "g"),
        ]);
        let output = render(&entries);
        assert!(output.contains("\u{2022} Salt: 8.0 g\n"), "got: {output}");
    }

    #[test]
    fn test_opaque_quantity_is_written_verbatim() {
        let entries = aggregate(&[CartEntry::new("Flour", "one cup", "cup")]);
        let output = render(&entries);
        assert!(output.contains("\u{2022} Flour: one cup cup\n"));
    }

    #[test]
    fn test_header_and_separator() {
        let output = render(&[]);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Shopping list:"));
        assert_eq!(lines.next(), Some("=".repeat(50).as_str()));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopping_list.txt");
        let entries = aggregate(&[CartEntry::new("Salt", "8", "g")]);

        export_shopping_list(&path, &entries).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with("\u{2022} Salt: 8.0 g\n"));
    }
}
