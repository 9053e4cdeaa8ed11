use tracing::debug;

use crate::common::{error::AppError, numeric};

/// Column used for the counter when no header cell matches a reading token.
/// This is a heuristic for one known export layout, not a guarantee.
pub const FALLBACK_COUNTER_COLUMN: usize = 3;

/// One usable data row extracted from an export.
#[derive(Debug, PartialEq, Eq)]
pub struct ImportedRow {
    pub name: String,
    pub ip: String,
    pub model: String,
    pub counter: u64,
}

#[derive(Debug)]
pub struct ParsedImport {
    pub rows: Vec<ImportedRow>,
    /// Rows below the header dropped for a blank name or ip.
    pub skipped: usize,
}

// Resolved header positions. A column the header does not name stays None,
// which makes every data row blank in that field (and, for name/ip, skipped).
struct Columns {
    name: Option<usize>,
    model: Option<usize>,
    ip: Option<usize>,
    counter: usize,
}

/// Parses a delimited meter-reading export into rows ready for merging.
///
/// The separator is auto-detected (`;` wins over `,`), the header row is
/// found by scanning top-down for printer/ip/model labels, and column
/// positions come from substring matches against the header cells. A missing
/// header aborts the whole import; a malformed data row is skipped and the
/// rest proceed.
///
/// # Errors
///
/// `AppError::ImportEmpty` when fewer than two non-empty lines remain,
/// `AppError::ImportHeader` when no line qualifies as a header, and
/// `AppError::Csv` when the reader itself fails.
pub fn parse(text: &str) -> Result<ParsedImport, AppError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(AppError::ImportEmpty);
    }

    let delimiter = if lines.iter().any(|l| l.contains(';')) {
        b';'
    } else {
        b','
    };

    let joined = lines.join("\n");
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(joined.as_bytes());
    let records = rdr
        .records()
        .collect::<Result<Vec<csv::StringRecord>, _>>()?;

    let (header_idx, columns) = find_header(&records).ok_or(AppError::ImportHeader)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (offset, record) in records.iter().enumerate().skip(header_idx + 1) {
        let cell = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or("")
                .to_string()
        };

        let name = cell(columns.name);
        let ip = cell(columns.ip);
        if name.is_empty() || ip.is_empty() {
            debug!(line = offset + 1, "skipping import row with blank name or ip");
            skipped += 1;
            continue;
        }

        rows.push(ImportedRow {
            name,
            ip,
            model: cell(columns.model),
            counter: numeric::parse_counter(record.get(columns.counter).unwrap_or("")),
        });
    }

    Ok(ParsedImport { rows, skipped })
}

// The first line with a recognizable label is the header. Labels are matched
// case-insensitively: pt-BR tokens from the known export plus their English
// counterparts.
fn find_header(records: &[csv::StringRecord]) -> Option<(usize, Columns)> {
    for (idx, record) in records.iter().enumerate() {
        let cells: Vec<String> = record.iter().map(|c| c.trim().to_lowercase()).collect();

        let looks_like_header = cells
            .iter()
            .any(|c| is_name_label(c) || c == "ip" || is_model_label(c));
        if !looks_like_header {
            continue;
        }

        let columns = Columns {
            name: cells.iter().position(|c| is_name_label(c)),
            model: cells.iter().position(|c| is_model_label(c)),
            ip: cells.iter().position(|c| c == "ip"),
            counter: cells
                .iter()
                .position(|c| is_counter_label(c))
                .unwrap_or(FALLBACK_COUNTER_COLUMN),
        };
        return Some((idx, columns));
    }
    None
}

fn is_name_label(cell: &str) -> bool {
    cell.contains("impressora") || cell.contains("equipamento") || cell.contains("printer")
}

fn is_model_label(cell: &str) -> bool {
    cell.contains("modelo") || cell.contains("model")
}

fn is_counter_label(cell: &str) -> bool {
    // "medi" covers both "medição" and the unaccented "medicao".
    cell.contains("medi") || cell.contains("atual") || cell.contains("current")
}
