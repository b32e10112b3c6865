//! Sniff command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result, bail};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tessera_diagnostics::TSR0300;
use tessera_types::{BasicKind, DbType, SnifferOptions, TypeSniffer, TypeTag, db_type_of};

/// Rows observed by one chunk sniffer before it is merged into the totals
const CHUNK_ROWS: usize = 1024;

/// Configuration for sniff command
pub struct SniffConfig {
    pub file: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub header: bool,
    pub options: SnifferOptions,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Inferred type of one column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub best_type: TypeTag,
    pub basic_kind: BasicKind,
    pub db_type: DbType,
    pub samples: usize,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub possible: Vec<TypeTag>,
}

impl ColumnReport {
    fn new(name: String, sniffer: &TypeSniffer) -> Self {
        let best_type = sniffer.best_type();
        Self {
            name,
            best_type,
            basic_kind: best_type.basic_kind(),
            db_type: db_type_of(best_type),
            samples: sniffer.sample_count(),
            min_length: sniffer.min_length(),
            max_length: sniffer.max_length(),
            possible: sniffer.possible_types(),
        }
    }
}

/// Result of sniffing a whole input
#[derive(Debug, Clone, Serialize)]
pub struct SniffReport {
    pub rows: usize,
    pub columns: Vec<ColumnReport>,
}

impl fmt::Display for SniffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!(
            "{:<16} {:<14} {:<10} {:<22} {:>8} {:>9}",
            "column", "type", "kind", "db type", "samples", "length"
        );
        writeln!(f, "{}", output::heading(&header))?;
        for column in &self.columns {
            let length = match (column.min_length, column.max_length) {
                (Some(min), Some(max)) if min == max => min.to_string(),
                (Some(min), Some(max)) => format!("{min}..{max}"),
                _ => "-".to_string(),
            };
            writeln!(
                f,
                "{:<16} {:<14} {:<10} {:<22} {:>8} {:>9}",
                column.name,
                column.best_type.to_string(),
                column.basic_kind.to_string(),
                column.db_type.to_string(),
                column.samples,
                length
            )?;
        }
        write!(f, "{} row(s)", self.rows)
    }
}

/// Per-column sniffers plus the chunk currently being filled
struct ColumnSniffers {
    options: SnifferOptions,
    totals: Vec<TypeSniffer>,
    chunk: Vec<TypeSniffer>,
    chunk_rows: usize,
}

impl ColumnSniffers {
    fn new(options: SnifferOptions) -> Self {
        Self {
            options,
            totals: Vec::new(),
            chunk: Vec::new(),
            chunk_rows: 0,
        }
    }

    fn observe_row(&mut self, fields: &[&str]) {
        while self.chunk.len() < fields.len() {
            self.chunk.push(TypeSniffer::with_options(self.options));
        }
        for (sniffer, field) in self.chunk.iter_mut().zip(fields) {
            sniffer.observe(Some(field));
        }
        self.chunk_rows += 1;
        if self.chunk_rows == CHUNK_ROWS {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.chunk_rows == 0 {
            return;
        }
        debug!("merging a chunk of {} row(s)", self.chunk_rows);
        while self.totals.len() < self.chunk.len() {
            self.totals.push(TypeSniffer::with_options(self.options));
        }
        for (total, chunk) in self.totals.iter_mut().zip(&mut self.chunk) {
            total.merge(chunk);
            chunk.reset();
        }
        self.chunk_rows = 0;
    }

    fn finish(mut self) -> Vec<TypeSniffer> {
        self.flush();
        self.totals
    }
}

/// Sniff every line of `reader`
///
/// Without a delimiter each line is one sample of a single column. With a
/// delimiter each field feeds its own column; rows may be short (missing
/// fields are nulls) but never wider than the first row.
pub fn sniff_lines<R: BufRead>(
    reader: R,
    delimiter: Option<char>,
    header: bool,
    options: SnifferOptions,
) -> Result<SniffReport> {
    let mut names: Option<Vec<String>> = None;
    let mut width: Option<usize> = None;
    let mut columns = ColumnSniffers::new(options);
    let mut rows = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        let fields: Vec<&str> = match delimiter {
            Some(delimiter) => line.split(delimiter).collect(),
            None => vec![line.as_str()],
        };

        if header && names.is_none() {
            width = Some(fields.len());
            names = Some(fields.iter().map(|name| name.trim().to_string()).collect());
            continue;
        }

        let expected = *width.get_or_insert(fields.len());
        if fields.len() > expected {
            bail!(
                "{TSR0300}: line {} has {} fields, expected at most {}",
                index + 1,
                fields.len(),
                expected
            );
        }
        if fields.len() < expected {
            eprintln!(
                "{}",
                output::format_warning(&format!(
                    "line {} has {} of {} fields; missing fields are treated as null",
                    index + 1,
                    fields.len(),
                    expected
                ))
            );
        }
        columns.observe_row(&fields);
        rows += 1;
    }

    let sniffers = columns.finish();
    let count = width.unwrap_or(0).max(sniffers.len());
    let names = names.unwrap_or_default();
    let columns = (0..count)
        .map(|i| {
            let name = names
                .get(i)
                .filter(|name| !name.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("column{}", i + 1));
            match sniffers.get(i) {
                Some(sniffer) => ColumnReport::new(name, sniffer),
                None => ColumnReport::new(name, &TypeSniffer::with_options(options)),
            }
        })
        .collect();

    Ok(SniffReport { rows, columns })
}

/// Run the sniff command
pub fn sniff(config: SniffConfig) -> Result<()> {
    let report = match &config.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            sniff_lines(BufReader::new(file), config.delimiter, config.header, config.options)?
        }
        None => sniff_lines(io::stdin().lock(), config.delimiter, config.header, config.options)?,
    };
    output::print_report(&report, config.output_format, config.output_file.as_deref())
}
