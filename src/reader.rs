use std::{fmt, fs, path::Path};

use {
    anyhow::{Context, Result},
    tracing::{debug, warn},
};

use crate::{
    operators::{behead, nulls},
    record::{Record, RecordSet},
};

/// A recoverable problem found while reading a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseFailure {
    /// Fewer than two non-blank lines, so there is no header row.
    InsufficientLines { found: usize },
    /// A data row the DSV parser rejected or whose field count differs from
    /// the header. `line` is the 1-based line in the input file.
    Row { line: u64, message: String },
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::InsufficientLines { found } => write!(
                f,
                "insufficient lines: expected a title and a header line, found {found}"
            ),
            ParseFailure::Row { line, message } => write!(f, "line {line}: {message}"),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Result of reading one file. `errors` is a side channel: rows with the wrong
/// field count are listed there and still kept in `records`, rows the parser
/// could not read at all are only listed there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parsed {
    pub headers: Vec<String>,
    pub records: RecordSet,
    pub errors: Vec<ParseFailure>,
}

impl Parsed {
    fn failed(failure: ParseFailure) -> Self {
        Self {
            errors: vec![failure],
            ..Default::default()
        }
    }
}

/// Reads DSV text whose first line is a title and second line the header.
#[derive(Clone, Debug)]
pub struct TabularReader {
    delimiter: u8,
}

impl Default for TabularReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TabularReader {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Fails only if the file cannot be read.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Parsed> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;

        debug!(path = %path.display(), bytes = text.len(), "read input");
        Ok(self.read_str(&text))
    }

    pub fn read_str(&self, text: &str) -> Parsed {
        let mut parsed = match behead::run(text) {
            Ok(body) => {
                let mut parsed = self.parse_with_header(&body.text);
                for failure in parsed.errors.iter_mut() {
                    if let ParseFailure::Row { line, .. } = failure {
                        if let Some(source) = body.source_line(*line) {
                            *line = source;
                        }
                    }
                }
                parsed
            }
            Err(failure) => Parsed::failed(failure),
        };

        for failure in &parsed.errors {
            warn!("{failure}");
        }
        nulls::run(&mut parsed.records);
        parsed
    }

    /// Header-aware parse: the first row names the fields, every following
    /// row becomes one record. Knows nothing about title lines, so `line` in
    /// the returned failures counts lines of `text`.
    ///
    /// A row with fewer fields than the header leaves the trailing fields
    /// undefined; a row with more drops the extras. Both are still kept and
    /// reported.
    pub fn parse_with_header(&self, text: &str) -> Parsed {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = match reader.headers() {
            Ok(headers) => headers.iter().map(String::from).collect::<Vec<String>>(),
            Err(err) => {
                return Parsed::failed(ParseFailure::Row {
                    line: 1,
                    message: format!("invalid header: {err}"),
                })
            }
        };

        let mut records = Vec::new();
        let mut errors = Vec::new();

        for (index, result) in reader.into_records().enumerate() {
            let fallback_line = index as u64 + 2;
            match result {
                Ok(row) => {
                    if row.len() != headers.len() {
                        errors.push(ParseFailure::Row {
                            line: row
                                .position()
                                .map(|position| position.line())
                                .unwrap_or(fallback_line),
                            message: format!(
                                "expected {} fields, found {}",
                                headers.len(),
                                row.len()
                            ),
                        });
                    }

                    records.push(
                        headers
                            .iter()
                            .zip(row.iter())
                            .map(|(name, value)| (name.as_str(), Some(value.to_owned())))
                            .collect::<Record>(),
                    );
                }
                Err(err) => errors.push(ParseFailure::Row {
                    line: err
                        .position()
                        .map(|position| position.line())
                        .unwrap_or(fallback_line),
                    message: err.to_string(),
                }),
            }
        }

        Parsed {
            headers,
            records,
            errors,
        }
    }
}

/// Reads `path` with the default comma-delimited reader.
pub fn read(path: impl AsRef<Path>) -> Result<Parsed> {
    TabularReader::default().read_path(path)
}
