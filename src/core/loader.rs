//! CSV ingest with per-column type inference, memoized per `Dataset`.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Instant,
};

use once_cell::unsync::OnceCell;

use crate::core::{
    error::LoadError,
    table::{Column, ColumnData, ColumnType, Table},
};

// 1 MiB
const BUF_CAP: usize = 1 << 20;

/// Cell texts read as "no value".
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A dataset on disk plus its table, parsed on first use and kept for the
/// lifetime of the `Dataset`.
#[derive(Debug)]
pub struct Dataset {
    path: PathBuf,
    table: OnceCell<Table>,
}

impl Dataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// The table, read from disk only on the first call.
    pub fn load(&self) -> Result<&Table, LoadError> {
        self.table.get_or_try_init(|| {
            let started = Instant::now();
            let table = Table::from_path(&self.path)?;
            log::debug!(
                "loaded `{}`: {} rows × {} columns in {} µs",
                self.path.display(),
                table.n_rows(),
                table.n_columns(),
                started.elapsed().as_micros()
            );
            Ok(table)
        })
    }
}

impl Table {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::Missing {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        parse_csv(file, path)
    }

    /// Parse CSV from any reader; errors name the source as `-`.
    pub fn from_reader<R: Read>(src: R) -> Result<Self, LoadError> {
        parse_csv(src, Path::new("-"))
    }
}

// --- Inference ---

/// What one cell looks like to the type inference.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Missing,
    Integer(i64),
    Float(f64),
    Text,
}

fn classify(raw: &str) -> Token {
    if MISSING_MARKERS.contains(&raw) {
        return Token::Missing;
    }
    let mut buf = raw.as_bytes().to_vec();
    normalize_unicode_minus(&mut buf);
    if let Ok(v) = lexical_core::parse::<i64>(&buf) {
        return Token::Integer(v);
    }
    match lexical_core::parse::<f64>(&buf) {
        Ok(v) if v.is_finite() => Token::Float(v),
        Ok(_) => Token::Missing,
        Err(_) => Token::Text,
    }
}

/// Replace U+2212 MINUS SIGN with an ASCII hyphen in place.
fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
        } else {
            buf[w] = buf[r];
            r += 1;
        }
        w += 1;
    }
    buf.truncate(w);
}

#[derive(Clone, Debug, Default)]
struct InferStats {
    missing: usize,
    floats: usize,
    texts: usize,
}

impl InferStats {
    fn update(&mut self, token: Token) {
        match token {
            Token::Missing => self.missing += 1,
            Token::Integer(_) => {}
            Token::Float(_) => self.floats += 1,
            Token::Text => self.texts += 1,
        }
    }

    fn finalize(&self, n_rows: usize) -> ColumnType {
        if n_rows == 0 || self.texts > 0 {
            ColumnType::Text
        } else if self.floats > 0 || self.missing > 0 {
            ColumnType::Float
        } else {
            ColumnType::Integer
        }
    }
}

/// Blank headers become `Unnamed: i`; repeats get `.1`, `.2`, … suffixes.
fn column_names(headers: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                raw.to_owned()
            };
            let n = seen.entry(base.clone()).or_insert(0);
            let name = if *n == 0 {
                base
            } else {
                let renamed = format!("{base}.{n}");
                log::warn!("duplicate column `{base}` renamed to `{renamed}`");
                renamed
            };
            *n += 1;
            name
        })
        .collect()
}

fn build_column(name: String, ty: ColumnType, records: &[csv::StringRecord], index: usize) -> Column {
    let cells = records.iter().map(|r| r.get(index).unwrap_or(""));
    #[allow(clippy::cast_precision_loss)]
    let data = match ty {
        ColumnType::Integer => ColumnData::Integer(
            cells
                .map(|c| match classify(c) {
                    Token::Integer(v) => v,
                    _ => unreachable!("integer column holds a non-integer"),
                })
                .collect(),
        ),
        ColumnType::Float => ColumnData::Float(
            cells
                .map(|c| match classify(c) {
                    Token::Integer(v) => Some(v as f64),
                    Token::Float(v) => Some(v),
                    Token::Missing | Token::Text => None,
                })
                .collect(),
        ),
        ColumnType::Text => ColumnData::Text(
            cells
                .map(|c| (!MISSING_MARKERS.contains(&c)).then(|| c.to_owned()))
                .collect(),
        ),
    };
    Column::new(name, data)
}

fn parse_csv<R: Read>(src: R, path: &Path) -> Result<Table, LoadError> {
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new()
        .buffer_capacity(BUF_CAP)
        .trim(csv::Trim::Fields)
        .flexible(true)
        .from_reader(src);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    if headers.is_empty() {
        return Err(LoadError::NoColumns {
            path: path.to_path_buf(),
        });
    }
    let names = column_names(&headers);

    let records = rdr
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;
    if records.is_empty() {
        return Err(LoadError::NoRows {
            path: path.to_path_buf(),
        });
    }
    // short rows read as missing trailing cells, long ones are malformed
    if let Some(long) = records.iter().find(|r| r.len() > names.len()) {
        return Err(LoadError::LongRow {
            path: path.to_path_buf(),
            line: long.position().map_or(0, csv::Position::line),
            expected: names.len(),
            found: long.len(),
        });
    }

    let mut stats = vec![InferStats::default(); names.len()];
    for record in &records {
        for (i, s) in stats.iter_mut().enumerate() {
            s.update(classify(record.get(i).unwrap_or("")));
        }
    }

    let columns = names
        .into_iter()
        .zip(&stats)
        .enumerate()
        .map(|(i, (name, s))| build_column(name, s.finalize(records.len()), &records, i))
        .collect();
    Ok(Table::new(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Table {
        Table::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn infers_integer_float_and_text() {
        let t = parse("country,cases,rate\nA,1,0.5\nB,2,1\nC,3,1.5\n");
        let types: Vec<_> = t.columns().iter().map(Column::column_type).collect();
        assert_eq!(
            types,
            vec![ColumnType::Text, ColumnType::Integer, ColumnType::Float]
        );
        assert_eq!(t.n_rows(), 3);
    }

    #[test]
    fn missing_cell_demotes_integers_to_float() {
        let t = parse("cases\n1\nNA\n3\n");
        let col = t.column("cases").unwrap();
        assert_eq!(col.column_type(), ColumnType::Float);
        assert_eq!(
            col.data(),
            &ColumnData::Float(vec![Some(1.0), None, Some(3.0)])
        );
    }

    #[test]
    fn one_word_makes_a_text_column() {
        let t = parse("x\n1\ntwo\n3\n");
        assert_eq!(t.column("x").unwrap().column_type(), ColumnType::Text);
        assert!(t.numeric_columns().is_empty());
    }

    #[test]
    fn unicode_minus_parses_as_negative() {
        let t = parse("delta\n\u{2212}4\n5\n");
        assert_eq!(
            t.column("delta").unwrap().data(),
            &ColumnData::Integer(vec![-4, 5])
        );
    }

    #[test]
    fn duplicate_and_blank_headers_are_renamed() {
        let t = parse("a,a,\n1,2,3\n");
        let names: Vec<_> = t.columns().iter().map(Column::name).collect();
        assert_eq!(names, vec!["a", "a.1", "Unnamed: 2"]);
    }

    #[test]
    fn header_only_is_rejected() {
        let err = Table::from_reader("a,b\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoRows { .. }));
    }

    #[test]
    fn empty_input_has_no_columns() {
        let err = Table::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NoColumns { .. }));
    }

    #[test]
    fn short_rows_fill_with_missing() {
        let t = parse("a,b\n1,2\n3\n");
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.column("a").unwrap().data(), &ColumnData::Integer(vec![1, 3]));
        assert_eq!(
            t.column("b").unwrap().data(),
            &ColumnData::Float(vec![Some(2.0), None])
        );
    }

    #[test]
    fn long_rows_are_malformed() {
        let err = Table::from_reader("a,b\n1,2\n3,4,5\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::LongRow {
                line: 3,
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn spreadsheet_error_markers_are_missing() {
        let t = parse("v\n1.5\n#NA\n-1.#IND\n1.#QNAN\n#N/A N/A\n");
        assert_eq!(
            t.column("v").unwrap().data(),
            &ColumnData::Float(vec![Some(1.5), None, None, None, None])
        );
    }

    #[test]
    fn header_names_keep_their_spaces() {
        let t = parse("date, cases\n2020-03-01, 4\n");
        assert_eq!(t.numeric_columns(), vec![" cases"]);
        assert_eq!(
            t.column(" cases").unwrap().data(),
            &ColumnData::Integer(vec![4])
        );
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let ds = Dataset::new("definitely/not/here.csv");
        assert_eq!(ds.path(), Path::new("definitely/not/here.csv"));
        assert!(matches!(ds.load(), Err(LoadError::Missing { .. })));
        assert!(!ds.is_loaded());
    }
}
