//! Color tables.
//!
//! Every pipeline stage reads and writes one kind of table:
//!
//! | Row type | Stage | Text header |
//! |---|---|---|
//! | [`ColorSample`] | extract | `sRGB Color (R, G, B), Count` |
//! | [`LabSample`] | convert | `..., LAB Color (L, A, B)` |
//! | [`ClusteredSample`] | cluster | `..., Group Number (Total Groups: N)` |
//! | [`ClusterRepresentative`] | cluster | `Group Number, Group Color (R, G, B), Count, Members, Pixels` |
//! | [`HistogramBin`] | histogram | `Bin Start, Bin End, Count` |
//!
//! Two encodings exist. JSON is an array of typed records and is parsed
//! strictly. Text is the legacy comma-separated layout with parenthesized
//! triples; its parser skips malformed rows with a warning so hand-edited
//! files still load.
//!
//! A reader accepts any table that carries at least the fields it needs:
//! a clustered table can be read as a LAB table, and a LAB table as a
//! color-count table.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use std::str::{FromStr, Utf8Error};
use std::sync::LazyLock;

use hue_color::HistogramBin;
use hue_core::{ClusterRepresentative, ColorSample, LabPoint, Label, NOISE, Rgb8};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::atomic::write_bytes_atomic;
use crate::error::{IoError, IoResult};

// ============================================================================
// Format
// ============================================================================

/// Table encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Comma-separated text with parenthesized triples.
    Text,
    /// JSON array of records.
    #[default]
    Json,
}

impl TableFormat {
    /// Format implied by the file extension, if any.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    /// Guesses the format of raw table contents.
    pub fn sniff(contents: &[u8]) -> Self {
        match contents.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'[') => Self::Json,
            _ => Self::Text,
        }
    }

    /// Preferred file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

impl FromStr for TableFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(IoError::Validation(format!(
                "unknown table format '{other}' (expected text or json)"
            ))),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One field of a text row: a parenthesized group or a bare value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// Contents between `(` and `)`.
    Group(&'a str),
    /// Anything else, trimmed.
    Value(&'a str),
}

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:\(([^()]*)\)|([^,()]+))").expect("field pattern is valid")
});

/// Splits a text row into fields.
pub fn split_fields(line: &str) -> Vec<Field<'_>> {
    FIELD
        .captures_iter(line)
        .filter_map(|caps| {
            if let Some(group) = caps.get(1) {
                return Some(Field::Group(group.as_str()));
            }
            let value = caps.get(2)?.as_str().trim();
            (!value.is_empty()).then_some(Field::Value(value))
        })
        .collect()
}

/// A record that can be stored in a table.
pub trait TableRow: Serialize + DeserializeOwned + Sized {
    /// Text header for a table holding `rows`.
    fn header(rows: &[Self]) -> String;

    /// Appends the text form of this row (without newline).
    fn write_text(&self, out: &mut String);

    /// Parses a text row from its fields.
    fn from_fields(fields: &[Field<'_>]) -> Result<Self, String>;

    /// Checks invariants that the field types alone do not enforce.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

/// A row keyed by one distinct color.
pub trait SampleRow: TableRow {
    /// The row's color.
    fn rgb(&self) -> Rgb8;

    /// Folds a duplicate row of the same color into this one.
    ///
    /// Returns `false` and leaves `self` unchanged if the merged count
    /// would overflow.
    fn absorb(&mut self, other: &Self) -> bool;
}

fn add_count(count: &mut u64, more: u64) -> bool {
    match count.checked_add(more) {
        Some(sum) => {
            *count = sum;
            true
        }
        None => false,
    }
}

fn positive_count(count: u64) -> Result<(), String> {
    if count == 0 {
        return Err("count must be positive".into());
    }
    Ok(())
}

/// A color sample with its CIELAB value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabSample {
    /// sRGB triple.
    pub rgb: Rgb8,
    /// Pixel count.
    pub count: u64,
    /// CIELAB value.
    pub lab: LabPoint,
}

impl LabSample {
    /// Joins a sample with its LAB value.
    pub fn new(sample: ColorSample, lab: LabPoint) -> Self {
        Self {
            rgb: sample.rgb,
            count: sample.count,
            lab,
        }
    }

    /// The color sample part.
    pub fn sample(&self) -> ColorSample {
        ColorSample::new(self.rgb, self.count)
    }
}

/// A color sample with its LAB value and cluster label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusteredSample {
    /// sRGB triple.
    pub rgb: Rgb8,
    /// Pixel count.
    pub count: u64,
    /// CIELAB value.
    pub lab: LabPoint,
    /// Cluster label, [`NOISE`] for outliers.
    pub label: Label,
}

impl ClusteredSample {
    /// Attaches a label to a LAB row.
    pub fn new(row: LabSample, label: Label) -> Self {
        Self {
            rgb: row.rgb,
            count: row.count,
            lab: row.lab,
            label,
        }
    }

    /// The color sample part.
    pub fn sample(&self) -> ColorSample {
        ColorSample::new(self.rgb, self.count)
    }
}

fn group_at<'a>(fields: &[Field<'a>], i: usize, what: &str) -> Result<&'a str, String> {
    match fields.get(i) {
        Some(&Field::Group(s)) => Ok(s),
        Some(Field::Value(v)) => Err(format!("expected parenthesized {what}, found '{v}'")),
        None => Err(format!("missing {what}")),
    }
}

fn value_at<T: FromStr>(fields: &[Field<'_>], i: usize, what: &str) -> Result<T, String> {
    match fields.get(i) {
        Some(Field::Value(v)) => v.parse().map_err(|_| format!("invalid {what} '{v}'")),
        Some(Field::Group(g)) => Err(format!("expected {what}, found '({g})'")),
        None => Err(format!("missing {what}")),
    }
}

fn triple<T: FromStr>(group: &str, what: &str) -> Result<[T; 3], String> {
    let parts: Vec<&str> = group.split(',').map(str::trim).collect();
    let [a, b, c] = parts.as_slice() else {
        return Err(format!("{what} needs 3 components, found {}", parts.len()));
    };
    let parse = |s: &str| {
        s.parse::<T>()
            .map_err(|_| format!("invalid {what} component '{s}'"))
    };
    Ok([parse(*a)?, parse(*b)?, parse(*c)?])
}

fn rgb_at(fields: &[Field<'_>], i: usize) -> Result<Rgb8, String> {
    let [r, g, b] = triple::<i64>(group_at(fields, i, "RGB color")?, "RGB")?;
    Rgb8::try_from_ints(r, g, b).map_err(|e| e.to_string())
}

fn lab_at(fields: &[Field<'_>], i: usize) -> Result<LabPoint, String> {
    let lab = LabPoint::from(triple::<f64>(group_at(fields, i, "LAB color")?, "LAB")?);
    if !lab.is_finite() {
        return Err(format!("non-finite LAB value {lab:?}"));
    }
    Ok(lab)
}

fn label_at(fields: &[Field<'_>], i: usize) -> Result<Label, String> {
    let label: Label = value_at(fields, i, "group number")?;
    if label < NOISE {
        return Err(format!("invalid group number {label}"));
    }
    Ok(label)
}

impl TableRow for ColorSample {
    fn header(_: &[Self]) -> String {
        "sRGB Color (R, G, B), Count".into()
    }

    fn write_text(&self, out: &mut String) {
        let _ = write!(out, "{}, {}", self.rgb, self.count);
    }

    fn from_fields(fields: &[Field<'_>]) -> Result<Self, String> {
        Ok(Self::new(rgb_at(fields, 0)?, value_at(fields, 1, "count")?))
    }

    fn check(&self) -> Result<(), String> {
        positive_count(self.count)
    }
}

impl SampleRow for ColorSample {
    fn rgb(&self) -> Rgb8 {
        self.rgb
    }

    fn absorb(&mut self, other: &Self) -> bool {
        add_count(&mut self.count, other.count)
    }
}

impl TableRow for LabSample {
    fn header(_: &[Self]) -> String {
        "sRGB Color (R, G, B), Count, LAB Color (L, A, B)".into()
    }

    fn write_text(&self, out: &mut String) {
        let _ = write!(out, "{}, {}, {}", self.rgb, self.count, self.lab);
    }

    fn from_fields(fields: &[Field<'_>]) -> Result<Self, String> {
        Ok(Self {
            rgb: rgb_at(fields, 0)?,
            count: value_at(fields, 1, "count")?,
            lab: lab_at(fields, 2)?,
        })
    }

    fn check(&self) -> Result<(), String> {
        positive_count(self.count)
    }
}

impl SampleRow for LabSample {
    fn rgb(&self) -> Rgb8 {
        self.rgb
    }

    fn absorb(&mut self, other: &Self) -> bool {
        add_count(&mut self.count, other.count)
    }
}

impl TableRow for ClusteredSample {
    fn header(rows: &[Self]) -> String {
        let mut labels: Vec<Label> = rows
            .iter()
            .map(|r| r.label)
            .filter(|&l| l != NOISE)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        format!(
            "sRGB Color (R, G, B), Count, LAB Color (L, A, B), Group Number (Total Groups: {})",
            labels.len()
        )
    }

    fn write_text(&self, out: &mut String) {
        let _ = write!(
            out,
            "{}, {}, {}, {}",
            self.rgb, self.count, self.lab, self.label
        );
    }

    fn from_fields(fields: &[Field<'_>]) -> Result<Self, String> {
        Ok(Self {
            rgb: rgb_at(fields, 0)?,
            count: value_at(fields, 1, "count")?,
            lab: lab_at(fields, 2)?,
            label: label_at(fields, 3)?,
        })
    }

    fn check(&self) -> Result<(), String> {
        positive_count(self.count)
    }
}

impl SampleRow for ClusteredSample {
    fn rgb(&self) -> Rgb8 {
        self.rgb
    }

    fn absorb(&mut self, other: &Self) -> bool {
        add_count(&mut self.count, other.count)
    }
}

impl TableRow for ClusterRepresentative {
    fn header(_: &[Self]) -> String {
        "Group Number, Group Color (R, G, B), Count, Members, Pixels".into()
    }

    fn write_text(&self, out: &mut String) {
        let _ = write!(
            out,
            "{}, {}, {}, {}, {}",
            self.label, self.sample.rgb, self.sample.count, self.members, self.total_count
        );
    }

    fn from_fields(fields: &[Field<'_>]) -> Result<Self, String> {
        Ok(Self {
            label: label_at(fields, 0)?,
            sample: ColorSample::new(rgb_at(fields, 1)?, value_at(fields, 2, "count")?),
            members: value_at(fields, 3, "member count")?,
            total_count: value_at(fields, 4, "pixel count")?,
        })
    }

    fn check(&self) -> Result<(), String> {
        if self.label < 0 {
            return Err("noise cannot be a group".into());
        }
        positive_count(self.sample.count)?;
        if self.members == 0 {
            return Err("group has no members".into());
        }
        if self.total_count < self.sample.count {
            return Err(format!(
                "pixel total {} is below the group color count {}",
                self.total_count, self.sample.count
            ));
        }
        Ok(())
    }
}

impl TableRow for HistogramBin {
    fn header(_: &[Self]) -> String {
        "Bin Start, Bin End, Count".into()
    }

    fn write_text(&self, out: &mut String) {
        // 1e-6 steps hide binary noise like 0.30000000000000004
        let tidy = |x: f64| (x * 1e6).round() / 1e6;
        let _ = write!(out, "{}, {}, {}", tidy(self.start), tidy(self.end), self.count);
    }

    fn from_fields(fields: &[Field<'_>]) -> Result<Self, String> {
        Ok(Self {
            start: value_at(fields, 0, "bin start")?,
            end: value_at(fields, 1, "bin end")?,
            count: value_at(fields, 2, "count")?,
        })
    }
}

// ============================================================================
// Text encoding
// ============================================================================

/// Renders rows as a text table with header.
pub fn render_text<R: TableRow>(rows: &[R]) -> String {
    let mut out = R::header(rows);
    out.push('\n');
    for row in rows {
        row.write_text(&mut out);
        out.push('\n');
    }
    out
}

/// Parses a text table.
///
/// The first non-blank line is the header and is skipped. Blank lines are
/// ignored. Rows that do not parse are logged and skipped.
pub fn parse_text<R: TableRow>(text: &str) -> Vec<R> {
    parse_lines(text.lines().map(Ok))
}

/// Parses a text table from raw bytes.
///
/// Same as [`parse_text`]; a line that is not valid UTF-8 is one more
/// malformed row.
pub fn parse_text_bytes<R: TableRow>(bytes: &[u8]) -> Vec<R> {
    parse_lines(bytes.split(|&b| b == b'\n').map(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        std::str::from_utf8(line)
    }))
}

fn parse_lines<'a, R, I>(lines: I) -> Vec<R>
where
    R: TableRow,
    I: Iterator<Item = Result<&'a str, Utf8Error>>,
{
    let mut rows = Vec::new();
    let mut lines = lines
        .enumerate()
        .filter(|(_, line)| !matches!(line, Ok(l) if l.trim().is_empty()));

    // header
    lines.next();

    for (idx, line) in lines {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(line = idx + 1, %err, "skipping row that is not valid UTF-8");
                continue;
            }
        };
        let parsed = R::from_fields(&split_fields(line)).and_then(|row| row.check().map(|()| row));
        match parsed {
            Ok(row) => rows.push(row),
            Err(reason) => warn!(line = idx + 1, %reason, "skipping malformed row: {}", line.trim()),
        }
    }
    rows
}

/// Drops decoded JSON records that break row invariants.
fn checked_records<R: TableRow>(rows: Vec<R>) -> Vec<R> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match row.check() {
            Ok(()) => Some(row),
            Err(reason) => {
                warn!(record = idx, %reason, "skipping invalid record");
                None
            }
        })
        .collect()
}

// ============================================================================
// Files
// ============================================================================

fn resolve_write_format(path: &Path, format: Option<TableFormat>) -> TableFormat {
    format
        .or_else(|| TableFormat::from_extension(path))
        .unwrap_or_default()
}

/// Encodes rows in `format`.
pub fn encode_table<R: TableRow>(rows: &[R], format: TableFormat) -> IoResult<Vec<u8>> {
    match format {
        TableFormat::Text => Ok(render_text(rows).into_bytes()),
        TableFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(rows)?;
            bytes.push(b'\n');
            Ok(bytes)
        }
    }
}

/// Writes rows to `path` atomically.
///
/// Without an explicit format, the extension decides; unknown extensions
/// get JSON.
pub fn write_table<R, P>(path: P, rows: &[R], format: Option<TableFormat>) -> IoResult<()>
where
    R: TableRow,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = resolve_write_format(path, format);
    let bytes = encode_table(rows, format)?;
    write_bytes_atomic(path, &bytes)?;
    debug!(path = %path.display(), rows = rows.len(), %format, "table written");
    Ok(())
}

/// Reads all rows of a table.
///
/// Without an explicit format, the extension decides; otherwise the
/// contents are sniffed.
///
/// # Errors
///
/// - [`IoError::NotFound`] if `path` does not exist
/// - [`IoError::Json`] if a JSON table is malformed
///
/// Text rows that do not parse and records that break row invariants are
/// logged and skipped.
pub fn read_table<R, P>(path: P, format: Option<TableFormat>) -> IoResult<Vec<R>>
where
    R: TableRow,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read(path)?;
    let format = format
        .or_else(|| TableFormat::from_extension(path))
        .unwrap_or_else(|| TableFormat::sniff(&contents));

    let rows = match format {
        TableFormat::Text => parse_text_bytes(&contents),
        TableFormat::Json => checked_records(serde_json::from_slice(&contents)?),
    };
    debug!(path = %path.display(), rows = rows.len(), %format, "table read");
    Ok(rows)
}

/// Sorts rows by color and merges duplicate colors.
///
/// A duplicate whose count would overflow the merged total is logged and
/// dropped.
pub fn canonicalize<R: SampleRow>(mut rows: Vec<R>) -> Vec<R> {
    rows.sort_by_key(|r| r.rgb());
    let mut out: Vec<R> = Vec::with_capacity(rows.len());
    for row in rows {
        match out.last_mut() {
            Some(prev) if prev.rgb() == row.rgb() => {
                if prev.absorb(&row) {
                    warn!(rgb = %row.rgb(), "duplicate color merged");
                } else {
                    warn!(rgb = %row.rgb(), "skipping duplicate color, merged count overflows");
                }
            }
            _ => out.push(row),
        }
    }
    out
}

/// Reads a sample table in canonical order.
pub fn read_samples<R, P>(path: P, format: Option<TableFormat>) -> IoResult<Vec<R>>
where
    R: SampleRow,
    P: AsRef<Path>,
{
    Ok(canonicalize(read_table(path, format)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn sample(r: u8, g: u8, b: u8, count: u64) -> ColorSample {
        ColorSample::new(Rgb8::new(r, g, b), count)
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a subscriber that records warnings as plain text.
    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let log = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
        (value, log)
    }

    #[test]
    fn test_split_fields() {
        let fields = split_fields("(1, 2, 3), 40, (5.00, -1.20, 3.00), -1");
        assert_eq!(
            fields,
            vec![
                Field::Group("1, 2, 3"),
                Field::Value("40"),
                Field::Group("5.00, -1.20, 3.00"),
                Field::Value("-1"),
            ]
        );
        assert_eq!(
            split_fields("7, (9, 9, 9)"),
            vec![Field::Value("7"), Field::Group("9, 9, 9")]
        );
    }

    #[test]
    fn test_render_color_table() {
        let text = render_text(&[sample(0, 0, 255, 1), sample(255, 0, 0, 3)]);
        assert_eq!(
            text,
            "sRGB Color (R, G, B), Count\n(0, 0, 255), 1\n(255, 0, 0), 3\n"
        );
    }

    #[test]
    fn test_render_clustered_header() {
        let lab = LabPoint::new(53.24, 80.09, 67.2);
        let row = LabSample::new(sample(255, 0, 0, 3), lab);
        let rows = [
            ClusteredSample::new(row, 0),
            ClusteredSample::new(row, NOISE),
            ClusteredSample::new(row, 4),
        ];
        let text = render_text(&rows);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("sRGB Color (R, G, B), Count, LAB Color (L, A, B), Group Number (Total Groups: 2)")
        );
        assert_eq!(lines.next(), Some("(255, 0, 0), 3, (53.24, 80.09, 67.20), 0"));
        assert_eq!(lines.next(), Some("(255, 0, 0), 3, (53.24, 80.09, 67.20), -1"));
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let text = "sRGB Color (R, G, B), Count\n\
                    (1, 2, 3), 10\n\
                    1, 2, 3, 10\n\
                    (1, 2, x), 10\n\
                    (256, 0, 0), 4\n\
                    (4, 5, 6), many\n\
                    \n\
                    (7, 8, 9), 2\n";
        let rows: Vec<ColorSample> = parse_text(text);
        assert_eq!(rows, vec![sample(1, 2, 3, 10), sample(7, 8, 9, 2)]);
    }

    #[test]
    fn test_missing_lab_parens_skipped() {
        let text = "sRGB Color (R, G, B), Count, LAB Color (L, A, B)\n\
                    (1, 2, 3), 10, 0.50, 0.00, 0.00\n\
                    (4, 5, 6), 2, (1.50, -2.00, 3.25)\n";
        let rows: Vec<LabSample> = parse_text(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rgb, Rgb8::new(4, 5, 6));
        assert_eq!(rows[0].lab, LabPoint::new(1.5, -2.0, 3.25));
    }

    #[test]
    fn test_wider_tables_read_as_narrower() {
        let text = "header\n(1, 2, 3), 10, (0.50, 0.00, 0.00), 3\n";
        let counts: Vec<ColorSample> = parse_text(text);
        let labs: Vec<LabSample> = parse_text(text);
        let clustered: Vec<ClusteredSample> = parse_text(text);
        assert_eq!(counts, vec![sample(1, 2, 3, 10)]);
        assert_eq!(labs.len(), 1);
        assert_eq!(clustered[0].label, 3);

        // too narrow for a clustered row
        let narrow: Vec<ClusteredSample> = parse_text("header\n(1, 2, 3), 10\n");
        assert!(narrow.is_empty());
    }

    #[test]
    fn test_lab_text_keeps_two_decimals() {
        let lab = LabPoint::new(53.240_79, 80.092_46, -67.203_2);
        let rows = [LabSample::new(sample(255, 0, 0, 3), lab)];
        let parsed: Vec<LabSample> = parse_text(&render_text(&rows));
        assert_eq!(parsed.len(), 1);
        assert_abs_diff_eq!(parsed[0].lab.l, lab.l, epsilon = 0.005);
        assert_abs_diff_eq!(parsed[0].lab.a, lab.a, epsilon = 0.005);
        assert_abs_diff_eq!(parsed[0].lab.b, lab.b, epsilon = 0.005);
    }

    #[test]
    fn test_group_rows() {
        let rep = ClusterRepresentative {
            label: 2,
            sample: sample(10, 20, 30, 7),
            members: 3,
            total_count: 12,
        };
        let text = render_text(&[rep]);
        assert_eq!(
            text,
            "Group Number, Group Color (R, G, B), Count, Members, Pixels\n2, (10, 20, 30), 7, 3, 12\n"
        );
        let parsed: Vec<ClusterRepresentative> = parse_text(&text);
        assert_eq!(parsed, vec![rep]);

        let noise: Vec<ClusterRepresentative> = parse_text("h\n-1, (1, 1, 1), 1, 1, 1\n");
        assert!(noise.is_empty());
    }

    #[test]
    fn test_histogram_rows() {
        let bins = [
            HistogramBin { start: 99.9, end: 100.0, count: 3 },
            HistogramBin { start: 0.30000000000000004, end: 0.4, count: 1 },
        ];
        let text = render_text(&bins);
        assert_eq!(text, "Bin Start, Bin End, Count\n99.9, 100, 3\n0.3, 0.4, 1\n");
    }

    #[test]
    fn test_canonicalize() {
        let rows = vec![sample(9, 9, 9, 1), sample(1, 1, 1, 2), sample(9, 9, 9, 4)];
        assert_eq!(canonicalize(rows), vec![sample(1, 1, 1, 2), sample(9, 9, 9, 5)]);
    }

    #[test]
    fn test_canonicalize_overflowing_duplicate_dropped() {
        let text = format!("h\n(1, 1, 1), {max}\n(1, 1, 1), {max}\n(2, 2, 2), 3\n", max = u64::MAX);
        let rows: Vec<ColorSample> = canonicalize(parse_text(&text));
        assert_eq!(rows, vec![sample(1, 1, 1, u64::MAX), sample(2, 2, 2, 3)]);

        let lab = LabPoint::new(50.0, 0.0, 0.0);
        let labs = vec![
            LabSample::new(sample(1, 1, 1, u64::MAX - 1), lab),
            LabSample::new(sample(1, 1, 1, 1), lab),
            LabSample::new(sample(1, 1, 1, 1), lab),
        ];
        let merged = canonicalize(labs);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].count, u64::MAX);
    }

    #[test]
    fn test_zero_count_rows_skipped() {
        let rows: Vec<ColorSample> = parse_text("h\n(1, 2, 3), 0\n(4, 5, 6), 2\n");
        assert_eq!(rows, vec![sample(4, 5, 6, 2)]);

        let groups: Vec<ClusterRepresentative> =
            parse_text("h\n0, (1, 1, 1), 0, 1, 1\n1, (2, 2, 2), 5, 0, 5\n2, (3, 3, 3), 5, 1, 4\n3, (4, 4, 4), 5, 2, 6\n");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, 3);
    }

    #[test]
    fn test_non_utf8_row_skipped() {
        let bytes = b"sRGB Color (R, G, B), Count\r\n(1, 2, 3), 10\r\n(4, 5, 6), 1\xff\r\n(7, 8, 9), 2\r\n";
        let rows: Vec<ColorSample> = parse_text_bytes(bytes);
        assert_eq!(rows, vec![sample(1, 2, 3, 10), sample(7, 8, 9, 2)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.txt");
        fs::write(&path, bytes).unwrap();
        let read: Vec<ColorSample> = read_table(&path, None).unwrap();
        assert_eq!(read, rows);
    }

    #[test]
    fn test_malformed_row_warning_logged() {
        let text = "sRGB Color (R, G, B), Count\n(1, 2, 3), 10\n(1, 2, x), 10\n";
        let (rows, log) = capture_warnings(|| parse_text::<ColorSample>(text));
        assert_eq!(rows.len(), 1);
        assert!(log.contains("WARN"), "{log}");
        assert!(log.contains("skipping malformed row: (1, 2, x), 10"), "{log}");
        assert!(log.contains("line=3"), "{log}");

        let (rows, log) = capture_warnings(|| parse_text_bytes::<ColorSample>(b"h\n\xfe\n(1, 1, 1), 1\n"));
        assert_eq!(rows.len(), 1);
        assert!(log.contains("not valid UTF-8"), "{log}");
        assert!(log.contains("line=2"), "{log}");

        let (_, log) = capture_warnings(|| parse_text::<ColorSample>("h\n(1, 1, 1), 1\n"));
        assert!(log.is_empty(), "{log}");
    }

    #[test]
    fn test_format_resolution() {
        assert_eq!(TableFormat::from_extension(Path::new("a.JSON")), Some(TableFormat::Json));
        assert_eq!(TableFormat::from_extension(Path::new("a.txt")), Some(TableFormat::Text));
        assert_eq!(TableFormat::from_extension(Path::new("a")), None);
        assert_eq!(TableFormat::sniff(b"  [\n]"), TableFormat::Json);
        assert_eq!(TableFormat::sniff(b"sRGB Color"), TableFormat::Text);
        assert_eq!(TableFormat::sniff(b""), TableFormat::Text);
        assert_eq!("TEXT".parse::<TableFormat>().unwrap(), TableFormat::Text);
        assert!("csv".parse::<TableFormat>().is_err());
    }

    #[test]
    fn test_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.json");
        let rows = vec![sample(1, 2, 3, 4)];
        write_table(&path, &rows, None).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"rgb\""));
        let back: Vec<ColorSample> = read_table(&path, None).unwrap();
        assert_eq!(back, rows);

        fs::write(&path, "[{\"rgb\": [1, 2, 300], \"count\": 4}]").unwrap();
        let err = read_table::<ColorSample, _>(&path, None).unwrap_err();
        assert_eq!(err.kind(), hue_core::ErrorKind::Validation);
    }

    #[test]
    fn test_json_invalid_records_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.json");
        fs::write(
            &path,
            "[{\"rgb\": [1, 2, 3], \"count\": 0}, {\"rgb\": [4, 5, 6], \"count\": 2}]",
        )
        .unwrap();
        let rows: Vec<ColorSample> = read_table(&path, None).unwrap();
        assert_eq!(rows, vec![sample(4, 5, 6, 2)]);
    }

    #[test]
    fn test_read_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table::<ColorSample, _>(dir.path().join("none.txt"), None).unwrap_err();
        assert!(matches!(err, IoError::NotFound { .. }));
    }

    #[test]
    fn test_read_sniffs_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.dat");
        fs::write(&path, "sRGB Color (R, G, B), Count\n(5, 5, 5), 1\n(1, 1, 1), 2\n(5, 5, 5), 1\n").unwrap();
        let rows: Vec<ColorSample> = read_samples(&path, None).unwrap();
        assert_eq!(rows, vec![sample(1, 1, 1, 2), sample(5, 5, 5, 2)]);
    }
}
