//! CSV reader for event attendee tables.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const FIRST_NAME: &str = "first_name";
pub const ZIPCODE: &str = "zipcode";
pub const HOME_PHONE: &str = "homephone";
pub const REG_DATE: &str = "regdate";

/// One attendee row, addressable by normalized column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttendeeRow {
    fields: Vec<(String, String)>,
}

impl RawAttendeeRow {
    pub fn new<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (normalize_header(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// Row identifier: the value of the first column.
    pub fn id(&self) -> &str {
        self.fields.first().map(|(_, v)| v.as_str()).unwrap_or("")
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `column`, or the empty string when the column is absent.
    pub fn field(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn first_name(&self) -> &str {
        self.field(FIRST_NAME)
    }

    pub fn zipcode(&self) -> &str {
        self.field(ZIPCODE)
    }

    pub fn home_phone(&self) -> &str {
        self.field(HOME_PHONE)
    }

    pub fn reg_date(&self) -> &str {
        self.field(REG_DATE)
    }
}

/// Turns a header such as `" first_Name "` into `first_name`: lowercased,
/// punctuation removed, whitespace runs joined by `_`.
pub fn normalize_header(raw: &str) -> String {
    let kept: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Streams [`RawAttendeeRow`]s from CSV input in file order.
pub struct AttendeeReader<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: StringRecord,
    line: u64,
}

impl AttendeeReader<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Self::from_reader(file)
    }
}

impl<R: Read> AttendeeReader<R> {
    pub fn from_reader(input: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader
            .headers()
            .context("failed to read CSV header")?
            .iter()
            .map(normalize_header)
            .collect();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            line: 1,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for AttendeeReader<R> {
    type Item = Result<RawAttendeeRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line += 1;
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let fields = self
                    .headers
                    .iter()
                    .cloned()
                    .zip(self.record.iter().map(str::to_string))
                    .collect();
                Some(Ok(RawAttendeeRow { fields }))
            }
            Ok(false) => None,
            Err(e) => Some(
                Err(e).with_context(|| format!("failed to read attendee record {}", self.line)),
            ),
        }
    }
}
