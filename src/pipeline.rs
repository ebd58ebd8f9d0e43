//! Per-attendee processing: normalize, look up, render, write, tally.
//!
//! Rows are processed one at a time in input order. Registration statistics
//! are threaded through the loop as a single folded [`RegistrationStats`].

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{Instrument, debug, error, info, warn};

use crate::attendees::RawAttendeeRow;
use crate::letter::{DocumentRenderer, LetterContext};
use crate::normalize::{
    CleanPhone, CleanZipcode, RegistrationTimestamp, TimestampError, clean_phone, clean_zipcode,
    parse_registration_datetime,
};
use crate::output::DocumentWriter;
use crate::services::civic_api::{Legislators, RepresentativeLookup, legislators_by_zipcode};
use crate::stats::{RegistrationStats, Summary};

/// The cleaned fields of one attendee row.
#[derive(Debug)]
pub struct AttendeeRecord {
    pub id: String,
    pub name: String,
    pub zipcode: CleanZipcode,
    pub phone: CleanPhone,
    pub registered: Result<RegistrationTimestamp, TimestampError>,
}

impl AttendeeRecord {
    pub fn from_row(row: &RawAttendeeRow) -> Self {
        Self {
            id: row.id().to_string(),
            name: row.first_name().to_string(),
            zipcode: clean_zipcode(row.zipcode()),
            phone: clean_phone(row.home_phone()),
            registered: parse_registration_datetime(row.reg_date()),
        }
    }
}

/// Counts and registration summary for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub rows_processed: usize,
    pub letters_written: usize,
    pub invalid_phones: usize,
    pub lookup_failures: usize,
    pub timestamps_skipped: usize,
    pub summary: Option<Summary>,
}

impl RunReport {
    /// Folds a row's registration time into `stats`. An unparseable
    /// timestamp is counted and left out of the statistics.
    fn tally(&mut self, record: &AttendeeRecord, stats: RegistrationStats) -> RegistrationStats {
        self.rows_processed += 1;
        if !record.phone.is_valid() {
            self.invalid_phones += 1;
        }
        match &record.registered {
            Ok(ts) => stats.record(ts),
            Err(e) => {
                warn!(row_id = %record.id, error = %e, "Registration time skipped");
                self.timestamps_skipped += 1;
                stats
            }
        }
    }
}

/// Output of processing a single row.
#[derive(Debug)]
pub struct RowOutcome {
    pub record: AttendeeRecord,
    pub legislators: Legislators,
    pub letter: PathBuf,
}

/// Drives the letter pipeline over an attendee table.
pub struct EventManager<L, R, W> {
    lookup: L,
    renderer: R,
    writer: W,
}

impl<L, R, W> EventManager<L, R, W>
where
    L: RepresentativeLookup,
    R: DocumentRenderer,
    W: DocumentWriter,
{
    pub fn new(lookup: L, renderer: R, writer: W) -> Self {
        Self {
            lookup,
            renderer,
            writer,
        }
    }

    /// Processes every row in order and returns the run report.
    ///
    /// Invalid phones, failed lookups and unparseable timestamps are absorbed
    /// per row. A row that cannot be read, rendered or written aborts the run;
    /// the error says how many rows completed first.
    #[tracing::instrument(skip_all)]
    pub async fn run<I>(&self, rows: I) -> Result<RunReport>
    where
        I: IntoIterator<Item = Result<RawAttendeeRow>>,
    {
        let mut report = RunReport::default();
        let mut stats = RegistrationStats::default();

        for row in rows {
            let completed = report.rows_processed;
            let outcome = match row {
                Ok(row) => {
                    let span = tracing::info_span!("process_row", row_id = %row.id());
                    self.process_row(&row).instrument(span).await
                }
                Err(e) => Err(e),
            };
            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(completed, error = %e, "Run aborted");
                    return Err(e)
                        .with_context(|| format!("run aborted after {completed} rows completed"));
                }
            };

            if !outcome.legislators.is_found() {
                report.lookup_failures += 1;
            }
            report.letters_written += 1;
            stats = report.tally(&outcome.record, stats);
        }

        report.summary = stats.summary();
        info!(
            rows = report.rows_processed,
            letters = report.letters_written,
            invalid_phones = report.invalid_phones,
            lookup_failures = report.lookup_failures,
            timestamps_skipped = report.timestamps_skipped,
            "Run complete"
        );
        Ok(report)
    }

    /// Normalizes one row, looks up its legislators, then renders and writes
    /// its letter.
    pub async fn process_row(&self, row: &RawAttendeeRow) -> Result<RowOutcome> {
        let record = AttendeeRecord::from_row(row);
        if !record.phone.is_valid() {
            debug!(raw = row.home_phone(), "Phone number did not clean");
        }

        let legislators = legislators_by_zipcode(&self.lookup, &record.zipcode).await;

        let ctx = LetterContext {
            name: record.name.clone(),
            zipcode: record.zipcode.clone(),
            legislators,
            phone: record.phone.clone(),
        };
        let body = self.renderer.render(&ctx)?;
        let letter = self.writer.write(&record.id, &body)?;
        debug!(path = %letter.display(), "Letter saved");

        Ok(RowOutcome {
            record,
            legislators: ctx.legislators,
            letter,
        })
    }
}

/// Computes registration statistics without looking anything up or writing
/// letters.
pub fn analyze_registrations<I>(rows: I) -> Result<RunReport>
where
    I: IntoIterator<Item = Result<RawAttendeeRow>>,
{
    let mut report = RunReport::default();
    let mut stats = RegistrationStats::default();

    for row in rows {
        let completed = report.rows_processed;
        let row = row.with_context(|| format!("analysis aborted after {completed} rows"))?;
        stats = report.tally(&AttendeeRecord::from_row(&row), stats);
    }

    report.summary = stats.summary();
    Ok(report)
}
