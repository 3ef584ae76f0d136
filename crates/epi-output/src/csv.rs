//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trial_summaries.csv`
//! - `daily_infectious.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DailyInfectiousRow, OutputResult, TrialSummaryRow};

/// Writes experiment output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    daily:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("trial_summaries.csv"))?;
        summaries.write_record([
            "hypothesis",
            "trial",
            "scenario",
            "final_recovered",
            "peak_infectious",
            "peak_day",
            "attack_rate",
            "vaccinated",
        ])?;

        let mut daily = Writer::from_path(dir.join("daily_infectious.csv"))?;
        daily.write_record(["hypothesis", "trial", "scenario", "day", "infectious"])?;

        Ok(Self {
            summaries,
            daily,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trial_summary(&mut self, row: &TrialSummaryRow<'_>) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.hypothesis.to_owned(),
            row.trial.to_string(),
            row.scenario.to_owned(),
            row.final_recovered.to_string(),
            row.peak_infectious.to_string(),
            row.peak_day.to_string(),
            format!("{:.6}", row.attack_rate),
            row.vaccinated.to_string(),
        ])?;
        Ok(())
    }

    fn write_daily_infectious(&mut self, rows: &[DailyInfectiousRow<'_>]) -> OutputResult<()> {
        for row in rows {
            self.daily.write_record(&[
                row.hypothesis.to_owned(),
                row.trial.to_string(),
                row.scenario.to_owned(),
                row.day.to_string(),
                row.infectious.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.daily.flush()?;
        Ok(())
    }
}
