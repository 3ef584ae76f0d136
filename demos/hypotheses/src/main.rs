//! hypotheses — the three intervention studies on a daily contact network.
//!
//! Loads a contact log (or the bundled demo village), then for each selected
//! study runs the paired Monte Carlo experiment and prints its report:
//!
//! - H1: symptomatic isolation vs. symptomatic plus household isolation.
//! - H2: baseline vs. thinned contacts (peak timing and height).
//! - H3: no vaccination vs. pre-emptive vaccination (large-outbreak risk).
//!
//! With `--output DIR` each study writes its per-trial CSVs into
//! `DIR/<study>/` and all reports are collected in `DIR/report.json`.

mod args;
mod config;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use epi_contact::{LoadedContacts, load_contacts_csv, load_contacts_reader};
use epi_harness::{
    ExperimentConfig, HarnessObserver, Hypothesis, IsolationReport, MonteCarlo, OutbreakReport,
    PeakTimingReport, Trial,
};
use epi_output::{CsvWriter, OutputWriter, TrialOutputObserver};

use args::{Args, Selection};
use config::HypothesesFile;

// ── Bundled data ──────────────────────────────────────────────────────────────

// 60 villagers (raw ids 1000–9999), 10 observed days, household-like
// clusters of four plus random community mixing.
const DEMO_CONTACTS_CSV: &str = include_str!("../data/demo_contacts.csv");

// ── Progress observer ─────────────────────────────────────────────────────────

/// Prints a progress line every `every` trials and forwards to an optional
/// CSV observer.
struct Progress<W: OutputWriter> {
    output: Option<TrialOutputObserver<W>>,
    every:  usize,
    total:  usize,
    start:  Instant,
}

impl<W: OutputWriter> Progress<W> {
    fn new(output: Option<TrialOutputObserver<W>>, total: usize, quiet: bool) -> Self {
        let every = if quiet { 0 } else { (total / 10).max(1) };
        Self { output, every, total, start: Instant::now() }
    }
}

impl<W: OutputWriter> HarnessObserver for Progress<W> {
    fn on_experiment_start(&mut self, hypothesis: &str, experiment: &ExperimentConfig, population: usize) {
        if self.every > 0 {
            println!(
                "[{hypothesis}] {} trials x {} days, {population} agents, households of {}, seed {}",
                experiment.num_runs, experiment.num_days, experiment.household_size, experiment.seed,
            );
        }
        if let Some(out) = self.output.as_mut() {
            out.on_experiment_start(hypothesis, experiment, population);
        }
    }

    fn on_trial_end(&mut self, trial_index: usize, trial: &Trial) {
        let done = trial_index + 1;
        if self.every > 0 && (done % self.every == 0 || done == self.total) {
            println!("  {done:>5}/{} trials  ({:.1}s)", self.total, self.start.elapsed().as_secs_f64());
        }
        if let Some(out) = self.output.as_mut() {
            out.on_trial_end(trial_index, trial);
        }
    }

    fn on_experiment_end(&mut self, trials_run: usize) {
        if let Some(out) = self.output.as_mut() {
            out.on_experiment_end(trials_run);
        }
    }
}

// ── JSON report ───────────────────────────────────────────────────────────────

#[derive(Serialize, Default)]
struct ReportFile {
    contacts:     String,
    population:   usize,
    contact_days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    h1: Option<IsolationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    h2: Option<PeakTimingReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    h3: Option<OutbreakReport>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The study's own experiment settings with any command-line overrides.
fn experiment_for<H: Hypothesis>(hypothesis: &H, args: &Args) -> ExperimentConfig {
    let mut exp = hypothesis.default_experiment();
    if let Some(runs) = args.runs {
        exp.num_runs = runs;
    }
    if let Some(days) = args.days {
        exp.num_days = days;
    }
    if let Some(seed) = args.seed {
        exp.seed = seed;
    }
    if let Some(size) = args.household_size {
        exp.household_size = size;
    }
    if let Some(k) = args.initial_infected {
        exp.initial_infected = k;
    }
    exp
}

fn run_study<H: Hypothesis>(hypothesis: &H, args: &Args, contacts: &LoadedContacts) -> Result<H::Report> {
    let experiment = experiment_for(hypothesis, args);

    let output = match &args.output {
        Some(dir) => {
            let writer = CsvWriter::new(&dir.join(hypothesis.name()))?;
            let obs = TrialOutputObserver::new(writer);
            Some(if args.summaries_only { obs.summaries_only() } else { obs })
        }
        None => None,
    };
    let mut progress = Progress::new(output, experiment.num_runs, args.quiet);

    let report = MonteCarlo::new(experiment).run_with(hypothesis, &contacts.daily, &mut progress)?;

    if let Some(e) = progress.output.as_mut().and_then(TrialOutputObserver::take_error) {
        eprintln!("output error ({}): {e}", hypothesis.name());
    }
    println!("{report}");
    println!();
    Ok(report)
}

fn load_contacts(path: Option<&Path>) -> Result<(String, LoadedContacts)> {
    match path {
        Some(p) => Ok((p.display().to_string(), load_contacts_csv(p)?)),
        None => Ok(("bundled demo village".to_owned(), load_contacts_reader(Cursor::new(DEMO_CONTACTS_CSV))?)),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse_or_exit();

    let params = match &args.config {
        Some(path) => HypothesesFile::load(path)?,
        None => HypothesesFile::default(),
    };

    let t_load = Instant::now();
    let (source, contacts) = load_contacts(args.contacts.as_deref())?;
    println!("=== hypotheses — contact-network intervention studies ===");
    println!(
        "Contacts: {source}  |  {} agents, {} days, {} edges ({} self-contacts dropped)  |  {:.2}s",
        contacts.population(),
        contacts.daily.len(),
        contacts.daily.total_edges(),
        contacts.self_contacts_dropped,
        t_load.elapsed().as_secs_f64(),
    );
    println!();

    let mut report = ReportFile {
        contacts:     source,
        population:   contacts.population(),
        contact_days: contacts.daily.len(),
        ..Default::default()
    };

    let t0 = Instant::now();
    if args.selection.includes(Selection::H1) {
        report.h1 = Some(run_study(&params.h1, &args, &contacts)?);
    }
    if args.selection.includes(Selection::H2) {
        report.h2 = Some(run_study(&params.h2, &args, &contacts)?);
    }
    if args.selection.includes(Selection::H3) {
        report.h3 = Some(run_study(&params.h3, &args, &contacts)?);
    }
    println!("All studies complete in {:.2}s", t0.elapsed().as_secs_f64());

    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir)?;
        let path = dir.join("report.json");
        serde_json::to_writer_pretty(BufWriter::new(File::create(&path)?), &report)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
