//! Command-line flags.

use std::path::PathBuf;

const USAGE: &str = "\
hypotheses — Monte Carlo intervention studies on an empirical contact network

USAGE:
  cargo run --release -p hypotheses -- [FLAGS]

FLAGS:
  --contacts PATH         Contact log CSV (columns day,id1,id2; others ignored).
                          Default: the bundled 60-person demo village.
  --hypothesis NAME       h1 | h2 | h3 | all (default: all)
  --config PATH           JSON file with per-study parameters (keys h1, h2, h3)
  --runs N                Trials per study (default: the study's own)
  --days N                Days per synthetic timeline (default: 120)
  --seed U64              Root seed (default: the study's own)
  --household-size N      Agents per household (default: 4)
  --initial-infected N    Seeded infections per scenario (default: 3)
  --output DIR            Write trial_summaries.csv, daily_infectious.csv per
                          study and report.json into DIR
  --summaries-only        With --output, skip daily_infectious.csv
  --quiet                 Only print the final reports
  --help                  Show this help
";

/// Which studies to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    H1,
    H2,
    H3,
    All,
}

impl Selection {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "h1" | "isolation" => Some(Self::H1),
            "h2" | "contact" | "contact_reduction" => Some(Self::H2),
            "h3" | "vaccination" => Some(Self::H3),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn includes(self, other: Selection) -> bool {
        self == Selection::All || self == other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub contacts:         Option<PathBuf>,
    pub selection:        Selection,
    pub config:           Option<PathBuf>,
    pub runs:             Option<usize>,
    pub days:             Option<usize>,
    pub seed:             Option<u64>,
    pub household_size:   Option<usize>,
    pub initial_infected: Option<usize>,
    pub output:           Option<PathBuf>,
    pub summaries_only:   bool,
    pub quiet:            bool,
    pub help:             bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            contacts:         None,
            selection:        Selection::All,
            config:           None,
            runs:             None,
            days:             None,
            seed:             None,
            household_size:   None,
            initial_infected: None,
            output:           None,
            summaries_only:   false,
            quiet:            false,
            help:             false,
        }
    }
}

impl Args {
    pub fn parse_or_exit() -> Self {
        match Self::parse_from(std::env::args().skip(1)) {
            Ok(a) if a.help => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            Ok(a) => a,
            Err(e) => {
                eprintln!("{e}\n\n{USAGE}");
                std::process::exit(2);
            }
        }
    }

    /// Parse flags (without the program name).
    pub fn parse_from<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Args::default();
        let mut it = args.into_iter().map(|s| s.as_ref().to_owned());

        while let Some(arg) = it.next() {
            let mut value = |flag: &str| it.next().ok_or_else(|| format!("Missing value for {flag}"));
            match arg.as_str() {
                "--help" | "-h" => out.help = true,
                "--quiet" => out.quiet = true,
                "--summaries-only" => out.summaries_only = true,
                "--contacts" => out.contacts = Some(PathBuf::from(value("--contacts")?)),
                "--config" => out.config = Some(PathBuf::from(value("--config")?)),
                "--output" => out.output = Some(PathBuf::from(value("--output")?)),
                "--hypothesis" => {
                    let v = value("--hypothesis")?;
                    out.selection = Selection::parse(&v)
                        .ok_or_else(|| format!("Invalid --hypothesis {v:?}. Expected: h1 | h2 | h3 | all"))?;
                }
                "--runs" => {
                    let n = parse_count("--runs", &value("--runs")?)?;
                    if n == 0 {
                        return Err("--runs must be >= 1".to_string());
                    }
                    out.runs = Some(n);
                }
                "--days" => out.days = Some(parse_count("--days", &value("--days")?)?),
                "--seed" => {
                    let v = value("--seed")?;
                    out.seed = Some(v.parse::<u64>().map_err(|_| "Invalid --seed (expected u64)".to_string())?);
                }
                "--household-size" => {
                    let n = parse_count("--household-size", &value("--household-size")?)?;
                    if n == 0 {
                        return Err("--household-size must be >= 1".to_string());
                    }
                    out.household_size = Some(n);
                }
                "--initial-infected" => {
                    out.initial_infected = Some(parse_count("--initial-infected", &value("--initial-infected")?)?);
                }
                other => return Err(format!("Unknown argument: {other}")),
            }
        }
        Ok(out)
    }
}

fn parse_count(flag: &str, v: &str) -> Result<usize, String> {
    v.parse::<usize>().map_err(|_| format!("Invalid {flag} (expected integer)"))
}
