use std::io::Cursor;
use std::path::PathBuf;

use epi_contact::load_contacts_reader;
use epi_core::ProgressionTiming;
use epi_harness::{Hypothesis, MonteCarlo};

use crate::args::{Args, Selection};
use crate::config::HypothesesFile;
use crate::{DEMO_CONTACTS_CSV, experiment_for};

#[cfg(test)]
mod args_tests {
    use super::*;

    #[test]
    fn defaults() {
        let a = Args::parse_from(Vec::<String>::new()).unwrap();
        assert_eq!(a, Args::default());
        assert_eq!(a.selection, Selection::All);
    }

    #[test]
    fn all_flags() {
        let a = Args::parse_from([
            "--contacts", "log.csv",
            "--hypothesis", "H2",
            "--runs", "10",
            "--days", "30",
            "--seed", "7",
            "--household-size", "3",
            "--initial-infected", "1",
            "--output", "out",
            "--summaries-only",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(a.contacts, Some(PathBuf::from("log.csv")));
        assert_eq!(a.selection, Selection::H2);
        assert_eq!((a.runs, a.days, a.seed), (Some(10), Some(30), Some(7)));
        assert_eq!((a.household_size, a.initial_infected), (Some(3), Some(1)));
        assert_eq!(a.output, Some(PathBuf::from("out")));
        assert!(a.summaries_only && a.quiet && !a.help);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::parse_from(["--runs", "0"]).is_err());
        assert!(Args::parse_from(["--runs"]).is_err());
        assert!(Args::parse_from(["--seed", "-1"]).is_err());
        assert!(Args::parse_from(["--hypothesis", "h4"]).is_err());
        assert!(Args::parse_from(["--household-size", "0"]).is_err());
        assert!(Args::parse_from(["--frobnicate"]).is_err());
    }

    #[test]
    fn selection_includes() {
        assert!(Selection::All.includes(Selection::H3));
        assert!(Selection::H1.includes(Selection::H1));
        assert!(!Selection::H1.includes(Selection::H2));
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let f: HypothesesFile = serde_json::from_str(
            r#"{ "h2": { "contact_reduction": 0.5 }, "h3": { "disease": { "progression": "same_day" } } }"#,
        )
        .unwrap();
        assert_eq!(f.h1, Default::default());
        assert_eq!(f.h2.contact_reduction, 0.5);
        assert_eq!(f.h2.min_attack, 0.2);
        assert_eq!(f.h2.disease.infection_prob, 0.08);
        assert_eq!(f.h3.disease.progression, ProgressionTiming::SameDay);
        assert_eq!(f.h3.vaccination_coverage, 0.30);
    }

    #[test]
    fn unknown_study_rejected() {
        assert!(serde_json::from_str::<HypothesesFile>(r#"{ "h4": {} }"#).is_err());
    }
}

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_study_defaults() {
        let params = HypothesesFile::default();
        let args = Args { runs: Some(5), seed: Some(1), ..Args::default() };
        let exp = experiment_for(&params.h3, &args);
        assert_eq!((exp.num_runs, exp.seed, exp.num_days), (5, 1, 120));

        let exp = experiment_for(&params.h2, &Args::default());
        assert_eq!((exp.num_runs, exp.seed), (200, 123));
    }

    #[test]
    fn bundled_village_loads() {
        let loaded = load_contacts_reader(Cursor::new(DEMO_CONTACTS_CSV)).unwrap();
        assert_eq!(loaded.population(), 60);
        assert_eq!(loaded.daily.len(), 10);
        assert_eq!(loaded.self_contacts_dropped, 0);
    }

    #[test]
    fn bundled_village_runs_every_study() {
        let loaded = load_contacts_reader(Cursor::new(DEMO_CONTACTS_CSV)).unwrap();
        let params = HypothesesFile::default();
        let args = Args { runs: Some(4), days: Some(15), ..Args::default() };

        let r1 = MonteCarlo::new(experiment_for(&params.h1, &args)).run(&params.h1, &loaded.daily).unwrap();
        assert_eq!(r1.trials, 4);
        let r2 = MonteCarlo::new(experiment_for(&params.h2, &args)).run(&params.h2, &loaded.daily).unwrap();
        assert!(r2.retained_runs <= 4);
        let r3 = MonteCarlo::new(experiment_for(&params.h3, &args)).run(&params.h3, &loaded.daily).unwrap();
        assert!((0.0..=1.0).contains(&r3.p_large_no_vax));
    }
}
