//! JSON parameter file.
//!
//! ```json
//! {
//!   "h1": { "disease": { "infection_prob": 0.05 } },
//!   "h2": { "contact_reduction": 0.5, "min_attack": 0.1 },
//!   "h3": { "vaccination_coverage": 0.4, "disease": { "progression": "same_day" } }
//! }
//! ```
//!
//! Every key is optional; missing values keep the study defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use epi_harness::{ContactReduction, IsolationComparison, VaccinationOutbreak};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HypothesesFile {
    pub h1: IsolationComparison,
    pub h2: ContactReduction,
    pub h3: VaccinationOutbreak,
}

impl HypothesesFile {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))
    }
}
