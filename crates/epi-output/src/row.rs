//! Plain data row types written by output backends.

/// One scenario run of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialSummaryRow<'a> {
    pub hypothesis:      &'a str,
    pub trial:           usize,
    pub scenario:        &'a str,
    pub final_recovered: u32,
    pub peak_infectious: u32,
    pub peak_day:        u32,
    pub attack_rate:     f64,
    pub vaccinated:      u32,
}

/// Infectious count at the start of one day of one scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyInfectiousRow<'a> {
    pub hypothesis: &'a str,
    pub trial:      usize,
    pub scenario:   &'a str,
    pub day:        u32,
    pub infectious: u32,
}
