// File: result.rs
// Description: Outcome of an analysis and the one-line verdict printed for it

use crate::controller::AnalysisSession;

/// Counts reported at the end of an analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// Candidate helix groups, including ignored pairs and subsets
    pub candidates: usize,
    pub coiled_coils: usize,
    /// Non-canonical heptad interrupts over all coiled coils
    pub interrupts: usize,
}

impl AnalysisOutcome {
    pub fn has_coiled_coils(&self) -> bool {
        self.coiled_coils > 0
    }
}

pub fn result_line(code: &str, cutoff: f32, extend: usize, outcome: &AnalysisOutcome) -> String {
    let prefix = format!("{} c {:5.2} e {} result", code, cutoff, extend);
    if outcome.coiled_coils > 0 {
        let mut line = format!("{} {} COILED COILS PRESENT", prefix, outcome.coiled_coils);
        if outcome.candidates > outcome.coiled_coils {
            line.push_str(&format!(
                " (+ {} helix groups are either pairs with too few complementary knob in hole interactions or are subsets of larger coiled coils)",
                outcome.candidates - outcome.coiled_coils
            ));
        }
        line
    } else if outcome.candidates > 0 {
        format!(
            "{} NO COILED COILS (but {} helix pairs have a single complementary knob in hole interaction)",
            prefix, outcome.candidates
        )
    } else {
        format!("{} NO COILED COILS", prefix)
    }
}

impl AnalysisSession {
    pub fn result_line(&self, outcome: &AnalysisOutcome) -> String {
        result_line(&self.structure.code, self.config.packing_cutoff, self.config.extend, outcome)
    }
}
