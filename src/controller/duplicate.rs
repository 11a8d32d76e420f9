// File: duplicate.rs
// Description: Residues that act as a knob more than once

use crate::controller::knob::Knob;
use crate::controller::AnalysisSession;
use crate::error::{Result, SocketError};

/// Knobs sharing one residue
pub const MAX_DUPLICATE_KNOBS: usize = 3;

/// Group knob indices by residue. Only groups with two or more knobs are
/// returned, in order of their first knob.
pub fn group_duplicates(knobs: &[Knob], max_groups: usize) -> Result<Vec<Vec<usize>>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut grouped = vec![false; knobs.len()];
    for i in 0..knobs.len() {
        if grouped[i] {
            continue;
        }
        let mut group = vec![i];
        for j in i + 1..knobs.len() {
            if knobs[j].residue != knobs[i].residue {
                continue;
            }
            if group.len() == MAX_DUPLICATE_KNOBS {
                return Err(SocketError::CapacityExceeded { what: "knob duplicates", limit: MAX_DUPLICATE_KNOBS });
            }
            grouped[j] = true;
            group.push(j);
        }
        if group.len() > 1 {
            if groups.len() == max_groups {
                return Err(SocketError::CapacityExceeded { what: "duplicate knob sets", limit: max_groups });
            }
            groups.push(group);
        }
    }
    Ok(groups)
}

impl AnalysisSession {
    pub fn check_duplication(&mut self) -> Result<()> {
        let groups = group_duplicates(&self.knobs, self.config.limits.duplicates)?;
        if !groups.is_empty() {
            for group in &groups {
                let members: Vec<String> = group.iter().map(|k| format!("{:3}", k)).collect();
                self.say(&format!("duplicate knobs: {}", members.join(",")));
            }
            self.say("sets of duplicate knobs:");
            for (n, group) in groups.iter().enumerate() {
                let residue = self.knobs[group[0]].residue;
                let members: String = group.iter().map(|k| format!("{:3}", k)).collect();
                let line = format!("{:2}) {}\tare all residue {} ({})", n, members, residue, self.residue_text(residue));
                self.say(&line);
                self.verbosity.warn(&format!(
                    "residue {} ({}) is a knob {} times", residue, self.residue_text(residue), group.len()
                ));
            }
        }
        self.duplicates = groups;
        Ok(())
    }
}
