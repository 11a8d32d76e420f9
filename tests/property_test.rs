// Invariants checked over many pseudo-random inputs

use coildisco::controller::assembly::{resolve_subsets, CoiledCoil};
use coildisco::controller::contact::{ContactTable, MAX_CONTACTS};
use coildisco::controller::daisy::DaisyChain;
use coildisco::controller::knob::Knob;
use coildisco::controller::register::{tad_signature, Heptad, HEPTAD};
use coildisco::structure::coordinate::Coordinate;
use coildisco::utils::log::Verbosity;

mod common;
use common::builder::*;

/// Small linear congruential generator; keeps the inputs reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn unit(&mut self) -> f32 {
        (self.next() % 10_000) as f32 / 10_000.0
    }
}

#[test]
fn test_contacts_are_symmetric() {
    let len = 10;
    let mut rng = Lcg(7);
    for round in 0..20 {
        let mut structure = straight_helices("prp1", len, &[true, true, true]);
        for residue in structure.residues.iter_mut() {
            residue.descriptor.centroid = Some(Coordinate::new(
                25.0 * rng.unit(), 25.0 * rng.unit(), 25.0 * rng.unit(),
            ));
        }
        let mut table = ContactTable::new(structure.num_residues());
        for h1 in 0..3 {
            for h2 in h1 + 1..3 {
                table.measure_helix_pair(&structure, h1, h2, 7.0, Verbosity::Quiet);
            }
        }
        for r in 0..structure.num_residues() {
            let list = table.of(r);
            assert!(list.len() <= MAX_CONTACTS, "round {}", round);
            assert!(list.windows(2).all(|w| w[0].residue < w[1].residue), "round {}", round);
            for contact in list {
                assert!(contact.distance < 7.0);
                assert_ne!(structure.helix_of(r), structure.helix_of(contact.residue));
                if table.len_of(contact.residue) < MAX_CONTACTS {
                    assert!(table.of(contact.residue).iter().any(|c| c.residue == r), "round {}", round);
                }
            }
        }
    }
}

#[test]
fn test_subset_pointers_name_kept_candidates() {
    let mut rng = Lcg(11);
    for _ in 0..200 {
        // Distinct helix sets of size 2..=5 drawn from six helices
        let mut masks: Vec<u32> = Vec::new();
        let wanted = 2 + rng.below(8);
        while masks.len() < wanted {
            let mask = rng.below(64) as u32;
            if mask.count_ones() >= 2 && mask.count_ones() <= 5 && !masks.contains(&mask) {
                masks.push(mask);
            }
        }
        let mut candidates: Vec<CoiledCoil> = masks.iter()
            .map(|&m| CoiledCoil::new((0..6).filter(|h| m & (1 << h) != 0).collect(), 2))
            .collect();
        let mut owners: Vec<Option<usize>> = (0..candidates.len()).map(Some).collect();
        resolve_subsets(&mut candidates, &mut owners);

        for (i, candidate) in candidates.iter().enumerate() {
            match candidate.subset {
                Some(target) => {
                    assert_ne!(target, i);
                    assert!(candidates[target].subset.is_none());
                    assert!(candidate.is_subset_of(&candidates[target]));
                }
                None => {
                    for (k, other) in candidates.iter().enumerate() {
                        if k != i && other.subset.is_none() {
                            assert!(!candidate.is_subset_of(other));
                        }
                    }
                }
            }
        }
        for owner in owners.iter().flatten() {
            assert!(candidates[*owner].subset.is_none());
        }
    }
}

#[test]
fn test_order_only_rises() {
    let mut rng = Lcg(3);
    for _ in 0..50 {
        let mut knob = Knob::new(0, [1, 2, 3, 4], [5.0; 4]);
        let mut highest: Option<usize> = None;
        for _ in 0..20 {
            let order = 2 + rng.below(5);
            let raised = knob.raise_order(order);
            assert_eq!(raised, highest.map_or(true, |h| order > h));
            highest = Some(highest.map_or(order, |h| h.max(order)));
            assert_eq!(knob.order, highest);
        }
    }
}

#[test]
fn test_daisy_chain_ignores_starting_knob() {
    let mut rng = Lcg(5);
    for _ in 0..50 {
        let n = 3 + rng.below(5);
        let cycle: Vec<usize> = (0..n).map(|_| rng.below(1000)).collect();
        let first = DaisyChain::new(cycle.clone());
        let shift = rng.below(n);
        let rotated: Vec<usize> = cycle[shift..].iter().chain(&cycle[..shift]).copied().collect();
        assert_eq!(first, DaisyChain::new(rotated));
        assert!(first.knobs.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_tad_signature_counts_every_assigned_residue() {
    let mut rng = Lcg(13);
    for _ in 0..100 {
        let mut register: Vec<Option<Heptad>> = Vec::new();
        let mut current = HEPTAD[rng.below(7)];
        for _ in 0..40 {
            match rng.below(10) {
                0 => register.push(None),
                1 => {
                    current = HEPTAD[rng.below(7)];
                    register.push(Some(current));
                }
                _ => {
                    current = current.relative(1);
                    register.push(Some(current));
                }
            }
        }
        let (tads, interrupts) = tad_signature(&register);
        assert_eq!(tads.iter().sum::<usize>(), register.iter().flatten().count());
        assert!(tads.iter().all(|&t| (1..=7).contains(&t)));
        assert!(interrupts < tads.len().max(1));
    }
}

#[test]
fn test_dimer_registers_use_heptad_letters() {
    for len in 18..=26 {
        let structure = straight_helices("prp6", len, &[true, true]);
        let mut session = session_with_knobs(structure, dimer_knobs(len), quiet_config());
        session.check_complementarity().unwrap();
        assert_eq!(session.determine_order().unwrap(), 1);
        assert_eq!(session.find_register().unwrap(), 1);
        for helix in &session.register_blocks[0].helices {
            assert_eq!(helix.register.chars().count(), len);
            assert!(helix.register.chars().all(|c| c == ' ' || Heptad::from_char(c).is_some()), "length {}", len);
            let letters: Vec<Heptad> = helix.register.chars().filter_map(Heptad::from_char).collect();
            assert!(letters.windows(2).all(|w| w[0].relative(1) == w[1]), "length {}", len);
            assert_eq!(helix.interrupts, 0);
        }
    }
}
