// File: core.rs
// Description: Pure geometric functions on coordinates and residue descriptors

use crate::structure::coordinate::Coordinate;
use crate::structure::descriptor::ResidueDescriptor;
use crate::utils::calculator::Calculate;

/// Euclidean distance between two points
#[inline]
pub fn distance(p: &Coordinate, q: &Coordinate) -> f32 {
    p.calc_distance(q)
}

/// Angle between two vectors in degrees. NaN if either vector has length 0.
pub fn vector_angle(a: &Coordinate, b: &Coordinate) -> f32 {
    let cos = a.dot(b) / (a.norm() * b.norm());
    // Rounding can push the cosine just outside [-1, 1]
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Centroid distance between two residues; a residue without a centroid is never in contact.
pub fn centroid_distance(a: &ResidueDescriptor, b: &ResidueDescriptor) -> Option<f32> {
    match (&a.centroid, &b.centroid) {
        (Some(p), Some(q)) => Some(distance(p, q)),
        _ => None,
    }
}

/// Angle between the knob's reference-to-CB vector and the vector from the second
/// to the first hole side. `None` if the knob has no CB.
pub fn packing_angle(knob: &ResidueDescriptor, hole1: &ResidueDescriptor, hole2: &ResidueDescriptor) -> Option<f32> {
    let cb = knob.side_chain?;
    Some(vector_angle(&cb.sub(&knob.reference), &hole1.reference.sub(&hole2.reference)))
}

/// Angle between the N-to-C reference-atom vectors of two helices.
pub fn helix_axis_angle(
    start1: &ResidueDescriptor, end1: &ResidueDescriptor,
    start2: &ResidueDescriptor, end2: &ResidueDescriptor,
) -> f32 {
    vector_angle(&end1.reference.sub(&start1.reference), &end2.reference.sub(&start2.reference))
}

/// Mean distance from the knob's side-chain end to the reference atoms of its hole
pub fn mean_insertion_distance(knob: &ResidueDescriptor, hole: &[&ResidueDescriptor]) -> f32 {
    let sum: f32 = hole.iter().map(|h| distance(&knob.terminal, &h.reference)).sum();
    sum / hole.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(reference: [f32; 3], cb: Option<[f32; 3]>) -> ResidueDescriptor {
        ResidueDescriptor {
            reference: Coordinate::new(reference[0], reference[1], reference[2]),
            side_chain: cb.map(|c| Coordinate::new(c[0], c[1], c[2])),
            ..Default::default()
        }
    }

    #[test]
    fn test_distance_symmetry() {
        let p = Coordinate::new(1.0, -2.0, 3.5);
        let q = Coordinate::new(-4.0, 0.5, 2.0);
        assert_eq!(distance(&p, &q), distance(&q, &p));
        assert_eq!(distance(&p, &p), 0.0);
    }

    #[test]
    fn test_vector_angle() {
        let x = Coordinate::new(2.0, 0.0, 0.0);
        let y = Coordinate::new(0.0, 3.0, 0.0);
        assert!((vector_angle(&x, &y) - 90.0).abs() < 1e-4);
        assert!(vector_angle(&x, &x).abs() < 1e-3);
        assert!((vector_angle(&x, &x.scale(-1.0)) - 180.0).abs() < 1e-3);
        assert!(vector_angle(&x, &Coordinate::default()).is_nan());
    }

    #[test]
    fn test_centroid_distance_null() {
        let mut a = descriptor([0.0; 3], None);
        let mut b = descriptor([0.0; 3], None);
        assert_eq!(centroid_distance(&a, &b), None);
        a.centroid = Some(Coordinate::new(0.0, 0.0, 0.0));
        assert_eq!(centroid_distance(&a, &b), None);
        b.centroid = Some(Coordinate::new(0.0, 3.0, 4.0));
        assert_eq!(centroid_distance(&a, &b), Some(5.0));
    }

    #[test]
    fn test_packing_angle() {
        let knob = descriptor([0.0, 0.0, 0.0], Some([1.0, 0.0, 0.0]));
        let hole1 = descriptor([5.0, 1.0, 0.0], None);
        let hole2 = descriptor([5.0, 0.0, 0.0], None);
        let angle = packing_angle(&knob, &hole1, &hole2).unwrap();
        assert!((angle - 90.0).abs() < 1e-4);
        assert!(packing_angle(&hole1, &knob, &hole2).is_none());
    }

    #[test]
    fn test_helix_axis_angle() {
        let s1 = descriptor([0.0, 0.0, 0.0], None);
        let e1 = descriptor([0.0, 0.0, 10.0], None);
        let s2 = descriptor([5.0, 0.0, 10.0], None);
        let e2 = descriptor([5.0, 0.0, 0.0], None);
        assert!((helix_axis_angle(&s1, &e1, &s2, &e2) - 180.0).abs() < 1e-3);
        assert!(helix_axis_angle(&s1, &e1, &e2, &s2).abs() < 1e-3);
    }
}
