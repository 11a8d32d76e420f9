use crate::utils::calculator::Calculate;

// Ideal C-alpha to C-beta bond length
pub const CA_CB_DIST: f32 = 1.5336;
// Fixed C-alpha to pseudo C-beta offset used when N or C is missing
pub const PSEUDO_CB_OFFSET: Coordinate = Coordinate { x: 1.126, y: 0.872, z: 0.512 };

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Coordinate {
    pub fn new(x: f32, y: f32, z: f32) -> Coordinate {
        Coordinate { x, y, z }
    }
    pub fn add(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
    pub fn sub(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
    pub fn dot(&self, other: &Coordinate) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    pub fn cross(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
    pub fn norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
    pub fn normalize(&self) -> Coordinate {
        let norm = self.norm();
        Coordinate {
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
        }
    }
    pub fn scale(&self, factor: f32) -> Coordinate {
        Coordinate {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
    pub fn distance(&self, other: &Coordinate) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Arithmetic mean of a set of points; `None` for an empty set.
    pub fn mean<'a, I: IntoIterator<Item = &'a Coordinate>>(points: I) -> Option<Coordinate> {
        let mut sum = Coordinate::default();
        let mut count = 0usize;
        for point in points {
            sum = sum.add(point);
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum.scale(1.0 / count as f32))
        }
    }
}

impl Calculate for Coordinate {
    fn calc_distance(&self, other: &Coordinate) -> f32 {
        self.distance(other)
    }
}

// Originally from foldseek StructureTo3DiBase::approxCBetaPosition
// link: https://github.com/steineggerlab/foldseek/blob/master/lib/3di/structureto3di.cpp
pub fn approx_cb(ca: &Coordinate, n: &Coordinate, c: &Coordinate) -> Coordinate {
    // Assumption: CA forms with its four ligands a tetrahedral.
    let v1 = c.sub(ca).normalize();
    let v2 = n.sub(ca).normalize();

    let b1 = v2.add(&v1.scale(1.0 / 3.0));
    let b2 = v1.cross(&b1);

    let u1 = b1.normalize();
    let u2 = b2.normalize();

    //direction from c_alpha to c_beta
    let v4 = u1.scale(-1.0 / 2.0).sub(&u2.scale(3.0f32.sqrt() / 2.0));
    let v4 = v4.scale(8.0f32.sqrt() / 3.0);
    let v4 = v4.add(&v1.scale(-1.0 / 3.0));

    ca.add(&v4.scale(CA_CB_DIST))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_arithmetic() {
        let a = Coordinate::new(1.0, 2.0, 3.0);
        let b = Coordinate::new(4.0, 6.0, 3.0);
        assert_eq!(a.add(&b), Coordinate::new(5.0, 8.0, 6.0));
        assert_eq!(b.sub(&a), Coordinate::new(3.0, 4.0, 0.0));
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.calc_distance(&b), b.calc_distance(&a));
        let mean = Coordinate::mean([a, b].iter()).unwrap();
        assert_eq!(mean, Coordinate::new(2.5, 4.0, 3.0));
        assert!(Coordinate::mean(std::iter::empty()).is_none());
    }

    #[test]
    fn test_approx_cb() {
        // Backbone of an alanine
        let n = Coordinate::new(-1.458, 0.0, 0.0);
        let ca = Coordinate::new(0.0, 0.0, 0.0);
        let c = Coordinate::new(0.551, 1.420, 0.0);
        let cb = approx_cb(&ca, &n, &c);
        assert!((cb.distance(&ca) - CA_CB_DIST).abs() < 1e-3);
        assert!(cb.distance(&n) > 2.0 && cb.distance(&c) > 2.0);
    }
}
