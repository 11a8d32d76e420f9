/// Distance between points; implemented by `Coordinate`.
pub trait Calculate {
    fn calc_distance(&self, other: &Self) -> f32;
}
