use geo::{Distance, Haversine};

use crate::travel_matrices::TravelMatrices;

/// Great-circle distances between every pair of points, with travel times
/// derived from a constant speed.
pub fn as_the_crow_flies_matrices<P>(points: &[P], speed_kmh: f64) -> TravelMatrices
where
    for<'a> &'a P: Into<geo_types::Point>,
{
    let num_points = points.len();
    let points: Vec<geo_types::Point> = points.iter().map(|point| point.into()).collect();
    let speed = speed_kmh / 3.6;

    let mut distances = Vec::with_capacity(num_points * num_points);
    let mut times = Vec::with_capacity(num_points * num_points);

    for from in &points {
        for to in &points {
            let distance = Haversine.distance(*from, *to);
            distances.push(Some(distance));
            times.push(if speed > 0.0 {
                Some(distance / speed)
            } else {
                None
            });
        }
    }

    TravelMatrices { distances, times }
}
