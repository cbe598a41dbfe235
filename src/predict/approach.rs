use crate::predict::{ClosestApproach, TrajectorySample};

/// Index-aligned minimum separation search.
///
/// Only the first `min(a.len(), b.len())` pairs are compared; the earliest
/// index wins ties. Returns `None` when either side is empty.
pub fn nearest_approach(a: &[TrajectorySample], b: &[TrajectorySample]) -> Option<ClosestApproach> {
    let mut best: Option<(usize, f64)> = None;

    for (i, (sa, sb)) in a.iter().zip(b).enumerate() {
        let d = distance_km(sa.position_km, sb.position_km);
        match best {
            Some((_, min)) if d >= min => {}
            _ => best = Some((i, d)),
        }
    }

    best.map(|(i, d)| ClosestApproach {
        min_distance_km: d,
        at_time: a[i].timestamp,
        sample_index: i,
        satellite_position: a[i].position_km,
        debris_position: b[i].position_km,
    })
}

fn distance_km(p: [f64; 3], q: [f64; 3]) -> f64 {
    let dx = p[0] - q[0];
    let dy = p[1] - q[1];
    let dz = p[2] - q[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
