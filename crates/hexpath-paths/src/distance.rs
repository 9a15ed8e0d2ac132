use hexpath_core::Hex;

/// Hex distance between two axial coordinates: the number of steps on an
/// unobstructed grid.
///
/// Admissible and consistent as an A* heuristic whenever every step costs
/// at least 1.
#[inline]
pub fn hex_distance(a: Hex, b: Hex) -> i32 {
    (a.q - b.q)
        .abs()
        .max((a.r - b.r).abs())
        .max((a.q + a.r - b.q - b.r).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_hex_distance_method() {
        for q in -3..=3 {
            for r in -3..=3 {
                let a = Hex::new(q, r);
                let b = Hex::new(2, -1);
                assert_eq!(hex_distance(a, b), a.distance(b));
            }
        }
    }

    #[test]
    fn reference_corners() {
        assert_eq!(hex_distance(Hex::new(0, 0), Hex::new(5, 6)), 11);
        assert_eq!(hex_distance(Hex::new(7, 0), Hex::new(0, 6)), 7);
    }
}
