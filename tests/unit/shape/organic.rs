use super::*;

#[test]
fn hash_is_in_unit_interval_and_repeatable() {
    for i in 0..64 {
        for seed in [0.0, 0.123, 0.5, 0.999, 42.0] {
            let a = organic_hash(f64::from(i), seed);
            let b = organic_hash(f64::from(i), seed);
            assert_eq!(a.to_bits(), b.to_bits());
            assert!((0.0..1.0).contains(&a), "hash({i}, {seed}) = {a}");
        }
    }
}

#[test]
fn hash_matches_reference_formula() {
    let v = (3.0f64 * 12.9898 + 0.25 * 78.233).sin() * 43758.5453;
    assert_eq!(organic_hash(3.0, 0.25).to_bits(), (v - v.floor()).to_bits());
}

#[test]
fn multipliers_stay_in_jitter_band() {
    for i in 0..100 {
        let m = radius_multiplier(i, 0.7182);
        assert!((0.85..=1.15).contains(&m));
    }
}

#[test]
fn segments_are_bit_identical_across_calls() {
    let center = Point::new(100.0, 80.0);
    for (seed, complexity) in [(0.0, 3), (0.31, 8), (0.77, 17), (12.5, 40)] {
        let (s1, a) = organic_segments(center, 76.0, seed, complexity);
        let (s2, b) = organic_segments(center, 76.0, seed, complexity);
        assert_eq!(s1, s2);
        assert_eq!(a.len(), complexity as usize);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.ctrl1.x.to_bits(), y.ctrl1.x.to_bits());
            assert_eq!(x.ctrl1.y.to_bits(), y.ctrl1.y.to_bits());
            assert_eq!(x.ctrl2.x.to_bits(), y.ctrl2.x.to_bits());
            assert_eq!(x.ctrl2.y.to_bits(), y.ctrl2.y.to_bits());
            assert_eq!(x.to.x.to_bits(), y.to.x.to_bits());
            assert_eq!(x.to.y.to_bits(), y.to.y.to_bits());
        }
    }
}

#[test]
fn different_seeds_change_the_outline() {
    let c = Point::new(0.0, 0.0);
    let (_, a) = organic_segments(c, 50.0, 0.1, 8);
    let (_, b) = organic_segments(c, 50.0, 0.2, 8);
    assert_ne!(a, b);
}

#[test]
fn end_points_sit_on_perturbed_radii() {
    let c = Point::new(10.0, 20.0);
    let (start, segs) = organic_segments(c, 40.0, 0.5, 6);
    assert_eq!(start, Point::new(50.0, 20.0));
    for (i, s) in segs.iter().enumerate() {
        let expected = 40.0 * radius_multiplier(i as u32 + 1, 0.5);
        assert!((s.to.distance(c) - expected).abs() < 1e-9);
    }
}

#[test]
fn path_is_closed_loop() {
    let p = organic_path(Point::new(0.0, 0.0), 10.0, 0.3, 5);
    assert!(matches!(p.elements().last(), Some(kurbo::PathEl::ClosePath)));
    assert_eq!(p.elements().len(), 1 + 5 + 1);
}
