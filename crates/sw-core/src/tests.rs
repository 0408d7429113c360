//! Unit tests for sw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId, VertexId, WayId};

    #[test]
    fn index_roundtrip() {
        let id = VertexId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VertexId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(VertexId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(VertexId(7).to_string(), "VertexId(7)");
        assert_eq!(WayId(-3).to_string(), "WayId(-3)");
        assert_eq!(NodeId::from(12_345).to_string(), "NodeId(12345)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoBounds, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(40.7128, -74.0060);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let b = GeoPoint::new(40.7306, -73.9352);
        assert_eq!(a.distance_m(b), b.distance_m(a));
    }

    #[test]
    fn cardinal_bearings() {
        let o = GeoPoint::new(0.0, 0.0);
        assert!(o.bearing_to(GeoPoint::new(1.0, 0.0)).abs() < 1e-9);
        assert!((o.bearing_to(GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((o.bearing_to(GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((o.bearing_to(GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn destination_matches_distance_and_bearing() {
        let start = GeoPoint::new(40.7128, -74.0060);
        let end = start.destination(63.0, 1_500.0);
        assert!((start.distance_m(end) - 1_500.0).abs() < 0.01);
        assert!((start.bearing_to(end) - 63.0).abs() < 0.01);
    }

    #[test]
    fn destination_wraps_antimeridian() {
        let p = GeoPoint::new(0.0, 179.999).destination(90.0, 1_000.0);
        assert!(p.lon < -179.99 && p.lon >= -180.0, "got {p}");
    }

    #[test]
    fn bounds_cover_radius() {
        let center = GeoPoint::new(40.7128, -74.0060);
        let b = GeoBounds::around(center, 1.0);
        for bearing in [0.0, 90.0, 180.0, 270.0] {
            let edge = center.destination(bearing, 990.0);
            assert!(b.contains(edge), "bearing {bearing} escaped {b:?}");
        }
        assert!(!b.contains(center.destination(0.0, 2_000.0)));
    }

    #[test]
    fn unit_vector_is_normalised() {
        let v = GeoPoint::new(51.5, -0.12).to_unit_vector();
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod angles {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{angular_difference, bearing, normalize_bearing, GeoPoint};

    #[test]
    fn difference_wraps_through_north() {
        assert_eq!(angular_difference(350.0, 10.0), 20.0);
        assert_eq!(angular_difference(10.0, 350.0), -20.0);
        assert_eq!(angular_difference(90.0, 90.0), 0.0);
        assert_eq!(angular_difference(0.0, 180.0).abs(), 180.0);
    }

    #[test]
    fn normalize_handles_negative_and_large() {
        assert_eq!(normalize_bearing(-45.0), 315.0);
        assert_eq!(normalize_bearing(720.0), 0.0);
        assert_eq!(normalize_bearing(359.5), 359.5);
    }

    #[test]
    fn ranges_hold_for_random_inputs() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let a = GeoPoint::new(rng.gen_range(-89.9..89.9), rng.gen_range(-180.0..180.0));
            let b = GeoPoint::new(rng.gen_range(-89.9..89.9), rng.gen_range(-180.0..180.0));
            let brg = bearing(a, b);
            assert!((0.0..360.0).contains(&brg), "bearing {brg}");

            let x: f64 = rng.gen_range(-1_000.0..1_000.0);
            let y: f64 = rng.gen_range(-1_000.0..1_000.0);
            let d = angular_difference(x, y);
            assert!((-180.0..=180.0).contains(&d), "difference {d}");
            assert!((0.0..360.0).contains(&normalize_bearing(x)));
        }
    }
}

#[cfg(test)]
mod compass {
    use crate::CompassPoint;

    #[test]
    fn sectors() {
        assert_eq!(CompassPoint::from_bearing(0.0), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(22.4), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(22.5), CompassPoint::Northeast);
        assert_eq!(CompassPoint::from_bearing(180.0), CompassPoint::South);
        assert_eq!(CompassPoint::from_bearing(350.0), CompassPoint::North);
        assert_eq!(CompassPoint::from_bearing(-90.0), CompassPoint::West);
    }

    #[test]
    fn display_name() {
        assert_eq!(CompassPoint::Southwest.to_string(), "Southwest");
    }
}

#[cfg(test)]
mod parse {
    use crate::{CoreError, GeoPoint};

    #[test]
    fn accepts_lat_lon_pair() {
        let p: GeoPoint = " 29.333 , 21.44 ".parse().unwrap();
        assert_eq!(p, GeoPoint::new(29.333, 21.44));
        let q: GeoPoint = "-29.777,-82.444".parse().unwrap();
        assert_eq!(q, GeoPoint::new(-29.777, -82.444));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(matches!("29.3".parse::<GeoPoint>(), Err(CoreError::Parse(_))));
        assert!(matches!("1,2,3".parse::<GeoPoint>(), Err(CoreError::Parse(_))));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(matches!("north,2".parse::<GeoPoint>(), Err(CoreError::Parse(_))));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            "91,0".parse::<GeoPoint>(),
            Err(CoreError::InvalidCoordinate { lat: 91.0, lon: 0.0 })
        );
        assert!("0,-181".parse::<GeoPoint>().is_err());
    }
}
