//! Unit tests for apron-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AircraftId, GateId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn narrow_ids_reject_overflow() {
        assert!(GateId::try_from(70_000usize).is_err());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AircraftId::INVALID.0, u32::MAX);
        assert_eq!(GateId::INVALID.0, u16::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AircraftId(7).to_string(), "AircraftId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(37.615, -122.390);
        assert!(p.distance_m(p) < 0.01);
        assert!(p.is_close_to(p, 0.0));
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(37.0, -122.0);
        let b = GeoPoint::new(38.0, -122.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn lerp_midpoint_and_clamp() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.002);
        let mid = a.lerp(b, 0.5);
        assert!((mid.lon - 0.001).abs() < 1e-7);
        assert_eq!(a.lerp(b, 2.0), b);
    }

    #[test]
    fn tolerance_is_inclusive_of_nearby_points() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.0001); // ~11 m
        assert!(a.is_close_to(b, 15.0));
        assert!(!a.is_close_to(b, 5.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{ClockStep, SimClock, SimTime};

    #[test]
    fn sim_time_arithmetic_and_display() {
        let t = SimTime::from_hms(6, 5, 3);
        assert_eq!(t.0, 6 * 3600 + 5 * 60 + 3);
        assert_eq!(t + 57, SimTime::from_hms(6, 6, 0));
        assert_eq!(t.to_string(), "06:05:03");
        assert_eq!(SimTime(10).since(SimTime(20)), 0);
    }

    #[test]
    fn clock_advances_by_tick_duration() {
        let mut clock = SimClock::new(SimTime(0), 30, SimTime(100));
        assert_eq!(clock.now(), SimTime(0));
        assert_eq!(clock.tick_duration(), 30);
        assert_eq!(clock.advance(), ClockStep::Advanced(SimTime(30)));
        assert_eq!(clock.now(), SimTime(30));
        assert_eq!(clock.next_tick_time(), SimTime(60));
    }

    #[test]
    fn clock_stops_at_horizon() {
        let mut clock = SimClock::new(SimTime(0), 30, SimTime(60));
        assert_eq!(clock.advance(), ClockStep::Advanced(SimTime(30)));
        assert_eq!(clock.advance(), ClockStep::Advanced(SimTime(60)));
        assert_eq!(clock.advance(), ClockStep::EndOfDay);
        // Refused steps leave time untouched.
        assert_eq!(clock.now(), SimTime(60));
        assert_eq!(clock.advance(), ClockStep::EndOfDay);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn clone_continues_identically() {
        let mut a = SimRng::for_stream(7, 3);
        a.unit();
        let mut b = a.clone();
        assert_eq!(a.unit(), b.unit());
    }

    #[test]
    fn streams_differ() {
        let mut a = SimRng::for_stream(7, 1);
        let mut b = SimRng::for_stream(7, 2);
        let xs: Vec<f64> = (0..4).map(|_| a.unit()).collect();
        let ys: Vec<f64> = (0..4).map(|_| b.unit()).collect();
        assert_ne!(xs, ys);
    }
}

#[cfg(test)]
mod config {
    use crate::{SimConfig, SimTime};

    #[test]
    fn default_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_tick_rejected() {
        let cfg = SimConfig { tick_duration_secs: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_horizon_rejected() {
        let cfg = SimConfig { start: SimTime(100), end: SimTime(100), ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let mut cfg = SimConfig::default();
        cfg.uncertainty.prob_hold = 1.5;
        assert!(cfg.validate().is_err());
        cfg.uncertainty.prob_hold = 1.0;
        cfg.uncertainty.speed_bias_sigma = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn make_clock_uses_bounds() {
        let cfg = SimConfig {
            start: SimTime(60),
            end: SimTime(600),
            tick_duration_secs: 15,
            ..SimConfig::default()
        };
        let clock = cfg.make_clock();
        assert_eq!(clock.now(), SimTime(60));
        assert_eq!(clock.horizon(), SimTime(600));
        assert_eq!(clock.tick_duration(), 15);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SimConfig = serde_json::from_str(
            r#"{ "tick_duration_secs": 10, "uncertainty": { "enabled": true, "prob_hold": 0.2 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.tick_duration_secs, 10);
        assert!(cfg.uncertainty.enabled);
        assert_eq!(cfg.uncertainty.prob_hold, 0.2);
        assert_eq!(cfg.scheduler, "fcfs");
        cfg.validate().unwrap();
    }
}
