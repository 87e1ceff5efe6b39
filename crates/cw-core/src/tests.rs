//! Unit tests for cw-core primitives.

#[cfg(test)]
mod ids_tests {
    use crate::VehicleId;

    #[test]
    fn equal_names_are_equal_ids() {
        assert_eq!(VehicleId::new("car-1"), VehicleId::from("car-1"));
        assert_eq!(VehicleId::from(String::from("car-1")), VehicleId::new("car-1"));
        assert_ne!(VehicleId::new("car-1"), VehicleId::new("car-2"));
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId::new("A").to_string(), "A");
        assert_eq!(VehicleId::new("truck").as_str(), "truck");
    }
}

#[cfg(test)]
mod pos_tests {
    use crate::{Cell, Pos};

    #[test]
    fn pos_cell_conversion() {
        assert_eq!(Pos::new(1, 1).cell(), Cell::new(0, 0));
        assert_eq!(Pos::new(3, 2).cell(), Cell::new(2, 1));
        assert_eq!(Cell::new(2, 1).pos(), Pos::new(3, 2));
    }

    #[test]
    fn off_road_is_past_last_segment() {
        assert!(!Pos::new(2, 1).is_off_road(2));
        assert!(Pos::new(3, 1).is_off_road(2));
    }

    #[test]
    fn display() {
        assert_eq!(Pos::new(2, 3).to_string(), "(2, 3)");
        assert_eq!(Cell::new(1, 2).to_string(), "[1][2]");
    }
}

#[cfg(test)]
mod time_tests {
    use crate::{RoadClock, Ticks};

    #[test]
    fn decrement_floors_at_zero() {
        let mut t = Ticks(2);
        assert!(t.decrement());
        assert_eq!(t, Ticks(1));
        assert!(t.decrement());
        assert!(t.is_zero());
        assert!(!t.decrement());
        assert_eq!(t, Ticks::ZERO);
    }

    #[test]
    fn clock_advances() {
        let mut clock = RoadClock::default();
        let start = clock;
        clock.advance();
        clock.advance();
        assert_eq!(clock, RoadClock(2));
        assert_eq!(clock.since(start), 2);
        assert_eq!(start.since(clock), 0);
        assert_eq!(clock.to_string(), "T2");
    }
}

#[cfg(test)]
mod op_tests {
    use crate::OpKind;

    #[test]
    fn precedence_ranks_match_order() {
        for (i, kind) in OpKind::PRECEDENCE.iter().enumerate() {
            assert_eq!(kind.rank(), i, "{kind}");
        }
    }

    #[test]
    fn exit_is_the_only_non_deferrable_kind() {
        assert!(!OpKind::Exit.is_deferrable());
        assert!(OpKind::DEFERRABLE.iter().all(|k| k.is_deferrable()));
        assert_eq!(OpKind::DEFERRABLE.len() + 1, OpKind::PRECEDENCE.len());
    }

    #[test]
    fn display() {
        assert_eq!(OpKind::ChangeLane.to_string(), "change_lane");
        assert_eq!(OpKind::Enter.to_string(), "enter");
    }
}

#[cfg(test)]
mod config_tests {
    use crate::{RoadConfig, RoadError, WakePolicy};

    #[test]
    fn valid_config() {
        let cfg = RoadConfig::new(3, 2);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.cell_count(), 6);
        assert_eq!(cfg.policy, WakePolicy::Precedence);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(RoadConfig::new(0, 2).validate(), Err(RoadError::Config(_))));
        assert!(matches!(RoadConfig::new(2, 0).validate(), Err(RoadError::Config(_))));
    }

    #[test]
    fn with_policy_overrides_default() {
        let cfg = RoadConfig::new(1, 1).with_policy(WakePolicy::GlobalFifo);
        assert_eq!(cfg.policy, WakePolicy::GlobalFifo);
    }
}
