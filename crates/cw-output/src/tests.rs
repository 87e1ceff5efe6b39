//! Tests for cw-output.

use cw_coord::{EventOutcome, Reply, RoadEvent, TickReport};
use cw_core::{OpKind, Pos, RoadClock, RoadError, VehicleId};

use crate::row::{EventRow, TickRow};

fn event(tick: u64, vehicle: &str, op: OpKind, outcome: EventOutcome) -> RoadEvent {
    RoadEvent { tick: RoadClock(tick), vehicle: VehicleId::new(vehicle), op, outcome }
}

fn placed(segment: usize, lane: usize, resumed: bool) -> EventOutcome {
    EventOutcome::Completed { reply: Reply::Position(Pos::new(segment, lane)), resumed }
}

#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn completed_move_carries_position() {
        let row = EventRow::from(&event(4, "car", OpKind::Advance, placed(2, 1, false)));
        assert_eq!(row.tick, 4);
        assert_eq!(row.vehicle, "car");
        assert_eq!(row.op, "advance");
        assert_eq!(row.outcome, "completed");
        assert_eq!((row.segment, row.lane), (Some(2), Some(1)));
    }

    #[test]
    fn outcome_labels() {
        let label = |outcome| EventRow::from(&event(0, "v", OpKind::Enter, outcome)).outcome;
        assert_eq!(label(EventOutcome::Deferred), "deferred");
        assert_eq!(label(placed(1, 1, true)), "resumed");
        assert_eq!(label(EventOutcome::Cancelled), "cancelled");
        assert_eq!(
            label(EventOutcome::Rejected(RoadError::AlreadyOnRoad(VehicleId::new("v")))),
            "rejected: vehicle v is already on the road"
        );
    }

    #[test]
    fn exit_rows_have_no_position() {
        let removed = EventOutcome::Completed { reply: Reply::Removed(true), resumed: false };
        let absent = EventOutcome::Completed { reply: Reply::Removed(false), resumed: false };
        let row = EventRow::from(&event(1, "v", OpKind::Exit, removed));
        assert_eq!((row.outcome.as_str(), row.segment), ("completed", None));
        let row = EventRow::from(&event(1, "v", OpKind::Exit, absent));
        assert_eq!(row.outcome, "noop");
    }

    #[test]
    fn tick_row_copies_counters() {
        let report = TickReport { tick: RoadClock(9), decremented: 3, reached_zero: 2, resumed: 1 };
        assert_eq!(
            TickRow::from(&report),
            TickRow { tick: 9, decremented: 3, reached_zero: 2, resumed: 1 }
        );
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{CsvTraceWriter, EVENT_HEADER, TICK_HEADER};
    use crate::writer::TraceWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvTraceWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("events.csv").exists());
        assert!(dir.path().join("ticks.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, EVENT_HEADER);

        let mut rdr = csv::Reader::from_path(dir.path().join("ticks.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, TICK_HEADER);
    }

    #[test]
    fn csv_event_rows_read_back() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_event(&EventRow::from(&event(0, "a", OpKind::Enter, placed(1, 2, false)))).unwrap();
        w.write_event(&EventRow::from(&event(0, "b", OpKind::Enter, EventOutcome::Deferred))).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["0", "a", "enter", "completed", "1", "2"]);
        assert_eq!(rows[1].iter().collect::<Vec<_>>(), ["0", "b", "enter", "deferred", "", ""]);
    }

    #[test]
    fn csv_tick_rows_read_back() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.write_tick(&TickRow { tick: 3, decremented: 4, reached_zero: 1, resumed: 2 }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("ticks.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "4", "1", "2"]);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvTraceWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tmp();
        assert!(CsvTraceWriter::new(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use std::sync::Arc;

    use cw_coord::{Road, RoadBuilder, RoadObserver};
    use cw_core::{RoadConfig, Ticks};

    use super::*;
    use crate::csv::CsvTraceWriter;
    use crate::error::OutputError;
    use crate::memory::MemoryTraceWriter;
    use crate::observer::TraceObserver;
    use crate::writer::TraceWriter;
    use crate::OutputResult;

    /// Fails every write.
    struct Broken;

    impl TraceWriter for Broken {
        fn write_event(&mut self, _row: &EventRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn write_tick(&mut self, _row: &TickRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("unplugged")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn observer_forwards_events_and_ticks() {
        let mut obs = TraceObserver::new(MemoryTraceWriter::new());
        obs.on_event(&event(0, "a", OpKind::Enter, placed(1, 1, false)));
        obs.on_tick(&TickReport { tick: RoadClock(1), ..Default::default() });
        obs.on_shutdown(RoadClock(1));
        assert!(obs.take_error().is_none());

        let w = obs.into_writer();
        assert_eq!(w.events.len(), 1);
        assert_eq!(w.ticks.len(), 1);
        assert!(w.finished);
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = TraceObserver::new(Broken);
        obs.on_event(&event(0, "a", OpKind::Enter, EventOutcome::Deferred));
        obs.on_tick(&TickReport::default());
        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn trace_of_a_live_road() {
        let trace = Arc::new(parking_lot::Mutex::new(TraceObserver::new(MemoryTraceWriter::new())));
        {
            let road = RoadBuilder::new(RoadConfig::new(1, 1))
                .observer(Arc::clone(&trace))
                .build_monitor()
                .unwrap();
            let a = VehicleId::new("a");
            road.enter(&a, Ticks(1)).unwrap();
            road.tick().unwrap();
            road.advance(&a, Ticks(0)).unwrap();
            assert!(!road.exit(&a).unwrap());
        }

        let trace = trace.lock();
        let w = trace.writer();
        assert!(w.finished, "dropping the road finishes the writer");
        let ops: Vec<_> = w.events_for("a").map(|r| (r.op, r.outcome.as_str())).collect();
        assert_eq!(ops, [("enter", "completed"), ("advance", "completed"), ("exit", "noop")]);
        assert_eq!(w.ticks, [TickRow { tick: 1, decremented: 1, reached_zero: 1, resumed: 0 }]);
    }

    #[test]
    fn csv_trace_of_a_live_road() {
        let dir = tempfile::tempdir().unwrap();
        let trace = Arc::new(parking_lot::Mutex::new(TraceObserver::new(
            CsvTraceWriter::new(dir.path()).unwrap(),
        )));
        {
            let road = RoadBuilder::new(RoadConfig::new(2, 1))
                .observer(Arc::clone(&trace))
                .spawn_channel()
                .unwrap();
            road.enter(&VehicleId::new("a"), Ticks(0)).unwrap();
            road.tick().unwrap();
        }
        assert!(trace.lock().take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("events.csv")).unwrap();
        assert_eq!(rdr.records().count(), 1);
        let mut rdr = csv::Reader::from_path(dir.path().join("ticks.csv")).unwrap();
        assert_eq!(rdr.records().count(), 1);
    }
}
