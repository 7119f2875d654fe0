use super::fixtures::t;
use crate::trace::{
    EventKind, NodeId, Position, SeqNo, TraceError, load_events, read_events, read_kpi,
    read_positions,
};
use std::path::Path;

#[test]
fn event_log_parses_simulator_spellings_and_extra_columns() {
    let raw = "\
timestamp,nodeId,seqNo,eventType,src,lastHop,delay,numHops,pL
1.5,0,7,PktSent,0,0,-1,0,0.39
1.502,3,7,PktRcvd,0,0,2.0,0,0.39
1.61,4,7,PktFwd,0,3,110.0,1,0.41
1.7,5,7,PktSentCoded,0,0,-1,0,0.39
";
    let events = read_events(raw.as_bytes(), "events.csv").expect("parse events");
    assert_eq!(events.len(), 4);

    assert_eq!(events[0].at, t(1.5));
    assert_eq!(events[0].node, NodeId(0));
    assert_eq!(events[0].kind, EventKind::Sent);
    assert_eq!(events[0].seq_no, SeqNo(7));
    assert_eq!(events[0].loss_param, Some(0.39));
    assert_eq!(events[0].src, Some(NodeId(0)));

    assert!(events[1].is_direct_reception());
    assert_eq!(events[2].kind, EventKind::Forwarded);
    assert_eq!(events[2].num_hops, 1);
    assert_eq!(events[3].kind, EventKind::Other);
}

#[test]
fn event_log_accepts_long_names_and_missing_optional_columns() {
    let raw = "\
timestamp,nodeId,eventType,seqNo,numHops
0.25,1,Sent,2,0
0.5,2,Received,2,0
0.75,2,Forwarded,2,0
";
    let events = read_events(raw.as_bytes(), "events.csv").expect("parse events");
    let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Sent, EventKind::Received, EventKind::Forwarded]
    );
    assert!(events.iter().all(|e| e.loss_param.is_none() && e.src.is_none()));
}

#[test]
fn event_log_resolves_composite_sequence_numbers() {
    let raw = "\
timestamp,nodeId,seqNo,eventType,src,numHops
1.0,3,3-17,PktSent,3,0
1.1,4,3-17,PktRcvd,3,0
";
    let events = read_events(raw.as_bytes(), "collision.csv").expect("parse events");
    assert_eq!(events[0].seq_no, SeqNo::composite(3, 17));
    assert_eq!(events[0].seq_no, events[1].seq_no);
    assert_ne!(SeqNo::composite(3, 17), SeqNo::composite(17, 3));
}

#[test]
fn event_log_without_hop_count_is_rejected() {
    let raw = "timestamp,nodeId,eventType,seqNo\n5.0,0,PktSent,1\n5.1,1,PktRcvd,1\n";
    let err = read_events(raw.as_bytes(), "events.csv").expect_err("must fail");
    assert!(matches!(err, TraceError::Csv { .. }), "{err}");
    assert!(err.to_string().contains("numHops"), "{err}");
}

#[test]
fn event_log_rejects_bad_sequence_number() {
    let raw = "timestamp,nodeId,seqNo,eventType,numHops\n1.0,3,abc,PktSent,0\n";
    let err = read_events(raw.as_bytes(), "events.csv").expect_err("must fail");
    assert!(matches!(err, TraceError::InvalidSeqNo { row: 1, .. }), "{err}");
}

#[test]
fn event_log_rejects_negative_timestamp() {
    let raw = "\
timestamp,nodeId,eventType,seqNo,numHops
1.0,1,PktSent,1,0
-2.0,1,PktSent,2,0
";
    let err = read_events(raw.as_bytes(), "events.csv").expect_err("must fail");
    match err {
        TraceError::InvalidTimestamp { row, value, .. } => {
            assert_eq!(row, 2);
            assert_eq!(value, -2.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn event_log_rejects_malformed_field() {
    let raw = "timestamp,nodeId,eventType,seqNo,numHops\nsoon,1,PktSent,1,0\n";
    let err = read_events(raw.as_bytes(), "events.csv").expect_err("must fail");
    assert!(matches!(err, TraceError::Csv { .. }), "{err}");
    assert!(err.to_string().starts_with("events.csv"));
}

#[test]
fn missing_file_is_an_open_error() {
    let err = load_events(Path::new("/nonexistent/prr-rs/events.csv")).expect_err("must fail");
    assert!(matches!(err, TraceError::Open { .. }));
}

#[test]
fn position_log_ignores_z_and_keeps_row_order() {
    let raw = "\
timestamp,nodeId,pos_x,pos_y,pos_z
0,0,0.0,0.0,0.0
0,1,150.5,-20.25,0.0
3.0,0,33.3,0.0,0.0
";
    let samples = read_positions(raw.as_bytes(), "course.csv").expect("parse positions");
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[1].node, NodeId(1));
    assert_eq!(samples[1].pos, Position::new(150.5, -20.25));
    assert_eq!(samples[2].at, t(3.0));
}

#[test]
fn position_log_rejects_non_finite_coordinates() {
    let raw = "timestamp,nodeId,pos_x,pos_y\n0,0,NaN,0.0\n";
    let err = read_positions(raw.as_bytes(), "course.csv").expect_err("must fail");
    assert!(matches!(err, TraceError::InvalidPosition { row: 1, .. }), "{err}");
}

#[test]
fn kpi_reads_first_row() {
    let raw = "\
sumSent,sumSentCoded,sumRcvd,sumFwd,pe500,pd
120,30,2000,400,0.05,0.97
1,1,1,1,1,1
";
    let kpi = read_kpi(raw.as_bytes(), "kpi.csv").expect("parse kpi");
    assert_eq!(kpi.sum_sent, 120);
    assert_eq!(kpi.sum_sent_coded, Some(30));
    assert_eq!(kpi.sum_rcvd, 2000);
    assert_eq!(kpi.sum_fwd, 400);
    assert_eq!(kpi.pe500, Some(0.05));
    assert_eq!(kpi.pd, Some(0.97));
}

#[test]
fn kpi_without_rows_is_an_error() {
    let err = read_kpi("sumSent,sumRcvd,sumFwd\n".as_bytes(), "kpi.csv").expect_err("must fail");
    assert!(matches!(err, TraceError::Empty { .. }));
}
