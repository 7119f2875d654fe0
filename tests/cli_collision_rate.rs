use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "prr-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

const POSITIONS: &str = "\
timestamp,nodeId,pos_x,pos_y,pos_z
0,0,0.0,0.0,0.0
0,1,100.0,0.0,0.0
0,2,0.0,200.0,0.0
0,3,2000.0,0.0,0.0
";

// 碰撞实验日志的 seqNo 是 "<节点>-<序号>" 复合写法
const EVENTS: &str = "\
timestamp,nodeId,seqNo,eventType,src,lastHop,delay,numHops,pL
1.0,0,0-1,PktSent,0,0,-1,0,0.0
1.001,1,0-1,PktRcvd,0,0,1.0,0,0.0
1.002,2,0-1,PktRcvd,0,0,2.0,0,0.0
1.01,1,0-1,PktFwd,0,0,10.0,0,0.0
1.02,3,0-1,PktRcvd,0,1,20.0,1,0.0
2.0,0,0-2,PktSent,0,0,-1,0,0.0
2.001,1,0-2,PktRcvd,0,0,1.0,0,0.0
3.0,3,3-1,PktSent,3,3,-1,0,0.0
";

#[test]
fn collision_rate_counts_only_inner_area() {
    let dir = unique_temp_dir("collision-rate");
    let events = write_file(&dir, "rdf.csv", EVENTS);
    let positions = write_file(&dir, "course_rdf.csv", POSITIONS);
    let out = dir.join("parsed").join("collision_rdf.json");

    let output = Command::new(env!("CARGO_BIN_EXE_collision_rate"))
        .args([
            "--events",
            events.to_str().unwrap(),
            "--positions",
            positions.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run collision_rate");
    assert!(
        output.status.success(),
        "collision_rate failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out).expect("read stats");
    let v: Value = serde_json::from_str(&raw).expect("parse stats");
    assert_eq!(v["in_range_nodes"], 3);
    assert_eq!(v["num_sent"], 2);
    assert_eq!(v["num_rcvd"], 3);
    assert_eq!(v["num_fwd"], 1);
    assert_eq!(v["collision_rate"], 0.25);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout
            .lines()
            .any(|l| l.starts_with("done in_range_nodes=3 num_sent=2 ")),
        "stdout={stdout}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn collision_rate_rejects_malformed_seq_no() {
    let dir = unique_temp_dir("collision-rate-bad");
    let events = write_file(
        &dir,
        "rdf.csv",
        "timestamp,nodeId,seqNo,eventType,src,numHops\n1.0,0,abc,PktSent,0,0\n",
    );
    let positions = write_file(&dir, "course_rdf.csv", POSITIONS);
    let out = dir.join("collision_rdf.json");

    let output = Command::new(env!("CARGO_BIN_EXE_collision_rate"))
        .args([
            "--events",
            events.to_str().unwrap(),
            "--positions",
            positions.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run collision_rate");
    assert!(!output.status.success(), "expected non-zero exit");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("abc"), "stderr={stderr}");
    assert!(!out.exists());

    let _ = fs::remove_dir_all(&dir);
}
