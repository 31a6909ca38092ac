//! Recorded pose logs and tick output as CSV.
//!
//! Pose log columns (header required, `#` lines are comments):
//!
//! ```text
//! timestamp_s,status,tx,ty,tz,qx,qy,qz,qw,movement_frozen,rotation_frozen
//! 0.000,valid,0.0,0.0,0.0,0.0,0.0,0.0,1.0,false,false
//! ```
//!
//! Every row is a device-in-service pose callback followed by one tick with
//! the row's toggle states.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim, Writer};
use serde::{Deserialize, Serialize};

use crate::system::TickOutput;
use crate::tracking::{PoseStatus, RawPose};

#[derive(Debug, Deserialize)]
struct PoseLogRecord {
    timestamp_s: f64,
    status: PoseStatus,
    tx: f64,
    ty: f64,
    tz: f64,
    qx: f64,
    qy: f64,
    qz: f64,
    qw: f64,
    movement_frozen: bool,
    rotation_frozen: bool,
}

/// One replayed frame: the pose callback and the toggle states.
#[derive(Debug, Clone, Copy)]
pub struct PoseLogEntry {
    pub pose: RawPose,
    pub movement_frozen: bool,
    pub rotation_frozen: bool,
}

impl From<PoseLogRecord> for PoseLogEntry {
    fn from(rec: PoseLogRecord) -> Self {
        Self {
            pose: RawPose::device_in_service(
                rec.timestamp_s,
                rec.status,
                [rec.tx, rec.ty, rec.tz],
                [rec.qx, rec.qy, rec.qz, rec.qw],
            ),
            movement_frozen: rec.movement_frozen,
            rotation_frozen: rec.rotation_frozen,
        }
    }
}

/// Load a pose log from disk.
pub fn load_pose_log<P: AsRef<Path>>(path: P) -> Result<Vec<PoseLogEntry>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_pose_log(file).with_context(|| format!("Failed to read pose log {}", path.display()))
}

/// Parse a pose log from any reader.
pub fn read_pose_log<R: Read>(reader: R) -> Result<Vec<PoseLogEntry>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (i, rec) in rdr.deserialize::<PoseLogRecord>().enumerate() {
        let rec = rec.with_context(|| format!("Bad pose log row {}", i + 1))?;
        entries.push(rec.into());
    }
    Ok(entries)
}

#[derive(Debug, Serialize)]
struct TickRecord {
    tick: u64,
    timestamp_s: f64,
    vx: f64,
    vy: f64,
    vz: f64,
    qx: f64,
    qy: f64,
    qz: f64,
    qw: f64,
}

/// CSV writer for tick outputs.
pub struct TickWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> TickWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::from_writer(inner),
        }
    }

    pub fn write(&mut self, tick: u64, timestamp_s: f64, output: &TickOutput) -> Result<()> {
        let q = output.facing.quaternion();
        self.writer.serialize(TickRecord {
            tick,
            timestamp_s,
            vx: output.velocity.x,
            vy: output.velocity.y,
            vz: output.velocity.z,
            qx: q.i,
            qy: q.j,
            qz: q.k,
            qw: q.w,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush tick output")
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to finish tick output: {}", e.error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};

    const LOG: &str = "\
timestamp_s,status,tx,ty,tz,qx,qy,qz,qw,movement_frozen,rotation_frozen
# recorded standing still
0.00, valid, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, false, false
0.05, invalid, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, true, false
0.10, valid, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0, false, true
";

    #[test]
    fn test_read_pose_log() {
        let entries = read_pose_log(LOG.as_bytes()).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].pose.status, PoseStatus::Invalid);
        assert!(entries[1].movement_frozen);
        assert!(entries[2].rotation_frozen);
        assert_eq!(entries[2].pose.translation, [1.0, 2.0, 3.0]);
        assert!(entries[2].pose.is_device_in_service());
    }

    #[test]
    fn test_bad_row_reports_position() {
        let log = "\
timestamp_s,status,tx,ty,tz,qx,qy,qz,qw,movement_frozen,rotation_frozen
0.0,valid,0,0,0,0,0,0,1,false,false
0.1,sideways,0,0,0,0,0,0,1,false,false
";
        let err = read_pose_log(log.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("row 2"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_pose_log("/nonexistent/poses.csv").is_err());
    }

    #[test]
    fn test_tick_writer() {
        let mut writer = TickWriter::new(Vec::new());
        let output = TickOutput {
            velocity: Vector3::new(10.0, 0.0, -2.5),
            facing: UnitQuaternion::identity(),
        };
        writer.write(1, 0.25, &output).unwrap();

        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("tick,timestamp_s,vx,vy,vz,qx,qy,qz,qw"));
        assert_eq!(lines.next(), Some("1,0.25,10.0,0.0,-2.5,0.0,0.0,0.0,1.0"));
    }
}
