//! # TM Server
//!
//! Publishes a telemetry packet every cycle. Publishing is best effort: a failure is logged and
//! dropped, and never affects the running of the robot.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use util::module::Subsystem;

use crate::data_store::DataStore;
use crate::sched::{Scheduler, SchedulerStatus};
use crate::subsystems::{arm, climb, intake, pneumatics};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A destination for telemetry packets.
pub trait DiagnosticsSink {
    fn send(&mut self, packet: &TmPacket) -> Result<(), TmServerError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Telemetry server, writing one JSON packet per line to a file.
pub struct TmServer {
    path: PathBuf,
    writer: BufWriter<File>,
    num_failures: u64,
}

/// Telemetry packet that is output by the server.
#[derive(Debug, Clone, Serialize)]
pub struct TmPacket {
    pub time_s: f64,

    pub num_cycles: u64,

    pub safe: bool,

    pub safe_cause: Option<String>,

    pub match_remaining_s: Option<f64>,

    pub climb: climb::StatusReport,

    pub arm: arm::StatusReport,

    pub intake: intake::StatusReport,

    pub pneumatics: pneumatics::StatusReport,

    pub scheduler: SchedulerStatus,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TmServerError {
    #[error("Could not create the telemetry file {0:?}: {1}")]
    CreateError(PathBuf, std::io::Error),

    #[error("Could not write telemetry: {0}")]
    WriteError(std::io::Error),

    #[error("Could not serialize the telemetry: {0}")]
    SerializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TmServer {
    /// Create a new instance of the TM Server, writing to the file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, TmServerError> {
        let path = path.as_ref().to_path_buf();

        let file =
            File::create(&path).map_err(|e| TmServerError::CreateError(path.clone(), e))?;

        info!("Telemetry will be written to {:?}", path);

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            num_failures: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Send a packet, logging rather than returning any failure.
    pub fn publish(&mut self, packet: &TmPacket) {
        if let Err(e) = self.send(packet) {
            self.num_failures += 1;

            // Only log the first of a run of failures
            if self.num_failures == 1 {
                warn!("Could not publish telemetry: {}", e);
            }
        } else if self.num_failures > 0 {
            info!("Telemetry restored after {} failures", self.num_failures);
            self.num_failures = 0;
        }
    }
}

impl DiagnosticsSink for TmServer {
    fn send(&mut self, packet: &TmPacket) -> Result<(), TmServerError> {
        let packet_string =
            serde_json::to_string(packet).map_err(TmServerError::SerializationError)?;

        writeln!(self.writer, "{}", packet_string).map_err(TmServerError::WriteError)?;
        self.writer.flush().map_err(TmServerError::WriteError)
    }
}

impl TmPacket {
    pub fn from_datastore(ds: &DataStore, scheduler: &Scheduler<DataStore>) -> Self {
        Self {
            time_s: ds.time_s,
            num_cycles: ds.num_cycles,
            safe: ds.safe,
            safe_cause: ds.safe_cause.map(|c| format!("{:?}", c)),
            match_remaining_s: ds.match_remaining_s(),
            climb: ds.climb.status_report(),
            arm: ds.arm.status_report(),
            intake: ds.intake.status_report(),
            pneumatics: ds.pneumatics.status_report(),
            scheduler: scheduler.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::Rig;

    #[test]
    fn test_packets_written_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = TmServer::new(dir.path().join("tm.jsonl")).unwrap();

        let mut rig = Rig::new();
        for _ in 0..3 {
            rig.step();
            server.publish(&TmPacket::from_datastore(&rig.ds, &rig.scheduler));
        }

        let contents = std::fs::read_to_string(server.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);

        let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last["safe"], serde_json::Value::Bool(false));
        assert_eq!(last["intake"]["state"], "Idle");
        assert_eq!(last["scheduler"]["num_runs"], 3);
    }

    #[test]
    fn test_cannot_create_in_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = TmServer::new(dir.path().join("missing").join("tm.jsonl"));

        assert!(matches!(result, Err(TmServerError::CreateError(_, _))));
    }
}
