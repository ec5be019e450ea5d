/*!
 * Simulation Configuration
 * Untyped request validation into a typed simulation spec
 */

use crate::core::{SimResult, SimulationError, Time};
use crate::policy::{Level3Discipline, MlfqConfig, Policy};
use crate::sim::Process;
use serde::{Deserialize, Serialize};

/// Raw per-process input, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessRequest {
    pub id: String,
    pub arrival_time: i64,
    pub burst_time: i64,
}

/// Raw MLFQ parameters, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MlfqRequest {
    pub q0: i64,
    pub q1: i64,
    pub q2: i64,
    pub q3_type: String,
    #[serde(default)]
    pub q3_quantum: Option<i64>,
}

/// A complete untyped simulation request, as deserialized from JSON
///
/// Validation turns this into a [`SimulationSpec`]; nothing here is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationRequest {
    pub processes: Vec<ProcessRequest>,
    pub algorithm: String,
    #[serde(default)]
    pub quantum: Option<i64>,
    #[serde(default)]
    pub mlfq: Option<MlfqRequest>,
    #[serde(default)]
    pub context_switch_delay: i64,
}

/// Validated inputs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSpec {
    pub processes: Vec<Process>,
    pub policy: Policy,
    pub context_switch_delay: Time,
}

fn positive(value: Option<i64>, what: &str) -> SimResult<Time> {
    match value {
        None => Err(SimulationError::Configuration(
            format!("{} is required", what).into(),
        )),
        Some(v) if v <= 0 => Err(SimulationError::InvalidParameter(
            format!("{} must be positive, got {}", what, v).into(),
        )),
        Some(v) => Ok(v as Time),
    }
}

impl SimulationRequest {
    /// Validate into a typed spec, failing fast before any simulation state
    /// is created
    pub fn validate(&self) -> SimResult<SimulationSpec> {
        if self.processes.is_empty() {
            return Err(SimulationError::Configuration(
                "at least one process is required".into(),
            ));
        }

        let mut processes = Vec::with_capacity(self.processes.len());
        for raw in &self.processes {
            if raw.arrival_time < 0 {
                return Err(SimulationError::InvalidProcess {
                    id: raw.id.as_str().into(),
                    reason: "arrival time must be non-negative".into(),
                });
            }
            if raw.burst_time < 1 {
                return Err(SimulationError::InvalidProcess {
                    id: raw.id.as_str().into(),
                    reason: "burst time must be at least 1".into(),
                });
            }
            processes.push(Process::new(
                raw.id.as_str(),
                raw.arrival_time as Time,
                raw.burst_time as Time,
            )?);
        }

        let policy = match self.algorithm.to_lowercase().as_str() {
            "fcfs" => Policy::Fcfs,
            "sjf" => Policy::Sjf,
            "srtf" => Policy::Srtf,
            "rr" | "round_robin" | "roundrobin" => Policy::RoundRobin {
                quantum: positive(self.quantum, "Round Robin quantum")?,
            },
            "mlfq" => {
                let raw = self.mlfq.as_ref().ok_or_else(|| {
                    SimulationError::Configuration("MLFQ parameters are required".into())
                })?;
                let level3 = match raw.q3_type.to_lowercase().as_str() {
                    "fcfs" => Level3Discipline::Fcfs,
                    "rr" | "round_robin" | "roundrobin" => Level3Discipline::RoundRobin {
                        quantum: positive(raw.q3_quantum, "MLFQ Q3 quantum")?,
                    },
                    other => {
                        return Err(SimulationError::Configuration(
                            format!("unknown Q3 type '{}'. Valid: fcfs, rr", other).into(),
                        ))
                    }
                };
                Policy::Mlfq(MlfqConfig {
                    q0: positive(Some(raw.q0), "MLFQ Q0 quantum")?,
                    q1: positive(Some(raw.q1), "MLFQ Q1 quantum")?,
                    q2: positive(Some(raw.q2), "MLFQ Q2 quantum")?,
                    level3,
                })
            }
            other => {
                return Err(SimulationError::Configuration(
                    format!(
                        "unknown algorithm '{}'. Valid: fcfs, sjf, srtf, rr, mlfq",
                        other
                    )
                    .into(),
                ))
            }
        };

        if self.context_switch_delay < 0 {
            return Err(SimulationError::InvalidParameter(
                "context switch delay cannot be negative".into(),
            ));
        }

        Ok(SimulationSpec {
            processes,
            policy,
            context_switch_delay: self.context_switch_delay as Time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_json(json: &str) -> SimulationRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_round_robin_request() {
        let request = request_json(
            r#"{
                "processes": [
                    {"id": "P1", "arrival_time": 0, "burst_time": 5},
                    {"id": "P2", "arrival_time": 1, "burst_time": 3}
                ],
                "algorithm": "rr",
                "quantum": 2
            }"#,
        );
        let spec = request.validate().unwrap();
        assert_eq!(spec.policy, Policy::RoundRobin { quantum: 2 });
        assert_eq!(spec.context_switch_delay, 0);
        assert_eq!(spec.processes.len(), 2);
    }

    #[test]
    fn test_missing_quantum_is_configuration_error() {
        let request = request_json(
            r#"{
                "processes": [{"id": "P1", "arrival_time": 0, "burst_time": 1}],
                "algorithm": "rr"
            }"#,
        );
        assert!(matches!(
            request.validate(),
            Err(SimulationError::Configuration(_))
        ));
    }

    #[test]
    fn test_non_positive_quantum_is_validation_error() {
        let request = request_json(
            r#"{
                "processes": [{"id": "P1", "arrival_time": 0, "burst_time": 1}],
                "algorithm": "rr",
                "quantum": 0
            }"#,
        );
        assert!(matches!(
            request.validate(),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_negative_arrival_names_offending_process() {
        let request = request_json(
            r#"{
                "processes": [
                    {"id": "P1", "arrival_time": 0, "burst_time": 1},
                    {"id": "P2", "arrival_time": -3, "burst_time": 1}
                ],
                "algorithm": "fcfs"
            }"#,
        );
        match request.validate() {
            Err(SimulationError::InvalidProcess { id, .. }) => assert_eq!(id.as_str(), "P2"),
            other => panic!("expected InvalidProcess, got {:?}", other),
        }
    }

    #[test]
    fn test_mlfq_q3_quantum_required_only_for_rr() {
        let base = r#"{
            "processes": [{"id": "P1", "arrival_time": 0, "burst_time": 1}],
            "algorithm": "mlfq",
            "mlfq": {"q0": 1, "q1": 2, "q2": 4, "q3_type": "QTYPE"}
        }"#;

        let fcfs = request_json(&base.replace("QTYPE", "fcfs"));
        assert!(fcfs.validate().is_ok());

        let rr = request_json(&base.replace("QTYPE", "rr"));
        assert!(matches!(
            rr.validate(),
            Err(SimulationError::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let request = request_json(
            r#"{
                "processes": [{"id": "P1", "arrival_time": 0, "burst_time": 1}],
                "algorithm": "lottery"
            }"#,
        );
        assert!(matches!(
            request.validate(),
            Err(SimulationError::Configuration(_))
        ));
    }
}
