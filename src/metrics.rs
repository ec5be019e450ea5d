/*!
 * Metrics Finalizer
 * Per-process turnaround/response times and their arithmetic means
 */

use crate::sim::{ProcessId, SimulationResult};
use crate::core::Time;
use serde::{Deserialize, Serialize};

/// Final per-process performance figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub arrival: Time,
    pub burst: Time,
    pub completion: Time,
    pub turnaround: Time,
    pub response: Time,
}

/// Metrics for one completed run
///
/// Averages are `None` when no process completed ("not applicable" rather
/// than a division by zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsSummary {
    /// Sorted by process id
    pub per_process: Vec<ProcessMetrics>,
    pub avg_turnaround: Option<f64>,
    pub avg_response: Option<f64>,
}

/// Derive turnaround/response statistics from a completed run
pub fn finalize(result: &SimulationResult) -> MetricsSummary {
    let mut per_process: Vec<ProcessMetrics> = result
        .completed
        .iter()
        .map(|p| {
            let completion = p.completion.unwrap_or(p.arrival + p.burst);
            ProcessMetrics {
                id: p.id.clone(),
                arrival: p.arrival,
                burst: p.burst,
                completion,
                turnaround: completion - p.arrival,
                response: p.response(),
            }
        })
        .collect();
    per_process.sort_by(|a, b| a.id.cmp(&b.id));

    let count = per_process.len();
    let (avg_turnaround, avg_response) = if count == 0 {
        (None, None)
    } else {
        let turnaround_sum: Time = per_process.iter().map(|m| m.turnaround).sum();
        let response_sum: Time = per_process.iter().map(|m| m.response).sum();
        (
            Some(turnaround_sum as f64 / count as f64),
            Some(response_sum as f64 / count as f64),
        )
    };

    MetricsSummary {
        per_process,
        avg_turnaround,
        avg_response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{simulate, Policy};
    use crate::sim::Process;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fcfs_reference_metrics() {
        let input = vec![
            Process::new("P1", 0, 5).unwrap(),
            Process::new("P2", 2, 3).unwrap(),
        ];
        let result = simulate(&input, &Policy::Fcfs, 0).unwrap();
        let metrics = finalize(&result);

        let p2 = &metrics.per_process[1];
        assert_eq!(p2.id.as_str(), "P2");
        assert_eq!(p2.completion, 8);
        assert_eq!(p2.turnaround, 6);
        assert_eq!(p2.response, 3);
        assert_eq!(metrics.avg_turnaround, Some((5.0 + 6.0) / 2.0));
    }

    #[test]
    fn test_empty_run_yields_not_applicable() {
        let result = simulate(&[], &Policy::Fcfs, 0).unwrap();
        let metrics = finalize(&result);
        assert!(metrics.per_process.is_empty());
        assert_eq!(metrics.avg_turnaround, None);
        assert_eq!(metrics.avg_response, None);
    }

    #[test]
    fn test_per_process_sorted_by_id() {
        let input = vec![
            Process::new("B", 1, 1).unwrap(),
            Process::new("A", 3, 1).unwrap(),
        ];
        let result = simulate(&input, &Policy::Fcfs, 0).unwrap();
        let metrics = finalize(&result);
        let ids: Vec<&str> = metrics.per_process.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
