/*!
 * Property Tests
 * Invariants that must hold for every policy over arbitrary workloads
 */

use proptest::prelude::*;
use sched_sim::{
    simulate, GanttEntry, Level3Discipline, MlfqConfig, Policy, Process, Segment, Time,
};

fn arb_processes() -> impl Strategy<Value = Vec<Process>> {
    prop::collection::vec((0u64..15, 1u64..8), 1..6).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (arrival, burst))| {
                Process::new(format!("P{}", i + 1), arrival, burst).unwrap()
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::Fcfs),
        Just(Policy::Sjf),
        Just(Policy::Srtf),
        (1u64..4).prop_map(|quantum| Policy::RoundRobin { quantum }),
        ((1u64..3), (1u64..3), (1u64..4), prop::option::of(1u64..3)).prop_map(
            |(q0, q1, q2, rr_quantum)| {
                let level3 = match rr_quantum {
                    Some(quantum) => Level3Discipline::RoundRobin { quantum },
                    None => Level3Discipline::Fcfs,
                };
                Policy::Mlfq(MlfqConfig { q0, q1, q2, level3 })
            }
        ),
    ]
}

/// Entries are time-ordered, non-overlapping, and minimally run-length
/// encoded (no two contiguous entries share a segment)
fn assert_well_formed_gantt(gantt: &[GanttEntry]) {
    for e in gantt {
        assert!(e.start < e.end, "empty or inverted entry {:?}", e);
    }
    for pair in gantt.windows(2) {
        assert!(pair[0].end <= pair[1].start, "overlapping entries {:?}", pair);
        if pair[0].end == pair[1].start {
            assert_ne!(
                pair[0].segment, pair[1].segment,
                "adjacent entries were left unmerged: {:?}",
                pair
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_simulation_invariants(
        processes in arb_processes(),
        policy in arb_policy(),
        delay in 0u64..3,
    ) {
        let result = simulate(&processes, &policy, delay).unwrap();

        // Every process runs to completion, exactly once.
        prop_assert_eq!(result.completed.len(), processes.len());

        // Conservation: total burst equals busy time in the Gantt data.
        let total_burst: Time = processes.iter().map(|p| p.burst).sum();
        let busy: Time = result
            .gantt
            .iter()
            .filter(|e| matches!(e.segment, Segment::Process { .. }))
            .map(GanttEntry::duration)
            .sum();
        prop_assert_eq!(busy, total_burst);

        for p in &result.completed {
            let completion = p.completion.unwrap();
            prop_assert!(completion >= p.arrival + p.burst);
            let first = p.first_execution.unwrap();
            prop_assert!(first >= p.arrival);
            prop_assert!(first < completion);
        }

        assert_well_formed_gantt(&result.gantt);

        // Zero delay leaves no context-switch entries at all.
        if delay == 0 {
            prop_assert!(result
                .gantt
                .iter()
                .all(|e| !matches!(e.segment, Segment::ContextSwitch)));
        }

        // The frame log ends at the final simulated time and is time-ordered.
        let frames = result.frames.frames();
        prop_assert!(!frames.is_empty());
        prop_assert_eq!(frames.last().unwrap().time, result.total_time);
        for pair in frames.windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
        }

        // Unit granularity: every time point up to the end has a frame.
        let mut covered = vec![false; result.total_time as usize + 1];
        for frame in frames {
            covered[frame.time as usize] = true;
        }
        prop_assert!(covered.iter().all(|&c| c), "missing per-unit frame");
    }

    #[test]
    fn prop_runs_are_deterministic(
        processes in arb_processes(),
        policy in arb_policy(),
        delay in 0u64..3,
    ) {
        let first = simulate(&processes, &policy, delay).unwrap();
        let second = simulate(&processes, &policy, delay).unwrap();
        prop_assert_eq!(first, second);
    }
}
