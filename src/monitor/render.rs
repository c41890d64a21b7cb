//! Human-readable rendering of snapshots and reports.

use std::fmt;

use crate::core::{PoolCounts, RunReport, RunSnapshot};

/// Status block for one snapshot.
///
/// ```text
/// [Status]
/// Instance 1: active (2/5)
/// Instance 2: empty
/// Leftover players: Tanks: 3, Healers: 1, DPS: 7
/// ```
pub struct StatusFrame<'a>(pub &'a RunSnapshot);

impl fmt::Display for StatusFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Status]")?;
        for status in &self.0.instances {
            if status.is_running {
                writeln!(
                    f,
                    "Instance {}: active ({}/{})",
                    status.id, status.current_elapsed, status.current_duration
                )?;
            } else {
                writeln!(f, "Instance {}: empty", status.id)?;
            }
        }
        write_leftover(f, self.0.pool)
    }
}

/// Final summary for a finished run.
pub struct SummaryReport<'a>(pub &'a RunReport);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Summary ===")?;
        for instance in &self.0.instances {
            writeln!(
                f,
                "Instance {} served {} parties, total time: {} ticks.",
                instance.id, instance.parties_served, instance.total_time_served
            )?;
        }
        writeln!(f, "Parties formed: {}", self.0.parties_formed())?;
        write_leftover(f, self.0.leftover)
    }
}

fn write_leftover(f: &mut fmt::Formatter<'_>, pool: PoolCounts) -> fmt::Result {
    writeln!(
        f,
        "Leftover players: Tanks: {}, Healers: {}, DPS: {}",
        pool.tanks, pool.healers, pool.dps
    )
}
