//! Data availability resolution
//!
//! Inspects which input categories were supplied. Absence is an expected input
//! state, not a failure.

use crate::types::{DataAvailability, RawHealthData, RawUsageData, TaskData};

/// Resolve the availability descriptor for a set of optional records.
///
/// Task data only counts as available when at least one category has a
/// non-zero total.
pub fn resolve(
    health: Option<&RawHealthData>,
    usage: Option<&RawUsageData>,
    tasks: Option<&TaskData>,
) -> DataAvailability {
    DataAvailability {
        has_health_data: health.is_some(),
        has_usage_data: usage.is_some(),
        has_task_data: tasks.is_some_and(TaskData::has_tasks),
    }
}
