//! Weight selection
//!
//! Maps the availability descriptor to fixed weight vectors. When task data is
//! absent its weight is redistributed over the passive signals. Health and
//! usage availability do not change the weights.

use crate::types::{DataAvailability, MentalWeights, PhysicalWeights};

/// Mental weights when tasks are logged
pub const MENTAL_WITH_TASKS: MentalWeights = MentalWeights {
    sleep: 0.25,
    focus: 0.20,
    screen_time: 0.12,
    app_balance: 0.10,
    task_completion: 0.33,
};

/// Mental weights when no tasks are logged
pub const MENTAL_WITHOUT_TASKS: MentalWeights = MentalWeights {
    sleep: 0.32,
    focus: 0.28,
    screen_time: 0.20,
    app_balance: 0.20,
    task_completion: 0.0,
};

/// Physical weights when tasks are logged
pub const PHYSICAL_WITH_TASKS: PhysicalWeights = PhysicalWeights {
    steps: 0.20,
    exercise: 0.20,
    activity: 0.18,
    heart_health: 0.15,
    task_completion: 0.27,
};

/// Physical weights when no tasks are logged
pub const PHYSICAL_WITHOUT_TASKS: PhysicalWeights = PhysicalWeights {
    steps: 0.28,
    exercise: 0.26,
    activity: 0.24,
    heart_health: 0.22,
    task_completion: 0.0,
};

/// Select the mental weight vector
pub fn mental_weights(availability: &DataAvailability) -> MentalWeights {
    if availability.has_task_data {
        MENTAL_WITH_TASKS
    } else {
        MENTAL_WITHOUT_TASKS
    }
}

/// Select the physical weight vector
pub fn physical_weights(availability: &DataAvailability) -> PhysicalWeights {
    if availability.has_task_data {
        PHYSICAL_WITH_TASKS
    } else {
        PHYSICAL_WITHOUT_TASKS
    }
}
