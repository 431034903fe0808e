pub mod nearest;
pub mod peak_policy;
pub mod rating_affinity;
pub mod strategy;
pub mod types;

use bevy_ecs::prelude::Resource;

pub use nearest::NearestDriver;
pub use peak_policy::PeakHourPolicy;
pub use rating_affinity::RatingAffinity;
pub use strategy::AssignmentStrategy;
pub use types::{DriverCandidate, RideContext};

/// Resource wrapper for the assignment strategy trait object.
#[derive(Resource)]
pub struct AssignmentStrategyResource(pub Box<dyn AssignmentStrategy>);

impl AssignmentStrategyResource {
    pub fn new(strategy: Box<dyn AssignmentStrategy>) -> Self {
        Self(strategy)
    }
}

impl std::ops::Deref for AssignmentStrategyResource {
    type Target = dyn AssignmentStrategy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
