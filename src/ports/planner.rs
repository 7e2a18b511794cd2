//! Route planner port - waypoint guidance toward the destination
//!
//! Path-finding is not part of the learning core; the agent only consumes
//! the recommended next heading.

use crate::types::Direction;

/// Route planner trait - destination and waypoint guidance
///
/// Like [`super::Environment`], this is a port implementable by a test
/// double. The synthetic adapter implements both ports on one type since
/// a planner needs the world's geometry.
pub trait RoutePlanner {
    /// Reset the planned route for a new trial's destination.
    fn route_to_new_destination(&mut self);

    /// Recommended next move toward the goal, `None` once arrived.
    ///
    /// Queried alongside `sense`: before acting for the decision state and
    /// after acting for the bootstrap state.
    fn next_waypoint(&self) -> Option<Direction>;
}
