//! Synthetic grid world for exercising the learner.
//!
//! The real simulation (intersection physics, dummy traffic, rendering)
//! is an external collaborator; this adapter is the in-repo stand-in that
//! satisfies both ports with just enough structure for the agent to have
//! something to learn: follow the waypoint, but not through a red light.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    ports::{Environment, RoutePlanner},
    types::{Action, Direction, Percept, TrafficLight},
};

/// Steps allotted per route segment when the deadline is set.
const DEADLINE_PER_SEGMENT: i32 = 5;

/// Route lengths are drawn uniformly from this range of segments.
const ROUTE_SEGMENTS: std::ops::RangeInclusive<usize> = 4..=8;

/// Probability that other traffic is present at the intersection.
const TRAFFIC_PROBABILITY: f64 = 0.2;

const HEADINGS: [Direction; 3] = [Direction::Forward, Direction::Left, Direction::Right];

/// Seeded synthetic environment and route planner
///
/// Conditions re-roll after every action. Rewards: following the waypoint
/// on green earns 2.0 (12.0 when it completes the route), any move on red
/// is a −1.0 violation, a legal move off the recommended heading is −0.5,
/// and `Stay` is neutral.
///
/// # Examples
///
/// ```
/// use smartcab::adapters::GridWorld;
/// use smartcab::ports::{Environment, RoutePlanner};
///
/// let mut world = GridWorld::new(Some(42));
/// world.route_to_new_destination();
/// assert!(world.deadline() >= 20);
/// assert!(world.next_waypoint().is_some());
/// ```
#[derive(Debug)]
pub struct GridWorld {
    rng: StdRng,
    light: TrafficLight,
    oncoming: Option<Direction>,
    left: Option<Direction>,
    waypoint: Option<Direction>,
    segments_remaining: usize,
    deadline: i32,
}

impl GridWorld {
    /// Create a new world; a seed makes runs reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_rng(&mut rand::rng())
        };
        let mut world = Self {
            rng,
            light: TrafficLight::Red,
            oncoming: None,
            left: None,
            waypoint: None,
            segments_remaining: 0,
            deadline: 0,
        };
        world.roll_conditions();
        world
    }

    fn roll_conditions(&mut self) {
        self.light = if self.rng.random_bool(0.5) {
            TrafficLight::Green
        } else {
            TrafficLight::Red
        };
        self.oncoming = self.maybe_traffic();
        self.left = self.maybe_traffic();
    }

    fn maybe_traffic(&mut self) -> Option<Direction> {
        if self.rng.random::<f64>() < TRAFFIC_PROBABILITY {
            Some(*HEADINGS.choose(&mut self.rng).unwrap())
        } else {
            None
        }
    }

    fn pick_waypoint(&mut self) {
        self.waypoint = Some(*HEADINGS.choose(&mut self.rng).unwrap());
    }
}

impl Environment for GridWorld {
    fn sense(&self) -> Percept {
        Percept {
            light: self.light,
            oncoming: self.oncoming,
            left: self.left,
        }
    }

    fn deadline(&self) -> i32 {
        self.deadline
    }

    fn act(&mut self, action: Action) -> f64 {
        self.deadline -= 1;

        let on_route = self.waypoint.map(Action::from) == Some(action);
        let reward = match action {
            Action::Stay => 0.0,
            _ if self.light == TrafficLight::Red => -1.0,
            _ if on_route => {
                self.segments_remaining = self.segments_remaining.saturating_sub(1);
                if self.segments_remaining == 0 {
                    self.waypoint = None;
                    12.0
                } else {
                    self.pick_waypoint();
                    2.0
                }
            }
            _ => -0.5,
        };

        self.roll_conditions();
        reward
    }
}

impl RoutePlanner for GridWorld {
    fn route_to_new_destination(&mut self) {
        let segments = self.rng.random_range(ROUTE_SEGMENTS);
        self.segments_remaining = segments;
        self.deadline = segments as i32 * DEADLINE_PER_SEGMENT;
        self.pick_waypoint();
        self.roll_conditions();
    }

    fn next_waypoint(&self) -> Option<Direction> {
        self.waypoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GOAL_REWARD;

    #[test]
    fn new_route_sets_deadline_and_waypoint() {
        let mut world = GridWorld::new(Some(1));
        world.route_to_new_destination();
        assert!(world.next_waypoint().is_some());
        let deadline = world.deadline();
        assert!((20..=40).contains(&deadline));
        assert_eq!(deadline % DEADLINE_PER_SEGMENT, 0);
    }

    #[test]
    fn every_action_consumes_one_step() {
        let mut world = GridWorld::new(Some(2));
        world.route_to_new_destination();
        let before = world.deadline();
        world.act(Action::Stay);
        assert_eq!(world.deadline(), before - 1);
    }

    #[test]
    fn staying_is_always_neutral() {
        let mut world = GridWorld::new(Some(3));
        world.route_to_new_destination();
        for _ in 0..10 {
            assert_eq!(world.act(Action::Stay), 0.0);
        }
    }

    #[test]
    fn moving_on_red_is_a_violation() {
        let mut world = GridWorld::new(Some(4));
        world.route_to_new_destination();
        let mut saw_red_move = false;
        for _ in 0..50 {
            if world.sense().light == TrafficLight::Red {
                assert_eq!(world.act(Action::Forward), -1.0);
                saw_red_move = true;
            } else {
                world.act(Action::Stay);
            }
        }
        assert!(saw_red_move);
    }

    #[test]
    fn completing_the_route_pays_the_goal_reward() {
        let mut world = GridWorld::new(Some(5));
        world.route_to_new_destination();

        // Follow the waypoint on green until the route runs out.
        let mut last_reward = 0.0;
        for _ in 0..1000 {
            let Some(waypoint) = world.next_waypoint() else {
                break;
            };
            if world.sense().light == TrafficLight::Green {
                last_reward = world.act(Action::from(waypoint));
            } else {
                world.act(Action::Stay);
            }
        }

        assert!(world.next_waypoint().is_none());
        assert!(last_reward >= GOAL_REWARD);
    }
}
