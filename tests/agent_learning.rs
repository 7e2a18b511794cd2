//! Property-style tests for the learning core: default values, table
//! growth, schedule shape, and agent independence.

use smartcab::{
    Action, AgentConfig, Direction, Percept, QLearningDriver, QTable, State, TrafficLight,
};

fn all_states() -> Vec<State> {
    let lights = [TrafficLight::Red, TrafficLight::Green];
    let headings = [
        None,
        Some(Direction::Forward),
        Some(Direction::Left),
        Some(Direction::Right),
    ];

    let mut states = Vec::new();
    for light in lights {
        for oncoming in headings {
            for left in headings {
                for waypoint in headings {
                    states.push(State::new(
                        Percept {
                            light,
                            oncoming,
                            left,
                        },
                        waypoint,
                    ));
                }
            }
        }
    }
    states
}

#[test]
fn every_unseen_state_reads_zero_for_every_action() {
    let qtable = QTable::new(0.5, 0.25);
    for state in all_states() {
        for action in Action::ALL {
            assert_eq!(qtable.get(state, action), 0.0);
        }
        // The greedy scan must also degrade gracefully on misses.
        assert_eq!(qtable.best_value(state), 0.0);
        assert_eq!(qtable.best_action(state), Action::Right);
    }
}

#[test]
fn table_growth_is_bounded_by_states_times_actions() {
    let mut qtable = QTable::new(0.5, 0.25);
    let states = all_states();
    for &state in &states {
        for action in Action::ALL {
            qtable.update(state, action, 1.0, state);
            qtable.update(state, action, 1.0, state);
        }
    }
    assert_eq!(qtable.len(), states.len() * Action::ALL.len());
}

#[test]
fn warmup_rate_is_exactly_one_then_strictly_decreasing() {
    let config = AgentConfig::new(100).with_eps_cutoff_fraction(0.25);
    let mut agent = QLearningDriver::new(&config);

    let mut rates = Vec::new();
    for _ in 0..100 {
        agent.new_trial();
        rates.push(agent.exploration_rate());
    }

    assert!(rates[..25].iter().all(|&r| r == 1.0));
    for pair in rates[24..].windows(2) {
        assert!(pair[1] < pair[0]);
    }
    // Compounding decay: trial 26 lands at 1/26, trial 27 at 1/(26*27).
    assert!((rates[25] - 1.0 / 26.0).abs() < 1e-15);
    assert!((rates[26] - 1.0 / (26.0 * 27.0)).abs() < 1e-15);
}

#[test]
fn agents_own_independent_tables() {
    let config = AgentConfig::new(10);
    let mut first = QLearningDriver::new(&config).with_seed(1);
    let mut second = QLearningDriver::new(&config).with_seed(2);

    let state = State::new(
        Percept {
            light: TrafficLight::Green,
            oncoming: None,
            left: None,
        },
        Some(Direction::Forward),
    );

    first.new_trial();
    first.choose_action(state);
    first.learn(10.0, state);

    second.new_trial();
    assert!(!first.q_table().is_empty());
    assert!(second.q_table().is_empty());
}

#[test]
fn learning_never_panics_on_unseen_states() {
    let config = AgentConfig::new(100);
    let mut agent = QLearningDriver::new(&config).with_seed(42);
    agent.new_trial();

    for state in all_states() {
        agent.choose_action(state);
        agent.learn(-0.5, state);
    }
    assert!(agent.q_table().len() <= all_states().len() * Action::ALL.len());
}
