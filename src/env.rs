/// The result of taking one step in an [`Environment`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<S> {
    /// Observation after the step
    pub state: S,
    /// Reward produced by the step
    pub reward: f32,
    /// Whether the episode reached its terminal condition
    pub terminated: bool,
    /// Whether the episode was cut off before terminating
    pub truncated: bool,
}

impl<S> Transition<S> {
    /// An episode is over when it either terminated or was truncated
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent
/// and a finite state space and action space.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Auxiliary episode data returned alongside the initial state on reset
    type Info;

    /// Reset the environment to an initial state, reseeding its random stream
    /// when `seed` is provided
    ///
    /// **Returns** the initial state and auxiliary episode info
    fn reset(&mut self, seed: Option<u64>) -> (Self::State, Self::Info);

    /// Update the environment in response to an action taken by an agent,
    /// producing a new state and associated reward
    fn step(&mut self, action: Self::Action) -> Transition<Self::State>;
}

/// An environment with a finite, enumerable action set
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions for the current state
    ///
    /// The returned vec should never be empty, instead specify an action that
    /// represents doing nothing if necessary.
    fn actions(&self) -> Vec<Self::Action>;
}
