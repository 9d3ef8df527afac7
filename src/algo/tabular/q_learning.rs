use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::{check_interval, ConfigError},
    exploration::{Choice, EpsilonGreedy},
};

use super::QTable;

/// Configuration for the [`QLearningAgent`]
///
/// The space sizes have no meaningful default and must always be set; the
/// hyperparameter defaults are the usual starting point for this environment
/// family.
#[derive(Debug, Clone)]
pub struct QLearningConfig {
    /// Number of discrete states the agent can observe
    pub n_states: usize,
    /// Number of discrete actions available in every state
    pub n_actions: usize,
    /// Learning rate
    pub alpha: f32,
    /// Discount factor
    pub gamma: f32,
    /// Initial exploration rate
    pub eps_start: f32,
    /// Floor the exploration rate never decays below
    pub eps_end: f32,
    /// Multiplicative per-episode exploration decay factor
    pub eps_decay: f32,
    /// Seed for the agent's random stream
    pub seed: Option<u64>,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            n_states: 0,
            n_actions: 0,
            alpha: 0.1,
            gamma: 0.99,
            eps_start: 1.0,
            eps_end: 0.05,
            eps_decay: 0.995,
            seed: None,
        }
    }
}

/// A simple Q-learning agent that utilizes a dense Q-table to learn its
/// environment
///
/// Keeps one value per (state, action) pair and learns with the one-step
/// TD(0) backup. Action selection is epsilon-greedy with an epsilon that
/// decays once per completed episode. All stochastic draws come from the
/// agent's own seeded stream, in a fixed order: the exploration coin first,
/// then the random action when exploring.
pub struct QLearningAgent {
    q_table: QTable,
    exploration: EpsilonGreedy,
    alpha: f32, // learning rate
    gamma: f32, // discount factor
    n_actions: usize,
    rng: StdRng,
}

impl QLearningAgent {
    /// Initialize a new agent
    ///
    /// Fails with a [`ConfigError`] if either space size is zero or a
    /// hyperparameter is outside `[0, 1]`.
    pub fn new(config: QLearningConfig) -> Result<Self, ConfigError> {
        if config.n_states == 0 {
            return Err(ConfigError::ZeroSize { name: "n_states" });
        }
        if config.n_actions == 0 {
            return Err(ConfigError::ZeroSize { name: "n_actions" });
        }
        check_interval("alpha", config.alpha, 0.0, 1.0)?;
        check_interval("gamma", config.gamma, 0.0, 1.0)?;
        let exploration = EpsilonGreedy::new(config.eps_start, config.eps_end, config.eps_decay)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            q_table: QTable::zeros(config.n_states, config.n_actions),
            exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            n_actions: config.n_actions,
            rng,
        })
    }

    /// Choose an action for `state` with the epsilon-greedy policy
    pub fn select_action(&mut self, state: usize) -> usize {
        match self.exploration.choose(&mut self.rng) {
            Choice::Explore => self.rng.gen_range(0..self.n_actions),
            Choice::Exploit => self.q_table.best_action(state),
        }
    }

    /// Apply the one-step Q-learning backup for an observed transition
    ///
    /// Terminal transitions bootstrap from the reward alone; the values of
    /// `next_state` are never read when `done` is set.
    pub fn update(&mut self, state: usize, action: usize, reward: f32, next_state: usize, done: bool) {
        let target = if done {
            reward
        } else {
            reward + self.gamma * self.q_table.max_value(next_state)
        };
        let error = target - self.q_table.get(state, action);
        *self.q_table.get_mut(state, action) += self.alpha * error;
    }

    /// Shrink epsilon once, at the end of a completed episode
    pub fn decay_epsilon(&mut self) {
        self.exploration.decay();
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon()
    }

    /// Read access to the learned values
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Consume the agent, handing the learned table to downstream consumers
    pub fn into_q_table(self) -> QTable {
        self.q_table
    }
}
