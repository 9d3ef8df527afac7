use log::info;

use crate::{
    algo::tabular::{QLearningAgent, QLearningConfig, QTable},
    env::{DiscreteActionSpace, Environment},
    error::ConfigError,
    gym::{GridSpatialConfig, GridSpatialEnv},
};

/// Configuration for one training run
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to run
    pub episodes: usize,
    /// Side length of the grid to train on
    pub grid_size: usize,
    /// Base seed; episode `i` resets the environment with `seed + i`
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 300,
            grid_size: 10,
            seed: 42,
        }
    }
}

/// The artifacts of a completed training run
///
/// Downstream consumers (curve plotting, table persistence, the dashboard)
/// only ever see these two shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRun {
    /// Per-episode returns, in episode order
    pub returns: Vec<f32>,
    /// The learned value table
    pub q_table: QTable,
}

/// Train a fresh Q-learning agent on a fresh grid environment
///
/// Builds one [`GridSpatialEnv`] and one [`QLearningAgent`] from the run
/// configuration, then for each episode: resets the environment with the
/// derived per-episode seed, loops select / step / update until the
/// environment reports the episode done, and decays epsilon exactly once
/// before recording the episode return. Progress is logged roughly every
/// 10% of episodes.
pub fn run(config: &TrainConfig) -> Result<TrainingRun, ConfigError> {
    let env_config = GridSpatialConfig {
        grid_size: config.grid_size,
        seed: Some(config.seed),
        ..GridSpatialConfig::default()
    };
    let mut env = GridSpatialEnv::new(env_config)?;

    let agent_config = QLearningConfig {
        n_states: env.n_states(),
        n_actions: env.actions().len(),
        seed: Some(config.seed),
        ..QLearningConfig::default()
    };
    let mut agent = QLearningAgent::new(agent_config)?;

    let report_every = (config.episodes / 10).max(1);
    let mut returns = Vec::with_capacity(config.episodes);
    for episode in 0..config.episodes {
        let (mut state, _pois) = env.reset(Some(config.seed + episode as u64));
        let mut total = 0.0;
        loop {
            let action = agent.select_action(state);
            let transition = env.step(action);
            let done = transition.is_done();
            agent.update(state, action, transition.reward, transition.state, done);
            state = transition.state;
            total += transition.reward;
            if done {
                break;
            }
        }
        agent.decay_epsilon();
        returns.push(total);

        if (episode + 1) % report_every == 0 {
            info!(
                "episode {}/{} | return {:.2} | epsilon {:.3}",
                episode + 1,
                config.episodes,
                total,
                agent.epsilon(),
            );
        }
    }

    Ok(TrainingRun {
        returns,
        q_table: agent.into_q_table(),
    })
}
