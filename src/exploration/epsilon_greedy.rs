use rand::Rng;

use crate::error::{check_interval, ConfigError};

use super::Choice;

/// Epsilon greedy exploration policy with a multiplicative per-episode decay
///
/// Epsilon starts at `eps_start` and is shrunk by a factor of `eps_decay`
/// each time [`decay`](EpsilonGreedy::decay) is called, never falling below
/// `eps_end`. Between decays it is constant, so epsilon is non-increasing
/// over the lifetime of the policy.
pub struct EpsilonGreedy {
    epsilon: f32,
    eps_end: f32,
    eps_decay: f32,
}

impl EpsilonGreedy {
    /// Initialize the policy
    ///
    /// Fails if a parameter is outside `[0, 1]` or the bounds are inverted.
    pub fn new(eps_start: f32, eps_end: f32, eps_decay: f32) -> Result<Self, ConfigError> {
        check_interval("eps_start", eps_start, 0.0, 1.0)?;
        check_interval("eps_end", eps_end, 0.0, 1.0)?;
        check_interval("eps_decay", eps_decay, 0.0, 1.0)?;
        if eps_end > eps_start {
            return Err(ConfigError::InvertedEpsilonBounds {
                start: eps_start,
                end: eps_end,
            });
        }
        Ok(Self {
            epsilon: eps_start,
            eps_end,
            eps_decay,
        })
    }

    /// Current epsilon threshold
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Invoke the policy, drawing the exploration coin from `rng`
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Choice {
        if rng.gen::<f32>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }

    /// Shrink epsilon once, clamping at `eps_end`
    ///
    /// Invoked once per completed episode, never per step.
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.eps_decay).max(self.eps_end);
    }
}
