pub mod q_learning;
pub mod q_table;

pub use q_learning::{QLearningAgent, QLearningConfig};
pub use q_table::QTable;
