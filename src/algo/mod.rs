/// Agents that learn dense tabular value functions
pub mod tabular;
