use std::{io, path::Path};

use thiserror::Error;

use crate::algo::tabular::QTable;

/// Failures while writing or reading training artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("q-table row {row} is malformed: {reason}")]
    MalformedTable { row: usize, reason: String },
}

/// Write the ordered per-episode returns as CSV
///
/// The learning-curve plotting collaborator consumes this file.
pub fn save_returns<P: AsRef<Path>>(returns: &[f32], path: P) -> Result<(), ArtifactError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["episode", "return"])?;
    for (episode, value) in returns.iter().enumerate() {
        writer.write_record([episode.to_string(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the learned table as CSV, one row per state
///
/// The persistence collaborator stores this matrix for the dashboard to read
/// back.
pub fn save_q_table<P: AsRef<Path>>(q_table: &QTable, path: P) -> Result<(), ArtifactError> {
    let mut writer = csv::Writer::from_path(path)?;
    for state in 0..q_table.n_states() {
        writer.write_record(q_table.row(state).iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table previously written by [`save_q_table`]
pub fn load_q_table<P: AsRef<Path>>(path: P) -> Result<QTable, ArtifactError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut values = Vec::new();
    let mut n_states = 0;
    let mut n_actions = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if row == 0 {
            n_actions = record.len();
        } else if record.len() != n_actions {
            return Err(ArtifactError::MalformedTable {
                row,
                reason: format!("expected {n_actions} columns, found {}", record.len()),
            });
        }
        for field in record.iter() {
            let value = field
                .parse::<f32>()
                .map_err(|e| ArtifactError::MalformedTable {
                    row,
                    reason: e.to_string(),
                })?;
            values.push(value);
        }
        n_states += 1;
    }

    Ok(QTable::from_values(values, n_states, n_actions))
}

/// Shape and summary statistics of a learned table
///
/// The dashboard collaborator reports exactly these figures for a saved
/// table.
#[derive(Debug, Clone, PartialEq)]
pub struct QTableSummary {
    pub n_states: usize,
    pub n_actions: usize,
    pub min: f32,
    pub max: f32,
    /// Mean action value per state, in state order
    pub state_means: Vec<f32>,
}

impl QTableSummary {
    pub fn of(q_table: &QTable) -> Self {
        let values = q_table.as_slice();
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let state_means = (0..q_table.n_states())
            .map(|state| {
                let row = q_table.row(state);
                row.iter().sum::<f32>() / row.len() as f32
            })
            .collect();

        Self {
            n_states: q_table.n_states(),
            n_actions: q_table.n_actions(),
            min,
            max,
            state_means,
        }
    }
}
