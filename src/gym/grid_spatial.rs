use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::{FromRepr, VariantArray};

use crate::{
    env::{DiscreteActionSpace, Environment, Transition},
    error::ConfigError,
};

/// Movement actions, with their discrete codes
///
/// Codes outside `0..4` fail the conversion and are treated by the
/// environment as doing nothing.
#[derive(FromRepr, VariantArray, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Move {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

/// A point of interest: a tagged grid cell
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Poi {
    pub row: usize,
    pub col: usize,
    pub type_id: usize,
}

/// Configuration for a [`GridSpatialEnv`]
#[derive(Debug, Clone)]
pub struct GridSpatialConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Number of POIs generated per episode
    pub n_pois: usize,
    /// Number of distinct POI types
    pub n_types: usize,
    /// Chebyshev radius of the co-location window
    pub radius: usize,
    /// Type pairs whose co-location is rewarded
    pub target_pairs: Vec<(usize, usize)>,
    /// Steps per episode before termination
    pub max_steps: usize,
    /// Seed for the environment's random stream
    pub seed: Option<u64>,
}

impl Default for GridSpatialConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            n_pois: 30,
            n_types: 3,
            radius: 2,
            target_pairs: vec![(0, 1), (1, 2)],
            max_steps: 100,
            seed: None,
        }
    }
}

/// A toy spatial grid environment populated with typed points of interest
///
/// The agent moves on a square grid and is rewarded whenever its
/// neighborhood contains both members of a declared co-location target
/// pair. States are the agent's (row, col) encoded as a single discrete
/// index in `[0, grid_size^2)`, and episodes terminate after a fixed number
/// of steps.
pub struct GridSpatialEnv {
    config: GridSpatialConfig,
    pois: Vec<Poi>,
    agent: (usize, usize),
    t: usize,
    rng: StdRng,
}

impl GridSpatialEnv {
    /// Initialize the environment and generate a first episode layout
    ///
    /// Fails with a [`ConfigError`] when a size that must be positive is
    /// zero, or when `n_pois` exceeds the number of distinct
    /// (row, col, type) triples the grid can hold, in which case POI
    /// sampling could never collect enough of them.
    pub fn new(config: GridSpatialConfig) -> Result<Self, ConfigError> {
        if config.grid_size == 0 {
            return Err(ConfigError::ZeroSize { name: "grid_size" });
        }
        if config.n_types == 0 {
            return Err(ConfigError::ZeroSize { name: "n_types" });
        }
        if config.max_steps == 0 {
            return Err(ConfigError::ZeroSize { name: "max_steps" });
        }
        let capacity = config.grid_size * config.grid_size * config.n_types;
        if config.n_pois > capacity {
            return Err(ConfigError::PoiOverflow {
                n_pois: config.n_pois,
                grid_size: config.grid_size,
                n_types: config.n_types,
                capacity,
            });
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut env = Self {
            config,
            pois: Vec::new(),
            agent: (0, 0),
            t: 0,
            rng,
        };
        env.reset(None);
        Ok(env)
    }

    /// Number of discrete states
    pub fn n_states(&self) -> usize {
        self.config.grid_size * self.config.grid_size
    }

    /// Encode a grid position as a discrete state index
    pub fn encode(&self, row: usize, col: usize) -> usize {
        row * self.config.grid_size + col
    }

    /// Invert [`encode`](GridSpatialEnv::encode)
    pub fn decode(&self, state: usize) -> (usize, usize) {
        (state / self.config.grid_size, state % self.config.grid_size)
    }

    /// The POIs of the current episode
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    fn sample_pois(&mut self) -> Vec<Poi> {
        // Rejection sampling into a set-backed accumulator: duplicates are
        // discarded, and insertion order keeps the collected list a pure
        // function of the stream. Termination is guaranteed by the capacity
        // check at construction.
        let size = self.config.grid_size;
        let mut seen = HashSet::with_capacity(self.config.n_pois);
        let mut pois = Vec::with_capacity(self.config.n_pois);
        while pois.len() < self.config.n_pois {
            let poi = Poi {
                row: self.rng.gen_range(0..size),
                col: self.rng.gen_range(0..size),
                type_id: self.rng.gen_range(0..self.config.n_types),
            };
            if seen.insert(poi) {
                pois.push(poi);
            }
        }
        pois
    }

    /// Whether any target pair is fully present within the radius window
    /// centered on (row, col)
    fn has_colocation(&self, row: usize, col: usize) -> bool {
        let radius = self.config.radius;
        let row_min = row.saturating_sub(radius);
        let row_max = (row + radius).min(self.config.grid_size - 1);
        let col_min = col.saturating_sub(radius);
        let col_max = (col + radius).min(self.config.grid_size - 1);

        let types_here: HashSet<usize> = self
            .pois
            .iter()
            .filter(|p| {
                (row_min..=row_max).contains(&p.row) && (col_min..=col_max).contains(&p.col)
            })
            .map(|p| p.type_id)
            .collect();

        self.config
            .target_pairs
            .iter()
            .any(|&(a, b)| types_here.contains(&a) && types_here.contains(&b))
    }

    /// Draw a human-readable snapshot of the grid
    ///
    /// POI cells are marked with their type digit and the agent with `A`.
    /// Diagnostic output only.
    pub fn render(&self) -> String {
        let size = self.config.grid_size;
        let mut grid = vec![vec!['.'; size]; size];
        for poi in &self.pois {
            grid[poi.row][poi.col] = (b'0' + (poi.type_id % 10) as u8) as char;
        }
        let (row, col) = self.agent;
        grid[row][col] = 'A';
        grid.into_iter()
            .map(|cells| cells.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Environment for GridSpatialEnv {
    type State = usize;
    type Action = usize;
    type Info = Vec<Poi>;

    fn reset(&mut self, seed: Option<u64>) -> (Self::State, Self::Info) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.t = 0;
        self.pois = self.sample_pois();
        let size = self.config.grid_size;
        self.agent = (self.rng.gen_range(0..size), self.rng.gen_range(0..size));
        (self.encode(self.agent.0, self.agent.1), self.pois.clone())
    }

    fn step(&mut self, action: Self::Action) -> Transition<Self::State> {
        self.t += 1;

        // Moves that would leave the grid, like action codes outside the
        // recognized four, leave the agent in place.
        let size = self.config.grid_size;
        let (mut row, mut col) = self.agent;
        match Move::from_repr(action) {
            Some(Move::Up) if row > 0 => row -= 1,
            Some(Move::Right) if col < size - 1 => col += 1,
            Some(Move::Down) if row < size - 1 => row += 1,
            Some(Move::Left) if col > 0 => col -= 1,
            _ => {}
        }
        self.agent = (row, col);

        Transition {
            state: self.encode(row, col),
            reward: if self.has_colocation(row, col) { 1.0 } else { 0.0 },
            terminated: self.t >= self.config.max_steps,
            truncated: false,
        }
    }
}

impl DiscreteActionSpace for GridSpatialEnv {
    fn actions(&self) -> Vec<Self::Action> {
        Move::VARIANTS.iter().map(|&m| m as usize).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(config: GridSpatialConfig) -> GridSpatialEnv {
        GridSpatialEnv::new(config).unwrap()
    }

    fn small() -> GridSpatialEnv {
        env(GridSpatialConfig {
            grid_size: 5,
            n_pois: 10,
            max_steps: 5,
            seed: Some(0),
            ..Default::default()
        })
    }

    #[test]
    fn rejects_infeasible_poi_density() {
        let config = GridSpatialConfig {
            grid_size: 2,
            n_types: 2,
            n_pois: 9, // capacity is 2 * 2 * 2 = 8
            ..Default::default()
        };
        assert!(matches!(
            GridSpatialEnv::new(config),
            Err(ConfigError::PoiOverflow { capacity: 8, .. })
        ));
    }

    #[test]
    fn rejects_zero_sizes() {
        let no_grid = GridSpatialConfig {
            grid_size: 0,
            n_pois: 0,
            ..Default::default()
        };
        assert!(GridSpatialEnv::new(no_grid).is_err());

        let no_types = GridSpatialConfig {
            n_types: 0,
            n_pois: 0,
            ..Default::default()
        };
        assert!(GridSpatialEnv::new(no_types).is_err());

        let no_steps = GridSpatialConfig {
            max_steps: 0,
            ..Default::default()
        };
        assert!(GridSpatialEnv::new(no_steps).is_err());
    }

    #[test]
    fn reset_samples_exactly_n_distinct_pois() {
        let mut env = small();
        let (state, pois) = env.reset(Some(3));
        assert!(state < env.n_states());
        assert_eq!(pois.len(), 10);
        let unique: HashSet<Poi> = pois.iter().copied().collect();
        assert_eq!(unique.len(), pois.len(), "POIs are distinct");
        for poi in &pois {
            assert!(poi.row < 5 && poi.col < 5 && poi.type_id < 3);
        }
    }

    #[test]
    fn reset_with_equal_seeds_is_reproducible() {
        let mut env = small();
        let first = env.reset(Some(99));
        let again = env.reset(Some(99));
        assert_eq!(first, again);
    }

    #[test]
    fn encoding_is_a_bijection() {
        let env = small();
        for row in 0..5 {
            for col in 0..5 {
                let state = env.encode(row, col);
                assert!(state < env.n_states());
                assert_eq!(env.decode(state), (row, col));
            }
        }
    }

    #[test]
    fn moves_clamp_at_the_borders() {
        let mut env = small();
        env.reset(Some(0));

        env.agent = (0, 0);
        env.step(Move::Up as usize);
        assert_eq!(env.agent, (0, 0), "up from the top row is a no-op");
        env.step(Move::Left as usize);
        assert_eq!(env.agent, (0, 0), "left from the first column is a no-op");

        env.agent = (4, 4);
        env.step(Move::Down as usize);
        assert_eq!(env.agent, (4, 4), "down from the bottom row is a no-op");
        env.step(Move::Right as usize);
        assert_eq!(env.agent, (4, 4), "right from the last column is a no-op");

        env.agent = (2, 2);
        env.step(Move::Up as usize);
        assert_eq!(env.agent, (1, 2));
    }

    #[test]
    fn unrecognized_action_codes_are_no_ops() {
        let mut env = small();
        env.reset(Some(0));
        env.agent = (2, 2);
        let transition = env.step(7);
        assert_eq!(env.agent, (2, 2));
        assert_eq!(env.decode(transition.state), (2, 2));
    }

    #[test]
    fn colocated_target_pair_rewards_the_window() {
        let mut env = env(GridSpatialConfig {
            grid_size: 5,
            n_pois: 2,
            n_types: 2,
            radius: 1,
            target_pairs: vec![(0, 1)],
            max_steps: 10,
            seed: Some(0),
        });
        env.pois = vec![
            Poi { row: 2, col: 2, type_id: 0 },
            Poi { row: 2, col: 3, type_id: 1 },
        ];

        assert!(env.has_colocation(2, 2), "window covers both types");
        assert!(!env.has_colocation(0, 0), "far corner sees neither");

        // Stepping into the covering window yields the reward itself.
        env.agent = (2, 1);
        let transition = env.step(Move::Right as usize);
        assert_eq!(transition.reward, 1.0);
        env.agent = (0, 1);
        let transition = env.step(Move::Left as usize);
        assert_eq!(transition.reward, 0.0);
    }

    #[test]
    fn terminates_on_exactly_max_steps() {
        let mut env = small();
        env.reset(Some(0));
        for step in 1..=5 {
            let transition = env.step(Move::Right as usize);
            assert_eq!(transition.terminated, step == 5);
            assert!(!transition.truncated, "no truncation path exists");
        }
    }

    #[test]
    fn render_marks_pois_and_agent() {
        let mut env = small();
        env.reset(Some(0));
        env.pois = vec![Poi { row: 0, col: 1, type_id: 2 }];
        env.agent = (4, 4);
        let snapshot = env.render();
        let lines: Vec<&str> = snapshot.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], ".2...");
        assert_eq!(lines[4], "....A");
    }
}
