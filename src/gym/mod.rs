pub mod grid_spatial;

pub use grid_spatial::{GridSpatialConfig, GridSpatialEnv, Move, Poi};
