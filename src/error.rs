use thiserror::Error;

/// Errors raised while validating a configuration at construction time
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{name}` must be positive")]
    ZeroSize { name: &'static str },

    #[error("`{name}` must be in the interval [{min}, {max}], got {value}")]
    OutOfInterval {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("epsilon bounds are inverted: eps_end {end} exceeds eps_start {start}")]
    InvertedEpsilonBounds { start: f32, end: f32 },

    #[error(
        "{n_pois} POIs cannot fit in a {grid_size}x{grid_size} grid with \
         {n_types} types (capacity {capacity})"
    )]
    PoiOverflow {
        n_pois: usize,
        grid_size: usize,
        n_types: usize,
        capacity: usize,
    },
}

pub(crate) fn check_interval(
    name: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<(), ConfigError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfInterval {
            name,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poi_overflow_display() {
        let e = ConfigError::PoiOverflow {
            n_pois: 80,
            grid_size: 5,
            n_types: 3,
            capacity: 75,
        };
        assert_eq!(
            e.to_string(),
            "80 POIs cannot fit in a 5x5 grid with 3 types (capacity 75)"
        );
    }

    #[test]
    fn check_interval_bounds() {
        assert!(check_interval("alpha", 0.0, 0.0, 1.0).is_ok());
        assert!(check_interval("alpha", 1.0, 0.0, 1.0).is_ok());
        assert!(check_interval("alpha", 1.5, 0.0, 1.0).is_err());
        assert!(check_interval("alpha", -0.1, 0.0, 1.0).is_err());
    }
}
