use std::{error::Error, fs, path::Path};

use rl_spatial::{artifacts, train};

const EPISODES: usize = 300;
const GRID_SIZE: usize = 10;
const SEED: u64 = 42;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = train::TrainConfig {
        episodes: EPISODES,
        grid_size: GRID_SIZE,
        seed: SEED,
    };
    let run = train::run(&config)?;

    let out = Path::new("artifacts");
    fs::create_dir_all(out)?;
    artifacts::save_returns(&run.returns, out.join("returns.csv"))?;
    artifacts::save_q_table(&run.q_table, out.join("q_values.csv"))?;

    Ok(())
}
