mod load;
mod types;

pub use load::{get_malt_data_dir, load_default};
pub use types::{AppConfig, BrewConfig, LoggingConfig, RunnerConfig};
