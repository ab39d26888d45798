pub mod config;
pub mod logging;
pub mod report;

pub use config::{load_config, log_config};
pub use logging::init_logging;
pub use report::{collect_lines, HostReport};
