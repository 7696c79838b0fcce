use std::process::ExitCode;

use gimbal_engine::logging::{init_logging, LoggingConfig};
use gimbal_engine::window::{Runtime, RuntimeConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Gimbal Studio".to_string(),
        ..RuntimeConfig::default()
    };

    match Runtime::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("gimbal-studio exited with an error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
