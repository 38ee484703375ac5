//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, ValidateArgs};
use crate::config::{load_spec, validate_spec};

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_spec(&args.spec).map_err(|e| e.to_string())?;

    match validate_spec(&spec) {
        Ok(()) => {
            log(
                level,
                LogLevel::Normal,
                &format!("✓ {} is valid", args.spec.display()),
            );
            Ok(())
        }
        Err(e) => Err(format!("Invalid spec: {e}")),
    }
}
