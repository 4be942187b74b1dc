use std::env;

pub const ENV_VAR: &str = "SOLVILO_ENV";

/// Whether the process runs in development mode.
pub fn is_development() -> bool {
    // 1. SOLVILO_ENV wins when set
    if let Ok(env_val) = env::var(ENV_VAR) {
        return env_val == "development";
    }
    // 2. Otherwise debug builds count as development
    cfg!(debug_assertions)
}
