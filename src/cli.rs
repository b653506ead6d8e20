use crate::application::{SessionConfig, DEFAULT_LOGIN_DELAY, DEFAULT_LOGOUT_DELAY};
use crate::infrastructure::{DEFAULT_LOG_FILE, DEFAULT_SESSION_FILE};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "captrack")]
#[command(version)]
#[command(about = "CapTrack capstone project tracker (demo mode)")]
pub struct Cli {
    /// Simulated sign-in time in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_LOGIN_DELAY.as_millis() as u64)]
    pub login_delay_ms: u64,

    /// Simulated sign-out time in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_LOGOUT_DELAY.as_millis() as u64)]
    pub logout_delay_ms: u64,

    /// Keep the signed-in user in the session file between runs
    #[arg(long)]
    pub remember: bool,

    /// Where the remembered session is stored
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,

    /// Where log output is written
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            login_delay: Duration::from_millis(self.login_delay_ms),
            logout_delay: Duration::from_millis(self.logout_delay_ms),
        }
    }
}
