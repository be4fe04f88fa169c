use std::path::PathBuf;

use clap::Parser;

const APP_DIR: &str = "five-tasks";
const STORE_FILE: &str = "store.json";
const LOG_FILE: &str = "five-tasks.log";

#[derive(Parser, Debug)]
#[command(
    name = "five-tasks",
    version,
    about = "Five reorderable tasks in your terminal"
)]
pub struct Cli {
    /// Key-value store holding the tasks and widget width
    #[arg(long = "store", value_name = "PATH")]
    store_path: Option<PathBuf>,
    /// File to write logs to
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `five_tasks=trace`
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Do not play a chime when a task is done
    #[arg(long)]
    mute: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
    pub mute: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        Self::resolve(cli, default_data_dir())
    }

    fn resolve(cli: Cli, data_dir: PathBuf) -> Self {
        Self {
            store_path: cli.store_path.unwrap_or_else(|| data_dir.join(STORE_FILE)),
            log_file: cli.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE)),
            log_level: cli.log_level,
            mute: cli.mute,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
