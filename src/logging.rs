use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target, WriteStyle};

pub const LOG_ENV: &str = "JOTTER_LOG";

/// Send log records to `path`. The terminal belongs to the UI, so nothing is
/// ever written to stderr.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::new().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format_timestamp_millis()
        .try_init()
        .map_err(io::Error::other)
}
