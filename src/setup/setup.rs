use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use slog::{Drain, Logger};

use super::log_format::SkinnyFormat;

/// init_logger builds the root logger of a daemon or a control tool.
///
/// Records are written to `log_path` if given, otherwise to stderr.
pub fn init_logger(log_path: Option<&Path>) -> io::Result<Logger> {
    let logger = match log_path {
        Some(p) => async_logger(open_log_file(p)?),
        None => async_logger(io::stderr()),
    };

    info!(logger, "logger ready"; "path" => ?log_path);
    Ok(logger)
}

fn async_logger<W>(w: W) -> Logger
where
    W: Write + Send + 'static,
{
    let decorator = slog_term::PlainDecorator::new(w);
    let drain = SkinnyFormat::new(decorator).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}

/// open_log_file opens `path` for appending, creating it and its parent directory if needed.
pub fn open_log_file<P: AsRef<Path>>(path: P) -> io::Result<File> {
    let path = path.as_ref();
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::Other,
            "Unable to get parent directory of log file",
        )
    })?;
    if !parent.as_os_str().is_empty() && !parent.is_dir() {
        fs::create_dir_all(parent)?
    }
    OpenOptions::new().append(true).create(true).open(path)
}
