use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Target};
use rengui_editor::config::EditorConfig;

use crate::config_gen;

pub fn init(config_path: &str, quiet: bool) {
    config_gen::ensure_config_exists(config_path);

    if let Err(e) = rengui_shared::config::init(config_path) {
        eprintln!("Config load warning: {}", e);
    }

    init_logger(quiet);
}

struct TeeWriter<W1, W2>(W1, W2);

impl<W1: Write, W2: Write> Write for TeeWriter<W1, W2> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.0.write(buf)?;
        self.1.write_all(&buf[..n])?;
        Ok(n)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()?;
        self.1.flush()?;
        Ok(())
    }
}

/// Logs go to `<log_path>/rengui.log`, and to stderr unless `quiet`, so the
/// shell's own output on stdout stays clean.
fn init_logger(quiet: bool) {
    let cfg: EditorConfig = rengui_shared::config::get("editor");
    let mut builder = Builder::from_env(env_logger::Env::default().default_filter_or(&cfg.log_level));

    if let Err(e) = fs::create_dir_all(&cfg.log_path) {
        eprintln!("Failed to create log dir: {}", e);
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(Path::new(&cfg.log_path).join("rengui.log"));

    match (log_file, quiet) {
        (Ok(file), true) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        (Ok(file), false) => {
            builder.target(Target::Pipe(Box::new(TeeWriter(std::io::stderr(), file))));
        }
        (Err(e), _) => {
            eprintln!("Failed to open log file: {}, logging to stderr", e);
            builder.target(Target::Stderr);
        }
    }

    builder.init();
}
