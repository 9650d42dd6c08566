use anyhow::{Context, Result};
use beep_core::{
    dispatch, ring_bell, AliasTable, Options, PlaybackOutcome, Player, BELL_INTERVAL,
};
use shell_words::split;
use std::ffi::OsString;
use std::io::Write;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

pub(crate) const EXIT_OK: u8 = 0;
pub(crate) const EXIT_USAGE: u8 = 2;

const DEFAULT_ARGS_ENV: &str = "BEEP_DEFAULT_ARGS";

const USAGE: &str = "\
Play a short notification sound, e.g. `make && beep`.

Usage: beep [sounds...] [options]

Sounds are aliases (see --list-sounds) or paths to audio files.
Unknown names play the default sound.

Options:
  -s, --sound <name|path>        Add a sound, may be repeated
  -v, --volume <0-100>           Volume in percent [default: 100]
  -r, --repeat <1-50>            Play the whole sequence this many times [default: 1]
      --gap <0-10000>            Milliseconds between sounds [default: 10]
      --sequence-gap <0-10000>   Milliseconds between repeats [default: 25]
  -d, --duration-ms <0-60000>    Cap each sound, 0 plays it fully [default: 250]
      --wait                     Wait for playback to finish (default)
      --no-wait                  Return right away when playing a single sound once
  -l, --list-sounds              List the sound aliases for this platform
  -V, --version                  Print version
  -h, --help                     Print this help

Environment:
  BEEP_DEFAULT_ARGS              Arguments applied before the command line
  RUST_LOG                       Log filter [default: warn]
";

pub(crate) fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `BEEP_DEFAULT_ARGS` followed by the process arguments, so the command line wins.
pub(crate) fn collect_args() -> Vec<OsString> {
    let raw = std::env::var(DEFAULT_ARGS_ENV).ok();
    let defaults = split_default_args(raw.as_deref()).unwrap_or_else(|err| {
        warn!("ignoring default arguments: {err:#}");
        Vec::new()
    });
    merge_args(defaults, std::env::args_os().skip(1))
}

// Command-line arguments are passed through untouched; file names need not be UTF-8.
fn merge_args<I>(defaults: Vec<String>, command_line: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    defaults
        .into_iter()
        .map(OsString::from)
        .chain(command_line)
        .collect()
}

fn split_default_args(raw: Option<&str>) -> Result<Vec<String>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    split(raw).with_context(|| format!("{DEFAULT_ARGS_ENV} is not valid shell syntax"))
}

/// Runs one invocation and returns the process exit code.
///
/// Only a malformed command line produces a non-zero code; playback problems ring the
/// terminal bell on `stdout` instead.
pub(crate) fn run<O, E>(
    args: Vec<OsString>,
    player: Option<&dyn Player>,
    table: &AliasTable,
    stdout: &mut O,
    stderr: &mut E,
) -> u8
where
    O: Write,
    E: Write,
{
    let options = match Options::parse(args) {
        Ok(options) => options,
        Err(err) => {
            let _ = writeln!(stderr, "beep: {err}\n");
            let _ = stderr.write_all(USAGE.as_bytes());
            return EXIT_USAGE;
        }
    };

    if options.help {
        let _ = stdout.write_all(USAGE.as_bytes());
        return EXIT_OK;
    }
    if options.version {
        let _ = writeln!(stdout, "beep {}", env!("CARGO_PKG_VERSION"));
        return EXIT_OK;
    }
    if options.list_sounds {
        if let Err(err) = print_sounds(stdout, table) {
            debug!(error = %err, "failed to list sounds");
        }
        return EXIT_OK;
    }

    if dispatch(&options, player, table) == PlaybackOutcome::Failed {
        ring_bell(stdout, options.repeat, BELL_INTERVAL);
    }
    EXIT_OK
}

fn print_sounds<O: Write>(out: &mut O, table: &AliasTable) -> std::io::Result<()> {
    for (alias, path) in table.aliases() {
        writeln!(out, "{alias:<12} {}", path.display())?;
    }
    out.flush()
}
