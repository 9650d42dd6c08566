mod cli;

use beep_core::{AliasTable, NativePlayer, Platform, Player};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    cli::init_logging();
    let platform = Platform::current();
    let player = NativePlayer::for_platform(platform);
    let table = AliasTable::for_platform(platform);
    debug!(platform = platform.as_str(), player = ?player, "selected backend");

    let code = cli::run(
        cli::collect_args(),
        player.as_ref().map(|player| player as &dyn Player),
        &table,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );
    ExitCode::from(code)
}
