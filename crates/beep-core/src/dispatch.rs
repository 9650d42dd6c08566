use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{resolve_sounds, AliasTable, Options, PlaySettings, Player, PlayerError};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlaybackOutcome {
    Played,
    Failed,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlaybackMode {
    Detached,
    Blocking,
}

impl PlaybackMode {
    pub fn select(options: &Options, sound_count: usize) -> Self {
        if sound_count == 1 && options.repeat == 1 && !options.wait {
            PlaybackMode::Detached
        } else {
            PlaybackMode::Blocking
        }
    }
}

/// Plays the sounds named in `options` through `player`.
///
/// Returns [`PlaybackOutcome::Failed`] when there is no player or the player reports an
/// error; the caller is expected to fall back to the terminal bell.
pub fn dispatch(
    options: &Options,
    player: Option<&dyn Player>,
    table: &AliasTable,
) -> PlaybackOutcome {
    let Some(player) = player else {
        warn!("no audio player available on this platform");
        return PlaybackOutcome::Failed;
    };

    let sounds = resolve_sounds(options.sounds.as_slice(), table);
    let settings = options.play_settings();
    let mode = PlaybackMode::select(options, sounds.len());
    debug!(
        player = player.name(),
        ?mode,
        sounds = sounds.len(),
        repeat = options.repeat,
        "dispatching"
    );

    let result = match (mode, sounds.first()) {
        (PlaybackMode::Detached, Some(sound)) => player.start(sound, settings),
        _ => play_sequence(player, &sounds, options, settings),
    };

    match result {
        Ok(()) => PlaybackOutcome::Played,
        Err(err) => {
            warn!(player = player.name(), error = %err, "playback failed");
            PlaybackOutcome::Failed
        }
    }
}

fn play_sequence(
    player: &dyn Player,
    sounds: &[PathBuf],
    options: &Options,
    settings: PlaySettings,
) -> Result<(), PlayerError> {
    for pass in 0..options.repeat {
        if pass > 0 {
            pause(options.sequence_gap());
        }
        for (index, sound) in sounds.iter().enumerate() {
            if index > 0 {
                pause(options.gap());
            }
            player.play(sound, settings)?;
        }
    }
    Ok(())
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
