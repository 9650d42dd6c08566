mod bell;
mod dispatch;
mod options;
mod platform;
mod player;
mod sounds;

pub use bell::{ring_bell, BELL_INTERVAL};
pub use dispatch::{dispatch, PlaybackMode, PlaybackOutcome};
pub use options::{ArgError, Options};
pub use platform::Platform;
pub use player::{NativePlayer, PlaySettings, Player, PlayerError};
pub use sounds::{resolve_sounds, AliasTable};
