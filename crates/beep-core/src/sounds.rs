use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::Platform;

const MACOS_DEFAULT: &str = "/System/Library/Sounds/Glass.aiff";
const MACOS_SOUNDS: &[(&str, &str)] = &[
    ("default", MACOS_DEFAULT),
    ("basso", "/System/Library/Sounds/Basso.aiff"),
    ("blow", "/System/Library/Sounds/Blow.aiff"),
    ("bottle", "/System/Library/Sounds/Bottle.aiff"),
    ("frog", "/System/Library/Sounds/Frog.aiff"),
    ("funk", "/System/Library/Sounds/Funk.aiff"),
    ("glass", "/System/Library/Sounds/Glass.aiff"),
    ("hero", "/System/Library/Sounds/Hero.aiff"),
    ("morse", "/System/Library/Sounds/Morse.aiff"),
    ("ping", "/System/Library/Sounds/Ping.aiff"),
    ("pop", "/System/Library/Sounds/Pop.aiff"),
    ("purr", "/System/Library/Sounds/Purr.aiff"),
    ("sosumi", "/System/Library/Sounds/Sosumi.aiff"),
    ("submarine", "/System/Library/Sounds/Submarine.aiff"),
    ("tink", "/System/Library/Sounds/Tink.aiff"),
];

const WINDOWS_DEFAULT: &str = r"C:\Windows\Media\Windows Ding.wav";
const WINDOWS_SOUNDS: &[(&str, &str)] = &[
    ("default", WINDOWS_DEFAULT),
    ("ding", r"C:\Windows\Media\Windows Ding.wav"),
    ("chimes", r"C:\Windows\Media\chimes.wav"),
    ("chord", r"C:\Windows\Media\chord.wav"),
    ("notify", r"C:\Windows\Media\notify.wav"),
    ("tada", r"C:\Windows\Media\tada.wav"),
    ("exclamation", r"C:\Windows\Media\Windows Exclamation.wav"),
    ("critical", r"C:\Windows\Media\Windows Critical Stop.wav"),
    ("glass", r"C:\Windows\Media\chimes.wav"),
    ("ping", r"C:\Windows\Media\Windows Ding.wav"),
    ("pop", r"C:\Windows\Media\Windows Pop-up Blocked.wav"),
    ("hero", r"C:\Windows\Media\tada.wav"),
    ("basso", r"C:\Windows\Media\Windows Critical Stop.wav"),
];

const FREEDESKTOP_DEFAULT: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";
const FREEDESKTOP_SOUNDS: &[(&str, &str)] = &[
    ("default", FREEDESKTOP_DEFAULT),
    ("complete", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("bell", "/usr/share/sounds/freedesktop/stereo/bell.oga"),
    ("message", "/usr/share/sounds/freedesktop/stereo/message.oga"),
    ("alarm", "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga"),
    ("error", "/usr/share/sounds/freedesktop/stereo/dialog-error.oga"),
    ("warning", "/usr/share/sounds/freedesktop/stereo/dialog-warning.oga"),
    ("information", "/usr/share/sounds/freedesktop/stereo/dialog-information.oga"),
    ("attention", "/usr/share/sounds/freedesktop/stereo/window-attention.oga"),
    ("glass", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("ping", "/usr/share/sounds/freedesktop/stereo/message-new-instant.oga"),
    ("pop", "/usr/share/sounds/freedesktop/stereo/message.oga"),
    ("tink", "/usr/share/sounds/freedesktop/stereo/bell.oga"),
    ("hero", "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga"),
    ("basso", "/usr/share/sounds/freedesktop/stereo/dialog-error.oga"),
];

#[derive(Debug, Copy, Clone)]
pub struct AliasTable {
    default: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl AliasTable {
    pub const MACOS: AliasTable = AliasTable {
        default: MACOS_DEFAULT,
        entries: MACOS_SOUNDS,
    };
    pub const WINDOWS: AliasTable = AliasTable {
        default: WINDOWS_DEFAULT,
        entries: WINDOWS_SOUNDS,
    };
    pub const FREEDESKTOP: AliasTable = AliasTable {
        default: FREEDESKTOP_DEFAULT,
        entries: FREEDESKTOP_SOUNDS,
    };

    // Unknown platforms have no player, but --list-sounds still needs a table.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::MacOs => Self::MACOS,
            Platform::Windows => Self::WINDOWS,
            Platform::Freedesktop | Platform::Other => Self::FREEDESKTOP,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&'static Path> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, path)| Path::new(*path))
    }

    pub fn default_sound(&self) -> &'static Path {
        Path::new(self.default)
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, &'static Path)> {
        self.entries
            .iter()
            .map(|(alias, path)| (*alias, Path::new(*path)))
    }
}

/// Turns sound tokens into playable files.
///
/// An existing file is used verbatim, otherwise the token is looked up as an alias.
/// Anything else, and an empty token list, falls back to the table's default sound.
pub fn resolve_sounds<S: AsRef<OsStr>>(tokens: &[S], table: &AliasTable) -> Vec<PathBuf> {
    if tokens.is_empty() {
        return vec![table.default_sound().to_path_buf()];
    }
    tokens
        .iter()
        .map(|token| resolve_one(token.as_ref(), table))
        .collect()
}

fn resolve_one(token: &OsStr, table: &AliasTable) -> PathBuf {
    let path = Path::new(token);
    if path.is_file() {
        return path.to_path_buf();
    }
    if let Some(found) = token.to_str().and_then(|name| table.lookup(name)) {
        return found.to_path_buf();
    }
    debug!(sound = %token.to_string_lossy(), "unknown sound, using default");
    table.default_sound().to_path_buf()
}
