use std::ffi::OsString;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::Platform;

const PA_VOLUME_NORM: f32 = 65_536.0;
const TIMEOUT_EXPIRED: i32 = 124;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaySettings {
    pub volume: f32,
    pub duration_cap: Option<Duration>,
}

impl Default for PlaySettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            duration_cap: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: &'static str,
        source: std::io::Error,
    },
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: &'static str,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Exit {
        program: &'static str,
        status: ExitStatus,
    },
}

pub trait Player {
    fn name(&self) -> &'static str;

    fn play(&self, sound: &Path, settings: PlaySettings) -> Result<(), PlayerError>;

    fn start(&self, sound: &Path, settings: PlaySettings) -> Result<(), PlayerError>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NativePlayer {
    Afplay,
    // Capped through coreutils `timeout`.
    Paplay,
    PowerShell,
}

impl NativePlayer {
    pub fn for_platform(platform: Platform) -> Option<Self> {
        match platform {
            Platform::MacOs => Some(NativePlayer::Afplay),
            Platform::Windows => Some(NativePlayer::PowerShell),
            Platform::Freedesktop => Some(NativePlayer::Paplay),
            Platform::Other => None,
        }
    }

    fn command(self, sound: &Path, settings: PlaySettings) -> Command {
        let volume = settings.volume.clamp(0.0, 1.0);
        match self {
            NativePlayer::Afplay => {
                let mut command = Command::new("afplay");
                command.arg("-v").arg(format!("{volume:.2}"));
                if let Some(cap) = settings.duration_cap {
                    command.arg("-t").arg(seconds_arg(cap));
                }
                command.arg(sound);
                command
            }
            NativePlayer::Paplay => {
                let mut command = match settings.duration_cap {
                    Some(cap) => {
                        let mut command = Command::new("timeout");
                        command.arg(seconds_arg(cap)).arg("paplay");
                        command
                    }
                    None => Command::new("paplay"),
                };
                let volume = (volume * PA_VOLUME_NORM).round() as u32;
                command.arg(format!("--volume={volume}")).arg(sound);
                command
            }
            NativePlayer::PowerShell => {
                // MediaPlayer resolves relative URIs against its own base, not our cwd.
                let sound = std::path::absolute(sound).unwrap_or_else(|_| sound.to_path_buf());
                let mut command = Command::new("powershell");
                command
                    .arg("-NoProfile")
                    .arg("-NonInteractive")
                    .arg("-Command")
                    .arg(media_player_script(&sound, volume, settings.duration_cap));
                command
            }
        }
    }

    fn accepts(self, status: ExitStatus, settings: PlaySettings) -> bool {
        if status.success() {
            return true;
        }
        self == NativePlayer::Paplay
            && settings.duration_cap.is_some()
            && status.code() == Some(TIMEOUT_EXPIRED)
    }

    fn spawn(self, sound: &Path, settings: PlaySettings) -> Result<Child, PlayerError> {
        let mut command = self.command(sound, settings);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        debug!(player = self.name(), sound = %sound.display(), ?settings, "spawning player");
        command.spawn().map_err(|source| PlayerError::Spawn {
            program: self.name(),
            source,
        })
    }
}

impl Player for NativePlayer {
    fn name(&self) -> &'static str {
        match self {
            NativePlayer::Afplay => "afplay",
            NativePlayer::Paplay => "paplay",
            NativePlayer::PowerShell => "powershell",
        }
    }

    fn play(&self, sound: &Path, settings: PlaySettings) -> Result<(), PlayerError> {
        let mut child = self.spawn(sound, settings)?;
        let status = child.wait().map_err(|source| PlayerError::Wait {
            program: self.name(),
            source,
        })?;
        if !self.accepts(status, settings) {
            return Err(PlayerError::Exit {
                program: self.name(),
                status,
            });
        }
        Ok(())
    }

    fn start(&self, sound: &Path, settings: PlaySettings) -> Result<(), PlayerError> {
        self.spawn(sound, settings).map(drop)
    }
}

fn seconds_arg(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

fn media_player_script(sound: &Path, volume: f32, cap: Option<Duration>) -> OsString {
    let path = sound.display().to_string().replace('\'', "''");
    let mut script = format!(
        "$ErrorActionPreference = 'Stop'; \
         Add-Type -AssemblyName PresentationCore; \
         $p = New-Object System.Windows.Media.MediaPlayer; \
         $p.Open([Uri]'{path}'); \
         $p.Volume = {volume:.2}; \
         $p.Play(); \
         $n = 0; while (-not $p.NaturalDuration.HasTimeSpan -and $n -lt 200) {{ Start-Sleep -Milliseconds 10; $n++ }}; \
         if (-not $p.NaturalDuration.HasTimeSpan) {{ $p.Close(); exit 1 }}; \
         $ms = $p.NaturalDuration.TimeSpan.TotalMilliseconds; "
    );
    if let Some(cap) = cap {
        script.push_str(&format!("$ms = [Math]::Min($ms, {}); ", cap.as_millis()));
    }
    script.push_str("Start-Sleep -Milliseconds ([int]$ms); $p.Close()");
    script.into()
}

#[cfg(test)]
mod tests {
    use super::{media_player_script, NativePlayer, PlaySettings};
    use crate::Platform;
    use std::path::Path;
    use std::time::Duration;

    fn command_line(player: NativePlayer, settings: PlaySettings) -> (String, Vec<String>) {
        let command = player.command(Path::new("/tmp/done.wav"), settings);
        let program = command.get_program().to_string_lossy().into_owned();
        let args = command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        (program, args)
    }

    #[test]
    fn player_per_platform() {
        assert_eq!(
            NativePlayer::for_platform(Platform::MacOs),
            Some(NativePlayer::Afplay)
        );
        assert_eq!(
            NativePlayer::for_platform(Platform::Windows),
            Some(NativePlayer::PowerShell)
        );
        assert_eq!(
            NativePlayer::for_platform(Platform::Freedesktop),
            Some(NativePlayer::Paplay)
        );
        assert_eq!(NativePlayer::for_platform(Platform::Other), None);
    }

    #[test]
    fn afplay_passes_volume_and_cap() {
        let settings = PlaySettings {
            volume: 0.5,
            duration_cap: Some(Duration::from_millis(250)),
        };
        let (program, args) = command_line(NativePlayer::Afplay, settings);
        assert_eq!(program, "afplay");
        assert_eq!(args, vec!["-v", "0.50", "-t", "0.250", "/tmp/done.wav"]);
    }

    #[test]
    fn afplay_without_cap() {
        let (_, args) = command_line(NativePlayer::Afplay, PlaySettings::default());
        assert_eq!(args, vec!["-v", "1.00", "/tmp/done.wav"]);
    }

    #[test]
    fn paplay_cap_goes_through_timeout() {
        let settings = PlaySettings {
            volume: 0.25,
            duration_cap: Some(Duration::from_millis(1500)),
        };
        let (program, args) = command_line(NativePlayer::Paplay, settings);
        assert_eq!(program, "timeout");
        assert_eq!(
            args,
            vec!["1.500", "paplay", "--volume=16384", "/tmp/done.wav"]
        );

        let (program, args) = command_line(NativePlayer::Paplay, PlaySettings::default());
        assert_eq!(program, "paplay");
        assert_eq!(args, vec!["--volume=65536", "/tmp/done.wav"]);
    }

    #[test]
    fn powershell_script_quotes_path() {
        let script = media_player_script(
            Path::new(r"C:\Users\o'neil\done.wav"),
            0.8,
            Some(Duration::from_millis(400)),
        )
        .to_string_lossy()
        .into_owned();
        assert!(script.contains(r"[Uri]'C:\Users\o''neil\done.wav'"));
        assert!(script.contains("$p.Volume = 0.80"));
        assert!(script.contains("[Math]::Min($ms, 400)"));
    }

    #[test]
    fn powershell_script_fails_when_media_never_opens() {
        let command = NativePlayer::PowerShell.command(Path::new("done.wav"), PlaySettings::default());
        let args: Vec<String> = command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args[..3], ["-NoProfile", "-NonInteractive", "-Command"]);

        let script = &args[3];
        assert!(script.starts_with("$ErrorActionPreference = 'Stop';"));
        assert!(script.contains("if (-not $p.NaturalDuration.HasTimeSpan) { $p.Close(); exit 1 }"));
        assert!(!script.contains("else { 1000 }"));

        let absolute = std::path::absolute("done.wav").unwrap();
        let quoted = absolute.display().to_string().replace('\'', "''");
        assert!(script.contains(&format!("[Uri]'{quoted}'")));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_expiry_counts_as_success_for_capped_paplay() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        let expired = ExitStatus::from_raw(124 << 8);
        let capped = PlaySettings {
            volume: 1.0,
            duration_cap: Some(Duration::from_millis(250)),
        };
        assert!(NativePlayer::Paplay.accepts(expired, capped));
        assert!(!NativePlayer::Paplay.accepts(expired, PlaySettings::default()));
        assert!(!NativePlayer::Afplay.accepts(expired, capped));
        assert!(NativePlayer::Afplay.accepts(ExitStatus::from_raw(0), capped));
    }
}
