use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::debug;

pub const BELL_INTERVAL: Duration = Duration::from_millis(100);

const BEL: &[u8] = b"\x07";

/// Writes `repeat` BEL characters to `out`, `interval` apart.
///
/// Write errors are logged and otherwise ignored; this is the last resort and has nothing
/// left to fall back to.
pub fn ring_bell<W: Write>(out: &mut W, repeat: u32, interval: Duration) {
    for index in 0..repeat {
        if index > 0 && !interval.is_zero() {
            thread::sleep(interval);
        }
        if let Err(err) = out.write_all(BEL).and_then(|()| out.flush()) {
            debug!(error = %err, "failed to ring terminal bell");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ring_bell;
    use std::io::{self, Write};
    use std::time::{Duration, Instant};

    #[test]
    fn writes_one_bell_per_repeat() {
        let mut out = Vec::new();
        ring_bell(&mut out, 3, Duration::ZERO);
        assert_eq!(out, b"\x07\x07\x07");
    }

    #[test]
    fn spaces_bells_apart() {
        let mut out = Vec::new();
        let started = Instant::now();
        ring_bell(&mut out, 3, Duration::from_millis(20));
        assert_eq!(out.len(), 3);
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_swallowed() {
        ring_bell(&mut BrokenPipe, 2, Duration::ZERO);
    }
}
