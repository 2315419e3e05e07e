use std::{io::Write, thread, time::Duration};

/// The two walking frames, alternated while the player moves.
pub const WALK_FRAMES: [&str; 2] = [" n\n| |\n\\_/", "      n\n     | |\n     \\_/"];

/// Blocking pause between animation frames.
///
/// Swapped for [`NoDelay`] in tests so nothing actually sleeps.
pub trait Delay {
    fn pause(&mut self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Returns immediately, remembering how long it was asked to wait.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay {
    pub requested: Duration,
    pub pauses: usize,
}

impl Delay for NoDelay {
    fn pause(&mut self, duration: Duration) {
        self.requested += duration;
        self.pauses += 1;
    }
}

/// Plays `steps` walking frames, pausing `per_step` after each one.
pub fn play_walk<W, D>(
    out: &mut W,
    delay: &mut D,
    steps: usize,
    per_step: Duration,
) -> std::io::Result<()>
where
    W: Write + ?Sized,
    D: Delay + ?Sized,
{
    for i in 0..steps {
        writeln!(out, "{}", WALK_FRAMES[i % WALK_FRAMES.len()])?;
        out.flush()?;
        delay.pause(per_step);
    }
    Ok(())
}

/// Prints a trail of `dots` dots, pausing `per_dot` after each, then ends the line.
pub fn play_escape<W, D>(
    out: &mut W,
    delay: &mut D,
    dots: usize,
    per_dot: Duration,
) -> std::io::Result<()>
where
    W: Write + ?Sized,
    D: Delay + ?Sized,
{
    for _ in 0..dots {
        write!(out, ".")?;
        out.flush()?;
        delay.pause(per_dot);
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_alternates_frames() {
        let mut out = Vec::new();
        let mut delay = NoDelay::default();
        play_walk(&mut out, &mut delay, 3, Duration::from_millis(300)).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = format!("{}\n{}\n{}\n", WALK_FRAMES[0], WALK_FRAMES[1], WALK_FRAMES[0]);
        assert_eq!(text, expected);
        assert_eq!(delay.pauses, 3);
        assert_eq!(delay.requested, Duration::from_millis(900));
    }

    #[test]
    fn escape_prints_dots() {
        let mut out = Vec::new();
        let mut delay = NoDelay::default();
        play_escape(&mut out, &mut delay, 3, Duration::from_millis(600)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "...\n");
        assert_eq!(delay.requested, Duration::from_millis(1_800));
    }

    #[test]
    fn zero_steps_play_nothing() {
        let mut out = Vec::new();
        let mut delay = NoDelay::default();
        play_walk(&mut out, &mut delay, 0, Duration::from_millis(300)).unwrap();
        assert!(out.is_empty());
        assert_eq!(delay.pauses, 0);
    }
}
