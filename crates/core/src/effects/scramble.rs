use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Glyphs shown in place of characters that are not revealed yet.
pub const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&*";
/// Seconds between scramble frames.
pub const FRAME_SECS: f64 = 0.030;
/// Frames per revealed character.
const FRAMES_PER_CHAR: f64 = 3.0;

/// Terminal-style text reveal: characters left of the cursor are final, the
/// rest cycle through random glyphs.
#[derive(Debug, Clone)]
pub struct TextScramble {
    text: Vec<char>,
    delay_left: f64,
    pending: f64,
    frames: u32,
    finalized: usize,
    display: String,
    done: bool,
    rng: StdRng,
}

impl TextScramble {
    pub fn new(text: &str, delay: f64, seed: u64) -> Self {
        Self {
            text: text.chars().collect(),
            delay_left: delay.max(0.0),
            pending: 0.0,
            frames: 0,
            finalized: 0,
            display: String::new(),
            done: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Current rendering; empty until the delay has passed.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by `dt` seconds. Returns how many characters became final,
    /// one tick each.
    pub fn advance(&mut self, dt: f64) -> usize {
        if self.done || dt <= 0.0 {
            return 0;
        }

        let mut dt = dt;
        if self.delay_left > 0.0 {
            self.delay_left -= dt;
            if self.delay_left > 0.0 {
                return 0;
            }
            dt = -self.delay_left;
            self.delay_left = 0.0;
        }

        self.pending += dt;
        let mut ticks = 0;
        // The first frame fires as soon as the delay elapses.
        while !self.done && (self.display.is_empty() || self.pending >= FRAME_SECS) {
            if !self.display.is_empty() {
                self.pending -= FRAME_SECS;
            }
            ticks += self.frame();
        }
        ticks
    }

    fn frame(&mut self) -> usize {
        let cursor = f64::from(self.frames) / FRAMES_PER_CHAR;
        let whole = cursor.floor() as usize;
        let ticked = whole.saturating_sub(self.finalized);
        self.finalized = self.finalized.max(whole);

        let rng = &mut self.rng;
        self.display = self
            .text
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if (i as f64) < cursor {
                    c
                } else {
                    char::from(GLYPHS[rng.gen_range(0..GLYPHS.len())])
                }
            })
            .collect();
        // Keep a one-character placeholder so an empty text still counts as started.
        if self.display.is_empty() {
            self.display.push(' ');
        }

        if cursor >= self.text.len() as f64 {
            self.done = true;
        }
        self.frames += 1;
        ticked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_delay() {
        let mut s = TextScramble::new("WORLDS", 0.5, 1);
        assert_eq!(s.advance(0.4), 0);
        assert_eq!(s.display(), "");
        s.advance(0.1);
        assert_eq!(s.display().chars().count(), 6);
    }

    #[test]
    fn scrambled_glyphs_come_from_the_charset() {
        let mut s = TextScramble::new("hello", 0.0, 3);
        s.advance(0.001);
        assert!(
            s.display()
                .bytes()
                .all(|b| GLYPHS.contains(&b))
        );
    }

    #[test]
    fn reveals_one_character_per_three_frames() {
        let text = "PHASE";
        let mut s = TextScramble::new(text, 0.0, 9);
        // Frame 0 is fully scrambled; frames 3, 6, .. 15 each finalise one character.
        let mut ticks = s.advance(0.001);
        for _ in 0..15 {
            ticks += s.advance(FRAME_SECS);
        }
        assert!(s.is_done());
        assert_eq!(s.display(), text);
        assert_eq!(ticks, text.len());
    }

    #[test]
    fn large_step_catches_up() {
        let mut s = TextScramble::new("SYSTEM LINK", 0.2, 4);
        let ticks = s.advance(5.0);
        assert!(s.is_done());
        assert_eq!(s.display(), "SYSTEM LINK");
        assert_eq!(ticks, 11);
        assert_eq!(s.advance(1.0), 0);
    }
}
