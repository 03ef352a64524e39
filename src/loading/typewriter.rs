//! Fixed-rate character reveal for the splash stage labels.

use std::time::Duration;

/// Reveals `text` one character per `interval`.
#[derive(Debug, Clone, Copy)]
pub struct Typewriter<'a> {
    text: &'a str,
    interval: Duration,
}

impl<'a> Typewriter<'a> {
    pub fn new(text: &'a str, interval: Duration) -> Self {
        Self { text, interval }
    }

    /// Number of characters visible `elapsed` after the reveal started.
    pub fn visible_chars(&self, elapsed: Duration) -> usize {
        let total = self.text.chars().count();
        if self.interval.is_zero() {
            return total;
        }
        let typed = elapsed.as_nanos() / self.interval.as_nanos();
        usize::try_from(typed).map_or(total, |n| n.min(total))
    }

    /// The prefix shown `elapsed` after the reveal started.
    pub fn visible_at(&self, elapsed: Duration) -> &'a str {
        let n = self.visible_chars(elapsed);
        match self.text.char_indices().nth(n) {
            Some((byte, _)) => &self.text[..byte],
            None => self.text,
        }
    }

    /// Time until the whole label is shown.
    pub fn duration(&self) -> Duration {
        let chars = self.text.chars().count() as u32;
        self.interval * chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn reveals_one_char_per_interval() {
        let tw = Typewriter::new("BREAKING", ms(50));
        assert_eq!(tw.visible_at(ms(0)), "");
        assert_eq!(tw.visible_at(ms(49)), "");
        assert_eq!(tw.visible_at(ms(50)), "B");
        assert_eq!(tw.visible_at(ms(175)), "BRE");
        assert_eq!(tw.visible_at(ms(10_000)), "BREAKING");
    }

    #[test]
    fn respects_char_boundaries() {
        let tw = Typewriter::new("⚡ URGENT", ms(10));
        assert_eq!(tw.visible_at(ms(10)), "⚡");
        assert_eq!(tw.visible_at(ms(20)), "⚡ ");
    }

    #[test]
    fn duration_covers_every_char() {
        let tw = Typewriter::new("abcd", ms(50));
        assert_eq!(tw.duration(), ms(200));
        assert_eq!(tw.visible_at(tw.duration()), "abcd");
    }

    #[test]
    fn zero_interval_shows_everything() {
        let tw = Typewriter::new("now", Duration::ZERO);
        assert_eq!(tw.visible_at(Duration::ZERO), "now");
    }
}
