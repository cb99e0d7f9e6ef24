use crate::timer::Interval;
use std::time::Duration;

pub const MARQUEE_STEP: Duration = Duration::from_millis(200);

/// Rotates a title one character to the left every step
pub struct Marquee {
    chars: Vec<char>,
    offset: usize,
    interval: Interval,
}

impl Marquee {
    pub fn new(text: &str, start: Duration) -> Self {
        Marquee {
            chars: text.chars().collect(),
            offset: 0,
            interval: Interval::new(MARQUEE_STEP, start),
        }
    }

    /// The current rotation of the text
    pub fn text(&self) -> String {
        self.chars[self.offset..]
            .iter()
            .chain(self.chars[..self.offset].iter())
            .collect()
    }

    /// Advances to `now`; returns the new title when it changed
    pub fn poll(&mut self, now: Duration) -> Option<String> {
        let steps = self.interval.poll(now).len();
        if steps == 0 || self.chars.is_empty() {
            return None;
        }
        self.offset = (self.offset + steps) % self.chars.len();
        Some(self.text())
    }

    pub fn stop(&mut self) {
        self.interval.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_one_char_per_step() {
        let mut marquee = Marquee::new("abc", Duration::ZERO);
        assert_eq!(marquee.text(), "abc");
        assert_eq!(marquee.poll(Duration::from_millis(100)), None);
        assert_eq!(marquee.poll(Duration::from_millis(200)).as_deref(), Some("bca"));
        assert_eq!(marquee.poll(Duration::from_millis(600)).as_deref(), Some("abc"));
    }

    #[test]
    fn handles_multibyte_text() {
        let mut marquee = Marquee::new("a😝b", Duration::ZERO);
        assert_eq!(marquee.poll(Duration::from_millis(200)).as_deref(), Some("😝ba"));
    }

    #[test]
    fn stopped_marquee_stays_put() {
        let mut marquee = Marquee::new("abc", Duration::ZERO);
        marquee.stop();
        assert_eq!(marquee.poll(Duration::from_secs(5)), None);
        assert_eq!(marquee.text(), "abc");
    }

    #[test]
    fn empty_text_never_changes() {
        let mut marquee = Marquee::new("", Duration::ZERO);
        assert_eq!(marquee.poll(Duration::from_secs(1)), None);
    }
}
