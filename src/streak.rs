use std::time::Duration;

/// Longest gap between two clicks that still continues a streak
pub const STREAK_WINDOW: Duration = Duration::from_millis(3000);
/// Clicks needed to raise fast mode
pub const STREAK_LENGTH: u32 = 5;

/// Detects rapid click streaks. Fast mode, once raised, is never cleared.
#[derive(Debug, Default, Clone)]
pub struct ClickStreak {
    count: u32,
    last_click: Option<Duration>,
    fast_mode: bool,
}

impl ClickStreak {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a click at `at`. Returns `true` when this click raised fast mode.
    pub fn register(&mut self, at: Duration) -> bool {
        let mut raised = false;
        match self.last_click {
            Some(previous) if at.saturating_sub(previous) < STREAK_WINDOW => {
                self.count += 1;
                if self.count >= STREAK_LENGTH {
                    raised = !self.fast_mode;
                    self.fast_mode = true;
                    self.count = 0;
                }
            }
            _ => self.count = 1,
        }
        self.last_click = Some(at);
        raised
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }
}
