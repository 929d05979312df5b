/// Default interval between patrols.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 20 * 60;
const WARNING_THRESHOLD_SECS: u32 = 5 * 60;

/// Seconds left until the next patrol is due. Ticks once per second while
/// running and stops by itself at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// A running countdown starting at `duration` seconds.
    pub fn started(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: duration > 0,
        }
    }

    /// Resets to the full duration and starts running.
    pub fn restart(&mut self) {
        *self = Self::started(self.duration);
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Resumes unless the countdown already reached zero.
    pub fn resume(&mut self) {
        self.running = self.remaining > 0;
    }

    /// Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Last five minutes.
    pub fn is_warning(&self) -> bool {
        self.remaining <= WARNING_THRESHOLD_SECS
    }

    /// `MM:SS`
    pub fn format(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
