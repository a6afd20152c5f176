use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

// ============================================================================
// EASING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    OutQuart,
    InOutCubic,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

// ============================================================================
// TWEEN
// ============================================================================

/// Eased progress of one animation, measured from the instant it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            delay: Duration::ZERO,
            duration,
            easing,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Linear fraction of elapsed time, `0` before the delay ends.
    pub fn fraction(&self, elapsed: Duration) -> f64 {
        let Some(running) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        (running.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        self.easing.apply(self.fraction(elapsed))
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        self.fraction(elapsed) >= 1.0
    }
}

// ============================================================================
// COUNTERS
// ============================================================================

lazy_static! {
    static ref STAT_DIGITS: Regex = Regex::new(r"\d+").expect("valid regex");
}

/// Animated stat like "15+" or "98%", counting up from zero once visible.
#[derive(Debug, Clone)]
pub struct Counter {
    text: String,
    target: u64,
    suffix: String,
    tween: Tween,
    started: Option<Duration>,
    shown: u64,
}

impl Counter {
    pub fn new(target: u64, suffix: impl Into<String>, duration: Duration) -> Self {
        let suffix = suffix.into();
        Self {
            text: format!("{target}{suffix}"),
            target,
            suffix,
            tween: Tween::new(duration, Easing::OutQuart),
            started: None,
            shown: 0,
        }
    }

    /// Parse a stat as written in the profile. Digits are collected into the
    /// target; a "+" or "%" anywhere becomes the suffix shown while counting.
    pub fn parse(text: &str, duration: Duration) -> Self {
        let digits: String = STAT_DIGITS
            .find_iter(text)
            .map(|m| m.as_str())
            .collect();
        let target = digits.parse::<u64>().unwrap_or(0);

        let mut suffix = String::new();
        if text.contains('+') {
            suffix.push('+');
        }
        if text.contains('%') {
            suffix.push('%');
        }

        Self {
            text: text.to_string(),
            ..Self::new(target, suffix, duration)
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn value(&self) -> u64 {
        self.shown
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.target == 0 || self.shown >= self.target
    }

    /// Arm the counter. Later calls keep the first start time.
    pub fn start(&mut self, now: Duration) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    /// Advance to `now`. Returns `true` while more frames are needed.
    pub fn update(&mut self, now: Duration) -> bool {
        let Some(started) = self.started else {
            return true;
        };
        let elapsed = now.saturating_sub(started);
        let eased = (self.target as f64 * self.tween.progress(elapsed)).floor() as u64;
        self.shown = self.shown.max(eased.min(self.target));
        if self.tween.is_done(elapsed) {
            self.shown = self.target;
        }
        !self.is_done()
    }

    /// Text for the current frame. Stats without digits are shown as written.
    pub fn display(&self) -> String {
        if self.target == 0 || (self.is_done() && self.is_started()) {
            self.text.clone()
        } else {
            format!("{}{}", self.shown, self.suffix)
        }
    }
}

// ============================================================================
// SKILL BARS
// ============================================================================

/// Width transition of one skill bar, from empty to its percentage.
#[derive(Debug, Clone)]
pub struct SkillBar {
    percent: u8,
    tween: Tween,
    started: Option<Duration>,
    progress: f64,
}

impl SkillBar {
    pub fn new(percent: u8, delay: Duration, duration: Duration) -> Self {
        Self {
            percent: percent.min(100),
            tween: Tween::new(duration, Easing::InOutCubic).with_delay(delay),
            started: None,
            progress: 0.0,
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn start(&mut self, now: Duration) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn update(&mut self, now: Duration) -> bool {
        let Some(started) = self.started else {
            return true;
        };
        let elapsed = now.saturating_sub(started);
        self.progress = self.tween.progress(elapsed);
        !self.tween.is_done(elapsed)
    }

    /// Filled fraction of the full bar, `0..=percent/100`.
    pub fn filled(&self) -> f64 {
        self.progress * f64::from(self.percent) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn easings_hit_both_ends() {
        for easing in [Easing::Linear, Easing::OutQuart, Easing::InOutCubic] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn tween_waits_for_its_delay() {
        let tween = Tween::new(ms(1000), Easing::Linear).with_delay(ms(500));
        assert_eq!(tween.fraction(ms(400)), 0.0);
        assert_eq!(tween.fraction(ms(1000)), 0.5);
        assert!(tween.is_done(ms(1500)));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let tween = Tween::new(Duration::ZERO, Easing::OutQuart);
        assert_eq!(tween.progress(Duration::ZERO), 1.0);
    }

    #[test]
    fn counter_reaches_target_on_the_twentieth_tick() {
        let mut counter = Counter::new(200, "", ms(2000));
        counter.start(ms(0));

        let mut previous = 0;
        for tick in 1..=20u64 {
            counter.update(ms(tick * 100));
            let value = counter.value();
            assert!(value >= previous, "tick {tick}: {value} < {previous}");
            assert!(value <= 200, "tick {tick}: {value} overshoots");
            if tick < 20 {
                assert!(value < 200, "tick {tick} finished early");
            }
            previous = value;
        }
        assert_eq!(counter.value(), 200);
        assert!(counter.is_done());
    }

    #[test]
    fn counter_never_overshoots_with_late_frames() {
        let mut counter = Counter::new(37, "", ms(500));
        counter.start(ms(1000));
        assert!(counter.update(ms(1100)));
        assert!(!counter.update(ms(9000)));
        assert_eq!(counter.value(), 37);
    }

    #[test]
    fn counter_waits_until_started() {
        let mut counter = Counter::new(10, "", ms(100));
        counter.update(ms(5000));
        assert_eq!(counter.value(), 0);
        assert_eq!(counter.display(), "0");
    }

    #[test]
    fn parsed_stats_keep_their_suffix() {
        let mut counter = Counter::parse("15+", ms(1000));
        assert_eq!(counter.target(), 15);
        counter.start(ms(0));
        counter.update(ms(100));
        assert!(counter.display().ends_with('+'));
        counter.update(ms(1000));
        assert_eq!(counter.display(), "15+");

        let percent = Counter::parse("98%", ms(1000));
        assert_eq!(percent.target(), 98);
        assert_eq!(percent.display(), "0%");
    }

    #[test]
    fn stats_without_digits_are_static() {
        let counter = Counter::parse("Many", ms(1000));
        assert!(counter.is_done());
        assert_eq!(counter.display(), "Many");
    }

    #[test]
    fn skill_bar_fills_to_its_percentage() {
        let mut bar = SkillBar::new(80, ms(500), ms(1500));
        bar.start(ms(0));
        assert!(bar.update(ms(400)));
        assert_eq!(bar.filled(), 0.0);
        assert!(!bar.update(ms(2000)));
        assert_eq!(bar.filled(), 0.8);
    }
}
