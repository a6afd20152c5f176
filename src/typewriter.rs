use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTiming {
    pub type_speed: Duration,
    pub delete_speed: Duration,
    pub pause: Duration,
}

impl Default for TypeTiming {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(150),
            delete_speed: Duration::from_millis(75),
            pause: Duration::from_millis(2000),
        }
    }
}

/// Types a phrase, holds it, deletes it, moves to the next. Forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    timing: TypeTiming,
    index: usize,
    text: String,
    deleting: bool,
    holding: bool,
    next_due: Option<Duration>,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>, timing: TypeTiming) -> Self {
        Self {
            phrases,
            timing,
            index: 0,
            text: String::new(),
            deleting: false,
            holding: false,
            next_due: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.text.clear();
        self.deleting = false;
        self.holding = false;
        self.next_due = None;
    }

    /// Perform one transition and return how long to wait before the next.
    pub fn step(&mut self) -> Duration {
        let Some(phrase) = self.phrases.get(self.index) else {
            return self.timing.type_speed;
        };
        let shown = self.text.chars().count();

        if self.holding {
            self.holding = false;
            self.deleting = true;
            return self.timing.delete_speed;
        }

        if !self.deleting {
            let full = phrase.chars().count();
            if shown < full {
                self.text = phrase.chars().take(shown + 1).collect();
                self.timing.type_speed
            } else {
                self.holding = true;
                self.timing.pause
            }
        } else if shown > 0 {
            self.text.pop();
            self.timing.delete_speed
        } else {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
            self.timing.type_speed
        }
    }

    /// Frame hook. Runs at most one transition per call; returns whether the
    /// displayed text changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        if self.phrases.is_empty() {
            return false;
        }
        let due = *self
            .next_due
            .get_or_insert(now + self.timing.type_speed);
        if now < due {
            return false;
        }

        let before = self.text.len();
        let delay = self.step();
        let next = due + delay;
        self.next_due = Some(if next < now { now + delay } else { next });
        before != self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn uniform(ms: u64) -> TypeTiming {
        let speed = Duration::from_millis(ms);
        TypeTiming {
            type_speed: speed,
            delete_speed: speed,
            pause: speed,
        }
    }

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cycles_through_phrases_and_wraps() {
        let mut writer = Typewriter::new(phrases(&["A", "BB"]), uniform(10));

        let mut shown: Vec<String> = Vec::new();
        for _ in 0..13 {
            writer.step();
            if shown.last().map(String::as_str) != Some(writer.text()) {
                shown.push(writer.text().to_string());
            }
        }

        assert_eq!(
            shown,
            vec!["A", "", "B", "BB", "B", "", "A"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
        assert_eq!(writer.phrase_index(), 0);
    }

    #[test]
    fn holds_the_full_phrase_for_the_pause() {
        let timing = TypeTiming {
            type_speed: Duration::from_millis(100),
            delete_speed: Duration::from_millis(50),
            pause: Duration::from_millis(2000),
        };
        let mut writer = Typewriter::new(phrases(&["Hi"]), timing);

        assert_eq!(writer.step(), timing.type_speed);
        assert_eq!(writer.step(), timing.type_speed);
        assert_eq!(writer.text(), "Hi");
        assert_eq!(writer.step(), timing.pause);
        assert_eq!(writer.text(), "Hi");
        assert_eq!(writer.step(), timing.delete_speed);
        assert!(writer.is_deleting());
        assert_eq!(writer.step(), timing.delete_speed);
        assert_eq!(writer.text(), "H");
    }

    #[test]
    fn advance_respects_the_schedule() {
        let mut writer = Typewriter::new(phrases(&["ab"]), uniform(100));
        let at = Duration::from_millis;

        assert!(!writer.advance(at(0)));
        assert!(!writer.advance(at(50)));
        assert!(writer.advance(at(100)));
        assert_eq!(writer.text(), "a");
        assert!(!writer.advance(at(150)));
        assert!(writer.advance(at(200)));
        assert_eq!(writer.text(), "ab");
    }

    #[test]
    fn reset_restarts_from_the_first_phrase() {
        let mut writer = Typewriter::new(phrases(&["A", "B"]), uniform(1));
        for _ in 0..5 {
            writer.step();
        }
        assert_eq!(writer.phrase_index(), 1);

        writer.reset();
        assert_eq!(writer.phrase_index(), 0);
        assert_eq!(writer.text(), "");
        assert!(!writer.is_deleting());
    }

    #[test]
    fn multibyte_phrases_type_whole_characters() {
        let mut writer = Typewriter::new(phrases(&["héllo"]), uniform(1));
        writer.step();
        writer.step();
        assert_eq!(writer.text(), "hé");
    }

    #[test]
    fn no_phrases_shows_nothing() {
        let mut writer = Typewriter::new(Vec::new(), uniform(1));
        assert!(!writer.advance(Duration::from_secs(10)));
        writer.step();
        assert_eq!(writer.text(), "");
    }
}
