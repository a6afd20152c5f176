//! Scroll visibility triggers.
//!
//! The page is a column of rows. A trigger compares a target's row span with
//! the visible window and reports when the visible fraction crosses its
//! threshold. Targets are handed in by the caller each frame; a target the
//! layout does not know about simply never fires.

use tracing::debug;

/// Rows `[top, top + height)` of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowSpan {
    pub top: u32,
    pub height: u32,
}

impl RowSpan {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    pub fn contains(&self, row: u32) -> bool {
        row >= self.top && row < self.bottom()
    }

    pub fn overlap(&self, other: &RowSpan) -> u32 {
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        bottom.saturating_sub(top)
    }

    /// Fraction of `self` that lies inside `viewport`.
    pub fn visible_fraction(&self, viewport: &RowSpan) -> f64 {
        if self.height == 0 {
            return if viewport.contains(self.top) { 1.0 } else { 0.0 };
        }
        f64::from(self.overlap(viewport)) / f64::from(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Fires once, never resets.
    Once,
    /// Reports every crossing, in and out.
    Repeat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f64,
    mode: TriggerMode,
    margin_bottom: u32,
    visible: bool,
}

impl VisibilityTrigger {
    pub fn new(threshold: f64, mode: TriggerMode) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            mode,
            margin_bottom: 0,
            visible: false,
        }
    }

    pub fn once(threshold: f64) -> Self {
        Self::new(threshold, TriggerMode::Once)
    }

    /// Shrink the viewport from the bottom, so targets must scroll a little
    /// further up before they count.
    pub fn with_root_margin(mut self, rows: u32) -> Self {
        self.margin_bottom = rows;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// Compare `region` with `viewport`. Returns the new state when it
    /// changed.
    pub fn evaluate(&mut self, region: Option<RowSpan>, viewport: RowSpan) -> Option<bool> {
        let region = region?;
        if self.mode == TriggerMode::Once && self.visible {
            return None;
        }

        let root = RowSpan::new(
            viewport.top,
            viewport.height.saturating_sub(self.margin_bottom),
        );
        let fraction = region.visible_fraction(&root);
        let intersecting = fraction > 0.0 && fraction >= self.threshold;

        if intersecting == self.visible {
            return None;
        }
        self.visible = intersecting;
        Some(intersecting)
    }
}

/// A set of triggers keyed by the target they watch.
#[derive(Debug, Clone)]
pub struct VisibilityObserver<T> {
    triggers: Vec<(T, VisibilityTrigger)>,
}

impl<T> Default for VisibilityObserver<T> {
    fn default() -> Self {
        Self {
            triggers: Vec::new(),
        }
    }
}

impl<T: Copy + PartialEq + std::fmt::Debug> VisibilityObserver<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `target`. Observing the same target again replaces its trigger.
    pub fn observe(&mut self, target: T, trigger: VisibilityTrigger) {
        self.unobserve(target);
        self.triggers.push((target, trigger));
    }

    pub fn unobserve(&mut self, target: T) -> bool {
        let before = self.triggers.len();
        self.triggers.retain(|(t, _)| *t != target);
        before != self.triggers.len()
    }

    pub fn is_observing(&self, target: T) -> bool {
        self.triggers.iter().any(|(t, _)| *t == target)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Evaluate every trigger. One-shot triggers are released after firing.
    pub fn update<F>(&mut self, region_of: F, viewport: RowSpan) -> Vec<(T, bool)>
    where
        F: Fn(T) -> Option<RowSpan>,
    {
        let mut changes = Vec::new();
        for (target, trigger) in &mut self.triggers {
            if let Some(visible) = trigger.evaluate(region_of(*target), viewport) {
                debug!(?target, visible, "visibility changed");
                changes.push((*target, visible));
            }
        }
        self.triggers.retain(|(_, trigger)| {
            !(trigger.mode() == TriggerMode::Once && trigger.is_visible())
        });
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fraction_counts_rows_inside_the_viewport() {
        let region = RowSpan::new(10, 10);
        assert_eq!(region.visible_fraction(&RowSpan::new(0, 15)), 0.5);
        assert_eq!(region.visible_fraction(&RowSpan::new(0, 40)), 1.0);
        assert_eq!(region.visible_fraction(&RowSpan::new(20, 10)), 0.0);
    }

    #[test]
    fn one_shot_fires_once_and_stays() {
        let mut trigger = VisibilityTrigger::once(0.5);
        let region = Some(RowSpan::new(20, 10));

        assert_eq!(trigger.evaluate(region, RowSpan::new(0, 22)), None);
        assert_eq!(trigger.evaluate(region, RowSpan::new(0, 26)), Some(true));
        assert_eq!(trigger.evaluate(region, RowSpan::new(100, 20)), None);
        assert!(trigger.is_visible());
    }

    #[test]
    fn repeat_toggles_on_every_crossing() {
        let mut trigger = VisibilityTrigger::new(0.0, TriggerMode::Repeat);
        let region = Some(RowSpan::new(5, 2));

        assert_eq!(trigger.evaluate(region, RowSpan::new(0, 6)), Some(true));
        assert_eq!(trigger.evaluate(region, RowSpan::new(10, 6)), Some(false));
        assert_eq!(trigger.evaluate(region, RowSpan::new(4, 6)), Some(true));
    }

    #[test]
    fn root_margin_trims_the_bottom_of_the_viewport() {
        let mut trigger = VisibilityTrigger::once(0.1).with_root_margin(3);
        let region = Some(RowSpan::new(18, 10));

        // rows 18..20 are on screen but inside the margin
        assert_eq!(trigger.evaluate(region, RowSpan::new(0, 20)), None);
        assert_eq!(trigger.evaluate(region, RowSpan::new(0, 22)), Some(true));
    }

    #[test]
    fn missing_target_never_fires() {
        let mut trigger = VisibilityTrigger::once(0.0);
        assert_eq!(trigger.evaluate(None, RowSpan::new(0, 100)), None);
        assert!(!trigger.is_visible());
    }

    #[test]
    fn observer_releases_fired_one_shots() {
        let mut observer = VisibilityObserver::new();
        observer.observe('a', VisibilityTrigger::once(0.5));
        observer.observe('b', VisibilityTrigger::new(0.5, TriggerMode::Repeat));
        observer.observe('c', VisibilityTrigger::once(0.5));

        let region_of = |target: char| match target {
            'a' | 'b' => Some(RowSpan::new(0, 4)),
            _ => None,
        };
        let changes = observer.update(region_of, RowSpan::new(0, 10));
        assert_eq!(changes, vec![('a', true), ('b', true)]);
        assert!(!observer.is_observing('a'));
        assert!(observer.is_observing('b'));
        assert!(observer.is_observing('c'));

        assert!(observer.unobserve('b'));
        assert!(!observer.unobserve('b'));
        assert_eq!(observer.len(), 1);
    }
}
