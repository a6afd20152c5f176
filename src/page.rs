use std::time::Duration;

use crate::tween::{Easing, Tween};
use crate::visibility::RowSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Projects,
    Resume,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Resume,
        SectionId::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Resume => "Resume",
            SectionId::Contact => "Contact",
        }
    }

    pub fn index(self) -> usize {
        SectionId::ALL
            .iter()
            .position(|id| *id == self)
            .unwrap_or_default()
    }
}

/// Something on the page a visibility trigger can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Section(SectionId),
    Stats,
    SkillBar(usize),
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Where everything ended up on the last render, in page rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    sections: Vec<(SectionId, RowSpan)>,
    anchors: Vec<(Target, RowSpan)>,
    height: u32,
}

impl PageLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section below everything laid out so far.
    pub fn push_section(&mut self, id: SectionId, rows: u32) -> RowSpan {
        let span = RowSpan::new(self.height, rows);
        self.sections.push((id, span));
        self.height += rows;
        span
    }

    pub fn push_anchor(&mut self, target: Target, span: RowSpan) {
        self.anchors.push((target, span));
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn section(&self, id: SectionId) -> Option<RowSpan> {
        self.sections
            .iter()
            .find(|(section, _)| *section == id)
            .map(|(_, span)| *span)
    }

    pub fn region(&self, target: Target) -> Option<RowSpan> {
        match target {
            Target::Section(id) => self.section(id),
            other => self
                .anchors
                .iter()
                .find(|(anchor, _)| *anchor == other)
                .map(|(_, span)| *span),
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionId, RowSpan)> + '_ {
        self.sections.iter().copied()
    }
}

// ============================================================================
// SCROLL STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumeTab {
    #[default]
    Experience,
    Education,
}

impl ResumeTab {
    pub fn toggled(self) -> Self {
        match self {
            ResumeTab::Experience => ResumeTab::Education,
            ResumeTab::Education => ResumeTab::Experience,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SmoothScroll {
    from: u32,
    to: u32,
    started: Duration,
    tween: Tween,
}

/// Scroll position and the small bits of UI state that hang off it.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    scroll: u32,
    smooth: Option<SmoothScroll>,
    pub menu_open: bool,
    pub resume_tab: ResumeTab,
    pub selected_project: usize,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u32 {
        self.scroll
    }

    pub fn max_scroll(layout: &PageLayout, viewport_rows: u32) -> u32 {
        layout.height().saturating_sub(viewport_rows)
    }

    /// Rows currently on screen.
    pub fn viewport(&self, viewport_rows: u32) -> RowSpan {
        RowSpan::new(self.scroll, viewport_rows)
    }

    /// Jump without animation. Cancels a running smooth scroll.
    pub fn scroll_to(&mut self, row: u32, layout: &PageLayout, viewport_rows: u32) {
        self.smooth = None;
        self.scroll = row.min(Self::max_scroll(layout, viewport_rows));
    }

    pub fn scroll_by(&mut self, delta: i64, layout: &PageLayout, viewport_rows: u32) {
        let row = (i64::from(self.scroll) + delta).max(0);
        self.scroll_to(u32::try_from(row).unwrap_or(u32::MAX), layout, viewport_rows);
    }

    /// Keep the position valid after the layout changed size.
    pub fn clamp(&mut self, layout: &PageLayout, viewport_rows: u32) {
        self.scroll = self.scroll.min(Self::max_scroll(layout, viewport_rows));
    }

    /// Start an eased scroll to the top of `section`. Returns `false` when
    /// the section is not on the page.
    pub fn glide_to(
        &mut self,
        section: SectionId,
        layout: &PageLayout,
        viewport_rows: u32,
        now: Duration,
        duration: Duration,
    ) -> bool {
        let Some(span) = layout.section(section) else {
            return false;
        };
        self.menu_open = false;
        self.smooth = Some(SmoothScroll {
            from: self.scroll,
            to: span.top.min(Self::max_scroll(layout, viewport_rows)),
            started: now,
            tween: Tween::new(duration, Easing::InOutCubic),
        });
        true
    }

    pub fn is_gliding(&self) -> bool {
        self.smooth.is_some()
    }

    /// Frame hook for smooth scrolling. Returns `true` while still moving.
    pub fn animate(&mut self, now: Duration) -> bool {
        let Some(glide) = self.smooth else {
            return false;
        };
        let elapsed = now.saturating_sub(glide.started);
        let t = glide.tween.progress(elapsed);
        let from = f64::from(glide.from);
        let to = f64::from(glide.to);
        self.scroll = (from + (to - from) * t).round() as u32;

        if glide.tween.is_done(elapsed) {
            self.scroll = glide.to;
            self.smooth = None;
            return false;
        }
        true
    }

    /// The section being read: the last one whose span, stretched upwards by
    /// `offset` rows, contains the scroll position.
    pub fn active_section(&self, layout: &PageLayout, offset: u32) -> SectionId {
        let mut current = SectionId::Hero;
        for (id, span) in layout.sections() {
            let top = span.top.saturating_sub(offset);
            if self.scroll >= top && self.scroll < span.bottom() {
                current = id;
            }
        }
        current
    }

    /// Scroll progress in `[0, 1]`; `0` when the whole page fits.
    pub fn progress(&self, layout: &PageLayout, viewport_rows: u32) -> f64 {
        let max = Self::max_scroll(layout, viewport_rows);
        if max == 0 {
            return 0.0;
        }
        (f64::from(self.scroll) / f64::from(max)).min(1.0)
    }

    pub fn is_scrolled(&self, threshold: u32) -> bool {
        self.scroll > threshold
    }

    pub fn select_project(&mut self, delta: isize, count: usize) {
        if count == 0 {
            self.selected_project = 0;
            return;
        }
        let current = self.selected_project.min(count - 1) as isize;
        self.selected_project = (current + delta).rem_euclid(count as isize) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout() -> PageLayout {
        let mut layout = PageLayout::new();
        layout.push_section(SectionId::Hero, 20);
        layout.push_section(SectionId::About, 15);
        layout.push_section(SectionId::Skills, 25);
        layout.push_anchor(Target::Stats, RowSpan::new(28, 2));
        layout
    }

    #[test]
    fn sections_stack_and_anchors_resolve() {
        let layout = layout();
        assert_eq!(layout.height(), 60);
        assert_eq!(layout.section(SectionId::About), Some(RowSpan::new(20, 15)));
        assert_eq!(layout.region(Target::Stats), Some(RowSpan::new(28, 2)));
        assert_eq!(layout.region(Target::SkillBar(0)), None);
        assert_eq!(layout.region(Target::Section(SectionId::Contact)), None);
    }

    #[test]
    fn scrolling_is_clamped_to_the_page() {
        let layout = layout();
        let mut page = PageState::new();
        page.scroll_by(-5, &layout, 20);
        assert_eq!(page.scroll(), 0);
        page.scroll_by(500, &layout, 20);
        assert_eq!(page.scroll(), 40);
    }

    #[test]
    fn active_section_switches_a_little_early() {
        let layout = layout();
        let mut page = PageState::new();
        page.scroll_to(16, &layout, 20);
        assert_eq!(page.active_section(&layout, 3), SectionId::Hero);
        page.scroll_to(17, &layout, 20);
        assert_eq!(page.active_section(&layout, 3), SectionId::About);
        page.scroll_to(36, &layout, 20);
        assert_eq!(page.active_section(&layout, 3), SectionId::Skills);
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let layout = layout();
        let mut page = PageState::new();
        assert_eq!(page.progress(&layout, 20), 0.0);
        page.scroll_to(20, &layout, 20);
        assert_eq!(page.progress(&layout, 20), 0.5);
        page.scroll_to(40, &layout, 20);
        assert_eq!(page.progress(&layout, 20), 1.0);

        let short = {
            let mut l = PageLayout::new();
            l.push_section(SectionId::Hero, 10);
            l
        };
        assert_eq!(page.progress(&short, 20), 0.0);
    }

    #[test]
    fn glide_eases_to_the_section_top() {
        let layout = layout();
        let mut page = PageState::new();
        page.menu_open = true;
        let ms = Duration::from_millis;

        assert!(page.glide_to(SectionId::Skills, &layout, 20, ms(0), ms(400)));
        assert!(!page.menu_open);
        assert!(page.animate(ms(200)));
        assert_eq!(page.scroll(), 18);
        assert!(!page.animate(ms(400)));
        assert_eq!(page.scroll(), 35);
        assert!(!page.is_gliding());
    }

    #[test]
    fn manual_scroll_cancels_a_glide() {
        let layout = layout();
        let mut page = PageState::new();
        page.glide_to(SectionId::About, &layout, 20, Duration::ZERO, Duration::from_millis(400));
        page.scroll_by(1, &layout, 20);
        assert!(!page.is_gliding());
        assert!(!page.animate(Duration::from_millis(100)));
        assert_eq!(page.scroll(), 1);
    }

    #[test]
    fn project_selection_wraps() {
        let mut page = PageState::new();
        page.select_project(-1, 3);
        assert_eq!(page.selected_project, 2);
        page.select_project(1, 3);
        assert_eq!(page.selected_project, 0);
        page.select_project(1, 0);
        assert_eq!(page.selected_project, 0);
    }

    #[test]
    fn scrolled_after_threshold() {
        let layout = layout();
        let mut page = PageState::new();
        page.scroll_to(4, &layout, 20);
        assert!(!page.is_scrolled(4));
        page.scroll_to(5, &layout, 20);
        assert!(page.is_scrolled(4));
    }
}
