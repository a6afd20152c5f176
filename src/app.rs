use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{Colors, Config};
use crate::contact::{ContactForm, FormEvent, Outbox, SubmitStatus, ToastKind, Toasts};
use crate::driver::{AnimationDriver, Flow, FrameLoop};
use crate::keys::{Command, Keymap};
use crate::page::{PageLayout, PageState, ResumeTab, SectionId, Target};
use crate::particles::ParticleField;
use crate::preference::{Theme, ThemeController};
use crate::tween::{Counter, SkillBar};
use crate::typewriter::Typewriter;
use crate::visibility::{VisibilityObserver, VisibilityTrigger};

// ============================================================================
// SCENE
// ============================================================================

/// Everything the frame loops animate.
pub struct Scene {
    pub page: PageState,
    pub typewriter: Typewriter,
    pub particles: Option<ParticleField>,
    pub counters: Vec<Counter>,
    pub skill_bars: Vec<SkillBar>,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct App {
    pub config: Config,
    pub scene: Scene,
    pub form: ContactForm,
    pub toasts: Toasts,
    pub layout: PageLayout,
    pub revealed: HashSet<SectionId>,
    pub should_quit: bool,
    keymap: Keymap,
    theme: ThemeController,
    driver: AnimationDriver<Scene>,
    loops: Vec<FrameLoop>,
    scroll_loop: Option<FrameLoop>,
    observer: VisibilityObserver<Target>,
    viewport_rows: u32,
    now: Duration,
}

impl App {
    pub fn new(
        config: Config,
        theme: ThemeController,
        particles: Option<ParticleField>,
        outbox: impl Outbox + 'static,
    ) -> Self {
        let animation = &config.animation;
        let counter_duration = Duration::from_millis(animation.counter_duration_ms);
        let counters = config
            .profile
            .stats
            .iter()
            .map(|stat| Counter::parse(&stat.value, counter_duration))
            .collect();

        let skill_duration = Duration::from_millis(animation.skill_duration_ms);
        let skill_bars = config
            .skills
            .iter()
            .flat_map(|category| category.skills.iter().enumerate())
            .map(|(i, skill)| {
                let delay = animation.skill_delay_ms + animation.skill_stagger_ms * i as u64;
                SkillBar::new(skill.percent, Duration::from_millis(delay), skill_duration)
            })
            .collect::<Vec<_>>();

        let scene = Scene {
            page: PageState::new(),
            typewriter: Typewriter::new(config.profile.roles.clone(), animation.type_timing()),
            particles,
            counters,
            skill_bars,
        };

        let mut observer = VisibilityObserver::new();
        for id in SectionId::ALL {
            observer.observe(
                Target::Section(id),
                VisibilityTrigger::once(animation.reveal_threshold)
                    .with_root_margin(u32::from(animation.reveal_margin)),
            );
        }
        observer.observe(
            Target::Stats,
            VisibilityTrigger::once(animation.counter_threshold),
        );
        for i in 0..scene.skill_bars.len() {
            observer.observe(
                Target::SkillBar(i),
                VisibilityTrigger::once(animation.skill_threshold),
            );
        }

        let mut driver = AnimationDriver::new();
        let mut loops = vec![driver.start(|scene: &mut Scene, now| {
            scene.typewriter.advance(now);
            Flow::Continue
        })];
        if scene.particles.is_some() {
            loops.push(driver.start(|scene: &mut Scene, _| match &mut scene.particles {
                Some(field) => {
                    field.advance();
                    Flow::Continue
                }
                None => Flow::Stop,
            }));
        }

        let toasts = Toasts::new(Duration::from_millis(config.contact.toast_ms));
        let form = ContactForm::new(&config.contact, outbox);
        let keymap = Keymap::new(&config.keys);

        Self {
            config,
            scene,
            form,
            toasts,
            layout: PageLayout::new(),
            revealed: HashSet::new(),
            should_quit: false,
            keymap,
            theme,
            driver,
            loops,
            scroll_loop: None,
            observer,
            viewport_rows: 0,
            now: Duration::ZERO,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn colors(&self) -> Colors {
        self.config.colors.palette(self.theme()).resolve()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn viewport_rows(&self) -> u32 {
        self.viewport_rows
    }

    pub fn active_section(&self) -> SectionId {
        self.scene
            .page
            .active_section(&self.layout, u32::from(self.config.layout.activation_offset))
    }

    pub fn is_narrow(&self, width: u16) -> bool {
        width < self.config.layout.nav_breakpoint
    }

    pub fn running_loops(&self) -> usize {
        self.driver.active()
    }

    /// Terminal size changed. The backdrop is regenerated for the new area.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let particles = &self.config.particles;
        if let Some(field) = &mut self.scene.particles {
            field.resize(
                f64::from(cols) * particles.cell_width,
                f64::from(rows) * particles.cell_height,
            );
        }
        debug!(cols, rows, "terminal resized");
    }

    /// Called by the renderer with the layout it just produced.
    pub fn set_layout(&mut self, layout: PageLayout, viewport_rows: u32) {
        self.layout = layout;
        self.viewport_rows = viewport_rows;
        self.scene.page.clamp(&self.layout, viewport_rows);
    }

    // ------------------------------------------------------------------------
    // frames
    // ------------------------------------------------------------------------

    /// One display refresh: run the frame loops, then the timers.
    pub fn on_frame(&mut self, now: Duration) {
        self.now = self.now.max(now);
        self.driver.tick(&mut self.scene, self.now);

        self.loops.retain(FrameLoop::is_running);
        if self.scroll_loop.as_ref().is_some_and(|l| !l.is_running()) {
            self.scroll_loop = None;
        }

        if let Some(event) = self.form.poll(self.now) {
            self.on_form_event(event);
        }
        self.toasts.prune(self.now);
    }

    /// Check every watched target against what is on screen now.
    pub fn update_visibility(&mut self) {
        let viewport = self.scene.page.viewport(self.viewport_rows);
        let layout = &self.layout;
        let changes = self.observer.update(|target| layout.region(target), viewport);

        for (target, visible) in changes {
            if !visible {
                continue;
            }
            match target {
                Target::Section(id) => {
                    self.revealed.insert(id);
                }
                Target::Stats => self.start_counters(),
                Target::SkillBar(i) => self.start_skill_bar(i),
            }
        }
    }

    fn start_counters(&mut self) {
        let start = self.now + Duration::from_millis(self.config.animation.counter_delay_ms);
        for counter in &mut self.scene.counters {
            counter.start(start);
        }
        self.loops.push(self.driver.start(|scene: &mut Scene, now| {
            let mut running = false;
            for counter in &mut scene.counters {
                running |= counter.update(now);
            }
            if running {
                Flow::Continue
            } else {
                Flow::Stop
            }
        }));
    }

    fn start_skill_bar(&mut self, index: usize) {
        let Some(bar) = self.scene.skill_bars.get_mut(index) else {
            return;
        };
        bar.start(self.now);
        self.loops.push(self.driver.start(move |scene: &mut Scene, now| {
            let running = scene
                .skill_bars
                .get_mut(index)
                .is_some_and(|bar| bar.update(now));
            if running {
                Flow::Continue
            } else {
                Flow::Stop
            }
        }));
    }

    // ------------------------------------------------------------------------
    // navigation
    // ------------------------------------------------------------------------

    pub fn jump_to(&mut self, section: SectionId) {
        let duration = Duration::from_millis(self.config.animation.scroll_duration_ms);
        let started = self.scene.page.glide_to(
            section,
            &self.layout,
            self.viewport_rows,
            self.now,
            duration,
        );
        if started {
            // replacing the handle stops the previous glide
            self.scroll_loop = Some(self.driver.start(|scene: &mut Scene, now| {
                if scene.page.animate(now) {
                    Flow::Continue
                } else {
                    Flow::Stop
                }
            }));
        }
    }

    /// Mouse wheel.
    pub fn wheel(&mut self, rows: i64) {
        self.scroll_by(rows);
    }

    fn scroll_by(&mut self, rows: i64) {
        self.scroll_loop = None;
        self.scene
            .page
            .scroll_by(rows, &self.layout, self.viewport_rows);
    }

    fn step_section(&mut self, delta: isize) {
        let count = SectionId::ALL.len() as isize;
        let index = (self.active_section().index() as isize + delta).clamp(0, count - 1);
        self.jump_to(SectionId::ALL[index as usize]);
    }

    fn sideways(&mut self, delta: isize) {
        match self.active_section() {
            SectionId::Resume => {
                self.scene.page.resume_tab = self.scene.page.resume_tab.toggled();
            }
            SectionId::Projects => {
                let count = self.config.projects.len();
                self.scene.page.select_project(delta, count);
            }
            _ => {}
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    // ------------------------------------------------------------------------
    // input
    // ------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: &KeyEvent) {
        if self.form.is_editing() {
            self.handle_form_key(key);
            return;
        }

        if let KeyCode::Char(digit @ '1'..='9') = key.code {
            let index = digit as usize - '1' as usize;
            if let Some(section) = SectionId::ALL.get(index) {
                self.jump_to(*section);
                return;
            }
        }

        let Some(command) = self.keymap.command(key) else {
            return;
        };
        let page_rows = i64::from(self.viewport_rows.saturating_sub(2).max(1));
        match command {
            Command::Quit => {
                if self.scene.page.menu_open {
                    self.scene.page.menu_open = false;
                } else {
                    self.quit();
                }
            }
            Command::Up => self.scroll_by(-1),
            Command::Down => self.scroll_by(1),
            Command::PageUp => self.scroll_by(-page_rows),
            Command::PageDown => self.scroll_by(page_rows),
            Command::Top => self.scroll_by(i64::MIN / 2),
            Command::Bottom => self.scroll_by(i64::MAX / 2),
            Command::NextSection => self.step_section(1),
            Command::PrevSection => self.step_section(-1),
            Command::Left => self.sideways(-1),
            Command::Right => self.sideways(1),
            Command::ToggleTheme => {
                self.toggle_theme();
            }
            Command::Menu => self.scene.page.menu_open = !self.scene.page.menu_open,
            Command::Compose => {
                self.jump_to(SectionId::Contact);
                self.form.start_editing();
            }
        }
    }

    fn handle_form_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc => self.form.stop_editing(),
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => {
                if let Some(event) = self.form.enter(self.now) {
                    self.on_form_event(event);
                }
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.input(ch)
            }
            _ => {}
        }
    }

    fn on_form_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::Missing(field) => {
                self.toasts.push(
                    format!("Please fill in your {field}."),
                    ToastKind::Error,
                    self.now,
                );
            }
            FormEvent::Finished(status) => {
                let kind = match status {
                    SubmitStatus::Success => ToastKind::Success,
                    SubmitStatus::Failure => ToastKind::Error,
                };
                self.toasts.push(status.message(), kind, self.now);
            }
        }
    }

    pub fn quit(&mut self) {
        info!("quitting");
        self.should_quit = true;
    }

    pub fn resume_tab(&self) -> ResumeTab {
        self.scene.page.resume_tab
    }
}
