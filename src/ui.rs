use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::config::{parse_modifier, Colors, Project, TimelineEntry};
use crate::contact::{Field, Focus, SubmitStatus, ToastKind};
use crate::page::{PageLayout, ResumeTab, SectionId, Target};
use crate::particles::ParticleLayer;
use crate::preference::Theme;
use crate::tween::SkillBar;
use crate::visibility::RowSpan;

/// Progress bar, navigation bar and its bottom border.
const CHROME_ROWS: u16 = 3;

// ============================================================================
// UI RENDERING
// ============================================================================

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let colors = app.colors();

    f.render_widget(
        Block::default().style(Style::default().fg(colors.fg).bg(colors.bg)),
        area,
    );

    let help_rows = u16::from(app.config.help_text.enabled);
    let page_area = Rect {
        x: area.x,
        y: area.y + CHROME_ROWS.min(area.height),
        width: area.width,
        height: area.height.saturating_sub(CHROME_ROWS + help_rows),
    };
    let content = content_area(page_area, app.config.layout.max_width);

    let viewport_rows = u32::from(page_area.height);
    let (lines, layout) = build_page(app, &colors, usize::from(content.width), viewport_rows);
    app.set_layout(layout, viewport_rows);

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.scene.page.scroll() as usize)
        .take(usize::from(page_area.height))
        .collect();
    f.render_widget(Paragraph::new(visible), content);

    if let Some(field) = &app.scene.particles {
        let layer = ParticleLayer {
            field,
            color: colors.particle,
            background: colors.bg,
        };
        layer.render_behind(page_area, f.buffer_mut());
    }

    render_progress(f, app, &colors, area);
    render_nav(f, app, &colors, area);

    if app.scene.page.menu_open {
        render_menu(f, app, &colors, area);
    }
    render_toasts(f, app, &colors, area);

    if app.config.help_text.enabled {
        render_help_text(f, app, &colors, area);
    }
}

/// Page columns, centered and capped at `max_width` with a little padding.
fn content_area(page: Rect, max_width: u16) -> Rect {
    let width = if max_width > 0 {
        page.width.min(max_width)
    } else {
        page.width
    };
    let x = page.x + (page.width - width) / 2;
    Rect {
        x: x + (width / 2).min(2),
        y: page.y,
        width: width.saturating_sub(4),
        height: page.height,
    }
}

fn render_progress(f: &mut Frame, app: &App, colors: &Colors, area: Rect) {
    if area.height == 0 {
        return;
    }
    let progress = app.scene.page.progress(&app.layout, app.viewport_rows());
    let width = usize::from(area.width);
    let filled = ((progress * width as f64).round() as usize).min(width);

    let bar = Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(colors.primary)),
        Span::styled("━".repeat(width - filled), Style::default().fg(colors.surface)),
    ]);
    f.render_widget(Paragraph::new(bar), Rect { height: 1, ..area });
}

fn render_nav(f: &mut Frame, app: &App, colors: &Colors, area: Rect) {
    if area.height < CHROME_ROWS {
        return;
    }
    let scrolled = app
        .scene
        .page
        .is_scrolled(u32::from(app.config.layout.scrolled_threshold));
    let bar_style = Style::default().bg(if scrolled { colors.surface } else { colors.bg });
    let row = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };

    let title = Paragraph::new(Line::styled(
        app.config.title.clone(),
        Style::default()
            .fg(colors.primary)
            .add_modifier(Modifier::BOLD),
    ))
    .style(bar_style);
    f.render_widget(title, row);

    let selected = parse_modifier(&app.config.colors.selected_modifier);
    let mut links = Vec::new();
    if app.is_narrow(area.width) {
        links.push(Span::styled("☰ Menu  ", Style::default().fg(colors.fg)));
    } else {
        let active = app.active_section();
        for (i, id) in SectionId::ALL.iter().enumerate() {
            let style = if *id == active {
                Style::default().fg(colors.primary).add_modifier(selected)
            } else {
                Style::default().fg(colors.fg)
            };
            links.push(Span::styled(
                format!("{} ", i + 1),
                Style::default().fg(colors.muted),
            ));
            links.push(Span::styled(id.label(), style));
            links.push(Span::raw("  "));
        }
    }
    let icon = match app.theme() {
        Theme::Light => "☾ ",
        Theme::Dark => "☀ ",
    };
    links.push(Span::styled(icon, Style::default().fg(colors.accent)));

    f.render_widget(Paragraph::new(Line::from(links)).alignment(Alignment::Right), row);

    let border = if scrolled {
        "─".repeat(usize::from(area.width))
    } else {
        String::new()
    };
    f.render_widget(
        Paragraph::new(Line::styled(border, Style::default().fg(colors.border))),
        Rect {
            y: area.y + 2,
            height: 1,
            ..area
        },
    );
}

fn render_menu(f: &mut Frame, app: &App, colors: &Colors, area: Rect) {
    let width = area.width.min(22);
    let height = (SectionId::ALL.len() as u16 + 2).min(area.height.saturating_sub(2));
    if height < 3 {
        return;
    }
    let rect = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y + 2,
        width,
        height,
    };

    let active = app.active_section();
    let selected = parse_modifier(&app.config.colors.selected_modifier);
    let items: Vec<ListItem> = SectionId::ALL
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let style = if *id == active {
                Style::default().fg(colors.primary).add_modifier(selected)
            } else {
                Style::default().fg(colors.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(colors.muted)),
                Span::styled(id.label(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Menu ")
                .border_style(Style::default().fg(colors.primary)),
        )
        .style(Style::default().fg(colors.fg).bg(colors.surface));

    f.render_widget(Clear, rect);
    f.render_widget(list, rect);
}

fn render_toasts(f: &mut Frame, app: &App, colors: &Colors, area: Rect) {
    let now = app.now();
    let mut y = area.y + CHROME_ROWS;

    for toast in app.toasts.iter() {
        if y + 3 > area.bottom() {
            break;
        }
        let (icon, color) = match toast.kind {
            ToastKind::Success => ("✓", colors.success),
            ToastKind::Error => ("✕", colors.error),
        };
        let text = format!(" {icon} {} ", toast.message);
        let width = (text.chars().count() as u16 + 2).min(area.width);

        // slides in from the right edge
        let shift = (app.toasts.offset(toast, now) * f64::from(width + 1)).round() as u16;
        let x = area.right().saturating_sub(width + 1) + shift;
        if x < area.right() {
            let rect = Rect {
                x,
                y,
                width: width.min(area.right() - x),
                height: 3,
            };
            let body = Paragraph::new(Line::styled(text, Style::default().fg(color)))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(color)),
                )
                .style(Style::default().bg(colors.surface));
            f.render_widget(Clear, rect);
            f.render_widget(body, rect);
        }
        y += 3;
    }
}

fn render_help_text(f: &mut Frame, app: &App, colors: &Colors, size: Rect) {
    let config = &app.config;
    let help_config = &config.help_text;
    let keys = &config.keys;

    let help_key_style = Style::default()
        .fg(colors.primary)
        .add_modifier(parse_modifier(&config.colors.help_key_modifier));
    let help_style = Style::default().fg(colors.muted);

    let pairs: Vec<(String, &str)> = if app.form.is_editing() {
        vec![
            ("Tab/Up/Down".to_string(), "Field"),
            ("Enter".to_string(), "Next/Send"),
            ("Esc".to_string(), "Done"),
        ]
    } else {
        vec![
            (
                format!("{}/{}", keys.up.join("/"), keys.down.join("/")),
                "Scroll",
            ),
            (
                format!(
                    "{}/{}",
                    keys.next_section.join("/"),
                    keys.prev_section.join("/")
                ),
                "Section",
            ),
            ("1-6".to_string(), "Jump"),
            (keys.toggle_theme.join("/"), "Theme"),
            (keys.menu.join("/"), "Menu"),
            (keys.compose.join("/"), "Contact"),
            (keys.quit.join("/"), "Quit"),
        ]
    };

    let mut help_spans = Vec::new();
    for (i, (key, label)) in pairs.into_iter().enumerate() {
        if i > 0 {
            help_spans.push(Span::raw(help_config.separator.clone()));
        }
        help_spans.push(Span::styled(key, help_key_style));
        help_spans.push(Span::styled(format!(" {label}"), help_style));
    }

    let help_area = Rect {
        x: 0,
        y: size.height.saturating_sub(1),
        width: size.width,
        height: 1,
    };

    let help_text = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Center)
        .style(help_style);

    f.render_widget(help_text, help_area);
}

// ============================================================================
// PAGE CONTENT
// ============================================================================

/// Accumulates page rows and records where each section and anchor landed.
struct PageBuilder {
    lines: Vec<Line<'static>>,
    layout: PageLayout,
    width: usize,
}

impl PageBuilder {
    fn new(width: usize) -> Self {
        Self {
            lines: Vec::new(),
            layout: PageLayout::new(),
            width,
        }
    }

    fn row(&self) -> u32 {
        u32::try_from(self.lines.len()).unwrap_or(u32::MAX)
    }

    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn paragraph(&mut self, text: &str, style: Style) {
        for row in wrap_text(text, self.width) {
            self.push(Line::styled(row, style));
        }
    }

    /// Mark the next `rows` rows as a visibility target.
    fn anchor(&mut self, target: Target, rows: u32) {
        let span = RowSpan::new(self.row(), rows);
        self.layout.push_anchor(target, span);
    }

    fn section(&mut self, id: SectionId, revealed: bool, build: impl FnOnce(&mut Self)) {
        let start = self.lines.len();
        build(self);
        if !revealed {
            for line in &mut self.lines[start..] {
                line.style = line.style.add_modifier(Modifier::DIM);
            }
        }
        let rows = self.lines.len() - start;
        self.layout
            .push_section(id, u32::try_from(rows).unwrap_or(u32::MAX));
    }

    fn finish(self) -> (Vec<Line<'static>>, PageLayout) {
        (self.lines, self.layout)
    }
}

fn build_page(
    app: &App,
    colors: &Colors,
    width: usize,
    viewport_rows: u32,
) -> (Vec<Line<'static>>, PageLayout) {
    let mut page = PageBuilder::new(width);
    let revealed = |id: SectionId| app.revealed.contains(&id);

    page.section(SectionId::Hero, revealed(SectionId::Hero), |b| {
        hero(b, app, colors, viewport_rows as usize)
    });
    page.section(SectionId::About, revealed(SectionId::About), |b| {
        about(b, app, colors)
    });
    page.section(SectionId::Skills, revealed(SectionId::Skills), |b| {
        skills(b, app, colors)
    });
    page.section(SectionId::Projects, revealed(SectionId::Projects), |b| {
        projects(b, app, colors)
    });
    page.section(SectionId::Resume, revealed(SectionId::Resume), |b| {
        resume(b, app, colors)
    });
    page.section(SectionId::Contact, revealed(SectionId::Contact), |b| {
        contact(b, app, colors)
    });
    page.finish()
}

fn heading(b: &mut PageBuilder, title: &str, colors: &Colors) {
    b.blank();
    b.push(
        Line::styled(
            title.to_string(),
            Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
        )
        .centered(),
    );
    b.push(Line::styled("━━━━━━", Style::default().fg(colors.primary)).centered());
    b.blank();
}

fn hero(b: &mut PageBuilder, app: &App, colors: &Colors, rows: usize) {
    let profile = &app.config.profile;
    let start = b.lines.len();
    let cursor = if (app.now().as_millis() / 500) % 2 == 0 {
        "▌"
    } else {
        " "
    };

    let mut content = vec![
        Line::styled("Hello, I'm", Style::default().fg(colors.secondary)).centered(),
        Line::from(vec![
            Span::styled(
                app.scene.typewriter.text().to_string(),
                Style::default()
                    .fg(colors.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(cursor, Style::default().fg(colors.accent)),
        ])
        .centered(),
        Line::default(),
    ];
    for row in wrap_text(&profile.tagline, b.width) {
        content.push(Line::styled(row, Style::default().fg(colors.fg)).centered());
    }
    content.push(Line::default());
    content.push(
        Line::styled(
            format!(
                "[{}] Get in touch    [4] View my work",
                app.config.keys.compose.join("/")
            ),
            Style::default().fg(colors.accent),
        )
        .centered(),
    );
    if !profile.socials.is_empty() {
        let names: Vec<&str> = profile.socials.iter().map(|s| s.name.as_str()).collect();
        content.push(
            Line::styled(names.join("  ·  "), Style::default().fg(colors.muted)).centered(),
        );
    }

    let top = rows.saturating_sub(content.len() + 1) / 2;
    for _ in 0..top {
        b.blank();
    }
    for line in content {
        b.push(line);
    }
    // the hero always fills the first screen
    while b.lines.len() - start + 1 < rows {
        b.blank();
    }
    b.push(Line::styled("↓ scroll", Style::default().fg(colors.muted)).centered());
}

fn about(b: &mut PageBuilder, app: &App, colors: &Colors) {
    let profile = &app.config.profile;
    heading(b, "About Me", colors);

    for paragraph in &profile.about {
        b.paragraph(paragraph, Style::default().fg(colors.fg));
        b.blank();
    }
    for (label, value) in [("Location", &profile.location), ("Email", &profile.email)] {
        b.push(Line::from(vec![
            Span::styled(fit(label, 10), Style::default().fg(colors.muted)),
            Span::styled(value.clone(), Style::default().fg(colors.fg)),
        ]));
    }

    let counters = &app.scene.counters;
    if counters.is_empty() {
        return;
    }
    b.blank();
    let cell = (b.width / counters.len()).max(1);
    b.anchor(Target::Stats, 2);
    b.push(Line::from(
        counters
            .iter()
            .map(|counter| {
                Span::styled(
                    center(&counter.display(), cell),
                    Style::default()
                        .fg(colors.primary)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect::<Vec<_>>(),
    ));
    b.push(Line::from(
        profile
            .stats
            .iter()
            .map(|stat| {
                Span::styled(
                    center(&stat.label, cell),
                    Style::default().fg(colors.secondary_text),
                )
            })
            .collect::<Vec<_>>(),
    ));
}

fn skills(b: &mut PageBuilder, app: &App, colors: &Colors) {
    heading(b, "Skills", colors);

    let name_width = (b.width / 3).min(14);
    let bar_width = b.width.saturating_sub(name_width + 6).max(1);
    let mut index = 0;

    for category in &app.config.skills {
        b.push(Line::styled(
            category.title.clone(),
            Style::default()
                .fg(colors.primary)
                .add_modifier(Modifier::BOLD),
        ));
        for skill in &category.skills {
            let filled = app.scene.skill_bars.get(index).map_or(0.0, SkillBar::filled);
            let cells = ((filled * bar_width as f64).round() as usize).min(bar_width);

            b.anchor(Target::SkillBar(index), 1);
            b.push(Line::from(vec![
                Span::styled(fit(&skill.name, name_width), Style::default().fg(colors.fg)),
                Span::styled("█".repeat(cells), Style::default().fg(colors.primary)),
                Span::styled(
                    "░".repeat(bar_width - cells),
                    Style::default().fg(colors.border),
                ),
                Span::styled(
                    format!(" {:>3}%", skill.percent),
                    Style::default().fg(colors.secondary_text),
                ),
            ]));
            index += 1;
        }
        b.blank();
    }
}

fn projects(b: &mut PageBuilder, app: &App, colors: &Colors) {
    heading(b, "Projects", colors);

    let projects = &app.config.projects;
    if projects.is_empty() {
        return;
    }
    let keys = &app.config.keys;
    b.push(
        Line::styled(
            format!(
                "{} / {} to browse",
                keys.left.join("/"),
                keys.right.join("/")
            ),
            Style::default().fg(colors.muted),
        )
        .centered(),
    );
    b.blank();

    let selected = app.scene.page.selected_project.min(projects.len() - 1);
    for (i, project) in projects.iter().enumerate() {
        card(b, project, i == selected, colors);
    }
}

fn card(b: &mut PageBuilder, project: &Project, selected: bool, colors: &Colors) {
    let width = b.width.max(6);
    let inner = width - 4;
    let border = Style::default().fg(if selected { colors.primary } else { colors.border });
    let title_style = Style::default()
        .fg(if selected { colors.primary } else { colors.fg })
        .add_modifier(Modifier::BOLD);

    let title: String = project.title.chars().take(inner.saturating_sub(2)).collect();
    let fill = width.saturating_sub(5 + title.chars().count());
    b.push(Line::from(vec![
        Span::styled("╭─ ", border),
        Span::styled(title, title_style),
        Span::styled(format!(" {}╮", "─".repeat(fill)), border),
    ]));

    let row = |b: &mut PageBuilder, text: &str, style: Style| {
        b.push(Line::from(vec![
            Span::styled("│ ", border),
            Span::styled(fit(text, inner), style),
            Span::styled(" │", border),
        ]));
    };
    for line in wrap_text(&project.description, inner) {
        row(b, &line, Style::default().fg(colors.secondary_text));
    }
    if !project.technologies.is_empty() {
        row(
            b,
            &project.technologies.join(" · "),
            Style::default().fg(colors.accent),
        );
    }
    if selected {
        if !project.live_url.is_empty() {
            row(
                b,
                &format!("Live  {}", project.live_url),
                Style::default().fg(colors.primary),
            );
        }
        if !project.github_url.is_empty() {
            row(
                b,
                &format!("Code  {}", project.github_url),
                Style::default().fg(colors.primary),
            );
        }
    }

    b.push(Line::styled(format!("╰{}╯", "─".repeat(width - 2)), border));
    b.blank();
}

fn resume(b: &mut PageBuilder, app: &App, colors: &Colors) {
    heading(b, "Resume", colors);

    let current = app.resume_tab();
    let tab = |label: &'static str, tab: ResumeTab| {
        if tab == current {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(colors.bg)
                    .bg(colors.primary)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!(" {label} "),
                Style::default().fg(colors.secondary_text),
            )
        }
    };
    b.push(
        Line::from(vec![
            tab("Experience", ResumeTab::Experience),
            Span::raw("  "),
            tab("Education", ResumeTab::Education),
        ])
        .centered(),
    );
    b.blank();

    let entries = match current {
        ResumeTab::Experience => &app.config.experience,
        ResumeTab::Education => &app.config.education,
    };
    for entry in entries {
        timeline_entry(b, entry, colors);
    }
}

fn timeline_entry(b: &mut PageBuilder, entry: &TimelineEntry, colors: &Colors) {
    let rail = Style::default().fg(colors.border);
    b.push(Line::from(vec![
        Span::styled("● ", Style::default().fg(colors.primary)),
        Span::styled(
            entry.title.clone(),
            Style::default().fg(colors.fg).add_modifier(Modifier::BOLD),
        ),
    ]));
    b.push(Line::from(vec![
        Span::styled("│ ", rail),
        Span::styled(
            format!("{} · {}", entry.company, entry.date),
            Style::default().fg(colors.secondary_text),
        ),
    ]));
    if !entry.description.is_empty() {
        for row in wrap_text(&entry.description, b.width.saturating_sub(2)) {
            b.push(Line::from(vec![
                Span::styled("│ ", rail),
                Span::styled(row, Style::default().fg(colors.fg)),
            ]));
        }
    }
    for achievement in &entry.achievements {
        for (i, row) in wrap_text(achievement, b.width.saturating_sub(4))
            .into_iter()
            .enumerate()
        {
            let bullet = if i == 0 { "• " } else { "  " };
            b.push(Line::from(vec![
                Span::styled("│ ", rail),
                Span::styled(bullet, Style::default().fg(colors.accent)),
                Span::styled(row, Style::default().fg(colors.fg)),
            ]));
        }
    }
    b.push(Line::styled("│", rail));
}

fn contact(b: &mut PageBuilder, app: &App, colors: &Colors) {
    let profile = &app.config.profile;
    heading(b, "Get In Touch", colors);

    b.paragraph(
        "Have a project in mind or just want to say hi? My inbox is open.",
        Style::default().fg(colors.secondary_text),
    );
    b.blank();
    for (label, value) in [("Email", &profile.email), ("Location", &profile.location)] {
        b.push(Line::from(vec![
            Span::styled(fit(label, 10), Style::default().fg(colors.muted)),
            Span::styled(value.clone(), Style::default().fg(colors.fg)),
        ]));
    }
    for social in &profile.socials {
        b.push(Line::from(vec![
            Span::styled(fit(&social.name, 10), Style::default().fg(colors.muted)),
            Span::styled(social.url.clone(), Style::default().fg(colors.primary)),
        ]));
    }
    b.blank();

    let form = &app.form;
    let editing = form.is_editing();
    let input = Style::default().fg(colors.fg).bg(colors.surface);
    let text_width = b.width.saturating_sub(2).max(1);

    for field in Field::ALL {
        let focused = editing && form.focus() == Focus::Field(field);
        let (marker, label_style) = if focused {
            (
                "▸ ",
                Style::default()
                    .fg(colors.primary)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(colors.secondary_text))
        };
        b.push(Line::styled(
            format!("{marker}{}", field.placeholder()),
            label_style,
        ));

        let cursor = if focused { "▏" } else { "" };
        let text = format!("{}{cursor}", form.message().field(field));
        let mut rows = match field {
            Field::Message => wrap_text(&text, text_width),
            _ => vec![tail(&text, text_width)],
        };
        let min_rows = if field == Field::Message { 3 } else { 1 };
        while rows.len() < min_rows {
            rows.push(String::new());
        }
        for row in rows {
            b.push(Line::styled(
                format!(" {}", fit(&row, b.width.saturating_sub(1))),
                input,
            ));
        }
        b.blank();
    }

    let button = if (editing && form.focus() == Focus::Send) || form.is_sending() {
        Style::default()
            .fg(colors.bg)
            .bg(colors.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(colors.primary)
            .add_modifier(Modifier::BOLD)
    };
    b.push(Line::styled(format!(" {} ", form.button_label(app.now())), button));

    if let Some(status) = form.status() {
        let color = match status {
            SubmitStatus::Success => colors.success,
            SubmitStatus::Failure => colors.error,
        };
        b.blank();
        b.push(Line::styled(status.message(), Style::default().fg(color)));
    }

    b.blank();
    if !editing {
        b.push(Line::styled(
            format!(
                "Press {} to write a message",
                app.config.keys.compose.join("/")
            ),
            Style::default().fg(colors.muted),
        ));
        b.blank();
    }
    b.push(
        Line::styled(
            format!("© {}. Built with Rust and ratatui.", profile.name),
            Style::default().fg(colors.muted),
        )
        .centered(),
    );
    b.blank();
}

// ============================================================================
// TEXT HELPERS
// ============================================================================

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        let mut len = word.chars().count();
        while len > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            rows.push(word.chars().take(width).collect());
            word = word.chars().skip(width).collect();
            len -= width;
        }
        if len == 0 {
            continue;
        }
        if current_len > 0 && current_len + 1 + len > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&word);
        current_len += len;
    }
    if current_len > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// Exactly `width` columns: truncated or padded with spaces.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count().min(width);
    let left = (width - len) / 2;
    fit(&format!("{}{text}", " ".repeat(left)), width)
}

/// The last `width` characters, so the end of a long input stays visible.
fn tail(text: &str, width: usize) -> String {
    let len = text.chars().count();
    text.chars().skip(len.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::contact::SimulatedOutbox;
    use crate::preference::{MemoryStore, PreferenceStore, ThemeController};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn app() -> App {
        let theme = ThemeController::load(PreferenceStore::new(MemoryStore::new()));
        App::new(Config::default(), theme, None, SimulatedOutbox)
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol().to_string()))
                    .collect()
            })
            .collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn wrap_text_breaks_between_words() {
        assert_eq!(wrap_text("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 5), vec![""]);
    }

    #[test]
    fn fixed_width_helpers() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(tail("abcdef", 4), "cdef");
    }

    #[test]
    fn every_section_is_laid_out() {
        let mut app = app();
        draw(&mut app, 100, 30);

        let hero = app.layout.section(SectionId::Hero).unwrap();
        assert_eq!(hero.top, 0);
        assert!(hero.height >= 26);
        for id in SectionId::ALL {
            assert!(app.layout.section(id).is_some(), "{id:?} missing");
        }
        assert!(app.layout.region(Target::Stats).is_some());
        assert!(app.layout.region(Target::SkillBar(5)).is_some());
        assert!(app.layout.region(Target::SkillBar(6)).is_none());
        assert_eq!(app.viewport_rows(), 26);
    }

    #[test]
    fn navigation_collapses_on_narrow_terminals() {
        let mut app = app();
        let wide = draw(&mut app, 100, 30);
        assert!(wide[1].contains("folio"));
        assert!(wide[1].contains("Projects"));
        assert!(wide[1].contains('☾'));

        let narrow = draw(&mut app, 60, 30);
        assert!(narrow[1].contains("Menu"));
        assert!(!narrow[1].contains("Projects"));
    }

    #[test]
    fn hero_shows_the_typed_text() {
        let mut app = app();
        for t in [0, 150, 300, 450] {
            app.on_frame(ms(t));
        }
        let screen = draw(&mut app, 100, 30).join("\n");
        assert!(screen.contains("Hello, I'm"));
        assert!(screen.contains("Shu▌"));
    }

    #[test]
    fn hero_greeting_uses_the_secondary_color() {
        let app = app();
        let colors = app.colors();
        let (lines, _) = build_page(&app, &colors, 80, 20);
        let greeting = lines
            .iter()
            .find(|line| line.spans.iter().any(|s| s.content == "Hello, I'm"))
            .unwrap();
        let fg = greeting
            .spans
            .iter()
            .find_map(|s| s.style.fg)
            .or(greeting.style.fg);
        assert_eq!(fg, Some(colors.secondary));
    }

    #[test]
    fn sections_stay_dim_until_revealed() {
        let mut app = app();
        let colors = app.colors();
        let (lines, layout) = build_page(&app, &colors, 80, 20);
        let about = layout.section(SectionId::About).unwrap();
        assert!(lines[about.top as usize]
            .style
            .add_modifier
            .contains(Modifier::DIM));

        app.revealed.insert(SectionId::About);
        let (lines, _) = build_page(&app, &colors, 80, 20);
        assert!(!lines[about.top as usize]
            .style
            .add_modifier
            .contains(Modifier::DIM));
    }

    #[test]
    fn menu_overlay_lists_every_section() {
        let mut app = app();
        app.scene.page.menu_open = true;
        let screen = draw(&mut app, 60, 30).join("\n");
        assert!(screen.contains("Menu"));
        assert!(screen.contains("6 Contact"));
    }

    #[test]
    fn toast_is_drawn_once_slid_in() {
        let mut app = app();
        app.toasts
            .push("Message sent successfully!", ToastKind::Success, ms(0));
        app.on_frame(ms(500));
        let screen = draw(&mut app, 100, 30).join("\n");
        assert!(screen.contains("✓ Message sent successfully!"));
    }

    #[test]
    fn contact_form_shows_focus_and_input() {
        let mut app = app();
        draw(&mut app, 100, 30);
        app.handle_key(&KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        app.form.start_editing();
        app.form.input('A');

        let screen = draw(&mut app, 100, 30).join("\n");
        assert!(screen.contains("▸ Your Name"));
        assert!(screen.contains("A▏"));
        assert!(screen.contains("Esc Done"));
    }
}
