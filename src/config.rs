use anyhow::{Context, Result};
use directories::ProjectDirs;
use ratatui::style::{Color, Modifier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::preference::Theme;
use crate::typewriter::TypeTiming;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Title shown in the navigation bar
    pub title: String,

    /// Who the portfolio is about
    pub profile: Profile,

    /// Skill categories, each with animated progress bars
    pub skills: Vec<SkillCategory>,

    pub projects: Vec<Project>,

    /// Resume timeline, split over two tabs
    pub experience: Vec<TimelineEntry>,
    pub education: Vec<TimelineEntry>,

    /// Light and dark palettes
    pub colors: ColorConfig,

    /// Keybindings configuration
    pub keys: KeyConfig,

    pub animation: AnimationConfig,

    /// Backdrop behind the page
    pub particles: ParticleConfig,

    pub layout: LayoutConfig,

    pub contact: ContactConfig,

    /// Help text at the bottom
    pub help_text: HelpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    /// Phrases cycled by the hero typewriter
    pub roles: Vec<String>,
    pub tagline: String,
    pub location: String,
    pub email: String,
    pub about: Vec<String>,
    /// Shown as counters, e.g. "15+" or "98%"
    pub stats: Vec<Stat>,
    pub socials: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub live_url: String,
    #[serde(default)]
    pub github_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub title: String,
    pub company: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub light: Palette,
    pub dark: Palette,
    pub selected_modifier: Vec<String>, // "bold", "italic", "underlined"
    pub help_key_modifier: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub foreground: String,
    pub secondary_text: String,
    pub muted: String,
    pub background: String,
    pub surface: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub border: String,
    pub particle: String,
    pub success: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub page_up: Vec<String>,
    pub page_down: Vec<String>,
    pub top: Vec<String>,
    pub bottom: Vec<String>,
    pub next_section: Vec<String>,
    pub prev_section: Vec<String>,
    /// Switch resume tab / selected project in the active section
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub toggle_theme: Vec<String>,
    pub menu: Vec<String>,
    /// Start filling in the contact form
    pub compose: Vec<String>,
    pub quit: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub fps: u16,
    pub type_speed_ms: u64,
    pub delete_speed_ms: u64,
    pub pause_ms: u64,
    pub counter_duration_ms: u64,
    pub counter_delay_ms: u64,
    pub skill_delay_ms: u64,
    pub skill_stagger_ms: u64,
    pub skill_duration_ms: u64,
    pub scroll_duration_ms: u64,
    /// Visible fraction that reveals a section
    pub reveal_threshold: f64,
    /// Rows cut from the bottom of the viewport for reveals
    pub reveal_margin: u16,
    pub counter_threshold: f64,
    pub skill_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub enabled: bool,
    /// Square pixels per particle
    pub area_per_particle: f64,
    /// Pixel size of one terminal cell
    pub cell_width: f64,
    pub cell_height: f64,
    /// Velocity range per frame, centered on zero
    pub max_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Below this many columns the navigation collapses into a menu
    pub nav_breakpoint: u16,
    /// Rows above a section that already count as being in it
    pub activation_offset: u16,
    /// Scroll distance after which the navbar gets its border
    pub scrolled_threshold: u16,
    /// Maximum width of the page content (0 = unlimited)
    pub max_width: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub submit_delay_ms: u64,
    pub status_ms: u64,
    pub toast_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    pub enabled: bool,
    pub separator: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: " folio ".to_string(),
            profile: Profile::default(),
            skills: vec![
                SkillCategory {
                    title: "Languages".to_string(),
                    skills: vec![
                        Skill { name: "Rust".to_string(), percent: 85 },
                        Skill { name: "Python".to_string(), percent: 90 },
                        Skill { name: "JavaScript".to_string(), percent: 80 },
                    ],
                },
                SkillCategory {
                    title: "Tools".to_string(),
                    skills: vec![
                        Skill { name: "Git".to_string(), percent: 88 },
                        Skill { name: "Linux".to_string(), percent: 82 },
                        Skill { name: "Docker".to_string(), percent: 70 },
                    ],
                },
            ],
            projects: vec![
                Project {
                    title: "Terminal Portfolio".to_string(),
                    description: "This very page, rendered with ratatui.".to_string(),
                    technologies: strings(&["Rust", "ratatui", "crossterm"]),
                    live_url: String::new(),
                    github_url: "https://github.com/shubham-yadav/folio".to_string(),
                },
                Project {
                    title: "Path Visualizer".to_string(),
                    description: "Animated A*, Dijkstra and BFS on an editable grid."
                        .to_string(),
                    technologies: strings(&["TypeScript", "Canvas"]),
                    live_url: "https://example.com/path-visualizer".to_string(),
                    github_url: "https://github.com/shubham-yadav/path-visualizer".to_string(),
                },
            ],
            experience: vec![TimelineEntry {
                title: "Software Engineering Intern".to_string(),
                company: "Open Source".to_string(),
                date: "2024 - Present".to_string(),
                description: "Contributing fixes and features to developer tooling."
                    .to_string(),
                achievements: strings(&[
                    "Landed patches in three upstream projects",
                    "Wrote the test suite for a config parser",
                ]),
            }],
            education: vec![TimelineEntry {
                title: "B.Tech in Computer Science".to_string(),
                company: "University".to_string(),
                date: "2022 - 2026".to_string(),
                description: String::new(),
                achievements: strings(&["Data structures and algorithms", "Operating systems"]),
            }],
            colors: ColorConfig::default(),
            keys: KeyConfig::default(),
            animation: AnimationConfig::default(),
            particles: ParticleConfig::default(),
            layout: LayoutConfig::default(),
            contact: ContactConfig::default(),
            help_text: HelpConfig::default(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: "Shubham Yadav".to_string(),
            roles: strings(&[
                "Shubham Yadav",
                "Computer Science Student",
                "Problem Solver",
                "Tech Enthusiast",
            ]),
            tagline: "I build fast, friendly software.".to_string(),
            location: "India".to_string(),
            email: "hello@example.com".to_string(),
            about: strings(&[
                "I am a computer science student who likes systems programming, \
                 clean interfaces and shipping things people use.",
                "When I am not coding I am reading about compilers or climbing.",
            ]),
            stats: vec![
                Stat { value: "15+".to_string(), label: "Projects".to_string() },
                Stat { value: "3".to_string(), label: "Years coding".to_string() },
                Stat { value: "98%".to_string(), label: "Coffee".to_string() },
            ],
            socials: vec![
                SocialLink {
                    name: "GitHub".to_string(),
                    url: "https://github.com/shubham-yadav".to_string(),
                },
                SocialLink {
                    name: "LinkedIn".to_string(),
                    url: "https://linkedin.com/in/shubham-yadav".to_string(),
                },
            ],
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig {
            light: Palette::default(),
            dark: Palette::dark(),
            selected_modifier: vec!["bold".to_string()],
            help_key_modifier: vec!["bold".to_string()],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            foreground: "#1f2937".to_string(),
            secondary_text: "#6b7280".to_string(),
            muted: "#9ca3af".to_string(),
            background: "#ffffff".to_string(),
            surface: "#f8fafc".to_string(),
            primary: "#6366f1".to_string(),
            secondary: "#8b5cf6".to_string(),
            accent: "#f59e0b".to_string(),
            border: "#e5e7eb".to_string(),
            particle: "#6366f1".to_string(),
            success: "#10b981".to_string(),
            error: "#ef4444".to_string(),
        }
    }
}

impl Palette {
    pub fn dark() -> Self {
        Palette {
            foreground: "#e6eef6".to_string(),
            secondary_text: "#9fb3c8".to_string(),
            muted: "#7d8f9f".to_string(),
            background: "#0b1220".to_string(),
            surface: "#0f1724".to_string(),
            primary: "#06b6d4".to_string(),
            secondary: "#0ea5a4".to_string(),
            accent: "#7c3aed".to_string(),
            border: "#1f2a36".to_string(),
            particle: "#06b6d4".to_string(),
            success: "#10b981".to_string(),
            error: "#ef4444".to_string(),
        }
    }

    pub fn resolve(&self) -> Colors {
        Colors {
            fg: parse_color(&self.foreground),
            secondary_text: parse_color(&self.secondary_text),
            muted: parse_color(&self.muted),
            bg: parse_color(&self.background),
            surface: parse_color(&self.surface),
            primary: parse_color(&self.primary),
            secondary: parse_color(&self.secondary),
            accent: parse_color(&self.accent),
            border: parse_color(&self.border),
            particle: parse_color(&self.particle),
            success: parse_color(&self.success),
            error: parse_color(&self.error),
        }
    }
}

/// A palette with every entry parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub fg: Color,
    pub secondary_text: Color,
    pub muted: Color,
    pub bg: Color,
    pub surface: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub border: Color,
    pub particle: Color,
    pub success: Color,
    pub error: Color,
}

impl ColorConfig {
    pub fn palette(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            up: strings(&["Up", "k"]),
            down: strings(&["Down", "j"]),
            page_up: strings(&["PageUp", "Ctrl-u"]),
            page_down: strings(&["PageDown", "Ctrl-d", " "]),
            top: strings(&["Home", "g"]),
            bottom: strings(&["End", "G"]),
            next_section: strings(&["Tab", "n"]),
            prev_section: strings(&["BackTab", "p"]),
            left: strings(&["Left", "h"]),
            right: strings(&["Right", "l"]),
            toggle_theme: strings(&["t"]),
            menu: strings(&["m"]),
            compose: strings(&["c"]),
            quit: strings(&["Esc", "q"]),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            fps: 60,
            type_speed_ms: 150,
            delete_speed_ms: 75,
            pause_ms: 2000,
            counter_duration_ms: 2000,
            counter_delay_ms: 500,
            skill_delay_ms: 500,
            skill_stagger_ms: 100,
            skill_duration_ms: 1500,
            scroll_duration_ms: 400,
            reveal_threshold: 0.1,
            reveal_margin: 2,
            counter_threshold: 0.5,
            skill_threshold: 0.5,
        }
    }
}

impl AnimationConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    pub fn type_timing(&self) -> TypeTiming {
        TypeTiming {
            type_speed: Duration::from_millis(self.type_speed_ms),
            delete_speed: Duration::from_millis(self.delete_speed_ms),
            pause: Duration::from_millis(self.pause_ms),
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            enabled: true,
            area_per_particle: 10_000.0,
            cell_width: 8.0,
            cell_height: 16.0,
            max_speed: 0.5,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            nav_breakpoint: 80,
            activation_offset: 3,
            scrolled_threshold: 4,
            max_width: 100,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        ContactConfig {
            submit_delay_ms: 2000,
            status_ms: 3000,
            toast_ms: 3000,
        }
    }
}

impl Default for HelpConfig {
    fn default() -> Self {
        HelpConfig {
            enabled: true,
            separator: " | ".to_string(),
        }
    }
}

// ============================================================================
// COLOR PARSING
// ============================================================================

pub fn parse_color(color_str: &str) -> Color {
    match color_str.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        "reset" | "default" => Color::Reset,
        // RGB format: #RRGGBB
        hex if hex.len() == 7
            && hex.starts_with('#')
            && hex[1..].chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            match (
                u8::from_str_radix(&hex[1..3], 16),
                u8::from_str_radix(&hex[3..5], 16),
                u8::from_str_radix(&hex[5..7], 16),
            ) {
                (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
                _ => Color::Reset,
            }
        }
        _ => Color::Reset,
    }
}

pub fn parse_modifier(modifiers: &[String]) -> Modifier {
    let mut result = Modifier::empty();
    for modifier in modifiers {
        match modifier.to_lowercase().as_str() {
            "bold" => result |= Modifier::BOLD,
            "italic" => result |= Modifier::ITALIC,
            "underlined" => result |= Modifier::UNDERLINED,
            "reversed" => result |= Modifier::REVERSED,
            "crossedout" => result |= Modifier::CROSSED_OUT,
            _ => {}
        }
    }
    result
}

// ============================================================================
// CONFIG LOADING
// ============================================================================

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "folio")
}

pub fn get_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn get_preferences_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("preferences.toml"))
}

pub fn get_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("folio.log"))
}

/// Config from the default location. Problems there are not fatal.
pub fn load_config() -> Config {
    if let Some(config_path) = get_config_path() {
        if config_path.exists() {
            match load_config_from_path(&config_path) {
                Ok(config) => return config,
                Err(e) => warn!("using default configuration: {e:#}"),
            }
        }
    }
    Config::default()
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

pub fn generate_config_file() -> Result<PathBuf> {
    let config_path = get_config_path().context("Could not determine config directory")?;

    let config_dir = config_path.parent().context("Invalid config path")?;

    fs::create_dir_all(config_dir).with_context(|| {
        format!(
            "Failed to create config directory: {}",
            config_dir.display()
        )
    })?;

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    Ok(config_path)
}

pub fn generate_default_config() -> String {
    String::from(
        r##"## folio configuration file
## Place this file at ~/.config/folio/config.toml
## All fields are optional - defaults will be used for missing values

title = " folio "

[profile]
name = "Shubham Yadav"
## Phrases cycled by the typewriter in the hero section
roles = ["Shubham Yadav", "Computer Science Student", "Problem Solver", "Tech Enthusiast"]
tagline = "I build fast, friendly software."
location = "India"
email = "hello@example.com"
about = [
    "I am a computer science student who likes systems programming, clean interfaces and shipping things people use.",
    "When I am not coding I am reading about compilers or climbing.",
]

## Digits are counted up when the stats scroll into view; "+" and "%" are kept
[[profile.stats]]
value = "15+"
label = "Projects"

[[profile.stats]]
value = "3"
label = "Years coding"

[[profile.stats]]
value = "98%"
label = "Coffee"

[[profile.socials]]
name = "GitHub"
url = "https://github.com/shubham-yadav"

[[profile.socials]]
name = "LinkedIn"
url = "https://linkedin.com/in/shubham-yadav"

[[skills]]
title = "Languages"
skills = [
    { name = "Rust", percent = 85 },
    { name = "Python", percent = 90 },
    { name = "JavaScript", percent = 80 },
]

[[skills]]
title = "Tools"
skills = [
    { name = "Git", percent = 88 },
    { name = "Linux", percent = 82 },
    { name = "Docker", percent = 70 },
]

[[projects]]
title = "Terminal Portfolio"
description = "This very page, rendered with ratatui."
technologies = ["Rust", "ratatui", "crossterm"]
live_url = ""
github_url = "https://github.com/shubham-yadav/folio"

[[projects]]
title = "Path Visualizer"
description = "Animated A*, Dijkstra and BFS on an editable grid."
technologies = ["TypeScript", "Canvas"]
live_url = "https://example.com/path-visualizer"
github_url = "https://github.com/shubham-yadav/path-visualizer"

[[experience]]
title = "Software Engineering Intern"
company = "Open Source"
date = "2024 - Present"
description = "Contributing fixes and features to developer tooling."
achievements = ["Landed patches in three upstream projects", "Wrote the test suite for a config parser"]

[[education]]
title = "B.Tech in Computer Science"
company = "University"
date = "2022 - 2026"
description = ""
achievements = ["Data structures and algorithms", "Operating systems"]

[colors]
## Available colors:
## Standard: black, red, green, yellow, blue, magenta, cyan, gray, white
## Light variants: lightred, lightgreen, lightyellow, lightblue, lightmagenta, lightcyan
## Dark variants: darkgray
## Hex: "#RRGGBB" (e.g., "#ff0000" for red)
## Particles are blended over the background, which needs hex colors for both
selected_modifier = ["bold"]  ## Options: bold, italic, underlined, reversed, crossedout
help_key_modifier = ["bold"]

[colors.light]
foreground = "#1f2937"
secondary_text = "#6b7280"
muted = "#9ca3af"
background = "#ffffff"
surface = "#f8fafc"
primary = "#6366f1"
secondary = "#8b5cf6"
accent = "#f59e0b"
border = "#e5e7eb"
particle = "#6366f1"
success = "#10b981"
error = "#ef4444"

[colors.dark]
foreground = "#e6eef6"
secondary_text = "#9fb3c8"
muted = "#7d8f9f"
background = "#0b1220"
surface = "#0f1724"
primary = "#06b6d4"
secondary = "#0ea5a4"
accent = "#7c3aed"
border = "#1f2a36"
particle = "#06b6d4"
success = "#10b981"
error = "#ef4444"

[keys]
## Key names: Use crossterm KeyCode names
## Examples: "q", "Esc", "Enter", "Up", "Down", "Left", "Right", "Tab", "BackTab", "Backspace"
## Modifiers can be added with format: "Ctrl-q", "Alt-q", "Shift-Up"
up = ["Up", "k"]
down = ["Down", "j"]
page_up = ["PageUp", "Ctrl-u"]
page_down = ["PageDown", "Ctrl-d", " "]
top = ["Home", "g"]
bottom = ["End", "G"]
next_section = ["Tab", "n"]
prev_section = ["BackTab", "p"]
left = ["Left", "h"]
right = ["Right", "l"]
toggle_theme = ["t"]
menu = ["m"]
compose = ["c"]
quit = ["Esc", "q"]

[animation]
fps = 60
type_speed_ms = 150
delete_speed_ms = 75
pause_ms = 2000
counter_duration_ms = 2000
counter_delay_ms = 500
skill_delay_ms = 500
skill_stagger_ms = 100
skill_duration_ms = 1500
scroll_duration_ms = 400
reveal_threshold = 0.1
reveal_margin = 2
counter_threshold = 0.5
skill_threshold = 0.5

[particles]
enabled = true
## One particle per this many square pixels
area_per_particle = 10000.0
## Size of one terminal cell in pixels
cell_width = 8.0
cell_height = 16.0
max_speed = 0.5

[layout]
## Collapse the navigation into a menu below this width
nav_breakpoint = 80
activation_offset = 3
scrolled_threshold = 4
## Maximum width of the page content (0 = unlimited)
max_width = 100

[contact]
submit_delay_ms = 2000
status_ms = 3000
toast_ms = 3000

[help_text]
enabled = true
separator = " | "
"##,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generated_config_matches_the_defaults() {
        let parsed: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            title = " mine "
            [profile]
            name = "Ada"
            [animation]
            fps = 30
            "#,
        )
        .unwrap();

        assert_eq!(parsed.title, " mine ");
        assert_eq!(parsed.profile.name, "Ada");
        assert_eq!(parsed.profile.roles, Profile::default().roles);
        assert_eq!(parsed.animation.fps, 30);
        assert_eq!(parsed.animation.pause_ms, 2000);
        assert_eq!(parsed.keys, KeyConfig::default());
    }

    #[test]
    fn colors_parse_by_name_and_hex() {
        assert_eq!(parse_color("Cyan"), Color::Cyan);
        assert_eq!(parse_color("#6366f1"), Color::Rgb(99, 102, 241));
        assert_eq!(parse_color("#zzzzzz"), Color::Reset);
        assert_eq!(parse_color("#1é234"), Color::Reset);
        assert_eq!(parse_color("#+f+f+f"), Color::Reset);
        assert_eq!(parse_color("chartreuse"), Color::Reset);
    }

    #[test]
    fn modifiers_combine() {
        let modifier = parse_modifier(&strings(&["bold", "Italic", "sparkly"]));
        assert_eq!(modifier, Modifier::BOLD | Modifier::ITALIC);
    }

    #[test]
    fn timing_comes_from_milliseconds() {
        let animation = AnimationConfig::default();
        assert_eq!(animation.frame_interval(), Duration::from_millis(16));
        assert_eq!(animation.type_timing(), TypeTiming::default());
    }

    #[test]
    fn explicit_path_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(load_config_from_path(&path).is_err());

        fs::write(&path, "title = [").unwrap();
        let err = load_config_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }
}
