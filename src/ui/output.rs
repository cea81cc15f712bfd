use crate::ui::Icons;
use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static COLOR: OnceLock<bool> = OnceLock::new();

/// What a piece of CLI output is reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Done,
    Failed,
    Caution,
    Label,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Heading => Style::new().cyan().bold(),
            Tone::Done => Style::new().green().bold(),
            Tone::Failed => Style::new().red().bold(),
            Tone::Caution => Style::new().yellow().bold(),
            Tone::Label => Style::new().dimmed(),
        }
    }
}

/// Colors only on a terminal, and never with `NO_COLOR` set
fn color_enabled() -> bool {
    *COLOR.get_or_init(|| {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        !no_color && console::Term::stdout().is_term()
    })
}

/// Render text in a tone, or as-is when colors are off
pub fn paint(text: &str, tone: Tone) -> String {
    render(text, tone, color_enabled())
}

fn render(text: &str, tone: Tone, color: bool) -> String {
    if color {
        text.style(tone.style()).to_string()
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) {
    println!("{} {}", Icons::HOUSE, paint(text, Tone::Heading));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, paint(label, Tone::Done));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, paint(label, Tone::Failed));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, paint(label, Tone::Caution));
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::INFO, paint(label, Tone::Label), value);
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", paint(title, Tone::Heading));
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", paint(label, Tone::Label), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render_is_unchanged() {
        assert_eq!(render("Schema ready", Tone::Done, false), "Schema ready");
    }

    #[test]
    fn test_colored_render_wraps_text() {
        let painted = render("Seeded", Tone::Heading, true);
        assert!(painted.contains("Seeded"));
        assert!(painted.starts_with('\u{1b}'));
        assert_ne!(painted, "Seeded");
    }
}
