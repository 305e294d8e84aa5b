//! Semantic output tags and their styles.
//!
//! Commands never emit ANSI codes. They wrap text in tags such as
//! `<error>...</error>` and the console decides how to show them: styled
//! on a color terminal, stripped everywhere else. Unknown tags and tags whose
//! open and close names differ are left untouched.

use std::sync::LazyLock;

use console::Style;
use regex::{Captures, Regex};

/// Tag names the theme understands.
pub const TAGS: &[&str] = &["error", "warning", "info", "success", "comment", "question"];

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?P<open>[a-z_]+)>(?P<body>.*?)</(?P<close>[a-z_]+)>").unwrap()
});

/// Styles applied to semantic tags.
#[derive(Debug, Clone)]
pub struct ShellTheme {
    /// `<error>` (red bold).
    pub error: Style,
    /// `<warning>` (orange).
    pub warning: Style,
    /// `<info>` (cyan).
    pub info: Style,
    /// `<success>` (green).
    pub success: Style,
    /// `<comment>` (dim).
    pub comment: Style,
    /// `<question>` (magenta).
    pub question: Style,
    styled: bool,
}

impl Default for ShellTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            error: Style::new().red().bold(),
            warning: Style::new().color256(208),
            info: Style::new().cyan(),
            success: Style::new().green(),
            comment: Style::new().dim(),
            question: Style::new().magenta(),
            styled: true,
        }
    }

    /// Create a theme that strips tags without styling.
    pub fn plain() -> Self {
        Self {
            error: Style::new(),
            warning: Style::new(),
            info: Style::new(),
            success: Style::new(),
            comment: Style::new(),
            question: Style::new(),
            styled: false,
        }
    }

    fn style_for(&self, tag: &str) -> Option<&Style> {
        match tag {
            "error" => Some(&self.error),
            "warning" => Some(&self.warning),
            "info" => Some(&self.info),
            "success" => Some(&self.success),
            "comment" => Some(&self.comment),
            "question" => Some(&self.question),
            _ => None,
        }
    }

    /// Replace known tags with their styles (or nothing, for the plain theme).
    pub fn render(&self, text: &str) -> String {
        TAG_REGEX
            .replace_all(text, |caps: &Captures| {
                let open = &caps["open"];
                let body = &caps["body"];
                if open != &caps["close"] {
                    return caps[0].to_string();
                }
                match self.style_for(open) {
                    Some(style) if self.styled => style.apply_to(body).force_styling(true).to_string(),
                    Some(_) => body.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Strip known tags from text.
pub fn strip_tags(text: &str) -> String {
    ShellTheme::plain().render(text)
}

/// Check if colors should be used.
pub fn should_use_colors() -> bool {
    std::env::var("NO_COLOR").is_err() && console::colors_enabled()
}
