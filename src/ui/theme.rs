//! Visual theme and styling.

use console::Style;

/// Startgate's visual theme.
#[derive(Debug, Clone)]
pub struct StartgateTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for highlighted text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for StartgateTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl StartgateTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▸"),
            self.highlight.apply_to(title)
        )
    }

    /// Format a `key: value` line, keys padded to a common width.
    pub fn format_field(&self, key: &str, value: &str) -> String {
        format!(
            "  {} {}",
            self.key.apply_to(format!("{:<14}", format!("{}:", key))),
            value
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_status_lines() {
        let theme = StartgateTheme::plain();
        assert!(theme.format_success("Done").contains("✓ Done"));
        assert!(theme.format_warning("Careful").contains("⚠ Careful"));
        assert!(theme.format_error("Failed").contains("✗ Failed"));
    }

    #[test]
    fn theme_formats_header() {
        let theme = StartgateTheme::plain();
        let msg = theme.format_header("Print Host");
        assert!(msg.contains("Print Host"));
    }

    #[test]
    fn field_keys_are_aligned() {
        let theme = StartgateTheme::plain();
        let a = theme.format_field("Installed", "yes");
        let b = theme.format_field("Network", "no");
        assert_eq!(a.find("yes"), b.find("no"));
    }

    #[test]
    fn colored_theme_creates_without_panic() {
        let theme = StartgateTheme::default();
        let _ = theme.format_success("test");
        let _ = theme.format_field("Camera", "enabled (modern)");
    }
}
