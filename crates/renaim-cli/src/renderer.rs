//! Terminal rendering for status lines and the run summary
//!
//! Status lines are printed as they arrive; the summary is markdown rendered
//! through termimad, with a plain-text fallback for `--no-color`.

use anyhow::Result;
use termimad::{
    crossterm::style::{Color, Stylize},
    MadSkin,
};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Print one per-file status line
    pub fn line(&self, text: &str) {
        println!("{}", self.styled_line(text));
    }

    /// Status line colored by its tag: errors red, skips yellow, the rest
    /// green. Unchanged in plain mode.
    pub fn styled_line(&self, text: &str) -> String {
        if !self.rich_enabled {
            return text.to_string();
        }
        if text.starts_with("*** err ***") {
            text.red().to_string()
        } else if text.starts_with("*** skp ***") {
            text.yellow().to_string()
        } else {
            text.green().to_string()
        }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        print!("{}", self.format_markdown(markdown));
        Ok(())
    }

    /// Markdown as it will appear on the terminal. Plain mode keeps the
    /// source text.
    pub fn format_markdown(&self, markdown: &str) -> String {
        if !self.rich_enabled {
            return markdown.to_string();
        }
        let mut out = String::new();
        for line in markdown.lines() {
            if line.starts_with('#') {
                out.push_str(&line.blue().bold().to_string());
            } else {
                out.push_str(&self.skin.inline(line).to_string());
            }
            out.push('\n');
        }
        out
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
