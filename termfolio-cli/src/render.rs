//! Turns [`Output`] values into styled terminal lines.

use crossterm::style::{Color, Stylize};
use termfolio_core::{CommandSummary, Output, Section};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

const INDENT: &str = "  ";
const MIN_WIDTH: usize = 40;

/// Renders command output for one theme and terminal width.
pub struct Renderer {
    theme: &'static Theme,
    width: usize,
    color: bool,
}

impl Renderer {
    pub fn new(theme: &'static Theme) -> Self {
        Self {
            theme,
            width: 80,
            color: true,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(MIN_WIDTH);
        self
    }

    /// Disable ANSI styling (pipes, tests).
    pub fn plain(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme
    }

    /// Banner shown while the transcript is empty.
    pub fn welcome(&self) -> Vec<String> {
        vec![
            self.bold("Welcome to the Terminal Portfolio", self.theme.accent),
            format!(
                "{}{}{}",
                self.paint("Type ", self.theme.text),
                self.bold("help", self.theme.prompt),
                self.paint(" to see available commands", self.theme.text),
            ),
            String::new(),
        ]
    }

    /// The prompt as drawn before the input buffer.
    pub fn prompt(&self, prompt: &str) -> String {
        format!("{} ", self.paint(prompt, self.theme.prompt))
    }

    pub fn render(&self, output: &Output) -> Vec<String> {
        match output {
            Output::Text(text) => self.paragraph(text, INDENT),
            Output::Lines(lines) => lines
                .iter()
                .flat_map(|line| self.paragraph(line, INDENT))
                .collect(),
            Output::List { title, items } => {
                let mut out = vec![self.title(title)];
                for item in items {
                    out.extend(self.hanging(item, "  • ", "    "));
                }
                out
            }
            Output::KeyValue { title, entries } => {
                let mut out = vec![self.title(title)];
                out.extend(self.key_values(entries));
                out
            }
            Output::Sections { title, sections } => {
                let mut out = vec![self.title(title)];
                for section in sections {
                    out.push(String::new());
                    out.extend(self.section(section));
                }
                out
            }
            Output::Commands(commands) => self.commands(commands),
            Output::NotFound {
                command,
                suggestion,
            } => {
                let mut out = vec![format!(
                    "{}{}",
                    self.paint("Command not found: ", self.theme.error),
                    self.bold(command, self.theme.error)
                )];
                if let Some(suggestion) = suggestion {
                    out.push(format!(
                        "Did you mean {}?",
                        self.bold(suggestion, self.theme.prompt)
                    ));
                }
                out.push(self.help_hint("Type ", " to see available commands."));
                out
            }
            Output::Error { message } => {
                let mut out = self.hanging(
                    &format!("Error executing command: {message}"),
                    "",
                    INDENT,
                );
                if self.color {
                    out = out
                        .into_iter()
                        .map(|l| l.with(self.theme.error).to_string())
                        .collect();
                }
                out.push(self.help_hint("Try ", " for usage info."));
                out
            }
            Output::Clear | Output::Empty => Vec::new(),
        }
    }

    fn commands(&self, commands: &[CommandSummary]) -> Vec<String> {
        let mut out = vec![self.title("Available Commands")];
        let column = commands
            .iter()
            .map(|c| c.name.width())
            .max()
            .unwrap_or(0)
            + 2;
        for cmd in commands {
            let pad = " ".repeat(column.saturating_sub(cmd.name.width()));
            let mut description = cmd.description.clone();
            if !cmd.aliases.is_empty() {
                description.push_str(&format!(" ({})", cmd.aliases.join(", ")));
            }
            let lead = format!("{INDENT}{}{pad}", self.bold(&cmd.name, self.theme.prompt));
            let rest = " ".repeat(INDENT.width() + column);
            let wrapped = self.wrap(&description, &rest, &rest);
            for (i, line) in wrapped.into_iter().enumerate() {
                let line = self.paint(line.trim_start(), self.theme.text);
                if i == 0 {
                    out.push(format!("{lead}{line}"));
                } else {
                    out.push(format!("{rest}{line}"));
                }
            }
        }
        out.push(String::new());
        out.push(self.paint(
            "Tip: Tab autocompletes, Up/Down recall history, Esc clears the line.",
            self.theme.text,
        ));
        out
    }

    fn key_values(&self, entries: &[(String, String)]) -> Vec<String> {
        let column = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0) + 2;
        let mut out = Vec::new();
        for (label, value) in entries {
            let pad = " ".repeat(column.saturating_sub(label.width() + 1));
            let lead = format!("{INDENT}{}:{pad}", self.bold(label, self.theme.accent));
            let rest = " ".repeat(INDENT.width() + column);
            for (i, line) in self.wrap(value, &rest, &rest).into_iter().enumerate() {
                let line = line.trim_start().to_string();
                if i == 0 {
                    out.push(format!("{lead}{line}"));
                } else {
                    out.push(format!("{rest}{line}"));
                }
            }
        }
        out
    }

    fn section(&self, section: &Section) -> Vec<String> {
        let mut out = Vec::new();
        let heading_width = INDENT.width() + section.heading.width();
        let heading = self.bold(&section.heading, self.theme.prompt);
        match &section.meta {
            Some(meta) if heading_width + meta.width() + 2 <= self.width => {
                let gap = self.width - heading_width - meta.width();
                out.push(format!(
                    "{INDENT}{heading}{}{}",
                    " ".repeat(gap),
                    self.paint(meta, self.theme.accent)
                ));
            }
            Some(meta) => {
                out.push(format!("{INDENT}{heading}"));
                out.push(format!("{INDENT}{}", self.paint(meta, self.theme.accent)));
            }
            None => out.push(format!("{INDENT}{heading}")),
        }
        if let Some(sub) = &section.subheading {
            out.extend(self.paragraph(sub, INDENT));
        }
        for item in &section.body {
            out.extend(self.hanging(item, "    ▹ ", "      "));
        }
        if !section.tags.is_empty() {
            let tags: Vec<String> = section.tags.iter().map(|t| format!("[{t}]")).collect();
            for line in self.wrap(&tags.join(" "), "    ", "    ") {
                out.push(self.paint(&line, self.theme.accent));
            }
        }
        for link in &section.links {
            out.push(format!(
                "    {} {}",
                self.bold(&format!("{}:", link.label), self.theme.text),
                self.paint(&link.url, self.theme.accent)
            ));
        }
        out
    }

    fn title(&self, title: &str) -> String {
        self.bold(title, self.theme.accent)
    }

    fn help_hint(&self, before: &str, after: &str) -> String {
        format!("{before}{}{after}", self.bold("help", self.theme.prompt))
    }

    fn paragraph(&self, text: &str, indent: &str) -> Vec<String> {
        if text.is_empty() {
            return vec![String::new()];
        }
        self.wrap(text, indent, indent)
            .into_iter()
            .map(|l| self.paint(&l, self.theme.text))
            .collect()
    }

    fn hanging(&self, text: &str, first: &str, rest: &str) -> Vec<String> {
        self.wrap(text, first, rest)
            .into_iter()
            .map(|l| self.paint(&l, self.theme.text))
            .collect()
    }

    fn wrap(&self, text: &str, first: &str, rest: &str) -> Vec<String> {
        let options = textwrap::Options::new(self.width)
            .initial_indent(first)
            .subsequent_indent(rest);
        textwrap::wrap(text, options)
            .into_iter()
            .map(|l| l.into_owned())
            .collect()
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}
