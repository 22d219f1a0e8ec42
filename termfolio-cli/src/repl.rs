//! Interactive shell loop and raw-mode line editor.
//!
//! The editor is a thin view over [`Session`]: every keystroke is forwarded
//! to the session (which owns the buffer, recall state and suggestions) and
//! the line is redrawn from the session's state. Keys:
//! - Up/Down walk the history log
//! - Tab autofills a single suggestion or lists several
//! - Esc clears the line and suggestions
//! - Ctrl-C clears the line, Ctrl-D on an empty line exits

use crossterm::{
    cursor,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::sync::Arc;
use termfolio_core::{CommandRegistry, Completion, Session, ShellConfig, Submission};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::render::Renderer;

/// Maximum number of suggestion rows drawn under the input line.
const MAX_VISIBLE_SUGGESTIONS: usize = 8;

/// What ended a call to [`LineEditor::read_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Enter was pressed; the session buffer holds the line.
    Submit,
    /// Ctrl-C; the line was discarded.
    Interrupted,
    /// Ctrl-D on an empty line.
    Eof,
}

/// Raw-mode line editor bound to one session.
pub struct LineEditor<'r> {
    renderer: &'r Renderer,
    prompt: String,
    /// Cursor position in characters.
    cursor: usize,
    /// Number of suggestion lines currently displayed below the input.
    rendered_lines: usize,
}

impl<'r> LineEditor<'r> {
    pub fn new(renderer: &'r Renderer, prompt: &str) -> Self {
        Self {
            renderer,
            prompt: prompt.to_string(),
            cursor: 0,
            rendered_lines: 0,
        }
    }

    /// Read one line into `session`'s input buffer.
    ///
    /// Enables raw mode during input, restores on return.
    pub fn read_line(&mut self, session: &mut Session) -> io::Result<ReadOutcome> {
        self.cursor = 0;
        self.redraw(session)?;

        terminal::enable_raw_mode()?;
        let result = execute!(io::stdout(), EnableBracketedPaste)
            .and_then(|()| self.read_line_raw(session));
        // Every restore step runs even if an earlier one fails; raw mode
        // must never outlive this call.
        let restored = first_failure([
            self.clear_suggestion_lines(),
            execute!(io::stdout(), DisableBracketedPaste),
            terminal::disable_raw_mode(),
        ]);

        let outcome = result?;
        restored?;
        print!("\r\n");
        io::stdout().flush()?;
        Ok(outcome)
    }

    fn read_line_raw(&mut self, session: &mut Session) -> io::Result<ReadOutcome> {
        loop {
            let evt = event::read()?;
            let (code, modifiers) = match evt {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    ..
                }) => (code, modifiers),
                Event::Paste(text) => {
                    let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
                    let updated = insert_str(session.input(), self.cursor, &pasted);
                    self.cursor += pasted.chars().count();
                    session.set_input(&updated);
                    self.redraw(session)?;
                    continue;
                }
                Event::Resize(..) => {
                    self.redraw(session)?;
                    continue;
                }
                _ => continue,
            };

            match (code, modifiers) {
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                    session.escape();
                    write!(io::stdout(), "^C")?;
                    return Ok(ReadOutcome::Interrupted);
                }
                (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                    if session.input().is_empty() {
                        return Ok(ReadOutcome::Eof);
                    }
                }
                (KeyCode::Enter, _) => return Ok(ReadOutcome::Submit),
                (KeyCode::Tab, _) => {
                    match session.complete() {
                        Completion::Filled(name) => {
                            debug!(%name, "Autofilled command");
                            self.cursor = name.chars().count();
                        }
                        Completion::Candidates(_) | Completion::None => {}
                    }
                    self.redraw(session)?;
                }
                (KeyCode::Esc, _) => {
                    session.escape();
                    self.cursor = 0;
                    self.redraw(session)?;
                }
                (KeyCode::Up, _) => {
                    self.cursor = session.recall_up().chars().count();
                    self.redraw(session)?;
                }
                (KeyCode::Down, _) => {
                    self.cursor = session.recall_down().chars().count();
                    self.redraw(session)?;
                }
                (KeyCode::Left, _) => {
                    self.cursor = self.cursor.saturating_sub(1);
                    self.redraw(session)?;
                }
                (KeyCode::Right, _) => {
                    self.cursor = (self.cursor + 1).min(session.input().chars().count());
                    self.redraw(session)?;
                }
                (KeyCode::Home, _) => {
                    self.cursor = 0;
                    self.redraw(session)?;
                }
                (KeyCode::End, _) => {
                    self.cursor = session.input().chars().count();
                    self.redraw(session)?;
                }
                (KeyCode::Backspace, _) => {
                    if self.cursor > 0 {
                        let updated = remove_char(session.input(), self.cursor - 1);
                        self.cursor -= 1;
                        session.set_input(&updated);
                    }
                    self.redraw(session)?;
                }
                (KeyCode::Delete, _) => {
                    if self.cursor < session.input().chars().count() {
                        let updated = remove_char(session.input(), self.cursor);
                        session.set_input(&updated);
                    }
                    self.redraw(session)?;
                }
                (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                    let updated = insert_str(session.input(), self.cursor, &c.to_string());
                    self.cursor += 1;
                    session.set_input(&updated);
                    self.redraw(session)?;
                }
                _ => {}
            }
        }
    }

    /// Redraw the input line, the ghost hint and the suggestion list.
    fn redraw(&mut self, session: &Session) -> io::Result<()> {
        self.clear_suggestion_lines()?;

        let input = session.input();
        let theme = self.renderer.theme();
        let mut stdout = io::stdout();
        write!(stdout, "\r")?;
        execute!(stdout, terminal::Clear(ClearType::CurrentLine))?;
        write!(stdout, "{}{}", self.renderer.prompt(&self.prompt), input)?;

        // Ghost text for the first suggestion when it extends the input
        let ghost = session
            .suggestions()
            .first()
            .and_then(|s| ghost_suffix(input, s))
            .unwrap_or("");
        if !ghost.is_empty() {
            write!(stdout, "{}", ghost.with(theme.accent).dim())?;
        }

        let suggestions = session.suggestions();
        if suggestions.len() > 1 {
            self.render_suggestions(session, suggestions)?;
        }

        let column = self.prompt.width() + 1 + prefix_width(input, self.cursor);
        if self.rendered_lines > 0 {
            execute!(stdout, cursor::MoveUp(self.rendered_lines as u16))?;
        }
        execute!(stdout, cursor::MoveToColumn(column as u16))?;
        stdout.flush()
    }

    fn render_suggestions(&mut self, session: &Session, suggestions: &[String]) -> io::Result<()> {
        let mut stdout = io::stdout();
        let theme = self.renderer.theme();
        let term_width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        let name_width = suggestions.iter().map(|s| s.width()).max().unwrap_or(0);

        let shown = suggestions.len().min(MAX_VISIBLE_SUGGESTIONS);
        for name in &suggestions[..shown] {
            let description = session
                .registry()
                .lookup(name)
                .map(|d| d.description.clone())
                .unwrap_or_default();
            let max_desc = term_width.saturating_sub(name_width + 6);
            let description = textwrap::wrap(&description, max_desc.max(1))
                .into_iter()
                .next()
                .map(|l| l.into_owned())
                .unwrap_or_default();
            let pad = " ".repeat(name_width.saturating_sub(name.width()));
            write!(stdout, "\r\n")?;
            execute!(stdout, terminal::Clear(ClearType::CurrentLine))?;
            write!(
                stdout,
                "  {}{pad}  {}",
                name.as_str().with(theme.prompt),
                description.as_str().with(theme.text).dim()
            )?;
        }
        self.rendered_lines = shown;
        Ok(())
    }

    /// Clear previously rendered suggestion lines below the input.
    fn clear_suggestion_lines(&mut self) -> io::Result<()> {
        if self.rendered_lines > 0 {
            let mut stdout = io::stdout();
            for _ in 0..self.rendered_lines {
                write!(stdout, "\r\n")?;
                execute!(stdout, terminal::Clear(ClearType::CurrentLine))?;
            }
            execute!(stdout, cursor::MoveUp(self.rendered_lines as u16))?;
            stdout.flush()?;
            self.rendered_lines = 0;
        }
        Ok(())
    }
}

/// Run the interactive shell until Ctrl-D.
pub fn run_interactive(
    registry: Arc<CommandRegistry>,
    config: &ShellConfig,
    renderer: &Renderer,
) -> anyhow::Result<()> {
    let mut session = Session::with_options(registry, config.session_options());
    let mut editor = LineEditor::new(renderer, &config.ui.prompt);
    let mut stdout = io::stdout();

    if config.ui.show_welcome {
        print_lines(&renderer.welcome())?;
    }

    loop {
        match editor.read_line(&mut session)? {
            ReadOutcome::Eof => break,
            ReadOutcome::Interrupted => continue,
            ReadOutcome::Submit => {}
        }
        match session.submit() {
            Submission::Ignored => {}
            Submission::Cleared => {
                execute!(
                    stdout,
                    terminal::Clear(ClearType::All),
                    terminal::Clear(ClearType::Purge),
                    cursor::MoveTo(0, 0)
                )?;
                if config.ui.show_welcome {
                    print_lines(&renderer.welcome())?;
                }
            }
            Submission::Executed(entry) => {
                let mut lines = renderer.render(&entry.output);
                lines.push(String::new());
                print_lines(&lines)?;
            }
        }
    }

    info!(
        session = %session.id(),
        commands = session.history().len(),
        "Interactive session finished"
    );
    Ok(())
}

/// Run one line and print its output. Returns `false` when it failed.
pub fn run_once(
    registry: Arc<CommandRegistry>,
    config: &ShellConfig,
    renderer: &Renderer,
    line: &str,
) -> anyhow::Result<bool> {
    let mut session = Session::with_options(registry, config.session_options());
    match session.submit_line(line) {
        Submission::Executed(entry) => {
            print_lines(&renderer.render(&entry.output))?;
            Ok(!entry.output.is_failure())
        }
        Submission::Ignored | Submission::Cleared => Ok(true),
    }
}

fn print_lines(lines: &[String]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()
}

/// The first error among already-run steps, if any.
fn first_failure<const N: usize>(steps: [io::Result<()>; N]) -> io::Result<()> {
    steps.into_iter().collect()
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}

/// Insert `insert` at character position `at`.
fn insert_str(text: &str, at: usize, insert: &str) -> String {
    let idx = byte_index(text, at);
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..idx]);
    out.push_str(insert);
    out.push_str(&text[idx..]);
    out
}

/// Remove the character at position `at`.
fn remove_char(text: &str, at: usize) -> String {
    text.chars()
        .enumerate()
        .filter_map(|(i, c)| (i != at).then_some(c))
        .collect()
}

/// Display width of the first `chars` characters.
fn prefix_width(text: &str, chars: usize) -> usize {
    text[..byte_index(text, chars)].width()
}

/// The part of `suggestion` not yet typed, if `input` is a case-insensitive
/// prefix of it.
fn ghost_suffix<'a>(input: &str, suggestion: &'a str) -> Option<&'a str> {
    if input.is_empty() || input.len() >= suggestion.len() {
        return None;
    }
    let (head, tail) = suggestion.split_at_checked(input.len())?;
    head.eq_ignore_ascii_case(input).then_some(tail)
}
