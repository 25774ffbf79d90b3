use std::io::Write;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

use crate::error::Result;

/// Multi-select menu state. Entry 0 is "All"; entries 1..=n map to the
/// items. Pure so the key handling is testable without a terminal.
pub struct Selector {
    labels: Vec<String>,
    selected: Vec<bool>,
    cursor: usize,
}

pub enum SelectAction {
    Continue,
    Confirm,
}

impl Selector {
    pub fn new(labels: Vec<String>) -> Self {
        let selected = vec![false; labels.len() + 1];
        Self {
            labels,
            selected,
            cursor: 0,
        }
    }

    fn menu_lines(&self) -> usize {
        self.labels.len() + 1
    }

    pub fn handle_key(&mut self, code: KeyCode) -> SelectAction {
        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(self.menu_lines() - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.cursor == 0 {
                    // Toggling All drags every entry with it.
                    let state = !self.selected[0];
                    self.selected.fill(state);
                } else {
                    self.selected[self.cursor] = !self.selected[self.cursor];
                    self.selected[0] = self.selected[1..].iter().all(|s| *s);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return SelectAction::Confirm,
            _ => {}
        }
        SelectAction::Continue
    }

    /// Chosen item indices. Confirming with nothing (or All) selected
    /// means every item.
    pub fn indices(&self) -> Vec<usize> {
        let picked: Vec<usize> = (1..self.menu_lines())
            .filter(|i| self.selected[*i])
            .map(|i| i - 1)
            .collect();
        if picked.is_empty() || self.selected[0] {
            (0..self.labels.len()).collect()
        } else {
            picked
        }
    }

    fn render_lines(&self, width: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.menu_lines() + 2);
        for i in 0..self.menu_lines() {
            let arrow = if i == self.cursor { '>' } else { ' ' };
            let check = if self.selected[i] { 'x' } else { ' ' };
            let line = if i == 0 {
                format!("  {arrow} [{check}]  0. All")
            } else {
                format!("  {arrow} [{check}] {i:>2}. {}", self.labels[i - 1])
            };
            // Truncate to the terminal width to prevent wrapping, which
            // would break the in-place redraw.
            lines.push(line.chars().take(width).collect());
        }
        lines.push(String::new());
        lines.push("  j/\u{2193} down  k/\u{2191} up  enter toggle  q confirm".to_string());
        lines
    }
}

/// Run the interactive menu and return the chosen item indices.
pub fn run(labels: Vec<String>) -> Result<Vec<usize>> {
    let mut selector = Selector::new(labels);
    let width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
    let mut stdout = std::io::stdout();

    for line in selector.render_lines(width) {
        writeln!(stdout, "{line}")?;
    }
    stdout.flush()?;

    terminal::enable_raw_mode()?;
    let result: Result<()> = loop {
        let key = match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            break Ok(());
        }
        if let SelectAction::Confirm = selector.handle_key(key.code) {
            break Ok(());
        }

        if let Err(e) = redraw(&mut stdout, &selector.render_lines(width)) {
            break Err(e);
        }
    };
    terminal::disable_raw_mode()?;
    result?;
    Ok(selector.indices())
}

/// Move back to the top of the menu and rewrite every line. Runs in raw
/// mode, so lines end with an explicit carriage return.
fn redraw(stdout: &mut std::io::Stdout, lines: &[String]) -> Result<()> {
    execute!(stdout, cursor::MoveUp(lines.len() as u16))?;
    for line in lines {
        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::CurrentLine),
            cursor::MoveToColumn(0)
        )?;
        write!(stdout, "{line}\r\n")?;
    }
    stdout.flush()?;
    Ok(())
}
