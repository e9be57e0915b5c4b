use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, stdout, Write};

/// Framed, padded rows of the help box
fn help_box(help_text: &str) -> Vec<String> {
    let lines: Vec<&str> = help_text.lines().collect();
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;

    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(format!("┌{}┐", "─".repeat(inner)));
    for line in &lines {
        let padding = inner - 1 - line.chars().count();
        rows.push(format!("│ {}{}│", line, " ".repeat(padding)));
    }
    rows.push(format!("└{}┘", "─".repeat(inner)));
    rows
}

/// Show the help box over the current frame until `?` closes it.
/// Returns true if the user asked to quit while it was open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    let (width, height) = term.size();
    draw_help_box(width, height, &help_box(help_text))?;

    loop {
        match term.wait_key(50)? {
            Some(KeyCode::Char('?')) => break,
            Some(KeyCode::Char('q') | KeyCode::Esc) => return Ok(true),
            _ if term.was_resized() => return Ok(false),
            _ => {}
        }
    }

    // The box never touched the back buffer, so presenting it restores the frame
    term.present()?;
    Ok(false)
}

fn draw_help_box(width: u16, height: u16, rows: &[String]) -> io::Result<()> {
    let box_width = rows.first().map_or(0, |r| r.chars().count());
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(rows.len()) / 2;

    let mut out = stdout();
    queue!(out, SetForegroundColor(Color::White))?;
    for (i, row) in rows.iter().enumerate() {
        queue!(out, MoveTo(start_x as u16, (start_y + i) as u16), Print(row))?;
    }
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()
}
