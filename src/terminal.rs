use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::collections::VecDeque;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

/// Longest single sleep inside `nap`, so interrupts stay responsive
const NAP_SLICE: Duration = Duration::from_millis(50);

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
    input: InputQueue,
}

/// A single cell in the terminal buffer
#[derive(Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
        }
    }
}

/// Why a long-running screensaver step should stop early
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    Resized,
    Quit,
    /// Keys other than q/Esc are waiting in the queue
    Input,
}

/// Keys read while a step was running, kept until the controls handle them
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<KeyEvent>,
    quit: bool,
}

impl InputQueue {
    /// q/Esc latch the quit flag; every other key waits for `pop`
    pub fn push(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => self.pending.push_back(key),
        }
    }

    pub fn pop(&mut self) -> Option<KeyEvent> {
        self.pending.pop_front()
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Quit beats a resize, a resize beats queued keys
    pub fn interrupt(&self, resized: bool) -> Option<Interrupt> {
        if self.quit {
            Some(Interrupt::Quit)
        } else if resized {
            Some(Interrupt::Resized)
        } else if !self.pending.is_empty() {
            Some(Interrupt::Input)
        } else {
            None
        }
    }
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self {
            width,
            height,
            buffer: blank_buffer(width, height),
            alternate_screen,
            input: InputQueue::default(),
        })
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Adopt new dimensions, discarding the buffer contents
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = blank_buffer(width, height);
    }

    /// True when the real window no longer matches the buffer
    pub fn was_resized(&self) -> bool {
        size().map_or(false, |actual| actual != (self.width, self.height))
    }

    /// Set once q/Esc is seen by `poll_interrupt` or `request_quit` is called
    pub fn quit_requested(&self) -> bool {
        self.input.quit_requested()
    }

    pub fn request_quit(&mut self) {
        self.input.request_quit();
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            row.fill(Cell::default());
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), ResetColor, Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a cell at position; out-of-bounds writes are dropped
    pub fn put(&mut self, x: i32, y: i32, cell: Cell) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = cell;
        }
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        self.put(x, y, Cell { ch, fg, bg: None, bold });
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Render the entire buffer to screen
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if let Some(color) = cell.fg {
                    queue!(out, SetForegroundColor(color))?;
                }
                if let Some(color) = cell.bg {
                    queue!(out, SetBackgroundColor(color))?;
                }

                queue!(out, Print(cell.ch))?;

                if cell.fg.is_some() || cell.bg.is_some() {
                    queue!(out, ResetColor)?;
                }
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Check for keypress (non-blocking), returns (code, modifiers)
    pub fn check_key(&mut self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if let Some(key) = self.input.pop() {
            return Ok(Some((key.code, key.modifiers)));
        }
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some((key_event.code, key_event.modifiers)));
            }
        }
        Ok(None)
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        if poll(Duration::from_millis(timeout_ms))? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some(key_event.code));
            }
        }
        Ok(None)
    }

    /// Drain pending input without blocking and report whether the current
    /// step should stop. Keys other than q/Esc are kept for `check_key` and
    /// reported as [`Interrupt::Input`].
    pub fn poll_interrupt(&mut self) -> io::Result<Option<Interrupt>> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                self.input.push(key_event);
            }
        }
        Ok(self.input.interrupt(self.was_resized()))
    }

    /// Sleep for `duration`, waking early on an interrupt or a queued key
    pub fn nap(&mut self, duration: Duration) -> io::Result<Option<Interrupt>> {
        let deadline = Instant::now() + duration;
        loop {
            if let Some(interrupt) = self.poll_interrupt()? {
                return Ok(Some(interrupt));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            std::thread::sleep(NAP_SLICE.min(deadline - now));
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

fn blank_buffer(width: u16, height: u16) -> Vec<Vec<Cell>> {
    vec![vec![Cell::default(); width as usize]; height as usize]
}

/// Helper to create RGB colors
pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}
