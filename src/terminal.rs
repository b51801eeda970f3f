//! Terminal session setup and teardown.
//!
//! [`TerminalGuard`] remembers which setup steps succeeded and undoes
//! exactly those, in reverse order, when restored or dropped. A failed
//! setup step therefore still leaves the shell usable.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    RawMode,
    AlternateScreen,
    MouseCapture,
}

/// Switches single terminal modes on and off.
pub trait TerminalControl {
    fn enter(&mut self, step: Step) -> io::Result<()>;
    fn leave(&mut self, step: Step) -> io::Result<()>;
}

/// The real terminal on stdout.
pub struct Crossterm;

impl TerminalControl for Crossterm {
    fn enter(&mut self, step: Step) -> io::Result<()> {
        match step {
            Step::RawMode => terminal::enable_raw_mode(),
            Step::AlternateScreen => execute!(io::stdout(), EnterAlternateScreen),
            Step::MouseCapture => execute!(io::stdout(), EnableMouseCapture),
        }
    }

    fn leave(&mut self, step: Step) -> io::Result<()> {
        match step {
            Step::RawMode => terminal::disable_raw_mode(),
            Step::AlternateScreen => execute!(io::stdout(), LeaveAlternateScreen),
            Step::MouseCapture => execute!(io::stdout(), DisableMouseCapture),
        }
    }
}

pub struct TerminalGuard<C: TerminalControl> {
    control: C,
    entered: Vec<Step>,
}

impl<C: TerminalControl> TerminalGuard<C> {
    /// Enables raw mode, the alternate screen and, optionally, mouse
    /// capture. On error everything already enabled is undone.
    pub fn enter(control: C, mouse: bool) -> io::Result<Self> {
        let mut guard = Self {
            control,
            entered: Vec::new(),
        };
        guard.step(Step::RawMode)?;
        guard.step(Step::AlternateScreen)?;
        if mouse {
            guard.step(Step::MouseCapture)?;
        }
        Ok(guard)
    }

    fn step(&mut self, step: Step) -> io::Result<()> {
        self.control.enter(step)?;
        self.entered.push(step);
        Ok(())
    }

    /// Undoes every entered step. Keeps going past failures and reports
    /// the first one.
    pub fn restore(&mut self) -> io::Result<()> {
        let mut first_err = None;
        while let Some(step) = self.entered.pop() {
            if let Err(err) = self.control.leave(step) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl<C: TerminalControl> Drop for TerminalGuard<C> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Best-effort teardown for paths that cannot reach the guard.
pub fn teardown(mouse: bool) {
    let mut control = Crossterm;
    if mouse {
        let _ = control.leave(Step::MouseCapture);
    }
    let _ = control.leave(Step::AlternateScreen);
    let _ = control.leave(Step::RawMode);
}

/// Restores the terminal before the previous panic hook prints, so the
/// panic message lands on the normal screen.
pub fn install_panic_hook(mouse: bool) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        teardown(mouse);
        previous(info);
    }));
}
