use std::collections::VecDeque;
use std::io::{stdout, Stdout, Write};

use crossbeam_channel::{select, Receiver};
use crossterm::{cursor, queue, terminal, Result};

use super::elevator_status::ElevatorStatus;

const LOG_LINES: usize = 8;
/// Rows kept at the top of the screen for the panel. The console scrolls
/// below them.
pub const PANEL_ROWS: u16 = 32;

/// Terminal panel showing the latest log lines, the state machine and the
/// request queue. Redrawn in place on every message.
pub struct Debug {
    stdout: Stdout,
    log: VecDeque<String>,
    status: Option<ElevatorStatus>,
}

/// Clears the screen and parks the cursor under the panel area, so console
/// output starts below it.
pub fn reserve<W: Write>(out: &mut W) -> Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, PANEL_ROWS))?;
    out.flush()
}

impl Debug {
    pub fn new() -> Self {
        Debug {
            stdout: stdout(),
            log: VecDeque::with_capacity(LOG_LINES),
            status: None,
        }
    }

    pub fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    pub fn set_status(&mut self, status: ElevatorStatus) {
        self.status = Some(status);
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(String::from("+-------------------------------------------------+"));
        lines.push(String::from("| LOG                                             |"));
        lines.push(String::from("+-------------------------------------------------+"));
        for line in &self.log {
            lines.push(format!("  {}", line));
        }

        if let Some(status) = &self.status {
            lines.push(String::from("+-------------------------+"));
            lines.push(String::from("| STATE MACHINE           |"));
            lines.push(String::from("+------------+------------+"));
            lines.push(format!("| {0:<10} | {1:<10} |", "STATE", status.behaviour.as_string()));
            lines.push(String::from("+------------+------------+"));
            lines.push(format!("| {0:<10} | {1:<10} |", "FLOOR", status.floor));
            lines.push(String::from("+------------+------------+"));
            lines.push(format!("| {0:<10} | {1:<10} |", "DIRECTION", status.direction_str()));
            lines.push(String::from("+------------+------------+"));
            lines.extend(status.queue_lines());
        }

        // the last row separates the panel from the console
        lines.truncate(PANEL_ROWS as usize - 1);
        lines.resize(PANEL_ROWS as usize - 1, String::new());
        lines.push("=".repeat(51));
        lines
    }

    /// Draws the panel at the top of the screen and puts the cursor back
    /// where the console left it.
    pub fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        queue!(out, cursor::SavePosition)?;
        for (row, line) in self.lines().iter().enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16), terminal::Clear(terminal::ClearType::CurrentLine))?;
            write!(out, "{}", line)?;
        }
        queue!(out, cursor::RestorePosition)?;
        out.flush()
    }

    pub fn printstatus(&mut self) -> Result<()> {
        // holding the lock keeps console writes out of the middle of a redraw
        let mut out = self.stdout.lock();
        self.draw(&mut out)
    }
}

/// Feeds the panel from the cabin's log and status sinks until both close.
pub fn main(log_rx: Receiver<String>, status_rx: Receiver<ElevatorStatus>) -> Result<()> {
    let mut debug = Debug::new();
    let (mut log_open, mut status_open) = (true, true);

    while log_open || status_open {
        select! {
            recv(log_rx) -> msg => match msg {
                Ok(line) => debug.push_log(line),
                Err(_) => { log_open = false; continue },
            },
            recv(status_rx) -> msg => match msg {
                Ok(status) => debug.set_status(status),
                Err(_) => { status_open = false; continue },
            },
        }
        debug.printstatus()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use shared_resources::direction::Direction;
    use shared_resources::request::Request;

    use crate::utilities::elevator_status::Behaviour;

    use super::*;

    #[test]
    fn keeps_only_the_latest_log_lines() {
        let mut debug = Debug::new();
        for i in 0..(LOG_LINES + 3) {
            debug.push_log(format!("line {}", i));
        }
        let lines = debug.lines();
        assert!(!lines.contains(&String::from("  line 2")));
        assert!(lines.contains(&String::from("  line 3")));
        assert!(lines.contains(&format!("  line {}", LOG_LINES + 2)));
    }

    #[test]
    fn shows_state_and_queue() {
        let mut debug = Debug::new();
        debug.set_status(ElevatorStatus {
            active: Some(Request::outside(4, Direction::Down)),
            pending: Vec::new(),
            floor: 2,
            moving_up: true,
            behaviour: Behaviour::Moving,
        });
        let lines = debug.lines();
        assert!(lines.contains(&String::from("| STATE      | moving     |")));
        assert!(lines.contains(&String::from("| FLOOR      | 2          |")));
        assert!(lines.contains(&String::from("Current queue item: Request [Floor: 4, Direction: down]")));
    }

    #[test]
    fn panel_height_does_not_depend_on_content() {
        let mut debug = Debug::new();
        assert_eq!(debug.lines().len(), PANEL_ROWS as usize);

        for i in 0..LOG_LINES {
            debug.push_log(format!("line {}", i));
        }
        debug.set_status(ElevatorStatus {
            active: Some(Request::inside(9)),
            pending: (1..=40).map(Request::inside).collect(),
            floor: 1,
            moving_up: true,
            behaviour: Behaviour::Moving,
        });
        assert_eq!(debug.lines().len(), PANEL_ROWS as usize);
    }

    #[test]
    fn redraw_returns_the_cursor_to_the_console() {
        let mut debug = Debug::new();
        debug.push_log(String::from("Passing floor 3"));
        let mut out = Vec::new();
        debug.draw(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("\x1B7\x1B[1;1H"));
        assert!(out.ends_with("\x1B8"));
        assert!(out.contains("Passing floor 3"));
        // never clears below the cursor, where the menu and typed input live
        assert!(!out.contains("\x1B[J"));
    }

    #[test]
    fn reserve_parks_the_cursor_below_the_panel() {
        let mut out = Vec::new();
        reserve(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with(&format!("\x1B[{};1H", PANEL_ROWS + 1)));
    }
}
