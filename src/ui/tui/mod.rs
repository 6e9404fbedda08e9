//! Terminal front-end
//!
//! One terminal cell is one layout unit. Mouse movement and clicks go
//! straight to the table as pointer input; `r` or space rolls, `q` quits.

mod render;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::TableConfig;
use crate::error::Result;
use crate::gaming::RandomDice;
use crate::table::Table;
use crate::ui::component::Pos;
use crate::ui::events::PointerKind;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the table until the player quits.
pub fn run(config: &TableConfig) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size()?;
    let mut config = config.clone();
    // last row is the status line
    config.width = config.width.max(cols as i32);
    config.height = config.height.max(rows as i32 - 1);

    let dice = RandomDice::from_seed(config.dice_seed);
    let mut table = Table::new(&config, Box::new(dice))?;
    info!(width = config.width, height = config.height, "table opened");

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut table, config.frame_interval);
    restore_terminal(&mut terminal)?;

    let bank = table.bank();
    info!(bank = bank.bank, on_table = bank.on_table, "table closed");
    result
}

fn run_loop(terminal: &mut Tui, table: &mut Table, frame_interval: Duration) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| render::draw(frame, table))?;

        if event::poll(frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') | KeyCode::Char(' ') => table.request_roll(),
                    KeyCode::Char('c') => table.request_clear(),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    let pos = Pos::new(mouse.column as i32, mouse.row as i32);
                    match mouse.kind {
                        MouseEventKind::Moved => table.pointer(PointerKind::Motion, pos),
                        MouseEventKind::Down(MouseButton::Left) => table.pointer(PointerKind::Down, pos),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();
        table.tick(now - last_frame)?;
        last_frame = now;
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
