use super::runner::RunnerEvent;
use crate::scheduler::Schedule;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Stdout, Write},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);

const PROCESS_COLORS: [Color; 6] = [
    Color::LightBlue,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightCyan,
    Color::LightRed,
];

fn process_color(pid: u32) -> Color {
    PROCESS_COLORS[pid as usize % PROCESS_COLORS.len()]
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        // Nothing owns the screen until Self exists, so undo by hand on failure
        enter_screen(&mut io::stdout())?;
        if let Err(err) = terminal::enable_raw_mode() {
            leave_screen(&mut io::stdout());
            return Err(err);
        }

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).expect("Failed to poll events.") {
                    if let Event::Key(key) = event::read().expect("Failed to read events.") {
                        // The viewer is gone
                        if input_tx.send(DisplayEvent::Input(key)).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(&mut self, schedule: &Schedule, position: usize, total: usize) -> io::Result<()> {
        let metrics = *schedule.metrics();
        let title = format!("{} [{}/{}]", schedule.policy(), position + 1, total);

        let gantt: Vec<Span> = schedule
            .timeline()
            .slices()
            .iter()
            .map(|slice| match slice.pid {
                Some(pid) => Span::styled(
                    format!(" P{pid} {}-{} ", slice.start, slice.end),
                    Style::default().fg(Color::Black).bg(process_color(pid)),
                ),
                None => Span::styled(
                    format!(" idle {}-{} ", slice.start, slice.end),
                    Style::default().fg(Color::DarkGray),
                ),
            })
            .collect();

        let rows: Vec<Row> = schedule
            .processes()
            .iter()
            .map(|process| {
                Row::new(vec![
                    Cell::from(format!("P{}", process.pid())).style(
                        Style::default()
                            .add_modifier(Modifier::BOLD)
                            .fg(process_color(process.pid())),
                    ),
                    Cell::from(process.arrival_time().to_string()),
                    Cell::from(process.burst_time().to_string()),
                    Cell::from(process.priority().to_string()),
                    Cell::from(process.completion_time().unwrap_or(0).to_string()),
                    Cell::from(process.waiting_time().to_string()),
                    Cell::from(process.turnaround_time().to_string()),
                ])
            })
            .collect();

        let summary = vec![
            Spans::from(format!(
                "Average waiting time: {:.2}    Average turnaround time: {:.2}    Max waiting time: {}",
                metrics.average_waiting_time,
                metrics.average_turnaround_time,
                metrics.max_waiting_time
            )),
            Spans::from(format!(
                "Makespan: {}    CPU utilization: {:.2}%    Throughput: {:.4}/unit",
                metrics.makespan,
                metrics.cpu_utilization * 100.0,
                metrics.throughput
            )),
            Spans::from(Span::styled(
                "n/→ next policy   p/← previous policy   q quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Min(5),
                    Constraint::Length(5),
                ])
                .split(f.size());

            let chart = Paragraph::new(Spans::from(gantt))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_type(BorderType::Rounded),
                );
            f.render_widget(chart, chunks[0]);

            let table = Table::new(rows)
                .header(
                    Row::new(vec![
                        "PID",
                        "Arrival",
                        "Burst",
                        "Priority",
                        "Completion",
                        "Waiting",
                        "Turnaround",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(5),
                    Constraint::Length(8),
                    Constraint::Length(6),
                    Constraint::Length(9),
                    Constraint::Length(11),
                    Constraint::Length(8),
                    Constraint::Length(11),
                ])
                .block(Block::default().title("Processes").borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);
            f.render_widget(table, chunks[1]);

            let summary = Paragraph::new(summary)
                .block(Block::default().title("Summary").borders(Borders::ALL));
            f.render_widget(summary, chunks[2]);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // Get the user's input and return a matching event
        match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) if key.modifiers.is_empty() => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => RunnerEvent::Quit,
                KeyCode::Char('n') | KeyCode::Right => RunnerEvent::Next,
                KeyCode::Char('p') | KeyCode::Left => RunnerEvent::Previous,
                _ => RunnerEvent::None,
            },
            Ok(_) => RunnerEvent::None,
            // The input thread died, nothing more will arrive
            Err(_) => RunnerEvent::Quit,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        leave_screen(self.terminal.backend_mut());
    }
}

/// Switches to the alternate screen. Switches back if that fails halfway.
fn enter_screen(out: &mut impl Write) -> io::Result<()> {
    if let Err(err) = execute!(out, EnterAlternateScreen, cursor::Hide) {
        leave_screen(out);
        return Err(err);
    }
    Ok(())
}

fn leave_screen(out: &mut impl Write) {
    let _ = execute!(out, LeaveAlternateScreen, cursor::Show);
}
