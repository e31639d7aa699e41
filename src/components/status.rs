//! Status line - request state, spinner, transient message, command mirror

use ratatui::{prelude::*, widgets::*};

use crate::components::Component;
use crate::constants::{SPINNER_FRAMES, SPINNER_INTERVAL, STATUS_BAR_HEIGHT};
use crate::messages::{Cmd, Msg};
use crate::models::{Mode, Status};
use crate::ui;

/// Frame counter for the processing animation.
///
/// Every tick chain carries a generation tag; only ticks from the current
/// chain advance the frame or get rescheduled.
#[derive(Debug, Default)]
struct Spinner {
    frame: usize,
    spinning: bool,
    generation: u64,
}

impl Spinner {
    fn start(&mut self) -> Cmd {
        self.spinning = true;
        self.generation += 1;
        self.frame = 0;
        self.tick()
    }

    fn tick(&self) -> Cmd {
        Cmd::Tick {
            after: SPINNER_INTERVAL,
            msg: Msg::SpinnerTick(self.generation),
        }
    }

    fn advance(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    fn view(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }
}

#[derive(Debug, Default)]
pub struct StatusBar {
    spinner: Spinner,
    width: u16,
    status: Status,
    message: String,
    mode: Mode,
    command_entry: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn command_entry(&self) -> &str {
        &self.command_entry
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.spinning
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        STATUS_BAR_HEIGHT
    }

    fn status_span(&self) -> Span<'static> {
        match self.status {
            Status::Processing => Span::styled(
                format!("{} Processing", self.spinner.view()),
                Style::default().fg(Color::Yellow),
            ),
            status => Span::styled(
                status.label(),
                Style::default().fg(ui::status_color(&status)).bold(),
            ),
        }
    }
}

impl Component for StatusBar {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::CommandInput(entry) => {
                self.command_entry = entry.clone();
                return Cmd::None;
            }
            // Falls through so a PROCESSING value starts the spinner
            Msg::Status(status) => self.status = *status,
            Msg::Resize { width, .. } => {
                self.width = *width;
                return Cmd::None;
            }
            Msg::ShortMessage(message) => {
                self.message = message.clone();
                return Cmd::None;
            }
            Msg::Mode(mode) => {
                self.mode = *mode;
                return Cmd::None;
            }
            Msg::Key(_)
            | Msg::SubmitRequest
            | Msg::FreeText(_)
            | Msg::SelectTab(_)
            | Msg::Response(_)
            | Msg::RequestFailed { .. }
            | Msg::SpinnerTick(_)
            | Msg::HeaderItem(_)
            | Msg::RequestHeaders(_) => {}
        }

        if self.status != Status::Processing {
            self.spinner.spinning = false;
            return Cmd::None;
        }

        if !self.spinner.spinning {
            return self.spinner.start();
        }

        match msg {
            Msg::SpinnerTick(generation) if *generation == self.spinner.generation => {
                self.spinner.advance();
                self.spinner.tick()
            }
            _ => Cmd::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _focused: bool) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let left = Line::from(vec![
            Span::raw(" "),
            self.status_span(),
            Span::raw(" "),
            Span::styled(self.message.clone(), ui::muted()),
        ]);

        let right = Line::from(vec![
            Span::raw(self.command_entry.clone()),
            Span::raw(" :"),
            Span::styled(self.mode.label(), ui::muted()),
            Span::raw(" "),
        ])
        .right_aligned();

        let bar = Style::default().bg(Color::Black);
        frame.render_widget(Paragraph::new(left).style(bar), halves[0]);
        frame.render_widget(Paragraph::new(right).style(bar), halves[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn tick_generation(cmd: &Cmd) -> Option<u64> {
        match cmd {
            Cmd::Tick {
                msg: Msg::SpinnerTick(generation),
                ..
            } => Some(*generation),
            _ => None,
        }
    }

    #[test]
    fn test_processing_starts_spinner() {
        let mut status = StatusBar::new();
        let cmd = status.update(&Msg::Status(Status::Processing));
        assert!(tick_generation(&cmd).is_some());
        assert!(status.is_spinning());

        // A second PROCESSING value must not start another chain
        assert_eq!(status.update(&Msg::Status(Status::Processing)), Cmd::None);
    }

    #[test]
    fn test_tick_rescheduled_while_processing() {
        let mut status = StatusBar::new();
        let generation = tick_generation(&status.update(&Msg::Status(Status::Processing))).unwrap();

        for _ in 0..5 {
            let cmd = status.update(&Msg::SpinnerTick(generation));
            assert_eq!(tick_generation(&cmd), Some(generation));
        }
    }

    #[test]
    fn test_no_tick_after_leaving_processing() {
        let mut status = StatusBar::new();
        let generation = tick_generation(&status.update(&Msg::Status(Status::Processing))).unwrap();

        assert_eq!(status.update(&Msg::Status(Status::Idle)), Cmd::None);
        assert!(!status.is_spinning());
        assert_eq!(status.update(&Msg::SpinnerTick(generation)), Cmd::None);
    }

    #[test]
    fn test_stale_tick_does_not_fork_chain() {
        let mut status = StatusBar::new();
        let first = tick_generation(&status.update(&Msg::Status(Status::Processing))).unwrap();
        status.update(&Msg::Status(Status::Error));
        let second = tick_generation(&status.update(&Msg::Status(Status::Processing))).unwrap();
        assert_ne!(first, second);

        // The first chain's pending tick lands during the second period
        assert_eq!(status.update(&Msg::SpinnerTick(first)), Cmd::None);
        assert_eq!(tick_generation(&status.update(&Msg::SpinnerTick(second))), Some(second));
    }

    #[test]
    fn test_annotations_are_stored() {
        let mut status = StatusBar::new();
        status.update(&Msg::ShortMessage(String::from("200 OK · 3 ms")));
        status.update(&Msg::Mode(Mode::Command));
        status.update(&Msg::CommandInput(String::from("> :e")));
        status.update(&Msg::Resize {
            width: 120,
            height: 40,
        });

        assert_eq!(status.message(), "200 OK · 3 ms");
        assert_eq!(status.mode(), Mode::Command);
        assert_eq!(status.command_entry(), "> :e");
        assert_eq!(status.width(), 120);
    }

    #[test]
    fn test_render_halves() {
        let mut status = StatusBar::new();
        status.update(&Msg::Status(Status::Code(404)));
        status.update(&Msg::CommandInput(String::from("> :w")));

        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| status.render(f, f.area(), false))
            .unwrap();

        let row: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(row.starts_with(" 404"));
        assert!(row.trim_end().ends_with("> :w :NORMAL"));
    }
}
