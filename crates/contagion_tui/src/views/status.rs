use crate::renderer::rgb;
use contagion_core::palette;
use contagion_core::snapshot::WorldSnapshot;
use contagion_data::Status;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph, Widget};

pub struct StatusWidget<'a> {
    pub snapshot: &'a WorldSnapshot,
    pub fps: f64,
    pub time_scale: f64,
    pub paused: bool,
}

impl<'a> StatusWidget<'a> {
    fn count_span(status: Status, count: usize) -> Span<'static> {
        Span::styled(
            format!("{}: {}  ", status.label(), count),
            Style::default()
                .fg(rgb(palette::status_color(status)))
                .add_modifier(Modifier::BOLD),
        )
    }
}

impl<'a> Widget for StatusWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let stats = &self.snapshot.stats;
        Paragraph::new(Line::from(vec![
            Self::count_span(Status::Healthy, stats.healthy),
            Self::count_span(Status::Infected, stats.infected),
            Self::count_span(Status::Recovered, stats.recovered),
        ]))
        .render(lines[0], buf);

        let run_state = if self.paused { "PAUSED" } else { "RUNNING" };
        Paragraph::new(format!(
            "Tick: {} | FPS: {:.0} | Speed x{:.2} | {} | Total infections: {} | Peak: {} @ {}",
            self.snapshot.tick,
            self.fps,
            self.time_scale,
            run_state,
            stats.total_infections,
            stats.peak_infected,
            stats.peak_tick,
        ))
        .style(Style::default().fg(rgb(palette::UI_TEXT)))
        .render(lines[1], buf);

        let prevalence = stats.prevalence().clamp(0.0, 1.0);
        Gauge::default()
            .gauge_style(Style::default().fg(rgb(palette::INFECTED)))
            .ratio(prevalence)
            .label(format!("Prevalence: {:.1}%", prevalence * 100.0))
            .render(lines[2], buf);
    }
}
