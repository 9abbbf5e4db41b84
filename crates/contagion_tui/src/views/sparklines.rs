use crate::renderer::rgb;
use contagion_core::palette;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Sparkline, Widget};

/// Infected and immune counts over recent ticks.
pub struct SparklinesWidget<'a> {
    pub infected_data: &'a [u64],
    pub immune_data: &'a [u64],
}

impl<'a> Widget for SparklinesWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let spark_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Sparkline::default()
            .block(Block::default().title(" Infected "))
            .data(self.infected_data)
            .style(Style::default().fg(rgb(palette::INFECTED)))
            .render(spark_layout[0], buf);

        Sparkline::default()
            .block(Block::default().title(" Immune "))
            .data(self.immune_data)
            .style(Style::default().fg(rgb(palette::RECOVERED)))
            .render(spark_layout[1], buf);
    }
}
