use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Most recent outbreak messages, newest on top.
pub struct ChronicleWidget<'a> {
    pub events: &'a [(String, Color)],
}

impl<'a> Widget for ChronicleWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let visible = area.height.saturating_sub(2) as usize;
        let events: Vec<Line> = self
            .events
            .iter()
            .rev()
            .take(visible)
            .map(|(msg, color)| Line::from(Span::styled(msg.as_str(), Style::default().fg(*color))))
            .collect();
        Paragraph::new(events)
            .block(Block::default().borders(Borders::ALL).title(" Outbreak Log "))
            .render(area, buf);
    }
}
