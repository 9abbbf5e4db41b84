use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

const HELP_LINES: &[&str] = &[
    " [Space]      Pause / resume",
    " [Tab] [<][>] Select parameter",
    " [+] [-]      Adjust selected parameter",
    " [I]          Infect a random person",
    " [R]          Restart with current parameters",
    " [T] [G] [F]  Toggle trails / glow / flashes",
    " [[] []]      Slower / faster",
    " Click        Press a button or infect a person",
    " [H]          Close help   [Q] Quit",
];

pub struct HelpOverlay;

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let width = 50.min(area.width.saturating_sub(4));
        let height = (HELP_LINES.len() as u16 + 4).min(area.height.saturating_sub(2));
        let overlay = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        Clear.render(overlay, buf);
        let mut text = vec![
            Line::styled(
                " Contagion Controls ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
        ];
        text.extend(HELP_LINES.iter().map(|l| Line::from(*l)));

        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .render(overlay, buf);
    }
}
