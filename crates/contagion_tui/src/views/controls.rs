use crate::renderer::rgb;
use contagion_core::palette;
use contagion_core::tuning::{Parameter, Step, Tunables};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

const BUTTON_WIDTH: u16 = 5;
const BUTTON_GAP: u16 = 1;

/// A clickable `-` or `+` button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlButton {
    pub rect: Rect,
    pub parameter: Parameter,
    pub step: Step,
}

/// Label, value and `[-]` `[+]` buttons for every live parameter.
pub struct ControlPanel<'a> {
    pub tunables: &'a Tunables,
    pub selected: Parameter,
    /// Mouse position used for hover highlighting.
    pub hover: Option<(u16, u16)>,
}

impl<'a> ControlPanel<'a> {
    fn columns(area: Rect) -> Vec<Rect> {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let n = Parameter::ALL.len() as u32;
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..n).map(|_| Constraint::Ratio(1, n)))
            .split(inner)
            .to_vec()
    }

    /// Hit boxes of every button, in parameter order with `-` before `+`.
    pub fn button_rects(area: Rect) -> Vec<ControlButton> {
        let mut buttons = Vec::with_capacity(Parameter::ALL.len() * 2);
        for (column, parameter) in Self::columns(area).into_iter().zip(Parameter::ALL) {
            if column.height == 0 {
                continue;
            }
            let y = column.y + column.height.min(3) - 1;
            for (i, step) in [Step::Decrease, Step::Increase].into_iter().enumerate() {
                let x = column.x + 1 + i as u16 * (BUTTON_WIDTH + BUTTON_GAP);
                let rect = Rect::new(x, y, BUTTON_WIDTH, 1).intersection(column);
                if rect.width > 0 {
                    buttons.push(ControlButton {
                        rect,
                        parameter,
                        step,
                    });
                }
            }
        }
        buttons
    }

    /// Button under the given cell. At most one button matches.
    pub fn hit_test(area: Rect, x: u16, y: u16) -> Option<ControlButton> {
        Self::button_rects(area)
            .into_iter()
            .find(|b| b.rect.contains((x, y).into()))
    }
}

impl<'a> Widget for ControlPanel<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let panel_style = Style::default()
            .bg(rgb(palette::UI_BACKGROUND))
            .fg(rgb(palette::UI_TEXT));
        Block::default()
            .borders(Borders::ALL)
            .title(" Controls ([Tab] select, [+]/[-] adjust) ")
            .style(panel_style)
            .render(area, buf);

        for (column, parameter) in Self::columns(area).into_iter().zip(Parameter::ALL) {
            if column.height == 0 {
                continue;
            }
            let mut label_style = panel_style;
            if parameter == self.selected {
                label_style = label_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            Paragraph::new(format!(" {}:", parameter.display_name()))
                .style(label_style)
                .render(Rect { height: 1, ..column }, buf);

            if column.height >= 3 {
                let value = parameter.format_value(self.tunables.get(parameter));
                Paragraph::new(format!(" {}", value))
                    .style(panel_style.add_modifier(Modifier::BOLD))
                    .render(Rect::new(column.x, column.y + 1, column.width, 1), buf);
            }
        }

        for button in Self::button_rects(area) {
            let hovered = self
                .hover
                .is_some_and(|(x, y)| button.rect.contains((x, y).into()));
            let selected = button.parameter == self.selected;
            let bg = if hovered {
                palette::BUTTON_HOVER
            } else if selected {
                palette::BUTTON_SELECTED
            } else {
                palette::BUTTON
            };
            let mut style = Style::default().bg(rgb(bg)).fg(rgb(palette::UI_TEXT));
            if selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            Paragraph::new(format!("[ {} ]", button.step.symbol()))
                .style(style)
                .render(button.rect, buf);
        }
    }
}
