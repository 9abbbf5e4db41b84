use crate::app::state::App;
use crate::model::tuning::Step;
use crate::ui::tui::{ControlPanel, WorldWidget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::style::Color;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                if self.show_help && key.code == KeyCode::Esc {
                    self.show_help = false;
                } else {
                    self.running = false;
                }
            }
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                self.show_help = !self.show_help
            }
            KeyCode::Tab | KeyCode::Right => {
                self.selected_parameter = self.selected_parameter.next()
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.selected_parameter = self.selected_parameter.previous()
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.adjust_parameter(self.selected_parameter, Step::Increase)
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
                self.adjust_parameter(self.selected_parameter, Step::Decrease)
            }
            KeyCode::Char('i') | KeyCode::Char('I') => self.infect_random(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if let Err(e) = self.restart() {
                    self.push_event(format!("Restart failed: {e}"), Color::Red);
                }
            }
            KeyCode::Char('t') | KeyCode::Char('T') => self.toggle_visual(|v| {
                v.trails_enabled = !v.trails_enabled;
                ("Trails", v.trails_enabled)
            }),
            KeyCode::Char('g') | KeyCode::Char('G') => self.toggle_visual(|v| {
                v.glow_enabled = !v.glow_enabled;
                ("Glow", v.glow_enabled)
            }),
            KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_visual(|v| {
                v.flash_enabled = !v.flash_enabled;
                ("Flashes", v.flash_enabled)
            }),
            KeyCode::Char('[') => self.scale_time(false),
            KeyCode::Char(']') => self.scale_time(true),
            _ => {}
        }
    }

    /// Left click presses at most one control button; otherwise a click
    /// inside the world infects the nearest healthy person.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.mouse_pos = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.mouse_pos = Some((mouse.column, mouse.row));
                if let Some(button) =
                    ControlPanel::hit_test(self.last_controls_rect, mouse.column, mouse.row)
                {
                    self.adjust_parameter(button.parameter, button.step);
                } else if let Some((wx, wy)) = WorldWidget::screen_to_world(
                    mouse.column,
                    mouse.row,
                    self.last_world_rect,
                    self.world.width,
                    self.world.height,
                ) {
                    self.infect_near(wx, wy);
                }
            }
            _ => {}
        }
    }
}
