use crate::app::state::App;
use crate::ui::tui::{
    ChronicleWidget, ControlPanel, HelpOverlay, SparklinesWidget, StatusWidget, WorldWidget,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

impl App {
    pub fn draw(&mut self, f: &mut Frame) {
        let snapshot = match &self.latest_snapshot {
            Some(s) => s,
            None => return,
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status
                Constraint::Length(3), // Sparklines
                Constraint::Min(0),    // World + log
                Constraint::Length(5), // Controls
            ])
            .split(f.area());

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(44)])
            .split(rows[2]);

        self.last_world_rect = middle[0];
        self.last_controls_rect = rows[3];

        f.render_widget(
            StatusWidget {
                snapshot,
                fps: self.fps,
                time_scale: self.time_scale,
                paused: self.paused,
            },
            rows[0],
        );

        let infected: Vec<u64> = self.infected_history.iter().copied().collect();
        let immune: Vec<u64> = self.immune_history.iter().copied().collect();
        f.render_widget(
            SparklinesWidget {
                infected_data: &infected,
                immune_data: &immune,
            },
            rows[1],
        );

        f.render_widget(WorldWidget::new(snapshot, self.paused), middle[0]);
        let events: Vec<_> = self.event_log.iter().cloned().collect();
        f.render_widget(ChronicleWidget { events: &events }, middle[1]);

        f.render_widget(
            ControlPanel {
                tunables: &snapshot.tunables,
                selected: self.selected_parameter,
                hover: self.mouse_pos,
            },
            rows[3],
        );

        if self.show_help {
            f.render_widget(HelpOverlay, f.area());
        }
    }
}
