use eframe::egui;
use tictactoe_engine::games::tictactoe::{Board, CELL_COUNT, Line, Mark};

const SIDE: usize = 3;

#[derive(Default)]
pub struct TicTacToeBoardUi {
    last_hover: Option<usize>,
}

impl TicTacToeBoardUi {
    const MIN_CELL_SIZE: f32 = 60.0;
    const MAX_CELL_SIZE: f32 = 140.0;
    const LINE_WIDTH: f32 = 2.0;

    pub fn new() -> Self {
        Self { last_hover: None }
    }

    fn cell_rect(board_rect: egui::Rect, index: usize, cell_size: f32) -> egui::Rect {
        let x = (index % SIDE) as f32;
        let y = (index / SIDE) as f32;
        egui::Rect::from_min_size(
            egui::pos2(board_rect.left() + x * cell_size, board_rect.top() + y * cell_size),
            egui::vec2(cell_size, cell_size),
        )
    }

    fn cell_at(board_rect: egui::Rect, pos: egui::Pos2, cell_size: f32) -> Option<usize> {
        if !board_rect.contains(pos) {
            return None;
        }
        let x = ((pos.x - board_rect.left()) / cell_size) as usize;
        let y = ((pos.y - board_rect.top()) / cell_size) as usize;
        (x < SIDE && y < SIDE).then_some(y * SIDE + x)
    }

    /// Paints the board and returns the empty cell that was clicked, if any.
    /// Clicks are ignored when `accepts_input` is false.
    pub fn render(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        winning_line: Option<Line>,
        accepts_input: bool,
    ) -> Option<usize> {
        let available = ui.available_width().min(ui.available_height());
        let cell_size = (available / SIDE as f32).clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE);
        let board_size = cell_size * SIDE as f32;

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(board_size, board_size), egui::Sense::click());
        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        if let Some(line) = winning_line {
            for index in line {
                painter.rect_filled(
                    Self::cell_rect(rect, index, cell_size),
                    0.0,
                    egui::Color32::from_rgb(190, 235, 190),
                );
            }
        }

        self.last_hover = if accepts_input {
            response
                .hover_pos()
                .and_then(|pos| Self::cell_at(rect, pos, cell_size))
                .filter(|&index| board.is_empty_at(index))
        } else {
            None
        };

        if let Some(index) = self.last_hover {
            painter.rect_filled(
                Self::cell_rect(rect, index, cell_size),
                0.0,
                egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
            );
        }

        for i in 0..=SIDE {
            let offset = i as f32 * cell_size;
            let stroke = egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK);
            painter.line_segment(
                [
                    egui::pos2(rect.left() + offset, rect.top()),
                    egui::pos2(rect.left() + offset, rect.bottom()),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    egui::pos2(rect.left(), rect.top() + offset),
                    egui::pos2(rect.right(), rect.top() + offset),
                ],
                stroke,
            );
        }

        for index in 0..CELL_COUNT {
            let cell_rect = Self::cell_rect(rect, index, cell_size);
            match board[index] {
                Mark::X => self.draw_x(painter, cell_rect),
                Mark::O => self.draw_o(painter, cell_rect),
                Mark::Empty => {}
            }
        }

        if let Some([start, _, end]) = winning_line {
            painter.line_segment(
                [
                    Self::cell_rect(rect, start, cell_size).center(),
                    Self::cell_rect(rect, end, cell_size).center(),
                ],
                egui::Stroke::new(6.0, egui::Color32::from_rgba_unmultiplied(50, 200, 50, 200)),
            );
        }

        if response.clicked() {
            self.last_hover
        } else {
            None
        }
    }

    fn draw_x(&self, painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(220, 50, 50));

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(&self, painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let radius = (rect.width() / 2.0) - padding;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(50, 50, 220));

        painter.circle_stroke(rect.center(), radius, stroke);
    }
}
