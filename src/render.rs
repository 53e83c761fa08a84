//! Output boundary: per-tile snapshots and the `Renderer` capability.
//!
//! The board never draws to a global surface. A host hands a `Renderer` to
//! `Board::draw` on each frame and receives one `TileView` per tile plus the
//! score. `TextRenderer` is the terminal implementation used by the
//! interactive host and by `Display for Board`.
use crate::engine::{FaceValue, Rect, Tile, TileState};

/// What a renderer should show for a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual {
    /// The shared face-down placeholder.
    FaceDown,
    /// The image for this face.
    FaceUp(FaceValue),
}

/// Snapshot of one tile, sufficient to draw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileView {
    pub row: usize,
    pub col: usize,
    pub region: Rect,
    pub state: TileState,
    pub visual: Visual,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        let (row, col) = tile.position();
        let visual = match tile.state() {
            TileState::Hidden => Visual::FaceDown,
            TileState::Selected | TileState::Matched => Visual::FaceUp(tile.face()),
        };
        TileView {
            row,
            col,
            region: tile.region(),
            state: tile.state(),
            visual,
        }
    }
}

/// A drawing target for the board.
pub trait Renderer {
    fn draw_tile(&mut self, view: &TileView);

    fn draw_score(&mut self, score: u64);

    /// Called after the score once every tile is matched.
    fn draw_game_over(&mut self, _score: u64) {}
}

/// Renders the board as text for a terminal, using ANSI background colours.
///
/// Hidden tiles are blue blanks, selected tiles show their label on yellow and
/// matched tiles show their label on green.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    size: usize,
    cells: Vec<Option<TileView>>,
    score: u64,
    game_over: bool,
}

impl TextRenderer {
    pub fn new(size: usize) -> Self {
        TextRenderer {
            size,
            cells: vec![None; size * size],
            score: 0,
            game_over: false,
        }
    }

    /// Consumes the renderer and returns the frame as a string.
    ///
    /// The first line holds column numbers, each following grid line starts with
    /// its row number. The score line comes last, followed by a game-over line
    /// when the board is finished.
    pub fn finish(self) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..self.size {
            output.push_str(&format!("{:>2}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..self.size {
            output.push_str(&format!("{:<2}", r_idx));
            for c_idx in 0..self.size {
                let cell = match self.cells[r_idx * self.size + c_idx] {
                    Some(view) => {
                        let content = match view.visual {
                            Visual::FaceDown => ' ',
                            Visual::FaceUp(face) => face.label(),
                        };
                        format!(
                            "\x1b[1;{}m {}\x1b[m",
                            view.state.ansi_color_code(),
                            content
                        )
                    }
                    None => "  ".to_string(),
                };
                output.push_str(&cell);
            }
            output.push('\n');
        }

        output.push_str(&format!("Time: {}", self.score));
        if self.game_over {
            output.push_str(&format!("\nAll pairs found! Final time: {}", self.score));
        }
        output
    }
}

impl Renderer for TextRenderer {
    fn draw_tile(&mut self, view: &TileView) {
        if view.row < self.size && view.col < self.size {
            self.cells[view.row * self.size + view.col] = Some(*view);
        }
    }

    fn draw_score(&mut self, score: u64) {
        self.score = score;
    }

    fn draw_game_over(&mut self, score: u64) {
        self.score = score;
        self.game_over = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Board, Point};
    use crate::utils::board_from_str_array;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingRenderer {
        views: Vec<TileView>,
        score: Option<u64>,
        game_over: bool,
    }

    impl Renderer for RecordingRenderer {
        fn draw_tile(&mut self, view: &TileView) {
            self.views.push(*view);
        }

        fn draw_score(&mut self, score: u64) {
            self.score = Some(score);
        }

        fn draw_game_over(&mut self, _score: u64) {
            self.game_over = true;
        }
    }

    #[test]
    fn test_tile_view_visuals() {
        let mut board = board_from_str_array(&["AB", "BA"], 50).unwrap();
        assert!(board.handle_click(Point::new(10, 10)));

        let views: Vec<TileView> = board.tile_views().collect();
        assert_eq!(views.len(), 4);
        assert_eq!(views[0].visual, Visual::FaceUp(FaceValue(0)));
        assert_eq!(views[0].state, TileState::Selected);
        assert_eq!(views[1].visual, Visual::FaceDown);
        assert_eq!((views[3].row, views[3].col), (1, 1));
        assert_eq!(views[3].region, Rect::new(50, 50, 50, 50));
    }

    #[test]
    fn test_draw_reports_every_tile_and_score() {
        let mut board = board_from_str_array(&["AB", "BA"], 50).unwrap();
        board.tick(board.started_at() + Duration::from_secs(2));

        let mut renderer = RecordingRenderer::default();
        board.draw(&mut renderer);
        assert_eq!(renderer.views.len(), 4);
        assert_eq!(renderer.score, Some(2));
        assert!(!renderer.game_over);
    }

    #[test]
    fn test_draw_game_over_banner() {
        let mut board = board_from_str_array(&["AB", "AB"], 50).unwrap();
        assert!(board.handle_click(board.tile_center(0, 0)));
        assert!(board.handle_click(board.tile_center(1, 0)));
        board.tick(board.started_at());
        assert!(board.handle_click(board.tile_center(0, 1)));
        assert!(board.handle_click(board.tile_center(1, 1)));
        board.tick(board.started_at());
        assert!(board.is_game_over());

        let mut renderer = RecordingRenderer::default();
        board.draw(&mut renderer);
        assert!(renderer.game_over);
        assert!(renderer
            .views
            .iter()
            .all(|v| v.state == TileState::Matched && v.visual != Visual::FaceDown));

        let text = board.to_string();
        assert!(text.ends_with("All pairs found! Final time: 0"));
    }

    #[test]
    fn test_text_renderer_ignores_out_of_range_views() {
        let mut renderer = TextRenderer::new(1);
        renderer.draw_tile(&TileView {
            row: 3,
            col: 0,
            region: Rect::new(0, 0, 1, 1),
            state: TileState::Hidden,
            visual: Visual::FaceDown,
        });
        let text = renderer.finish();
        assert_eq!(text, "   0\n0   \nTime: 0");
    }
}
