//! Core rule engine for the Memory tile game.
//!
//! This module defines the game's fundamental components:
//! - `Tile`: A single grid cell hiding one `FaceValue`, with its exposure state.
//! - `Board`: The square grid of tiles, the pending selection of at most two
//!   face-up tiles, match resolution, the elapsed-time score and the
//!   game-over check.
//!
//! The engine never blocks and never reads a clock on its own. Hosts forward
//! clicks through `Board::handle_click` and drive time through `Board::tick`,
//! passing the current `Instant` each frame.
use crate::error::BoardError;
use crate::render::{Renderer, TileView};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::{Duration, Instant};

/// Side length of the board used when the host does not ask for another one.
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Largest supported side length. A 10x10 board needs 50 distinct faces,
/// which still fits in the 52 printable face labels.
pub const MAX_BOARD_SIZE: usize = 10;

/// How long a mismatched pair stays face-up before flipping back.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(500);

/// Longest accepted mismatch delay; longer requests are clamped to it.
pub const MAX_MISMATCH_DELAY: Duration = Duration::from_secs(60 * 60);

/// Identifies the image a tile hides. Exactly two tiles on a board share each value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceValue(pub u8);

impl FaceValue {
    /// Number of faces that have a printable label.
    pub const LABEL_COUNT: usize = 52;

    /// Returns the printable label of this face: `A`-`Z`, then `a`-`z`.
    ///
    /// Faces beyond the labelled range are shown as `?`.
    ///
    /// # Examples
    /// ```
    /// use memory_tiles::engine::FaceValue;
    /// assert_eq!(FaceValue(0).label(), 'A');
    /// assert_eq!(FaceValue(26).label(), 'a');
    /// ```
    pub fn label(self) -> char {
        match self.0 {
            n @ 0..=25 => (b'A' + n) as char,
            n @ 26..=51 => (b'a' + n - 26) as char,
            _ => '?',
        }
    }

    /// Parses a face label back into a `FaceValue`. Inverse of [`FaceValue::label`].
    pub fn from_label(ch: char) -> Option<FaceValue> {
        match ch {
            'A'..='Z' => Some(FaceValue(ch as u8 - b'A')),
            'a'..='z' => Some(FaceValue(ch as u8 - b'a' + 26)),
            _ => None,
        }
    }
}

/// A pointer position in surface space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle in surface space.
///
/// The left and top edges are inside the rectangle, the right and bottom edges
/// are not, so adjacent tiles never both contain the same point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        px >= left
            && px < left + i64::from(self.width)
            && py >= top
            && py < top + i64::from(self.height)
    }

    pub fn center(&self) -> Point {
        let half = |extent: u32| i32::try_from(extent / 2).unwrap_or(i32::MAX);
        Point {
            x: self.x.saturating_add(half(self.width)),
            y: self.y.saturating_add(half(self.height)),
        }
    }
}

/// Exposure state of a tile.
///
/// `Hidden -> Selected -> Matched` for a found pair, `Hidden -> Selected -> Hidden`
/// for a miss. `Matched` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileState {
    /// Face-down and clickable.
    Hidden,
    /// Face-up and waiting in the pending selection.
    Selected,
    /// Face-up for the rest of the game.
    Matched,
}

impl TileState {
    /// Returns the ANSI background colour code used for this state in terminal output.
    pub fn ansi_color_code(self) -> &'static str {
        match self {
            TileState::Hidden => "44",
            TileState::Selected => "43",
            TileState::Matched => "42",
        }
    }
}

/// A single cell of the board.
///
/// A tile knows its grid position, the region it covers on the surface and the
/// face it hides. The only thing that changes over a game is its `TileState`.
#[derive(Clone, Copy, Debug)]
pub struct Tile {
    row: usize,
    col: usize,
    region: Rect,
    face: FaceValue,
    state: TileState,
}

impl Tile {
    /// Creates a face-down tile.
    pub fn new(row: usize, col: usize, region: Rect, face: FaceValue) -> Self {
        Tile {
            row,
            col,
            region,
            face,
            state: TileState::Hidden,
        }
    }

    /// Flips the tile face-up if `point` lies inside it and it is still hidden.
    ///
    /// # Returns
    /// `true` if the tile moved from `Hidden` to `Selected`. A click outside the
    /// region, or on a tile that is already `Selected` or `Matched`, returns
    /// `false` and leaves the tile untouched.
    pub fn try_flip(&mut self, point: Point) -> bool {
        if self.state != TileState::Hidden || !self.region.contains(point) {
            return false;
        }
        self.state = TileState::Selected;
        true
    }

    pub fn is_matched(&self) -> bool {
        self.state == TileState::Matched
    }

    pub fn is_hidden(&self) -> bool {
        self.state == TileState::Hidden
    }

    /// Returns `true` if both tiles hide the same face. See [`matches`].
    pub fn matches(&self, other: &Tile) -> bool {
        matches(self, other)
    }

    pub fn reset_to_hidden(&mut self) {
        self.state = TileState::Hidden;
    }

    pub fn mark_matched(&mut self) {
        self.state = TileState::Matched;
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn face(&self) -> FaceValue {
        self.face
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    /// Returns the `(row, column)` of this tile.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Compares two tiles by face value only.
///
/// Position and exposure state play no part, so the relation is reflexive
/// and symmetric: a tile always matches itself.
pub fn matches(a: &Tile, b: &Tile) -> bool {
    a.face == b.face
}

/// Result of resolving a full pending pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Both tiles hid the same face and are now `Matched`.
    Matched,
    /// The faces differed; both tiles are `Hidden` again.
    Mismatched,
}

/// Board-level composite state, derived from the pending selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardPhase {
    /// No tile selected; clicks are accepted.
    Idle,
    /// One tile selected; the next valid click completes the pair.
    AwaitingSecond,
    /// Two tiles selected; clicks are ignored until the pair resolves.
    Resolving,
    /// Every tile is matched.
    GameOver,
}

// Pending selection. Holds at most two positions by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Empty,
    One((usize, usize)),
    Two {
        first: (usize, usize),
        second: (usize, usize),
        // Set on the first tick that sees a mismatched pair.
        due: Option<Instant>,
    },
}

/// The game board: a square grid of tiles plus the rules that govern them.
///
/// The board owns every tile and the pending selection. Hosts interact with it
/// through three calls:
/// - [`Board::handle_click`] for each pointer click,
/// - [`Board::tick`] once per frame,
/// - [`Board::draw`] / [`Board::tile_views`] to render.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    tile_size: u32,
    grid: Vec<Vec<Tile>>,
    pending: Pending,
    mismatch_delay: Duration,
    started_at: Instant,
    score: u64,
    finished: bool,
    attempts: u32,
}

impl Board {
    /// Builds a `size` x `size` board with shuffled face values.
    ///
    /// `size * size / 2` distinct faces are generated, each is duplicated, and the
    /// resulting list is shuffled with `rng` and laid out in row-major order. Tile
    /// `(r, c)` covers the `tile_size` square whose top-left corner is
    /// `(c * tile_size, r * tile_size)`. The score clock starts now.
    ///
    /// # Errors
    /// Returns a `BoardError` if `size` is zero, larger than `MAX_BOARD_SIZE`,
    /// gives an odd number of tiles, or if `tile_size` is zero.
    ///
    /// # Examples
    /// ```
    /// use memory_tiles::engine::Board;
    /// use rand::rngs::SmallRng;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let board = Board::build(4, 100, &mut rng).unwrap();
    /// assert_eq!(board.size(), 4);
    /// assert!(!board.is_game_over());
    ///
    /// assert!(Board::build(3, 100, &mut rng).is_err());
    /// ```
    pub fn build(size: usize, tile_size: u32, rng: &mut impl Rng) -> Result<Self, BoardError> {
        check_size(size)?;
        let pairs = size * size / 2;
        let mut faces: Vec<FaceValue> = (0..pairs)
            .flat_map(|f| [FaceValue(f as u8), FaceValue(f as u8)])
            .collect();
        faces.shuffle(rng);
        Board::from_faces(size, tile_size, faces)
    }

    /// Builds a board whose shuffle is driven by a `SmallRng` seeded with `seed`.
    ///
    /// The same seed always produces the same layout.
    pub fn new_random_with_seed(size: usize, tile_size: u32, seed: u64) -> Result<Self, BoardError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Board::build(size, tile_size, &mut rng)
    }

    /// Builds a board from an explicit row-major list of faces.
    ///
    /// # Errors
    /// Besides the size checks of [`Board::build`], fails with
    /// `BoardError::WrongTileCount` if `faces` does not fill the grid and with
    /// `BoardError::UnpairedFace` if any face does not appear exactly twice.
    pub fn from_faces(
        size: usize,
        tile_size: u32,
        faces: Vec<FaceValue>,
    ) -> Result<Self, BoardError> {
        check_size(size)?;
        let side = check_tile_size(size, tile_size)?;
        if faces.len() != size * size {
            return Err(BoardError::WrongTileCount {
                expected: size * size,
                found: faces.len(),
            });
        }
        check_pairs(&faces)?;

        // check_tile_size bounds size * side by i32::MAX, so no offset below overflows.
        let grid = faces
            .chunks(size)
            .enumerate()
            .map(|(r, row_faces)| {
                row_faces
                    .iter()
                    .enumerate()
                    .map(|(c, &face)| {
                        let (x, y) = (c as i32 * side, r as i32 * side);
                        let region = Rect::new(x, y, tile_size, tile_size);
                        Tile::new(r, c, region, face)
                    })
                    .collect()
            })
            .collect();

        Ok(Board {
            size,
            tile_size,
            grid,
            pending: Pending::Empty,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            started_at: Instant::now(),
            score: 0,
            finished: false,
            attempts: 0,
        })
    }

    /// Sets how long a mismatched pair stays visible before flipping back.
    ///
    /// Delays above `MAX_MISMATCH_DELAY` are clamped to it.
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay.min(MAX_MISMATCH_DELAY);
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }

    /// The instant the score clock started counting from.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn tile(&self, r: usize, c: usize) -> &Tile {
        &self.grid[r][c]
    }

    /// Iterates over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.grid.iter().flatten()
    }

    /// Returns the centre point of tile `(r, c)`, i.e. a point that clicks it.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn tile_center(&self, r: usize, c: usize) -> Point {
        self.grid[r][c].region().center()
    }

    /// Handles one pointer click.
    ///
    /// While two tiles are already pending the click is ignored. Otherwise the
    /// tiles are scanned in row-major order and the first hidden tile containing
    /// `point` is flipped and appended to the pending selection. At most one tile
    /// flips per click.
    ///
    /// # Returns
    /// `true` if a tile was flipped. `false` means the click was rejected: it
    /// missed every tile, hit a face-up tile, or arrived while a pair was pending.
    pub fn handle_click(&mut self, point: Point) -> bool {
        if matches!(self.pending, Pending::Two { .. }) {
            return false;
        }
        let Some(pos) = self
            .grid
            .iter_mut()
            .flatten()
            .find_map(|tile| tile.try_flip(point).then(|| tile.position()))
        else {
            return false;
        };

        self.pending = match self.pending {
            Pending::Empty => Pending::One(pos),
            Pending::One(first) => Pending::Two {
                first,
                second: pos,
                due: None,
            },
            Pending::Two { .. } => unreachable!("full selection is rejected above"),
        };
        true
    }

    /// Resolves the pending pair, if there is one.
    ///
    /// A matching pair is marked `Matched` immediately. A mismatched pair stays
    /// face-up until `mismatch_delay` has passed since the first call that saw
    /// it, then both tiles flip back to `Hidden`. Either way the pending
    /// selection is emptied once the pair is resolved.
    ///
    /// With fewer than two pending tiles this does nothing, so it is safe to call
    /// on every frame.
    ///
    /// # Returns
    /// The `Resolution` if the pair was resolved on this call, `None` otherwise.
    pub fn resolve_pending(&mut self, now: Instant) -> Option<Resolution> {
        let Pending::Two { first, second, due } = self.pending else {
            return None;
        };

        let outcome = if self.grid[first.0][first.1].matches(&self.grid[second.0][second.1]) {
            self.grid[first.0][first.1].mark_matched();
            self.grid[second.0][second.1].mark_matched();
            Resolution::Matched
        } else {
            // An unrepresentable due instant leaves the pair waiting; it is never due early.
            let Some(due) = due.or_else(|| now.checked_add(self.mismatch_delay)) else {
                return None;
            };
            if now < due {
                self.pending = Pending::Two {
                    first,
                    second,
                    due: Some(due),
                };
                return None;
            }
            self.grid[first.0][first.1].reset_to_hidden();
            self.grid[second.0][second.1].reset_to_hidden();
            Resolution::Mismatched
        };

        self.pending = Pending::Empty;
        self.attempts += 1;
        Some(outcome)
    }

    /// Runs one update cycle: refreshes the score, resolves the pending pair and
    /// rechecks for game over.
    ///
    /// Once the game is over the board is frozen and further ticks do nothing,
    /// which also stops the score clock.
    pub fn tick(&mut self, now: Instant) -> Option<Resolution> {
        if self.finished {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_secs();
        self.score = self.score.max(elapsed);

        let outcome = self.resolve_pending(now);
        self.finished = self.is_game_over();
        outcome
    }

    /// Returns `true` once every tile is matched.
    pub fn is_game_over(&self) -> bool {
        self.tiles().all(Tile::is_matched)
    }

    /// Whole seconds since the game started, as of the last tick.
    pub fn elapsed_score(&self) -> u64 {
        self.score
    }

    /// Number of pairs resolved so far, matched or not.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn matched_pairs(&self) -> usize {
        self.tiles().filter(|t| t.is_matched()).count() / 2
    }

    pub fn phase(&self) -> BoardPhase {
        if self.is_game_over() {
            return BoardPhase::GameOver;
        }
        match self.pending {
            Pending::Empty => BoardPhase::Idle,
            Pending::One(_) => BoardPhase::AwaitingSecond,
            Pending::Two { .. } => BoardPhase::Resolving,
        }
    }

    /// Positions of the pending tiles, in the order they were selected.
    pub fn pending(&self) -> Vec<(usize, usize)> {
        match self.pending {
            Pending::Empty => Vec::new(),
            Pending::One(first) => vec![first],
            Pending::Two { first, second, .. } => vec![first, second],
        }
    }

    /// Snapshots every tile for rendering, in row-major order.
    pub fn tile_views(&self) -> impl Iterator<Item = TileView> + '_ {
        self.tiles().map(TileView::from)
    }

    /// Draws the board, the score and, once finished, the game-over banner.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for view in self.tile_views() {
            renderer.draw_tile(&view);
        }
        renderer.draw_score(self.score);
        if self.is_game_over() {
            renderer.draw_game_over(self.score);
        }
    }
}

/// Checks that a `size` x `size` board can be built: non-empty, at most
/// `MAX_BOARD_SIZE` per side, and an even number of tiles.
pub fn check_size(size: usize) -> Result<(), BoardError> {
    if size == 0 {
        return Err(BoardError::EmptyBoard);
    }
    if size > MAX_BOARD_SIZE {
        return Err(BoardError::TooLarge {
            size,
            max: MAX_BOARD_SIZE,
        });
    }
    let cells = size * size;
    if cells % 2 != 0 {
        return Err(BoardError::OddCellCount { size, cells });
    }
    Ok(())
}

// Returns the tile side as a surface coordinate. The whole grid must fit in i32.
// Expects a size already accepted by check_size.
fn check_tile_size(size: usize, tile_size: u32) -> Result<i32, BoardError> {
    if tile_size == 0 {
        return Err(BoardError::ZeroTileSize);
    }
    i32::try_from(tile_size)
        .ok()
        .filter(|side| i32::try_from(size).ok().and_then(|n| n.checked_mul(*side)).is_some())
        .ok_or(BoardError::TileTooLarge { tile_size, size })
}

fn check_pairs(faces: &[FaceValue]) -> Result<(), BoardError> {
    let mut counts = [0usize; 256];
    for face in faces {
        counts[face.0 as usize] += 1;
    }
    // Report the first offending face in layout order.
    match faces.iter().find(|f| counts[f.0 as usize] != 2) {
        Some(face) => Err(BoardError::UnpairedFace {
            face: face.label(),
            count: counts[face.0 as usize],
        }),
        None => Ok(()),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = crate::render::TextRenderer::new(self.size);
        self.draw(&mut renderer);
        write!(f, "{}", renderer.finish())
    }
}
