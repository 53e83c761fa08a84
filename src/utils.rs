use crate::engine::{Board, FaceValue};
use crate::error::BoardError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row of face labels, starting from row 0. The rows
/// must form a square, and every label must appear exactly twice. Labels are
/// `A`-`Z` for faces 0-25 and `a`-`z` for faces 26-51. All tiles start face-down.
///
/// # Arguments
/// * `s`: The rows of the board, top to bottom.
/// * `tile_size`: Side length in pixels of each tile's square region.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(BoardError)` if:
///     - `s` is empty.
///     - A row's length differs from the number of rows.
///     - An unrecognized character is encountered.
///     - The board breaks a size rule of `Board::build` (odd cell count, too large).
///     - A label does not appear exactly twice.
///
/// # Examples
/// ```
/// use memory_tiles::utils::board_from_str_array;
/// use memory_tiles::engine::FaceValue;
///
/// let board = board_from_str_array(&["AB", "BA"], 100).unwrap();
/// assert_eq!(board.tile(0, 0).face(), FaceValue(0));
/// assert_eq!(board.tile(0, 1).face(), FaceValue(1));
/// assert!(board.tile(1, 1).matches(board.tile(0, 0)));
///
/// assert!(board_from_str_array(&["A?", "?A"], 100).is_err());
/// assert!(board_from_str_array(&["AB", "CD"], 100).is_err());
/// ```
pub fn board_from_str_array(s: &[&str], tile_size: u32) -> Result<Board, BoardError> {
    if s.is_empty() {
        return Err(BoardError::EmptyBoard);
    }
    let size = s.len();

    let mut faces = Vec::with_capacity(size * size);
    for (r, row_str) in s.iter().enumerate() {
        let len = row_str.chars().count();
        if len != size {
            return Err(BoardError::NotSquare {
                rows: size,
                row: r,
                len,
            });
        }

        for (c, ch) in row_str.chars().enumerate() {
            let face = FaceValue::from_label(ch)
                .ok_or(BoardError::UnrecognizedChar { ch, row: r, col: c })?;
            faces.push(face);
        }
    }

    Board::from_faces(size, tile_size, faces)
}

/// Splits layout text into rows, dropping blank lines and surrounding whitespace.
///
/// This is the file format read by the hosts' `--layout` option.
pub fn layout_rows(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TileState;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["ABCD", "EFGH", "DCBA", "HGFE"], 10).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.tile(0, 0).face(), FaceValue(0));
        assert_eq!(board.tile(3, 0).face(), FaceValue(7));
        assert!(board.tiles().all(|t| t.state() == TileState::Hidden));
    }

    #[test]
    fn test_board_from_str_array_lowercase_labels() {
        let board = board_from_str_array(&["az", "za"], 10).unwrap();
        assert_eq!(board.tile(0, 0).face(), FaceValue(26));
        assert_eq!(board.tile(0, 1).face(), FaceValue(51));
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array(&["AB", "B."], 10);
        assert_eq!(
            result.unwrap_err(),
            BoardError::UnrecognizedChar {
                ch: '.',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn test_board_from_str_array_not_square() {
        let result = board_from_str_array(&["AB", "BAC"], 10);
        assert_eq!(
            result.unwrap_err(),
            BoardError::NotSquare {
                rows: 2,
                row: 1,
                len: 3
            }
        );
    }

    #[test]
    fn test_board_from_str_array_odd_size() {
        let result = board_from_str_array(&["AAB", "BCC", "DDE"], 10);
        assert_eq!(
            result.unwrap_err(),
            BoardError::OddCellCount { size: 3, cells: 9 }
        );
    }

    #[test]
    fn test_board_from_str_array_unpaired() {
        let result = board_from_str_array(&["AAAB", "BCCD", "DEEF", "FGGH"], 10);
        assert_eq!(
            result.unwrap_err(),
            BoardError::UnpairedFace { face: 'A', count: 3 }
        );
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board_str: [&str; 0] = [];
        assert_eq!(
            board_from_str_array(&board_str, 10).unwrap_err(),
            BoardError::EmptyBoard
        );
    }

    #[test]
    fn test_layout_rows() {
        let text = "\n  ABCD\nEFGH  \n\nDCBA\nHGFE\n";
        assert_eq!(layout_rows(text), vec!["ABCD", "EFGH", "DCBA", "HGFE"]);
    }
}
