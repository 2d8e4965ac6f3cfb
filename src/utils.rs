use crate::engine::Board;
use crate::error::BoardError;
use std::fs;
use std::path::Path;

/// Parses an array of string slices into a `Board` object.
///
/// Each string slice is one row of the board, starting from row 0, made of
/// whitespace-separated tokens:
/// - a number such as `2`, `16` or `2048`: a tile with that value
/// - `.` or `_`: an empty cell
///
/// The number of rows decides the board size, so a 4x4 board takes four rows
/// of four tokens each.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(BoardError)` if:
///     - there are no rows,
///     - a token is neither a number nor an empty marker,
///     - a row has a different number of tokens than there are rows,
///     - a number is not a power of two of at least 2.
///
/// # Examples
/// ```
/// use twenty48_engine::utils::board_from_str_array;
///
/// let board = board_from_str_array(&[
///     "2 . . 4",
///     ". . . .",
///     ". 8 . .",
///     "_ _ _ 2048",
/// ])
/// .unwrap();
/// assert_eq!(board.size(), 4);
/// assert_eq!(board.get_tile(0, 0), Some(2));
/// assert_eq!(board.get_tile(0, 1), None);
/// assert_eq!(board.get_tile(3, 3), Some(2048));
///
/// assert!(board_from_str_array(&["2 x", ". ."]).is_err());
/// assert!(board_from_str_array(&["2 3", ". ."]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardError> {
    let mut rows = Vec::with_capacity(s.len());

    for (r, row_str) in s.iter().enumerate() {
        let mut row = Vec::new();
        for (c, token) in row_str.split_whitespace().enumerate() {
            let cell = match token {
                "." | "_" => None,
                _ => Some(token.parse::<u32>().map_err(|_| BoardError::UnrecognizedToken {
                    row: r,
                    col: c,
                    token: token.to_string(),
                })?),
            };
            row.push(cell);
        }
        rows.push(row);
    }

    // Shape and tile values are checked in one place.
    Board::from_rows(rows)
}

/// Reads a board layout from a text file in the `board_from_str_array` format.
///
/// Blank lines and surrounding whitespace are ignored.
pub fn read_board_file(path: &Path) -> Result<Board, BoardError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    board_from_str_array(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BOARD_SIZE;

    #[test]
    fn test_board_from_str_array_valid() {
        let board_str = [
            "2 4 8 16",
            ". . . .",
            "32 64 128 256",
            "_ _ _ _",
        ];
        let board = board_from_str_array(&board_str).unwrap();
        assert_eq!(board.size(), BOARD_SIZE);
        assert_eq!(board.get_tile(0, 0), Some(2));
        assert_eq!(board.get_tile(0, 3), Some(16));
        assert_eq!(board.get_tile(1, 0), None);
        assert_eq!(board.get_tile(2, 3), Some(256));
        assert_eq!(board.get_tile(3, 3), None);
    }

    #[test]
    fn test_board_from_str_array_extra_spacing() {
        let board = board_from_str_array(&["  2    .", "\t. 4 "]).unwrap();
        assert_eq!(board.size(), 2);
        assert_eq!(board.get_tile(0, 0), Some(2));
        assert_eq!(board.get_tile(1, 1), Some(4));
    }

    #[test]
    fn test_board_from_str_array_invalid_token() {
        let result = board_from_str_array(&["2 . . X", ". . . .", ". . . .", ". . . ."]);
        let err = result.unwrap_err();
        assert!(matches!(err, BoardError::UnrecognizedToken { row: 0, col: 3, .. }));
        assert!(err.to_string().contains("unrecognized token 'X'"));
    }

    #[test]
    fn test_board_from_str_array_negative_number() {
        let result = board_from_str_array(&["-2 .", ". ."]);
        assert!(matches!(result, Err(BoardError::UnrecognizedToken { .. })));
    }

    #[test]
    fn test_board_from_str_array_not_power_of_two() {
        let result = board_from_str_array(&["2 .", ". 12"]);
        assert!(matches!(
            result,
            Err(BoardError::InvalidTile { row: 1, col: 1, value: 12 })
        ));
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let result = board_from_str_array(&["2 . . . .", ". . . .", ". . . .", ". . . ."]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("row 0 has 5 cells (expected 4)"));
    }

    #[test]
    fn test_board_from_str_array_too_many_rows() {
        let result = board_from_str_array(&[". .", ". .", ". ."]);
        assert!(matches!(result, Err(BoardError::RaggedRow { row: 0, .. })));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board_str: [&str; 0] = [];
        let result = board_from_str_array(&board_str);
        assert!(matches!(result, Err(BoardError::Empty)));
    }

    #[test]
    fn test_read_board_file() {
        let path = std::env::temp_dir().join(format!("twenty48_board_{}.txt", std::process::id()));
        fs::write(&path, "\n2 . . .\n. 4 . .\n\n. . 8 .\n. . . 16\n").unwrap();
        let board = read_board_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(board.size(), 4);
        assert_eq!(board.get_tile(3, 3), Some(16));

        let missing = read_board_file(Path::new("/nonexistent/twenty48/board.txt"));
        assert!(matches!(missing, Err(BoardError::Io(_))));
    }

    #[test]
    fn test_read_board_file_blank() {
        let path = std::env::temp_dir().join(format!("twenty48_blank_{}.txt", std::process::id()));
        fs::write(&path, "\n  \n\n").unwrap();
        let result = read_board_file(&path);
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, BoardError::Empty));
        assert_eq!(err.to_string(), "board has no rows");
    }
}
