use crate::{pos, Pos};

/// Reads a plain text drawing of live cells.
///
/// `#`, `O` and `*` are live cells, `\n` starts a new row and any other
/// character is a dead cell.
pub fn parse_pattern(str: &str) -> Vec<Pos> {
    let mut result = vec![];
    let mut pos = pos!(0, 0);
    for c in str.chars() {
        match c {
            '#' | 'O' | '*' => {
                result.push(pos);
                pos.x += 1
            }
            '\n' => pos = pos!(0, pos.y + 1),
            '\r' => (),
            _ => pos.x += 1,
        }
    }
    result
}

pub fn offset(positions: impl IntoIterator<Item = Pos>, by: Pos) -> Vec<Pos> {
    positions.into_iter().map(|pos| pos + by).collect()
}

#[test]
fn test_parse_glider() {
    let glider = ".#.\n..#\n###\n";
    assert_eq!(
        parse_pattern(glider),
        vec![pos!(1, 0), pos!(2, 1), pos!(0, 2), pos!(1, 2), pos!(2, 2)]
    );
}

#[test]
fn test_parse_mixed_markers_and_crlf() {
    assert_eq!(
        parse_pattern("O.*\r\n x"),
        vec![pos!(0, 0), pos!(2, 0)]
    );
    assert!(parse_pattern("").is_empty());
}

#[test]
fn test_offset() {
    assert_eq!(
        offset([pos!(0, 0), pos!(1, 2)], pos!(3, -1)),
        vec![pos!(3, -1), pos!(4, 1)]
    );
}
