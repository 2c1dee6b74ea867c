use pretty_assertions::assert_eq;

use super::*;

#[test]
fn default_points_at_stdin_start() {
    let span = TokenSpan::default();
    assert_eq!(span.file, FileId::STDIN);
    assert_eq!((span.line, span.column), (1, 1));
}

#[test]
fn display_is_line_and_column() {
    assert_eq!(TokenSpan::new(FileId::new(3), 12, 7).to_string(), "12:7");
}
