use super::table::CommentTable;
use crate::pipelines::sentiment::Comment;

/// Header names tried first, in priority order (English and Spanish).
pub const COMMENT_COLUMN_NAMES: [&str; 8] = [
    "comment",
    "comments",
    "texto",
    "text",
    "comentario",
    "comentarios",
    "message",
    "mensaje",
];

/// A fallback column's first value must be longer than this (in chars).
const MIN_SAMPLE_CHARS: usize = 5;

/// Find the column holding the comments.
///
/// An exact header match from [`COMMENT_COLUMN_NAMES`] wins, earliest name
/// first. Otherwise the first text column whose first non-empty cell is
/// longer than five characters is used.
pub fn detect_comment_column(table: &CommentTable) -> Option<usize> {
    COMMENT_COLUMN_NAMES
        .iter()
        .find_map(|name| table.column_index(name))
        .or_else(|| (0..table.headers().len()).find(|&col| looks_like_comments(table, col)))
}

fn looks_like_comments(table: &CommentTable, col: usize) -> bool {
    if !is_text_column(table, col) {
        return false;
    }
    table
        .column(col)
        .find(|cell| !cell.is_empty())
        .and_then(|cell| Comment::from_text_cell(cell).as_text())
        .is_some_and(|sample| sample.chars().count() > MIN_SAMPLE_CHARS)
}

// A column is text if any non-empty cell is not a number.
fn is_text_column(table: &CommentTable, col: usize) -> bool {
    table
        .column(col)
        .any(|cell| matches!(Comment::from_cell(cell), Comment::Text(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> CommentTable {
        CommentTable::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn known_name_wins() {
        let t = table("id,notes,comentario\n1,some long note,bien\n");
        assert_eq!(detect_comment_column(&t), Some(2));
    }

    #[test]
    fn names_follow_priority_not_position() {
        let t = table("message,text\nhello there,general kenobi\n");
        assert_eq!(detect_comment_column(&t), Some(1));
    }

    #[test]
    fn names_match_exactly() {
        let t = table("Comment,id\nok,1\n");
        assert_eq!(detect_comment_column(&t), None);
    }

    #[test]
    fn falls_back_to_first_long_text_column() {
        let t = table("id,rating,code,review\n1,4.5,ab,Muy buen servicio\n2,3,cd,Nada especial\n");
        assert_eq!(detect_comment_column(&t), Some(3));
    }

    #[test]
    fn sample_is_first_non_empty_cell() {
        let t = table("id,review\n1,\n2,Llegó el paquete ayer\n");
        assert_eq!(detect_comment_column(&t), Some(1));
    }

    #[test]
    fn short_sample_is_skipped() {
        let t = table("a,b\nhi,this one is long\nthere is more text,x\n");
        assert_eq!(detect_comment_column(&t), Some(1));
    }

    #[test]
    fn numeric_looking_sample_in_text_column_is_accepted() {
        let t = table("id,review\n1,12345678\n2,Muy buen servicio\n");
        assert_eq!(detect_comment_column(&t), Some(1));
    }

    #[test]
    fn numeric_columns_are_never_chosen() {
        let t = table("id,price\n1000001,123456.78\n");
        assert_eq!(detect_comment_column(&t), None);
    }

    #[test]
    fn empty_table_has_no_comment_column() {
        let t = table("notes\n");
        assert_eq!(detect_comment_column(&t), None);
    }
}
