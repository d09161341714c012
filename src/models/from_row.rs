use rusqlite::Row;

/// Maps a `SELECT *` row onto a model.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
