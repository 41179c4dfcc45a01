use super::Error;

/// Error when two fields of one model resolve to the same column.
#[derive(Debug)]
pub(super) struct DuplicateColumn {
    model: Box<str>,
    column: Box<str>,
    first: Box<str>,
    second: Box<str>,
}

impl std::error::Error for DuplicateColumn {}

impl core::fmt::Display for DuplicateColumn {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "fields `{}::{}` and `{}::{}` both map to column `{}`",
            self.model, self.first, self.model, self.second, self.column
        )
    }
}

impl Error {
    /// Creates a duplicate column error naming both conflicting fields.
    pub fn duplicate_column(
        model: impl Into<String>,
        column: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::DuplicateColumn(DuplicateColumn {
            model: model.into().into(),
            column: column.into().into(),
            first: first.into().into(),
            second: second.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate column error.
    pub fn is_duplicate_column(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateColumn(_))
    }
}
