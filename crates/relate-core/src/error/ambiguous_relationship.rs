use super::Error;

/// Error when the direction of a singular association cannot be determined.
///
/// Raised when neither side carries a foreign key following the naming
/// conventions and no `rel` or `foreignkey` annotation settles it, or when an
/// explicit `foreignkey` names a field that does not exist where the
/// relationship kind requires it.
#[derive(Debug)]
pub(super) struct AmbiguousRelationship {
    model: Box<str>,
    field: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for AmbiguousRelationship {}

impl core::fmt::Display for AmbiguousRelationship {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot resolve relationship `{}::{}`: {}",
            self.model, self.field, self.reason
        )
    }
}

impl Error {
    /// Creates an ambiguous relationship error for `model::field`.
    pub fn ambiguous_relationship(
        model: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::AmbiguousRelationship(
            AmbiguousRelationship {
                model: model.into().into(),
                field: field.into().into(),
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an ambiguous relationship error.
    pub fn is_ambiguous_relationship(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AmbiguousRelationship(_))
    }
}
