use super::Error;

/// Error when a model taking part in a relationship has no primary key.
#[derive(Debug)]
pub(super) struct MissingIdentity {
    model: Box<str>,
}

impl std::error::Error for MissingIdentity {}

impl core::fmt::Display for MissingIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "model `{}` has no primary key; declare an `ID` field or annotate one with `primary_key`",
            self.model
        )
    }
}

impl Error {
    /// Creates a missing identity error naming the model without a key.
    pub fn missing_identity(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingIdentity(MissingIdentity {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing identity error.
    pub fn is_missing_identity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingIdentity(_))
    }
}
