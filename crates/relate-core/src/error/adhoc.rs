/// Free-form error built from format arguments by `err!` and `bail!`.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    pub(super) fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        let message = match args.as_str() {
            Some(s) => s.into(),
            None => args.to_string().into(),
        };
        AdhocError { message }
    }
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}
