use super::*;

/// A compiled pattern. Thin wrapper so pattern failures surface as this
/// crate's `Error` and callers never touch the backend directly.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    backend: fancy_regex::Regex,
}

impl Pattern {
    pub(crate) fn case_insensitive(pattern: &str) -> Result<Self> {
        let mut builder = fancy_regex::RegexBuilder::new(pattern);
        builder.case_insensitive(true);
        let backend = builder
            .build()
            .map_err(|err| Error::Pattern(err.to_string()))?;
        Ok(Self { backend })
    }

    pub(crate) fn is_match(&self, input: &str) -> Result<bool> {
        self.backend
            .is_match(input)
            .map_err(|err| Error::Pattern(err.to_string()))
    }
}
