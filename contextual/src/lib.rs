//! Typed error-context wrapper. Unlike `anyhow`, the wrapped error type stays
//! visible in signatures, so `#[from]` conversions can match on it.

use std::fmt::{self, Debug, Display};

pub struct Error<E> {
    context: String,
    source: E,
}

impl<E> Error<E> {
    pub fn new(context: impl Display, source: E) -> Self {
        Self {
            context: context.to_string(),
            source,
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn source(&self) -> &E {
        &self.source
    }

    pub fn into_source(self) -> E {
        self.source
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.context, self.source)
    }
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {:?}", self.context, self.source)
    }
}

impl<E> std::error::Error for Error<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

pub trait Context<T, E> {
    fn context(self, context: impl Display) -> Result<T, Error<E>>;
}

impl<T, E> Context<T, E> for Result<T, E> {
    fn context(self, context: impl Display) -> Result<T, Error<E>> {
        self.map_err(|source| Error::new(context, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Inner(&'static str);

    impl Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for Inner {}

    #[test]
    fn context_prefixes_display() {
        let result: Result<(), Inner> = Err(Inner("boom"));
        let err = result.context("open database").unwrap_err();
        assert_eq!(err.to_string(), "open database :: boom");
    }

    #[test]
    fn ok_passes_through() {
        let result: Result<u8, Inner> = Ok(7);
        assert_eq!(result.context("unused").unwrap(), 7);
    }

    #[test]
    fn nested_contexts_chain() {
        let result: Result<(), Inner> = Err(Inner("boom"));
        let err = result.context("read row").context("handle request").unwrap_err();
        assert_eq!(err.to_string(), "handle request :: read row :: boom");
    }

    #[test]
    fn source_is_preserved() {
        let err = Error::new("ctx", Inner("boom"));
        assert_eq!(*err.source(), Inner("boom"));
        assert_eq!(err.into_source(), Inner("boom"));
    }
}
