use std::fmt::{Display, Write};

use crate::{RedcapError, error, logging::Logger};

#[cfg(test)]
#[path = "./join_test.rs"]
mod join_test;

const SEPARATOR: char = ',';

/// Flattens arrays of scalars into the comma separated strings the API takes for
/// multi-valued arguments such as `fields`, `forms` or `events`.
#[derive(Debug, Clone, Default)]
pub struct ListJoiner {
    logger: Logger,
}

impl ListJoiner {
    pub fn new(logger: impl Into<Logger>) -> Self {
        Self {
            logger: logger.into(),
        }
    }

    /// Joins `values` with commas.
    ///
    /// An absent or empty slice is an `InvalidInput` error. A single element comes back as
    /// its own text. With more elements every trailing comma is trimmed from the result,
    /// including commas that belonged to the last elements themselves.
    pub fn join<T: Display>(&self, values: Option<&[T]>) -> Result<String, RedcapError> {
        let values = match values {
            Some(values) if !values.is_empty() => values,
            _ => return Err(error!(InvalidInput, "please provide a non-empty array")),
        };

        match join_into(values) {
            Ok(joined) => Ok(joined),
            Err(e) => {
                self.logger.scope(|| {
                    tracing::error!(elements = values.len(), error = %e, "failed to join array");
                });
                Err(e)
            }
        }
    }

    pub fn join_strings<S: AsRef<str>>(
        &self,
        values: Option<&[S]>,
    ) -> Result<String, RedcapError> {
        let values: Option<Vec<&str>> = values.map(|v| v.iter().map(|s| s.as_ref()).collect());
        self.join(values.as_deref())
    }

    pub fn join_ints(&self, values: Option<&[i32]>) -> Result<String, RedcapError> {
        self.join(values)
    }
}

/// Joins strings with the default joiner. See [`ListJoiner::join`].
pub fn join_strings<S: AsRef<str>>(values: Option<&[S]>) -> Result<String, RedcapError> {
    ListJoiner::default().join_strings(values)
}

/// Joins integers with the default joiner. See [`ListJoiner::join`].
pub fn join_ints(values: Option<&[i32]>) -> Result<String, RedcapError> {
    ListJoiner::default().join_ints(values)
}

fn join_into<T: Display>(values: &[T]) -> Result<String, RedcapError> {
    let mut builder = String::with_capacity(values.len() * 8);

    for value in values {
        if let Err(e) = write!(builder, "{}", value) {
            return Err(error!(OperationFailed, "failed to convert array element", e));
        }

        if values.len() <= 1 {
            return Ok(builder);
        }

        builder.push(SEPARATOR);
    }

    let trimmed = builder.trim_end_matches(SEPARATOR).len();
    builder.truncate(trimmed);

    Ok(builder)
}
