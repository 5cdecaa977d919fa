use std::error::Error;
use std::fmt::{Debug, Display};

/// Broad category of a [`RedcapError`]. Callers match on this rather than on messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required input was absent or empty.
    InvalidInput,
    /// The destination file exists and overwriting was not allowed.
    AlreadyExists,
    /// An underlying I/O, transport or conversion failure.
    OperationFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::OperationFailed => "OperationFailed",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct RedcapError {
    kind: ErrorKind,
    trace: String,
    message: String,
    underlying_error: Option<String>,
}

impl RedcapError {
    pub(crate) fn new(
        kind: ErrorKind,
        trace: String,
        message: String,
        underlying: Option<String>,
    ) -> Self {
        Self {
            kind,
            trace,
            message,
            underlying_error: underlying,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Path of the function that raised the error.
    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// Type name of the wrapped error, if this error wraps one.
    pub fn underlying_error(&self) -> Option<&str> {
        self.underlying_error.as_deref()
    }
}

impl Error for RedcapError {}

impl Display for RedcapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let error_name = self
            .underlying_error
            .as_deref()
            .unwrap_or(self.kind.as_str());
        write!(f, "[{}] ({}): {}", error_name, self.trace, self.message)
    }
}

impl Debug for RedcapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}/{}] ({}): {}",
            self.kind,
            self.underlying_error.as_deref().unwrap_or("-"),
            self.trace,
            self.message
        )
    }
}

macro_rules! this_errors {
    ($kind:ident, $msg:literal, $val:expr) => {
        $val.map_err(|e| $crate::error!($kind, $msg, e))?
    };
}

macro_rules! error {
    ($kind:ident, message = $msg:expr) => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let fun_name = &name[..name.len() - 3];
        $crate::errors::RedcapError::new(
            $crate::errors::ErrorKind::$kind,
            fun_name.into(),
            ($msg).to_string(),
            None,
        )
    }};
    ($kind:ident, $val:literal) => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let fun_name = &name[..name.len() - 3];
        $crate::errors::RedcapError::new(
            $crate::errors::ErrorKind::$kind,
            fun_name.into(),
            $val.into(),
            None,
        )
    }};
    ($kind:ident, $err:expr) => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let err = $err;
        let name = type_name_of(f);
        let error_type_name = type_name_of(&err);
        let fun_name = &name[..name.len() - 3];
        let error_name = error_type_name.split("::").last().map(|x| x.to_string());
        let error_msg = format!("{}", err);

        $crate::errors::RedcapError::new(
            $crate::errors::ErrorKind::$kind,
            fun_name.into(),
            error_msg,
            error_name,
        )
    }};
    ($kind:ident, $val:literal, $err:expr) => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let err = $err;
        let name = type_name_of(f);
        let error_type_name = type_name_of(&err);
        let fun_name = &name[..name.len() - 3];
        let error_name = error_type_name.split("::").last().map(|x| x.to_string());
        let final_msg = format!("{} - {}", $val, err);
        $crate::errors::RedcapError::new(
            $crate::errors::ErrorKind::$kind,
            fun_name.into(),
            final_msg,
            error_name,
        )
    }};
}

pub(crate) use error;
pub(crate) use this_errors;

#[cfg(test)]
#[path = "./errors_test.rs"]
mod errors_test;
