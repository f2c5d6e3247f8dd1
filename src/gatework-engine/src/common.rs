// Copyright 2026 The Gatework Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fmt;
use std::{error, result};

/// Unique identifier of a scope within a project.
pub type ScopeId = u64;

/// A generated unique id, used for layout ports.
pub type Uid = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoError, // will never be produced
    JsonDeserialization,
    UnresolvedType,
    MalformedDescriptor,
    MissingDependency,
    BadNodeKind,
    BadDirection,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorCode::*;
        let name = match self {
            NoError => "no_error",
            JsonDeserialization => "json_deserialization",
            UnresolvedType => "unresolved_type",
            MalformedDescriptor => "malformed_descriptor",
            MissingDependency => "missing_dependency",
            BadNodeKind => "bad_node_kind",
            BadDirection => "bad_direction",
        };

        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Import,
    Project,
    Scope,
    Element,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub details: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, code: ErrorCode, details: Option<String>) -> Self {
        Error {
            kind,
            code,
            details,
        }
    }

    pub fn get_details(&self) -> Option<String> {
        self.details.clone()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.kind {
            ErrorKind::Import => "ImportError",
            ErrorKind::Project => "ProjectError",
            ErrorKind::Scope => "ScopeError",
            ErrorKind::Element => "ElementError",
        };
        match self.details {
            Some(ref details) => write!(f, "{}{{{}: {}}}", kind, self.code, details),
            None => write!(f, "{}{{{}}}", kind, self.code),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[macro_export]
macro_rules! scope_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Scope, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Scope, ErrorCode::$code, None))
    }};
}

#[macro_export]
macro_rules! element_err {
    ($code:tt, $str:expr) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Element, ErrorCode::$code, Some($str)))
    }};
    ($code:tt) => {{
        use $crate::common::{Error, ErrorCode, ErrorKind};
        Err(Error::new(ErrorKind::Element, ErrorCode::$code, None))
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::new(
            ErrorKind::Scope,
            ErrorCode::MalformedDescriptor,
            Some("scope 3".to_owned()),
        );
        assert_eq!("ScopeError{malformed_descriptor: scope 3}", format!("{err}"));

        let err = Error::new(ErrorKind::Element, ErrorCode::UnresolvedType, None);
        assert_eq!("ElementError{unresolved_type}", format!("{err}"));
    }

    #[test]
    fn test_err_macros() {
        let result: Result<()> = scope_err!(MissingDependency, "subcircuit 7".to_owned());
        let err = result.unwrap_err();
        assert_eq!(ErrorKind::Scope, err.kind);
        assert_eq!(ErrorCode::MissingDependency, err.code);
        assert_eq!(Some("subcircuit 7".to_owned()), err.get_details());

        let result: Result<()> = element_err!(UnresolvedType);
        let err = result.unwrap_err();
        assert_eq!(ErrorKind::Element, err.kind);
        assert_eq!(None, err.details);
    }
}
