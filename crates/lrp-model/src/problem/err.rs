// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::common::{CustomerId, DepotId};
use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowError {
    open: f64,
    close: f64,
}

impl WindowError {
    pub fn new(open: f64, close: f64) -> Self {
        Self { open, close }
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn close(&self) -> f64 {
        self.close
    }
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid time window [{}, {}]; expected finite open <= close.",
            self.open, self.close
        )
    }
}

impl std::error::Error for WindowError {}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeError {
    entity: String,
    attribute: &'static str,
    value: f64,
}

impl AttributeError {
    pub fn new(entity: impl Into<String>, attribute: &'static str, value: f64) -> Self {
        Self {
            entity: entity.into(),
            attribute,
            value,
        }
    }

    pub fn attribute(&self) -> &'static str {
        self.attribute
    }
}

impl std::fmt::Display for AttributeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: attribute `{}` has invalid value {}",
            self.entity, self.attribute, self.value
        )
    }
}

impl std::error::Error for AttributeError {}

/// Errors raised while assembling an [`Instance`](crate::problem::instance::Instance).
#[derive(Debug)]
pub enum InstanceError {
    NoCustomers,
    NoDepots,
    NoFleet(DepotId),
    Window(WindowError),
    Attribute(AttributeError),
    DuplicateCustomer(CustomerId),
    DuplicateDepot(DepotId),
    ArcDimension { expected: usize, actual: usize },
    NegativeArc { from: usize, to: usize, length: f64 },
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::NoCustomers => write!(f, "Instance has no customers."),
            InstanceError::NoDepots => write!(f, "Instance has no depots."),
            InstanceError::NoFleet(d) => write!(f, "Depot {d} has an empty fleet."),
            InstanceError::Window(e) => write!(f, "{e}"),
            InstanceError::Attribute(e) => write!(f, "{e}"),
            InstanceError::DuplicateCustomer(id) => write!(f, "Duplicate customer {id}."),
            InstanceError::DuplicateDepot(id) => write!(f, "Duplicate depot {id}."),
            InstanceError::ArcDimension { expected, actual } => write!(
                f,
                "Arc matrix must be {expected}x{expected}, got {actual} entries."
            ),
            InstanceError::NegativeArc { from, to, length } => {
                write!(f, "Arc ({from}, {to}) has negative length {length}.")
            }
        }
    }
}

impl std::error::Error for InstanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstanceError::Window(e) => Some(e),
            InstanceError::Attribute(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WindowError> for InstanceError {
    fn from(e: WindowError) -> Self {
        InstanceError::Window(e)
    }
}

impl From<AttributeError> for InstanceError {
    fn from(e: AttributeError) -> Self {
        InstanceError::Attribute(e)
    }
}

/// Errors raised while reading an instance directory from disk.
#[derive(Debug)]
pub enum InstanceLoadError {
    Io(std::io::Error),
    MissingFile(String),
    MissingColumn { file: String, column: &'static str },
    ParseFloat { file: String, line: usize, source: ParseFloatError },
    ParseInt { file: String, line: usize, source: ParseIntError },
    FieldCount { file: String, line: usize, expected: usize, actual: usize },
    UnknownDepot { file: String, line: usize, depot: usize },
    Instance(InstanceError),
}

impl std::fmt::Display for InstanceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceLoadError::Io(e) => write!(f, "I/O error: {e}"),
            InstanceLoadError::MissingFile(p) => write!(f, "Missing instance file `{p}`."),
            InstanceLoadError::MissingColumn { file, column } => {
                write!(f, "{file}: missing column `{column}`.")
            }
            InstanceLoadError::ParseFloat { file, line, source } => {
                write!(f, "{file}:{line}: {source}")
            }
            InstanceLoadError::ParseInt { file, line, source } => {
                write!(f, "{file}:{line}: {source}")
            }
            InstanceLoadError::FieldCount {
                file,
                line,
                expected,
                actual,
            } => write!(f, "{file}:{line}: expected {expected} fields, got {actual}."),
            InstanceLoadError::UnknownDepot { file, line, depot } => {
                write!(f, "{file}:{line}: vehicle row references unknown depot {depot}.")
            }
            InstanceLoadError::Instance(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InstanceLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstanceLoadError::Io(e) => Some(e),
            InstanceLoadError::ParseFloat { source, .. } => Some(source),
            InstanceLoadError::ParseInt { source, .. } => Some(source),
            InstanceLoadError::Instance(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoadError {
    fn from(e: std::io::Error) -> Self {
        InstanceLoadError::Io(e)
    }
}

impl From<InstanceError> for InstanceLoadError {
    fn from(e: InstanceError) -> Self {
        InstanceLoadError::Instance(e)
    }
}
