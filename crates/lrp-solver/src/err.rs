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

/// A bad run configuration: an operator or construction method name that
/// resolves to nothing, an empty operator catalog, or a parameter outside
/// its domain.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnknownOperator { kind: &'static str, name: String },
    UnknownMethod { name: String },
    EmptyCatalog { kind: &'static str },
    OutOfDomain {
        param: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownOperator { kind, name } => {
                write!(f, "Unknown {kind} operator `{name}`.")
            }
            ConfigError::UnknownMethod { name } => {
                write!(f, "Unknown construction method `{name}`.")
            }
            ConfigError::EmptyCatalog { kind } => {
                write!(f, "The {kind} operator catalog is empty.")
            }
            ConfigError::OutOfDomain {
                param,
                value,
                expected,
            } => write!(f, "Parameter `{param}` = {value} out of domain ({expected})."),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A construction method that could not place every customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfeasibleInitialError {
    method: String,
    open: usize,
}

impl InfeasibleInitialError {
    pub fn new(method: impl Into<String>, open: usize) -> Self {
        Self {
            method: method.into(),
            open,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn open(&self) -> usize {
        self.open
    }
}

impl std::fmt::Display for InfeasibleInitialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Construction method `{}` left {} customer(s) unassigned.",
            self.method, self.open
        )
    }
}

impl std::error::Error for InfeasibleInitialError {}

#[derive(Debug)]
pub enum SolverError {
    Config(ConfigError),
    InfeasibleInitial(InfeasibleInitialError),
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::Config(e) => write!(f, "{e}"),
            SolverError::InfeasibleInitial(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Config(e) => Some(e),
            SolverError::InfeasibleInitial(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SolverError {
    fn from(e: ConfigError) -> Self {
        SolverError::Config(e)
    }
}

impl From<InfeasibleInitialError> for SolverError {
    fn from(e: InfeasibleInitialError) -> Self {
        SolverError::InfeasibleInitial(e)
    }
}
