// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

/// List of all errors.
///
/// Every error is fatal for the whole run. The CLI maps each kind
/// to a distinct process exit code via [`Error::exit_code`].
#[derive(Debug)]
pub enum Error {
    /// A malformed or incomplete command line.
    InvalidArguments(String),

    /// Commands were given, but no files to process.
    NoInputFiles,

    /// Files were given, but no commands to apply.
    NoCommands,

    /// Failed to open a file for reading.
    OpenFailed(PathBuf),

    /// Failed to open a file for writing.
    WriteOpenFailed(PathBuf),

    /// Failed to parse an SVG data.
    ParsingFailed(PathBuf, roxmltree::Error),

    /// Failed to write a processed file.
    WritingFailed(PathBuf),

    /// Failed to create a backup copy.
    BackupFailed(PathBuf),

    /// A `stop` element has no `linearGradient`/`radialGradient` ancestor.
    ///
    /// This is a structural precondition of valid SVG gradients.
    MissingGradientAncestor {
        /// Source line of the `stop` element, when known.
        line: Option<u32>,
    },

    /// The group wrapping a gradient already carries a different class.
    ///
    /// Multiple classes per gradient group are unsupported.
    ConflictingGradientClass {
        /// Source line of the `stop` element, when known.
        line: Option<u32>,
        /// The class the group already uses.
        in_use: String,
        /// The class that was requested.
        requested: String,
    },
}

impl Error {
    /// Returns the process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match *self {
            Error::InvalidArguments(_) => 1,
            Error::NoInputFiles => 2,
            Error::NoCommands => 3,
            Error::OpenFailed(_) => 4,
            Error::WriteOpenFailed(_) => 5,
            Error::ParsingFailed(_, _) => 6,
            Error::WritingFailed(_) => 7,
            Error::BackupFailed(_) => 8,
            Error::MissingGradientAncestor { .. } => 9,
            Error::ConflictingGradientClass { .. } => 9,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidArguments(ref msg) => {
                write!(f, "{}", msg)
            }
            Error::NoInputFiles => {
                write!(f, "at least one input file must be provided")
            }
            Error::NoCommands => {
                write!(f, "at least one command must be provided")
            }
            Error::OpenFailed(ref path) => {
                write!(f, "cannot open '{}' for reading", path.display())
            }
            Error::WriteOpenFailed(ref path) => {
                write!(f, "cannot open '{}' for writing", path.display())
            }
            Error::ParsingFailed(ref path, ref e) => {
                write!(f, "cannot parse '{}' cause {}", path.display(), e)
            }
            Error::WritingFailed(ref path) => {
                write!(f, "cannot write to '{}'", path.display())
            }
            Error::BackupFailed(ref path) => {
                write!(f, "cannot create a backup at '{}'", path.display())
            }
            Error::MissingGradientAncestor { line } => match line {
                Some(line) => write!(
                    f,
                    "the 'stop' element at line {} is not inside a gradient",
                    line
                ),
                None => write!(f, "a 'stop' element is not inside a gradient"),
            },
            Error::ConflictingGradientClass {
                line,
                ref in_use,
                ref requested,
            } => {
                match line {
                    Some(line) => write!(f, "line {}: ", line)?,
                    None => {}
                }
                write!(
                    f,
                    "the gradient group already uses the class '{}' \
                     and cannot also use '{}'",
                    in_use, requested
                )
            }
        }
    }
}

impl std::error::Error for Error {}
