// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel Status Reporting*
//!
//! Error types for the BLAS/LAPACK adapter, with a lossless mapping onto the
//! integer status convention used at the C boundary.
//!
//! ## Error Categories
//! - **Argument Errors**: shapes, strides or buffers the adapter rejects before dispatch
//! - **Illegal Values**: a vendor routine rejected one of its arguments (`info < 0`)
//! - **Singularity**: a zero pivot was met during factorisation (`info > 0`)
//! - **Non-convergence**: an iterative vendor routine gave up (`info > 0`)
//!
//! Status codes: `0` success, negative for an invalid argument at that position,
//! positive for an algorithm-specific singularity or non-convergence index.

use core::fmt;
use std::error::Error;

use crate::config::{
    STATUS_INVALID_ARGUMENT, STATUS_LAYOUT_MISMATCH, STATUS_NULL_POINTER, STATUS_OK,
};

/// Error type for all adapter operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Invalid shape, stride or leading dimension supplied by the caller.
    InvalidArguments(String),

    /// A buffer is shorter than the extent its shape parameters address.
    OutOfBounds(String),

    /// A paired-real buffer cannot be viewed as complex values
    /// (odd length or misaligned).
    LayoutMismatch(String),

    /// A pointer handed across the C boundary was null where data was required.
    NullPointer(String),

    /// The vendor routine rejected the argument at `position` (1-based).
    IllegalValue {
        routine: &'static str,
        position: i32,
    },

    /// `U(pivot, pivot)` is exactly zero. The factorisation completed but the
    /// factor is singular.
    Singular { routine: &'static str, pivot: i32 },

    /// The iterative routine failed to converge; `index` is the vendor's
    /// report of how many values did not converge.
    NoConvergence { routine: &'static str, index: i32 },
}

impl KernelError {
    /// Integer status code for this error under the adapter's convention.
    pub fn status(&self) -> i32 {
        match self {
            KernelError::InvalidArguments(_) | KernelError::OutOfBounds(_) => {
                STATUS_INVALID_ARGUMENT
            }
            KernelError::LayoutMismatch(_) => STATUS_LAYOUT_MISMATCH,
            KernelError::NullPointer(_) => STATUS_NULL_POINTER,
            KernelError::IllegalValue { position, .. } => -position.abs(),
            KernelError::Singular { pivot, .. } => *pivot,
            KernelError::NoConvergence { index, .. } => *index,
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
            KernelError::LayoutMismatch(msg) => write!(f, "Layout mismatch: {}", msg),
            KernelError::NullPointer(msg) => write!(f, "Null pointer: {}", msg),
            KernelError::IllegalValue { routine, position } => {
                write!(f, "{}: illegal value in argument {}", routine, position)
            }
            KernelError::Singular { routine, pivot } => {
                write!(f, "{}: factor is singular at pivot {}", routine, pivot)
            }
            KernelError::NoConvergence { routine, index } => {
                write!(f, "{}: failed to converge ({})", routine, index)
            }
        }
    }
}

impl Error for KernelError {}

/// Translates a LAPACK `info` value into a `Result`.
///
/// `positive` builds the error for `info > 0`, since its meaning depends on the routine.
#[inline]
pub fn check_info(
    routine: &'static str,
    info: i32,
    positive: fn(&'static str, i32) -> KernelError,
) -> Result<(), KernelError> {
    if info == 0 {
        return Ok(());
    }
    log::debug!("{} returned info = {}", routine, info);
    if info < 0 {
        Err(KernelError::IllegalValue {
            routine,
            position: -info,
        })
    } else {
        Err(positive(routine, info))
    }
}

/// `positive` handler for factorisations that report a zero pivot.
pub fn singular(routine: &'static str, pivot: i32) -> KernelError {
    KernelError::Singular { routine, pivot }
}

/// `positive` handler for iterative routines.
pub fn no_convergence(routine: &'static str, index: i32) -> KernelError {
    KernelError::NoConvergence { routine, index }
}

/// Converts a kernel result into the integer status handed across the C boundary.
#[inline]
pub fn to_status(res: Result<(), KernelError>) -> i32 {
    match res {
        Ok(()) => STATUS_OK,
        Err(e) => e.status(),
    }
}

/// Creates a formatted message for a buffer shorter than its shape requires.
///
/// # Arguments
/// * `fname` - Function name where the check failed
/// * `buffer` - Name of the buffer argument
/// * `need` - Number of elements the shape parameters address
/// * `have` - Actual buffer length
pub fn log_too_small(fname: &str, buffer: &str, need: usize, have: usize) -> String {
    format!(
        "{} => {} too small: need {} elements, have {}",
        fname, buffer, need, have
    )
}
