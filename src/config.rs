// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Status Codes and Workspace Sizing*
//!
//! Compile-time constants shared by the Rust API and the C surface.

/// Successful return.
pub const STATUS_OK: i32 = 0;

/// The adapter rejected a shape, stride or buffer before reaching the vendor routine.
///
/// Kept far below any argument position a LAPACK routine can report.
pub const STATUS_INVALID_ARGUMENT: i32 = -1000;

/// A paired-real buffer could not be viewed as complex values.
pub const STATUS_LAYOUT_MISMATCH: i32 = -1001;

/// A required pointer argument was null.
pub const STATUS_NULL_POINTER: i32 = -1002;

/// Minimum workspace multiple of `n` handed to GEEV when the workspace
/// query reports less.
pub const GEEV_WORKSPACE_FACTOR: usize = 5;

/// Smallest workspace length ever handed to a LAPACK routine.
pub const MIN_WORKSPACE: usize = 1;
