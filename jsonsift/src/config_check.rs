// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! The host integer width is chosen with Cargo features; exactly one must be
//! enabled.

#[cfg(not(any(feature = "int32", feature = "int64")))]
compile_error!("No host integer width selected: choose one of 'int32' or 'int64'");

#[cfg(all(feature = "int32", feature = "int64"))]
compile_error!(
    "Cannot enable both 'int32' and 'int64' features simultaneously: choose one host integer width"
);
