//! Diagnostic capture for libfyaml errors.
//!
//! This module provides a wrapper around libfyaml's diagnostic system to capture
//! error messages instead of printing them to stderr. Collected errors are then
//! converted into rich Rust error types with line/column information.

use crate::error::{Error, ParseError};
use fyaml_sys::*;
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::ptr;

/// No-op output function that suppresses all diagnostic output to stderr.
///
/// This function is called by libfyaml when it wants to output diagnostic messages.
/// By providing this callback, we prevent any output to stderr while still collecting
/// errors via `fy_diag_errors_iterate`.
unsafe extern "C" fn silent_output(
    _diag: *mut fy_diag,
    _user: *mut c_void,
    _buf: *const c_char,
    _len: usize,
) {
    // Intentionally empty - suppress all output
}

/// RAII wrapper around libfyaml's diagnostic system.
///
/// Creates a diagnostic handler that collects errors instead of printing to stderr.
/// When dropped, the diagnostic handler is destroyed.
pub(crate) struct Diag {
    ptr: *mut fy_diag,
}

impl Diag {
    /// Creates a new diagnostic handler that collects errors silently.
    pub fn new() -> Option<Self> {
        let cfg = fy_diag_cfg {
            fp: ptr::null_mut(),
            output_fn: Some(silent_output), // Silent callback - no stderr output
            user: ptr::null_mut(),
            level: FYET_ERROR,
            module_mask: u32::MAX, // All modules
            _bitfield_align_1: [],
            _bitfield_1: fy_diag_cfg::new_bitfield_1(
                false, // show_source
                false, // show_position
                false, // show_type
                false, // show_module
                false, // color_diag (colorize)
            ),
            source_width: 0,
            position_width: 0,
            type_width: 0,
            module_width: 0,
        };

        let ptr = unsafe { fy_diag_create(&cfg) };
        if ptr.is_null() {
            return None;
        }

        // Enable error collection so we can iterate them later
        unsafe { fy_diag_set_collect_errors(ptr, true) };

        Some(Self { ptr })
    }

    /// Returns the raw pointer for use in parse configurations.
    pub fn as_ptr(&self) -> *mut fy_diag {
        self.ptr
    }

    /// Returns the first collected error, if any.
    ///
    /// This is more efficient than `collect_errors()` when you only need the first error,
    /// as it doesn't allocate a Vec.
    pub fn first_error(&self) -> Option<ParseError> {
        let mut prev: *mut std::ffi::c_void = ptr::null_mut();
        let err = unsafe { fy_diag_errors_iterate(self.ptr, &mut prev) };
        if err.is_null() {
            None
        } else {
            Some(unsafe { parse_error_from_diag_error(&*err) })
        }
    }

    /// Returns the first collected error as an Error, or a fallback if none collected.
    ///
    /// This is optimized to avoid allocating a Vec - it only retrieves the first error.
    pub fn first_error_or(&self, fallback_msg: &'static str) -> Error {
        self.first_error()
            .map(Error::ParseError)
            .unwrap_or(Error::Parse(fallback_msg))
    }

    /// Collects all errors into a vector of ParseError.
    ///
    /// Use [`first_error()`](Self::first_error) if you only need the first error.
    #[allow(dead_code)]
    pub fn collect_errors(&self) -> Vec<ParseError> {
        let mut errors = Vec::new();
        let mut prev: *mut std::ffi::c_void = ptr::null_mut();

        loop {
            let err = unsafe { fy_diag_errors_iterate(self.ptr, &mut prev) };
            if err.is_null() {
                break;
            }

            let parse_err = unsafe { parse_error_from_diag_error(&*err) };
            errors.push(parse_err);
        }

        errors
    }
}

impl Drop for Diag {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            // Use fy_diag_unref instead of fy_diag_destroy to properly handle
            // reference counting. libfyaml may have incremented the refcount
            // when we passed the diag to a parse config.
            unsafe { fy_diag_unref(self.ptr) };
        }
    }
}

/// Returns the first error from an optional Diag, or a fallback Parse error.
///
/// This consolidates the common pattern of extracting an error from a Diag
/// that might have failed to create (OOM).
pub(crate) fn diag_error(diag: Option<Diag>, fallback_msg: &'static str) -> Error {
    diag.map(|d| d.first_error_or(fallback_msg))
        .unwrap_or(Error::Parse(fallback_msg))
}

/// Converts a libfyaml `fy_diag_error` to our `ParseError`.
///
/// # Safety
/// The `err` pointer must be valid and point to a properly initialized `fy_diag_error`.
unsafe fn parse_error_from_diag_error(err: &fy_diag_error) -> ParseError {
    let message = if err.msg.is_null() {
        "unknown error".to_string()
    } else {
        CStr::from_ptr(err.msg).to_string_lossy().into_owned()
    };

    // Line and column are 0-based in libfyaml, convert to 1-based for users
    // -1 means "not available"
    let line = if err.line >= 0 {
        Some((err.line + 1) as u32)
    } else {
        None
    };

    let column = if err.column >= 0 {
        Some((err.column + 1) as u32)
    } else {
        None
    };

    ParseError {
        message,
        line,
        column,
    }
}
