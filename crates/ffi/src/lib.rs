// ABOUTME: C FFI bindings for the tidymail sanitizer.
// ABOUTME: Exposes arena-allocated clean_html results to non-Rust consumers such as the e-mail pipeline.

use std::panic;
use std::ptr;

use bumpalo::Bump;
use tidymail_sanitize::{clean_html, CleanError, Options};

/// FFI version constant for ABI compatibility checking.
pub const TIDYMAIL_FFI_VERSION: u32 = 1;

/// Returns the FFI ABI version number.
/// Consumers should check this matches their expected version.
#[no_mangle]
pub extern "C" fn tidymail_ffi_version() -> u32 {
    TIDYMAIL_FFI_VERSION
}

// ----------------------------------------------------------------------------
// Error handling
// ----------------------------------------------------------------------------

/// Error codes matching the C ABI TErrorCode enum.
#[repr(u32)]
pub enum TErrorCode {
    Ok = 0,
    Invalid = 1,
    Dom = 2,
    Internal = 255,
}

/// UTF-8 string slice for FFI. Not null-terminated.
/// Consumer must not mutate or free it.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct TString {
    pub data: *const u8,
    pub len: usize,
}

impl TString {
    /// Creates an empty TString with null pointer and zero length.
    pub const fn empty() -> Self {
        TString {
            data: ptr::null(),
            len: 0,
        }
    }

    /// Points at a string with static lifetime.
    const fn from_static(s: &'static str) -> Self {
        TString {
            data: s.as_ptr(),
            len: s.len(),
        }
    }
}

impl Default for TString {
    fn default() -> Self {
        Self::empty()
    }
}

/// FFI error struct matching C ABI TError.
///
/// `message` always points at static storage, so it stays valid after the
/// call returns and must not be freed.
#[repr(C)]
pub struct TError {
    pub code: u32,
    pub message: TString,
}

impl TError {
    /// Creates a success (T_OK) error with empty message.
    pub const fn ok() -> Self {
        TError {
            code: TErrorCode::Ok as u32,
            message: TString::empty(),
        }
    }
}

// ----------------------------------------------------------------------------
// Options
// ----------------------------------------------------------------------------

/// Sanitizer options matching the C ABI TCleanOptions struct.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct TCleanOptions {
    pub remove_comments: bool,
    pub remove_empty_elements: bool,
    pub preserve_structure: bool,
    pub extract_text_only: bool,
}

impl From<TCleanOptions> for Options {
    fn from(o: TCleanOptions) -> Self {
        Options {
            remove_comments: o.remove_comments,
            remove_empty_elements: o.remove_empty_elements,
            preserve_structure: o.preserve_structure,
            extract_text_only: o.extract_text_only,
        }
    }
}

impl From<Options> for TCleanOptions {
    fn from(o: Options) -> Self {
        TCleanOptions {
            remove_comments: o.remove_comments,
            remove_empty_elements: o.remove_empty_elements,
            preserve_structure: o.preserve_structure,
            extract_text_only: o.extract_text_only,
        }
    }
}

/// Returns the default options.
#[no_mangle]
pub extern "C" fn tidymail_default_options() -> TCleanOptions {
    Options::default().into()
}

// ----------------------------------------------------------------------------
// Arena
// ----------------------------------------------------------------------------

/// Arena holding a clean result.
/// The output bytes live in the bump allocator.
pub struct TCleanArena {
    #[allow(dead_code)]
    bump: Bump,
    output: TString,
}

/// Copies a string into the arena and returns a TString pointing to it.
fn copy_str_to_arena(bump: &Bump, s: &str) -> TString {
    if s.is_empty() {
        return TString::empty();
    }
    let bytes = bump.alloc_slice_copy(s.as_bytes());
    TString {
        data: bytes.as_ptr(),
        len: bytes.len(),
    }
}

/// Maps a CleanError to an error code and a static message.
fn map_error(err: &CleanError) -> (u32, &'static str) {
    match err {
        CleanError::InvalidOptions(_) => (TErrorCode::Invalid as u32, "invalid options"),
        // clean_html always runs the bundled provider with fixed selectors,
        // so every remaining variant is a failure inside the DOM layer.
        _ => (TErrorCode::Dom as u32, "DOM provider failed"),
    }
}

/// Sets the out_err with the given code and static message.
/// If out_err is null, this is a no-op.
unsafe fn set_error(out_err: *mut TError, code: u32, message: &'static str) {
    if !out_err.is_null() {
        (*out_err).code = code;
        (*out_err).message = TString::from_static(message);
    }
}

/// Sets out_err to success (T_OK with empty message).
/// If out_err is null, this is a no-op.
unsafe fn set_success(out_err: *mut TError) {
    if !out_err.is_null() {
        *out_err = TError::ok();
    }
}

// ----------------------------------------------------------------------------
// Clean FFI functions
// ----------------------------------------------------------------------------

/// Cleans an HTML fragment. Returns an arena holding the output.
///
/// # Arguments
/// * `html` - HTML content bytes (UTF-8); may be null only when `html_len` is 0
/// * `html_len` - Length of HTML in bytes
/// * `options` - Options to apply, or null for the defaults
/// * `out_err` - Output error struct (may be null)
///
/// # Returns
/// Pointer to TCleanArena on success, null on failure.
/// On failure, out_err (if non-null) contains error details.
///
/// # Safety
/// `html` must point to `html_len` readable bytes. `options`, when non-null,
/// must point to a valid TCleanOptions.
/// Caller must free the returned arena via tidymail_free_clean.
#[no_mangle]
pub unsafe extern "C" fn tidymail_clean_html(
    html: *const u8,
    html_len: usize,
    options: *const TCleanOptions,
    out_err: *mut TError,
) -> *mut TCleanArena {
    if html.is_null() && html_len != 0 {
        set_error(out_err, TErrorCode::Invalid as u32, "html is null");
        return ptr::null_mut();
    }

    let html_str = if html_len == 0 {
        ""
    } else {
        let html_slice = std::slice::from_raw_parts(html, html_len);
        match std::str::from_utf8(html_slice) {
            Ok(s) => s,
            Err(_) => {
                set_error(out_err, TErrorCode::Invalid as u32, "html is not valid UTF-8");
                return ptr::null_mut();
            }
        }
    };

    let opts: Options = if options.is_null() {
        Options::default()
    } else {
        (*options).into()
    };

    // Catch panics to avoid unwinding across FFI boundary
    let result = panic::catch_unwind(|| clean_html(html_str, &opts));

    match result {
        Ok(Ok(cleaned)) => {
            let bump = Bump::new();
            let output = copy_str_to_arena(&bump, &cleaned);
            let arena = Box::new(TCleanArena { bump, output });
            set_success(out_err);
            Box::into_raw(arena)
        }
        Ok(Err(err)) => {
            let (code, msg) = map_error(&err);
            set_error(out_err, code, msg);
            ptr::null_mut()
        }
        Err(_) => {
            set_error(
                out_err,
                TErrorCode::Internal as u32,
                "internal panic during cleaning",
            );
            ptr::null_mut()
        }
    }
}

/// Returns the output string held by the arena.
///
/// # Safety
/// The arena pointer must be valid or null.
/// The returned string is valid until tidymail_free_clean is called.
#[no_mangle]
pub unsafe extern "C" fn tidymail_clean_result(arena: *const TCleanArena) -> TString {
    if arena.is_null() {
        return TString::empty();
    }
    (*arena).output
}

/// Frees the clean arena and all associated allocations.
///
/// # Safety
/// The arena pointer must be valid and must have been returned by tidymail_clean_html.
/// After this call, the arena pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn tidymail_free_clean(arena: *mut TCleanArena) {
    if !arena.is_null() {
        drop(Box::from_raw(arena));
    }
}
