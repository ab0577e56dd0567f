// ABOUTME: Integration tests for the tidymail FFI clean functions.
// ABOUTME: Tests the C ABI for markup cleaning, text extraction, option handling, and input validation.

use std::ptr;
use std::slice;
use std::str;

use tidymail_ffi::{
    tidymail_clean_html, tidymail_clean_result, tidymail_default_options, tidymail_ffi_version,
    tidymail_free_clean, TCleanOptions, TError, TErrorCode, TString, TIDYMAIL_FFI_VERSION,
};

/// Helper to convert a TString to a &str for assertions.
unsafe fn tstring_to_str(ts: &TString) -> &str {
    if ts.data.is_null() || ts.len == 0 {
        return "";
    }
    let slice = slice::from_raw_parts(ts.data, ts.len);
    str::from_utf8(slice).unwrap_or("")
}

fn pending_error() -> TError {
    TError {
        code: TErrorCode::Internal as u32,
        message: TString::empty(),
    }
}

#[test]
fn test_version() {
    assert_eq!(tidymail_ffi_version(), TIDYMAIL_FFI_VERSION);
}

#[test]
fn test_clean_with_default_options() {
    let html = "<p class=\"x\" style=\"y\">a</p>\n<!-- c --><span></span>";

    unsafe {
        let mut err = pending_error();
        let arena = tidymail_clean_html(html.as_ptr(), html.len(), ptr::null(), &mut err);

        assert!(!arena.is_null(), "arena should not be null on success");
        assert_eq!(err.code, TErrorCode::Ok as u32);

        let out = tidymail_clean_result(arena);
        assert_eq!(tstring_to_str(&out), "<p>a</p>");

        tidymail_free_clean(arena);
    }
}

#[test]
fn test_clean_extract_text() {
    let html = "<div><script>evil()</script><p>Hello <b>World</b></p></div>";
    let opts = TCleanOptions {
        extract_text_only: true,
        ..tidymail_default_options()
    };

    unsafe {
        let mut err = pending_error();
        let arena = tidymail_clean_html(html.as_ptr(), html.len(), &opts, &mut err);
        assert!(!arena.is_null());
        assert_eq!(err.code, TErrorCode::Ok as u32);
        assert_eq!(tstring_to_str(&tidymail_clean_result(arena)), "Hello World");
        tidymail_free_clean(arena);
    }
}

#[test]
fn test_default_options_match_library() {
    let opts = tidymail_default_options();
    assert!(opts.remove_comments);
    assert!(opts.remove_empty_elements);
    assert!(!opts.preserve_structure);
    assert!(!opts.extract_text_only);
}

#[test]
fn test_empty_input_yields_empty_output() {
    unsafe {
        let mut err = pending_error();
        let arena = tidymail_clean_html(ptr::null(), 0, ptr::null(), &mut err);
        assert!(!arena.is_null());
        assert_eq!(err.code, TErrorCode::Ok as u32);
        let out = tidymail_clean_result(arena);
        assert!(out.data.is_null());
        assert_eq!(out.len, 0);
        tidymail_free_clean(arena);
    }
}

#[test]
fn test_null_html_with_length_is_invalid() {
    unsafe {
        let mut err = pending_error();
        let arena = tidymail_clean_html(ptr::null(), 5, ptr::null(), &mut err);
        assert!(arena.is_null());
        assert_eq!(err.code, TErrorCode::Invalid as u32);
        assert_eq!(tstring_to_str(&err.message), "html is null");
    }
}

#[test]
fn test_invalid_utf8() {
    let bytes: &[u8] = &[0x3c, 0x70, 0x3e, 0xff, 0xfe];

    unsafe {
        let mut err = pending_error();
        let arena = tidymail_clean_html(bytes.as_ptr(), bytes.len(), ptr::null(), &mut err);
        assert!(arena.is_null());
        assert_eq!(err.code, TErrorCode::Invalid as u32);
        assert!(tstring_to_str(&err.message).contains("UTF-8"));
    }
}

#[test]
fn test_null_out_err_is_allowed() {
    let html = "<b>x</b>";
    unsafe {
        let arena = tidymail_clean_html(html.as_ptr(), html.len(), ptr::null(), ptr::null_mut());
        assert!(!arena.is_null());
        tidymail_free_clean(arena);
        tidymail_free_clean(ptr::null_mut());
        assert_eq!(tidymail_clean_result(ptr::null()).len, 0);
    }
}
