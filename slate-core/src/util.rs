use std::{
    ffi::{CStr, c_char},
    ptr,
};

/// Copy the message behind a C string pointer returned by sqlite.
///
/// Null pointers and invalid UTF-8 produce a fixed placeholder instead of failing, error
/// paths must never produce other errors.
pub fn error_message_from_ptr(ptr: *const c_char) -> String {
    unsafe {
        if ptr != ptr::null() {
            CStr::from_ptr(ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
                .to_string()
        } else {
            "Unknown error (could not extract the error message)".to_string()
        }
    }
}

/// Longest prefix of `value` not exceeding `max` bytes that ends on a char boundary.
pub fn truncate_at(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_at(&$query, 497).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}
