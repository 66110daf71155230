use crate::{Error, Result, Type};
use libsqlite3_sys::*;
use std::{marker::PhantomData, slice, str};

/// Borrowed view of a native `sqlite3_value`.
///
/// This is what [`FromSql`](crate::FromSql) decodes from. It is valid for `'a`, the borrow of
/// whoever owns the native value (a row snapshot). Reading the content as text or as bytes
/// may make sqlite convert the value in place, the methods doing that consume the view so
/// that a slice obtained earlier can never be invalidated by a later read.
pub struct ValueRef<'a> {
    raw: *mut sqlite3_value,
    data_type: Type,
    _owner: PhantomData<&'a ()>,
}

/// Storage class sqlite currently reports for `raw`.
///
/// Reading a value as text or bytes may change the class sqlite reports afterwards (a blob
/// read as text becomes text), read it once when the value is captured.
///
/// # Safety
/// `raw` must point to a live `sqlite3_value`.
pub unsafe fn native_type(raw: *mut sqlite3_value) -> Type {
    let tag = unsafe { sqlite3_value_type(raw) };
    Type::from_raw(tag).unwrap_or_else(|| {
        log::error!("Unexpected sqlite value type {tag}, treating it as NULL");
        Type::Null
    })
}

impl<'a> ValueRef<'a> {
    /// `data_type` is the storage class the value had when it was captured, see
    /// [`native_type`].
    ///
    /// # Safety
    /// `raw` must point to a protected `sqlite3_value` that stays alive and is not read by
    /// anything else for the whole `'a`.
    pub unsafe fn from_raw(raw: *mut sqlite3_value, data_type: Type) -> Self {
        Self {
            raw,
            data_type,
            _owner: PhantomData,
        }
    }

    /// Storage class recorded at capture time, earlier reads as text or bytes do not change it.
    pub fn data_type(&self) -> Type {
        self.data_type
    }

    pub fn is_null(&self) -> bool {
        self.data_type() == Type::Null
    }

    /// Value as a 64-bit integer, with sqlite's own conversion rules for other types.
    pub fn as_i64(&self) -> i64 {
        unsafe { sqlite3_value_int64(self.raw) }
    }

    /// Value as a double, with sqlite's own conversion rules for other types.
    pub fn as_f64(&self) -> f64 {
        unsafe { sqlite3_value_double(self.raw) }
    }

    /// Value rendered as text by sqlite. Fails on NULL and on non UTF-8 content.
    pub fn into_text(self) -> Result<&'a str> {
        unsafe {
            let ptr = sqlite3_value_text(self.raw);
            if ptr.is_null() {
                return Err(if self.is_null() {
                    Error::decode::<str>("unexpected NULL")
                } else {
                    Error::decode::<str>("sqlite could not produce the text (out of memory)")
                });
            }
            // The length must be read after the conversion to text
            let len = sqlite3_value_bytes(self.raw) as usize;
            str::from_utf8(slice::from_raw_parts(ptr, len))
                .map_err(|e| Error::decode::<str>(format!("invalid UTF-8 text ({e})")))
        }
    }

    /// Content of the value as raw bytes. Empty for NULL and for zero-length blobs.
    pub fn into_bytes(self) -> &'a [u8] {
        unsafe {
            let len = sqlite3_value_bytes(self.raw) as usize;
            if len == 0 {
                return &[];
            }
            let ptr = sqlite3_value_blob(self.raw) as *const u8;
            if ptr.is_null() {
                return &[];
            }
            // The pointer is fetched after the length, read the length again in case the
            // representation changed
            slice::from_raw_parts(ptr, sqlite3_value_bytes(self.raw) as usize)
        }
    }
}
