use libsqlite3_sys::{sqlite3, sqlite3_stmt, sqlite3_value};
use std::ops::{Deref, DerefMut};

pub(crate) trait NullCheck {
    fn is_null(&self) -> bool;
}

impl<T> NullCheck for *mut T {
    fn is_null(&self) -> bool {
        (*self as *const T).is_null()
    }
}

/// Owner of a sqlite resource, released exactly once by `dealloc` on drop (unless null).
#[derive(Debug)]
pub(crate) struct CBox<T: NullCheck> {
    pub(crate) ptr: T,
    dealloc: fn(T),
}

impl<T: NullCheck> CBox<T> {
    pub fn new(ptr: T, dealloc: fn(T)) -> Self {
        Self { ptr, dealloc }
    }
}

impl<T: NullCheck> Drop for CBox<T> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe {
                (self.dealloc)(std::ptr::read(&self.ptr as *const T));
            }
        }
    }
}

impl<T: NullCheck> Deref for CBox<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.ptr
    }
}

impl<T: NullCheck> DerefMut for CBox<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.ptr
    }
}

// A handle may move to another thread as long as only one thread uses it, the owners never
// hand out shared access across threads.
unsafe impl Send for CBox<*mut sqlite3> {}
unsafe impl Send for CBox<*mut sqlite3_stmt> {}
unsafe impl Send for CBox<*mut sqlite3_value> {}

#[cfg(test)]
mod tests {
    use crate::cbox::CBox;
    use std::{
        ptr,
        sync::atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn cbox_raw_pointer() {
        static DESTROYED: AtomicUsize = AtomicUsize::new(0);
        let mut v = 123;
        let ptr: *mut i32 = &mut v;
        {
            let ptr = CBox::new(ptr::null_mut::<i32>(), |_| {
                DESTROYED.fetch_add(1, Ordering::Relaxed);
            });
            assert_eq!(*ptr, ptr::null_mut());
        }
        assert_eq!(DESTROYED.load(Ordering::Relaxed), 0);
        {
            let ptr = CBox::new(ptr, |_| {
                DESTROYED.fetch_add(1, Ordering::Relaxed);
            });
            assert_eq!(unsafe { **ptr }, 123);
            assert_eq!(DESTROYED.load(Ordering::Relaxed), 0);
        }
        assert_eq!(DESTROYED.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn cbox_out_parameter() {
        static DESTROYED: AtomicUsize = AtomicUsize::new(0);
        let mut v = 7;
        let mut boxed = CBox::new(ptr::null_mut::<i32>(), |_| {
            DESTROYED.fetch_add(1, Ordering::Relaxed);
        });
        // Filled the way sqlite3_open_v2 fills its out parameter
        *boxed = &mut v;
        assert_eq!(unsafe { **boxed }, 7);
        drop(boxed);
        assert_eq!(DESTROYED.load(Ordering::Relaxed), 1);
    }
}
