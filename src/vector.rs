use std::alloc::{self, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// Alignment of every buffer allocation, in bytes (AVX register width).
pub const SIMD_ALIGN: usize = 32;

/// A growable, 32-byte-aligned buffer with packed-array semantics.
///
/// `packed_add` appends in amortized O(1); `packed_remove(i)` overwrites
/// slot `i` with the last element and shrinks by one, in O(1). Removal is
/// *not* order-preserving: an index into this buffer is a transient
/// "packed id" that may be reassigned by any removal. Stable handles must
/// go through [`IdTracker`](crate::tracker::IdTracker).
pub struct AlignedVec<T: Copy> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
}

unsafe impl<T: Copy + Send> Send for AlignedVec<T> {}
unsafe impl<T: Copy + Sync> Sync for AlignedVec<T> {}

impl<T: Copy> AlignedVec<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
        }
    }

    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        let mut buf = Self::new();
        if cap > 0 {
            buf.grow_to(cap);
        }
        buf
    }

    fn layout(cap: usize) -> Layout {
        const {
            assert!(size_of::<T>() > 0, "zero-sized elements are not supported");
        }
        let align = if align_of::<T>() > SIMD_ALIGN {
            align_of::<T>()
        } else {
            SIMD_ALIGN
        };
        Layout::from_size_align(cap * size_of::<T>(), align).expect("allocation size overflow")
    }

    fn grow_to(&mut self, new_cap: usize) {
        debug_assert!(new_cap > self.cap);
        let new_layout = Self::layout(new_cap);
        let raw = unsafe { alloc::alloc(new_layout) };
        let Some(new_ptr) = NonNull::new(raw.cast::<T>()) else {
            alloc::handle_alloc_error(new_layout);
        };
        if self.cap > 0 {
            unsafe {
                std::ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
                alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), Self::layout(self.cap));
            }
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// Append a value, growing the buffer if necessary.
    pub fn packed_add(&mut self, value: T) {
        if self.len == self.cap {
            let new_cap = if self.cap == 0 { 4 } else { self.cap * 2 };
            self.grow_to(new_cap);
        }
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Remove slot `i` by overwriting it with the last element.
    ///
    /// The element previously at the last packed index is renumbered to
    /// `i`. Returns the removed value.
    ///
    /// # Panics
    /// If `i` is out of range.
    pub fn packed_remove(&mut self, i: usize) -> T {
        assert!(i < self.len, "bad packed id: {i} >= {}", self.len);
        let last = self.len - 1;
        let slice = self.as_mut_slice();
        let removed = slice[i];
        slice[i] = slice[last];
        self.len = last;
        removed
    }

    /// Resize to `new_len`, filling any new slots with `fill`.
    pub fn resize(&mut self, new_len: usize, fill: T) {
        if new_len > self.cap {
            self.grow_to(new_len);
        }
        for i in self.len..new_len {
            unsafe { self.ptr.as_ptr().add(i).write(fill) };
        }
        self.len = new_len;
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Set every live slot to `value`.
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub const fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy> Drop for AlignedVec<T> {
    fn drop(&mut self) {
        if self.cap > 0 {
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), Self::layout(self.cap)) };
        }
    }
}

impl<T: Copy> Deref for AlignedVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy> DerefMut for AlignedVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Copy> Default for AlignedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> Clone for AlignedVec<T> {
    fn clone(&self) -> Self {
        let mut buf = Self::with_capacity(self.len.max(1));
        unsafe {
            std::ptr::copy_nonoverlapping(self.ptr.as_ptr(), buf.ptr.as_ptr(), self.len);
        }
        buf.len = self.len;
        buf
    }
}

impl<T: Copy + PartialEq> PartialEq for AlignedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for AlignedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Copy> FromIterator<T> for AlignedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut buf = Self::with_capacity(iter.size_hint().0.max(1));
        for value in iter {
            buf.packed_add(value);
        }
        buf
    }
}

impl<T: Copy> Extend<T> for AlignedVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.packed_add(value);
        }
    }
}

#[cfg(feature = "serde")]
impl<T: Copy + serde::Serialize> serde::Serialize for AlignedVec<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Copy + serde::Deserialize<'de>> serde::Deserialize<'de> for AlignedVec<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        Ok(values.into_iter().collect())
    }
}
