// crates/lf_foundation/src/memory.rs

//! Memory alignment utilities.
//!
//! Provides a truly aligned AlignedVec backed by std::alloc for SIMD-friendly
//! access to the lattice buffers. Includes parallel iterators and Serde
//! support.
//!
//! Lattice buffers are allocated exactly once at simulation setup and never
//! grow, so this container is deliberately fixed-capacity: there is no push
//! or resize. Allocation failure routes through [`handle_alloc_error`] — a
//! partially allocated lattice cannot simulate anything.

use bytemuck::Pod;
use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// Alignment requirement.
pub trait Alignment: 'static {
    /// Requested byte alignment.
    const ALIGN: usize;
}

/// Cache-line alignment (64-byte, also AVX-512 friendly).
#[derive(Debug, Clone, Copy)]
pub struct CacheAlign;
impl Alignment for CacheAlign {
    const ALIGN: usize = 64;
}

/// 对齐连续缓冲区（定长）
#[derive(Debug)]
pub struct AlignedVec<T: Pod + Default, A: Alignment = CacheAlign> {
    ptr: *mut T,
    len: usize,
    _align: PhantomData<A>,
}

unsafe impl<T: Pod + Default + Send, A: Alignment> Send for AlignedVec<T, A> {}
unsafe impl<T: Pod + Default + Sync, A: Alignment> Sync for AlignedVec<T, A> {}

impl<T: Pod + Default, A: Alignment> AlignedVec<T, A> {
    /// Create zero-initialized buffer of length len.
    pub fn zeros(len: usize) -> Self {
        if len == 0 {
            return Self {
                ptr: std::ptr::null_mut(),
                len: 0,
                _align: PhantomData,
            };
        }

        let layout = Self::layout_for(len);
        let ptr = unsafe { alloc_zeroed(layout) as *mut T };
        if ptr.is_null() {
            handle_alloc_error(layout);
        }

        debug_assert_eq!((ptr as usize) % layout.align(), 0, "Alignment guarantee violated");

        Self {
            ptr,
            len,
            _align: PhantomData,
        }
    }

    /// Re-align from an existing Vec.
    pub fn from_vec(vec: Vec<T>) -> Self {
        let len = vec.len();
        let mut aligned = Self::zeros(len);
        aligned.as_mut_slice().copy_from_slice(&vec);
        aligned
    }

    /// 并行只读迭代器
    pub fn par_iter(&self) -> rayon::slice::Iter<'_, T>
    where
        T: Sync,
    {
        self.as_slice().par_iter()
    }

    /// 并行可变迭代器
    pub fn par_iter_mut(&mut self) -> rayon::slice::IterMut<'_, T>
    where
        T: Send + Sync,
    {
        self.as_mut_slice().par_iter_mut()
    }

    /// Parallel fill.
    pub fn par_fill(&mut self, value: T)
    where
        T: Copy + Send + Sync,
    {
        self.as_mut_slice().par_iter_mut().for_each(|v| *v = value);
    }

    /// Sequential fill.
    pub fn fill(&mut self, value: T)
    where
        T: Copy,
    {
        self.as_mut_slice().fill(value);
    }

    /// Raw pointer.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Mutable raw pointer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// Length.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Empty check.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Immutable slice view.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.len == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
        }
    }

    /// Mutable slice view.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.len == 0 {
            &mut []
        } else {
            unsafe { std::slice::from_raw_parts_mut(self.ptr, self.len) }
        }
    }

    /// Convert into Vec.
    pub fn into_vec(self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    #[inline]
    fn layout_for(len: usize) -> Layout {
        Layout::from_size_align(
            len * std::mem::size_of::<T>(),
            A::ALIGN.max(std::mem::align_of::<T>()),
        )
        .expect("Invalid layout")
    }
}

impl<T: Pod + Default, A: Alignment> Deref for AlignedVec<T, A> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T: Pod + Default, A: Alignment> DerefMut for AlignedVec<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: Pod + Default, A: Alignment> std::ops::Index<usize> for AlignedVec<T, A> {
    type Output = T;
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Pod + Default, A: Alignment> std::ops::IndexMut<usize> for AlignedVec<T, A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Pod + Default, A: Alignment> Clone for AlignedVec<T, A> {
    fn clone(&self) -> Self {
        let mut new_vec = Self::zeros(self.len);
        new_vec.as_mut_slice().copy_from_slice(self.as_slice());
        new_vec
    }
}

impl<T: Pod + Default, A: Alignment> Default for AlignedVec<T, A> {
    fn default() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
            len: 0,
            _align: PhantomData,
        }
    }
}

impl<T: Pod + Default, A: Alignment> Drop for AlignedVec<T, A> {
    fn drop(&mut self) {
        if self.ptr.is_null() || self.len == 0 {
            return;
        }
        let layout = Self::layout_for(self.len);
        unsafe { dealloc(self.ptr as *mut u8, layout) };
    }
}

impl<T: Pod + Default, A: Alignment> FromIterator<T> for AlignedVec<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let vec: Vec<T> = iter.into_iter().collect();
        Self::from_vec(vec)
    }
}

impl<T: Pod + Default + Serialize, A: Alignment> Serialize for AlignedVec<T, A> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_slice().serialize(serializer)
    }
}

impl<'de, T: Pod + Default + Deserialize<'de>, A: Alignment> Deserialize<'de> for AlignedVec<T, A> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let vec = Vec::<T>::deserialize(deserializer)?;
        Ok(Self::from_vec(vec))
    }
}
