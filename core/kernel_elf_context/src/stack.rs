//! A bounds-checked writer for the initial program stack.
//!
//! The stack grows downwards: every push lowers the stack pointer by one
//! machine word and stores the value there. Nothing is ever popped.

use core::slice;

use zerocopy::IntoBytes;

use crate::error::{ContextError, ContextResult};

/// Size in bytes of one stack cell.
pub const WORD: usize = core::mem::size_of::<usize>();

/// Alignment of the stack pointer on program entry.
pub const STACK_ALIGN: usize = 16;

/// Pushes machine words into a caller-owned stack region.
pub struct StackWriter<'a> {
    region: &'a mut [usize],
    /// Index of the lowest written cell, `region.len()` while empty.
    cursor: usize,
}

impl<'a> StackWriter<'a> {
    /// Creates a writer whose stack pointer starts at the end of `region`.
    pub fn new(region: &'a mut [usize]) -> Self {
        let cursor = region.len();
        Self { region, cursor }
    }

    /// Creates a writer over `words` machine words starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be valid for writes of `words` words for `'a`, properly
    /// aligned, and not accessed through any other pointer meanwhile.
    pub unsafe fn from_raw(base: *mut usize, words: usize) -> Self {
        Self::new(unsafe { slice::from_raw_parts_mut(base, words) })
    }

    /// Lowest address of the region.
    pub fn base(&self) -> usize {
        self.region.as_ptr() as usize
    }

    /// Highest address of the region (one past the last cell).
    pub fn top(&self) -> usize {
        self.base() + self.region.len() * WORD
    }

    /// Current stack pointer.
    pub fn sp(&self) -> usize {
        self.base() + self.cursor * WORD
    }

    /// Number of words pushed so far.
    pub fn used(&self) -> usize {
        self.region.len() - self.cursor
    }

    /// Number of words that can still be pushed.
    pub fn remaining(&self) -> usize {
        self.cursor
    }

    /// Pushes a single word.
    pub fn push_word(&mut self, word: usize) -> ContextResult {
        if self.cursor == 0 {
            return Err(ContextError::StackOverflow);
        }
        self.cursor -= 1;
        self.region[self.cursor] = word;
        Ok(())
    }

    /// Pushes `words` last element first, so that reading forward from the
    /// resulting stack pointer yields them in their original order.
    pub fn push_words<I>(&mut self, words: I) -> ContextResult
    where
        I: IntoIterator<Item = usize>,
        I::IntoIter: DoubleEndedIterator,
    {
        words.into_iter().rev().try_for_each(|w| self.push_word(w))
    }

    /// The words written so far, starting at the stack pointer.
    pub fn written(&self) -> &[usize] {
        &self.region[self.cursor..]
    }

    /// The written part of the stack as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.written().as_bytes()
    }
}

/// Addresses of each part of a finished initial stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackLayout {
    /// Stack pointer handed to the program; `argc` lives here.
    pub sp: usize,
    /// The argument count the program sees.
    pub argc: usize,
    /// First argument pointer.
    pub argv: usize,
    /// First environment pointer.
    pub envp: usize,
    /// First auxiliary vector entry.
    pub auxv: usize,
    /// Stack pointer before anything was pushed.
    pub top: usize,
}
