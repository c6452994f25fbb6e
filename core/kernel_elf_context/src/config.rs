//! Tunables for the values the kernel advertises to the program.

use crate::auxv::Platform;

/// Values placed in the auxiliary vector that do not come from the ELF
/// image, plus the stack alignment policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuxvConfig {
    /// `AT_PAGESZ`
    pub page_size: usize,
    /// `AT_CLKTCK`, 100 like most Linux hosts.
    pub clock_ticks: usize,
    /// `AT_HWCAP`
    pub hwcap: usize,
    /// Selects the `AT_PLATFORM` string.
    pub platform: Platform,
    /// Pad above the auxiliary vector so that the final stack pointer is
    /// aligned to [`STACK_ALIGN`](crate::STACK_ALIGN).
    pub align_stack: bool,
}

impl AuxvConfig {
    pub const DEFAULT: Self = Self {
        page_size: 4096,
        clock_ticks: 100,
        hwcap: 0,
        platform: Platform::current(),
        align_stack: true,
    };

    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub const fn with_clock_ticks(mut self, clock_ticks: usize) -> Self {
        self.clock_ticks = clock_ticks;
        self
    }

    pub const fn with_hwcap(mut self, hwcap: usize) -> Self {
        self.hwcap = hwcap;
        self
    }

    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub const fn with_align_stack(mut self, align_stack: bool) -> Self {
        self.align_stack = align_stack;
        self
    }
}

impl Default for AuxvConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
