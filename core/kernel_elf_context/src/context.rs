//! Execution contexts a program is started from.
//!
//! The builder only needs to reset a register file and point it at the new
//! stack and the entry point ([`EntryContext`]). Switching to the context is
//! the job of an architecture specific primitive ([`ContextActivate`]).

/// A register file snapshot that can be prepared for a program entry.
pub trait EntryContext {
    /// Clears every general purpose register, then sets the stack pointer to
    /// `sp` and the instruction pointer to `entry`.
    fn init_entry(&mut self, sp: usize, entry: usize);

    /// The stack pointer the context resumes with.
    fn stack_pointer(&self) -> usize;

    /// The instruction pointer the context resumes at.
    fn instruction_pointer(&self) -> usize;

    /// The register the C runtime's `_start` hands to `atexit()` when it is
    /// non-zero (the dynamic linker's finalizer).
    ///
    /// It must read zero on entry, otherwise the program calls into garbage
    /// when `main` returns.
    fn exit_callback(&self) -> usize;
}

/// Switches the current CPU to a prepared context.
pub trait ContextActivate {
    /// Restores the register file and jumps to the saved instruction pointer.
    ///
    /// # Safety
    ///
    /// The instruction pointer must address mapped, executable code and the
    /// stack pointer a mapped, writable stack with at least one free word
    /// below it. Nothing on the current stack is ever released.
    unsafe fn activate(&mut self) -> !;
}
