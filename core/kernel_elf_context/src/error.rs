use core::fmt;

/// The error kind returned while building an initial program context.
///
/// Every kind describes a broken precondition of the caller: there is no
/// way to retry, but reporting it lets the loader name what went wrong
/// before the kernel gives up on the program.
#[repr(i32)]
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ContextError {
    /// The stack region cannot hold another word.
    StackOverflow = 1,
    /// The argument vector does not even contain the program name.
    NoProgramName,
    /// The entry point lies outside the mapped image.
    EntryOutsideImage,
    /// The program header table lies outside the mapped image.
    PhdrOutsideImage,
}

impl ContextError {
    /// Returns the error description.
    pub fn as_str(&self) -> &'static str {
        use ContextError::*;
        match *self {
            StackOverflow => "Initial stack region exhausted",
            NoProgramName => "Missing program name in argv[0]",
            EntryOutsideImage => "Entry point outside of the loaded image",
            PhdrOutsideImage => "Program headers outside of the loaded image",
        }
    }

    /// Returns the error code value in `i32`.
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A specialized [`Result`] type with [`ContextError`] as the error type.
pub type ContextResult<T = ()> = Result<T, ContextError>;
