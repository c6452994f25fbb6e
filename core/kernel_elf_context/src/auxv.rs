//! Auxiliary vector entries handed to the program on its initial stack.
//!
//! Details about auxiliary vectors are described in <https://articles.manugarg.com/aboutelfauxiliaryvectors.html>

use core::{ffi::CStr, fmt};

use zerocopy::{Immutable, IntoBytes};

use crate::{config::AuxvConfig, program::ProgramDescriptor};

/// Key of an auxiliary vector entry, using the Linux numbering.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, IntoBytes, Immutable)]
pub struct AuxType(usize);

impl AuxType {
    /// End of vector
    pub const NULL: Self = Self(0);
    /// Entry should be ignored
    pub const IGNORE: Self = Self(1);
    /// File descriptor of program
    pub const EXECFD: Self = Self(2);
    /// Program headers for program
    pub const PHDR: Self = Self(3);
    /// Size of program header entry
    pub const PHENT: Self = Self(4);
    /// Number of program headers
    pub const PHNUM: Self = Self(5);
    /// System page size
    pub const PAGESZ: Self = Self(6);
    /// Base address of interpreter
    pub const BASE: Self = Self(7);
    /// Flags
    pub const FLAGS: Self = Self(8);
    /// Entry point of program
    pub const ENTRY: Self = Self(9);
    /// Program is not ELF
    pub const NOTELF: Self = Self(10);
    /// Real uid
    pub const UID: Self = Self(11);
    /// Effective uid
    pub const EUID: Self = Self(12);
    /// Real gid
    pub const GID: Self = Self(13);
    /// Effective gid
    pub const EGID: Self = Self(14);
    /// String identifying CPU for optimizations
    pub const PLATFORM: Self = Self(15);
    /// Arch dependent hints at CPU capabilities
    pub const HWCAP: Self = Self(16);
    /// Frequency at which times() increments
    pub const CLKTCK: Self = Self(17);
    /// Data cache block size
    pub const DCACHEBSIZE: Self = Self(19);
    /// Instruction cache block size
    pub const ICACHEBSIZE: Self = Self(20);
    /// Unified cache block size
    pub const UCACHEBSIZE: Self = Self(21);
    /// Secure mode boolean
    pub const SECURE: Self = Self(23);
    /// Address of 16 random bytes
    pub const RANDOM: Self = Self(25);
    /// Filename of program
    pub const EXECFN: Self = Self(31);
    /// Pointer to the vDSO entry (deprecated)
    pub const SYSINFO: Self = Self(32);
    /// Pointer to the ELF headers of the vDSO page
    pub const SYSINFO_EHDR: Self = Self(33);

    /// Creates a key from its raw numeric value.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value of the key.
    pub const fn as_usize(self) -> usize {
        self.0
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::NULL => "AT_NULL",
            Self::IGNORE => "AT_IGNORE",
            Self::EXECFD => "AT_EXECFD",
            Self::PHDR => "AT_PHDR",
            Self::PHENT => "AT_PHENT",
            Self::PHNUM => "AT_PHNUM",
            Self::PAGESZ => "AT_PAGESZ",
            Self::BASE => "AT_BASE",
            Self::FLAGS => "AT_FLAGS",
            Self::ENTRY => "AT_ENTRY",
            Self::NOTELF => "AT_NOTELF",
            Self::UID => "AT_UID",
            Self::EUID => "AT_EUID",
            Self::GID => "AT_GID",
            Self::EGID => "AT_EGID",
            Self::PLATFORM => "AT_PLATFORM",
            Self::HWCAP => "AT_HWCAP",
            Self::CLKTCK => "AT_CLKTCK",
            Self::DCACHEBSIZE => "AT_DCACHEBSIZE",
            Self::ICACHEBSIZE => "AT_ICACHEBSIZE",
            Self::UCACHEBSIZE => "AT_UCACHEBSIZE",
            Self::SECURE => "AT_SECURE",
            Self::RANDOM => "AT_RANDOM",
            Self::EXECFN => "AT_EXECFN",
            Self::SYSINFO => "AT_SYSINFO",
            Self::SYSINFO_EHDR => "AT_SYSINFO_EHDR",
            _ => return None,
        })
    }
}

impl fmt::Debug for AuxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "AT_UNKNOWN({})", self.0),
        }
    }
}

/// An auxiliary vector entry, laid out as the `(type, value)` word pair
/// the C runtime reads.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoBytes, Immutable)]
pub struct AuxEntry {
    auxv_type: AuxType,
    auxv_data: usize,
}

static_assertions::const_assert_eq!(
    core::mem::size_of::<AuxEntry>(),
    2 * core::mem::size_of::<usize>()
);

impl AuxEntry {
    /// Create a new auxv entry
    pub const fn new(auxv_type: AuxType, auxv_data: usize) -> Self {
        Self {
            auxv_type,
            auxv_data,
        }
    }

    /// Get [`AuxType`] of the auxv entry
    pub const fn get_type(&self) -> AuxType {
        self.auxv_type
    }

    /// Get the value of the auxv entry
    pub const fn value(&self) -> usize {
        self.auxv_data
    }
}

/// Instruction set architecture advertised through `AT_PLATFORM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    X86_64,
    Aarch64,
    Riscv64,
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        const CURRENT_PLATFORM: Platform = Platform::X86_64;
    } else if #[cfg(target_arch = "aarch64")] {
        const CURRENT_PLATFORM: Platform = Platform::Aarch64;
    } else if #[cfg(target_arch = "riscv64")] {
        const CURRENT_PLATFORM: Platform = Platform::Riscv64;
    } else {
        compile_error!("unsupported target architecture");
    }
}

impl Platform {
    /// The platform this crate is compiled for.
    pub const fn current() -> Self {
        CURRENT_PLATFORM
    }

    /// The NUL-terminated platform string whose address is placed in
    /// `AT_PLATFORM`. It lives for the whole kernel lifetime.
    pub const fn name(self) -> &'static CStr {
        match self {
            Self::X86_64 => c"x86_64",
            Self::Aarch64 => c"aarch64",
            Self::Riscv64 => c"riscv64",
        }
    }
}

/// Number of entries in the vector built by [`auxiliary_vector`],
/// `AT_NULL` included.
pub const AUXV_LEN: usize = 27;

/// Sixteen bytes of entropy whose address is advertised by `AT_RANDOM`.
pub type RandomBytes = [u8; 16];

/// Builds the auxiliary vector for `program` in the order the C runtime
/// reads it, ending with `(AT_NULL, 0)`.
///
/// `AT_RANDOM` points at `random` itself: the bytes are not copied onto the
/// program stack, so the buffer must outlive the program.
pub fn auxiliary_vector(
    program: &ProgramDescriptor,
    random: &RandomBytes,
    config: &AuxvConfig,
) -> [AuxEntry; AUXV_LEN] {
    [
        (AuxType::PLATFORM, config.platform.name().as_ptr() as usize),
        (AuxType::NOTELF, 0),
        (AuxType::UCACHEBSIZE, 0),
        (AuxType::ICACHEBSIZE, 0),
        (AuxType::DCACHEBSIZE, 0),
        (AuxType::EXECFN, 0),
        (AuxType::SYSINFO, 0),
        (AuxType::SECURE, 0),
        (AuxType::EGID, 0),
        (AuxType::GID, 0),
        (AuxType::EUID, 0),
        (AuxType::UID, 0),
        (AuxType::ENTRY, program.entry),
        (AuxType::FLAGS, 0),
        (AuxType::CLKTCK, config.clock_ticks),
        (AuxType::HWCAP, config.hwcap),
        (AuxType::PAGESZ, config.page_size),
        (AuxType::SYSINFO, 0),
        (AuxType::SYSINFO_EHDR, 0),
        // No interpreter is ever loaded.
        (AuxType::BASE, 0),
        (AuxType::RANDOM, random.as_ptr() as usize),
        (AuxType::PHENT, program.phdr_entry_size),
        (AuxType::PHNUM, program.phdr_count),
        (AuxType::PHDR, program.phdr_addr()),
        (AuxType::EXECFD, 0),
        (AuxType::IGNORE, 0),
        (AuxType::NULL, 0),
    ]
    .map(|(at, val)| AuxEntry::new(at, val))
}
