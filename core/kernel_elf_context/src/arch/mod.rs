pub mod aarch64;
pub mod riscv64;
pub mod x86_64;

pub use self::{aarch64::Aarch64Context, riscv64::Riscv64Context, x86_64::X86_64Context};

cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        /// The register file of the architecture this crate is compiled for.
        pub type ArchContext = X86_64Context;
    } else if #[cfg(target_arch = "aarch64")] {
        /// The register file of the architecture this crate is compiled for.
        pub type ArchContext = Aarch64Context;
    } else if #[cfg(target_arch = "riscv64")] {
        /// The register file of the architecture this crate is compiled for.
        pub type ArchContext = Riscv64Context;
    }
}
