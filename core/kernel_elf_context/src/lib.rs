#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]

extern crate alloc;

#[macro_use]
extern crate log;

mod arch;
mod auxv;
mod builder;
mod config;
mod context;
mod error;
mod program;
mod stack;

pub use self::{
    arch::{
        Aarch64Context, ArchContext, Riscv64Context, X86_64Context, aarch64, riscv64, x86_64,
    },
    auxv::{AUXV_LEN, AuxEntry, AuxType, Platform, RandomBytes, auxiliary_vector},
    builder::{build_and_transfer, build_initial_stack, cstr_array},
    config::AuxvConfig,
    context::{ContextActivate, EntryContext},
    error::{ContextError, ContextResult},
    program::ProgramDescriptor,
    stack::{STACK_ALIGN, StackLayout, StackWriter, WORD},
};
