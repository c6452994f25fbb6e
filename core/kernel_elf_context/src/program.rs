//! Where the loader put the ELF image.

use core::ops::Range;

use xmas_elf::header::{Header, Type};

use crate::error::{ContextError, ContextResult};

/// Description of an ELF image that has already been parsed and mapped.
///
/// The loader guarantees that both [`entry`](Self::entry) and
/// [`phdr_addr`](Self::phdr_addr) lie inside the image; see
/// [`check_bounds`](Self::check_bounds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramDescriptor {
    /// Start of the mapped image.
    pub image_base: usize,
    /// Length of the mapped image in bytes.
    pub image_length: usize,
    /// Virtual address the image was loaded (relocated) to.
    pub load_base: usize,
    /// Address of the first instruction of the program.
    pub entry: usize,
    /// Offset of the program header table from `load_base`.
    pub phdr_offset: usize,
    /// Number of program headers.
    pub phdr_count: usize,
    /// Size of one program header entry.
    pub phdr_entry_size: usize,
}

impl ProgramDescriptor {
    /// Builds a descriptor from the ELF header the loader parsed.
    ///
    /// The entry point of a position independent image (`ET_DYN`) is biased
    /// by `load_base`, an `ET_EXEC` image is taken at face value.
    pub fn from_elf_header(
        header: &Header<'_>,
        image_base: usize,
        image_length: usize,
        load_base: usize,
    ) -> Self {
        let pt2 = &header.pt2;
        let bias = if pt2.type_().as_type() == Type::SharedObject {
            load_base
        } else {
            0
        };
        Self {
            image_base,
            image_length,
            load_base,
            entry: pt2.entry_point() as usize + bias,
            phdr_offset: pt2.ph_offset() as usize,
            phdr_count: pt2.ph_count() as usize,
            phdr_entry_size: pt2.ph_entry_size() as usize,
        }
    }

    /// Runtime address of the program header table, as advertised by `AT_PHDR`.
    pub const fn phdr_addr(&self) -> usize {
        self.load_base + self.phdr_offset
    }

    /// Address range covered by the mapped image.
    pub const fn image_range(&self) -> Range<usize> {
        self.image_base..self.image_base + self.image_length
    }

    /// Checks that the entry point and the program header table lie inside
    /// the mapped image.
    pub fn check_bounds(&self) -> ContextResult {
        let image = self.image_range();
        if !image.contains(&self.entry) {
            return Err(ContextError::EntryOutsideImage);
        }
        if !image.contains(&self.phdr_addr()) {
            return Err(ContextError::PhdrOutsideImage);
        }
        Ok(())
    }
}
