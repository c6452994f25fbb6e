#![allow(dead_code)]

use core::ffi::CStr;

use kernel_elf_context::{
    AuxvConfig, ProgramDescriptor, RandomBytes, StackLayout, StackWriter, WORD, X86_64Context,
    build_initial_stack,
};

pub const WORDS: usize = 256;

/// A stack region whose top is 16-byte aligned.
#[repr(C, align(16))]
pub struct Region(pub [usize; WORDS]);

pub fn program() -> ProgramDescriptor {
    ProgramDescriptor {
        image_base: 0x40_0000,
        image_length: 0x2_0000,
        load_base: 0x40_0000,
        entry: 0x40_1040,
        phdr_offset: 0x40,
        phdr_count: 9,
        phdr_entry_size: 56,
    }
}

pub struct Built {
    pub region: Box<Region>,
    pub layout: StackLayout,
    pub ctx: X86_64Context,
    pub image: Vec<u8>,
}

pub fn build(argv: &[&CStr], envp: &[&CStr], random: &RandomBytes, config: &AuxvConfig) -> Built {
    let mut region = Box::new(Region([0; WORDS]));
    let mut ctx = X86_64Context::default();
    let (layout, image) = {
        let mut stack = StackWriter::new(&mut region.0);
        let layout =
            build_initial_stack(&mut ctx, &mut stack, &program(), argv, envp, random, config)
                .unwrap();
        (layout, stack.as_bytes().to_vec())
    };
    Built {
        region,
        layout,
        ctx,
        image,
    }
}

impl Built {
    /// The stack read forward from the final stack pointer.
    pub fn words(&self) -> &[usize] {
        let base = self.region.0.as_ptr() as usize;
        &self.region.0[(self.layout.sp - base) / WORD..]
    }

    pub fn parse(&self) -> Parsed {
        Parsed::from_words(self.words())
    }
}

/// The initial stack as the C runtime's `_start` walks it.
#[derive(Debug)]
pub struct Parsed {
    pub argc: usize,
    pub argv: Vec<usize>,
    pub envp: Vec<usize>,
    /// Every auxv pair, the terminating `(AT_NULL, 0)` included.
    pub auxv: Vec<(usize, usize)>,
    /// Words left above the auxiliary vector.
    pub rest: usize,
}

impl Parsed {
    pub fn from_words(words: &[usize]) -> Self {
        let argc = words[0];
        let mut i = 1;
        let argv = words[i..i + argc].to_vec();
        i += argc;
        assert_eq!(words[i], 0, "argv is not NULL terminated");
        i += 1;

        let mut envp = Vec::new();
        while words[i] != 0 {
            envp.push(words[i]);
            i += 1;
        }
        i += 1;

        let mut auxv = Vec::new();
        loop {
            let (key, val) = (words[i], words[i + 1]);
            auxv.push((key, val));
            i += 2;
            if key == 0 {
                break;
            }
        }
        Self {
            argc,
            argv,
            envp,
            auxv,
            rest: words.len() - i,
        }
    }

    pub fn aux(&self, key: kernel_elf_context::AuxType) -> Vec<usize> {
        self.auxv
            .iter()
            .filter(|(k, _)| *k == key.as_usize())
            .map(|(_, v)| *v)
            .collect()
    }
}

pub fn addr(s: &CStr) -> usize {
    s.as_ptr() as usize
}
