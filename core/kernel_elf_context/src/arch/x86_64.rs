use crate::context::EntryContext;

/// General registers of x86_64.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GeneralRegisters {
    pub rax: usize,
    pub rbx: usize,
    pub rcx: usize,
    pub rdx: usize,
    pub rsi: usize,
    pub rdi: usize,
    pub rbp: usize,
    pub r8: usize,
    pub r9: usize,
    pub r10: usize,
    pub r11: usize,
    pub r12: usize,
    pub r13: usize,
    pub r14: usize,
    pub r15: usize,
}

/// Register state an x86_64 program starts with.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct X86_64Context {
    pub regs: GeneralRegisters,
    pub rsp: usize,
    pub rip: usize,
}

static_assertions::const_assert_eq!(core::mem::size_of::<X86_64Context>(), 17 * 8);

impl EntryContext for X86_64Context {
    fn init_entry(&mut self, sp: usize, entry: usize) {
        self.regs = GeneralRegisters::default();
        // rdx carries the rtld finalizer glibc registers with atexit().
        self.regs.rdx = 0;
        self.rsp = sp;
        self.rip = entry;
    }

    fn stack_pointer(&self) -> usize {
        self.rsp
    }

    fn instruction_pointer(&self) -> usize {
        self.rip
    }

    fn exit_callback(&self) -> usize {
        self.regs.rdx
    }
}

#[cfg(target_arch = "x86_64")]
impl crate::context::ContextActivate for X86_64Context {
    /// Loads the new stack, parks `rip` in the word right below it and
    /// returns into it once every register has been restored.
    unsafe fn activate(&mut self) -> ! {
        use core::mem::offset_of;

        unsafe {
            core::arch::asm!(
                "mov rsp, [rax + {rsp}]",
                "push qword ptr [rax + {rip}]",
                "mov rbx, [rax + {rbx}]",
                "mov rcx, [rax + {rcx}]",
                "mov rdx, [rax + {rdx}]",
                "mov rsi, [rax + {rsi}]",
                "mov rdi, [rax + {rdi}]",
                "mov rbp, [rax + {rbp}]",
                "mov r8, [rax + {r8}]",
                "mov r9, [rax + {r9}]",
                "mov r10, [rax + {r10}]",
                "mov r11, [rax + {r11}]",
                "mov r12, [rax + {r12}]",
                "mov r13, [rax + {r13}]",
                "mov r14, [rax + {r14}]",
                "mov r15, [rax + {r15}]",
                "mov rax, [rax + {rax}]",
                "ret",
                in("rax") self as *const Self,
                rsp = const offset_of!(X86_64Context, rsp),
                rip = const offset_of!(X86_64Context, rip),
                rax = const offset_of!(X86_64Context, regs.rax),
                rbx = const offset_of!(X86_64Context, regs.rbx),
                rcx = const offset_of!(X86_64Context, regs.rcx),
                rdx = const offset_of!(X86_64Context, regs.rdx),
                rsi = const offset_of!(X86_64Context, regs.rsi),
                rdi = const offset_of!(X86_64Context, regs.rdi),
                rbp = const offset_of!(X86_64Context, regs.rbp),
                r8 = const offset_of!(X86_64Context, regs.r8),
                r9 = const offset_of!(X86_64Context, regs.r9),
                r10 = const offset_of!(X86_64Context, regs.r10),
                r11 = const offset_of!(X86_64Context, regs.r11),
                r12 = const offset_of!(X86_64Context, regs.r12),
                r13 = const offset_of!(X86_64Context, regs.r13),
                r14 = const offset_of!(X86_64Context, regs.r14),
                r15 = const offset_of!(X86_64Context, regs.r15),
                options(noreturn),
            )
        }
    }
}
