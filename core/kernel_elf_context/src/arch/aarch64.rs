use crate::context::EntryContext;

/// Register state an aarch64 program starts with.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Aarch64Context {
    /// `x0` to `x30`.
    pub x: [usize; 31],
    pub sp: usize,
    pub pc: usize,
}

impl EntryContext for Aarch64Context {
    fn init_entry(&mut self, sp: usize, entry: usize) {
        // x0 doubles as the rtld finalizer argument of `_start`.
        self.x = [0; 31];
        self.sp = sp;
        self.pc = entry;
    }

    fn stack_pointer(&self) -> usize {
        self.sp
    }

    fn instruction_pointer(&self) -> usize {
        self.pc
    }

    fn exit_callback(&self) -> usize {
        self.x[0]
    }
}

#[cfg(target_arch = "aarch64")]
impl crate::context::ContextActivate for Aarch64Context {
    /// `x30` is left holding the entry address.
    unsafe fn activate(&mut self) -> ! {
        use core::mem::offset_of;

        unsafe {
            core::arch::asm!(
                "ldr x0, [x30, #{sp}]",
                "mov sp, x0",
                "ldp x0, x1, [x30, #0]",
                "ldp x2, x3, [x30, #16]",
                "ldp x4, x5, [x30, #32]",
                "ldp x6, x7, [x30, #48]",
                "ldp x8, x9, [x30, #64]",
                "ldp x10, x11, [x30, #80]",
                "ldp x12, x13, [x30, #96]",
                "ldp x14, x15, [x30, #112]",
                "ldp x16, x17, [x30, #128]",
                "ldp x18, x19, [x30, #144]",
                "ldp x20, x21, [x30, #160]",
                "ldp x22, x23, [x30, #176]",
                "ldp x24, x25, [x30, #192]",
                "ldp x26, x27, [x30, #208]",
                "ldp x28, x29, [x30, #224]",
                "ldr x30, [x30, #{pc}]",
                "br x30",
                in("x30") self as *const Self,
                sp = const offset_of!(Aarch64Context, sp),
                pc = const offset_of!(Aarch64Context, pc),
                options(noreturn),
            )
        }
    }
}
