use crate::context::EntryContext;

const SP: usize = 2;
const A0: usize = 10;

/// Register state a riscv64 program starts with.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Riscv64Context {
    /// `x0` to `x31`; `x0` is never loaded.
    pub x: [usize; 32],
    pub pc: usize,
}

impl EntryContext for Riscv64Context {
    fn init_entry(&mut self, sp: usize, entry: usize) {
        // a0 doubles as the rtld finalizer argument of `_start`.
        self.x = [0; 32];
        self.x[SP] = sp;
        self.pc = entry;
    }

    fn stack_pointer(&self) -> usize {
        self.x[SP]
    }

    fn instruction_pointer(&self) -> usize {
        self.pc
    }

    fn exit_callback(&self) -> usize {
        self.x[A0]
    }
}

#[cfg(target_arch = "riscv64")]
impl crate::context::ContextActivate for Riscv64Context {
    /// `t6` is left holding the entry address.
    unsafe fn activate(&mut self) -> ! {
        use core::mem::offset_of;

        unsafe {
            core::arch::asm!(
                "ld x1, 8(t6)",
                "ld x2, 16(t6)",
                "ld x3, 24(t6)",
                "ld x4, 32(t6)",
                "ld x5, 40(t6)",
                "ld x6, 48(t6)",
                "ld x7, 56(t6)",
                "ld x8, 64(t6)",
                "ld x9, 72(t6)",
                "ld x10, 80(t6)",
                "ld x11, 88(t6)",
                "ld x12, 96(t6)",
                "ld x13, 104(t6)",
                "ld x14, 112(t6)",
                "ld x15, 120(t6)",
                "ld x16, 128(t6)",
                "ld x17, 136(t6)",
                "ld x18, 144(t6)",
                "ld x19, 152(t6)",
                "ld x20, 160(t6)",
                "ld x21, 168(t6)",
                "ld x22, 176(t6)",
                "ld x23, 184(t6)",
                "ld x24, 192(t6)",
                "ld x25, 200(t6)",
                "ld x26, 208(t6)",
                "ld x27, 216(t6)",
                "ld x28, 224(t6)",
                "ld x29, 232(t6)",
                "ld x30, 240(t6)",
                "ld t6, {pc}(t6)",
                "jr t6",
                in("x31") self as *const Self,
                pc = const offset_of!(Riscv64Context, pc),
                options(noreturn),
            )
        }
    }
}
