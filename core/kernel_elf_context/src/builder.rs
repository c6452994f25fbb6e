//! Build the initial stack of an ELF program and jump to it.
//!
//! The structure of the stack is described in the following figure:
//!
//! ```text
//! position            content                     size (bytes) + comment
//!   ------------------------------------------------------------------------
//! stack pointer ->  [ argc = number of args ]     8   (argv[0] not counted)
//!                   [ argv[1] (pointer) ]         8
//!                   [ argv[..] (pointer) ]        8 * x
//!                   [ argv[n - 1] (pointer) ]     8
//!                   [ argv[term] (pointer) ]      8   (= NULL)
//!                   [ envp[0] (pointer) ]         8
//!                   [ envp[..] (pointer) ]        8
//!                   [ envp[term] (pointer) ]      8   (= NULL)
//!                   [ auxv[0] (Elf64_auxv_t) ]    16  (= AT_PLATFORM)
//!                   [ auxv[..] (Elf64_auxv_t) ]   16
//!                   [ auxv[term] (Elf64_auxv_t) ] 16  (= AT_NULL vector)
//!                   [ padding ]                   0 - 8
//!
//!                   < top of the stack region >
//! ```
//!
//! The strings themselves are not copied: argv and envp entries point at
//! the caller's strings, and `AT_RANDOM` at the caller's random buffer.

use alloc::vec::Vec;
use core::ffi::{CStr, c_char};

use crate::{
    auxv::{AUXV_LEN, RandomBytes, auxiliary_vector},
    config::AuxvConfig,
    context::{ContextActivate, EntryContext},
    error::{ContextError, ContextResult},
    program::ProgramDescriptor,
    stack::{STACK_ALIGN, StackLayout, StackWriter, WORD},
};

/// Fills `stack` with the initial stack image of `program` and prepares
/// `ctx` to enter it.
///
/// `argv[0]` names the program and is not passed on: the program sees
/// `argv[1..]` and an argument count of `argv.len() - 1`. An empty `envp`
/// yields an empty environment.
///
/// At least one word of `stack` must remain free below the image, otherwise
/// [`ContextError::StackOverflow`] is returned and `ctx` is left untouched.
pub fn build_initial_stack<C: EntryContext>(
    ctx: &mut C,
    stack: &mut StackWriter<'_>,
    program: &ProgramDescriptor,
    argv: &[&CStr],
    envp: &[&CStr],
    random: &RandomBytes,
    config: &AuxvConfig,
) -> ContextResult<StackLayout> {
    let (_, args) = argv.split_first().ok_or(ContextError::NoProgramName)?;
    let top = stack.sp();

    if config.align_stack {
        // auxv pairs, envp + NULL, argv + NULL, argc
        let words = 2 * AUXV_LEN + (envp.len() + 1) + (args.len() + 1) + 1;
        if top.wrapping_sub(words * WORD) % STACK_ALIGN != 0 {
            stack.push_word(0)?;
        }
    }

    for entry in auxiliary_vector(program, random, config).iter().rev() {
        stack.push_word(entry.value())?;
        stack.push_word(entry.get_type().as_usize())?;
    }
    let auxv = stack.sp();

    stack.push_word(0)?;
    stack.push_words(envp.iter().map(|env| env.as_ptr() as usize))?;
    let envp = stack.sp();

    stack.push_word(0)?;
    stack.push_words(args.iter().map(|arg| arg.as_ptr() as usize))?;
    let argv = stack.sp();

    stack.push_word(args.len())?;
    let sp = stack.sp();
    // The entry trampoline may spill one word below `sp`.
    if stack.remaining() == 0 {
        return Err(ContextError::StackOverflow);
    }

    ctx.init_entry(sp, program.entry);

    Ok(StackLayout {
        sp,
        argc: args.len(),
        argv,
        envp,
        auxv,
        top,
    })
}

/// Builds the initial stack of `program` and transfers control to its entry
/// point. Never returns.
///
/// There is nobody left to report an error to at this point: a missing
/// `argv[0]` or an exhausted stack region aborts the kernel.
///
/// # Safety
///
/// `program` must be mapped as described, and every string in `argv` and
/// `envp` must stay alive and mapped for as long as the program runs. See also [`ContextActivate::activate`].
pub unsafe fn build_and_transfer<C: EntryContext + ContextActivate>(
    ctx: &mut C,
    mut stack: StackWriter<'_>,
    program: &ProgramDescriptor,
    argv: &[&CStr],
    envp: &[&CStr],
    random: &'static RandomBytes,
    config: &AuxvConfig,
) -> ! {
    assert!(!argv.is_empty(), "ELF program started without argv[0]");
    let name = argv[0].to_str().unwrap_or("<elf>");

    debug!(
        "{}: image:          {:#x} - {:#x}",
        name,
        program.image_base,
        program.image_base + program.image_length
    );
    debug!("{}: start:          {:#x}", name, program.load_base);
    debug!("{}: entry:          {:#x}", name, program.entry);
    debug!("{}: ehdr_phoff:     {:#x}", name, program.phdr_offset);
    debug!("{}: ehdr_phnum:     {}", name, program.phdr_count);
    debug!("{}: ehdr_phentsize: {:#x}", name, program.phdr_entry_size);
    debug!("{}: rnd16 at {:p}", name, random);

    let layout = build_initial_stack(ctx, &mut stack, program, argv, envp, random, config)
        .unwrap_or_else(|e| {
            panic!(
                "{}: cannot build initial stack in [{:#x}, {:#x}): {}",
                name,
                stack.base(),
                stack.top(),
                e
            )
        });
    trace!(
        "{}: sp={:#x} argc={} argv={:#x} envp={:#x} auxv={:#x}",
        name, layout.sp, layout.argc, layout.argv, layout.envp, layout.auxv
    );

    unsafe { ctx.activate() }
}

/// Collects a C-style, NULL-terminated array of string pointers, such as a
/// boot-time `environ`. A null `array` yields an empty vector.
///
/// # Safety
///
/// `array` must be null or point to a NULL-terminated array of pointers to
/// NUL-terminated strings, all valid for `'a`.
pub unsafe fn cstr_array<'a>(array: *const *const c_char) -> Vec<&'a CStr> {
    let mut strings = Vec::new();
    if array.is_null() {
        return strings;
    }
    let mut cur = array;
    loop {
        let ptr = unsafe { *cur };
        if ptr.is_null() {
            break;
        }
        strings.push(unsafe { CStr::from_ptr(ptr) });
        cur = unsafe { cur.add(1) };
    }
    strings
}
