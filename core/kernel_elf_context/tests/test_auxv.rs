mod common;

use common::program;
use kernel_elf_context::{AUXV_LEN, AuxEntry, AuxType, AuxvConfig, Platform, auxiliary_vector};
use zerocopy::IntoBytes;

#[test]
fn test_vector_order() {
    let random = [0u8; 16];
    let auxv = auxiliary_vector(&program(), &random, &AuxvConfig::DEFAULT);
    let keys: Vec<_> = auxv.iter().map(|e| e.get_type()).collect();
    assert_eq!(
        keys,
        [
            AuxType::PLATFORM,
            AuxType::NOTELF,
            AuxType::UCACHEBSIZE,
            AuxType::ICACHEBSIZE,
            AuxType::DCACHEBSIZE,
            AuxType::EXECFN,
            AuxType::SYSINFO,
            AuxType::SECURE,
            AuxType::EGID,
            AuxType::GID,
            AuxType::EUID,
            AuxType::UID,
            AuxType::ENTRY,
            AuxType::FLAGS,
            AuxType::CLKTCK,
            AuxType::HWCAP,
            AuxType::PAGESZ,
            AuxType::SYSINFO,
            AuxType::SYSINFO_EHDR,
            AuxType::BASE,
            AuxType::RANDOM,
            AuxType::PHENT,
            AuxType::PHNUM,
            AuxType::PHDR,
            AuxType::EXECFD,
            AuxType::IGNORE,
            AuxType::NULL,
        ]
    );
    assert_eq!(keys.len(), AUXV_LEN);
}

#[test]
fn test_entry_bytes() {
    let entry = AuxEntry::new(AuxType::PAGESZ, 4096);
    let mut expected = 6usize.to_ne_bytes().to_vec();
    expected.extend(4096usize.to_ne_bytes());
    assert_eq!(entry.as_bytes(), expected);
}

#[test]
fn test_type_debug() {
    assert_eq!(format!("{:?}", AuxType::PHDR), "AT_PHDR");
    assert_eq!(format!("{:?}", AuxType::from_raw(18)), "AT_UNKNOWN(18)");
    assert_eq!(AuxType::SYSINFO_EHDR.as_usize(), 33);
}

#[test]
fn test_platform_names() {
    assert_eq!(Platform::X86_64.name(), c"x86_64");
    assert_eq!(Platform::Aarch64.name(), c"aarch64");
    assert_eq!(Platform::Riscv64.name(), c"riscv64");
    assert_eq!(AuxvConfig::default().platform, Platform::current());
}
