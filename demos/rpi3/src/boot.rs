//! Entry shim: parks the secondary cores, sets up a stack below the load
//! address, zeroes `.bss` and hands over to `kmain`.

use core::arch::global_asm;

global_asm!(
    r#"
.section ".text.boot"
.global _start
_start:
    mrs     x1, mpidr_el1
    and     x1, x1, #3
    cbz     x1, 2f
1:  wfe
    b       1b
2:  ldr     x1, =_start
    mov     sp, x1
    ldr     x1, =__bss_start
    ldr     x2, =__bss_end
3:  cmp     x1, x2
    b.eq    4f
    str     xzr, [x1], #8
    b       3b
4:  bl      kmain
    b       1b
"#
);
