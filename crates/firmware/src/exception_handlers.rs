//! Cortex-M exception handlers.
//!
//! A HardFault mid-pass leaves the speaker compare register and the LEDs in
//! whatever state the last sample put them. The handler reports the stacked
//! frame over RTT and halts; the IWDG then resets the board.
//!
//! # Stack Overflow Protection
//!
//! With flip-link configured in `.cargo/config.toml`, the stack is placed
//! below `.bss`+`.data`. An overflow runs off the bottom of RAM and faults
//! instead of silently corrupting statics.
//!
//! The `#[cortex_m_rt::exception]` attribute needs the ARM target, so the
//! handler is gated behind `feature = "hardware"`; [`HARDFAULT_DEFINED`] is not,
//! letting host tests confirm the module is linked.

#![allow(clippy::doc_markdown)] // HardFault, SVC are hardware names

/// Marker that this module compiled into the crate.
pub const HARDFAULT_DEFINED: bool = true;

/// HardFault exception handler (hardware target only).
///
/// # Triggers
///
/// - Bus fault on an illegal address
/// - Stack overflow detected by flip-link
/// - Unaligned access (if `CCR.UNALIGN_TRP` is set)
///
/// # Safety
///
/// Must never return; returning from HardFault is undefined behaviour on
/// Cortex-M. The `-> !` return type enforces this.
#[cfg(feature = "hardware")]
#[cortex_m_rt::exception]
#[allow(unsafe_code)]
unsafe fn HardFault(ef: &cortex_m_rt::ExceptionFrame) -> ! {
    defmt::panic!(
        "HardFault at pc=0x{:08X} lr=0x{:08X}",
        ef.pc(),
        ef.lr()
    );
}
