//! Host preemption gating
//!
//! A bus cycle reproduces a multi-phase electrical protocol purely by
//! software-timed pin toggling. A host interrupt landing between two
//! strobes stretches the cycle past the target's tolerances and corrupts
//! the transfer silently, so the timed portion runs with preemption
//! suppressed. [`IrqGuard`] scopes the suppression so every exit path
//! restores it.

use core::ops::{Deref, DerefMut};

/// Host interrupt suppress/restore pair
///
/// Board support crates implement this over the MCU's global interrupt
/// mask. Calls are balanced by construction when the port is only used
/// through [`IrqGuard`].
pub trait IrqControl {
    /// Suppress host interrupt preemption
    fn suppress_interrupts(&mut self);

    /// Restore host interrupt preemption
    fn restore_interrupts(&mut self);
}

/// Scoped interrupt suppression
///
/// Suppresses preemption on construction and restores it when dropped,
/// so the suppress/restore calls stay balanced 1:1 on every path out of
/// the timed region. Derefs to the wrapped port so pin operations can
/// continue inside the guard's scope.
pub struct IrqGuard<'a, T: IrqControl> {
    port: &'a mut T,
}

impl<'a, T: IrqControl> IrqGuard<'a, T> {
    /// Suppress interrupts and take the port for the guard's lifetime
    pub fn new(port: &'a mut T) -> Self {
        port.suppress_interrupts();
        Self { port }
    }
}

impl<T: IrqControl> Deref for IrqGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.port
    }
}

impl<T: IrqControl> DerefMut for IrqGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.port
    }
}

impl<T: IrqControl> Drop for IrqGuard<'_, T> {
    fn drop(&mut self) {
        self.port.restore_interrupts();
    }
}
