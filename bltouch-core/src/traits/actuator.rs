//! Probe actuator trait
//!
//! A BLTouch is driven like a hobby servo: the pulse width on its control
//! wire selects a mode (deploy, stow, self-test, alarm release) rather than
//! a physical position. The dispatcher only ever speaks in angles.

/// Output that commands the probe by servo angle
pub trait ProbeActuator {
    /// Error raised by the underlying output
    type Error;

    /// Emit the pulse for `degrees` (0-180) on the control wire
    ///
    /// Callers pass values from the configured angle table, which is
    /// validated to lie within 0-180 at startup.
    fn set_angle(&mut self, degrees: u8) -> Result<(), Self::Error>;

    /// The angle most recently commanded, if any
    fn angle(&self) -> Option<u8>;
}

impl<T: ProbeActuator + ?Sized> ProbeActuator for &mut T {
    type Error = T::Error;

    fn set_angle(&mut self, degrees: u8) -> Result<(), Self::Error> {
        T::set_angle(self, degrees)
    }

    fn angle(&self) -> Option<u8> {
        T::angle(self)
    }
}
