//! Seam between device construction and a concrete HAL.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::Result;

use super::types::RelayLine;

/// Supplies HAL channels for the ports named in device properties.
///
/// Implementations own the board-specific mapping from port numbers to
/// peripherals and may refuse a channel that is absent or already taken
/// with [`DeviceError::ChannelUnavailable`](crate::error::DeviceError::ChannelUnavailable).
///
/// `module: None` selects the default module for devices that sit behind an
/// addressable module (solenoids, compressors).
///
/// When a device needing several channels fails part-way (a relay's second
/// line, a later drive train wheel), the channels already taken are handed
/// back through [`release_pwm`](Self::release_pwm) and
/// [`release_output`](Self::release_output).
pub trait HardwareBinding {
    /// PWM output driving speed controllers and servos.
    ///
    /// The channel is expected to run at [`PWM_PERIOD_US`](super::PWM_PERIOD_US).
    type Pwm: SetDutyCycle;

    /// Digital output driving solenoids, relays and compressors.
    type Output: OutputPin;

    /// PWM channel for a port.
    fn pwm(&mut self, port: u8) -> Result<Self::Pwm>;

    /// Solenoid channel on a pneumatics module.
    fn solenoid(&mut self, module: Option<u8>, channel: u8) -> Result<Self::Output>;

    /// One line of a relay port.
    fn relay(&mut self, port: u8, line: RelayLine) -> Result<Self::Output>;

    /// Compressor enable output of a pneumatics module.
    fn compressor(&mut self, module: Option<u8>) -> Result<Self::Output>;

    /// Take back a PWM channel of a device that was not built. Drops it by
    /// default.
    fn release_pwm(&mut self, _pwm: Self::Pwm) {}

    /// Take back an output of a device that was not built. Drops it by
    /// default.
    fn release_output(&mut self, _output: Self::Output) {}
}

impl<B: HardwareBinding + ?Sized> HardwareBinding for &mut B {
    type Pwm = B::Pwm;
    type Output = B::Output;

    fn pwm(&mut self, port: u8) -> Result<Self::Pwm> {
        (**self).pwm(port)
    }

    fn solenoid(&mut self, module: Option<u8>, channel: u8) -> Result<Self::Output> {
        (**self).solenoid(module, channel)
    }

    fn relay(&mut self, port: u8, line: RelayLine) -> Result<Self::Output> {
        (**self).relay(port, line)
    }

    fn compressor(&mut self, module: Option<u8>) -> Result<Self::Output> {
        (**self).compressor(module)
    }

    fn release_pwm(&mut self, pwm: Self::Pwm) {
        (**self).release_pwm(pwm)
    }

    fn release_output(&mut self, output: Self::Output) {
        (**self).release_output(output)
    }
}
