//! Device handles built from properties.
//!
//! Each handle owns the HAL channel(s) handed out by the binding together
//! with the settings it was loaded with.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use heapless::Vec;
use libm::roundf;

use crate::error::{DeviceError, Error, Result};

use super::types::{PulseBounds, RelayDirection, RelayValue, SpeedControllerType, WheelPosition};

/// PWM period the binding's channels run at, in microseconds.
pub const PWM_PERIOD_US: f32 = 5050.0;

/// Servo pulse at 0 degrees, in microseconds.
pub const SERVO_MIN_PULSE_US: f32 = 600.0;

/// Servo pulse at [`SERVO_MAX_ANGLE`], in microseconds.
pub const SERVO_MAX_PULSE_US: f32 = 2400.0;

/// Servo travel in degrees.
pub const SERVO_MAX_ANGLE: f32 = 180.0;

fn pin_error<E>(_: E) -> Error {
    Error::Device(DeviceError::PinError)
}

/// Write a pulse width to a PWM channel.
fn write_pulse<P: SetDutyCycle>(pwm: &mut P, pulse_us: f32) -> Result<u16> {
    let max = pwm.max_duty_cycle();
    let duty = roundf(pulse_us / PWM_PERIOD_US * max as f32).clamp(0.0, max as f32) as u16;
    pwm.set_duty_cycle(duty).map_err(pin_error)?;
    Ok(duty)
}

/// Pulse width for `speed` in [-1, 1], linear on each side of neutral.
pub fn speed_to_pulse(bounds: PulseBounds, speed: f32) -> f32 {
    let speed = if speed.is_nan() { 0.0 } else { speed.clamp(-1.0, 1.0) };
    if speed >= 0.0 {
        bounds.center_us + speed * (bounds.max_us - bounds.center_us)
    } else {
        bounds.center_us + speed * (bounds.center_us - bounds.min_us)
    }
}

/// PWM motor speed controller.
#[derive(Debug)]
pub struct SpeedController<P> {
    kind: SpeedControllerType,
    port: u8,
    pwm: P,
    speed: f32,
}

impl<P: SetDutyCycle> SpeedController<P> {
    pub(crate) fn new(kind: SpeedControllerType, port: u8, pwm: P) -> Self {
        Self {
            kind,
            port,
            pwm,
            speed: 0.0,
        }
    }

    /// Controller model.
    #[inline]
    pub fn kind(&self) -> SpeedControllerType {
        self.kind
    }

    /// PWM port.
    #[inline]
    pub fn port(&self) -> u8 {
        self.port
    }

    /// Last commanded speed.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Command a speed in [-1, 1]; values outside are clamped.
    ///
    /// Returns the duty cycle written to the channel.
    pub fn set(&mut self, speed: f32) -> Result<u16> {
        let duty = write_pulse(&mut self.pwm, speed_to_pulse(self.kind.bounds(), speed))?;
        self.speed = if speed.is_nan() { 0.0 } else { speed.clamp(-1.0, 1.0) };
        Ok(duty)
    }

    /// Command neutral.
    pub fn stop(&mut self) -> Result<u16> {
        self.set(0.0)
    }

    /// Release the PWM channel.
    pub fn release(self) -> P {
        self.pwm
    }
}

/// PWM hobby servo.
#[derive(Debug)]
pub struct Servo<P> {
    port: u8,
    pwm: P,
}

impl<P: SetDutyCycle> Servo<P> {
    pub(crate) fn new(port: u8, pwm: P) -> Self {
        Self { port, pwm }
    }

    /// PWM port.
    #[inline]
    pub fn port(&self) -> u8 {
        self.port
    }

    /// Move to `degrees`, clamped to `0..=SERVO_MAX_ANGLE`. NaN moves to 0.
    pub fn set_angle(&mut self, degrees: f32) -> Result<u16> {
        let degrees = if degrees.is_nan() { 0.0 } else { degrees.clamp(0.0, SERVO_MAX_ANGLE) };
        let span = SERVO_MAX_PULSE_US - SERVO_MIN_PULSE_US;
        write_pulse(&mut self.pwm, SERVO_MIN_PULSE_US + degrees / SERVO_MAX_ANGLE * span)
    }

    /// Release the PWM channel.
    pub fn release(self) -> P {
        self.pwm
    }
}

/// Single-acting pneumatic solenoid.
#[derive(Debug)]
pub struct Solenoid<O> {
    module: Option<u8>,
    channel: u8,
    output: O,
    on: bool,
}

impl<O: OutputPin> Solenoid<O> {
    pub(crate) fn new(module: Option<u8>, channel: u8, output: O) -> Self {
        Self {
            module,
            channel,
            output,
            on: false,
        }
    }

    /// Pneumatics module, `None` for the default module.
    #[inline]
    pub fn module(&self) -> Option<u8> {
        self.module
    }

    /// Channel on the module.
    #[inline]
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Last commanded state.
    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Energize or vent the solenoid.
    pub fn set(&mut self, on: bool) -> Result<()> {
        if on {
            self.output.set_high().map_err(pin_error)?;
        } else {
            self.output.set_low().map_err(pin_error)?;
        }
        self.on = on;
        Ok(())
    }

    /// Release the output.
    pub fn release(self) -> O {
        self.output
    }
}

/// Two-line relay; lines not enabled by the direction are not allocated.
#[derive(Debug)]
pub struct Relay<O> {
    port: u8,
    direction: RelayDirection,
    forward: Option<O>,
    reverse: Option<O>,
}

impl<O: OutputPin> Relay<O> {
    pub(crate) fn new(port: u8, direction: RelayDirection, forward: Option<O>, reverse: Option<O>) -> Self {
        Self {
            port,
            direction,
            forward,
            reverse,
        }
    }

    /// Relay port.
    #[inline]
    pub fn port(&self) -> u8 {
        self.port
    }

    /// Enabled lines.
    #[inline]
    pub fn direction(&self) -> RelayDirection {
        self.direction
    }

    /// Drive the relay lines.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::DirectionNotAllowed` for `Forward`/`Reverse`
    /// when that line is not enabled.
    pub fn set(&mut self, value: RelayValue) -> Result<()> {
        let (forward, reverse) = match value {
            RelayValue::Off => (false, false),
            RelayValue::On => (true, true),
            RelayValue::Forward if self.forward.is_some() => (true, false),
            RelayValue::Reverse if self.reverse.is_some() => (false, true),
            RelayValue::Forward | RelayValue::Reverse => {
                return Err(Error::Device(DeviceError::DirectionNotAllowed));
            }
        };
        if let Some(pin) = self.forward.as_mut() {
            drive(pin, forward)?;
        }
        if let Some(pin) = self.reverse.as_mut() {
            drive(pin, reverse)?;
        }
        Ok(())
    }

    /// Release the forward and reverse outputs.
    pub fn release(self) -> (Option<O>, Option<O>) {
        (self.forward, self.reverse)
    }
}

fn drive<O: OutputPin>(pin: &mut O, high: bool) -> Result<()> {
    if high {
        pin.set_high().map_err(pin_error)
    } else {
        pin.set_low().map_err(pin_error)
    }
}

/// Compressor enable output.
#[derive(Debug)]
pub struct Compressor<O> {
    module: Option<u8>,
    output: O,
    enabled: bool,
}

impl<O: OutputPin> Compressor<O> {
    pub(crate) fn new(module: Option<u8>, output: O) -> Self {
        Self {
            module,
            output,
            enabled: false,
        }
    }

    /// Pneumatics module, `None` for the default module.
    #[inline]
    pub fn module(&self) -> Option<u8> {
        self.module
    }

    /// Whether the compressor was last started.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start compressing.
    pub fn start(&mut self) -> Result<()> {
        self.output.set_high().map_err(pin_error)?;
        self.enabled = true;
        Ok(())
    }

    /// Stop compressing.
    pub fn stop(&mut self) -> Result<()> {
        self.output.set_low().map_err(pin_error)?;
        self.enabled = false;
        Ok(())
    }

    /// Release the output.
    pub fn release(self) -> O {
        self.output
    }
}

/// Skid-steer drive train of two or four speed controllers.
#[derive(Debug)]
pub struct DriveTrain<P> {
    wheels: Vec<(WheelPosition, SpeedController<P>), 4>,
}

impl<P: SetDutyCycle> DriveTrain<P> {
    pub(crate) fn new(wheels: Vec<(WheelPosition, SpeedController<P>), 4>) -> Self {
        Self { wheels }
    }

    /// Number of driven wheels.
    #[inline]
    pub fn num_wheels(&self) -> usize {
        self.wheels.len()
    }

    /// Speed controller of a wheel.
    pub fn wheel(&self, position: WheelPosition) -> Option<&SpeedController<P>> {
        self.wheels
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, controller)| controller)
    }

    /// Drive each side at its own speed.
    ///
    /// Right-side motors face the other way, so their command is negated.
    pub fn tank_drive(&mut self, left: f32, right: f32) -> Result<()> {
        for (position, controller) in self.wheels.iter_mut() {
            if position.is_left() {
                controller.set(left)?;
            } else {
                controller.set(-right)?;
            }
        }
        Ok(())
    }

    /// Stop all wheels.
    pub fn stop(&mut self) -> Result<()> {
        self.tank_drive(0.0, 0.0)
    }

    /// Release the wheel speed controllers.
    pub fn release(self) -> Vec<(WheelPosition, SpeedController<P>), 4> {
        self.wheels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_to_pulse_endpoints() {
        let bounds = SpeedControllerType::Talon.bounds();
        assert_eq!(speed_to_pulse(bounds, 0.0), bounds.center_us);
        assert_eq!(speed_to_pulse(bounds, 1.0), bounds.max_us);
        assert_eq!(speed_to_pulse(bounds, -1.0), bounds.min_us);
        assert_eq!(speed_to_pulse(bounds, 5.0), bounds.max_us);
        assert_eq!(speed_to_pulse(bounds, f32::NAN), bounds.center_us);
    }

    #[test]
    fn test_speed_to_pulse_is_asymmetric_per_side() {
        let bounds = SpeedControllerType::Jaguar.bounds();
        let half_forward = speed_to_pulse(bounds, 0.5);
        let half_reverse = speed_to_pulse(bounds, -0.5);
        assert!((half_forward - (1550.0 + 0.5 * 760.0)).abs() < 0.01);
        assert!((half_reverse - (1550.0 - 0.5 * 853.0)).abs() < 0.01);
    }
}
