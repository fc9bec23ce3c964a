//! Build device handles from property paths.

use core::fmt::Write;

use heapless::Vec;

use crate::error::{error_text, joined_text, ArgumentError, DeviceError, Error, ErrorText, Result};
use crate::loader::{PropertyEnum, PropertyLoader};
use crate::properties::PropertySource;

use super::binding::HardwareBinding;
use super::devices::{Compressor, DriveTrain, Relay, Servo, Solenoid, SpeedController};
use super::types::{DeviceKind, RelayDirection, RelayLine, SpeedControllerType, WheelPosition};

/// Maximum number of segments in a path extended with device fields.
pub const MAX_PATH_DEPTH: usize = 8;

/// Discriminator naming the device variant for [`DeviceLoader::load_device`].
pub const DEVICE_FIELD: &str = "device";
/// Speed controller model.
pub const TYPE_FIELD: &str = "type";
/// PWM, solenoid channel or relay port number.
pub const PORT_FIELD: &str = "port";
/// Optional module number; absent selects the default module.
pub const CAN_ID_FIELD: &str = "canID";
/// Optional relay direction; absent means both lines.
pub const DIRECTION_FIELD: &str = "direction";
/// Number of drive train wheels (2 or 4).
pub const NUM_WHEELS_FIELD: &str = "numWheels";

type FieldPath<'p> = Vec<&'p str, MAX_PATH_DEPTH>;

/// Any of the devices [`DeviceLoader::load_device`] can build.
#[derive(Debug)]
pub enum Device<P, O> {
    /// PWM speed controller.
    SpeedController(SpeedController<P>),
    /// PWM servo.
    Servo(Servo<P>),
    /// Pneumatic solenoid.
    Solenoid(Solenoid<O>),
    /// Relay.
    Relay(Relay<O>),
    /// Compressor.
    Compressor(Compressor<O>),
    /// Drive train.
    DriveTrain(DriveTrain<P>),
}

impl<P, O> Device<P, O> {
    /// Variant of this device.
    pub fn kind(&self) -> DeviceKind {
        match self {
            Device::SpeedController(_) => DeviceKind::SpeedController,
            Device::Servo(_) => DeviceKind::Servo,
            Device::Solenoid(_) => DeviceKind::Solenoid,
            Device::Relay(_) => DeviceKind::Relay,
            Device::Compressor(_) => DeviceKind::Compressor,
            Device::DriveTrain(_) => DeviceKind::DriveTrain,
        }
    }
}

/// Loads devices described by properties under a path prefix.
///
/// # Example
///
/// ```rust,ignore
/// use robo_properties::{DeviceLoader, PropertyLoader};
///
/// let properties = PropertyLoader::parse("arm.type = Talon\narm.port = 3\n")?;
/// let mut devices = DeviceLoader::new(&properties, board);
/// let mut arm = devices.load_speed_controller(&["arm"])?;
/// arm.set(0.5)?;
/// ```
pub struct DeviceLoader<'a, S, B> {
    properties: &'a PropertyLoader<S>,
    binding: B,
}

impl<'a, S, B> DeviceLoader<'a, S, B>
where
    S: PropertySource,
    B: HardwareBinding,
{
    /// Create a loader reading `properties` and allocating from `binding`.
    pub fn new(properties: &'a PropertyLoader<S>, binding: B) -> Self {
        Self {
            properties,
            binding,
        }
    }

    /// The hardware binding.
    pub fn binding(&self) -> &B {
        &self.binding
    }

    /// Give back the hardware binding.
    pub fn into_binding(self) -> B {
        self.binding
    }

    /// Load a speed controller. Requires `type` and `port`.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::MissingField` if a field is not set,
    /// `DeviceError::UnsupportedVariant` for an unknown `type`, or the
    /// binding's error if the channel cannot be allocated.
    pub fn load_speed_controller(&mut self, path: &[&str]) -> Result<SpeedController<B::Pwm>> {
        let kind: SpeedControllerType = self.discriminator(path, TYPE_FIELD)?;
        let port = self.required_channel(path, PORT_FIELD)?;
        let pwm = self.binding.pwm(port)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("speed controller {} on pwm {}", kind.name(), port);

        Ok(SpeedController::new(kind, port, pwm))
    }

    /// Load a servo. Requires `port`.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::MissingField` if `port` is not set.
    pub fn load_servo(&mut self, path: &[&str]) -> Result<Servo<B::Pwm>> {
        let port = self.required_channel(path, PORT_FIELD)?;
        let pwm = self.binding.pwm(port)?;
        Ok(Servo::new(port, pwm))
    }

    /// Load a solenoid. Requires `port`; `canID` selects a module.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::MissingField` if `port` is not set.
    pub fn load_solenoid(&mut self, path: &[&str]) -> Result<Solenoid<B::Output>> {
        let channel = self.required_channel(path, PORT_FIELD)?;
        let module = self.optional_channel(path, CAN_ID_FIELD)?;
        let output = self.binding.solenoid(module, channel)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("solenoid on channel {} module {}", channel, module);

        Ok(Solenoid::new(module, channel, output))
    }

    /// Load a relay. Requires `port`; `direction` defaults to both lines.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::MissingField` if `port` is not set, or
    /// `ValueError::UnknownMember` for an unknown `direction`.
    pub fn load_relay(&mut self, path: &[&str]) -> Result<Relay<B::Output>> {
        let port = self.required_channel(path, PORT_FIELD)?;
        let direction = self
            .properties
            .get_enum::<RelayDirection>(&field_path(path, &[DIRECTION_FIELD])?)?
            .unwrap_or(RelayDirection::Both);

        let forward = if direction.forward() {
            Some(self.binding.relay(port, RelayLine::Forward)?)
        } else {
            None
        };
        let reverse = if direction.reverse() {
            match self.binding.relay(port, RelayLine::Reverse) {
                Ok(output) => Some(output),
                Err(e) => {
                    if let Some(output) = forward {
                        self.binding.release_output(output);
                    }
                    return Err(e);
                }
            }
        } else {
            None
        };

        Ok(Relay::new(port, direction, forward, reverse))
    }

    /// Load a compressor; `canID` selects a module.
    ///
    /// # Errors
    ///
    /// Returns the binding's error if the output cannot be allocated.
    pub fn load_compressor(&mut self, path: &[&str]) -> Result<Compressor<B::Output>> {
        let module = self.optional_channel(path, CAN_ID_FIELD)?;
        let output = self.binding.compressor(module)?;
        Ok(Compressor::new(module, output))
    }

    /// Load a drive train. Requires `numWheels` (2 or 4) and a speed
    /// controller under each wheel's sub-path.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedVariant` for any other wheel count,
    /// or any error from loading a wheel's speed controller.
    pub fn load_drive_train(&mut self, path: &[&str]) -> Result<DriveTrain<B::Pwm>> {
        let wheels_path = field_path(path, &[NUM_WHEELS_FIELD])?;
        let num_wheels = self
            .properties
            .get_int(&wheels_path)?
            .ok_or_else(|| missing_field(&wheels_path))?;
        let positions: &[WheelPosition] = match num_wheels {
            2 => &WheelPosition::TWO_WHEELS,
            4 => &WheelPosition::FOUR_WHEELS,
            other => {
                let mut value = ErrorText::new();
                let _ = write!(value, "{}", other);
                return Err(Error::Device(DeviceError::UnsupportedVariant {
                    key: joined_text(&wheels_path),
                    value,
                }));
            }
        };

        let mut wheels: Vec<(WheelPosition, SpeedController<B::Pwm>), 4> = Vec::new();
        for position in positions {
            let controller = match field_path(path, &[position.name()])
                .and_then(|wheel_path| self.load_speed_controller(&wheel_path))
            {
                Ok(controller) => controller,
                Err(e) => {
                    for (_, loaded) in wheels {
                        self.binding.release_pwm(loaded.release());
                    }
                    return Err(e);
                }
            };
            // At most four positions, matching the capacity.
            let _ = wheels.push((*position, controller));
        }
        Ok(DriveTrain::new(wheels))
    }

    /// Load whichever device the `device` field names.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::MissingField` if `device` is not set,
    /// `DeviceError::UnsupportedVariant` if it names no known variant, or
    /// the error of the variant's loader.
    pub fn load_device(&mut self, path: &[&str]) -> Result<Device<B::Pwm, B::Output>> {
        let kind: DeviceKind = self.discriminator(path, DEVICE_FIELD)?;
        Ok(match kind {
            DeviceKind::SpeedController => Device::SpeedController(self.load_speed_controller(path)?),
            DeviceKind::Servo => Device::Servo(self.load_servo(path)?),
            DeviceKind::Solenoid => Device::Solenoid(self.load_solenoid(path)?),
            DeviceKind::Relay => Device::Relay(self.load_relay(path)?),
            DeviceKind::Compressor => Device::Compressor(self.load_compressor(path)?),
            DeviceKind::DriveTrain => Device::DriveTrain(self.load_drive_train(path)?),
        })
    }

    /// Read a required discriminator; unknown names are unsupported variants.
    fn discriminator<T: PropertyEnum>(&self, path: &[&str], field: &str) -> Result<T> {
        let key = field_path(path, &[field])?;
        let value = self
            .properties
            .get_string(&key)?
            .ok_or_else(|| missing_field(&key))?;
        T::from_name(value).ok_or_else(|| {
            Error::Device(DeviceError::UnsupportedVariant {
                key: joined_text(&key),
                value: error_text(value),
            })
        })
    }

    fn required_channel(&self, path: &[&str], field: &str) -> Result<u8> {
        let key = field_path(path, &[field])?;
        self.channel(&key)?.ok_or_else(|| missing_field(&key))
    }

    fn optional_channel(&self, path: &[&str], field: &str) -> Result<Option<u8>> {
        self.channel(&field_path(path, &[field])?)
    }

    fn channel(&self, key: &[&str]) -> Result<Option<u8>> {
        match self.properties.get_int(key)? {
            None => Ok(None),
            Some(value) => u8::try_from(value).map(Some).map_err(|_| {
                Error::Device(DeviceError::InvalidChannel {
                    key: joined_text(key),
                    value,
                })
            }),
        }
    }
}

/// Append `fields` to `path`.
fn field_path<'p>(path: &[&'p str], fields: &[&'p str]) -> Result<FieldPath<'p>> {
    if path.is_empty() {
        return Err(Error::Argument(ArgumentError::Missing("path")));
    }
    let mut extended = FieldPath::new();
    for segment in path.iter().chain(fields) {
        extended
            .push(*segment)
            .map_err(|_| Error::Argument(ArgumentError::PathTooDeep(path.len())))?;
    }
    Ok(extended)
}

fn missing_field(key: &[&str]) -> Error {
    Error::Device(DeviceError::MissingField {
        key: joined_text(key),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_appends() {
        let path = field_path(&["drive", "left"], &["port"]).unwrap();
        assert_eq!(path.as_slice(), ["drive", "left", "port"]);
    }

    #[test]
    fn test_field_path_rejects_empty_prefix() {
        assert_eq!(
            field_path(&[], &["port"]),
            Err(Error::Argument(ArgumentError::Missing("path")))
        );
    }

    #[test]
    fn test_field_path_too_deep() {
        let deep = ["a"; MAX_PATH_DEPTH];
        assert_eq!(
            field_path(&deep, &["port"]),
            Err(Error::Argument(ArgumentError::PathTooDeep(MAX_PATH_DEPTH)))
        );
    }
}
