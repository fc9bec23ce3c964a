//! Hardware module for robo-properties.
//!
//! Turns property paths into device handles. Field names are fixed by the
//! property file format: `type`, `port`, `canID`, `direction`, `numWheels`
//! and `device`, plus one sub-path per drive train wheel.

mod binding;
mod devices;
mod loader;
pub mod types;

pub use binding::HardwareBinding;
pub use devices::{
    speed_to_pulse, Compressor, DriveTrain, Relay, Servo, Solenoid, SpeedController,
    PWM_PERIOD_US, SERVO_MAX_ANGLE, SERVO_MAX_PULSE_US, SERVO_MIN_PULSE_US,
};
pub use loader::{
    Device, DeviceLoader, CAN_ID_FIELD, DEVICE_FIELD, DIRECTION_FIELD, MAX_PATH_DEPTH,
    NUM_WHEELS_FIELD, PORT_FIELD, TYPE_FIELD,
};
pub use types::{
    DeviceKind, PulseBounds, RelayDirection, RelayLine, RelayValue, SpeedControllerType,
    WheelPosition,
};
