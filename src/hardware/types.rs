//! Discriminator and option enums read from device properties.

use crate::property_enum;

property_enum! {
    /// PWM speed controller models.
    pub enum SpeedControllerType {
        /// Jaguar.
        Jaguar,
        /// Talon.
        Talon,
        /// Victor.
        Victor,
    }
}

/// Pulse widths in microseconds at full reverse, neutral and full forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseBounds {
    /// Full reverse.
    pub min_us: f32,
    /// Neutral.
    pub center_us: f32,
    /// Full forward.
    pub max_us: f32,
}

impl SpeedControllerType {
    /// Pulse bounds the controller is calibrated to.
    pub const fn bounds(self) -> PulseBounds {
        match self {
            SpeedControllerType::Jaguar => PulseBounds {
                min_us: 697.0,
                center_us: 1550.0,
                max_us: 2310.0,
            },
            SpeedControllerType::Talon => PulseBounds {
                min_us: 989.0,
                center_us: 1539.0,
                max_us: 2037.0,
            },
            SpeedControllerType::Victor => PulseBounds {
                min_us: 1026.0,
                center_us: 1507.0,
                max_us: 2027.0,
            },
        }
    }
}

property_enum! {
    /// Which relay lines a relay may drive.
    pub enum RelayDirection {
        /// Forward and reverse.
        Both,
        /// Forward line only.
        Forward,
        /// Reverse line only.
        Reverse,
    }
}

impl RelayDirection {
    /// Whether the forward line is enabled.
    pub const fn forward(self) -> bool {
        matches!(self, RelayDirection::Both | RelayDirection::Forward)
    }

    /// Whether the reverse line is enabled.
    pub const fn reverse(self) -> bool {
        matches!(self, RelayDirection::Both | RelayDirection::Reverse)
    }
}

/// One output line of a relay port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayLine {
    /// Forward line.
    Forward,
    /// Reverse line.
    Reverse,
}

/// Requested relay output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayValue {
    /// All lines off.
    Off,
    /// All enabled lines on.
    On,
    /// Forward on, reverse off.
    Forward,
    /// Reverse on, forward off.
    Reverse,
}

property_enum! {
    /// Device variants selectable by the `device` field.
    pub enum DeviceKind {
        /// PWM speed controller.
        SpeedController = "speedController",
        /// PWM servo.
        Servo = "servo",
        /// Pneumatic solenoid.
        Solenoid = "solenoid",
        /// Spike-style relay.
        Relay = "relay",
        /// Compressor.
        Compressor = "compressor",
        /// Drive train of speed controllers.
        DriveTrain = "driveTrain",
    }
}

property_enum! {
    /// Wheel positions; each name is the wheel's sub-path.
    pub enum WheelPosition {
        /// Left side of a two-wheel drive.
        Left = "left",
        /// Right side of a two-wheel drive.
        Right = "right",
        /// Front left of a four-wheel drive.
        FrontLeft = "frontLeft",
        /// Rear left of a four-wheel drive.
        RearLeft = "rearLeft",
        /// Front right of a four-wheel drive.
        FrontRight = "frontRight",
        /// Rear right of a four-wheel drive.
        RearRight = "rearRight",
    }
}

impl WheelPosition {
    /// Wheels of a two-wheel drive.
    pub const TWO_WHEELS: [WheelPosition; 2] = [WheelPosition::Left, WheelPosition::Right];

    /// Wheels of a four-wheel drive.
    pub const FOUR_WHEELS: [WheelPosition; 4] = [
        WheelPosition::FrontLeft,
        WheelPosition::RearLeft,
        WheelPosition::FrontRight,
        WheelPosition::RearRight,
    ];

    /// Whether the wheel is on the left side.
    pub const fn is_left(self) -> bool {
        matches!(
            self,
            WheelPosition::Left | WheelPosition::FrontLeft | WheelPosition::RearLeft
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PropertyEnum;

    #[test]
    fn test_device_kind_names() {
        assert_eq!(DeviceKind::from_name("driveTrain"), Some(DeviceKind::DriveTrain));
        assert_eq!(DeviceKind::from_name("DriveTrain"), None);
        assert_eq!(DeviceKind::Servo.name(), "servo");
    }

    #[test]
    fn test_relay_direction_lines() {
        assert!(RelayDirection::Both.forward() && RelayDirection::Both.reverse());
        assert!(RelayDirection::Forward.forward() && !RelayDirection::Forward.reverse());
        assert!(!RelayDirection::Reverse.forward() && RelayDirection::Reverse.reverse());
    }

    #[test]
    fn test_bounds_are_ordered() {
        for (_, kind) in SpeedControllerType::MEMBERS {
            let b = kind.bounds();
            assert!(b.min_us < b.center_us && b.center_us < b.max_us);
        }
    }
}
