//! Magnetometer sources
//!
//! The platform owns the actual sensor. It is reached through
//! [`MagnetometerSource`], which follows the `nb` polling pattern:
//!
//! - `Ok(sample)`: a reading is ready
//! - `Err(nb::Error::WouldBlock)`: nothing pending, poll again later
//! - `Err(nb::Error::Other(e))`: the stream broke
//!
//! Push-style platforms (a callback per reading) skip polling and feed
//! [`CompassEngine::handle_sample`](super::CompassEngine::handle_sample)
//! directly; the source then only does attach/detach.

use alloc::vec::Vec;

use fugit::MillisDurationU32;

use crate::errors::{QiblaError, QiblaResult};

/// One raw magnetometer reading in device coordinates (µT)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagneticSample {
    /// Field along the device x axis
    pub x: f64,
    /// Field along the device y axis
    pub y: f64,
    /// Field along the device z axis (unused for the planar heading)
    pub z: f64,
}

impl MagneticSample {
    /// Build a sample from its three components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Platform magnetometer
///
/// `attach` is called once per session and may refuse; `detach` is called
/// exactly once for every successful `attach`, when the session ends.
pub trait MagnetometerSource {
    /// Subscribe to readings at roughly `interval`
    fn attach(&mut self, interval: MillisDurationU32) -> QiblaResult<()>;

    /// Next pending reading (non-blocking)
    fn poll_sample(&mut self) -> nb::Result<MagneticSample, QiblaError>;

    /// Release the subscription
    fn detach(&mut self);
}

/// Why a replay source refuses to attach
#[derive(Debug, Clone, Copy, PartialEq)]
enum Availability {
    Available,
    Refuses(QiblaError),
}

/// In-memory source replaying recorded readings
///
/// Useful for tests, demos and re-running a captured session. Once the
/// recording is exhausted it reports `WouldBlock` like an idle sensor,
/// or a fault if one was scripted with [`then_fault`](Self::then_fault).
///
/// ```rust
/// use qibla_core::{MagneticSample, MagnetometerSource, ReplayMagnetometer};
/// use fugit::MillisDurationU32;
///
/// let mut source = ReplayMagnetometer::new(vec![MagneticSample::new(0.0, 30.0, -40.0)]);
/// source.attach(MillisDurationU32::from_ticks(100)).unwrap();
/// assert!(source.poll_sample().is_ok());
/// assert!(matches!(source.poll_sample(), Err(nb::Error::WouldBlock)));
/// ```
#[derive(Debug, Clone)]
pub struct ReplayMagnetometer {
    samples: Vec<MagneticSample>,
    position: usize,
    availability: Availability,
    fault: Option<QiblaError>,
    interval: Option<MillisDurationU32>,
}

impl ReplayMagnetometer {
    /// Replay `samples` in order
    pub fn new(samples: Vec<MagneticSample>) -> Self {
        Self {
            samples,
            position: 0,
            availability: Availability::Available,
            fault: None,
            interval: None,
        }
    }

    /// A device without a magnetometer
    pub fn unavailable() -> Self {
        Self {
            availability: Availability::Refuses(QiblaError::SensorUnavailable {
                reason: "no magnetometer on this device",
            }),
            ..Self::new(Vec::new())
        }
    }

    /// A device where the user denied motion-sensor access
    pub fn permission_denied() -> Self {
        Self {
            availability: Availability::Refuses(QiblaError::PermissionDenied),
            ..Self::new(Vec::new())
        }
    }

    /// Report a sensor fault once the recording runs out
    pub fn then_fault(mut self, reason: &'static str) -> Self {
        self.fault = Some(QiblaError::SensorFault { reason });
        self
    }

    /// Append a reading to the end of the recording
    pub fn push(&mut self, sample: MagneticSample) {
        self.samples.push(sample);
    }

    /// Interval requested by the current subscription
    pub fn interval(&self) -> Option<MillisDurationU32> {
        self.interval
    }

    /// Whether a subscription is active
    pub fn is_attached(&self) -> bool {
        self.interval.is_some()
    }

    /// Readings not yet delivered
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.position
    }
}

impl MagnetometerSource for ReplayMagnetometer {
    fn attach(&mut self, interval: MillisDurationU32) -> QiblaResult<()> {
        if let Availability::Refuses(err) = self.availability {
            return Err(err);
        }
        self.interval = Some(interval);
        Ok(())
    }

    fn poll_sample(&mut self) -> nb::Result<MagneticSample, QiblaError> {
        if !self.is_attached() {
            return Err(nb::Error::WouldBlock);
        }

        match self.samples.get(self.position) {
            Some(&sample) => {
                self.position += 1;
                Ok(sample)
            }
            None => match self.fault {
                Some(err) => Err(nb::Error::Other(err)),
                None => Err(nb::Error::WouldBlock),
            },
        }
    }

    fn detach(&mut self) {
        self.interval = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn interval() -> MillisDurationU32 {
        MillisDurationU32::from_ticks(100)
    }

    #[test]
    fn replays_in_order_then_blocks() {
        let mut source = ReplayMagnetometer::new(vec![
            MagneticSample::new(1.0, 0.0, 0.0),
            MagneticSample::new(0.0, 1.0, 0.0),
        ]);
        source.attach(interval()).unwrap();

        assert_eq!(source.remaining(), 2);
        assert_eq!(source.poll_sample().unwrap().x, 1.0);
        assert_eq!(source.poll_sample().unwrap().y, 1.0);
        assert!(matches!(source.poll_sample(), Err(nb::Error::WouldBlock)));
    }

    #[test]
    fn silent_until_attached() {
        let mut source = ReplayMagnetometer::new(vec![MagneticSample::new(1.0, 0.0, 0.0)]);
        assert!(matches!(source.poll_sample(), Err(nb::Error::WouldBlock)));

        source.attach(interval()).unwrap();
        assert_eq!(source.interval(), Some(interval()));
        source.detach();
        assert!(!source.is_attached());
        assert!(matches!(source.poll_sample(), Err(nb::Error::WouldBlock)));
    }

    #[test]
    fn refusing_sources() {
        assert!(matches!(
            ReplayMagnetometer::unavailable().attach(interval()),
            Err(QiblaError::SensorUnavailable { .. })
        ));
        assert_eq!(
            ReplayMagnetometer::permission_denied().attach(interval()),
            Err(QiblaError::PermissionDenied)
        );
    }

    #[test]
    fn scripted_fault_after_recording() {
        let mut source =
            ReplayMagnetometer::new(vec![MagneticSample::new(1.0, 0.0, 0.0)]).then_fault("bus reset");
        source.attach(interval()).unwrap();

        assert!(source.poll_sample().is_ok());
        assert!(matches!(
            source.poll_sample(),
            Err(nb::Error::Other(QiblaError::SensorFault { reason: "bus reset" }))
        ));
    }
}
