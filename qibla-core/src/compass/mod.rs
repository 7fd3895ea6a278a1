//! Compass and Heading Fusion Engine
//!
//! ## Overview
//!
//! Turns a raw magnetometer stream into what a Qibla compass shows: the
//! device heading, how far to turn toward the Kaaba, whether the readings
//! can be trusted yet, and whether the user is already facing the Qibla.
//!
//! ```text
//! MagnetometerSource ──→ heading ──→ Qibla offset ──→ calibration ──→ alignment
//!   (poll / push)         atan2      (-180, 180]       σ of last 10     |offset| ≤ 3°
//!                                                                          │
//!                                                     on_update(HeadingUpdate)
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!            initialize(observer)
//!                   │
//!   ┌──── Idle ◄────┘◄──────────── stop_updates() / sensor fault
//!   │                                    ▲
//!   └─ start_updates(source, cb) ──→ Streaming ── handle_sample / pump
//! ```
//!
//! A session owns the source and the callback. Dropping the session (stop,
//! restart, fault, or dropping the engine) detaches the source, so a
//! subscription can never outlive the engine that asked for it and never
//! exists twice.
//!
//! ## Threading
//!
//! The engine mutates through `&mut self`. Platforms that deliver readings
//! on their own threads wrap it in [`SharedCompass`] (requires `std`).

mod calibration;
mod heading;
#[cfg(feature = "std")]
mod shared;
mod source;

pub use calibration::{CalibrationEstimator, CalibrationStatus};
pub use heading::{heading_from_field, CardinalDirection};
#[cfg(feature = "std")]
pub use shared::SharedCompass;
pub use source::{MagneticSample, MagnetometerSource, ReplayMagnetometer};

use alloc::boxed::Box;

use fugit::MillisDurationU32;

use crate::{
    constants::compass::{
        ALIGNMENT_THRESHOLD_DEG, CALIBRATION_THRESHOLD_DEG, CALIBRATION_WINDOW_SIZE,
        COMPASS_SAMPLE_INTERVAL_MS, MAGNETIC_NOISE_FLOOR,
    },
    errors::{QiblaError, QiblaResult},
    geo::GeoPoint,
    qibla::{qibla_bearing, QiblaBearing},
    utils::normalize_to_180,
};

/// Compass tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompassConfig {
    /// Requested magnetometer interval
    #[cfg_attr(feature = "serde", serde(with = "interval_ms"))]
    pub sample_interval: MillisDurationU32,
    /// Horizontal components below this are dropped as noise (µT)
    pub noise_floor: f64,
    /// Heading σ under which the compass counts as calibrated (degrees)
    pub calibration_threshold_deg: f64,
    /// Largest offset still counted as facing the Qibla (degrees)
    pub alignment_threshold_deg: f64,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            sample_interval: MillisDurationU32::from_ticks(COMPASS_SAMPLE_INTERVAL_MS),
            noise_floor: MAGNETIC_NOISE_FLOOR,
            calibration_threshold_deg: CALIBRATION_THRESHOLD_DEG,
            alignment_threshold_deg: ALIGNMENT_THRESHOLD_DEG,
        }
    }
}

impl CompassConfig {
    /// 20 Hz updates for a needle that follows the hand closely
    pub fn responsive() -> Self {
        Self {
            sample_interval: MillisDurationU32::from_ticks(50),
            ..Self::default()
        }
    }

    /// 4 Hz updates and a wider alignment cone for battery-constrained use
    pub fn power_saving() -> Self {
        Self {
            sample_interval: MillisDurationU32::from_ticks(250),
            alignment_threshold_deg: 5.0,
            ..Self::default()
        }
    }
}

#[cfg(feature = "serde")]
mod interval_ms {
    use fugit::MillisDurationU32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        interval: &MillisDurationU32,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(interval.ticks())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<MillisDurationU32, D::Error> {
        u32::deserialize(deserializer).map(MillisDurationU32::from_ticks)
    }
}

/// What the compass shows after one accepted sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingUpdate {
    /// Device heading, `[0, 360)`
    pub heading_deg: f64,
    /// Signed turn toward the Qibla, `(-180, 180]`, positive clockwise
    pub qibla_offset_deg: f64,
    /// Within the alignment threshold
    pub is_aligned: bool,
    /// Calibration after this sample
    pub calibration: CalibrationStatus,
}

impl HeadingUpdate {
    /// Rose point of the heading
    pub fn cardinal(&self) -> CardinalDirection {
        CardinalDirection::from_heading(self.heading_deg)
    }
}

/// Mutable fusion state, reset whenever streaming stops
#[derive(Debug, Clone)]
struct CompassState {
    heading_deg: Option<f64>,
    qibla_offset_deg: Option<f64>,
    calibration: CalibrationEstimator<CALIBRATION_WINDOW_SIZE>,
}

impl CompassState {
    fn new(config: &CompassConfig) -> Self {
        Self {
            heading_deg: None,
            qibla_offset_deg: None,
            calibration: CalibrationEstimator::new(config.calibration_threshold_deg),
        }
    }

    fn apply(
        &mut self,
        sample: &MagneticSample,
        qibla: QiblaBearing,
        config: &CompassConfig,
    ) -> Option<HeadingUpdate> {
        let Some(heading_deg) = heading_from_field(sample, config.noise_floor) else {
            log_trace!("Dropped magnetometer sample below noise floor");
            return None;
        };

        let qibla_offset_deg = normalize_to_180(qibla.bearing_deg - heading_deg);
        self.heading_deg = Some(heading_deg);
        self.qibla_offset_deg = Some(qibla_offset_deg);

        if self.calibration.push(heading_deg) {
            if self.calibration.is_calibrated() {
                log_info!("Compass calibrated");
            } else {
                log_warn!("Compass lost calibration");
            }
        }

        Some(HeadingUpdate {
            heading_deg,
            qibla_offset_deg,
            is_aligned: libm::fabs(qibla_offset_deg) <= config.alignment_threshold_deg,
            calibration: self.calibration.status(),
        })
    }
}

/// Callback receiving every accepted heading
pub type UpdateCallback = Box<dyn FnMut(HeadingUpdate) + Send>;

/// An attached source and its subscriber
///
/// Dropping the session detaches the source.
struct SensorSession<S: MagnetometerSource> {
    source: S,
    on_update: UpdateCallback,
}

impl<S: MagnetometerSource> Drop for SensorSession<S> {
    fn drop(&mut self) {
        self.source.detach();
        log_debug!("Magnetometer detached");
    }
}

/// Stateful heading fusion for one observer
///
/// ```rust
/// use qibla_core::{CompassConfig, CompassEngine, GeoPoint, MagneticSample, ReplayMagnetometer};
///
/// let mut engine = CompassEngine::new(CompassConfig::default());
/// let qibla = engine.initialize(GeoPoint::new(40.7128, -74.0060)?);
///
/// engine.start_updates(ReplayMagnetometer::new(vec![]), |update| {
///     println!("turn {:+.0}°", update.qibla_offset_deg);
/// })?;
///
/// // Field pointing along the device's +x axis: heading 0°
/// let update = engine.handle_sample(MagneticSample::new(30.0, 0.0, -40.0)).unwrap();
/// assert_eq!(update.heading_deg, 0.0);
/// assert!((update.qibla_offset_deg - qibla.bearing_deg).abs() < 1e-9);
/// # Ok::<(), qibla_core::QiblaError>(())
/// ```
pub struct CompassEngine<S: MagnetometerSource> {
    config: CompassConfig,
    qibla: Option<QiblaBearing>,
    state: CompassState,
    session: Option<SensorSession<S>>,
}

impl<S: MagnetometerSource> CompassEngine<S> {
    /// Idle engine without a location
    pub fn new(config: CompassConfig) -> Self {
        Self {
            config,
            qibla: None,
            state: CompassState::new(&config),
            session: None,
        }
    }

    /// Set the observer location; computes and caches the Qibla bearing
    pub fn initialize(&mut self, observer: GeoPoint) -> QiblaBearing {
        let qibla = qibla_bearing(observer);
        log_debug!(
            "Qibla bearing {:.2} deg, {:.0} km",
            qibla.bearing_deg,
            qibla.distance_km
        );
        self.qibla = Some(qibla);
        qibla
    }

    /// Attach `source` and stream headings to `on_update`
    ///
    /// Any running session is stopped first, so at most one subscription
    /// exists. Fails with [`QiblaError::NotInitialized`] before
    /// [`initialize`](Self::initialize), or with the source's own error when
    /// it refuses to attach; the engine is Idle afterwards in both cases.
    pub fn start_updates<F>(&mut self, mut source: S, on_update: F) -> QiblaResult<()>
    where
        F: FnMut(HeadingUpdate) + Send + 'static,
    {
        self.stop_updates();

        if self.qibla.is_none() {
            return Err(QiblaError::NotInitialized);
        }

        if let Err(err) = source.attach(self.config.sample_interval) {
            log_warn!("Magnetometer attach failed: {}", err);
            return Err(err);
        }

        self.session = Some(SensorSession {
            source,
            on_update: Box::new(on_update),
        });
        log_info!(
            "Compass streaming every {} ms",
            self.config.sample_interval.ticks()
        );
        Ok(())
    }

    /// Feed one reading (push entry point)
    ///
    /// Returns the update delivered to the callback, or `None` while Idle
    /// or when the sample carries no usable direction.
    pub fn handle_sample(&mut self, sample: MagneticSample) -> Option<HeadingUpdate> {
        let session = self.session.as_mut()?;
        let qibla = self.qibla?;

        let update = self.state.apply(&sample, qibla, &self.config)?;
        (session.on_update)(update);
        Some(update)
    }

    /// Drain pending readings from the source (pull entry point)
    ///
    /// Returns how many updates were delivered. A sensor fault ends the
    /// session and is returned; there are no retries.
    pub fn pump(&mut self) -> QiblaResult<usize> {
        let Some(qibla) = self.qibla else {
            return Ok(0);
        };

        let mut delivered = 0;
        loop {
            let Some(session) = self.session.as_mut() else {
                return Ok(delivered);
            };

            match session.source.poll_sample() {
                Ok(sample) => {
                    if let Some(update) = self.state.apply(&sample, qibla, &self.config) {
                        (session.on_update)(update);
                        delivered += 1;
                    }
                }
                Err(nb::Error::WouldBlock) => return Ok(delivered),
                Err(nb::Error::Other(err)) => {
                    log_warn!("Magnetometer fault: {}", err);
                    self.stop_updates();
                    return Err(err);
                }
            }
        }
    }

    /// Detach the source and forget the calibration window
    ///
    /// No-op while Idle.
    pub fn stop_updates(&mut self) {
        if self.session.take().is_some() {
            self.state = CompassState::new(&self.config);
            log_info!("Compass stopped");
        }
    }

    /// Restart calibration from an empty window
    pub fn reset_calibration(&mut self) {
        self.state.calibration.reset();
        log_debug!("Calibration reset");
    }

    /// Whether a session is running
    pub fn is_streaming(&self) -> bool {
        self.session.is_some()
    }

    /// Cached Qibla bearing, if initialized
    pub fn qibla(&self) -> Option<QiblaBearing> {
        self.qibla
    }

    /// Last accepted heading
    pub fn heading(&self) -> Option<f64> {
        self.state.heading_deg
    }

    /// Last signed Qibla offset
    pub fn qibla_offset(&self) -> Option<f64> {
        self.state.qibla_offset_deg
    }

    /// Current calibration verdict and progress
    pub fn calibration_status(&self) -> CalibrationStatus {
        self.state.calibration.status()
    }

    /// Whether `heading_deg` points at the Qibla within the threshold
    ///
    /// Always `false` before [`initialize`](Self::initialize).
    pub fn is_pointing_toward_qibla(&self, heading_deg: f64) -> bool {
        self.qibla.is_some_and(|qibla| {
            libm::fabs(normalize_to_180(qibla.bearing_deg - heading_deg))
                <= self.config.alignment_threshold_deg
        })
    }

    /// Tuning in use
    pub fn config(&self) -> &CompassConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{sync::Arc, vec, vec::Vec};
    use core::sync::atomic::{AtomicUsize, Ordering};

    fn engine() -> CompassEngine<ReplayMagnetometer> {
        let mut engine = CompassEngine::new(CompassConfig::default());
        engine.initialize(GeoPoint::new(40.7128, -74.0060).unwrap());
        engine
    }

    /// Field whose heading is `deg`
    fn toward(deg: f64) -> MagneticSample {
        let rad = crate::utils::to_radians(deg);
        MagneticSample::new(30.0 * libm::cos(rad), 30.0 * libm::sin(rad), -40.0)
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnMut(HeadingUpdate) + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        (count, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn requires_location() {
        let mut engine = CompassEngine::new(CompassConfig::default());
        assert_eq!(
            engine.start_updates(ReplayMagnetometer::new(Vec::new()), |_| {}),
            Err(QiblaError::NotInitialized)
        );
        assert!(!engine.is_streaming());
        assert!(!engine.is_pointing_toward_qibla(58.0));
    }

    #[test]
    fn idle_engine_ignores_samples() {
        let mut engine = engine();
        assert_eq!(engine.handle_sample(toward(10.0)), None);
        assert_eq!(engine.heading(), None);
        assert_eq!(engine.pump(), Ok(0));
    }

    #[test]
    fn sample_flows_to_callback() {
        let mut engine = engine();
        let (count, callback) = counter();
        engine.start_updates(ReplayMagnetometer::new(Vec::new()), callback).unwrap();

        let update = engine.handle_sample(toward(58.0)).unwrap();
        assert!((update.heading_deg - 58.0).abs() < 1e-9);
        assert!(update.qibla_offset_deg.abs() < 1.0);
        assert!(update.is_aligned);
        assert_eq!(update.cardinal(), CardinalDirection::NE);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Noise is dropped without reaching the callback
        assert_eq!(engine.handle_sample(MagneticSample::new(0.001, 0.0, 9.0)), None);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn offset_takes_the_short_way() {
        let mut engine = engine();
        engine.start_updates(ReplayMagnetometer::new(Vec::new()), |_| {}).unwrap();
        let qibla = engine.qibla().unwrap().bearing_deg;

        let update = engine.handle_sample(toward(qibla + 170.0)).unwrap();
        assert!((update.qibla_offset_deg + 170.0).abs() < 1e-6);
        assert!(!update.is_aligned);

        let update = engine.handle_sample(toward(qibla - 20.0)).unwrap();
        assert!((update.qibla_offset_deg - 20.0).abs() < 1e-6);
    }

    #[test]
    fn pump_drains_replay() {
        let samples = vec![toward(58.0); 6];
        let mut engine = engine();
        let (count, callback) = counter();
        engine.start_updates(ReplayMagnetometer::new(samples), callback).unwrap();

        assert_eq!(engine.pump(), Ok(6));
        assert_eq!(count.load(Ordering::SeqCst), 6);
        assert!(engine.calibration_status().is_calibrated);
        assert_eq!(engine.pump(), Ok(0));
    }

    #[test]
    fn fault_ends_session() {
        let source = ReplayMagnetometer::new(vec![toward(10.0)]).then_fault("i2c timeout");
        let mut engine = engine();
        engine.start_updates(source, |_| {}).unwrap();

        assert_eq!(
            engine.pump(),
            Err(QiblaError::SensorFault { reason: "i2c timeout" })
        );
        assert!(!engine.is_streaming());
        assert_eq!(engine.heading(), None);
    }

    #[test]
    fn stop_resets_calibration() {
        let mut engine = engine();
        engine.start_updates(ReplayMagnetometer::new(vec![toward(90.0); 6]), |_| {}).unwrap();
        engine.pump().unwrap();
        assert!(engine.calibration_status().is_calibrated);

        engine.stop_updates();
        assert!(!engine.is_streaming());
        assert_eq!(engine.calibration_status(), CalibrationStatus::default());

        // Idle stop is a no-op
        engine.stop_updates();
        assert!(!engine.is_streaming());
    }

    #[test]
    fn restart_replaces_callback() {
        let mut engine = engine();
        let (first, cb1) = counter();
        let (second, cb2) = counter();

        engine.start_updates(ReplayMagnetometer::new(Vec::new()), cb1).unwrap();
        engine.start_updates(ReplayMagnetometer::new(Vec::new()), cb2).unwrap();
        engine.handle_sample(toward(0.0));

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn refused_attach_is_reported() {
        let mut engine = engine();
        assert_eq!(
            engine.start_updates(ReplayMagnetometer::permission_denied(), |_| {}),
            Err(QiblaError::PermissionDenied)
        );
        assert!(!engine.is_streaming());
    }

    #[test]
    fn alignment_uses_threshold() {
        let engine = engine();
        let qibla = engine.qibla().unwrap().bearing_deg;
        assert!(engine.is_pointing_toward_qibla(qibla + 2.9));
        assert!(engine.is_pointing_toward_qibla(qibla - 2.99));
        assert!(!engine.is_pointing_toward_qibla(qibla + 3.5));
    }

    #[test]
    fn presets_differ_only_where_named() {
        let responsive = CompassConfig::responsive();
        assert_eq!(responsive.sample_interval.ticks(), 50);
        assert_eq!(responsive.noise_floor, MAGNETIC_NOISE_FLOOR);

        let saving = CompassConfig::power_saving();
        assert_eq!(saving.sample_interval.ticks(), 250);
        assert_eq!(saving.alignment_threshold_deg, 5.0);
        assert_eq!(CompassConfig::default().sample_interval.ticks(), 100);
    }
}
