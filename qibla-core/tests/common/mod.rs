//! Common fixtures and helpers for integration tests
//!
//! - Reference locations and dates
//! - Sample generators for a device pointing at a known heading
//! - A scripted magnetometer that records its subscription lifecycle

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use fugit::MillisDurationU32;
use qibla_core::{
    CivilDate, GeoPoint, MagneticSample, MagnetometerSource, QiblaError, QiblaResult,
};

pub fn new_york() -> GeoPoint {
    GeoPoint::new(40.7128, -74.0060).unwrap()
}

pub fn london() -> GeoPoint {
    GeoPoint::new(51.5074, -0.1278).unwrap()
}

pub fn tromso() -> GeoPoint {
    GeoPoint::new(69.6492, 18.9553).unwrap()
}

pub fn jakarta() -> GeoPoint {
    GeoPoint::new(-6.2088, 106.8456).unwrap()
}

pub fn date(year: i32, month: u8, day: u8) -> CivilDate {
    CivilDate::new(year, month, day).unwrap()
}

/// Horizontal field of about 30 µT whose heading is `heading_deg`
pub fn field_toward(heading_deg: f64) -> MagneticSample {
    let rad = heading_deg.to_radians();
    MagneticSample::new(30.0 * rad.cos(), 30.0 * rad.sin(), -42.0)
}

/// Headings around `center` with a deterministic ±`spread` jitter
pub fn jittered(center: f64, spread: f64, count: usize) -> Vec<MagneticSample> {
    let mut state = 0x2545_f491_u32;
    (0..count)
        .map(|_| {
            // Xorshift
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let unit = f64::from(state) / f64::from(u32::MAX);
            field_toward(center + (unit * 2.0 - 1.0) * spread)
        })
        .collect()
}

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = (($actual) - ($expected)).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}

/// Counters shared between a test and a [`ScriptedMagnetometer`] moved
/// into an engine
#[derive(Debug, Clone, Default)]
pub struct SourceProbe {
    attaches: Arc<AtomicUsize>,
    detaches: Arc<AtomicUsize>,
    last_interval_ms: Arc<AtomicUsize>,
}

impl SourceProbe {
    pub fn attaches(&self) -> usize {
        self.attaches.load(Ordering::SeqCst)
    }

    pub fn detaches(&self) -> usize {
        self.detaches.load(Ordering::SeqCst)
    }

    /// Attached subscriptions not yet released
    pub fn active(&self) -> usize {
        self.attaches() - self.detaches()
    }

    pub fn last_interval_ms(&self) -> usize {
        self.last_interval_ms.load(Ordering::SeqCst)
    }
}

/// Magnetometer driven by a fixed script of poll results
pub struct ScriptedMagnetometer {
    script: std::collections::VecDeque<nb::Result<MagneticSample, QiblaError>>,
    refuse: Option<QiblaError>,
    probe: SourceProbe,
}

impl ScriptedMagnetometer {
    pub fn new(probe: &SourceProbe) -> Self {
        Self {
            script: Default::default(),
            refuse: None,
            probe: probe.clone(),
        }
    }

    pub fn refusing(probe: &SourceProbe, err: QiblaError) -> Self {
        Self {
            refuse: Some(err),
            ..Self::new(probe)
        }
    }

    pub fn sample(mut self, sample: MagneticSample) -> Self {
        self.script.push_back(Ok(sample));
        self
    }

    pub fn samples(mut self, samples: impl IntoIterator<Item = MagneticSample>) -> Self {
        self.script.extend(samples.into_iter().map(Ok));
        self
    }

    /// A poll that finds nothing pending
    pub fn idle(mut self) -> Self {
        self.script.push_back(Err(nb::Error::WouldBlock));
        self
    }

    pub fn fault(mut self, reason: &'static str) -> Self {
        self.script
            .push_back(Err(nb::Error::Other(QiblaError::SensorFault { reason })));
        self
    }
}

impl MagnetometerSource for ScriptedMagnetometer {
    fn attach(&mut self, interval: MillisDurationU32) -> QiblaResult<()> {
        if let Some(err) = self.refuse {
            return Err(err);
        }
        self.probe.attaches.fetch_add(1, Ordering::SeqCst);
        self.probe
            .last_interval_ms
            .store(interval.ticks() as usize, Ordering::SeqCst);
        Ok(())
    }

    fn poll_sample(&mut self) -> nb::Result<MagneticSample, QiblaError> {
        self.script.pop_front().unwrap_or(Err(nb::Error::WouldBlock))
    }

    fn detach(&mut self) {
        self.probe.detaches.fetch_add(1, Ordering::SeqCst);
    }
}
