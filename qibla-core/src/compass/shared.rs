//! Thread-safe compass handle

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{CalibrationStatus, CompassEngine, HeadingUpdate, MagneticSample, MagnetometerSource};
use crate::{errors::QiblaResult, geo::GeoPoint, qibla::QiblaBearing};

/// Cloneable handle serializing access to one [`CompassEngine`]
///
/// Sensor callbacks on a platform thread and UI calls on another all go
/// through the same lock, so samples are processed one at a time in
/// arrival order. A panic inside an update callback poisons the lock; the
/// handle keeps working with the engine state as it was left.
pub struct SharedCompass<S: MagnetometerSource> {
    inner: Arc<Mutex<CompassEngine<S>>>,
}

impl<S: MagnetometerSource> Clone for SharedCompass<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: MagnetometerSource> SharedCompass<S> {
    /// Wrap an engine
    pub fn new(engine: CompassEngine<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CompassEngine<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`CompassEngine::initialize`]
    pub fn initialize(&self, observer: GeoPoint) -> QiblaBearing {
        self.lock().initialize(observer)
    }

    /// See [`CompassEngine::start_updates`]
    pub fn start_updates<F>(&self, source: S, on_update: F) -> QiblaResult<()>
    where
        F: FnMut(HeadingUpdate) + Send + 'static,
    {
        self.lock().start_updates(source, on_update)
    }

    /// See [`CompassEngine::handle_sample`]
    pub fn handle_sample(&self, sample: MagneticSample) -> Option<HeadingUpdate> {
        self.lock().handle_sample(sample)
    }

    /// See [`CompassEngine::pump`]
    pub fn pump(&self) -> QiblaResult<usize> {
        self.lock().pump()
    }

    /// See [`CompassEngine::stop_updates`]
    pub fn stop_updates(&self) {
        self.lock().stop_updates()
    }

    /// See [`CompassEngine::reset_calibration`]
    pub fn reset_calibration(&self) {
        self.lock().reset_calibration()
    }

    /// See [`CompassEngine::calibration_status`]
    pub fn calibration_status(&self) -> CalibrationStatus {
        self.lock().calibration_status()
    }

    /// See [`CompassEngine::is_streaming`]
    pub fn is_streaming(&self) -> bool {
        self.lock().is_streaming()
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut CompassEngine<S>) -> R) -> R {
        f(&mut *self.lock())
    }
}
