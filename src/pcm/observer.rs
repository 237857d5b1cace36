//! Report sinks.

/// Receives loudness reports from an [`Analyzer`](super::Analyzer).
///
/// Both callbacks are optional. An observer that returns `false` from
/// `wants_peak` also spares the analyzer the per-sample peak tracking.
pub trait Observer {
    /// Window loudness in dB relative to full scale.
    fn on_rms(&mut self, _db: f64) {}

    /// Peak sample of the last interval in dB relative to full scale.
    fn on_peak(&mut self, _db: f64) {}

    fn wants_rms(&self) -> bool {
        true
    }

    fn wants_peak(&self) -> bool {
        true
    }
}

/// Observes nothing.
impl Observer for () {
    fn wants_rms(&self) -> bool {
        false
    }

    fn wants_peak(&self) -> bool {
        false
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_rms(&mut self, db: f64) {
        (**self).on_rms(db)
    }

    fn on_peak(&mut self, db: f64) {
        (**self).on_peak(db)
    }

    fn wants_rms(&self) -> bool {
        (**self).wants_rms()
    }

    fn wants_peak(&self) -> bool {
        (**self).wants_peak()
    }
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    fn on_rms(&mut self, db: f64) {
        (**self).on_rms(db)
    }

    fn on_peak(&mut self, db: f64) {
        (**self).on_peak(db)
    }

    fn wants_rms(&self) -> bool {
        (**self).wants_rms()
    }

    fn wants_peak(&self) -> bool {
        (**self).wants_peak()
    }
}

type Callback<'a> = Box<dyn FnMut(f64) + Send + 'a>;

/// Closure-backed observer. Missing closures are simply not called.
#[derive(Default)]
pub struct Callbacks<'a> {
    rms: Option<Callback<'a>>,
    peak: Option<Callback<'a>>,
}

impl<'a> Callbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rms(mut self, f: impl FnMut(f64) + Send + 'a) -> Self {
        self.rms = Some(Box::new(f));
        self
    }

    pub fn with_peak(mut self, f: impl FnMut(f64) + Send + 'a) -> Self {
        self.peak = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Callbacks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("rms", &self.rms.is_some())
            .field("peak", &self.peak.is_some())
            .finish()
    }
}

impl Observer for Callbacks<'_> {
    fn on_rms(&mut self, db: f64) {
        if let Some(f) = self.rms.as_mut() {
            f(db);
        }
    }

    fn on_peak(&mut self, db: f64) {
        if let Some(f) = self.peak.as_mut() {
            f(db);
        }
    }

    fn wants_rms(&self) -> bool {
        self.rms.is_some()
    }

    fn wants_peak(&self) -> bool {
        self.peak.is_some()
    }
}
