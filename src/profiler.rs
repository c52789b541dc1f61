use itertools::Itertools;
use log::info;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// Statistiques en flux (min / max / moyenne), sans conserver les
/// échantillons individuels.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesStats {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl SeriesStats {
    fn record(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

struct ProfilerInner {
    /// Durées mesurées par profile_block / frame guard, en ms
    timings: HashMap<String, SeriesStats>,
    /// Valeurs scalaires (compteurs de particules, etc.)
    metrics: HashMap<String, SeriesStats>,
    frame_times: SeriesStats,
}

/// Profiler partagé et thread-safe
#[derive(Clone)]
pub struct Profiler {
    inner: Arc<RwLock<ProfilerInner>>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ProfilerInner {
                timings: HashMap::new(),
                metrics: HashMap::new(),
                frame_times: SeriesStats::default(),
            })),
        }
    }

    /// Mesure globale d'une frame (RAII)
    pub fn frame(&self) -> FrameGuard {
        FrameGuard {
            profiler: self.clone(),
            start: Instant::now(),
        }
    }

    /// Profile un bloc de code et retourne sa valeur de retour
    pub fn profile_block<T, F>(&self, label: impl Into<String>, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        let dt = start.elapsed().as_secs_f64() * 1000.0;

        let mut inner = self.inner.write().unwrap();
        inner.timings.entry(label.into()).or_default().record(dt);

        result
    }

    /// Enregistre une métrique scalaire
    pub fn record_metric(&self, label: impl Into<String>, value: f64) {
        let mut inner = self.inner.write().unwrap();
        inner.metrics.entry(label.into()).or_default().record(value);
    }

    /// FPS moyen sur la fenêtre de mesure courante
    pub fn fps(&self) -> f32 {
        let inner = self.inner.read().unwrap();
        let avg = inner.frame_times.avg();
        if avg <= 0.0 {
            0.0
        } else {
            (1000.0 / avg) as f32
        }
    }

    pub fn frame_times(&self) -> SeriesStats {
        self.inner.read().unwrap().frame_times
    }

    pub fn timing_summary(&self, label: &str) -> Option<SeriesStats> {
        self.inner.read().unwrap().timings.get(label).copied()
    }

    pub fn metric_summary(&self, label: &str) -> Option<SeriesStats> {
        self.inner.read().unwrap().metrics.get(label).copied()
    }

    /// Vide la fenêtre de mesure (appelé après chaque log périodique)
    pub fn reset(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.timings.clear();
        inner.metrics.clear();
        inner.frame_times = SeriesStats::default();
    }

    /// Log toutes les métriques vers l'info log avec un target spécifique
    pub fn log_metrics_for_target(&self, target: &str, show_fps: bool) {
        if show_fps {
            info!(target: target, "{:.2} FPS", self.fps());
        }

        let inner = self.inner.read().unwrap();
        for (label, stats) in inner.timings.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            info!(
                target: target,
                "{}: avg = {:.3} ms | min = {:.3} ms | max = {:.3} ms",
                label,
                stats.avg(),
                stats.min(),
                stats.max()
            );
        }
        for (label, stats) in inner.metrics.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            info!(
                target: target,
                "{}: avg = {:.2} | min = {} | max = {}",
                label,
                stats.avg(),
                stats.min(),
                stats.max()
            );
        }
    }
}

/// Mesure globale d'une frame
pub struct FrameGuard {
    profiler: Profiler,
    start: Instant,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        let dt = self.start.elapsed().as_secs_f64() * 1000.0;
        let mut inner = self.profiler.inner.write().unwrap();
        inner.frame_times.record(dt);
    }
}

/// Macro helper : déduit automatiquement le target via le module appelant
#[macro_export]
macro_rules! log_metrics {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), false);
    };
}

#[macro_export]
macro_rules! log_metrics_and_fps {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), true);
    };
}
