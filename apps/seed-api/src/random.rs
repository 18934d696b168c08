use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform draws in `[0, 1)` for the mock generators.
pub(crate) trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Thread-local generator; the default outside tests.
#[derive(Default)]
pub(crate) struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Reproducible stream selected by `API_RANDOM_SEED`.
pub(crate) struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&self) -> f64 {
        self.rng.lock().random::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[cfg(test)]
pub(crate) struct SequenceRandom {
    values: Vec<f64>,
    cursor: Mutex<usize>,
}

#[cfg(test)]
impl SequenceRandom {
    pub(crate) fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "sequence needs at least one value");
        Self {
            values,
            cursor: Mutex::new(0),
        }
    }

    pub(crate) fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

#[cfg(test)]
impl RandomSource for SequenceRandom {
    fn next_f64(&self) -> f64 {
        let mut cursor = self.cursor.lock();
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        value
    }
}

/// Pick the process-wide source from the environment.
pub(crate) fn from_env() -> std::sync::Arc<dyn RandomSource> {
    match std::env::var("API_RANDOM_SEED")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
    {
        Some(seed) => {
            tracing::info!(seed, "mock data seeded");
            std::sync::Arc::new(SeededRandom::new(seed))
        }
        None => std::sync::Arc::new(ThreadRandom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_streams_repeat() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        for _ in 0..16 {
            let x = a.next_f64();
            assert_eq!(x, b.next_f64());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn sequence_wraps() {
        let seq = SequenceRandom::new(vec![0.1, 0.9]);
        assert_eq!(seq.next_f64(), 0.1);
        assert_eq!(seq.next_f64(), 0.9);
        assert_eq!(seq.next_f64(), 0.1);
    }

    #[test]
    fn thread_random_in_range() {
        let r = ThreadRandom;
        for _ in 0..64 {
            assert!((0.0..1.0).contains(&r.next_f64()));
        }
    }
}
