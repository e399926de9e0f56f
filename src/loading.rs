//! Fake loading bar shown before the card appears.

use crate::config::LoadingConfig;
use crate::random::RandomSource;

pub const COMPLETE: f64 = 100.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LoadingTick {
    pub progress: f64,
    pub status: String,
    pub finished: bool,
}

#[derive(Clone, Debug)]
pub struct LoadingSequence {
    cfg: LoadingConfig,
    progress: f64,
    status: String,
}

impl LoadingSequence {
    pub fn new(cfg: LoadingConfig) -> Self {
        let status = cfg.initial_status.clone();
        Self { cfg, progress: 0.0, status }
    }

    /// Advance by a random step of at most `max_step`, landing on exactly 100
    /// instead of overshooting. Ticking a finished sequence is a no-op.
    pub fn tick(&mut self, rng: &mut impl RandomSource) -> LoadingTick {
        if !self.is_finished() {
            self.progress = (self.progress + rng.next_unit() * self.cfg.max_step).min(COMPLETE);
            self.status = status_for(&self.cfg.status_messages, self.progress)
                .unwrap_or(self.cfg.initial_status.as_str())
                .to_string();
        }
        LoadingTick {
            progress: self.progress,
            status: self.status.clone(),
            finished: self.is_finished(),
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= COMPLETE
    }
}

/// Message for a progress value: messages are spread evenly from 0% to 100%,
/// the last one shown only on completion.
pub fn status_for(messages: &[String], progress: f64) -> Option<&str> {
    if messages.is_empty() {
        return None;
    }
    let last = messages.len() - 1;
    let idx = ((progress / COMPLETE) * last as f64).floor() as usize;
    messages.get(idx.min(last)).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Sequence;

    #[test]
    fn reaches_exactly_one_hundred() {
        let mut seq = LoadingSequence::new(LoadingConfig::default());
        let mut rng = Sequence::new(&[0.9, 0.4, 0.999, 0.7]);
        let mut ticks = 0;
        while !seq.is_finished() {
            let t = seq.tick(&mut rng);
            assert!(t.progress <= COMPLETE);
            ticks += 1;
            assert!(ticks < 1_000);
        }
        assert_eq!(seq.progress(), 100.0);
        assert_eq!(seq.status(), "Ready!");
        let after = seq.tick(&mut rng);
        assert_eq!(after.progress, 100.0);
        assert!(after.finished);
    }

    #[test]
    fn progress_is_monotonic() {
        let mut seq = LoadingSequence::new(LoadingConfig::default());
        let mut rng = Sequence::new(&[0.0, 0.3, 0.6]);
        let mut last = 0.0;
        for _ in 0..100 {
            let t = seq.tick(&mut rng);
            assert!(t.progress >= last);
            last = t.progress;
        }
    }

    #[test]
    fn status_spreads_over_messages() {
        let msgs = LoadingConfig::default().status_messages;
        assert_eq!(status_for(&msgs, 0.0), Some("Initializing Romance..."));
        assert_eq!(status_for(&msgs, 19.9), Some("Initializing Romance..."));
        assert_eq!(status_for(&msgs, 20.0), Some("Checking Vibe Levels..."));
        assert_eq!(status_for(&msgs, 99.9), Some("Optimizing Cuteness..."));
        assert_eq!(status_for(&msgs, 100.0), Some("Ready!"));
        assert_eq!(status_for(&[], 50.0), None);
    }

    #[test]
    fn starts_with_initial_status() {
        let seq = LoadingSequence::new(LoadingConfig::default());
        assert_eq!(seq.status(), "Initializing...");
        assert_eq!(seq.progress(), 0.0);
    }
}
