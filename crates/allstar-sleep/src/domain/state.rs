//! Pulse collection, recovery and streak.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::tuning::SleepTuning;

/// An expanding ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    /// Unique within a session.
    pub id: u64,
    /// Simulation time at which the pulse spawned.
    pub born_at: Duration,
    /// Radius relative to the target ring; a pure function of age.
    pub scale: f64,
    /// Triangular fade-in/fade-out profile over the pulse's life.
    pub opacity: f64,
}

impl Pulse {
    /// Creates a pulse born at `now`.
    #[must_use]
    pub fn spawn(id: u64, now: Duration) -> Self {
        Self {
            id,
            born_at: now,
            scale: 0.0,
            opacity: 0.0,
        }
    }

    /// Recomputes scale and opacity for simulation time `now`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aged(self, now: Duration, tuning: &SleepTuning) -> Self {
        let age_ms = now.saturating_sub(self.born_at).as_secs_f64() * 1000.0;
        let age = age_ms / tuning.lifetime_unit_ms as f64;
        let opacity = if age < 0.5 {
            age * 2.0
        } else {
            1.0 - (age - 0.5) * 2.0
        };
        Self {
            scale: age * tuning.growth,
            opacity: opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Distance of this pulse from the sweet-spot radius.
    #[must_use]
    pub fn sync_error(&self, tuning: &SleepTuning) -> f64 {
        (self.scale - tuning.sweet_spot).abs()
    }
}

/// How a tap was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapVerdict {
    /// A ring was on the sweet spot; carries the consumed pulse's id.
    Synced(u64),
    /// No ring was close enough.
    Missed,
}

/// Snapshot of the pulse simulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PulseState {
    /// Live pulses, oldest first.
    pub pulses: Vec<Pulse>,
    /// Recovery score in `[0, target_recovery]`.
    pub recovery: f64,
    /// Consecutive synced taps.
    pub streak: u32,
    /// Spawn time of the most recent pulse.
    pub last_spawned_at: Option<Duration>,
    /// Id for the next pulse.
    pub next_id: u64,
}

impl PulseState {
    /// Ages every pulse to `now`, drops the fully expanded ones and spawns a
    /// new pulse when the cadence allows.
    #[must_use]
    pub fn advance(mut self, now: Duration, tuning: &SleepTuning) -> Self {
        self.pulses = self
            .pulses
            .into_iter()
            .map(|pulse| pulse.aged(now, tuning))
            .filter(|pulse| pulse.scale < tuning.max_scale)
            .collect();

        let due = match self.last_spawned_at {
            None => true,
            Some(last) => now.saturating_sub(last) > tuning.spawn_gap(),
        };
        if due {
            self.pulses.push(Pulse::spawn(self.next_id, now));
            self.next_id += 1;
            self.last_spawned_at = Some(now);
        }
        self
    }

    /// Resolves a tap against the live pulses.
    #[must_use]
    pub fn tap(mut self, tuning: &SleepTuning) -> (Self, TapVerdict) {
        let hit = self
            .pulses
            .iter()
            .position(|pulse| pulse.sync_error(tuning) < tuning.sync_threshold);

        let verdict = if let Some(index) = hit {
            let pulse = self.pulses.remove(index);
            self.recovery = (self.recovery + tuning.reward).min(tuning.target_recovery);
            self.streak += 1;
            TapVerdict::Synced(pulse.id)
        } else {
            self.recovery = (self.recovery - tuning.penalty).max(0.0);
            self.streak = 0;
            TapVerdict::Missed
        };
        (self, verdict)
    }

    /// Whether recovery has reached the pass threshold.
    #[must_use]
    pub fn is_passed(&self, tuning: &SleepTuning) -> bool {
        self.recovery >= tuning.target_recovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> SleepTuning {
        SleepTuning::default()
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn with_pulse_at_scale(scale: f64) -> PulseState {
        PulseState {
            pulses: vec![Pulse {
                id: 7,
                born_at: Duration::ZERO,
                scale,
                opacity: 1.0,
            }],
            next_id: 8,
            last_spawned_at: Some(Duration::ZERO),
            ..PulseState::default()
        }
    }

    #[test]
    fn test_scale_is_linear_in_age() {
        let pulse = Pulse::spawn(0, Duration::ZERO).aged(ms(800), &tuning());

        assert!((pulse.scale - 1.1).abs() < 1e-9);
        assert!((pulse.opacity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_opacity_ramps_up_then_down() {
        let tuning = tuning();
        let rising = Pulse::spawn(0, Duration::ZERO).aged(ms(400), &tuning);
        let falling = Pulse::spawn(0, Duration::ZERO).aged(ms(1200), &tuning);

        assert!((rising.opacity - 0.5).abs() < 1e-9);
        assert!((falling.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_first_advance_spawns_a_pulse() {
        let state = PulseState::default().advance(Duration::ZERO, &tuning());

        assert_eq!(state.pulses.len(), 1);
        assert_eq!(state.pulses[0].id, 0);
        assert_eq!(state.next_id, 1);
    }

    #[test]
    fn test_spawn_respects_minimum_gap() {
        let tuning = tuning();
        let state = PulseState::default().advance(Duration::ZERO, &tuning);

        let state = state.advance(ms(1300), &tuning);
        assert_eq!(state.pulses.len(), 1);

        let state = state.advance(ms(1301), &tuning);
        assert_eq!(state.pulses.len(), 2);
        assert_eq!(state.last_spawned_at, Some(ms(1301)));
    }

    #[test]
    fn test_consumed_pulse_does_not_shorten_the_gap() {
        let tuning = tuning();
        let state = PulseState::default().advance(Duration::ZERO, &tuning);
        let state = state.advance(ms(727), &tuning);
        let (state, verdict) = state.tap(&tuning);
        assert_eq!(verdict, TapVerdict::Synced(0));

        let state = state.advance(ms(800), &tuning);

        assert!(state.pulses.is_empty());
    }

    #[test]
    fn test_expanded_pulses_are_discarded() {
        let tuning = tuning();
        let state = PulseState::default().advance(Duration::ZERO, &tuning);

        // 1900 ms → scale 2.6125, past the 2.5 limit.
        let state = state.advance(ms(1900), &tuning);

        assert!(state.pulses.iter().all(|p| p.id != 0));
    }

    #[test]
    fn test_tap_on_sweet_spot_consumes_pulse() {
        let (state, verdict) = with_pulse_at_scale(1.05).tap(&tuning());

        assert_eq!(verdict, TapVerdict::Synced(7));
        assert!(state.pulses.is_empty());
        assert!((state.recovery - 10.0).abs() < f64::EPSILON);
        assert_eq!(state.streak, 1);
    }

    #[test]
    fn test_tap_off_beat_resets_streak_and_floors_recovery() {
        let state = PulseState {
            streak: 4,
            recovery: 3.0,
            ..with_pulse_at_scale(1.5)
        };

        let (state, verdict) = state.tap(&tuning());

        assert_eq!(verdict, TapVerdict::Missed);
        assert_eq!(state.streak, 0);
        assert!(state.recovery.abs() < f64::EPSILON);
        assert_eq!(state.pulses.len(), 1);
    }

    #[test]
    fn test_recovery_is_capped() {
        let state = PulseState {
            recovery: 95.0,
            ..with_pulse_at_scale(1.0)
        };

        let (state, _) = state.tap(&tuning());

        assert!((state.recovery - 100.0).abs() < f64::EPSILON);
        assert!(state.is_passed(&tuning()));
    }

    #[test]
    fn test_threshold_boundary_is_a_miss() {
        let (_, verdict) = with_pulse_at_scale(1.25).tap(&tuning());
        assert_eq!(verdict, TapVerdict::Missed);
    }
}
