use glam::Vec3;
use serde::{Deserialize, Serialize};
use towerclimb_input::NudgeDirection;

/// How the phase is advanced within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseMode {
    /// Advance once before the sine and again before the cosine, so the
    /// phase moves by two steps per tick. This is the shipped animation speed.
    Literal,
    /// Advance once per tick; both offsets share the same phase.
    Single,
}

/// Animation tuning: phase step, offset scale, phase mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub phase_step: f64,
    pub offset_scale: f64,
    pub phase_mode: PhaseMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            phase_step: 0.01,
            offset_scale: 0.001,
            phase_mode: PhaseMode::Literal,
        }
    }
}

/// Loop-owned state: the phase driving the circular offset and the nudge scalar.
///
/// `pos` is tracked from keyboard nudges but is not read by the tick; it does
/// not move the renderable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    phase: f64,
    pos: f64,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// Advance the phase for one tick and return the offset to move by.
    pub fn advance(&mut self, config: &AnimationConfig) -> Vec3 {
        self.phase += config.phase_step;
        let x = self.phase.sin() * config.offset_scale;
        if config.phase_mode == PhaseMode::Literal {
            self.phase += config.phase_step;
        }
        let y = -self.phase.cos() * config.offset_scale;
        Vec3::new(x as f32, y as f32, 0.0)
    }

    pub fn nudge(&mut self, direction: NudgeDirection) {
        self.pos += direction.delta();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_mode_first_tick_uses_double_increment() {
        let config = AnimationConfig::default();
        let mut state = AnimationState::new();
        let offset = state.advance(&config);

        assert_eq!(offset.x, (0.01f64.sin() * 0.001) as f32);
        assert_eq!(offset.y, (-0.02f64.cos() * 0.001) as f32);
        assert_eq!(offset.z, 0.0);
        assert!((state.phase() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn single_mode_first_tick_shares_phase() {
        let config = AnimationConfig {
            phase_mode: PhaseMode::Single,
            ..AnimationConfig::default()
        };
        let mut state = AnimationState::new();
        let offset = state.advance(&config);

        assert_eq!(offset.x, (0.01f64.sin() * 0.001) as f32);
        assert_eq!(offset.y, (-0.01f64.cos() * 0.001) as f32);
        assert!((state.phase() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn phase_never_resets() {
        let config = AnimationConfig::default();
        let mut state = AnimationState::new();
        let mut last = state.phase();
        for _ in 0..1000 {
            state.advance(&config);
            assert!(state.phase() > last);
            last = state.phase();
        }
        assert!((state.phase() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn offsets_are_bounded_by_scale() {
        let config = AnimationConfig::default();
        let mut state = AnimationState::new();
        for _ in 0..500 {
            let offset = state.advance(&config);
            assert!(offset.length() <= 2.0 * config.offset_scale as f32);
        }
    }

    #[test]
    fn nudges_move_pos_by_a_tenth() {
        let mut state = AnimationState::new();
        state.nudge(NudgeDirection::Right);
        assert_eq!(state.pos(), 0.1);
        state.nudge(NudgeDirection::Left);
        state.nudge(NudgeDirection::Left);
        assert!((state.pos() + 0.1).abs() < 1e-12);
        assert_eq!(state.phase(), 0.0);
    }
}
