//! Animation module - flip and shake curves, plus the tweens the controller drives
//!
//! Curves are descriptive: a piecewise-linear mapping from progress to an
//! output value. Whoever renders the card samples them; nothing here
//! schedules anything.
//!
//! The renderer capability is an environment property picked once per
//! session. [`animator_for`] hands back the matching strategy:
//!
//! - [`RenderCapability::Renders3D`]: flips rotate around Y, shakes rotate around Z
//! - [`RenderCapability::Renders2D`]: flips squash X scale through zero, shakes translate X

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{FlipKind, SHAKE_COUNTER_MS, SHAKE_LEAN_MS, SHAKE_SETTLE_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RenderCapability {
    /// Limited renderer without 3D transforms.
    Renders2D,
    Renders3D,
}

impl RenderCapability {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "2d" => Some(RenderCapability::Renders2D),
            "3d" => Some(RenderCapability::Renders3D),
            _ => None,
        }
    }
}

/// Which transform a curve's output drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnimatedProperty {
    ScaleX,
    RotateYDeg,
    TranslateXPx,
    RotateZDeg,
}

pub const MAX_CURVE_POINTS: usize = 5;

/// Piecewise-linear interpolation. Input stops are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub property: AnimatedProperty,
    input: ArrayVec<f32, MAX_CURVE_POINTS>,
    output: ArrayVec<f32, MAX_CURVE_POINTS>,
}

impl Curve {
    pub fn new(property: AnimatedProperty, points: &[(f32, f32)]) -> Self {
        debug_assert!(!points.is_empty() && points.len() <= MAX_CURVE_POINTS);
        Self {
            property,
            input: points.iter().map(|p| p.0).collect(),
            output: points.iter().map(|p| p.1).collect(),
        }
    }

    pub fn input(&self) -> &[f32] {
        &self.input
    }

    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Output at `progress`, clamped to the end stops.
    pub fn sample(&self, progress: f32) -> f32 {
        let n = self.input.len();
        if n == 0 {
            return 0.0;
        }
        if progress <= self.input[0] {
            return self.output[0];
        }
        for i in 1..n {
            if progress <= self.input[i] {
                let (x0, x1) = (self.input[i - 1], self.input[i]);
                let (y0, y1) = (self.output[i - 1], self.output[i]);
                let t = if x1 > x0 { (progress - x0) / (x1 - x0) } else { 1.0 };
                return y0 + (y1 - y0) * t;
            }
        }
        self.output[n - 1]
    }
}

/// Number of flip midpoints passed: 0 shows the resting face, 1 the
/// after-match face, 2 the final face of a double flip.
pub fn flip_stage(progress: f32) -> u8 {
    if progress < 0.5 {
        0
    } else if progress < 1.5 {
        1
    } else {
        2
    }
}

/// Rendering strategy, selected once from the capability.
pub trait CardAnimator: Sync {
    fn capability(&self) -> RenderCapability;

    fn flip_curve(&self, kind: FlipKind) -> Curve;

    fn shake_property(&self) -> AnimatedProperty;

    /// Peak displacement of the first shake phase.
    fn shake_amplitude(&self) -> f32;

    /// Resting value of the flip output.
    fn flip_rest(&self) -> f32 {
        self.flip_curve(FlipKind::None).sample(0.0)
    }
}

/// Scale-based flips for renderers without 3D transforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleAnimator;

impl CardAnimator for ScaleAnimator {
    fn capability(&self) -> RenderCapability {
        RenderCapability::Renders2D
    }

    fn flip_curve(&self, kind: FlipKind) -> Curve {
        let p = AnimatedProperty::ScaleX;
        match kind {
            FlipKind::None => Curve::new(p, &[(0.0, 1.0), (1.0, 1.0)]),
            FlipKind::Single => Curve::new(p, &[(0.0, 1.0), (0.5, 0.0), (1.0, 1.0)]),
            FlipKind::Double => Curve::new(
                p,
                &[(0.0, 1.0), (0.5, 0.0), (1.0, 1.0), (1.5, 0.0), (2.0, 1.0)],
            ),
        }
    }

    fn shake_property(&self) -> AnimatedProperty {
        AnimatedProperty::TranslateXPx
    }

    fn shake_amplitude(&self) -> f32 {
        6.0
    }
}

/// Rotation-based flips.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotateAnimator;

impl CardAnimator for RotateAnimator {
    fn capability(&self) -> RenderCapability {
        RenderCapability::Renders3D
    }

    fn flip_curve(&self, kind: FlipKind) -> Curve {
        let p = AnimatedProperty::RotateYDeg;
        match kind {
            FlipKind::None => Curve::new(p, &[(0.0, 0.0), (1.0, 0.0)]),
            FlipKind::Single => Curve::new(p, &[(0.0, 0.0), (0.5, 90.0), (1.0, 180.0)]),
            FlipKind::Double => Curve::new(
                p,
                &[
                    (0.0, 0.0),
                    (0.5, 90.0),
                    (1.0, 180.0),
                    (1.5, 270.0),
                    (2.0, 360.0),
                ],
            ),
        }
    }

    fn shake_property(&self) -> AnimatedProperty {
        AnimatedProperty::RotateZDeg
    }

    fn shake_amplitude(&self) -> f32 {
        8.0
    }
}

static SCALE_ANIMATOR: ScaleAnimator = ScaleAnimator;
static ROTATE_ANIMATOR: RotateAnimator = RotateAnimator;

pub fn animator_for(capability: RenderCapability) -> &'static dyn CardAnimator {
    match capability {
        RenderCapability::Renders2D => &SCALE_ANIMATOR,
        RenderCapability::Renders3D => &ROTATE_ANIMATOR,
    }
}

/// Lean direction for a card in the reward shake (-1 left, +1 right).
///
/// In the 4-card layout the outer cards lean one way and the middle two the
/// other; everywhere else direction alternates by index parity.
pub fn shake_direction(index: usize, count: usize) -> f32 {
    if count == 4 {
        if index == 0 || index == 3 {
            -1.0
        } else {
            1.0
        }
    } else if index % 2 == 0 {
        -1.0
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShakePhase {
    pub target: f32,
    pub duration_ms: u32,
}

/// Three timed phases: lean, lean further the other way, settle at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShakeSequence {
    pub property: AnimatedProperty,
    pub phases: [ShakePhase; 3],
}

impl ShakeSequence {
    pub fn new(animator: &dyn CardAnimator, index: usize, count: usize, speed: f32) -> Self {
        let dir = shake_direction(index, count);
        let amp = animator.shake_amplitude();
        let scale = |ms: u32| (ms as f32 * speed).round() as u32;
        Self {
            property: animator.shake_property(),
            phases: [
                ShakePhase {
                    target: dir * amp,
                    duration_ms: scale(SHAKE_LEAN_MS),
                },
                ShakePhase {
                    target: -dir * amp * 1.5,
                    duration_ms: scale(SHAKE_COUNTER_MS),
                },
                ShakePhase {
                    target: 0.0,
                    duration_ms: scale(SHAKE_SETTLE_MS),
                },
            ],
        }
    }

    pub fn total_ms(&self) -> u32 {
        self.phases.iter().map(|p| p.duration_ms).sum()
    }

    /// The sequence as a curve over elapsed milliseconds.
    pub fn curve(&self) -> Curve {
        let mut t = 0.0;
        let mut points = [(0.0, 0.0); 4];
        for (i, phase) in self.phases.iter().enumerate() {
            // Zero-length phases still need increasing stops.
            t += (phase.duration_ms as f32).max(f32::EPSILON);
            points[i + 1] = (t, phase.target);
        }
        Curve::new(self.property, &points)
    }

    pub fn value_at(&self, elapsed_ms: u32) -> f32 {
        self.curve().sample(elapsed_ms as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOut,
    /// Slight overshoot before settling.
    Spring,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Spring => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
        }
    }
}

/// A scalar animated over time by the controller's tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed_ms: u32,
    duration_ms: u32,
    easing: Easing,
}

impl Tween {
    /// A finished tween resting at `value`.
    pub fn rest(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            elapsed_ms: 0,
            duration_ms: 0,
            easing: Easing::Linear,
        }
    }

    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0,
            duration_ms,
            easing,
        }
    }

    /// Start from the current value towards `to`.
    pub fn retarget(&mut self, to: f32, duration_ms: u32, easing: Easing) {
        *self = Self::new(self.value(), to, duration_ms, easing);
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms).min(self.duration_ms);
    }

    pub fn value(&self) -> f32 {
        if self.duration_ms == 0 || self.elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let t = self.elapsed_ms as f32 / self.duration_ms as f32;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Hold the current value and stop moving.
    pub fn freeze(&mut self) {
        *self = Self::rest(self.value());
    }
}
