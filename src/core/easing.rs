use std::fmt;
use std::rc::Rc;

/// Maps normalized time `t` in `0..=1` to eased progress.
///
/// Outputs may leave `0..=1` (anticipate/overshoot); callers must not clamp them.
#[derive(Clone, Default)]
pub enum Easing {
    Linear,
    /// Smooth start and end: `cos((t + 1)π) / 2 + 0.5`.
    #[default]
    AccelerateDecelerate,
    Accelerate(f64),
    Decelerate(f64),
    Anticipate(f64),
    Overshoot(f64),
    AnticipateOvershoot(f64),
    Bounce,
    /// Host-provided pure function.
    Custom(Rc<dyn Fn(f64) -> f64>),
}

impl Easing {
    #[must_use]
    pub fn custom(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    #[must_use]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * std::f64::consts::PI).cos() / 2.0 + 0.5,
            Self::Accelerate(factor) => {
                if *factor == 1.0 {
                    t * t
                } else {
                    t.powf(2.0 * factor)
                }
            }
            Self::Decelerate(factor) => {
                if *factor == 1.0 {
                    1.0 - (1.0 - t) * (1.0 - t)
                } else {
                    1.0 - (1.0 - t).powf(2.0 * factor)
                }
            }
            Self::Anticipate(tension) => anticipate(t, *tension),
            Self::Overshoot(tension) => overshoot(t - 1.0, *tension) + 1.0,
            Self::AnticipateOvershoot(tension) => {
                if t < 0.5 {
                    0.5 * anticipate(t * 2.0, *tension)
                } else {
                    0.5 * (overshoot(t * 2.0 - 2.0, *tension) + 2.0)
                }
            }
            Self::Bounce => bounce_curve(t),
            Self::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("Linear"),
            Self::AccelerateDecelerate => f.write_str("AccelerateDecelerate"),
            Self::Accelerate(v) => f.debug_tuple("Accelerate").field(v).finish(),
            Self::Decelerate(v) => f.debug_tuple("Decelerate").field(v).finish(),
            Self::Anticipate(v) => f.debug_tuple("Anticipate").field(v).finish(),
            Self::Overshoot(v) => f.debug_tuple("Overshoot").field(v).finish(),
            Self::AnticipateOvershoot(v) => f.debug_tuple("AnticipateOvershoot").field(v).finish(),
            Self::Bounce => f.write_str("Bounce"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn anticipate(t: f64, tension: f64) -> f64 {
    t * t * ((tension + 1.0) * t - tension)
}

fn overshoot(t: f64, tension: f64) -> f64 {
    t * t * ((tension + 1.0) * t + tension)
}

fn bounce(t: f64) -> f64 {
    t * t * 8.0
}

fn bounce_curve(t: f64) -> f64 {
    let t = t * 1.1226;
    if t < 0.3535 {
        bounce(t)
    } else if t < 0.7408 {
        bounce(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        bounce(t - 0.8526) + 0.9
    } else {
        bounce(t - 1.0435) + 0.95
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn endpoints_are_fixed_for_builtin_curves() {
        for easing in [
            Easing::Linear,
            Easing::AccelerateDecelerate,
            Easing::Accelerate(1.0),
            Easing::Accelerate(2.0),
            Easing::Decelerate(1.0),
            Easing::Anticipate(2.0),
            Easing::Overshoot(2.0),
            Easing::AnticipateOvershoot(3.0),
        ] {
            assert!(easing.apply(0.0).abs() <= 1e-9, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() <= 1e-9, "{easing:?} at 1");
        }
        assert!((Easing::Bounce.apply(1.0) - 1.0).abs() <= 1e-3);
    }

    #[test]
    fn overshoot_leaves_unit_interval() {
        let easing = Easing::Overshoot(2.0);
        let peak = (1..100)
            .map(|i| easing.apply(f64::from(i) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
        assert!(Easing::Anticipate(2.0).apply(0.2) < 0.0);
    }

    #[test]
    fn default_is_symmetric_at_midpoint() {
        assert!((Easing::default().apply(0.5) - 0.5).abs() <= 1e-12);
    }
}
