use crate::core::actions::render_job::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::formula::algorithm::{EscapeOutcome, IterationResult};

const HUE_STEP: f64 = 0.1;

/// Cycles the hue with the escape count. Points that stay bounded are black
/// and faulted points are mid grey.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueCycleColourMap {
    color_depth: f64,
}

impl HueCycleColourMap {
    #[must_use]
    pub fn new(color_depth: f64) -> Self {
        Self { color_depth }
    }

    #[must_use]
    pub fn fault_colour() -> Colour {
        Colour::from_hsl(0.0, 0.0, 0.5)
    }
}

impl ColourMap<EscapeOutcome> for HueCycleColourMap {
    fn map(&self, value: &EscapeOutcome) -> Colour {
        match value {
            Err(_) => Self::fault_colour(),
            Ok(IterationResult::DidNotEscape) => Colour::BLACK,
            Ok(IterationResult::Escaped(n)) => {
                let hue = (f64::from(*n) * HUE_STEP * self.color_depth) % 360.0;
                Colour::from_hsl(hue, 1.0, 0.5)
            }
        }
    }

    fn display_name(&self) -> &str {
        "Hue cycle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expression::EvaluationFault;

    #[test]
    fn test_bounded_points_are_black() {
        let map = HueCycleColourMap::new(20.0);

        assert_eq!(map.map(&Ok(IterationResult::DidNotEscape)), Colour::BLACK);
    }

    #[test]
    fn test_faults_are_grey() {
        let map = HueCycleColourMap::new(20.0);
        let fault = Err(EvaluationFault::UnboundVariable {
            name: "w".to_string(),
        });

        assert_eq!(
            map.map(&fault),
            Colour {
                r: 128,
                g: 128,
                b: 128
            }
        );
    }

    #[test]
    fn test_first_escape_is_red() {
        let map = HueCycleColourMap::new(20.0);

        assert_eq!(
            map.map(&Ok(IterationResult::Escaped(0))),
            Colour { r: 255, g: 0, b: 0 }
        );
    }

    #[test]
    fn test_hue_advances_with_depth() {
        // 60 * 0.1 * 20 = 120 degrees
        let map = HueCycleColourMap::new(20.0);

        assert_eq!(
            map.map(&Ok(IterationResult::Escaped(60))),
            Colour { r: 0, g: 255, b: 0 }
        );
    }

    #[test]
    fn test_hue_wraps_after_full_turn() {
        let map = HueCycleColourMap::new(20.0);

        assert_eq!(
            map.map(&Ok(IterationResult::Escaped(180))),
            map.map(&Ok(IterationResult::Escaped(0)))
        );
    }

    #[test]
    fn test_every_outcome_has_a_colour() {
        let map = HueCycleColourMap::new(7.5);

        // Full saturation at half lightness: one channel saturates, one is off.
        for n in [0, 1, 13, 200, u32::MAX] {
            let Colour { r, g, b } = map.map(&Ok(IterationResult::Escaped(n)));
            assert_eq!(r.max(g).max(b), 255, "escaped after {n}");
            assert_eq!(r.min(g).min(b), 0, "escaped after {n}");
        }
        assert_eq!(map.map(&Ok(IterationResult::DidNotEscape)), Colour::BLACK);
        assert_eq!(
            map.map(&Err(EvaluationFault::UnboundVariable {
                name: "q".to_string()
            })),
            HueCycleColourMap::fault_colour()
        );
        assert_eq!(map.display_name(), "Hue cycle");
    }
}
