pub const DEFAULT_MIN: f64 = 1.0;
pub const DEFAULT_MAX: f64 = 10.0;
pub const DEFAULT_VALUE: f64 = 5.0;

/// Widest slider the view lays out, counted in steps.
pub const MAX_STEPS: f64 = 100.0;

const STEP: f64 = 1.0;

const LOW_CEILING: f64 = 3.0;
const MID_CEILING: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    pub fn classify(value: f64) -> Self {
        if value <= LOW_CEILING {
            Self::Low
        } else if value <= MID_CEILING {
            Self::Mid
        } else {
            Self::High
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RangeFeedback {
    pub percent: f64,
    pub echo: String,
    pub tier: Tier,
}

impl RangeFeedback {
    pub fn compute(min: f64, max: f64, value: f64) -> Self {
        let span = max - min;
        let percent = if span == 0.0 {
            0.0
        } else {
            (value - min) / span * 100.0
        };
        Self {
            percent,
            echo: format_value(value),
            tier: Tier::classify(value),
        }
    }
}

fn parse_or(raw: &str, fallback: f64) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(fallback)
}

// 5.0 echoes as "5", 5.5 as "5.5".
fn format_value(value: f64) -> String {
    format!("{value}")
}

/// Stepped slider value kept inside `[min, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeControl {
    min: f64,
    max: f64,
    step: f64,
    default: f64,
    value: f64,
}

impl RangeControl {
    /// Builds a control from raw attribute strings. Anything that does not
    /// parse falls back to 1, 10 and 5.
    pub fn from_attributes(min: &str, max: &str, value: &str) -> Self {
        Self::new(
            parse_or(min, DEFAULT_MIN),
            parse_or(max, DEFAULT_MAX),
            parse_or(value, DEFAULT_VALUE),
        )
    }

    /// Bounds wider than [`MAX_STEPS`] steps are replaced by the defaults.
    pub fn new(min: f64, max: f64, default: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        if (max - min) / STEP > MAX_STEPS {
            log::warn!("[range] {min}..{max} spans more than {MAX_STEPS} steps, using defaults");
            return Self::new(DEFAULT_MIN, DEFAULT_MAX, DEFAULT_VALUE);
        }
        let default = default.clamp(min, max);
        Self {
            min,
            max,
            step: STEP,
            default,
            value: default,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let steps = ((value - self.min) / self.step).round();
        self.value = (self.min + steps * self.step).clamp(self.min, self.max);
    }

    pub fn step_up(&mut self) {
        self.set(self.value + self.step);
    }

    pub fn step_down(&mut self) {
        self.set(self.value - self.step);
    }

    pub fn reset(&mut self) {
        self.value = self.default;
    }

    /// Every value the slider can take, lowest first.
    pub fn stops(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).floor() as usize;
        (0..=count)
            .map(|index| self.min + index as f64 * self.step)
            .collect()
    }

    pub fn feedback(&self) -> RangeFeedback {
        RangeFeedback::compute(self.min, self.max, self.value)
    }
}

impl Default for RangeControl {
    fn default() -> Self {
        Self::new(DEFAULT_MIN, DEFAULT_MAX, DEFAULT_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn midpoint_default() {
        let feedback = RangeFeedback::compute(1.0, 10.0, 5.0);
        assert!((feedback.percent - 44.4).abs() < 0.05);
        assert_eq!(feedback.echo, "5");
        assert_eq!(feedback.tier, Tier::Mid);
    }

    #[test]
    fn extremes() {
        let top = RangeFeedback::compute(1.0, 10.0, 10.0);
        assert!(close(top.percent, 100.0));
        assert_eq!(top.tier, Tier::High);

        let bottom = RangeFeedback::compute(1.0, 10.0, 1.0);
        assert!(close(bottom.percent, 0.0));
        assert_eq!(bottom.tier, Tier::Low);
    }

    #[test]
    fn tier_boundaries_belong_to_the_lower_band() {
        assert_eq!(Tier::classify(3.0), Tier::Low);
        assert_eq!(Tier::classify(3.5), Tier::Mid);
        assert_eq!(Tier::classify(6.0), Tier::Mid);
        assert_eq!(Tier::classify(6.01), Tier::High);
    }

    #[test]
    fn unparsable_attributes_fall_back() {
        assert_eq!(
            RangeControl::from_attributes("", "abc", " ").feedback(),
            RangeFeedback::compute(1.0, 10.0, 5.0)
        );
        assert_eq!(
            RangeControl::from_attributes("0", "20", "10").feedback().percent,
            50.0
        );
    }

    #[test]
    fn fractional_values_echo_as_is() {
        assert_eq!(RangeFeedback::compute(1.0, 10.0, 5.5).echo, "5.5");
    }

    #[test]
    fn degenerate_span_is_empty() {
        assert_eq!(RangeFeedback::compute(4.0, 4.0, 4.0).percent, 0.0);
    }

    #[test]
    fn control_clamps_and_steps() {
        let mut range = RangeControl::default();
        assert_eq!(range.value(), 5.0);
        range.set(42.0);
        assert_eq!(range.value(), 10.0);
        range.step_up();
        assert_eq!(range.value(), 10.0);
        range.set(-3.0);
        assert_eq!(range.value(), 1.0);
        range.step_down();
        assert_eq!(range.value(), 1.0);
        range.set(6.4);
        assert_eq!(range.value(), 6.0);
        range.reset();
        assert_eq!(range.value(), 5.0);
    }

    #[test]
    fn stops_cover_the_range() {
        let stops = RangeControl::default().stops();
        assert_eq!(stops.len(), 10);
        assert_eq!(stops.first(), Some(&1.0));
        assert_eq!(stops.last(), Some(&10.0));
    }

    #[test]
    fn oversized_span_falls_back_to_defaults() {
        let range = RangeControl::from_attributes("1", "1e300", "5");
        assert_eq!(range, RangeControl::default());
        assert_eq!(range.stops().len(), 10);

        let range = RangeControl::from_attributes("1e9", "0", "3");
        assert_eq!(range.max(), DEFAULT_MAX);
    }

    #[test]
    fn widest_allowed_span_is_kept() {
        let range = RangeControl::from_attributes("0", "100", "50");
        assert_eq!(range.max(), 100.0);
        assert_eq!(range.stops().len(), 101);
    }

    #[quickcheck_macros::quickcheck]
    fn feedback_is_pure(value: u8) -> bool {
        let value = f64::from(value % 10 + 1);
        RangeFeedback::compute(1.0, 10.0, value) == RangeFeedback::compute(1.0, 10.0, value)
    }

    #[quickcheck_macros::quickcheck]
    fn clamped_values_stay_in_percent_bounds(value: i16) -> bool {
        let mut range = RangeControl::default();
        range.set(f64::from(value));
        let percent = range.feedback().percent;
        (0.0..=100.0).contains(&percent) && (1.0..=10.0).contains(&range.value())
    }
}
