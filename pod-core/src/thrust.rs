use crate::config::PolicyConfig;
use crate::constants::MAX_THRUST;

/// Power for a heading error `delta_deg` between facing and aim.
///
/// Full power inside the cone, then `100 - floor(10^(|delta| / cone))`, which
/// reaches zero by the time the vehicle faces directly away from its aim.
pub fn thrust_for_heading_error(delta_deg: f64, cfg: &PolicyConfig) -> u8 {
    let error = delta_deg.abs();
    if error <= cfg.full_thrust_cone_deg {
        return MAX_THRUST;
    }
    let penalty = 10f64.powf(error / cfg.full_thrust_cone_deg).floor();
    (MAX_THRUST as f64 - penalty).clamp(0.0, MAX_THRUST as f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_power_within_quadrant() {
        let cfg = PolicyConfig::default();
        assert_eq!(thrust_for_heading_error(0.0, &cfg), 100);
        assert_eq!(thrust_for_heading_error(-45.0, &cfg), 100);
        assert_eq!(thrust_for_heading_error(90.0, &cfg), 100);
        assert_eq!(thrust_for_heading_error(-90.0, &cfg), 100);
    }

    #[test]
    fn exponential_penalty_past_quadrant() {
        let cfg = PolicyConfig::default();
        assert_eq!(thrust_for_heading_error(90.5, &cfg), 90);
        // 10^1.5 = 31.6
        assert_eq!(thrust_for_heading_error(135.0, &cfg), 69);
        assert_eq!(thrust_for_heading_error(-135.0, &cfg), 69);
        assert_eq!(thrust_for_heading_error(180.0, &cfg), 0);
    }

    #[test]
    fn bounded_and_non_increasing() {
        let cfg = PolicyConfig::default();
        let mut previous = MAX_THRUST;
        for tenth in 0..=1800 {
            let delta = tenth as f64 / 10.0;
            let power = thrust_for_heading_error(delta, &cfg);
            assert!(power <= MAX_THRUST);
            assert_eq!(power, thrust_for_heading_error(-delta, &cfg));
            if delta > 90.0 {
                assert!(power <= previous, "thrust rose at {delta}");
            }
            previous = power;
        }
    }

    #[test]
    fn narrow_cone_is_clamped_at_zero() {
        let cfg = PolicyConfig {
            full_thrust_cone_deg: 45.0,
            ..PolicyConfig::default()
        };
        assert_eq!(thrust_for_heading_error(180.0, &cfg), 0);
    }
}
