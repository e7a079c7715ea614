//! Type matchup helpers for decision making

use crate::types::{effectiveness, Move, Type, Unit};

/// Effectiveness multiplier -> resistance points
const RESIST_BREAKPOINTS: [(f32, f32); 6] = [
    (0.0, 3.0),
    (0.25, 2.0),
    (0.5, 1.0),
    (1.0, 0.0),
    (2.0, -1.0),
    (4.0, -2.0),
];

/// Map an effectiveness multiplier to resistance points
///
/// Immunity is worth 3, a 4x resist 2, a resist 1, neutral 0, a weakness -1 and
/// a 4x weakness -2. Values between breakpoints are interpolated linearly and
/// values outside the table are clamped to its ends.
pub fn resistance_points(multiplier: f32) -> f32 {
    let (first_x, first_y) = RESIST_BREAKPOINTS[0];
    if multiplier.is_nan() || multiplier <= first_x {
        return first_y;
    }
    for pair in RESIST_BREAKPOINTS.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if multiplier <= x1 {
            return y0 + (multiplier - x0) / (x1 - x0) * (y1 - y0);
        }
    }
    RESIST_BREAKPOINTS[RESIST_BREAKPOINTS.len() - 1].1
}

/// Check if the unit takes nothing from an attack of this element
///
/// Accounts for airborne units ignoring Ground.
pub fn is_immune_to(defender: &Unit, attacking_type: Type) -> bool {
    effectiveness(Some(attacking_type), &defender.types, defender.is_grounded()) == 0.0
}

/// Distinct elements of the damaging moves in `moves`, in type order
pub fn attack_types(moves: &[Move]) -> Vec<Type> {
    let mut types: Vec<Type> = moves
        .iter()
        .filter(|m| m.is_damaging())
        .filter_map(|m| m.move_type)
        .collect();
    types.sort();
    types.dedup();
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoveCategory;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_resistance_points_breakpoints() {
        assert!(approx(resistance_points(0.0), 3.0));
        assert!(approx(resistance_points(0.25), 2.0));
        assert!(approx(resistance_points(0.5), 1.0));
        assert!(approx(resistance_points(1.0), 0.0));
        assert!(approx(resistance_points(2.0), -1.0));
        assert!(approx(resistance_points(4.0), -2.0));
    }

    #[test]
    fn test_resistance_points_interpolates() {
        assert!(approx(resistance_points(0.75), 0.5));
        assert!(approx(resistance_points(3.0), -1.5));
        assert!(approx(resistance_points(0.125), 2.5));
    }

    #[test]
    fn test_resistance_points_clamps() {
        assert!(approx(resistance_points(8.0), -2.0));
        assert!(approx(resistance_points(-1.0), 3.0));
    }

    #[test]
    fn test_resistance_points_monotonic() {
        let mut prev = resistance_points(0.0);
        for step in 1..=80 {
            let pts = resistance_points(step as f32 * 0.05);
            assert!(pts <= prev);
            prev = pts;
        }
    }

    #[test]
    fn test_is_immune_to() {
        let ghost = Unit::new("Gholdengo", &[Type::Steel, Type::Ghost]);
        assert!(is_immune_to(&ghost, Type::Normal));
        assert!(is_immune_to(&ghost, Type::Fighting));
        assert!(is_immune_to(&ghost, Type::Poison));
        assert!(!is_immune_to(&ghost, Type::Dark));

        let gira = Unit::new("Giratina-Origin", &[Type::Ghost, Type::Dragon]).with_ability("levitate");
        assert!(is_immune_to(&gira, Type::Ground));
        let grounded = Unit::new("Giratina-Origin", &[Type::Ghost, Type::Dragon]);
        assert!(!is_immune_to(&grounded, Type::Ground));
    }

    #[test]
    fn test_attack_types() {
        let moves = vec![
            Move::new("earthquake", Type::Ground, MoveCategory::Physical, 100),
            Move::new("earthpower", Type::Ground, MoveCategory::Special, 90),
            Move::new("sludgebomb", Type::Poison, MoveCategory::Special, 90),
            Move::status("spikes", Type::Ground),
            Move::status("toxic", Type::Poison),
        ];
        assert_eq!(attack_types(&moves), vec![Type::Poison, Type::Ground]);
        assert!(attack_types(&[]).is_empty());
    }
}
