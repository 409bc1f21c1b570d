/// Health after a hit: `max(0, current - damage)`.
pub const fn apply_damage(current: u32, damage: u32) -> u32 {
    current.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_floored_at_zero() {
        assert_eq!(apply_damage(10, 3), 7);
        assert_eq!(apply_damage(3, 3), 0);
        assert_eq!(apply_damage(2, 35), 0);
        assert_eq!(apply_damage(0, 5), 0);
    }
}
