//! Experience, rank-ups and attribute point spending.

use super::attributes::AttributeType;
use super::player::Player;
use crate::core::constants::{
    MAX_HEALTH_CAP, RANK_UP_ATTRIBUTE_POINTS, RANK_UP_HEALTH_GAIN, XP_PER_RANK,
};

/// Experience needed to leave `rank`. Flat for every rank.
pub fn xp_for_next_rank(_rank: u32) -> u32 {
    XP_PER_RANK
}

impl Player {
    /// Adds experience and applies one rank-up per whole threshold held.
    ///
    /// Any rank-up resets experience to zero; a remainder is not carried.
    /// Returns the number of rank-ups.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let rank_ups = self.experience / xp_for_next_rank(self.mob.rank);
        if rank_ups == 0 {
            return 0;
        }
        for _ in 0..rank_ups {
            self.rank_up();
        }
        self.experience = 0;
        rank_ups
    }

    /// Rank + 1 and three attribute points. Odd ranks add max health until
    /// the cap; any rank-up restores one point of missing health.
    pub fn rank_up(&mut self) {
        self.mob.rank += 1;
        self.attribute_points += RANK_UP_ATTRIBUTE_POINTS;
        if self.mob.max_health() < MAX_HEALTH_CAP && self.mob.rank % 2 == 1 {
            self.mob.grow_max_health(RANK_UP_HEALTH_GAIN);
        }
        if self.mob.health() < self.mob.max_health() {
            self.mob.heal(1);
        }
        tracing::info!("Player reached rank {}", self.mob.rank);
    }

    /// Spends one attribute point on `attr`. Rejected with an empty pool.
    pub fn spend_attribute(&mut self, attr: AttributeType) -> bool {
        if self.attribute_points == 0 {
            return false;
        }
        self.attribute_points -= 1;
        self.mob.stats.increment(attr);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::attributes::Stats;
    use crate::core::constants::PLAYER_BASE_HEALTH;

    #[test]
    fn test_exact_threshold_ranks_up_once() {
        let mut player = Player::new(0, 0);
        assert_eq!(player.add_experience(XP_PER_RANK), 1);
        assert_eq!(player.mob.rank, 2);
        assert_eq!(player.experience, 0);
        assert_eq!(player.attribute_points, 3);
    }

    #[test]
    fn test_below_threshold_does_nothing() {
        let mut player = Player::new(0, 0);
        assert_eq!(player.add_experience(XP_PER_RANK - 1), 0);
        assert_eq!(player.mob.rank, 1);
        assert_eq!(player.experience, XP_PER_RANK - 1);
    }

    #[test]
    fn test_two_thresholds_rank_up_twice() {
        let mut player = Player::new(0, 0);
        assert_eq!(player.add_experience(XP_PER_RANK * 2 + 5), 2);
        assert_eq!(player.mob.rank, 3);
        assert_eq!(player.experience, 0);
        assert_eq!(player.attribute_points, 6);
    }

    #[test]
    fn test_rank_up_drops_the_remainder() {
        let mut player = Player::new(0, 0);
        player.add_experience(XP_PER_RANK - 10);
        assert_eq!(player.add_experience(30), 1);
        assert_eq!(player.experience, 0);
        assert_eq!(player.add_experience(10), 0);
        assert_eq!(player.experience, 10);
    }

    #[test]
    fn test_five_kills_rank_up() {
        let mut player = Player::new(0, 0);
        for _ in 0..4 {
            assert_eq!(player.add_experience(20), 0);
        }
        assert_eq!(player.add_experience(20), 1);
        assert_eq!(player.experience, 0);
    }

    #[test]
    fn test_odd_rank_grows_max_health() {
        let mut player = Player::new(0, 0);
        player.rank_up(); // rank 2: even
        assert_eq!(player.mob.max_health(), PLAYER_BASE_HEALTH);
        player.rank_up(); // rank 3: odd
        assert_eq!(player.mob.max_health(), PLAYER_BASE_HEALTH + 2);
    }

    #[test]
    fn test_max_health_stops_at_cap() {
        let mut player = Player::new(0, 0);
        for _ in 0..60 {
            player.rank_up();
        }
        assert_eq!(player.mob.max_health(), MAX_HEALTH_CAP);
    }

    #[test]
    fn test_rank_up_restores_one_missing_health() {
        let mut player = Player::new(0, 0);
        player.mob.take_damage(5);
        player.rank_up();
        assert_eq!(player.mob.health(), PLAYER_BASE_HEALTH - 4);

        let mut full = Player::new(0, 0);
        full.rank_up();
        full.rank_up();
        // rank 3 grew max by 2; one point of the gap is restored
        assert_eq!(full.mob.health(), PLAYER_BASE_HEALTH + 1);
    }

    #[test]
    fn test_spend_attribute_requires_points() {
        let mut player = Player::new(0, 0);
        assert!(!player.spend_attribute(AttributeType::Dexterity));
        assert_eq!(player.attribute_points, 0);
        assert_eq!(player.mob.stats, Stats::new(10, 1, 1));

        player.rank_up();
        assert!(player.spend_attribute(AttributeType::Dexterity));
        assert!(player.spend_attribute(AttributeType::Intelligence));
        assert!(player.spend_attribute(AttributeType::Vitality));
        assert!(!player.spend_attribute(AttributeType::Vitality));
        assert_eq!(player.mob.stats, Stats::new(11, 2, 2));
        assert_eq!(player.attribute_points, 0);
    }
}
