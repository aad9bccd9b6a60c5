/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Movement points a hero regains per day on land before skill modifiers.
    pub base_land_movement: i32,
    /// Movement points a hero regains per day at sea before skill modifiers.
    pub base_sea_movement: i32,
    /// Growth of each experience step past the fixed table, in percent.
    pub experience_growth_percent: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of creature slots in a hero army.
    pub const ARMY_SIZE: usize = 7;
    /// Attack, defense, spell power, knowledge.
    pub const PRIMARY_SKILL_COUNT: usize = 4;
    /// A hero cannot learn a new secondary skill once this many are held.
    pub const MAX_SECONDARY_SKILLS: usize = 8;
    pub const DAYS_PER_WEEK: u32 = 7;
    /// Highest level the experience curve reaches. Requirements past it
    /// equal the requirement at it.
    pub const MAX_LEVEL: u32 = 1000;
    pub const RESOURCE_KINDS: usize = 7;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LAND_MOVEMENT: i32 = 1500;
    pub const DEFAULT_SEA_MOVEMENT: i32 = 1500;
    pub const DEFAULT_EXPERIENCE_GROWTH: u32 = 20;

    /// Experience needed to reach levels 2 through 13.
    const EXPERIENCE_TABLE: [u64; 12] = [
        1000, 2000, 3200, 4600, 6200, 8000, 10000, 12200, 14700, 17500, 20600, 24320,
    ];

    pub fn new() -> Self {
        Self {
            base_land_movement: Self::DEFAULT_LAND_MOVEMENT,
            base_sea_movement: Self::DEFAULT_SEA_MOVEMENT,
            experience_growth_percent: Self::DEFAULT_EXPERIENCE_GROWTH,
        }
    }

    /// Total experience a hero needs to hold `level`.
    ///
    /// Level 1 (and 0) needs nothing. Past the fixed table each step is the
    /// previous step grown by `experience_growth_percent`. The curve
    /// saturates at `u64::MAX` and is flat past [`Self::MAX_LEVEL`].
    pub fn required_experience(&self, level: u32) -> u64 {
        let level = level.min(Self::MAX_LEVEL);
        if level <= 1 {
            return 0;
        }
        let index = (level - 2) as usize;
        if let Some(&exp) = Self::EXPERIENCE_TABLE.get(index) {
            return exp;
        }

        let table = &Self::EXPERIENCE_TABLE;
        let mut total = table[table.len() - 1];
        let mut step = total - table[table.len() - 2];
        for _ in table.len()..=index {
            let growth = step.saturating_mul(u64::from(self.experience_growth_percent)) / 100;
            step = step.saturating_add(growth);
            total = total.saturating_add(step);
        }
        total
    }

    /// Highest level reachable with `experience`, at most [`Self::MAX_LEVEL`].
    pub fn level_for_experience(&self, experience: u64) -> u32 {
        let mut level = 1;
        while level < Self::MAX_LEVEL && self.required_experience(level + 1) <= experience {
            level += 1;
        }
        level
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
