//! Hero and player snapshots as seen by the reward rules.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GameConfig;

use super::ids::{
    ArtifactId, CreatureId, HeroId, ObjectTypeId, PlayerId, SecondarySkillId, SlotId, SpellId,
    TeamId,
};
use super::resources::ResourceSet;

/// The four primary skills, in their canonical index order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PrimarySkill {
    Attack,
    Defense,
    SpellPower,
    Knowledge,
}

impl PrimarySkill {
    pub const ALL: [PrimarySkill; GameConfig::PRIMARY_SKILL_COUNT] = [
        PrimarySkill::Attack,
        PrimarySkill::Defense,
        PrimarySkill::SpellPower,
        PrimarySkill::Knowledge,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Mastery of a secondary skill. `None` means not learned.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillLevel {
    #[default]
    None,
    Basic,
    Advanced,
    Expert,
}

/// A number of creatures of one type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureStack {
    pub creature: CreatureId,
    pub count: u32,
}

impl CreatureStack {
    pub fn new(creature: CreatureId, count: u32) -> Self {
        Self { creature, count }
    }
}

/// Fixed-size army of creature slots.
///
/// Serialized as the slot list with trailing empty slots dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "Vec<Option<CreatureStack>>",
        into = "Vec<Option<CreatureStack>>"
    )
)]
pub struct Army {
    slots: [Option<CreatureStack>; GameConfig::ARMY_SIZE],
}

impl Army {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an army filling slots from the first one.
    ///
    /// Stacks beyond `ARMY_SIZE` are dropped.
    pub fn from_stacks(stacks: impl IntoIterator<Item = CreatureStack>) -> Self {
        let mut army = Self::new();
        for (slot, stack) in army.slots.iter_mut().zip(stacks) {
            *slot = Some(stack);
        }
        army
    }

    pub fn slot(&self, slot: SlotId) -> Option<&CreatureStack> {
        self.slots.get(slot.index()).and_then(Option::as_ref)
    }

    pub fn slot_mut(&mut self, slot: SlotId) -> Option<&mut CreatureStack> {
        self.slots.get_mut(slot.index()).and_then(Option::as_mut)
    }

    /// Occupied slots in slot order.
    pub fn stacks(&self) -> impl Iterator<Item = (SlotId, &CreatureStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|stack| (SlotId(index as u8), stack)))
    }

    /// Total creatures of `creature` across all slots.
    pub fn count_of(&self, creature: CreatureId) -> u64 {
        self.stacks()
            .filter(|(_, stack)| stack.creature == creature)
            .map(|(_, stack)| u64::from(stack.count))
            .sum()
    }

    pub fn free_slot(&self) -> Option<SlotId> {
        self.slots
            .iter()
            .position(Option::is_none)
            .map(|index| SlotId(index as u8))
    }

    /// Slot to place `creature` into: an existing stack of the same type, or
    /// the first free slot.
    pub fn slot_for(&self, creature: CreatureId) -> Option<SlotId> {
        self.stacks()
            .find(|(_, stack)| stack.creature == creature)
            .map(|(slot, _)| slot)
            .or_else(|| self.free_slot())
    }

    /// True when every stack in `incoming` can be merged or placed.
    pub fn can_fit(&self, incoming: &[CreatureStack]) -> bool {
        let mut probe = self.clone();
        incoming.iter().all(|stack| probe.add(*stack))
    }

    /// Merges `stack` into the army. Returns false when no slot can take it.
    pub fn add(&mut self, stack: CreatureStack) -> bool {
        let Some(slot) = self.slot_for(stack.creature) else {
            return false;
        };
        let entry = &mut self.slots[slot.index()];
        match entry {
            Some(existing) => existing.count = existing.count.saturating_add(stack.count),
            None => *entry = Some(stack),
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl From<Vec<Option<CreatureStack>>> for Army {
    /// Slots past `ARMY_SIZE` are dropped.
    fn from(slots: Vec<Option<CreatureStack>>) -> Self {
        let mut army = Self::new();
        for (slot, stack) in army.slots.iter_mut().zip(slots) {
            *slot = stack;
        }
        army
    }
}

impl From<Army> for Vec<Option<CreatureStack>> {
    fn from(army: Army) -> Self {
        let used = army
            .slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        army.slots[..used].to_vec()
    }
}

/// Kind of effect a bonus has on its holder.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BonusKind {
    Morale,
    Luck,
    LandMovement,
    SeaMovement,
    SightRadius,
    PrimarySkill,
}

/// How long a bonus stays on its holder.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BonusDuration {
    OneBattle,
    OneDay,
    #[default]
    OneWeek,
    Permanent,
}

/// Provenance of a bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BonusSource {
    /// Granted by visiting a map object of this kind.
    Object(ObjectTypeId),
    Artifact(ArtifactId),
    #[default]
    Other,
}

/// A status effect held by a hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bonus {
    pub kind: BonusKind,
    pub value: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: BonusDuration,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: BonusSource,
}

impl Bonus {
    pub fn new(kind: BonusKind, value: i32, duration: BonusDuration) -> Self {
        Self {
            kind,
            value,
            duration,
            source: BonusSource::Other,
        }
    }

    /// Builder: tag the bonus as granted by an object kind.
    #[must_use]
    pub fn from_object(mut self, object_type: ObjectTypeId) -> Self {
        self.source = BonusSource::Object(object_type);
        self
    }
}

/// Snapshot of a hero's persistent state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroState {
    pub id: HeroId,
    pub owner: PlayerId,
    pub level: u32,
    pub experience: u64,
    pub mana: i32,
    pub mana_limit: i32,
    pub movement: i32,
    pub max_land_movement: i32,
    pub max_sea_movement: i32,
    pub in_boat: bool,
    /// Extra experience gained from every grant, in percent.
    pub learning_percent: u32,
    pub primary: [i32; GameConfig::PRIMARY_SKILL_COUNT],
    pub secondary: BTreeMap<SecondarySkillId, SkillLevel>,
    pub spells: BTreeSet<SpellId>,
    pub artifacts: Vec<ArtifactId>,
    pub army: Army,
    pub bonuses: Vec<Bonus>,
}

impl HeroState {
    pub fn new(id: HeroId, owner: PlayerId) -> Self {
        Self {
            id,
            owner,
            ..Self::default()
        }
    }

    pub fn primary_skill(&self, skill: PrimarySkill) -> i32 {
        self.primary[skill.index()]
    }

    pub fn secondary_skill(&self, skill: SecondarySkillId) -> SkillLevel {
        self.secondary.get(&skill).copied().unwrap_or_default()
    }

    /// True while there is room for another secondary skill.
    pub fn can_learn_skill(&self) -> bool {
        self.secondary
            .values()
            .filter(|level| **level != SkillLevel::None)
            .count()
            < GameConfig::MAX_SECONDARY_SKILLS
    }

    pub fn knows_spell(&self, spell: SpellId) -> bool {
        self.spells.contains(&spell)
    }

    pub fn has_artifact(&self, artifact: ArtifactId) -> bool {
        self.artifacts.contains(&artifact)
    }

    pub fn has_bonus_from(&self, object_type: ObjectTypeId) -> bool {
        self.bonuses
            .iter()
            .any(|bonus| bonus.source == BonusSource::Object(object_type))
    }

    /// Experience actually received from a grant of `amount`.
    ///
    /// Saturates at `u64::MAX`.
    pub fn calculate_xp(&self, amount: u64) -> u64 {
        let scaled = u128::from(amount) * (100 + u128::from(self.learning_percent)) / 100;
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// Mana as a percentage of the limit. A hero without a mana pool is at 0%.
    pub fn mana_percent(&self) -> i32 {
        if self.mana_limit <= 0 {
            return 0;
        }
        let percent = 100 * i64::from(self.mana) / i64::from(self.mana_limit);
        i32::try_from(percent).unwrap_or(if percent < 0 { i32::MIN } else { i32::MAX })
    }

    /// Movement capacity for the current medium.
    pub fn max_movement(&self) -> i32 {
        if self.in_boat {
            self.max_sea_movement
        } else {
            self.max_land_movement
        }
    }
}

impl Default for HeroState {
    fn default() -> Self {
        Self {
            id: HeroId::default(),
            owner: PlayerId::NEUTRAL,
            level: 1,
            experience: 0,
            mana: 0,
            mana_limit: 0,
            movement: 0,
            max_land_movement: GameConfig::DEFAULT_LAND_MOVEMENT,
            max_sea_movement: GameConfig::DEFAULT_SEA_MOVEMENT,
            in_boat: false,
            learning_percent: 0,
            primary: [0; GameConfig::PRIMARY_SKILL_COUNT],
            secondary: BTreeMap::new(),
            spells: BTreeSet::new(),
            artifacts: Vec::new(),
            army: Army::new(),
            bonuses: Vec::new(),
        }
    }
}

/// Snapshot of a player's shared state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub team: TeamId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resources: ResourceSet,
}

impl PlayerState {
    pub fn new(id: PlayerId, resources: ResourceSet) -> Self {
        Self {
            id,
            team: TeamId(id.0),
            resources,
        }
    }
}
