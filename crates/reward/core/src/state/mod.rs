//! Canonical state types read by the reward rules.
//!
//! Heroes and players are owned by the host simulation; the rules only see
//! them through [`crate::env::WorldQuery`] and change them through
//! [`crate::env::GameMutator`].
mod date;
mod hero;
mod ids;
mod resources;

pub use date::GameDate;
pub use hero::{
    Army, Bonus, BonusDuration, BonusKind, BonusSource, CreatureStack, HeroState, PlayerState,
    PrimarySkill, SkillLevel,
};
pub use ids::{
    ArtifactId, CreatureId, HeroId, ObjectId, ObjectTypeId, PlayerId, SecondarySkillId, SlotId,
    SpellId, TeamId,
};
pub use resources::{ResourceKind, ResourceSet};
