//! Display components: what a reward looks like in a dialog.

use crate::state::{ArtifactId, CreatureId, PrimarySkill, ResourceKind, SecondarySkillId, SpellId};

/// Category and subtype of a displayed component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentKind {
    Experience,
    Level,
    Mana,
    PrimarySkill(PrimarySkill),
    SecondarySkill(SecondarySkillId),
    Artifact(ArtifactId),
    Spell(SpellId),
    Creature(CreatureId),
    Resource(ResourceKind),
    Morale,
    Luck,
    /// Stand-in for an option whose reward previews nothing.
    Empty,
}

/// One `(category, subtype, amount)` line of a reward preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub kind: ComponentKind,
    pub amount: i64,
}

impl Component {
    pub fn new(kind: ComponentKind, amount: i64) -> Self {
        Self { kind, amount }
    }
}
