//! Reward descriptors: the immutable bundle of effects one reward grants.
//!
//! A [`Reward`] is a template. It never reads or writes state on its own;
//! the grant orchestrator in [`crate::object`] feeds it a hero snapshot to
//! compute derived values and pushes the resulting effects through the
//! mutation channel.

mod component;
mod formula;

use std::collections::BTreeMap;

pub use component::{Component, ComponentKind};
pub use formula::{recombine_mana, recombine_movement};

use crate::config::GameConfig;
use crate::state::{
    Army, ArtifactId, Bonus, CreatureId, CreatureStack, HeroState, PrimarySkill, ResourceSet,
    SecondarySkillId, SkillLevel, SpellId,
};

/// A one-shot spell the object casts on behalf of the visiting hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellCast {
    pub spell: SpellId,
    pub school_level: SkillLevel,
}

/// Everything a single reward grants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Reward {
    /// Added to the owning player's stockpile.
    pub resources: ResourceSet,

    /// Relative change per primary skill.
    pub primary: [i32; GameConfig::PRIMARY_SKILL_COUNT],
    /// Target mastery per secondary skill.
    pub secondary: BTreeMap<SecondarySkillId, SkillLevel>,

    /// Levels to gain; converted into the experience gap.
    pub hero_level: u32,
    /// Raw experience, scaled by the hero's learning bonus.
    pub hero_experience: u64,

    pub mana_diff: i32,
    /// Mana pool override as a percentage of the limit.
    pub mana_percentage: Option<u32>,
    /// Share of mana above the limit that is kept, in percent.
    pub mana_overflow_factor: i32,

    pub move_points: i32,
    /// Movement override as a percentage of the medium's capacity.
    pub move_percentage: Option<u32>,

    /// Status effects. Their source is stamped with the granting object.
    pub bonuses: Vec<Bonus>,
    pub artifacts: Vec<ArtifactId>,
    pub spells: Vec<SpellId>,
    pub forget_spells: Vec<SpellId>,
    pub creatures: Vec<CreatureStack>,
    /// `(from, to)` type replacements over the hero's existing stacks.
    pub creature_changes: Vec<(CreatureId, CreatureId)>,

    pub spell_cast: Option<SpellCast>,
    /// Remove the granting object once the reward is applied.
    pub remove_object: bool,

    /// Shown in previews before the computed components.
    pub extra_components: Vec<Component>,
}

impl Reward {
    /// True when the creature grant fits an empty army.
    pub fn fits_army(&self) -> bool {
        Army::new().can_fit(&self.creatures)
    }

    pub fn grants_mana(&self) -> bool {
        self.mana_diff != 0 || self.mana_percentage.is_some()
    }

    pub fn grants_movement(&self) -> bool {
        self.move_points != 0 || self.move_percentage.is_some()
    }

    /// Mana the hero ends up with after this reward.
    pub fn calculate_mana_points(&self, hero: &HeroState) -> i32 {
        recombine_mana(
            hero.mana,
            hero.mana_limit,
            self.mana_percentage,
            self.mana_diff,
            self.mana_overflow_factor,
        )
    }

    /// Movement points the hero ends up with after this reward.
    pub fn calculate_movement_points(&self, hero: &HeroState) -> i32 {
        recombine_movement(
            hero.movement,
            hero.max_movement(),
            self.move_percentage,
            self.move_points,
        )
    }

    /// Experience this reward gives `hero`, levels included.
    pub fn experience_for(&self, hero: &HeroState, config: &GameConfig) -> u64 {
        let mut exp: u64 = 0;
        if self.hero_level > 0 {
            let target = hero.level.saturating_add(self.hero_level);
            exp = exp.saturating_add(
                config
                    .required_experience(target)
                    .saturating_sub(config.required_experience(hero.level)),
            );
        }
        if self.hero_experience > 0 {
            exp = exp.saturating_add(hero.calculate_xp(self.hero_experience));
        }
        exp
    }

    /// Ordered preview of the reward for `hero`.
    pub fn components(&self, hero: &HeroState) -> Vec<Component> {
        let mut comps = self.extra_components.clone();

        if self.hero_experience > 0 {
            let exp = hero.calculate_xp(self.hero_experience);
            comps.push(Component::new(
                ComponentKind::Experience,
                i64::try_from(exp).unwrap_or(i64::MAX),
            ));
        }
        if self.hero_level > 0 {
            comps.push(Component::new(
                ComponentKind::Level,
                i64::from(self.hero_level),
            ));
        }
        if self.grants_mana() {
            let gained = i64::from(self.calculate_mana_points(hero)) - i64::from(hero.mana);
            comps.push(Component::new(ComponentKind::Mana, gained));
        }

        for skill in PrimarySkill::ALL {
            let delta = self.primary[skill.index()];
            if delta != 0 {
                comps.push(Component::new(
                    ComponentKind::PrimarySkill(skill),
                    i64::from(delta),
                ));
            }
        }

        comps.extend(self.secondary.iter().map(|(skill, level)| {
            Component::new(ComponentKind::SecondarySkill(*skill), *level as i64)
        }));
        comps.extend(
            self.artifacts
                .iter()
                .map(|art| Component::new(ComponentKind::Artifact(*art), 1)),
        );
        comps.extend(
            self.spells
                .iter()
                .map(|spell| Component::new(ComponentKind::Spell(*spell), 1)),
        );
        comps.extend(self.creatures.iter().map(|stack| {
            Component::new(
                ComponentKind::Creature(stack.creature),
                i64::from(stack.count),
            )
        }));
        comps.extend(
            self.resources
                .nonzero()
                .map(|(kind, amount)| Component::new(ComponentKind::Resource(kind), i64::from(amount))),
        );

        comps
    }

    /// First component of the preview, used as the option icon when the
    /// player chooses among several rewards.
    pub fn displayed_component(&self, hero: &HeroState) -> Option<Component> {
        self.components(hero).into_iter().next()
    }
}
