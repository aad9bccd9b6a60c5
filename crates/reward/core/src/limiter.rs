//! Eligibility rules gating rewards.
//!
//! A [`Limiter`] node holds a list of scalar [`Requirement`]s and three lists
//! of child limiters. Evaluation is a pure function of the hero snapshot,
//! the owner's stockpile and the calendar:
//!
//! 1. every requirement must hold (first failure stops evaluation)
//! 2. no `none_of` child may hold
//! 3. every `all_of` child must hold
//! 4. at least one `any_of` child must hold, or `any_of` is empty
//!
//! An empty limiter accepts every hero.

use crate::state::{
    ArtifactId, CreatureStack, GameDate, HeroState, PrimarySkill, ResourceSet, SecondarySkillId,
    SkillLevel, SpellId,
};

/// A single scalar predicate over the visiting hero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requirement {
    /// Only on this day of the week (1-7).
    DayOfWeek(u32),
    /// Only once at least this many days have passed.
    DaysPassed(u32),
    /// The hero's army holds at least this many creatures of the type.
    Creatures(CreatureStack),
    /// The owning player can afford this amount.
    Resources(ResourceSet),
    HeroLevel(u32),
    HeroExperience(u64),
    ManaPoints(i32),
    /// Mana at or above this percentage of the limit.
    ManaPercentage(i32),
    PrimarySkill { skill: PrimarySkill, min: i32 },
    SecondarySkill { skill: SecondarySkillId, level: SkillLevel },
    KnowsSpell(SpellId),
    HasArtifact(ArtifactId),
}

/// Inputs an eligibility check reads. Borrowed, never mutated.
#[derive(Clone, Copy, Debug)]
pub struct LimiterContext<'a> {
    pub hero: &'a HeroState,
    /// Stockpile of the hero's owner.
    pub resources: &'a ResourceSet,
    pub date: GameDate,
}

impl<'a> LimiterContext<'a> {
    pub fn new(hero: &'a HeroState, resources: &'a ResourceSet, date: GameDate) -> Self {
        Self {
            hero,
            resources,
            date,
        }
    }
}

impl Requirement {
    /// Checks this predicate against the context.
    pub fn holds(&self, ctx: &LimiterContext<'_>) -> bool {
        let hero = ctx.hero;
        match self {
            Requirement::DayOfWeek(day) => ctx.date.day_of_week() == *day,
            Requirement::DaysPassed(days) => ctx.date.day() >= *days,
            Requirement::Creatures(required) => {
                hero.army.count_of(required.creature) >= u64::from(required.count)
            }
            Requirement::Resources(cost) => ctx.resources.can_afford(cost),
            Requirement::HeroLevel(level) => hero.level >= *level,
            Requirement::HeroExperience(exp) => hero.experience >= *exp,
            Requirement::ManaPoints(mana) => hero.mana >= *mana,
            Requirement::ManaPercentage(percent) => hero.mana_percent() >= *percent,
            Requirement::PrimarySkill { skill, min } => hero.primary_skill(*skill) >= *min,
            Requirement::SecondarySkill { skill, level } => hero.secondary_skill(*skill) >= *level,
            Requirement::KnowsSpell(spell) => hero.knows_spell(*spell),
            Requirement::HasArtifact(artifact) => hero.has_artifact(*artifact),
        }
    }
}

/// Eligibility predicate tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limiter {
    pub requires: Vec<Requirement>,
    pub none_of: Vec<Limiter>,
    pub all_of: Vec<Limiter>,
    pub any_of: Vec<Limiter>,
}

impl Limiter {
    /// Limiter that accepts every hero.
    pub fn always() -> Self {
        Self::default()
    }

    /// Builder: add a scalar requirement.
    #[must_use]
    pub fn require(mut self, requirement: Requirement) -> Self {
        self.requires.push(requirement);
        self
    }

    #[must_use]
    pub fn with_all_of(mut self, children: Vec<Limiter>) -> Self {
        self.all_of = children;
        self
    }

    #[must_use]
    pub fn with_none_of(mut self, children: Vec<Limiter>) -> Self {
        self.none_of = children;
        self
    }

    #[must_use]
    pub fn with_any_of(mut self, children: Vec<Limiter>) -> Self {
        self.any_of = children;
        self
    }

    /// Evaluates the tree. Pure and total.
    pub fn is_eligible(&self, ctx: &LimiterContext<'_>) -> bool {
        if !self.requires.iter().all(|req| req.holds(ctx)) {
            return false;
        }
        if self.none_of.iter().any(|child| child.is_eligible(ctx)) {
            return false;
        }
        if !self.all_of.iter().all(|child| child.is_eligible(ctx)) {
            return false;
        }
        self.any_of.is_empty() || self.any_of.iter().any(|child| child.is_eligible(ctx))
    }
}
