//! The two grant phases and the commit step that precedes them.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::configuration::{InfoWindowMode, VisitInfo};
use crate::env::{InfoWindow, RewardEnv};
use crate::reward::Reward;
use crate::state::{HeroId, HeroState, PrimarySkill, SkillLevel};

use super::{
    GrantToken, ObjectCapabilities, ObjectProperty, RewardError, RewardableObject, SuspendedGrant,
    VisitOutcome,
};

impl RewardableObject {
    /// Clone of catalog entry `index`.
    pub(super) fn visit_info(
        &self,
        index: usize,
        hero: HeroId,
        env: &RewardEnv<'_>,
    ) -> Result<VisitInfo, RewardError> {
        self.configuration.entry(index).cloned().ok_or_else(|| {
            RewardError::index_out_of_range(
                index,
                self.configuration.info.len(),
                self.id,
                hero,
                env.world().date().day(),
            )
        })
    }

    /// Rejects entries whose creatures do not fit the hero's current army.
    /// Runs before anything is committed or offered.
    pub(super) fn check_capacity(
        &self,
        index: usize,
        reward: &Reward,
        hero: &HeroState,
        env: &RewardEnv<'_>,
    ) -> Result<(), RewardError> {
        if reward.fits_army() && hero.army.can_fit(&reward.creatures) {
            return Ok(());
        }
        Err(RewardError::army_capacity_exceeded(
            index,
            reward.creatures.len(),
            self.id,
            hero.id,
            env.world().date().day(),
        ))
    }

    pub(super) fn mark_as_visited(&mut self, hero: &HeroState) {
        self.apply_property(ObjectProperty::Cleared(true));
        self.apply_property(ObjectProperty::AddVisitor {
            hero: hero.id,
            player: hero.owner,
        });
    }

    /// Shows the entry's message, optionally commits the visit, then grants.
    pub(super) fn grant_reward_with_message(
        &mut self,
        index: usize,
        hero_id: HeroId,
        mark_as_visited: bool,
        env: &mut RewardEnv<'_>,
    ) -> Result<VisitOutcome, RewardError> {
        let info = self.visit_info(index, hero_id, env)?;
        let hero = env.world().require_hero(hero_id)?.clone();
        self.check_capacity(index, &info.reward, &hero, env)?;
        debug!(object = %self.id, hero = %hero_id, index, message = %info.message, "granting reward");

        let mode = self.configuration.policy.info_window;
        if mode != InfoWindowMode::Modal || !info.message.is_empty() {
            let components = info.reward.components(&hero);
            if !components.is_empty() || !info.message.is_empty() {
                env.dialogs().show_info(InfoWindow {
                    player: hero.owner,
                    text: info.message.clone(),
                    components,
                    mode,
                });
            }
        }

        if mark_as_visited {
            self.mark_as_visited(&hero);
        }
        self.grant_reward(index, hero_id, env)
    }

    /// Commits the visit and grants without a message, for answered prompts.
    pub(super) fn grant_reward_silently(
        &mut self,
        index: usize,
        hero_id: HeroId,
        env: &mut RewardEnv<'_>,
    ) -> Result<VisitOutcome, RewardError> {
        let info = self.visit_info(index, hero_id, env)?;
        let hero = env.world().require_hero(hero_id)?.clone();
        self.check_capacity(index, &info.reward, &hero, env)?;
        self.mark_as_visited(&hero);
        self.grant_reward(index, hero_id, env)
    }

    /// Runs phase 1 and, unless a levelup is pending, phase 2.
    pub(super) fn grant_reward(
        &mut self,
        index: usize,
        hero_id: HeroId,
        env: &mut RewardEnv<'_>,
    ) -> Result<VisitOutcome, RewardError> {
        let info = self.visit_info(index, hero_id, env)?;
        self.apply_property(ObjectProperty::SelectReward(Some(index)));
        self.grant_before_levelup(&info.reward, hero_id, env)?;

        if env.world().levelup_pending(hero_id) {
            let token = GrantToken {
                object: self.id,
                hero: hero_id,
                reward: index,
            };
            debug!(object = %self.id, hero = %hero_id, index, "grant suspended on levelup");
            self.apply_property(ObjectProperty::Suspend(SuspendedGrant {
                token,
                reward: info.reward,
            }));
            return Ok(VisitOutcome::Suspended(token));
        }

        self.grant_after_levelup(&info.reward, hero_id, env)?;
        self.apply_property(ObjectProperty::SelectReward(None));
        Ok(VisitOutcome::Granted { reward: index })
    }

    /// Effects that do not depend on a level recalculation.
    fn grant_before_levelup(
        &self,
        reward: &Reward,
        hero_id: HeroId,
        env: &mut RewardEnv<'_>,
    ) -> Result<(), RewardError> {
        let hero = env.world().require_hero(hero_id)?.clone();
        let experience = reward.experience_for(&hero, env.world().config());
        let world = env.world_mut();

        if !reward.resources.is_empty() {
            world.give_resources(hero.owner, &reward.resources);
        }

        for (&skill, &level) in &reward.secondary {
            let current = hero.secondary_skill(skill);
            if level > current && (current != SkillLevel::None || hero.can_learn_skill()) {
                world.set_secondary_skill(hero_id, skill, level);
            }
        }

        for skill in PrimarySkill::ALL {
            let delta = reward.primary[skill.index()];
            if delta != 0 {
                world.change_primary_skill(hero_id, skill, delta);
            }
        }

        if experience > 0 {
            world.give_experience(hero_id, experience);
        }
        Ok(())
    }

    /// Effects applied once the hero's level is settled.
    pub(super) fn grant_after_levelup(
        &self,
        reward: &Reward,
        hero_id: HeroId,
        env: &mut RewardEnv<'_>,
    ) -> Result<(), RewardError> {
        let hero = env.world().require_hero(hero_id)?.clone();
        let world = env.world_mut();

        if reward.grants_mana() {
            world.set_mana(hero_id, reward.calculate_mana_points(&hero));
        }
        if reward.grants_movement() {
            world.set_movement(hero_id, reward.calculate_movement_points(&hero));
        }

        for bonus in &reward.bonuses {
            world.give_bonus(hero_id, bonus.clone().from_object(self.type_id));
        }

        for &artifact in &reward.artifacts {
            world.give_artifact(hero_id, artifact);
        }

        if !reward.spells.is_empty() {
            let spells: BTreeSet<_> = reward.spells.iter().copied().collect();
            world.change_spells(hero_id, true, &spells);
        }
        if !reward.forget_spells.is_empty() {
            let spells: BTreeSet<_> = reward.forget_spells.iter().copied().collect();
            world.change_spells(hero_id, false, &spells);
        }

        if !reward.creature_changes.is_empty() {
            for (slot, stack) in hero.army.stacks() {
                if let Some(&(_, to)) = reward
                    .creature_changes
                    .iter()
                    .find(|(from, _)| *from == stack.creature)
                {
                    world.change_stack_type(hero_id, slot, to);
                }
            }
        }

        if !reward.creatures.is_empty() {
            if !self.capabilities.contains(ObjectCapabilities::ARMY_HOLDER) {
                warn!(target: "content", object = %self.id, "object cannot hand over creatures");
            } else if !hero.army.can_fit(&reward.creatures) {
                warn!(object = %self.id, hero = %hero_id, "granted creatures do not fit the army, skipping");
            } else {
                world.give_creatures(self.id, hero_id, &reward.creatures);
            }
        }

        if let Some(cast) = reward.spell_cast {
            world.cast_spell(hero_id, cast.spell, cast.school_level);
            if reward.remove_object {
                warn!(target: "content", object = %self.id, "removal of object with spell casts is not supported");
            }
        } else if reward.remove_object {
            if self.capabilities.contains(ObjectCapabilities::REMOVABLE) {
                world.remove_object(self.id);
            } else {
                warn!(target: "content", object = %self.id, "object cannot be removed from the map");
            }
        }
        Ok(())
    }
}
