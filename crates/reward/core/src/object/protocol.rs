//! Entry points hosts call into.

use tracing::{debug, warn};

use crate::configuration::{SelectMode, VisitEvent};
use crate::env::{BlockingDialog, RewardEnv, next_item};
use crate::limiter::LimiterContext;
use crate::reward::{Component, ComponentKind};
use crate::state::{GameDate, HeroId, HeroState, ResourceSet};

use super::{GrantToken, ObjectProperty, RewardError, RewardableObject, VisitOutcome};

impl RewardableObject {
    /// Catalog entries for `event` that `hero` currently qualifies for.
    fn available_rewards(
        &self,
        hero: HeroId,
        event: VisitEvent,
        env: &RewardEnv<'_>,
    ) -> Result<Vec<usize>, RewardError> {
        let world = env.world();
        let state = world.require_hero(hero)?;
        let resources = world
            .player(state.owner)
            .map(|player| player.resources)
            .unwrap_or(ResourceSet::EMPTY);
        let ctx = LimiterContext::new(state, &resources, world.date());
        Ok(self.configuration.available_rewards(&ctx, event))
    }

    /// Handles a hero stepping onto the object.
    ///
    /// # Errors
    ///
    /// Fails when the hero is unknown or a selected entry breaks the
    /// catalog's contract. Nothing is committed in that case.
    pub fn on_visit(
        &mut self,
        hero_id: HeroId,
        env: &mut RewardEnv<'_>,
    ) -> Result<VisitOutcome, RewardError> {
        let hero = env.world().require_hero(hero_id)?.clone();

        if self.visit_state.was_visited_before(&hero, self.type_id) {
            debug!(object = %self.id, hero = %hero_id, "revisiting already visited object");
            let visited = self.available_rewards(hero_id, VisitEvent::AlreadyVisited, env)?;
            return match visited.first() {
                Some(&index) => self.grant_reward_with_message(index, hero_id, false, env),
                None => {
                    warn!(target: "content", object = %self.id, "no applicable message for visiting already visited object");
                    Ok(VisitOutcome::Nothing)
                }
            };
        }

        let rewards = self.available_rewards(hero_id, VisitEvent::FirstVisit, env)?;
        let removal_possible = rewards.iter().any(|&index| {
            self.configuration
                .entry(index)
                .is_some_and(|visit| visit.reward.remove_object)
        });
        debug!(object = %self.id, hero = %hero_id, count = rewards.len(), "visiting object");

        let outcome = match rewards.as_slice() {
            [] => {
                let empty = self.available_rewards(hero_id, VisitEvent::NotAvailable, env)?;
                match empty.first() {
                    Some(&index) => self.grant_reward_with_message(index, hero_id, false, env)?,
                    None => {
                        warn!(target: "content", object = %self.id, "no applicable message for visiting empty object");
                        VisitOutcome::Nothing
                    }
                }
            }
            [only] => {
                if self.configuration.can_refuse() {
                    let options = self.fitting_options(&rewards, &hero, env)?;
                    let text = self
                        .configuration
                        .entry(*only)
                        .map(|visit| visit.message.clone())
                        .unwrap_or_default();
                    self.select_rewards_message(&hero, options, text, env)
                } else {
                    self.grant_reward_with_message(*only, hero_id, true, env)?
                }
            }
            [first, ..] => match self.configuration.select_mode() {
                SelectMode::Player => {
                    let options = self.fitting_options(&rewards, &hero, env)?;
                    let text = self.configuration.policy.on_select.clone();
                    self.select_rewards_message(&hero, options, text, env)
                }
                SelectMode::First => self.grant_reward_with_message(*first, hero_id, true, env)?,
                SelectMode::Random => {
                    let index = next_item(&rewards, env.rng()).copied().unwrap_or(*first);
                    self.grant_reward_with_message(index, hero_id, true, env)?
                }
            },
        };

        if !removal_possible
            && self
                .available_rewards(hero_id, VisitEvent::FirstVisit, env)?
                .is_empty()
        {
            env.world_mut().add_team_visitor(self.id, hero_id);
        }

        Ok(outcome)
    }

    /// Entries among `options` whose creatures fit the hero's army.
    ///
    /// # Errors
    ///
    /// Fails with the first rejection when none of them fit.
    fn fitting_options(
        &self,
        options: &[usize],
        hero: &HeroState,
        env: &RewardEnv<'_>,
    ) -> Result<Vec<usize>, RewardError> {
        let mut rejected = None;
        let mut fitting = Vec::with_capacity(options.len());
        for &index in options {
            let visit = self.visit_info(index, hero.id, env)?;
            match self.check_capacity(index, &visit.reward, hero, env) {
                Ok(()) => fitting.push(index),
                Err(err) => {
                    debug!(object = %self.id, hero = %hero.id, index, "option does not fit the army");
                    rejected.get_or_insert(err);
                }
            }
        }
        match rejected {
            Some(err) if fitting.is_empty() => Err(err),
            _ => Ok(fitting),
        }
    }

    /// Sends a blocking dialog and remembers what it offered.
    fn select_rewards_message(
        &mut self,
        hero: &HeroState,
        options: Vec<usize>,
        text: String,
        env: &mut RewardEnv<'_>,
    ) -> VisitOutcome {
        let selection = options.len() > 1;
        let components: Vec<Component> = if selection {
            options
                .iter()
                .map(|&index| {
                    self.configuration
                        .entry(index)
                        .and_then(|visit| visit.reward.displayed_component(hero))
                        .unwrap_or_else(|| {
                            warn!(target: "content", object = %self.id, index, "selectable reward shows no component");
                            Component::new(ComponentKind::Empty, 0)
                        })
                })
                .collect()
        } else {
            options
                .first()
                .and_then(|&index| self.configuration.entry(index))
                .map(|visit| visit.reward.components(hero))
                .unwrap_or_default()
        };

        env.dialogs().show_blocking(BlockingDialog {
            player: hero.owner,
            hero: hero.id,
            object: self.id,
            text,
            components,
            can_refuse: self.configuration.can_refuse(),
            selection,
        });
        debug!(object = %self.id, hero = %hero.id, ?options, "awaiting decision");
        self.apply_property(ObjectProperty::AwaitDecision {
            hero: hero.id,
            options: options.clone(),
        });
        VisitOutcome::AwaitingDecision { options }
    }

    /// Routes the answer to an open blocking dialog.
    ///
    /// Answer 0 declines. Answer `k` picks the k-th offered option.
    ///
    /// # Errors
    ///
    /// Fails when the hero has no open dialog here, `answer` is not one of
    /// the offered options, or the picked creatures no longer fit the army.
    /// The dialog stays open in the latter two cases.
    pub fn on_decision_answered(
        &mut self,
        hero_id: HeroId,
        answer: u32,
        env: &mut RewardEnv<'_>,
    ) -> Result<VisitOutcome, RewardError> {
        let day = env.world().date().day();
        let options = self
            .pending_decisions
            .get(&hero_id)
            .cloned()
            .ok_or_else(|| RewardError::no_pending_decision(self.id, hero_id, day))?;

        if answer == 0 {
            debug!(object = %self.id, hero = %hero_id, "reward refused");
            self.apply_property(ObjectProperty::DecisionResolved(hero_id));
            return Ok(VisitOutcome::Refused);
        }

        let index = usize::try_from(answer - 1)
            .ok()
            .and_then(|k| options.get(k).copied())
            .ok_or_else(|| RewardError::unknown_answer(answer, options.len(), self.id, hero_id, day))?;

        let hero = env.world().require_hero(hero_id)?.clone();
        let info = self.visit_info(index, hero_id, env)?;
        self.check_capacity(index, &info.reward, &hero, env)?;

        self.apply_property(ObjectProperty::DecisionResolved(hero_id));
        self.grant_reward_silently(index, hero_id, env)
    }

    /// Runs phase 2 for the hero's suspended grant.
    ///
    /// # Errors
    ///
    /// Fails when no grant is suspended for the hero here.
    pub fn on_recalculation_complete(
        &mut self,
        hero_id: HeroId,
        env: &mut RewardEnv<'_>,
    ) -> Result<VisitOutcome, RewardError> {
        let token = self.suspended_grant(hero_id).ok_or_else(|| {
            RewardError::no_pending_grant(self.id, hero_id, env.world().date().day())
        })?;
        self.resume(token, env)
    }

    /// Runs phase 2 for an explicit continuation token.
    ///
    /// Applies the reward stored when the grant was suspended, even if the
    /// catalog has been re-rolled since.
    ///
    /// # Errors
    ///
    /// Fails when the token names another object or no longer matches the
    /// hero's suspended grant.
    pub fn resume(
        &mut self,
        token: GrantToken,
        env: &mut RewardEnv<'_>,
    ) -> Result<VisitOutcome, RewardError> {
        if token.object != self.id {
            return Err(RewardError::foreign_token(
                token.object,
                self.id,
                token.hero,
                env.world().date().day(),
            ));
        }
        let reward = self
            .suspended
            .get(&token.hero)
            .filter(|grant| grant.token == token)
            .map(|grant| grant.reward.clone())
            .ok_or_else(|| {
                RewardError::no_pending_grant(self.id, token.hero, env.world().date().day())
            })?;
        debug!(object = %self.id, hero = %token.hero, index = token.reward, "resuming grant after levelup");

        self.apply_property(ObjectProperty::Resumed(token.hero));
        self.grant_after_levelup(&reward, token.hero, env)?;
        if self.selected == Some(token.reward) && self.suspended.is_empty() {
            self.apply_property(ObjectProperty::SelectReward(None));
        }
        Ok(VisitOutcome::Granted {
            reward: token.reward,
        })
    }

    /// Applies the periodic reset when `date` is a reset day.
    pub fn on_turn_advanced(&mut self, date: GameDate, env: &mut RewardEnv<'_>) {
        let reset = self.configuration.policy.reset;
        if !reset.is_due(date) {
            return;
        }
        debug!(object = %self.id, %date, rewards = reset.rewards, visitors = reset.visitors, "periodic reset");
        if reset.rewards {
            let configuration = self.template.instantiate(env.rng());
            self.apply_property(ObjectProperty::Randomize(configuration));
        }
        if reset.visitors {
            self.apply_property(ObjectProperty::Cleared(false));
            self.apply_property(ObjectProperty::ClearVisitors);
        }
    }
}
