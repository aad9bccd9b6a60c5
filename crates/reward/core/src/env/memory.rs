//! In-memory reference implementation of the world callbacks.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::state::{
    ArtifactId, Bonus, CreatureId, CreatureStack, GameDate, HeroId, HeroState, ObjectId, PlayerId,
    PlayerState, PrimarySkill, ResourceSet, SecondarySkillId, SkillLevel, SlotId, SpellId, TeamId,
};

use super::world::{GameMutator, WorldQuery};

/// One applied mutation, in the order the rules issued it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    GiveResources {
        player: PlayerId,
        delta: ResourceSet,
    },
    SetSecondarySkill {
        hero: HeroId,
        skill: SecondarySkillId,
        level: SkillLevel,
    },
    ChangePrimarySkill {
        hero: HeroId,
        skill: PrimarySkill,
        delta: i32,
    },
    GiveExperience {
        hero: HeroId,
        amount: u64,
    },
    SetMana {
        hero: HeroId,
        mana: i32,
    },
    SetMovement {
        hero: HeroId,
        movement: i32,
    },
    GiveBonus {
        hero: HeroId,
        bonus: Bonus,
    },
    GiveArtifact {
        hero: HeroId,
        artifact: ArtifactId,
    },
    ChangeSpells {
        hero: HeroId,
        learn: bool,
        spells: BTreeSet<SpellId>,
    },
    ChangeStackType {
        hero: HeroId,
        slot: SlotId,
        creature: CreatureId,
    },
    GiveCreatures {
        from: ObjectId,
        hero: HeroId,
        stacks: Vec<CreatureStack>,
    },
    CastSpell {
        caster: HeroId,
        spell: SpellId,
        school_level: SkillLevel,
    },
    RemoveObject {
        object: ObjectId,
    },
    AddTeamVisitor {
        object: ObjectId,
        team: TeamId,
    },
}

impl Mutation {
    /// Hero the mutation targets, if any.
    pub fn hero(&self) -> Option<HeroId> {
        match self {
            Mutation::SetSecondarySkill { hero, .. }
            | Mutation::ChangePrimarySkill { hero, .. }
            | Mutation::GiveExperience { hero, .. }
            | Mutation::SetMana { hero, .. }
            | Mutation::SetMovement { hero, .. }
            | Mutation::GiveBonus { hero, .. }
            | Mutation::GiveArtifact { hero, .. }
            | Mutation::ChangeSpells { hero, .. }
            | Mutation::ChangeStackType { hero, .. }
            | Mutation::GiveCreatures { hero, .. } => Some(*hero),
            Mutation::CastSpell { caster, .. } => Some(*caster),
            Mutation::GiveResources { .. }
            | Mutation::RemoveObject { .. }
            | Mutation::AddTeamVisitor { .. } => None,
        }
    }
}

/// Heroes, players and a journal of every change made to them.
///
/// Granting experience that reaches the next level's threshold leaves a
/// levelup pending until [`MemoryWorld::complete_levelup`] is called.
#[derive(Clone, Debug, Default)]
pub struct MemoryWorld {
    config: GameConfig,
    date: GameDate,
    heroes: BTreeMap<HeroId, HeroState>,
    players: BTreeMap<PlayerId, PlayerState>,
    pending_levelups: BTreeSet<HeroId>,
    removed_objects: BTreeSet<ObjectId>,
    team_visits: BTreeSet<(ObjectId, TeamId)>,
    journal: Vec<Mutation>,
}

impl MemoryWorld {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_hero(mut self, hero: HeroState) -> Self {
        self.insert_hero(hero);
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerState) -> Self {
        self.insert_player(player);
        self
    }

    pub fn insert_hero(&mut self, hero: HeroState) {
        self.heroes.insert(hero.id, hero);
    }

    pub fn insert_player(&mut self, player: PlayerState) {
        self.players.insert(player.id, player);
    }

    pub fn set_date(&mut self, date: GameDate) {
        self.date = date;
    }

    /// Moves the calendar one day forward and returns the new date.
    pub fn advance_day(&mut self) -> GameDate {
        self.date = self.date.next();
        self.date
    }

    pub fn heroes(&self) -> impl Iterator<Item = &HeroState> {
        self.heroes.values()
    }

    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    /// Empties the journal and returns what it held.
    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    pub fn is_removed(&self, object: ObjectId) -> bool {
        self.removed_objects.contains(&object)
    }

    pub fn team_visited(&self, object: ObjectId, team: TeamId) -> bool {
        self.team_visits.contains(&(object, team))
    }

    /// Resolves a pending levelup by raising the hero to the level its
    /// experience allows. Returns false when nothing was pending.
    pub fn complete_levelup(&mut self, hero: HeroId) -> bool {
        if !self.pending_levelups.remove(&hero) {
            return false;
        }
        let config = &self.config;
        if let Some(state) = self.heroes.get_mut(&hero) {
            let level = config.level_for_experience(state.experience).max(state.level);
            debug!(%hero, from = state.level, to = level, "levelup completed");
            state.level = level;
        }
        true
    }

    fn hero_mut(&mut self, id: HeroId) -> Option<&mut HeroState> {
        let hero = self.heroes.get_mut(&id);
        if hero.is_none() {
            warn!(hero = %id, "mutation targets unknown hero");
        }
        hero
    }

    fn record(&mut self, mutation: Mutation) {
        self.journal.push(mutation);
    }
}

impl WorldQuery for MemoryWorld {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn date(&self) -> GameDate {
        self.date
    }

    fn hero(&self, id: HeroId) -> Option<&HeroState> {
        self.heroes.get(&id)
    }

    fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    fn levelup_pending(&self, hero: HeroId) -> bool {
        self.pending_levelups.contains(&hero)
    }
}

impl GameMutator for MemoryWorld {
    fn give_resources(&mut self, player: PlayerId, delta: &ResourceSet) {
        match self.players.get_mut(&player) {
            Some(state) => state.resources.apply(delta),
            None => warn!(%player, "mutation targets unknown player"),
        }
        self.record(Mutation::GiveResources {
            player,
            delta: *delta,
        });
    }

    fn set_secondary_skill(&mut self, hero: HeroId, skill: SecondarySkillId, level: SkillLevel) {
        if let Some(state) = self.hero_mut(hero) {
            state.secondary.insert(skill, level);
        }
        self.record(Mutation::SetSecondarySkill { hero, skill, level });
    }

    fn change_primary_skill(&mut self, hero: HeroId, skill: PrimarySkill, delta: i32) {
        if let Some(state) = self.hero_mut(hero) {
            let value = &mut state.primary[skill.index()];
            *value = value.saturating_add(delta);
        }
        self.record(Mutation::ChangePrimarySkill { hero, skill, delta });
    }

    fn give_experience(&mut self, hero: HeroId, amount: u64) {
        let config = &self.config;
        let reached = self.heroes.get_mut(&hero).map(|state| {
            state.experience = state.experience.saturating_add(amount);
            state.level < GameConfig::MAX_LEVEL
                && state.experience >= config.required_experience(state.level + 1)
        });
        match reached {
            Some(true) => {
                debug!(%hero, amount, "levelup pending");
                self.pending_levelups.insert(hero);
            }
            Some(false) => {}
            None => warn!(%hero, "mutation targets unknown hero"),
        }
        self.record(Mutation::GiveExperience { hero, amount });
    }

    fn set_mana(&mut self, hero: HeroId, mana: i32) {
        if let Some(state) = self.hero_mut(hero) {
            state.mana = mana;
        }
        self.record(Mutation::SetMana { hero, mana });
    }

    fn set_movement(&mut self, hero: HeroId, movement: i32) {
        if let Some(state) = self.hero_mut(hero) {
            state.movement = movement;
        }
        self.record(Mutation::SetMovement { hero, movement });
    }

    fn give_bonus(&mut self, hero: HeroId, bonus: Bonus) {
        if let Some(state) = self.hero_mut(hero) {
            state.bonuses.push(bonus.clone());
        }
        self.record(Mutation::GiveBonus { hero, bonus });
    }

    fn give_artifact(&mut self, hero: HeroId, artifact: ArtifactId) {
        if let Some(state) = self.hero_mut(hero) {
            state.artifacts.push(artifact);
        }
        self.record(Mutation::GiveArtifact { hero, artifact });
    }

    fn change_spells(&mut self, hero: HeroId, learn: bool, spells: &BTreeSet<SpellId>) {
        if let Some(state) = self.hero_mut(hero) {
            if learn {
                state.spells.extend(spells.iter().copied());
            } else {
                state.spells.retain(|spell| !spells.contains(spell));
            }
        }
        self.record(Mutation::ChangeSpells {
            hero,
            learn,
            spells: spells.clone(),
        });
    }

    fn change_stack_type(&mut self, hero: HeroId, slot: SlotId, creature: CreatureId) {
        if let Some(stack) = self
            .hero_mut(hero)
            .and_then(|state| state.army.slot_mut(slot))
        {
            stack.creature = creature;
        }
        self.record(Mutation::ChangeStackType {
            hero,
            slot,
            creature,
        });
    }

    fn give_creatures(&mut self, from: ObjectId, hero: HeroId, stacks: &[CreatureStack]) {
        if let Some(state) = self.hero_mut(hero) {
            for stack in stacks {
                if !state.army.add(*stack) {
                    warn!(%hero, creature = %stack.creature, "no army slot for granted creatures");
                }
            }
        }
        self.record(Mutation::GiveCreatures {
            from,
            hero,
            stacks: stacks.to_vec(),
        });
    }

    fn cast_spell(&mut self, caster: HeroId, spell: SpellId, school_level: SkillLevel) {
        self.record(Mutation::CastSpell {
            caster,
            spell,
            school_level,
        });
    }

    fn remove_object(&mut self, object: ObjectId) {
        self.removed_objects.insert(object);
        self.record(Mutation::RemoveObject { object });
    }

    fn add_team_visitor(&mut self, object: ObjectId, hero: HeroId) {
        let team = self
            .heroes
            .get(&hero)
            .and_then(|state| self.players.get(&state.owner))
            .map(|player| player.team);
        let Some(team) = team else {
            warn!(%hero, %object, "team visit for hero without a team");
            return;
        };
        self.team_visits.insert((object, team));
        self.record(Mutation::AddTeamVisitor { object, team });
    }
}
