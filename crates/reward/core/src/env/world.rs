//! State query and mutation callbacks supplied by the host simulation.

use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    ArtifactId, Bonus, CreatureId, CreatureStack, GameDate, HeroId, HeroState, ObjectId,
    PlayerId, PlayerState, PrimarySkill, ResourceSet, SecondarySkillId, SkillLevel, SlotId,
    SpellId,
};

/// Read-only view of the simulation.
///
/// Reward rules read heroes and players through this trait and never keep
/// the returned references across a mutation.
pub trait WorldQuery {
    /// Game-wide constants, the experience curve among them.
    fn config(&self) -> &GameConfig;

    /// Current in-game date. Periodic resets and limiter day ranges are
    /// evaluated against it.
    fn date(&self) -> GameDate;

    /// Looks up a hero by id.
    ///
    /// # Returns
    ///
    /// `None` if the hero is not on the map.
    fn hero(&self, id: HeroId) -> Option<&HeroState>;

    /// Looks up a player by id.
    ///
    /// # Returns
    ///
    /// `None` if the player is not part of the game.
    fn player(&self, id: PlayerId) -> Option<&PlayerState>;

    /// True while a derived-stat recalculation (level-up) for `hero` is
    /// waiting to be resolved outside the reward rules.
    fn levelup_pending(&self, hero: HeroId) -> bool;

    /// Returns the hero, or an error if it is not part of the world.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::HeroNotFound` if no such hero exists.
    fn require_hero(&self, id: HeroId) -> Result<&HeroState, WorldError> {
        self.hero(id).ok_or(WorldError::HeroNotFound(id))
    }

    /// Returns the player, or an error if it is not part of the world.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::PlayerNotFound` if no such player exists.
    fn require_player(&self, id: PlayerId) -> Result<&PlayerState, WorldError> {
        self.player(id).ok_or(WorldError::PlayerNotFound(id))
    }
}

/// The single authoritative mutation channel.
///
/// Each call is atomic from the rules' point of view and is expected to be
/// serialized and replicated by the host. Calls never fail recoverably: a
/// target the host does not know is logged and ignored.
pub trait GameMutator {
    /// Adds `delta` to the player's stockpile.
    ///
    /// # Arguments
    ///
    /// * `player` - Owner of the visiting hero
    /// * `delta` - Signed amounts per resource kind; negative entries pay
    fn give_resources(&mut self, player: PlayerId, delta: &ResourceSet);

    /// Sets (not adds) the mastery of a secondary skill.
    fn set_secondary_skill(&mut self, hero: HeroId, skill: SecondarySkillId, level: SkillLevel);

    /// Adds `delta` to one primary skill. Negative deltas are allowed.
    fn change_primary_skill(&mut self, hero: HeroId, skill: PrimarySkill, delta: i32);

    /// Adds experience, saturating at `u64::MAX`.
    ///
    /// May leave a level-up pending, see [`WorldQuery::levelup_pending`].
    ///
    /// # Arguments
    ///
    /// * `hero` - Receiving hero
    /// * `amount` - Experience after the hero's learning bonus
    fn give_experience(&mut self, hero: HeroId, amount: u64);

    /// Sets the hero's mana to an absolute value, which may exceed the limit.
    fn set_mana(&mut self, hero: HeroId, mana: i32);

    /// Sets the hero's remaining movement points to an absolute value.
    fn set_movement(&mut self, hero: HeroId, movement: i32);

    /// Attaches a temporary or permanent bonus. Its source already names the
    /// granting object type.
    fn give_bonus(&mut self, hero: HeroId, bonus: Bonus);

    /// Hands one artifact to the hero.
    fn give_artifact(&mut self, hero: HeroId, artifact: ArtifactId);

    /// Learns (`learn == true`) or forgets every spell in `spells`.
    fn change_spells(&mut self, hero: HeroId, learn: bool, spells: &BTreeSet<SpellId>);

    /// Replaces the creature type of the stack in `slot`, keeping its count.
    fn change_stack_type(&mut self, hero: HeroId, slot: SlotId, creature: CreatureId);

    /// Moves creatures held by `from` into the hero's army. The caller has
    /// already checked that every stack fits the army as it is now.
    ///
    /// # Arguments
    ///
    /// * `from` - Object handing the creatures over
    /// * `hero` - Receiving hero
    /// * `stacks` - Stacks in grant order; equal creatures merge
    fn give_creatures(&mut self, from: ObjectId, hero: HeroId, stacks: &[CreatureStack]);

    /// Casts an adventure spell on behalf of `caster` at the given mastery.
    fn cast_spell(&mut self, caster: HeroId, spell: SpellId, school_level: SkillLevel);

    /// Takes the object off the map. Removing it twice has no further effect.
    fn remove_object(&mut self, object: ObjectId);

    /// Records that the hero's team no longer needs to be stopped by `object`.
    fn add_team_visitor(&mut self, object: ObjectId, hero: HeroId);
}

/// A host that is both queried and mutated.
pub trait GameCallback: WorldQuery + GameMutator {}

impl<T: WorldQuery + GameMutator + ?Sized> GameCallback for T {}

/// Errors raised when the world does not contain a referenced entity.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldError {
    #[error("hero {0} not found")]
    HeroNotFound(HeroId),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            WorldError::HeroNotFound(_) => "WORLD_HERO_NOT_FOUND",
            WorldError::PlayerNotFound(_) => "WORLD_PLAYER_NOT_FOUND",
        }
    }
}
