//! Deterministic reward rules for visitable map objects.
//!
//! `reward-core` evaluates who qualifies for which reward, chooses among
//! qualifying rewards, and grants them in two phases that may be split by a
//! hero's levelup. All state it does not own is reached through the
//! collaborator traits in [`env`]; all state it owns lives on
//! [`object::RewardableObject`].
pub mod config;
pub mod configuration;
pub mod env;
pub mod error;
pub mod limiter;
pub mod object;
pub mod reward;
pub mod state;
pub mod template;
pub mod visit;

pub use config::GameConfig;
pub use configuration::{
    Configuration, ConfigurationError, InfoWindowMode, ResetParameters, RewardPolicy, SelectMode,
    VisitEvent, VisitInfo, VisitMode,
};
pub use env::{
    BlockingDialog, DecisionChannel, GameCallback, GameMutator, InfoWindow, MemoryWorld, Mutation,
    PcgRng, RecordedDialogs, RewardEnv, RngOracle, WorldError, WorldQuery, next_item,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use limiter::{Limiter, LimiterContext, Requirement};
pub use object::{
    GrantToken, ObjectCapabilities, ObjectProperty, RewardError, RewardableObject, SuspendedGrant,
    VisitOutcome,
};
pub use reward::{Component, ComponentKind, Reward, SpellCast};
pub use state::{
    Army, ArtifactId, Bonus, BonusDuration, BonusKind, BonusSource, CreatureId, CreatureStack,
    GameDate, HeroId, HeroState, ObjectId, ObjectTypeId, PlayerId, PlayerState, PrimarySkill,
    ResourceKind, ResourceSet, SecondarySkillId, SkillLevel, SlotId, SpellId, TeamId,
};
pub use template::{ConfigurationTemplate, EntryTemplate};
pub use visit::VisitState;
