use crate::env::WorldError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{HeroId, ObjectId};

/// Protocol contract violations raised by a rewardable object.
///
/// Each of these means the caller broke the visit protocol. Content gaps
/// and unsupported combinations never surface here; they are logged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RewardError {
    #[error("reward index {index} out of range for a catalog of {len} entries")]
    RewardIndexOutOfRange {
        index: usize,
        len: usize,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("answer {answer} does not match any of the {options} offered options")]
    UnknownAnswer {
        answer: u32,
        options: usize,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("hero has no pending decision at this object")]
    NoPendingDecision {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("hero has no suspended grant at this object")]
    NoPendingGrant {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("continuation token belongs to {token_object}")]
    ForeignToken {
        token_object: ObjectId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("entry {entry} grants {stacks} creature stacks that do not fit the hero's army")]
    ArmyCapacityExceeded {
        entry: usize,
        stacks: usize,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error(transparent)]
    World(#[from] WorldError),
}

fn context(object: ObjectId, hero: HeroId, day: u32) -> ErrorContext {
    ErrorContext::new(day).with_object(object).with_hero(hero)
}

impl RewardError {
    pub fn index_out_of_range(
        index: usize,
        len: usize,
        object: ObjectId,
        hero: HeroId,
        day: u32,
    ) -> Self {
        Self::RewardIndexOutOfRange {
            index,
            len,
            context: context(object, hero, day),
        }
    }

    pub fn unknown_answer(
        answer: u32,
        options: usize,
        object: ObjectId,
        hero: HeroId,
        day: u32,
    ) -> Self {
        Self::UnknownAnswer {
            answer,
            options,
            context: context(object, hero, day),
        }
    }

    pub fn no_pending_decision(object: ObjectId, hero: HeroId, day: u32) -> Self {
        Self::NoPendingDecision {
            context: context(object, hero, day),
        }
    }

    pub fn no_pending_grant(object: ObjectId, hero: HeroId, day: u32) -> Self {
        Self::NoPendingGrant {
            context: context(object, hero, day),
        }
    }

    pub fn foreign_token(token_object: ObjectId, object: ObjectId, hero: HeroId, day: u32) -> Self {
        Self::ForeignToken {
            token_object,
            context: context(object, hero, day),
        }
    }

    pub fn army_capacity_exceeded(
        entry: usize,
        stacks: usize,
        object: ObjectId,
        hero: HeroId,
        day: u32,
    ) -> Self {
        Self::ArmyCapacityExceeded {
            entry,
            stacks,
            context: context(object, hero, day),
        }
    }
}

impl GameError for RewardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RewardIndexOutOfRange { .. }
            | Self::UnknownAnswer { .. }
            | Self::NoPendingDecision { .. }
            | Self::NoPendingGrant { .. }
            | Self::ForeignToken { .. }
            | Self::ArmyCapacityExceeded { .. } => ErrorSeverity::Validation,
            Self::World(_) => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::RewardIndexOutOfRange { context, .. }
            | Self::UnknownAnswer { context, .. }
            | Self::NoPendingDecision { context }
            | Self::NoPendingGrant { context }
            | Self::ForeignToken { context, .. }
            | Self::ArmyCapacityExceeded { context, .. } => Some(context),
            Self::World(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RewardIndexOutOfRange { .. } => "REWARD_INDEX_OUT_OF_RANGE",
            Self::UnknownAnswer { .. } => "REWARD_UNKNOWN_ANSWER",
            Self::NoPendingDecision { .. } => "REWARD_NO_PENDING_DECISION",
            Self::NoPendingGrant { .. } => "REWARD_NO_PENDING_GRANT",
            Self::ForeignToken { .. } => "REWARD_FOREIGN_TOKEN",
            Self::ArmyCapacityExceeded { .. } => "REWARD_ARMY_CAPACITY_EXCEEDED",
            Self::World(err) => err.error_code(),
        }
    }
}
