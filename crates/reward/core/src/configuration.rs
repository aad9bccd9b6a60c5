//! Per-object reward catalogs and the policy that governs them.

use tracing::trace;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::limiter::{Limiter, LimiterContext};
use crate::reward::Reward;
use crate::state::GameDate;

/// Which visit situation a catalog entry answers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VisitEvent {
    #[default]
    FirstVisit,
    AlreadyVisited,
    /// Nothing qualified on a first visit.
    NotAvailable,
}

/// What "already visited" means for an object.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VisitMode {
    #[default]
    Unlimited,
    /// Cleared for everyone after the first grant.
    Once,
    PerPlayer,
    /// Visited while the hero holds a bonus granted by this object kind.
    Bonus,
    PerHero,
}

/// How to choose when several rewards qualify.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SelectMode {
    /// Ask the player.
    #[default]
    Player,
    First,
    Random,
}

/// Presentation of the grant message.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InfoWindowMode {
    /// Blocking window. Skipped entirely when the message is empty.
    #[default]
    Modal,
    /// Non-blocking notification.
    Infobox,
}

/// Periodic reset schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResetParameters {
    /// Days between resets. Zero disables resets.
    pub period: u16,
    /// Clear visited state.
    pub visitors: bool,
    /// Re-roll the randomized catalog.
    pub rewards: bool,
}

impl ResetParameters {
    /// True on days `1 + k * period` for `k >= 1`.
    pub fn is_due(&self, date: GameDate) -> bool {
        let day = date.day();
        self.period != 0 && day > 1 && (day - 1) % u32::from(self.period) == 0
    }
}

/// Object-level policy shared by live catalogs and their templates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardPolicy {
    pub visit_mode: VisitMode,
    pub select_mode: SelectMode,
    /// Offer accept/decline for single rewards and a cancel option for choices.
    pub can_refuse: bool,
    pub info_window: InfoWindowMode,
    pub reset: ResetParameters,
    /// Prompt shown when the player picks among several rewards.
    pub on_select: String,
}

/// One catalog entry: who qualifies, what they get, and when it applies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VisitInfo {
    pub limiter: Limiter,
    pub reward: Reward,
    pub message: String,
    pub visit_type: VisitEvent,
}

/// The live catalog of one object instance.
///
/// Entries are evaluated in declared order; first-match selection and the
/// order of presented options both follow it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Configuration {
    pub info: Vec<VisitInfo>,
    pub policy: RewardPolicy,
}

impl Configuration {
    pub fn new(info: Vec<VisitInfo>, policy: RewardPolicy) -> Self {
        Self { info, policy }
    }

    pub fn visit_mode(&self) -> VisitMode {
        self.policy.visit_mode
    }

    pub fn select_mode(&self) -> SelectMode {
        self.policy.select_mode
    }

    pub fn can_refuse(&self) -> bool {
        self.policy.can_refuse
    }

    pub fn reset_period(&self) -> u16 {
        self.policy.reset.period
    }

    pub fn entry(&self, index: usize) -> Option<&VisitInfo> {
        self.info.get(index)
    }

    /// Indices of entries for `event` whose limiter accepts the hero, in
    /// declared order.
    pub fn available_rewards(&self, ctx: &LimiterContext<'_>, event: VisitEvent) -> Vec<usize> {
        self.info
            .iter()
            .enumerate()
            .filter(|(_, visit)| visit.visit_type == event && visit.limiter.is_eligible(ctx))
            .map(|(index, _)| {
                trace!(index, %event, "reward is allowed");
                index
            })
            .collect()
    }

    /// Checks structural invariants of the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first defect found, in entry order.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.info.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }
        for (entry, visit) in self.info.iter().enumerate() {
            if !visit.reward.fits_army() {
                return Err(ConfigurationError::ArmyCapacityExceeded {
                    entry,
                    stacks: visit.reward.creatures.len(),
                });
            }
        }
        Ok(())
    }
}

/// Defects in a catalog or catalog template.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigurationError {
    #[error("catalog has no entries")]
    EmptyCatalog,

    #[error(
        "entry {entry} grants {stacks} creature stacks, more than the {} an army holds",
        GameConfig::ARMY_SIZE
    )]
    ArmyCapacityExceeded { entry: usize, stacks: usize },

    #[error("entry {entry} has no candidate rewards")]
    NoCandidates { entry: usize },
}

impl GameError for ConfigurationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigurationError::EmptyCatalog => "CONFIG_EMPTY_CATALOG",
            ConfigurationError::ArmyCapacityExceeded { .. } => "CONFIG_ARMY_CAPACITY_EXCEEDED",
            ConfigurationError::NoCandidates { .. } => "CONFIG_NO_CANDIDATES",
        }
    }
}
