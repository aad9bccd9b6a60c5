//! Rewardable map objects and the visit protocol they drive.
//!
//! A [`RewardableObject`] owns its live catalog, its visited state and the
//! bookkeeping of interactions in flight. Every change to that state goes
//! through [`RewardableObject::apply_property`]; every change to heroes and
//! players goes through the world's mutation channel.
//!
//! # Protocol
//!
//! ```text
//! on_visit ─┬─ nothing qualifies ──────────────▶ not-available entry (no commit)
//!           ├─ prompt ──▶ on_decision_answered ─┐
//!           └─ auto-select ─────────────────────┴▶ commit ▶ phase 1 ─┬─▶ phase 2
//!                                                                   └─ levelup pending
//!                                                                        │
//!                                        on_recalculation_complete ◀─────┘
//! ```

mod error;
mod grant;
mod protocol;

use std::collections::BTreeMap;

use bitflags::bitflags;
use tracing::trace;

pub use error::RewardError;

use crate::configuration::{Configuration, ConfigurationError, VisitMode};
use crate::env::RngOracle;
use crate::reward::Reward;
use crate::state::{HeroId, HeroState, ObjectId, ObjectTypeId, PlayerId};
use crate::template::ConfigurationTemplate;
use crate::visit::VisitState;

bitflags! {
    /// What an object is able to do beyond granting rewards.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ObjectCapabilities: u8 {
        /// Holds creatures it can hand over to a hero.
        const ARMY_HOLDER = 1 << 0;
        /// May be taken off the map by a reward.
        const REMOVABLE   = 1 << 1;
    }
}

/// Continuation of a grant suspended on a levelup.
///
/// Handed to the host with [`VisitOutcome::Suspended`] and passed back to
/// [`RewardableObject::resume`] once the hero's level is settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantToken {
    /// Object that issued the token.
    pub object: ObjectId,
    /// Hero whose levelup interrupted the grant.
    pub hero: HeroId,
    /// Catalog index of the reward in flight.
    pub reward: usize,
}

/// A grant waiting for phase 2.
///
/// Keeps its own copy of the reward, so a catalog re-roll between the
/// phases does not change what the hero receives.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuspendedGrant {
    pub token: GrantToken,
    /// Reward as it was when phase 1 ran.
    pub reward: Reward,
}

/// Result of one protocol step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitOutcome {
    /// No reward applied. A content warning may have been logged.
    Nothing,
    /// The player declined.
    Refused,
    /// A blocking dialog is out; answer through `on_decision_answered`.
    AwaitingDecision { options: Vec<usize> },
    /// Both grant phases ran for this catalog entry.
    Granted { reward: usize },
    /// Phase 1 ran; phase 2 waits for `on_recalculation_complete`.
    Suspended(GrantToken),
}

/// The only ways object-local state changes.
///
/// Each variant is a self-contained record, so a host can forward the same
/// sequence to replicas and replay it to reach the same object state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectProperty {
    /// Moves the selected-reward cursor. `None` once no grant is in flight.
    SelectReward(Option<usize>),
    /// Sets the global cleared flag of once-only objects.
    Cleared(bool),
    /// Records a committed visit by `hero`, owned by `player`.
    AddVisitor { hero: HeroId, player: PlayerId },
    /// Forgets every visitor. The cleared flag is reset separately.
    ClearVisitors,
    /// Installs a freshly drawn catalog.
    Randomize(Configuration),
    /// Opens a blocking dialog for `hero` offering the catalog `options`.
    AwaitDecision { hero: HeroId, options: Vec<usize> },
    /// Closes the hero's dialog, whether answered or refused.
    DecisionResolved(HeroId),
    /// Parks a grant between its two phases.
    Suspend(SuspendedGrant),
    /// Drops the hero's parked grant once phase 2 has started.
    Resumed(HeroId),
}

/// A map object that grants rewards on visit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardableObject {
    id: ObjectId,
    type_id: ObjectTypeId,
    capabilities: ObjectCapabilities,
    template: ConfigurationTemplate,
    configuration: Configuration,
    visit_state: VisitState,
    selected: Option<usize>,
    /// Options shown in each hero's open blocking dialog.
    pending_decisions: BTreeMap<HeroId, Vec<usize>>,
    suspended: BTreeMap<HeroId, SuspendedGrant>,
}

impl RewardableObject {
    /// Validates the template and draws the initial catalog from `rng`.
    ///
    /// # Errors
    ///
    /// Returns the first defect found in the template.
    pub fn new(
        id: ObjectId,
        type_id: ObjectTypeId,
        capabilities: ObjectCapabilities,
        template: ConfigurationTemplate,
        rng: &mut dyn RngOracle,
    ) -> Result<Self, ConfigurationError> {
        template.validate()?;
        let configuration = template.instantiate(rng);
        Ok(Self {
            id,
            type_id,
            capabilities,
            visit_state: VisitState::for_mode(configuration.visit_mode()),
            template,
            configuration,
            selected: None,
            pending_decisions: BTreeMap::new(),
            suspended: BTreeMap::new(),
        })
    }

    /// Object with a fixed catalog that never re-rolls.
    ///
    /// # Errors
    ///
    /// Returns the first defect found in the catalog.
    pub fn with_configuration(
        id: ObjectId,
        type_id: ObjectTypeId,
        capabilities: ObjectCapabilities,
        configuration: Configuration,
    ) -> Result<Self, ConfigurationError> {
        configuration.validate()?;
        Ok(Self {
            id,
            type_id,
            capabilities,
            visit_state: VisitState::for_mode(configuration.visit_mode()),
            template: ConfigurationTemplate::fixed(configuration.clone()),
            configuration,
            selected: None,
            pending_decisions: BTreeMap::new(),
            suspended: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn type_id(&self) -> ObjectTypeId {
        self.type_id
    }

    pub fn capabilities(&self) -> ObjectCapabilities {
        self.capabilities
    }

    /// Read-only view of the live catalog, for display.
    pub fn current_configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn template(&self) -> &ConfigurationTemplate {
        &self.template
    }

    pub fn visit_state(&self) -> &VisitState {
        &self.visit_state
    }

    /// Selected-reward cursor.
    pub fn selected_reward(&self) -> Option<usize> {
        self.selected
    }

    pub fn pending_decision(&self, hero: HeroId) -> Option<&[usize]> {
        self.pending_decisions.get(&hero).map(Vec::as_slice)
    }

    pub fn suspended_grant(&self, hero: HeroId) -> Option<GrantToken> {
        self.suspended.get(&hero).map(|grant| grant.token)
    }

    /// Reward phase 2 will apply for the hero's suspended grant.
    pub fn suspended_reward(&self, hero: HeroId) -> Option<&Reward> {
        self.suspended.get(&hero).map(|grant| &grant.reward)
    }

    /// Visited marker for hover text seen by `hero`. `None` when the object
    /// does not track visits.
    pub fn hover_state(&self, hero: &HeroState) -> Option<bool> {
        match self.configuration.visit_mode() {
            VisitMode::Unlimited => None,
            _ => Some(self.visit_state.was_visited(hero, self.type_id)),
        }
    }

    /// Visited marker for hover text seen by a player without a hero.
    pub fn hover_state_for_player(&self, player: PlayerId) -> Option<bool> {
        match self.configuration.visit_mode() {
            VisitMode::Once | VisitMode::PerPlayer => {
                Some(self.visit_state.was_visited_by_player(player))
            }
            _ => None,
        }
    }

    /// Applies one object-local change.
    pub fn apply_property(&mut self, property: ObjectProperty) {
        trace!(object = %self.id, ?property, "object property changed");
        match property {
            ObjectProperty::SelectReward(index) => self.selected = index,
            ObjectProperty::Cleared(value) => self.visit_state.set_cleared(value),
            ObjectProperty::AddVisitor { hero, player } => {
                self.visit_state.add_visitor(hero, player)
            }
            ObjectProperty::ClearVisitors => self.visit_state.clear(),
            ObjectProperty::Randomize(configuration) => self.configuration = configuration,
            ObjectProperty::AwaitDecision { hero, options } => {
                self.pending_decisions.insert(hero, options);
            }
            ObjectProperty::DecisionResolved(hero) => {
                self.pending_decisions.remove(&hero);
            }
            ObjectProperty::Suspend(grant) => {
                self.suspended.insert(grant.token.hero, grant);
            }
            ObjectProperty::Resumed(hero) => {
                self.suspended.remove(&hero);
            }
        }
    }
}
