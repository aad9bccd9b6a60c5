//! Catalog templates with randomized rewards.
//!
//! A template lists candidate rewards per entry. Instantiating it draws one
//! candidate per entry from the shared random stream, producing the live
//! [`Configuration`]. Re-instantiating is how a periodic reset re-rolls an
//! object's rewards.

use tracing::warn;

use crate::configuration::{
    Configuration, ConfigurationError, RewardPolicy, VisitEvent, VisitInfo,
};
use crate::env::{RngOracle, next_item};
use crate::limiter::Limiter;
use crate::reward::Reward;

/// Template for one catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntryTemplate {
    pub limiter: Limiter,
    pub message: String,
    pub visit_type: VisitEvent,
    /// One is drawn uniformly per instantiation.
    pub rewards: Vec<Reward>,
}

impl EntryTemplate {
    /// Entry with exactly one reward, so instantiation never draws for it.
    pub fn fixed(visit: VisitInfo) -> Self {
        Self {
            limiter: visit.limiter,
            message: visit.message,
            visit_type: visit.visit_type,
            rewards: vec![visit.reward],
        }
    }
}

/// Template for a whole object catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfigurationTemplate {
    pub entries: Vec<EntryTemplate>,
    pub policy: RewardPolicy,
}

impl ConfigurationTemplate {
    pub fn new(entries: Vec<EntryTemplate>, policy: RewardPolicy) -> Self {
        Self { entries, policy }
    }

    /// Template that always instantiates to `config`.
    pub fn fixed(config: Configuration) -> Self {
        Self {
            entries: config.info.into_iter().map(EntryTemplate::fixed).collect(),
            policy: config.policy,
        }
    }

    /// Draws one candidate per entry, in entry order.
    ///
    /// Entries with a single candidate consume no draw, so a fixed template
    /// leaves the random stream untouched.
    pub fn instantiate(&self, rng: &mut dyn RngOracle) -> Configuration {
        let info = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let reward = match entry.rewards.as_slice() {
                    [only] => only.clone(),
                    candidates => next_item(candidates, &mut *rng).cloned().unwrap_or_else(|| {
                        warn!(target: "content", entry = index, "catalog entry has no candidate rewards");
                        Reward::default()
                    }),
                };
                VisitInfo {
                    limiter: entry.limiter.clone(),
                    reward,
                    message: entry.message.clone(),
                    visit_type: entry.visit_type,
                }
            })
            .collect();

        Configuration::new(info, self.policy.clone())
    }

    /// Checks every entry and candidate.
    ///
    /// # Errors
    ///
    /// Returns the first defect found, in entry order.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.entries.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }
        for (entry, template) in self.entries.iter().enumerate() {
            if template.rewards.is_empty() {
                return Err(ConfigurationError::NoCandidates { entry });
            }
            if let Some(reward) = template.rewards.iter().find(|reward| !reward.fits_army()) {
                return Err(ConfigurationError::ArmyCapacityExceeded {
                    entry,
                    stacks: reward.creatures.len(),
                });
            }
        }
        Ok(())
    }
}
