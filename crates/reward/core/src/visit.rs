//! Per-object bookkeeping of who has already been rewarded.

use std::collections::BTreeSet;

use crate::configuration::VisitMode;
use crate::state::{HeroId, HeroState, ObjectTypeId, PlayerId};

/// Visited state, shaped by the object's [`VisitMode`].
///
/// `Bonus` stores nothing: it is derived from the provenance of the bonuses
/// the hero currently holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitState {
    #[default]
    Unlimited,
    Once {
        cleared: bool,
    },
    PerPlayer {
        visitors: BTreeSet<PlayerId>,
    },
    Bonus,
    PerHero {
        visitors: BTreeSet<HeroId>,
    },
}

impl VisitState {
    /// Fresh, unvisited state for `mode`.
    pub fn for_mode(mode: VisitMode) -> Self {
        match mode {
            VisitMode::Unlimited => VisitState::Unlimited,
            VisitMode::Once => VisitState::Once { cleared: false },
            VisitMode::PerPlayer => VisitState::PerPlayer {
                visitors: BTreeSet::new(),
            },
            VisitMode::Bonus => VisitState::Bonus,
            VisitMode::PerHero => VisitState::PerHero {
                visitors: BTreeSet::new(),
            },
        }
    }

    pub fn mode(&self) -> VisitMode {
        match self {
            VisitState::Unlimited => VisitMode::Unlimited,
            VisitState::Once { .. } => VisitMode::Once,
            VisitState::PerPlayer { .. } => VisitMode::PerPlayer,
            VisitState::Bonus => VisitMode::Bonus,
            VisitState::PerHero { .. } => VisitMode::PerHero,
        }
    }

    /// Whether `hero` counts as a previous visitor of an object of kind
    /// `object_type`.
    pub fn was_visited_before(&self, hero: &HeroState, object_type: ObjectTypeId) -> bool {
        match self {
            VisitState::Unlimited => false,
            VisitState::Once { cleared } => *cleared,
            VisitState::PerPlayer { visitors } => visitors.contains(&hero.owner),
            VisitState::Bonus => hero.has_bonus_from(object_type),
            VisitState::PerHero { visitors } => visitors.contains(&hero.id),
        }
    }

    /// Whether the object looks visited to `player`, for hover text.
    ///
    /// Per-hero and bonus-gated objects never look visited at player level.
    pub fn was_visited_by_player(&self, player: PlayerId) -> bool {
        match self {
            VisitState::Once { cleared } => *cleared,
            VisitState::PerPlayer { visitors } => visitors.contains(&player),
            VisitState::Unlimited | VisitState::Bonus | VisitState::PerHero { .. } => false,
        }
    }

    /// Whether the object looks visited to `hero`, for hover text.
    pub fn was_visited(&self, hero: &HeroState, object_type: ObjectTypeId) -> bool {
        match self {
            VisitState::PerHero { visitors } => visitors.contains(&hero.id),
            VisitState::Bonus => hero.has_bonus_from(object_type),
            _ => self.was_visited_by_player(hero.owner),
        }
    }

    pub fn set_cleared(&mut self, value: bool) {
        if let VisitState::Once { cleared } = self {
            *cleared = value;
        }
    }

    /// Records `hero` (or its owner) as a visitor. No-op for stateless modes.
    pub fn add_visitor(&mut self, hero: HeroId, player: PlayerId) {
        match self {
            VisitState::Once { cleared } => *cleared = true,
            VisitState::PerPlayer { visitors } => {
                visitors.insert(player);
            }
            VisitState::PerHero { visitors } => {
                visitors.insert(hero);
            }
            VisitState::Unlimited | VisitState::Bonus => {}
        }
    }

    /// Forgets every visitor and the cleared flag.
    pub fn clear(&mut self) {
        *self = VisitState::for_mode(self.mode());
    }
}
