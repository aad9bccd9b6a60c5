//! Collaborators the reward rules talk to.
//!
//! Nothing here is looked up globally: the host threads a [`RewardEnv`]
//! through every protocol entry point.

mod dialog;
mod memory;
mod rng;
mod world;

pub use dialog::{BlockingDialog, DecisionChannel, InfoWindow, RecordedDialogs};
pub use memory::{MemoryWorld, Mutation};
pub use rng::{PcgRng, RngOracle, next_item};
pub use world::{GameCallback, GameMutator, WorldError, WorldQuery};

/// Aggregates the world, random stream and decision channel for one call.
pub struct RewardEnv<'a> {
    world: &'a mut dyn GameCallback,
    rng: &'a mut dyn RngOracle,
    dialogs: &'a mut dyn DecisionChannel,
}

impl<'a> RewardEnv<'a> {
    pub fn new(
        world: &'a mut dyn GameCallback,
        rng: &'a mut dyn RngOracle,
        dialogs: &'a mut dyn DecisionChannel,
    ) -> Self {
        Self {
            world,
            rng,
            dialogs,
        }
    }

    pub fn world(&self) -> &dyn GameCallback {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut dyn GameCallback {
        &mut *self.world
    }

    pub fn rng(&mut self) -> &mut dyn RngOracle {
        &mut *self.rng
    }

    pub fn dialogs(&mut self) -> &mut dyn DecisionChannel {
        &mut *self.dialogs
    }
}
