//! Payloads handed to the decision channel.

use crate::configuration::InfoWindowMode;
use crate::reward::Component;
use crate::state::{HeroId, ObjectId, PlayerId};

/// A one-way message with optional reward preview.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoWindow {
    /// Recipient.
    pub player: PlayerId,
    pub text: String,
    /// Preview of what was granted, in display order.
    pub components: Vec<Component>,
    pub mode: InfoWindowMode,
}

/// A prompt whose answer comes back through
/// [`RewardableObject::on_decision_answered`](crate::object::RewardableObject::on_decision_answered).
///
/// With `selection == false` this is an accept/decline question about
/// the single reward described by `components`. With `selection == true`
/// each component stands for one option, in order; answer `k` picks the
/// k-th option and answer 0 cancels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockingDialog {
    pub player: PlayerId,
    pub hero: HeroId,
    pub object: ObjectId,
    pub text: String,
    pub components: Vec<Component>,
    pub can_refuse: bool,
    pub selection: bool,
}

/// Delivers dialogs to whoever controls the visiting hero.
///
/// Delivery is fire-and-forget. Answers are routed back by the host.
pub trait DecisionChannel {
    /// Shows a message that needs no answer.
    fn show_info(&mut self, window: InfoWindow);

    /// Shows a prompt. The object keeps the offered options until the
    /// answer arrives through `on_decision_answered`.
    fn show_blocking(&mut self, dialog: BlockingDialog);
}

/// Channel that keeps every dialog it is given, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordedDialogs {
    pub infos: Vec<InfoWindow>,
    pub prompts: Vec<BlockingDialog>,
}

impl RecordedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_prompt(&self) -> Option<&BlockingDialog> {
        self.prompts.last()
    }
}

impl DecisionChannel for RecordedDialogs {
    fn show_info(&mut self, window: InfoWindow) {
        self.infos.push(window);
    }

    fn show_blocking(&mut self, dialog: BlockingDialog) {
        self.prompts.push(dialog);
    }
}
