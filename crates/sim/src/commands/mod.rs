mod inspect;
mod run;

pub use inspect::Inspect;
pub use run::Run;

use reward_core::{Component, ComponentKind};

/// One-line rendering of a reward preview.
pub(crate) fn describe_components(components: &[Component]) -> String {
    if components.is_empty() {
        return "nothing".to_string();
    }
    components
        .iter()
        .map(describe_component)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_component(component: &Component) -> String {
    let amount = component.amount;
    match component.kind {
        ComponentKind::Experience => format!("{amount} experience"),
        ComponentKind::Level => format!("{amount} level(s)"),
        ComponentKind::Mana => format!("{amount:+} mana"),
        ComponentKind::PrimarySkill(skill) => format!("{amount:+} {skill}"),
        ComponentKind::SecondarySkill(skill) => format!("{skill} at tier {amount}"),
        ComponentKind::Artifact(artifact) => artifact.to_string(),
        ComponentKind::Spell(spell) => spell.to_string(),
        ComponentKind::Creature(creature) => format!("{amount} x {creature}"),
        ComponentKind::Resource(kind) => format!("{amount:+} {kind}"),
        ComponentKind::Morale => format!("{amount:+} morale"),
        ComponentKind::Luck => format!("{amount:+} luck"),
        ComponentKind::Empty => "-".to_string(),
    }
}
