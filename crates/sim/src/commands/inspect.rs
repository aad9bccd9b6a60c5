//! List object templates from a catalog file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use reward_content::CatalogLoader;
use reward_core::{HeroId, HeroState, PlayerId};

use super::describe_components;

/// List object templates and preview their rewards
#[derive(Parser)]
pub struct Inspect {
    /// Catalog file to read (RON)
    #[arg(value_name = "CATALOG")]
    path: PathBuf,

    /// Hero level used to compute previews
    #[arg(long, default_value_t = 1)]
    level: u32,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let objects = CatalogLoader::load(&self.path)
            .with_context(|| format!("Failed to load catalog: {}", self.path.display()))?;

        let mut hero = HeroState::new(HeroId(0), PlayerId(0));
        hero.level = self.level.max(1);

        for object in &objects {
            let policy = &object.template.policy;
            println!("{} ({}) {:?}", object.name, object.type_id, object.capabilities);
            println!(
                "  visit: {}, select: {}, refusable: {}, window: {}",
                policy.visit_mode, policy.select_mode, policy.can_refuse, policy.info_window
            );
            if policy.reset.period != 0 {
                println!(
                    "  reset every {} days (rewards: {}, visitors: {})",
                    policy.reset.period, policy.reset.rewards, policy.reset.visitors
                );
            }

            for (index, entry) in object.template.entries.iter().enumerate() {
                println!("  #{index} {} {:?}", entry.visit_type, entry.message);
                for (candidate, reward) in entry.rewards.iter().enumerate() {
                    println!(
                        "    [{candidate}] {}",
                        describe_components(&reward.components(&hero))
                    );
                }
            }
        }

        Ok(())
    }
}
