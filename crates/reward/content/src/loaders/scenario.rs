//! Scenario loader: who is on the map, which objects stand where, and the
//! visits to replay.

use std::path::Path;

use reward_core::{
    GameConfig, GameDate, HeroId, HeroState, MemoryWorld, ObjectId, PlayerState, RewardableObject,
    RngOracle,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, ObjectDefinition, read_file};

/// An object instance placed on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    pub id: ObjectId,
    /// Name of the catalog definition.
    pub kind: String,
}

/// A hero stepping onto an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedVisit {
    pub hero: HeroId,
    pub object: ObjectId,
}

/// Scenario structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Seed of the shared random stream.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "first_day")]
    pub day: u32,
    pub players: Vec<PlayerState>,
    pub heroes: Vec<HeroState>,
    #[serde(default)]
    pub objects: Vec<ObjectPlacement>,
    #[serde(default)]
    pub visits: Vec<ScriptedVisit>,
}

fn first_day() -> u32 {
    GameDate::FIRST_DAY.day()
}

impl Scenario {
    /// Builds the in-memory world holding the scenario's players and heroes.
    pub fn into_world(&self, config: GameConfig) -> MemoryWorld {
        let mut world = MemoryWorld::new(config);
        world.set_date(GameDate::new(self.day));
        for player in &self.players {
            world.insert_player(player.clone());
        }
        for hero in &self.heroes {
            world.insert_hero(hero.clone());
        }
        world
    }

    /// Instantiates every placed object from `catalog`, drawing initial
    /// rewards from `rng` in placement order.
    pub fn spawn_objects(
        &self,
        catalog: &[ObjectDefinition],
        rng: &mut dyn RngOracle,
    ) -> LoadResult<Vec<RewardableObject>> {
        self.objects
            .iter()
            .map(|placement| {
                let definition = catalog
                    .iter()
                    .find(|definition| definition.name == placement.kind)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Object {} uses unknown kind '{}'",
                            placement.id,
                            placement.kind
                        )
                    })?;
                let object = RewardableObject::new(
                    placement.id,
                    definition.type_id,
                    definition.capabilities,
                    definition.template.clone(),
                    &mut *rng,
                )
                .map_err(|e| anyhow::anyhow!("Failed to place object {}: {}", placement.id, e))?;
                Ok(object)
            })
            .collect()
    }

    fn check_references(&self) -> LoadResult<()> {
        for hero in &self.heroes {
            if !self.players.iter().any(|player| player.id == hero.owner) {
                anyhow::bail!("Hero {} is owned by unknown {}", hero.id, hero.owner);
            }
        }
        for visit in &self.visits {
            if !self.heroes.iter().any(|hero| hero.id == visit.hero) {
                anyhow::bail!("Scripted visit names unknown {}", visit.hero);
            }
            if !self.objects.iter().any(|object| object.id == visit.object) {
                anyhow::bail!("Scripted visit names unknown {}", visit.object);
            }
        }
        Ok(())
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file and check its cross references.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario = Self::parse(&content)?;
        debug!(
            path = %path.display(),
            heroes = scenario.heroes.len(),
            objects = scenario.objects.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    /// Parse scenario text and check its cross references.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        scenario.check_references()?;
        Ok(scenario)
    }
}
