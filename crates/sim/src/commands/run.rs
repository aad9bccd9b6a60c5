//! Replay a scenario against its catalogs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use reward_content::ContentFactory;
use reward_core::{
    HeroId, MemoryWorld, ObjectId, PcgRng, RecordedDialogs, RewardEnv, RewardableObject,
    VisitOutcome, WorldQuery,
};

use super::describe_components;

/// Replay a scenario's scripted visits and print the mutation journal
#[derive(Parser)]
pub struct Run {
    /// Data directory holding scenario.ron, config.toml and catalogs/
    #[arg(value_name = "DATA_DIR")]
    data_dir: PathBuf,

    /// Answer given to every blocking dialog (0 declines)
    #[arg(long, default_value_t = 1)]
    answer: u32,

    /// Number of days to play; visits repeat each day
    #[arg(long, default_value_t = 1)]
    days: u32,

    /// Output format of the journal
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per mutation
    Summary,
    /// Pretty-printed RON
    Ron,
}

struct Session {
    world: MemoryWorld,
    rng: PcgRng,
    dialogs: RecordedDialogs,
    objects: BTreeMap<ObjectId, RewardableObject>,
}

impl Session {
    fn env(&mut self) -> (RewardEnv<'_>, &mut BTreeMap<ObjectId, RewardableObject>) {
        (
            RewardEnv::new(&mut self.world, &mut self.rng, &mut self.dialogs),
            &mut self.objects,
        )
    }
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.data_dir);
        let config = factory.load_config()?;
        let catalog = factory.load_catalogs()?;
        let scenario = factory
            .load_scenario()
            .with_context(|| format!("Failed to load scenario from {}", self.data_dir.display()))?;

        let mut rng = PcgRng::from_seed(scenario.seed);
        let objects = scenario
            .spawn_objects(&catalog, &mut rng)?
            .into_iter()
            .map(|object| (object.id(), object))
            .collect();
        let mut session = Session {
            world: scenario.into_world(config),
            rng,
            dialogs: RecordedDialogs::new(),
            objects,
        };

        for day in 0..self.days.max(1) {
            if day > 0 {
                let date = session.world.advance_day();
                let (mut env, objects) = session.env();
                for object in objects.values_mut() {
                    object.on_turn_advanced(date, &mut env);
                }
            }
            info!(date = %session.world.date(), "day started");

            for visit in &scenario.visits {
                let outcome = self.play_visit(&mut session, visit.hero, visit.object)?;
                println!("{} -> {}: {:?}", visit.hero, visit.object, outcome);
            }
        }

        self.print_journal(&session.world)
    }

    /// Visits, then answers prompts and completes levelups until the
    /// interaction settles.
    fn play_visit(
        &self,
        session: &mut Session,
        hero: HeroId,
        object_id: ObjectId,
    ) -> Result<VisitOutcome> {
        let shown = session.dialogs.infos.len();
        let mut outcome = {
            let (mut env, objects) = session.env();
            let object = objects
                .get_mut(&object_id)
                .with_context(|| format!("Scripted visit names unknown {}", object_id))?;
            object.on_visit(hero, &mut env)?
        };

        loop {
            outcome = match outcome {
                VisitOutcome::AwaitingDecision { .. } => {
                    let (mut env, objects) = session.env();
                    let object = objects
                        .get_mut(&object_id)
                        .with_context(|| format!("Scripted visit names unknown {}", object_id))?;
                    object.on_decision_answered(hero, self.answer, &mut env)?
                }
                VisitOutcome::Suspended(token) => {
                    session.world.complete_levelup(hero);
                    let (mut env, objects) = session.env();
                    let object = objects
                        .get_mut(&object_id)
                        .with_context(|| format!("Scripted visit names unknown {}", object_id))?;
                    object.resume(token, &mut env)?
                }
                settled => break Ok(report(settled, &session.dialogs, shown)),
            };
        }
    }

    fn print_journal(&self, world: &MemoryWorld) -> Result<()> {
        match self.format {
            OutputFormat::Summary => {
                for (step, mutation) in world.journal().iter().enumerate() {
                    println!("{step:>4}  {mutation:?}");
                }
            }
            OutputFormat::Ron => {
                let text =
                    ron::ser::to_string_pretty(world.journal(), ron::ser::PrettyConfig::default())
                        .context("Failed to serialize journal")?;
                println!("{text}");
            }
        }
        Ok(())
    }
}

fn report(outcome: VisitOutcome, dialogs: &RecordedDialogs, shown: usize) -> VisitOutcome {
    for window in dialogs.infos.iter().skip(shown) {
        println!(
            "  \"{}\" ({})",
            window.text,
            describe_components(&window.components)
        );
    }
    outcome
}
