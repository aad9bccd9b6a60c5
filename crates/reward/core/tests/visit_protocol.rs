use reward_core::{
    Army, ArtifactId, Bonus, BonusDuration, BonusKind, BonusSource, ComponentKind, Configuration,
    ConfigurationTemplate, CreatureId, CreatureStack, EntryTemplate, ErrorSeverity, GameConfig,
    GameDate, GameError, GrantToken, HeroId, HeroState, InfoWindowMode, Limiter, MemoryWorld,
    Mutation, ObjectCapabilities, ObjectId, ObjectProperty, ObjectTypeId, PcgRng, PlayerId,
    PlayerState, RecordedDialogs, Requirement, ResetParameters, ResourceKind, ResourceSet, Reward,
    RewardEnv, RewardError, RewardPolicy, RewardableObject, RngOracle, SecondarySkillId, SelectMode,
    SkillLevel, SpellCast, SpellId, TeamId, VisitEvent, VisitInfo, VisitMode, VisitOutcome,
    VisitState, WorldQuery,
};

const OBJECT: ObjectId = ObjectId(100);
const KIND: ObjectTypeId = ObjectTypeId(7);
const ALICE: HeroId = HeroId(1);
const BOB: HeroId = HeroId(2);

struct Harness {
    world: MemoryWorld,
    rng: PcgRng,
    dialogs: RecordedDialogs,
}

impl Harness {
    fn new(seed: u64) -> Self {
        let mut alice = HeroState::new(ALICE, PlayerId(0));
        alice.mana = 10;
        alice.mana_limit = 20;
        let bob = HeroState::new(BOB, PlayerId(0));

        let world = MemoryWorld::default()
            .with_player(PlayerState::new(
                PlayerId(0),
                ResourceSet::new().with(ResourceKind::Gold, 1000),
            ))
            .with_hero(alice)
            .with_hero(bob);

        Self {
            world,
            rng: PcgRng::from_seed(seed),
            dialogs: RecordedDialogs::new(),
        }
    }

    fn env(&mut self) -> RewardEnv<'_> {
        RewardEnv::new(&mut self.world, &mut self.rng, &mut self.dialogs)
    }

    fn visit(
        &mut self,
        object: &mut RewardableObject,
        hero: HeroId,
    ) -> Result<VisitOutcome, RewardError> {
        object.on_visit(hero, &mut self.env())
    }

    fn answer(
        &mut self,
        object: &mut RewardableObject,
        hero: HeroId,
        answer: u32,
    ) -> Result<VisitOutcome, RewardError> {
        object.on_decision_answered(hero, answer, &mut self.env())
    }

    fn gold(&self) -> i32 {
        self.world
            .player(PlayerId(0))
            .map(|player| player.resources.get(ResourceKind::Gold))
            .unwrap_or_default()
    }

    fn hero(&self, id: HeroId) -> &HeroState {
        self.world.hero(id).expect("hero exists")
    }
}

fn gold(amount: i32) -> Reward {
    Reward {
        resources: ResourceSet::new().with(ResourceKind::Gold, amount),
        ..Reward::default()
    }
}

fn first_visit(reward: Reward) -> VisitInfo {
    VisitInfo {
        reward,
        ..VisitInfo::default()
    }
}

fn already_visited(message: &str) -> VisitInfo {
    VisitInfo {
        message: message.to_string(),
        visit_type: VisitEvent::AlreadyVisited,
        ..VisitInfo::default()
    }
}

fn policy(visit_mode: VisitMode, select_mode: SelectMode) -> RewardPolicy {
    RewardPolicy {
        visit_mode,
        select_mode,
        ..RewardPolicy::default()
    }
}

fn object(info: Vec<VisitInfo>, policy: RewardPolicy) -> RewardableObject {
    RewardableObject::with_configuration(
        OBJECT,
        KIND,
        ObjectCapabilities::ARMY_HOLDER | ObjectCapabilities::REMOVABLE,
        Configuration::new(info, policy),
    )
    .expect("valid catalog")
}

#[test]
fn first_match_grants_entry_zero_and_commits() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![
            first_visit(gold(500)),
            first_visit(gold(1000)),
            already_visited("You have already been here."),
        ],
        policy(VisitMode::PerHero, SelectMode::First),
    );

    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Granted { reward: 0 }));
    assert_eq!(h.gold(), 1500);
    assert!(obj.visit_state().was_visited_before(h.hero(ALICE), KIND));
    assert_eq!(obj.selected_reward(), None);

    // Modal window with an empty message stays hidden.
    assert!(h.dialogs.infos.is_empty());

    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Granted { reward: 2 }));
    assert_eq!(h.gold(), 1500);
    assert_eq!(h.dialogs.infos.len(), 1);
    assert_eq!(h.dialogs.infos[0].text, "You have already been here.");
    assert!(h.dialogs.infos[0].components.is_empty());

    assert_eq!(h.visit(&mut obj, BOB), Ok(VisitOutcome::Granted { reward: 0 }));
    assert_eq!(h.gold(), 2000);
}

#[test]
fn revisit_without_already_visited_entry_does_nothing() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![first_visit(gold(500))],
        policy(VisitMode::PerHero, SelectMode::First),
    );

    h.visit(&mut obj, ALICE).expect("first visit");
    let journal_len = h.world.journal().len();

    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Nothing));
    assert_eq!(h.world.journal().len(), journal_len);
    assert_eq!(h.gold(), 1500);
}

#[test]
fn committed_visit_is_never_granted_twice() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![first_visit(gold(500))],
        policy(VisitMode::Once, SelectMode::First),
    );

    // Commit recorded, effects lost.
    obj.apply_property(ObjectProperty::Cleared(true));
    obj.apply_property(ObjectProperty::AddVisitor {
        hero: ALICE,
        player: PlayerId(0),
    });

    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Nothing));
    assert_eq!(h.visit(&mut obj, BOB), Ok(VisitOutcome::Nothing));
    assert!(h.world.journal().is_empty());
    assert_eq!(h.gold(), 1000);
}

#[test]
fn once_mode_is_shared_by_all_heroes() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![first_visit(gold(500)), already_visited("Empty.")],
        policy(VisitMode::Once, SelectMode::First),
    );

    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Granted { reward: 0 }));
    assert_eq!(h.visit(&mut obj, BOB), Ok(VisitOutcome::Granted { reward: 1 }));
    assert_eq!(h.gold(), 1500);
    assert_eq!(obj.hover_state_for_player(PlayerId(0)), Some(true));
    assert_eq!(obj.hover_state_for_player(PlayerId(1)), Some(true));
}

#[test]
fn random_selection_replays_from_seed() {
    let info = vec![
        first_visit(gold(100)),
        first_visit(gold(200)),
        first_visit(gold(300)),
    ];
    let policy = policy(VisitMode::Unlimited, SelectMode::Random);

    let mut first = Harness::new(42);
    let mut second = Harness::new(42);
    let mut obj_a = object(info.clone(), policy.clone());
    let mut obj_b = object(info, policy);

    let outcome_a = first.visit(&mut obj_a, ALICE).expect("visit");
    let outcome_b = second.visit(&mut obj_b, ALICE).expect("visit");
    assert_eq!(outcome_a, outcome_b);
    assert_eq!(first.rng, second.rng);

    let mut shadow = PcgRng::from_seed(42);
    let expected = (shadow.next_u32() as usize) % 3;
    assert_eq!(outcome_a, VisitOutcome::Granted { reward: expected });
    assert_eq!(first.rng, shadow);
}

#[test]
fn first_match_does_not_draw() {
    let mut h = Harness::new(9);
    let mut obj = object(
        vec![first_visit(gold(100)), first_visit(gold(200))],
        policy(VisitMode::Unlimited, SelectMode::First),
    );
    let before = h.rng;
    h.visit(&mut obj, ALICE).expect("visit");
    assert_eq!(h.rng, before);
}

#[test]
fn single_refusable_reward_can_be_declined() {
    let mut h = Harness::new(1);
    let mut policy = policy(VisitMode::PerHero, SelectMode::Player);
    policy.can_refuse = true;
    let mut offer = first_visit(gold(250));
    offer.message = "Take the gold?".to_string();
    let mut obj = object(vec![offer], policy);

    assert_eq!(
        h.visit(&mut obj, ALICE),
        Ok(VisitOutcome::AwaitingDecision { options: vec![0] })
    );
    let prompt = h.dialogs.last_prompt().expect("prompt shown").clone();
    assert!(!prompt.selection);
    assert!(prompt.can_refuse);
    assert_eq!(prompt.text, "Take the gold?");
    assert_eq!(prompt.components.len(), 1);
    assert_eq!(
        prompt.components[0].kind,
        ComponentKind::Resource(ResourceKind::Gold)
    );

    assert_eq!(h.answer(&mut obj, ALICE, 0), Ok(VisitOutcome::Refused));
    assert!(h.world.journal().is_empty());
    assert!(!obj.visit_state().was_visited_before(h.hero(ALICE), KIND));
    assert_eq!(obj.pending_decision(ALICE), None);

    h.visit(&mut obj, ALICE).expect("prompt again");
    assert_eq!(h.answer(&mut obj, ALICE, 1), Ok(VisitOutcome::Granted { reward: 0 }));
    assert_eq!(h.gold(), 1250);
    assert!(obj.visit_state().was_visited_before(h.hero(ALICE), KIND));
}

#[test]
fn player_choice_maps_answers_to_offered_options() {
    let mut h = Harness::new(1);
    let mut policy = policy(VisitMode::PerHero, SelectMode::Player);
    policy.on_select = "Choose your reward".to_string();
    let experience = Reward {
        hero_experience: 500,
        ..Reward::default()
    };
    let mut obj = object(
        vec![
            first_visit(gold(100)),
            VisitInfo {
                limiter: Limiter::always().require(Requirement::HeroLevel(10)),
                ..first_visit(gold(9999))
            },
            first_visit(experience),
        ],
        policy,
    );

    assert_eq!(
        h.visit(&mut obj, ALICE),
        Ok(VisitOutcome::AwaitingDecision {
            options: vec![0, 2]
        })
    );
    let prompt = h.dialogs.last_prompt().expect("prompt shown").clone();
    assert!(prompt.selection);
    assert_eq!(prompt.text, "Choose your reward");
    let kinds: Vec<_> = prompt.components.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::Resource(ResourceKind::Gold),
            ComponentKind::Experience
        ]
    );

    let err = h.answer(&mut obj, ALICE, 3).expect_err("only two options");
    assert_eq!(err.error_code(), "REWARD_UNKNOWN_ANSWER");
    assert!(matches!(
        err,
        RewardError::UnknownAnswer {
            answer: 3,
            options: 2,
            ..
        }
    ));
    assert_eq!(obj.pending_decision(ALICE), Some(&[0, 2][..]));

    assert_eq!(h.answer(&mut obj, ALICE, 2), Ok(VisitOutcome::Granted { reward: 2 }));
    assert_eq!(h.hero(ALICE).experience, 500);
    assert_eq!(h.gold(), 1000);
    // Answered prompts grant without an extra info window.
    assert!(h.dialogs.infos.is_empty());
}

#[test]
fn answer_without_open_dialog_is_rejected() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![first_visit(gold(100))],
        policy(VisitMode::PerHero, SelectMode::First),
    );
    let err = h.answer(&mut obj, ALICE, 1).expect_err("no dialog");
    assert!(matches!(err, RewardError::NoPendingDecision { .. }));
    let context = err.context().expect("context attached");
    assert_eq!(context.object, Some(OBJECT));
    assert_eq!(context.hero, Some(ALICE));
}

#[test]
fn levelup_suspends_between_phases() {
    let mut h = Harness::new(1);
    let reward = Reward {
        hero_experience: 1500,
        mana_diff: 5,
        ..Reward::default()
    };
    let mut obj = object(
        vec![first_visit(reward)],
        policy(VisitMode::PerHero, SelectMode::First),
    );

    let token = GrantToken {
        object: OBJECT,
        hero: ALICE,
        reward: 0,
    };
    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Suspended(token)));
    assert_eq!(obj.selected_reward(), Some(0));
    assert_eq!(obj.suspended_grant(ALICE), Some(token));
    assert!(h.world.levelup_pending(ALICE));
    assert!(h.world.journal().contains(&Mutation::GiveExperience {
        hero: ALICE,
        amount: 1500
    }));
    assert!(
        !h.world
            .journal()
            .iter()
            .any(|m| matches!(m, Mutation::SetMana { .. }))
    );

    assert!(h.world.complete_levelup(ALICE));
    assert_eq!(h.hero(ALICE).level, 2);

    let outcome = obj
        .on_recalculation_complete(ALICE, &mut h.env())
        .expect("resume");
    assert_eq!(outcome, VisitOutcome::Granted { reward: 0 });
    assert_eq!(h.hero(ALICE).mana, 15);
    assert_eq!(obj.selected_reward(), None);
    assert_eq!(obj.suspended_grant(ALICE), None);

    let err = obj
        .on_recalculation_complete(ALICE, &mut h.env())
        .expect_err("nothing left to resume");
    assert!(matches!(err, RewardError::NoPendingGrant { .. }));
}

#[test]
fn resume_rejects_tokens_of_other_objects() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![first_visit(gold(1))],
        policy(VisitMode::Unlimited, SelectMode::First),
    );
    let token = GrantToken {
        object: ObjectId(999),
        hero: ALICE,
        reward: 0,
    };
    let err = obj.resume(token, &mut h.env()).expect_err("foreign token");
    assert!(matches!(err, RewardError::ForeignToken { .. }));
}

#[test]
fn weekly_reset_clears_visitors_only() {
    let mut h = Harness::new(5);
    let template = ConfigurationTemplate::new(
        vec![
            EntryTemplate {
                rewards: vec![gold(100), gold(200), gold(300)],
                ..EntryTemplate::default()
            },
            EntryTemplate::fixed(already_visited("Come back next week.")),
        ],
        RewardPolicy {
            visit_mode: VisitMode::PerHero,
            select_mode: SelectMode::First,
            reset: ResetParameters {
                period: 7,
                visitors: true,
                rewards: false,
            },
            ..RewardPolicy::default()
        },
    );
    let mut obj = RewardableObject::new(
        OBJECT,
        KIND,
        ObjectCapabilities::empty(),
        template,
        &mut h.rng,
    )
    .expect("valid template");

    h.visit(&mut obj, ALICE).expect("visit");
    let catalog = obj.current_configuration().clone();
    let rng = h.rng;

    obj.on_turn_advanced(GameDate(7), &mut h.env());
    assert!(obj.visit_state().was_visited_before(h.hero(ALICE), KIND));

    obj.on_turn_advanced(GameDate(8), &mut h.env());
    assert_eq!(obj.visit_state(), &VisitState::for_mode(VisitMode::PerHero));
    assert_eq!(obj.current_configuration(), &catalog);
    assert_eq!(h.rng, rng);

    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Granted { reward: 0 }));
}

#[test]
fn reward_reset_redraws_from_template() {
    let mut h = Harness::new(11);
    let candidates = vec![gold(100), gold(200), gold(300)];
    let template = ConfigurationTemplate::new(
        vec![EntryTemplate {
            rewards: candidates.clone(),
            ..EntryTemplate::default()
        }],
        RewardPolicy {
            visit_mode: VisitMode::Once,
            reset: ResetParameters {
                period: 7,
                visitors: false,
                rewards: true,
            },
            ..RewardPolicy::default()
        },
    );
    let mut obj =
        RewardableObject::new(OBJECT, KIND, ObjectCapabilities::empty(), template, &mut h.rng)
            .expect("valid template");
    h.visit(&mut obj, ALICE).expect("visit");

    let mut shadow = h.rng;
    let expected = candidates[(shadow.next_u32() as usize) % candidates.len()].clone();

    obj.on_turn_advanced(GameDate(8), &mut h.env());
    assert_eq!(obj.current_configuration().info[0].reward, expected);
    assert_eq!(h.rng, shadow);
    // Visitors were not part of this reset.
    assert!(obj.visit_state().was_visited_before(h.hero(BOB), KIND));
}

#[test]
fn oversized_creature_grant_is_rejected_before_commit() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![first_visit(gold(100))],
        policy(VisitMode::PerHero, SelectMode::First),
    );

    let oversized = Reward {
        resources: ResourceSet::new().with(ResourceKind::Gold, 500),
        creatures: (0..8)
            .map(|id| CreatureStack::new(CreatureId(id), 1))
            .collect(),
        ..Reward::default()
    };
    obj.apply_property(ObjectProperty::Randomize(Configuration::new(
        vec![first_visit(oversized)],
        policy(VisitMode::PerHero, SelectMode::First),
    )));

    let err = h.visit(&mut obj, ALICE).expect_err("contract violation");
    assert!(matches!(
        err,
        RewardError::ArmyCapacityExceeded {
            entry: 0,
            stacks: 8,
            ..
        }
    ));
    assert!(h.world.journal().is_empty());
    assert!(h.dialogs.infos.is_empty());
    assert!(!obj.visit_state().was_visited_before(h.hero(ALICE), KIND));
}

/// ALICE with `stacks` distinct creature stacks.
fn alice_with_army(h: &mut Harness, stacks: u32) {
    let mut alice = h.hero(ALICE).clone();
    alice.army = Army::from_stacks((1..=stacks).map(|id| CreatureStack::new(CreatureId(id as u16), 3)));
    h.world.insert_hero(alice);
}

fn gold_and_recruits() -> Reward {
    Reward {
        creatures: vec![CreatureStack::new(CreatureId(50), 10)],
        ..gold(500)
    }
}

#[test]
fn full_army_rejects_creature_grant_before_commit() {
    let mut h = Harness::new(1);
    alice_with_army(&mut h, GameConfig::ARMY_SIZE as u32);
    let mut obj = object(
        vec![first_visit(gold_and_recruits())],
        policy(VisitMode::PerHero, SelectMode::First),
    );

    let err = h.visit(&mut obj, ALICE).expect_err("army is full");
    assert!(matches!(
        err,
        RewardError::ArmyCapacityExceeded {
            entry: 0,
            stacks: 1,
            ..
        }
    ));
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert_eq!(h.gold(), 1000);
    assert!(h.world.journal().is_empty());
    assert!(h.dialogs.infos.is_empty());
    assert!(!obj.visit_state().was_visited_before(h.hero(ALICE), KIND));
    assert_eq!(obj.selected_reward(), None);

    alice_with_army(&mut h, 6);
    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Granted { reward: 0 }));
    assert_eq!(h.gold(), 1500);
    assert!(h.world.journal().contains(&Mutation::GiveCreatures {
        from: OBJECT,
        hero: ALICE,
        stacks: vec![CreatureStack::new(CreatureId(50), 10)],
    }));
    assert!(
        h.hero(ALICE)
            .army
            .stacks()
            .any(|(_, stack)| stack.creature == CreatureId(50))
    );
}

#[test]
fn full_army_is_not_offered_a_refusable_grant() {
    let mut h = Harness::new(1);
    alice_with_army(&mut h, GameConfig::ARMY_SIZE as u32);
    let mut policy = policy(VisitMode::PerHero, SelectMode::Player);
    policy.can_refuse = true;
    let mut obj = object(vec![first_visit(gold_and_recruits())], policy);

    let err = h.visit(&mut obj, ALICE).expect_err("army is full");
    assert!(matches!(err, RewardError::ArmyCapacityExceeded { .. }));
    assert!(h.dialogs.last_prompt().is_none());
    assert_eq!(obj.pending_decision(ALICE), None);
    assert!(h.world.journal().is_empty());
}

#[test]
fn player_choice_only_offers_what_fits() {
    let mut h = Harness::new(1);
    alice_with_army(&mut h, GameConfig::ARMY_SIZE as u32);
    let mut obj = object(
        vec![first_visit(gold_and_recruits()), first_visit(gold(100))],
        policy(VisitMode::PerHero, SelectMode::Player),
    );

    assert_eq!(
        h.visit(&mut obj, ALICE),
        Ok(VisitOutcome::AwaitingDecision { options: vec![1] })
    );
    assert!(!h.dialogs.last_prompt().expect("prompt shown").selection);
    h.answer(&mut obj, ALICE, 0).expect("refuse");

    // Room at prompt time, full again by the time the answer arrives.
    alice_with_army(&mut h, 6);
    assert_eq!(
        h.visit(&mut obj, ALICE),
        Ok(VisitOutcome::AwaitingDecision {
            options: vec![0, 1]
        })
    );
    alice_with_army(&mut h, GameConfig::ARMY_SIZE as u32);
    let err = h.answer(&mut obj, ALICE, 1).expect_err("army filled up");
    assert!(matches!(err, RewardError::ArmyCapacityExceeded { .. }));
    assert_eq!(obj.pending_decision(ALICE), Some(&[0, 1][..]));
    assert_eq!(h.gold(), 1000);

    assert_eq!(h.answer(&mut obj, ALICE, 2), Ok(VisitOutcome::Granted { reward: 1 }));
    assert_eq!(h.gold(), 1100);
}

#[test]
fn huge_level_grant_saturates_experience() {
    let mut h = Harness::new(1);
    let reward = Reward {
        hero_level: 250,
        ..Reward::default()
    };
    let mut obj = object(
        vec![first_visit(reward)],
        policy(VisitMode::PerHero, SelectMode::First),
    );

    let outcome = h.visit(&mut obj, ALICE).expect("no overflow");
    assert!(matches!(outcome, VisitOutcome::Suspended(_)));
    assert!(h.world.journal().contains(&Mutation::GiveExperience {
        hero: ALICE,
        amount: u64::MAX
    }));

    assert!(h.world.complete_levelup(ALICE));
    assert_eq!(h.hero(ALICE).level, GameConfig::MAX_LEVEL);
    assert_eq!(
        obj.on_recalculation_complete(ALICE, &mut h.env()),
        Ok(VisitOutcome::Granted { reward: 0 })
    );

    // Capped heroes do not queue further levelups.
    h.world.take_journal();
    let mut again = object(
        vec![first_visit(Reward {
            hero_experience: 1,
            ..Reward::default()
        })],
        policy(VisitMode::PerHero, SelectMode::First),
    );
    assert_eq!(h.visit(&mut again, ALICE), Ok(VisitOutcome::Granted { reward: 0 }));
    assert!(!h.world.levelup_pending(ALICE));
}

#[test]
fn suspended_grant_survives_reward_reset() {
    let mut h = Harness::new(3);
    let candidate = |mana_diff| Reward {
        hero_experience: 1500,
        mana_diff,
        ..Reward::default()
    };
    let template = ConfigurationTemplate::new(
        vec![EntryTemplate {
            rewards: vec![candidate(5), candidate(8)],
            ..EntryTemplate::default()
        }],
        RewardPolicy {
            visit_mode: VisitMode::Once,
            reset: ResetParameters {
                period: 7,
                visitors: false,
                rewards: true,
            },
            ..RewardPolicy::default()
        },
    );
    let mut obj =
        RewardableObject::new(OBJECT, KIND, ObjectCapabilities::empty(), template, &mut h.rng)
            .expect("valid template");

    let outcome = h.visit(&mut obj, ALICE).expect("visit");
    assert!(matches!(outcome, VisitOutcome::Suspended(_)));
    let granted = obj.current_configuration().info[0].reward.clone();
    assert_eq!(obj.suspended_reward(ALICE), Some(&granted));

    obj.on_turn_advanced(GameDate(8), &mut h.env());
    obj.apply_property(ObjectProperty::Randomize(Configuration::new(
        vec![first_visit(candidate(100))],
        policy(VisitMode::Once, SelectMode::First),
    )));

    assert!(h.world.complete_levelup(ALICE));
    assert_eq!(
        obj.on_recalculation_complete(ALICE, &mut h.env()),
        Ok(VisitOutcome::Granted { reward: 0 })
    );
    assert_eq!(h.hero(ALICE).mana, 10 + granted.mana_diff);
    assert_eq!(obj.suspended_reward(ALICE), None);
}

#[test]
fn removal_with_spell_cast_is_skipped() {
    let mut h = Harness::new(1);
    let reward = Reward {
        spell_cast: Some(SpellCast {
            spell: SpellId(4),
            school_level: SkillLevel::Expert,
        }),
        remove_object: true,
        ..Reward::default()
    };
    let mut obj = object(
        vec![first_visit(reward)],
        policy(VisitMode::Unlimited, SelectMode::First),
    );

    h.visit(&mut obj, ALICE).expect("visit");
    assert_eq!(
        h.world.journal(),
        &[Mutation::CastSpell {
            caster: ALICE,
            spell: SpellId(4),
            school_level: SkillLevel::Expert
        }]
    );
    assert!(!h.world.is_removed(OBJECT));
}

#[test]
fn removal_happens_after_other_effects() {
    let mut h = Harness::new(1);
    let reward = Reward {
        artifacts: vec![ArtifactId(3)],
        remove_object: true,
        ..Reward::default()
    };
    let mut obj = object(
        vec![first_visit(reward)],
        policy(VisitMode::Unlimited, SelectMode::First),
    );

    h.visit(&mut obj, ALICE).expect("visit");
    assert_eq!(
        h.world.journal(),
        &[
            Mutation::GiveArtifact {
                hero: ALICE,
                artifact: ArtifactId(3)
            },
            Mutation::RemoveObject { object: OBJECT },
        ]
    );
    assert!(h.world.is_removed(OBJECT));
}

#[test]
fn not_available_entry_answers_empty_visits() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![
            VisitInfo {
                limiter: Limiter::always().require(Requirement::Resources(
                    ResourceSet::new().with(ResourceKind::Gold, 5000),
                )),
                ..first_visit(Reward {
                    primary: [1, 0, 0, 0],
                    ..Reward::default()
                })
            },
            VisitInfo {
                message: "You cannot afford the lesson.".to_string(),
                visit_type: VisitEvent::NotAvailable,
                ..VisitInfo::default()
            },
        ],
        policy(VisitMode::PerPlayer, SelectMode::First),
    );

    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Granted { reward: 1 }));
    assert_eq!(h.dialogs.infos.len(), 1);
    assert_eq!(h.dialogs.infos[0].text, "You cannot afford the lesson.");
    assert_eq!(obj.hover_state(h.hero(ALICE)), Some(false));
    assert_eq!(
        h.world.journal(),
        &[Mutation::AddTeamVisitor {
            object: OBJECT,
            team: TeamId(0)
        }]
    );
}

#[test]
fn missing_not_available_entry_is_a_silent_no_op() {
    let mut h = Harness::new(1);
    let mut obj = object(
        vec![VisitInfo {
            limiter: Limiter::always().require(Requirement::HeroLevel(20)),
            ..first_visit(gold(100))
        }],
        policy(VisitMode::PerHero, SelectMode::First),
    );
    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Nothing));
    assert_eq!(h.gold(), 1000);
}

#[test]
fn creature_changes_follow_stack_order() {
    let mut h = Harness::new(1);
    let mut alice = h.hero(ALICE).clone();
    alice.army = Army::from_stacks([
        CreatureStack::new(CreatureId(10), 5),
        CreatureStack::new(CreatureId(11), 3),
        CreatureStack::new(CreatureId(10), 2),
    ]);
    h.world.insert_hero(alice);

    let reward = Reward {
        creature_changes: vec![(CreatureId(10), CreatureId(20)), (CreatureId(10), CreatureId(30))],
        creatures: vec![CreatureStack::new(CreatureId(11), 4)],
        ..Reward::default()
    };
    let mut obj = object(
        vec![first_visit(reward)],
        policy(VisitMode::Unlimited, SelectMode::First),
    );

    h.visit(&mut obj, ALICE).expect("visit");
    let army = &h.hero(ALICE).army;
    assert_eq!(army.count_of(CreatureId(20)), 7);
    assert_eq!(army.count_of(CreatureId(30)), 0);
    assert_eq!(army.count_of(CreatureId(11)), 7);
}

#[test]
fn bonus_mode_follows_granted_bonus() {
    let mut h = Harness::new(1);
    let reward = Reward {
        bonuses: vec![Bonus::new(BonusKind::Luck, 1, BonusDuration::OneBattle)],
        ..Reward::default()
    };
    let mut obj = object(
        vec![first_visit(reward), already_visited("Your luck holds.")],
        policy(VisitMode::Bonus, SelectMode::First),
    );

    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Granted { reward: 0 }));
    assert_eq!(
        h.hero(ALICE).bonuses[0].source,
        BonusSource::Object(KIND)
    );
    assert_eq!(obj.hover_state(h.hero(ALICE)), Some(true));
    assert_eq!(obj.hover_state(h.hero(BOB)), Some(false));
    assert_eq!(h.visit(&mut obj, ALICE), Ok(VisitOutcome::Granted { reward: 1 }));
    assert_eq!(h.hero(ALICE).bonuses.len(), 1);
}

#[test]
fn secondary_skills_only_improve() {
    let mut h = Harness::new(1);
    let mut alice = h.hero(ALICE).clone();
    alice
        .secondary
        .insert(SecondarySkillId(1), SkillLevel::Advanced);
    h.world.insert_hero(alice);

    let mut reward = Reward::default();
    reward.secondary.insert(SecondarySkillId(1), SkillLevel::Basic);
    reward.secondary.insert(SecondarySkillId(2), SkillLevel::Expert);
    let mut obj = object(
        vec![first_visit(reward)],
        policy(VisitMode::Unlimited, SelectMode::First),
    );

    h.visit(&mut obj, ALICE).expect("visit");
    let hero = h.hero(ALICE);
    assert_eq!(hero.secondary_skill(SecondarySkillId(1)), SkillLevel::Advanced);
    assert_eq!(hero.secondary_skill(SecondarySkillId(2)), SkillLevel::Expert);
}

#[test]
fn infobox_shows_components_without_message() {
    let mut h = Harness::new(1);
    let mut policy = policy(VisitMode::Unlimited, SelectMode::First);
    policy.info_window = InfoWindowMode::Infobox;
    let mut obj = object(vec![first_visit(gold(75))], policy);

    h.visit(&mut obj, ALICE).expect("visit");
    assert_eq!(h.dialogs.infos.len(), 1);
    let info = &h.dialogs.infos[0];
    assert_eq!(info.mode, InfoWindowMode::Infobox);
    assert!(info.text.is_empty());
    assert_eq!(info.components[0].amount, 75);
}
