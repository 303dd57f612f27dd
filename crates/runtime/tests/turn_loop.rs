use async_trait::async_trait;
use battle_core::{
    ActorId, ActorTemplate, Battle, BattleConfig, BattleError, BattleSnapshot, Refill, Roster,
    Species, TurnOutcome,
};
use battle_runtime::{
    BattleEvent, NeutralTurnProvider, Runtime, RuntimeError, ScriptedTurnProvider, TurnProvider,
};

const LUPUS: ActorId = ActorId(0);
const HARE: ActorId = ActorId(1);

/// Lupus: tick speed 10. Hare: tick speed 5.
fn duel() -> Battle {
    let config = BattleConfig::default();
    let templates = [
        ActorTemplate::new("Lupus", Species::Lupus, 20),
        ActorTemplate::new("Red-Nosed Hare", Species::RedNosedHare, 70),
    ];
    let roster = Roster::from_templates(&templates, &config);
    Battle::new(config, roster)
}

/// Defeats every actor on the first turn.
struct Wipeout;

#[async_trait]
impl TurnProvider for Wipeout {
    async fn take_turn(
        &self,
        _actor: ActorId,
        snapshot: &BattleSnapshot,
    ) -> battle_runtime::Result<TurnOutcome> {
        Ok(snapshot
            .actors
            .iter()
            .fold(TurnOutcome::neutral(), |outcome, actor| {
                outcome.with_defeated(actor.id)
            }))
    }
}

#[tokio::test]
async fn neutral_turns_follow_projected_order() {
    let mut runtime = Runtime::builder()
        .battle(duel())
        .provider(NeutralTurnProvider)
        .build()
        .await
        .unwrap();

    let projected: Vec<ActorId> = runtime
        .handle()
        .query_queue()
        .await
        .unwrap()
        .iter()
        .map(|entry| entry.owner)
        .collect();

    let summaries = runtime.run(6).await.unwrap();
    let owners: Vec<ActorId> = summaries.iter().map(|summary| summary.owner).collect();

    assert_eq!(owners, vec![HARE, LUPUS, HARE, HARE, LUPUS, HARE]);
    assert_eq!(owners, projected[..6]);
    assert!(summaries
        .iter()
        .all(|summary| summary.refill == Refill::Incremental));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn scripted_runtime_matches_synchronous_battle() {
    let provider = || {
        ScriptedTurnProvider::new()
            .with_script(LUPUS, [2, 3, 5])
            .with_script(HARE, [6, 3])
    };

    let mut runtime = Runtime::builder()
        .battle(duel())
        .provider(provider())
        .build()
        .await
        .unwrap();
    let async_owners: Vec<ActorId> = runtime
        .run(20)
        .await
        .unwrap()
        .iter()
        .map(|summary| summary.owner)
        .collect();
    let async_queue = runtime.handle().query_queue().await.unwrap();
    runtime.shutdown().await.unwrap();

    let mut battle = duel();
    battle.init().unwrap();
    let script = provider();
    let mut sync_owners = Vec::new();
    for _ in 0..20 {
        let owner = battle.peek_next_owner().unwrap();
        let outcome = script.take_turn(owner, &battle.snapshot()).await.unwrap();
        sync_owners.push(battle.complete_turn(outcome).unwrap().owner);
    }

    assert_eq!(async_owners, sync_owners);
    assert_eq!(async_queue, battle.queue());
}

#[tokio::test]
async fn events_are_published_per_phase() {
    let mut runtime = Runtime::builder()
        .battle(duel())
        .provider(NeutralTurnProvider)
        .build()
        .await
        .unwrap();
    let mut events = runtime.subscribe();

    runtime.step().await.unwrap();

    assert_eq!(
        events.recv().await.unwrap(),
        BattleEvent::TurnStarted {
            owner: HARE,
            turn: 0
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        BattleEvent::TurnCompleted {
            owner: HARE,
            rank: 3,
            refill: Refill::Incremental
        }
    );
    match events.recv().await.unwrap() {
        BattleEvent::QueueRefreshed { entries } => {
            assert_eq!(entries.len(), BattleConfig::DEFAULT_LOOKAHEAD);
            assert_eq!(entries[0].owner, LUPUS);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn run_stops_when_nobody_is_left() {
    let mut runtime = Runtime::builder()
        .battle(duel())
        .provider(Wipeout)
        .build()
        .await
        .unwrap();

    let mut events = runtime.subscribe();

    let summaries = runtime.run(10).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].owner, HARE);
    assert_eq!(summaries[0].refill, Refill::Exhausted);

    let snapshot = runtime.handle().query_snapshot().await.unwrap();
    assert_eq!(snapshot.turn, 1);
    assert!(snapshot.queue.is_empty());
    assert!(snapshot.actors.iter().all(|actor| !actor.active));

    assert!(matches!(
        events.recv().await.unwrap(),
        BattleEvent::TurnStarted { owner: HARE, turn: 0 }
    ));
    assert_eq!(
        events.recv().await.unwrap(),
        BattleEvent::TurnCompleted {
            owner: HARE,
            rank: 3,
            refill: Refill::Exhausted
        }
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn completing_for_the_wrong_actor_is_rejected() {
    let runtime = Runtime::builder().battle(duel()).build().await.unwrap();
    let handle = runtime.handle();

    let (owner, _) = handle.prepare_next_turn().await.unwrap();
    assert_eq!(owner, HARE);

    let error = handle
        .complete_turn(LUPUS, TurnOutcome::neutral())
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::OwnerMismatch {
            expected: HARE,
            provided: LUPUS
        }
    ));
    assert!(error.severity().is_recoverable());

    // The rejected completion left the turn in place.
    let summary = handle
        .complete_turn(HARE, TurnOutcome::neutral())
        .await
        .unwrap();
    assert_eq!(summary.owner, HARE);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn builder_requires_battle_and_step_requires_provider() {
    assert!(matches!(
        Runtime::builder().build().await,
        Err(RuntimeError::MissingBattle)
    ));

    let mut runtime = Runtime::builder().battle(duel()).build().await.unwrap();
    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::ProviderNotSet)
    ));
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn loaded_roster_runs_end_to_end() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            (name: "Lupus", species: Lupus, agility: 20),
            (name: "Lupus", species: Lupus, agility: 20),
            (name: "Matriarch Hare", species: MatriarchHare, agility: 70),
        ]"#
    )
    .unwrap();

    let config = BattleConfig::default();
    let roster = battle_content::RosterLoader::load(file.path(), &config).unwrap();
    let mut runtime = Runtime::builder()
        .battle(Battle::new(config, roster))
        .provider(NeutralTurnProvider)
        .build()
        .await
        .unwrap();

    let summaries = runtime.run(12).await.unwrap();
    assert_eq!(summaries.len(), 12);

    let snapshot = runtime.handle().query_snapshot().await.unwrap();
    assert_eq!(snapshot.turn, 12);
    assert_eq!(snapshot.actors[1].name, "Lupus (2)");

    runtime.shutdown().await.unwrap();
}
