use std::sync::Arc;

use quiz_core::model::{
    Catalog, ChoiceQuestion, CodingTopic, DefinitionItem, GameMode, ModeTally, Response,
    SessionItem, TopicId,
};
use quiz_core::time::fixed_clock;
use services::{GameLoopService, SessionService};
use storage::{InMemoryLedgerStore, LedgerRepository};

fn sample_catalog() -> Arc<Catalog> {
    let definitions = [
        "Latency",
        "Lexical analysis",
        "Semantic analysis",
        "Training",
        "Deployment",
        "Dataset",
    ]
    .iter()
    .map(|term| {
        DefinitionItem::new(
            *term,
            format!("definition of {term}"),
            vec![term.to_lowercase()],
        )
        .unwrap()
    })
    .collect();

    let questions = vec![
        ChoiceQuestion::new(
            "Which stage breaks input into tokens?",
            vec![
                "Lexical analysis".into(),
                "Semantic analysis".into(),
                "Pragmatic analysis".into(),
                "Discourse integration".into(),
            ],
            0,
            "Lexical analysis tokenizes the input.",
        )
        .unwrap(),
        ChoiceQuestion::new(
            "Which hardware runs large language models?",
            vec!["CPU".into(), "TPU".into(), "GPU".into(), "SSD".into()],
            1,
            "TPUs are built for large models.",
        )
        .unwrap(),
    ];

    let topics = vec![CodingTopic::new(
        TopicId::new("queue"),
        "Queues",
        "// add and remove elements",
    )];

    Arc::new(Catalog::new(definitions, questions, topics).unwrap())
}

fn correct_response(session: &SessionService) -> Response {
    match session.current_item().unwrap() {
        SessionItem::Recall(def) => Response::Text(def.keywords().join(" ")),
        SessionItem::Question(q) => Response::Choice(q.correct_index()),
        SessionItem::Generated(round) => Response::Choice(round.correct_index()),
        SessionItem::Practice(_) => Response::Code("class Demo {}".into()),
    }
}

#[test]
fn completed_quiz_folds_into_the_ledger() {
    let store = InMemoryLedgerStore::new();
    let game = GameLoopService::new(fixed_clock(), sample_catalog(), Arc::new(store.clone()));

    let mut session = game.start_session(GameMode::Multiple).unwrap();
    let mut last_advance = None;
    while !session.is_complete() {
        let response = correct_response(&session);
        let answer = game.submit_current(&mut session, &response).unwrap();
        assert!(answer.outcome.is_correct());
        last_advance = Some(game.advance_current(&mut session).unwrap());
    }

    let advance = last_advance.expect("at least one item");
    assert!(advance.is_complete);
    let summary = advance.summary.expect("completion folds a summary");
    assert_eq!((summary.correct(), summary.total()), (2, 2));

    // The durable record was overwritten wholesale with the folded counts.
    let stored = store.load().unwrap();
    assert_eq!(stored.tally(GameMode::Multiple), ModeTally::new(2, 2));
    assert_eq!(stored.tally(GameMode::Flashcards), ModeTally::default());
}

#[test]
fn abandoning_mid_session_folds_partial_tallies() {
    let store = InMemoryLedgerStore::new();
    let game = GameLoopService::new(fixed_clock(), sample_catalog(), Arc::new(store.clone()));

    let mut session = game.start_session(GameMode::Flashcards).unwrap();
    let response = correct_response(&session);
    game.submit_current(&mut session, &response).unwrap();
    game.advance_current(&mut session).unwrap();

    let summary = game.abandon(&mut session).unwrap();
    assert_eq!((summary.correct(), summary.total()), (1, 1));
    assert_eq!(
        store.load().unwrap().tally(GameMode::Flashcards),
        ModeTally::new(1, 1)
    );

    // A second fold attempt for the same session is a contract violation.
    assert!(game.abandon(&mut session).is_err());
}

#[test]
fn ledger_accumulates_across_game_loop_restarts() {
    let store = InMemoryLedgerStore::new();

    {
        let game = GameLoopService::new(fixed_clock(), sample_catalog(), Arc::new(store.clone()));
        let mut session = game.start_session(GameMode::Multiple).unwrap();
        while !session.is_complete() {
            let response = correct_response(&session);
            game.submit_current(&mut session, &response).unwrap();
            game.advance_current(&mut session).unwrap();
        }
    }

    let game = GameLoopService::new(fixed_clock(), sample_catalog(), Arc::new(store.clone()));
    assert_eq!(
        game.ledger_snapshot().tally(GameMode::Multiple),
        ModeTally::new(2, 2)
    );

    let mut session = game.start_session(GameMode::Multiple).unwrap();
    game.submit_current(&mut session, &Response::Choice(3))
        .unwrap();
    game.advance_current(&mut session).unwrap();
    game.abandon(&mut session).unwrap();

    assert_eq!(
        store.load().unwrap().tally(GameMode::Multiple),
        ModeTally::new(2, 3)
    );
}

#[test]
fn timed_run_mixes_timeouts_and_answers() {
    let store = InMemoryLedgerStore::new();
    let game = GameLoopService::new(fixed_clock(), sample_catalog(), Arc::new(store.clone()));

    let mut session = game.start_session(GameMode::Timed).unwrap();
    let total = session.progress().total;

    let mut answered_correctly = 0u32;
    for index in 0..total {
        if index % 2 == 0 {
            let answer = game.timeout_current(&mut session).unwrap();
            assert!(!answer.outcome.is_correct());
        } else {
            let response = correct_response(&session);
            game.submit_current(&mut session, &response).unwrap();
            answered_correctly += 1;
        }
        game.advance_current(&mut session).unwrap();
    }

    let stored = store.load().unwrap();
    assert_eq!(
        stored.tally(GameMode::Timed),
        ModeTally::new(answered_correctly, total as u32)
    );
}

#[test]
fn dashboard_reflects_the_folded_ledger() {
    let store = InMemoryLedgerStore::new();
    let game = GameLoopService::new(fixed_clock(), sample_catalog(), Arc::new(store));

    let mut session = game.start_session(GameMode::Multiple).unwrap();
    game.submit_current(&mut session, &Response::Choice(0))
        .unwrap();
    game.advance_current(&mut session).unwrap();
    game.abandon(&mut session).unwrap();

    let rows = game.dashboard();
    assert_eq!(rows.len(), 4);
    let multiple = rows
        .iter()
        .find(|row| row.mode == GameMode::Multiple)
        .unwrap();
    assert_eq!(multiple.total, 1);
    assert!(multiple.accuracy_percent.is_some());
    let coding = rows.iter().find(|row| row.mode == GameMode::Coding).unwrap();
    assert_eq!(coding.accuracy_percent, None);
}
