use quiz_core::locale::Catalog;
use quiz_core::model::{AnswerId, HelpKind, QuestionRecord, QuestionSet};
use quiz_core::time::{fixed_clock, fixed_now};
use services::sessions::{AdvanceOutcome, QuizSession, RevealDriver, SessionSettings, render_report};

fn record(question: &str, answers: [&str; 4], hint: &str, trivia: &str) -> QuestionRecord {
    QuestionRecord {
        question: question.to_owned(),
        answers: answers.iter().map(|a| (*a).to_owned()).collect(),
        image: String::new(),
        hint: hint.to_owned(),
        trivia: trivia.to_owned(),
    }
}

#[tokio::test(start_paused = true)]
async fn full_session_run_produces_a_report() {
    let set = QuestionSet::from_records(vec![
        record(
            "Capital of France?",
            ["Paris", "London", "Berlin", "Madrid"],
            "It hosts the Louvre.",
            "Nicknamed the City of Light.",
        ),
        record("Largest planet?", ["Jupiter", "Mars", "Venus", "Saturn"], "", ""),
        record("2 + 2?", ["4", "3", "5", "22"], "", ""),
    ])
    .unwrap();

    let mut session =
        QuizSession::new(set, SessionSettings::default(), fixed_now()).with_rng_seed(42);
    let driver = RevealDriver::new(fixed_clock());

    // Q1: hint, then the correct pick.
    session.use_help(HelpKind::Hint).unwrap();
    driver.select_answer(&mut session, AnswerId::CORRECT).unwrap();
    let first = driver.run_reveal(&mut session).await.unwrap();
    assert!(first.is_correct);
    assert_eq!(driver.advance(&mut session).unwrap(), AdvanceOutcome::Next);

    // Q2: double chance, wrong then right.
    session.use_help(HelpKind::Double).unwrap();
    driver.select_answer(&mut session, AnswerId::new(1)).unwrap();
    driver.select_answer(&mut session, AnswerId::CORRECT).unwrap();
    let second = driver.run_reveal(&mut session).await.unwrap();
    assert!(second.is_correct);
    assert_eq!(second.user_answer_text, "Mars, Jupiter");
    assert_eq!(driver.advance(&mut session).unwrap(), AdvanceOutcome::Next);

    // Q3: half, then a wrong pick among the survivors.
    session.use_help(HelpKind::Half).unwrap();
    let visible_wrong = (1..4)
        .map(AnswerId::new)
        .find(|id| !session.is_hidden(*id))
        .unwrap();
    driver.select_answer(&mut session, visible_wrong).unwrap();
    let third = driver.run_reveal(&mut session).await.unwrap();
    assert!(!third.is_correct);
    assert_eq!(
        driver.advance(&mut session).unwrap(),
        AdvanceOutcome::Finished
    );

    let summary = session.summary().expect("finished session has a summary");
    assert_eq!(summary.total(), 3);
    assert_eq!(summary.correct(), 2);
    assert_eq!(summary.percentage(), 66.7);

    let report = render_report(&summary, &Catalog::default());
    assert!(report.contains("You answered 2 of 3 questions correctly (66.7%)."));
    assert!(report.contains("1. Capital of France?: Paris (correct)"));
}
