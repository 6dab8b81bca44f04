//! End-to-end checkpoint flow over the library API
//!
//! Walks a small curriculum the way the interactive driver does: start,
//! answer questions, evaluate levels, accumulate stats, clear, build the
//! delivery payload, restart.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use bopodrill::checkpoint::{
    CheckpointSession, LevelOutcome, MasteryThresholds, Phase, OPTION_COUNT,
};
use bopodrill::grading::{self, Surface};
use bopodrill::report::{DeliveryStatus, ResultPayload};
use bopodrill::store::{self, settings, stats, student, StudentProfile, TeacherSettings};

fn pool() -> Vec<String> {
    ["ㄅ", "ㄆ", "ㄇ", "ㄈ"].iter().map(|s| s.to_string()).collect()
}

#[test]
fn full_run_clears_accumulates_and_restarts() {
    let thresholds = MasteryThresholds { required_attempts: 2, required_accuracy: 50 };
    let mut session = CheckpointSession::new();
    let mut totals = stats::GlobalStats::default();
    let mut rng = StdRng::seed_from_u64(99);

    session.start(pool(), thresholds, "A03").unwrap();
    assert_eq!(session.phase(), Phase::InLevel);

    while session.phase() == Phase::InLevel {
        let answer = session.current_symbol().unwrap().to_string();

        // Every question offers 4 distinct choices including the target
        let options = session.question_options(&mut rng);
        assert_eq!(options.len(), OPTION_COUNT);
        assert!(options.contains(&answer));

        // One miss, one hit per level: exactly the 50% bar
        session.record_answer("wrong");
        session.record_answer(&answer);
        assert!(session.can_evaluate());
        let outcome = session.evaluate_level(thresholds, &mut totals);
        assert_ne!(outcome, LevelOutcome::NotReady);
        assert_ne!(outcome, LevelOutcome::Retry);
    }

    assert_eq!(session.phase(), Phase::AllClear);
    assert_eq!(session.level_index(), 4);
    // Four passed levels at 1/2 each
    assert_eq!(totals, stats::GlobalStats { correct: 4, total: 8 });

    // Clearance payload mirrors the run
    let cfg = TeacherSettings {
        required_questions: 2,
        required_accuracy: 50,
        enabled_symbols: pool(),
        ..TeacherSettings::default()
    };
    let profile = StudentProfile { student_id: "A03".into(), student_name: "小明".into() };
    let payload = ResultPayload::for_clearance("dev-x".into(), profile, &cfg, session.levels());
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["summary"]["totalLevels"], 4);
    assert_eq!(json["summary"]["clearedLevels"], 4);
    assert_eq!(json["settings"]["enabledSymbols"].as_array().unwrap().len(), 4);

    session.restart();
    assert_eq!(session.phase(), Phase::Ready);
    assert_eq!(session.level_index(), 0);
    assert!(session.progress().is_none());
}

#[test]
fn persisted_state_survives_a_session() {
    let dir = TempDir::new().unwrap();
    store::init(dir.path()).unwrap();

    let profile = StudentProfile { student_id: "B12".into(), student_name: String::new() };
    student::save(dir.path(), &profile).unwrap();

    let cfg = TeacherSettings {
        required_questions: 1,
        required_accuracy: 1,
        enabled_symbols: pool(),
        ..TeacherSettings::default()
    };
    settings::save(dir.path(), &cfg).unwrap();

    // A reload sees the same validated settings and a ready student
    let cfg = settings::load(dir.path());
    let profile = student::load(dir.path());
    assert!(profile.is_ready());
    assert_eq!(cfg.enabled_symbols, pool());

    // Pass one level and persist the updated stats
    let mut session = CheckpointSession::new();
    session.start(cfg.enabled_symbols.clone(), cfg.thresholds(), &profile.student_id).unwrap();
    let answer = session.current_symbol().unwrap().to_string();
    session.record_answer(&answer);
    let mut totals = stats::load(dir.path());
    session.evaluate_level(cfg.thresholds(), &mut totals);
    stats::save(dir.path(), &totals).unwrap();

    assert_eq!(stats::load(dir.path()), stats::GlobalStats { correct: 1, total: 1 });

    // Device id survives too
    let id = store::device_id(dir.path()).unwrap();
    assert_eq!(store::device_id(dir.path()).unwrap(), id);
}

#[test]
fn trace_grading_feeds_learn_mode() {
    // A faithful trace of the reference passes; a blank one does not.
    let mask = grading::render_mask("ㄇ").unwrap();
    let mut faithful = Surface::blank();
    for y in 0..mask.side() {
        for x in 0..mask.side() {
            let px = mask.get(x, y);
            if px[0] < 220 {
                faithful.set(x, y, [239, 68, 68, 255]);
            }
        }
    }
    assert!(grading::grade("ㄇ", &faithful).passed);
    assert!(!grading::grade("ㄇ", &Surface::blank()).passed);
}

#[tokio::test]
async fn unconfigured_delivery_is_skipped_and_non_blocking() {
    let cfg = TeacherSettings::default();
    let profile = StudentProfile { student_id: "A03".into(), student_name: String::new() };
    let payload =
        ResultPayload::for_clearance("dev-x".into(), profile, &cfg, &pool());

    let mut rx = bopodrill::report::spawn_delivery(cfg.endpoint(), payload);
    assert_eq!(*rx.borrow(), DeliveryStatus::Sending);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), DeliveryStatus::Skipped);
}
