use approx::assert_relative_eq;

use popcode::config::SimulationConfig;
use popcode::decoder::UNIFORM_GUESS_SQUARED_ERROR;
use popcode::geometry::wrap_distance;
use popcode::session::{EndReason, Session, SessionEvent};
use popcode::tuning::TuningCurve;

const SEED: u64 = 42;

fn collect_run(session: &mut Session, num_trials: usize, interval_ms: u64) -> Vec<SessionEvent> {
    session.start(num_trials, interval_ms).unwrap();
    let mut events = vec![];
    while let Some(event) = session.tick() {
        events.push(event);
    }
    events
}

#[test]
fn test_run_fires_exact_event_sequence() {
    let mut session = Session::with_seed(SimulationConfig::default(), SEED);
    session.set_stimulus(1.0);

    let events = collect_run(&mut session, 3, 10);
    assert_eq!(events.len(), 4);

    for (k, event) in events[..3].iter().enumerate() {
        match event {
            SessionEvent::Trial(report) => {
                assert_eq!(report.trial, k + 1);
                assert_eq!(report.spikes.len(), 8);
            }
            other => panic!("Expected a trial event, got {:?}", other),
        }
    }
    assert_eq!(events[3], SessionEvent::Ended(EndReason::Completed));

    // The session is idle and fully reset afterwards.
    assert!(!session.is_running());
    assert_eq!(session.num_completed_trials(), 0);
    assert_eq!(session.error_means(), &[] as &[f64]);
    assert_eq!(session.tick(), None);
}

#[test]
fn test_stop_after_one_trial() {
    let mut session = Session::with_seed(SimulationConfig::default(), SEED);
    session.start(10, 10).unwrap();

    assert!(matches!(session.tick(), Some(SessionEvent::Trial(_))));
    assert_eq!(session.stop(), Some(SessionEvent::Ended(EndReason::Stopped)));

    // No further events of any kind.
    assert_eq!(session.tick(), None);
    assert_eq!(session.stop(), None);
    assert_eq!(session.error_means(), &[] as &[f64]);
}

#[test]
fn test_reproducible_with_same_seed() {
    let mut first = Session::with_seed(SimulationConfig::default(), SEED);
    let mut second = Session::with_seed(SimulationConfig::default(), SEED);
    first.set_stimulus(0.75);
    second.set_stimulus(0.75);

    let events_first = collect_run(&mut first, 20, 10);
    let events_second = collect_run(&mut second, 20, 10);
    assert_eq!(events_first, events_second);
}

#[test]
fn test_configure_is_idempotent() {
    let config = SimulationConfig::build(12, 0.4, 1.0, TuningCurve::Gaussian).unwrap();

    let mut once = Session::with_seed(SimulationConfig::default(), SEED);
    once.configure(config.clone());

    let mut twice = Session::with_seed(SimulationConfig::default(), SEED);
    twice.configure(config.clone());
    twice.configure(config);

    let events_once = collect_run(&mut once, 10, 10);
    let events_twice = collect_run(&mut twice, 10, 10);
    assert_eq!(events_once, events_twice);
}

#[test]
fn test_restart_after_completion() {
    let mut session = Session::with_seed(SimulationConfig::default(), SEED);

    let events = collect_run(&mut session, 2, 10);
    assert_eq!(events.len(), 3);

    // A completed session accepts a fresh run with fresh counters.
    let events = collect_run(&mut session, 4, 10);
    assert_eq!(events.len(), 5);
    match &events[0] {
        SessionEvent::Trial(report) => assert_eq!(report.trial, 1),
        other => panic!("Expected a trial event, got {:?}", other),
    }
}

#[test]
fn test_reported_mse_follows_the_incremental_mean() {
    let stimulus = 2.25;
    let mut session = Session::with_seed(SimulationConfig::default(), SEED);
    session.set_stimulus(stimulus);
    session.start(50, 10).unwrap();

    let mut running_mean = 0.0;
    for k in 1..=50 {
        match session.tick() {
            Some(SessionEvent::Trial(report)) => {
                let squared_error = match report.estimate {
                    Some(estimate) => wrap_distance(estimate, stimulus).powi(2),
                    None => UNIFORM_GUESS_SQUARED_ERROR,
                };
                running_mean += (squared_error - running_mean) / k as f64;
                assert_relative_eq!(report.mean_squared_error, running_mean, epsilon = 1e-9);
            }
            other => panic!("Expected a trial event, got {:?}", other),
        }
    }
}

#[test]
fn test_timer_driven_run_delivers_all_events() {
    let mut session = Session::with_seed(SimulationConfig::default(), SEED);
    session.set_stimulus(0.5);

    let mut trials = 0;
    let mut ended = 0;
    session
        .run(5, 1, |event| match event {
            SessionEvent::Trial(_) => trials += 1,
            SessionEvent::Ended(reason) => {
                assert_eq!(*reason, EndReason::Completed);
                ended += 1;
            }
        })
        .unwrap();

    assert_eq!(trials, 5);
    assert_eq!(ended, 1);
    assert!(!session.is_running());
}
