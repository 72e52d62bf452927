use crate::driver::{Controller, DriverOptions, EndReason, Message, StepStatus};
use crate::error::SimError;
use crate::model::{QueueConfig, RawQueueConfig};
use crate::sim::ScriptedDelays;
use std::time::Duration;

fn controller() -> Controller<Vec<Message>> {
    let opts = DriverOptions {
        seed: Some(11),
        ..DriverOptions::default()
    };
    Controller::new(Vec::new(), opts)
}

fn run_frames(ctl: &mut Controller<Vec<Message>>) -> StepStatus {
    let mut wall = Duration::ZERO;
    loop {
        wall += Duration::from_millis(16);
        match ctl.frame(wall).expect("started") {
            StepStatus::Continue => {}
            other => return other,
        }
    }
}

fn short_run() -> RawQueueConfig {
    serde_json::from_str(r#"{ "arrivalRate": 3, "serviceRate": 2, "queueCapacity": 4, "duration": 5 }"#)
        .expect("raw config")
}

#[test]
fn frame_before_start_is_rejected() {
    let mut ctl = controller();
    assert!(matches!(ctl.frame(Duration::ZERO), Err(SimError::NotStarted)));
    assert!(!ctl.is_active());
    assert!(ctl.sink().is_empty());
}

#[test]
fn start_announces_then_runs_to_a_single_done() {
    let mut ctl = controller();
    ctl.start(&short_run());
    assert!(ctl.is_active());
    assert_eq!(
        &ctl.sink()[..2],
        &[Message::status("engine ready"), Message::status("simulation running")]
    );

    assert_eq!(run_frames(&mut ctl), StepStatus::Finished(EndReason::Horizon));
    assert!(!ctl.is_active());

    let msgs = ctl.into_sink();
    assert_eq!(msgs.iter().filter(|m| matches!(m, Message::Done { .. })).count(), 1);
    assert!(matches!(msgs.last(), Some(Message::Done { .. })));
    assert!(msgs.iter().all(|m| !matches!(m, Message::Error { .. })));
}

#[test]
fn start_sanitizes_raw_input() {
    let mut ctl = controller();
    ctl.start(&serde_json::from_str(r#"{ "arrivalRate": "abc", "queueCapacity": 0, "duration": -1 }"#).expect("raw"));
    let cfg = *ctl.model().expect("model").config();
    assert_eq!(cfg.arrival_rate, 1.8);
    assert_eq!(cfg.queue_capacity, 0);
    assert_eq!(cfg.duration, 1.0);
}

#[test]
fn unparseable_payload_is_an_initialization_failure() {
    let mut ctl = controller();
    let err = ctl.start_json("{ not json").expect_err("init failure");
    assert!(matches!(err, SimError::Init(_)));
    assert_eq!(ctl.sink().len(), 1);
    assert!(matches!(ctl.sink()[0], Message::Error { .. }));
    assert!(matches!(ctl.frame(Duration::from_secs(1)), Err(SimError::NotStarted)));
    assert_eq!(ctl.sink().len(), 1);
}

#[test]
fn start_json_accepts_the_start_payload() {
    let mut ctl = controller();
    ctl.start_json(r#"{ "arrivalRate": 2, "serviceRate": 1, "queueCapacity": 0, "duration": 10 }"#)
        .expect("start");
    assert_eq!(
        *ctl.model().expect("model").config(),
        QueueConfig {
            arrival_rate: 2.0,
            service_rate: 1.0,
            queue_capacity: 0,
            duration: 10.0,
        }
    );
}

#[test]
fn cancel_ends_the_run_on_next_frame() {
    let mut ctl = controller();
    ctl.start(&short_run());
    ctl.frame(Duration::from_millis(16)).expect("frame");
    ctl.cancel();
    assert_eq!(
        ctl.frame(Duration::from_millis(32)).expect("frame"),
        StepStatus::Finished(EndReason::Cancelled)
    );
    assert!(matches!(
        ctl.sink().last(),
        Some(Message::Done { reason: EndReason::Cancelled, .. })
    ));
}

#[test]
fn restart_discards_previous_run_without_done() {
    let mut ctl = controller();
    ctl.start(&short_run());
    ctl.frame(Duration::from_millis(16)).expect("frame");
    ctl.start_with(
        QueueConfig {
            duration: 3.0,
            ..QueueConfig::default()
        },
        Box::new(ScriptedDelays::constant(1.0, 0.5)),
    );
    assert_eq!(run_frames(&mut ctl), StepStatus::Finished(EndReason::Horizon));

    let msgs = ctl.into_sink();
    let statuses = msgs.iter().filter(|m| matches!(m, Message::Status { .. })).count();
    assert_eq!(statuses, 4);
    let dones: Vec<_> = msgs.iter().filter(|m| matches!(m, Message::Done { .. })).collect();
    assert_eq!(
        dones,
        vec![&Message::Done {
            sim_time: 3.0,
            arrived: 3,
            served: 2,
            dropped: 0,
            reason: EndReason::Horizon,
        }]
    );
}

#[test]
fn resize_is_clamped_and_stored() {
    let mut ctl = controller();
    ctl.resize(0, 0);
    assert_eq!(ctl.viewport(), (1, 1));
    ctl.resize(800, 600);
    assert_eq!(ctl.viewport(), (800, 600));
}

#[test]
fn equal_seeds_reproduce_the_message_stream() {
    let run = || {
        let mut ctl = controller();
        ctl.start(&short_run());
        run_frames(&mut ctl);
        ctl.into_sink()
    };
    assert_eq!(run(), run());
}

#[test]
fn huge_queue_capacity_runs_to_done() {
    let mut ctl = controller();
    ctl.start_json(r#"{ "arrivalRate": 2, "serviceRate": 1, "queueCapacity": 1e20, "duration": 5 }"#)
        .expect("start");
    assert_eq!(ctl.model().expect("model").config().queue_capacity, usize::MAX);

    assert_eq!(run_frames(&mut ctl), StepStatus::Finished(EndReason::Horizon));
    let msgs = ctl.into_sink();
    assert!(msgs.iter().all(|m| !matches!(m, Message::Error { .. })));
    assert!(matches!(
        msgs.last(),
        Some(Message::Done { dropped: 0, reason: EndReason::Horizon, .. })
    ));
}
