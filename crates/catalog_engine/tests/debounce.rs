use std::time::Duration;

use catalog_engine::Debouncer;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout, Instant};

const QUIET: Duration = Duration::from_millis(300);

#[tokio::test(start_paused = true)]
async fn burst_of_inputs_yields_one_trigger_after_quiet_period() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let gate = Debouncer::spawn(QUIET, tx);

    gate.push("t");
    sleep(Duration::from_millis(50)).await;
    gate.push("te");
    sleep(Duration::from_millis(50)).await;
    gate.push("tes");
    let last_input = Instant::now();

    let fired = rx.recv().await.expect("trigger");
    let waited = last_input.elapsed();

    assert_eq!(fired, "tes");
    assert!(waited >= QUIET, "fired after {waited:?}");
    assert!(waited < QUIET + Duration::from_millis(10), "fired after {waited:?}");

    assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn separate_bursts_trigger_separately() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let gate = Debouncer::spawn(QUIET, tx);

    gate.push(1);
    sleep(Duration::from_millis(400)).await;
    gate.push(2);

    assert_eq!(rx.recv().await, Some(1));
    assert_eq!(rx.recv().await, Some(2));
}

#[tokio::test(start_paused = true)]
async fn discard_drops_pending_value_but_keeps_gate_alive() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let gate = Debouncer::spawn(QUIET, tx);

    gate.push("stale");
    sleep(Duration::from_millis(100)).await;
    gate.discard_pending();
    assert!(timeout(Duration::from_secs(1), rx.recv()).await.is_err());

    assert!(gate.push("fresh"));
    assert_eq!(rx.recv().await, Some("fresh"));
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_pending_trigger() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let gate = Debouncer::spawn(QUIET, tx);

    gate.push("never");
    gate.cancel();
    assert!(gate.is_cancelled());

    // Gate task exits and drops its sender, closing the channel.
    assert_eq!(rx.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn dropping_gate_leaves_no_timer_behind() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let gate = Debouncer::spawn(QUIET, tx);

    gate.push("never");
    drop(gate);

    assert_eq!(rx.recv().await, None);
}
