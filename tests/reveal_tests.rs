mod common;

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{timeout, Instant};

use common::live;
use roastme::kernel::cancel::RevealTimer;
use roastme::kernel::event::Event;
use roastme::kernel::time::RequestId;
use roastme::outputs::presenter::{PresenterConfig, ResultPresenter};
use roastme::services::capability::Capabilities;

async fn next_step(rx: &mut mpsc::Receiver<Event>) -> (RequestId, usize) {
    match rx.recv().await {
        Some(Event::RevealStep { result, step }) => (result, step),
        other => panic!("Expected a reveal step, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_lines_reveal_on_the_interval() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut presenter = ResultPresenter::new(Capabilities::none(), tx, PresenterConfig::default());

    let start = Instant::now();
    presenter.present(live(1, "Line one\n\nLine two"));
    assert_eq!(presenter.lines(), ["Line one", "Line two"]);
    assert!(presenter.visible_lines().is_empty());

    let (result, step) = next_step(&mut rx).await;
    assert_eq!(step, 0);
    assert!(start.elapsed() < Duration::from_millis(1), "First line shows at once");
    assert_eq!(presenter.on_reveal_step(result, step), Some((0, "Line one")));
    assert!(!presenter.is_fully_revealed());

    let (result, step) = next_step(&mut rx).await;
    assert_eq!(step, 1);
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_millis(800) && elapsed < Duration::from_millis(802),
        "Second line after one interval, got {:?}",
        elapsed
    );
    assert_eq!(presenter.on_reveal_step(result, step), Some((1, "Line two")));
    assert!(presenter.is_fully_revealed());
    assert!(!presenter.has_pending_reveal());

    // Nothing after the last line
    assert!(timeout(Duration::from_secs(10), rx.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_replacing_the_result_cancels_its_reveal() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut presenter = ResultPresenter::new(Capabilities::none(), tx, PresenterConfig::default());

    let first = live(1, "a\nb\nc\nd");
    presenter.present(first.clone());
    let (result, step) = next_step(&mut rx).await;
    presenter.on_reveal_step(result, step);

    let second = live(2, "x\ny");
    presenter.present(second.clone());
    assert!(presenter.visible_lines().is_empty());

    let mut seen = Vec::new();
    while let Ok(Some(Event::RevealStep { result, step })) =
        timeout(Duration::from_secs(5), rx.recv()).await
    {
        seen.push((result, step));
    }
    assert_eq!(seen, vec![(second.id, 0), (second.id, 1)]);

    // A tick from the old result that slipped through is dropped
    assert_eq!(presenter.on_reveal_step(first.id, 1), None);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_stops_pending_ticks() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut presenter = ResultPresenter::new(Capabilities::none(), tx, PresenterConfig::default());

    presenter.present(live(1, "a\nb\nc"));
    let (result, step) = next_step(&mut rx).await;
    presenter.on_reveal_step(result, step);
    assert!(presenter.has_pending_reveal());

    presenter.teardown();

    assert!(presenter.current().is_none());
    assert!(timeout(Duration::from_secs(10), rx.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_steps_are_ignored() {
    let (tx, _rx) = mpsc::channel(16);
    let mut presenter = ResultPresenter::new(Capabilities::none(), tx, PresenterConfig::default());
    let shown = live(3, "a\nb");
    presenter.present(shown.clone());

    assert_eq!(presenter.on_reveal_step(shown.id, 1), None);
    assert_eq!(presenter.on_reveal_step(shown.id, 0), Some((0, "a")));
    assert_eq!(presenter.on_reveal_step(shown.id, 0), None);
    assert_eq!(presenter.visible_lines(), ["a"]);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_timer_cancels_it() {
    let (tx, mut rx) = mpsc::channel(16);
    let timer = RevealTimer::start(RequestId::first(), 5, Duration::from_millis(800), tx);
    assert_eq!(timer.result(), RequestId::first());

    let (_, step) = next_step(&mut rx).await;
    assert_eq!(step, 0);

    drop(timer);

    // The task held the only sender, so the channel closes
    assert!(matches!(
        timeout(Duration::from_secs(10), rx.recv()).await,
        Ok(None)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_empty_roast_starts_no_timer() {
    let (tx, mut rx) = mpsc::channel(16);
    let mut presenter = ResultPresenter::new(Capabilities::none(), tx, PresenterConfig::default());

    presenter.present(live(1, "\n  \n"));

    assert!(presenter.lines().is_empty());
    assert!(!presenter.has_pending_reveal());
    assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
}
