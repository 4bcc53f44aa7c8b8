use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::oneshot;

use super::*;
use crate::Error;

#[tokio::test]
async fn awaiting_yields_the_future_outcome() {
    let completion = Completion::new(async { Ok::<_, Error>(41 + 1) });

    assert!(completion.rejection().is_none());
    assert_eq!(completion.await.unwrap(), 42);
}

#[tokio::test]
async fn awaiting_a_rejected_completion_fails() {
    let completion: Completion<u8> = Completion::failed(Error::InvalidRequest("bad".into()));

    assert!(matches!(completion.await, Err(Error::InvalidRequest(_))));
}

#[tokio::test]
async fn callback_receives_the_outcome_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = oneshot::channel();

    let counter = calls.clone();
    Completion::new(async { Ok::<_, Error>("done") }).on_complete(move |result| {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(result);
    });

    assert_eq!(rx.await.unwrap().unwrap(), "done");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn callback_receives_errors() {
    let (tx, rx) = oneshot::channel();

    Completion::<()>::new(async { Err(Error::NotFound("k".into())) }).on_complete(move |result| {
        let _ = tx.send(result);
    });

    assert!(rx.await.unwrap().unwrap_err().is_not_found());
}

#[test]
fn rejected_completion_calls_back_before_returning() {
    // no runtime needed: nothing is spawned for a rejected request
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Completion::<()>::failed(Error::InvalidRequest("empty key".into())).on_complete(move |result| {
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn debug_shows_state() {
    let running = Completion::new(async { Ok::<_, Error>(()) });
    let rejected = Completion::<()>::failed(Error::InvalidRequest("x".into()));

    assert_eq!(format!("{:?}", running), "Completion::Running");
    assert_eq!(
        format!("{:?}", rejected),
        "Completion::Rejected(Invalid request: x)"
    );
}

#[tokio::test]
async fn operation_starts_without_being_awaited() {
    let (tx, rx) = oneshot::channel();

    let completion = Completion::new(async move {
        let _ = tx.send(());
        Ok::<_, Error>(())
    });
    drop(completion);

    rx.await.unwrap();
}

#[tokio::test]
async fn panicking_operation_settles_as_task_failure() {
    let completion = Completion::<()>::new(async { panic!("store client blew up") });

    assert!(matches!(completion.await, Err(Error::TaskFailed(_))));
}

#[tokio::test]
async fn callback_panic_surfaces_through_the_handle() {
    let handle = Completion::new(async { Ok::<_, Error>(()) })
        .on_complete(|_| panic!("callback failed"))
        .unwrap();

    assert!(handle.await.unwrap_err().is_panic());
}

#[test]
fn completion_outside_runtime_is_rejected() {
    let completion = Completion::new(async { Ok::<_, Error>(()) });

    assert!(matches!(completion.rejection(), Some(Error::NoRuntime(_))));

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let handle = completion.on_complete(move |result| {
        assert!(matches!(result, Err(Error::NoRuntime(_))));
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(handle.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
