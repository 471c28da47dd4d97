use crate::utils::{ALICE, BOB, Harness, TIP, eventually};
use alloy_primitives::Address;
use coffee_dapp::{ChainClient, Memo};
use coffee_test_utils::{DEFAULT_BLOCK_TIMESTAMP, MockWallet, coffee_bindings::BUY_ME_A_COFFEE};
use parking_lot::Mutex;
use std::{
    sync::{
        Arc, Barrier,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

#[tokio::test(flavor = "multi_thread")]
async fn new_memo_is_appended_last() {
    let h = Harness::new(MockWallet::new());
    h.wallet.emit_new_memo(BOB, 1, "bob", "first");
    h.page.mount().await;
    assert_eq!(h.page.snapshot().memos.len(), 1);

    let changed = h.page.changed();
    h.wallet.emit_new_memo(ALICE, 1_700_000_000, "alice", "hi");
    tokio::time::timeout(Duration::from_secs(1), changed.notified()).await.unwrap();
    eventually(|| h.page.snapshot().memos.len() == 2).await;

    let memos = h.page.snapshot().memos;
    let last = memos.as_slice().last().unwrap();
    assert_eq!((last.sender, last.name.as_str(), last.message.as_str()), (ALICE, "alice", "hi"));
    assert_eq!(last.timestamp.timestamp_millis(), 1_700_000_000_000);
}

#[tokio::test(flavor = "multi_thread")]
async fn own_tip_arrives_through_the_subscription() {
    let h = Harness::new(MockWallet::new().with_accounts([ALICE]));
    h.page.mount().await;
    h.page.connect().await;
    h.page.set_name("alice");
    h.page.submit_tip().await;

    eventually(|| h.page.snapshot().memos.len() == 1).await;
    let memo = h.page.snapshot().memos.as_slice()[0].clone();
    assert_eq!(memo.name, "alice");
    assert_eq!(memo.timestamp.timestamp(), DEFAULT_BLOCK_TIMESTAMP as i64);
}

#[tokio::test(flavor = "multi_thread")]
async fn no_mutation_after_unmount() {
    let h = Harness::new(MockWallet::new());
    h.page.mount().await;
    assert!(h.page.is_subscribed());
    h.page.unmount();
    assert!(!h.page.is_subscribed());

    h.wallet.emit_new_memo(ALICE, 1, "alice", "hi");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(h.page.snapshot().memos.is_empty());
    eventually(|| h.wallet.watcher_count() == 0).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn dropping_the_page_unsubscribes() {
    let h = Harness::new(MockWallet::new());
    h.page.mount().await;
    assert_eq!(h.wallet.watcher_count(), 1);
    let wallet = Arc::clone(&h.wallet);
    drop(h);
    eventually(|| wallet.watcher_count() == 0).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn client_subscription_stops_on_unsubscribe() {
    let wallet = Arc::new(MockWallet::new());
    let client = ChainClient::new(Some(Arc::clone(&wallet)), BUY_ME_A_COFFEE, TIP);
    let received = Arc::new(Mutex::new(Vec::<Memo>::new()));
    let subscription = client
        .subscribe_new_memos({
            let received = Arc::clone(&received);
            move |memo| received.lock().push(memo)
        })
        .await
        .unwrap();

    wallet.emit_new_memo(Address::ZERO, 7, "a", "b");
    eventually(|| received.lock().len() == 1).await;

    subscription.unsubscribe();
    wallet.emit_new_memo(Address::ZERO, 8, "c", "d");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(received.lock().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn mounting_twice_keeps_one_subscription() {
    let h = Harness::new(MockWallet::new());
    h.page.mount().await;
    h.page.mount().await;
    assert_eq!(h.wallet.watcher_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unsubscribe_waits_for_a_running_handler() {
    let wallet = Arc::new(MockWallet::new());
    let client = ChainClient::new(Some(Arc::clone(&wallet)), BUY_ME_A_COFFEE, TIP);
    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let calls = Arc::new(AtomicUsize::new(0));
    let subscription = client
        .subscribe_new_memos({
            let (entered, release, calls) =
                (Arc::clone(&entered), Arc::clone(&release), Arc::clone(&calls));
            move |_| {
                entered.wait();
                release.wait();
                calls.fetch_add(1, Ordering::SeqCst);
            }
        })
        .await
        .unwrap();

    wallet.emit_new_memo(Address::ZERO, 7, "a", "b");
    tokio::task::spawn_blocking(move || entered.wait()).await.unwrap();

    let unsubscribed = std::thread::spawn({
        let calls = Arc::clone(&calls);
        move || {
            subscription.unsubscribe();
            calls.load(Ordering::SeqCst)
        }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    tokio::task::spawn_blocking(move || release.wait()).await.unwrap();

    let calls_when_returned = unsubscribed.join().unwrap();
    assert_eq!(calls_when_returned, 1);

    wallet.emit_new_memo(Address::ZERO, 8, "c", "d");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
