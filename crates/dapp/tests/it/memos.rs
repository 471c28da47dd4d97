use crate::utils::{ALICE, BOB, Harness};
use alloy_primitives::{Address, U256};
use coffee_dapp::{ErrorKind, Memo};
use coffee_test_utils::{MockWallet, coffee_bindings};
use similar_asserts::assert_eq;

fn stored(from: Address, timestamp: u64, name: &str, message: &str) -> coffee_bindings::Memo {
    coffee_bindings::Memo {
        from,
        timestamp: U256::from(timestamp),
        name: name.to_string(),
        message: message.to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_keeps_order_and_converts_timestamps() {
    let h = Harness::new(MockWallet::new().with_memos([
        stored(ALICE, 1_700_000_000, "alice", "gm"),
        stored(BOB, 1_600_000_000, "bob", "older but second"),
        stored(ALICE, 1_700_000_100, "anon", "Enjoy your coffee!"),
    ]));
    h.page.refresh().await;

    let memos = h.page.snapshot().memos;
    assert_eq!(memos.len(), 3);
    let names: Vec<_> = memos.iter().map(|memo| memo.name.as_str()).collect();
    assert_eq!(names, ["alice", "bob", "anon"]);
    assert_eq!(
        memos.as_slice()[1],
        Memo::new(BOB, U256::from(1_600_000_000u64), "bob", "older but second")
    );
    assert_eq!(memos.as_slice()[0].timestamp.timestamp_millis(), 1_700_000_000_000);
}

#[tokio::test(flavor = "multi_thread")]
async fn refresh_replaces_the_feed() {
    let h = Harness::new(MockWallet::new().with_memos([stored(ALICE, 1, "a", "b")]));
    h.page.refresh().await;
    h.page.refresh().await;
    assert_eq!(h.page.snapshot().memos.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_read_leaves_the_feed() {
    let h = Harness::new(MockWallet::new().failing_reads());
    h.page.refresh().await;
    assert!(h.page.snapshot().memos.is_empty());
    assert_eq!(*h.notifier.errors.lock(), [ErrorKind::ReadFailed]);
}

#[tokio::test(flavor = "multi_thread")]
async fn memos_serialize_for_scripts() {
    let memo = Memo::new(ALICE, U256::from(1_700_000_000u64), "alice", "gm");
    let json = serde_json::to_value(&memo).unwrap();
    assert_eq!(
        json["sender"].as_str().unwrap().to_lowercase(),
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );
    assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
}
