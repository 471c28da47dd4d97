use crate::utils::{ALICE, Harness, TIP};
use coffee_dapp::{DraftTip, ErrorKind};
use coffee_test_utils::{MockWallet, SubmittedTip};
use similar_asserts::assert_eq;

async fn connected(wallet: MockWallet) -> Harness {
    let h = Harness::new(wallet.with_accounts([ALICE]));
    h.page.connect().await;
    h
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_draft_sends_defaults() {
    let h = connected(MockWallet::new()).await;
    assert!(h.page.submit_tip().await.is_some());
    assert_eq!(
        h.wallet.submitted_tips(),
        [SubmittedTip {
            from: Some(ALICE),
            name: "anon".to_string(),
            message: "Enjoy your coffee!".to_string(),
            value: TIP,
        }]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn filled_draft_is_sent_as_is() {
    let h = connected(MockWallet::new()).await;
    h.page.set_name("bob");
    h.page.set_message("thanks");
    h.page.submit_tip().await;

    let tips = h.wallet.submitted_tips();
    assert_eq!(tips.len(), 1);
    assert_eq!((tips[0].name.as_str(), tips[0].message.as_str()), ("bob", "thanks"));
    assert_eq!(tips[0].value, TIP);
}

#[tokio::test(flavor = "multi_thread")]
async fn success_clears_the_draft() {
    let h = connected(MockWallet::new()).await;
    h.page.set_name("bob");
    h.page.set_message("thanks");
    h.page.submit_tip().await;
    assert_eq!(h.page.snapshot().draft, DraftTip::default());
    assert_eq!(h.wallet.memos().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejection_keeps_the_draft() {
    let h = connected(MockWallet::new().rejecting_transactions()).await;
    h.page.set_name("bob");
    h.page.set_message("thanks");
    assert_eq!(h.page.submit_tip().await, None);

    assert_eq!(h.page.snapshot().draft, DraftTip::new("bob", "thanks"));
    assert_eq!(*h.notifier.errors.lock(), [ErrorKind::TransactionFailed]);

    // the same draft goes through once the user approves
    h.wallet.set_reject_transactions(false);
    assert!(h.page.submit_tip().await.is_some());
    assert_eq!(h.wallet.submitted_tips()[0].name, "bob");
}

#[tokio::test(flavor = "multi_thread")]
async fn revert_keeps_the_draft() {
    let h = connected(MockWallet::new().reverting_transactions()).await;
    h.page.set_message("thanks");
    assert_eq!(h.page.submit_tip().await, None);
    assert_eq!(h.page.snapshot().draft.message, "thanks");
    assert_eq!(*h.notifier.errors.lock(), [ErrorKind::TransactionFailed]);
    assert!(h.wallet.memos().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_submissions_both_go_through() {
    let h = connected(MockWallet::new()).await;
    let (a, b) = tokio::join!(h.page.submit_tip(), h.page.submit_tip());
    assert!(a.is_some() && b.is_some());
    assert_eq!(h.wallet.submitted_tips().len(), 2);
}
