use crate::utils::{ALICE, BOB, Harness};
use coffee_dapp::{
    ErrorKind, Session,
    page::{CONNECT_WALLET_NOTICE, INSTALL_WALLET_NOTICE},
};
use coffee_test_utils::MockWallet;

#[tokio::test(flavor = "multi_thread")]
async fn connect_without_wallet_notifies_and_stays_disconnected() {
    let (notifier, page) = Harness::without_wallet();
    page.mount().await;
    assert_eq!(page.connect().await, None);

    assert_eq!(page.snapshot().session, Session::Disconnected);
    assert_eq!(*notifier.alerts.lock(), [INSTALL_WALLET_NOTICE]);
    assert!(notifier.errors.lock().iter().all(|kind| *kind == ErrorKind::WalletAbsent));
    assert!(!page.is_subscribed());
}

#[tokio::test(flavor = "multi_thread")]
async fn check_then_connect_sets_the_session() {
    let h = Harness::new(MockWallet::new().with_accounts([ALICE, BOB]));
    h.page.mount().await;
    assert!(h.notifier.alerts.lock().is_empty());
    // an authorized account alone does not connect the page
    assert_eq!(h.page.snapshot().session, Session::Disconnected);

    assert_eq!(h.page.connect().await, Some(ALICE));
    assert_eq!(h.page.snapshot().session, Session::Connected(ALICE));

    assert_eq!(h.page.connect().await, Some(ALICE));
    assert_eq!(h.page.snapshot().session, Session::Connected(ALICE));
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_wallet_gets_a_notice() {
    let h = Harness::new(MockWallet::new().with_unauthorized_accounts([ALICE]));
    h.page.mount().await;
    assert_eq!(*h.notifier.alerts.lock(), [CONNECT_WALLET_NOTICE]);

    assert_eq!(h.page.connect().await, Some(ALICE));
    assert_eq!(h.page.snapshot().session.account(), Some(ALICE));
}

#[tokio::test(flavor = "multi_thread")]
async fn declined_authorization_keeps_the_session() {
    let h = Harness::new(
        MockWallet::new().with_unauthorized_accounts([ALICE]).rejecting_account_requests(),
    );
    assert_eq!(h.page.connect().await, None);
    assert_eq!(h.page.snapshot().session, Session::Disconnected);
    assert_eq!(*h.notifier.errors.lock(), [ErrorKind::UserDeclined]);
    assert!(h.notifier.alerts.lock().is_empty());
}
