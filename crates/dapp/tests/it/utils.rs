use alloy_primitives::{Address, U256, address};
use coffee_dapp::{ChainClient, ClientError, ErrorKind, Notifier, TipJar};
use coffee_test_utils::{MockWallet, coffee_bindings::BUY_ME_A_COFFEE};
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};

pub const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const BOB: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

pub const TIP: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);

pub type Page = TipJar<Arc<MockWallet>, Arc<RecordingNotifier>>;

/// Records what the page surfaced to the user.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<ErrorKind>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }

    fn error(&self, error: &ClientError) {
        self.errors.lock().push(error.kind());
    }
}

pub struct Harness {
    pub wallet: Arc<MockWallet>,
    pub notifier: Arc<RecordingNotifier>,
    pub page: Page,
}

impl Harness {
    pub fn new(wallet: MockWallet) -> Self {
        coffee_test_utils::init_tracing();
        let wallet = Arc::new(wallet);
        let client = ChainClient::new(Some(Arc::clone(&wallet)), BUY_ME_A_COFFEE, TIP);
        let notifier = Arc::new(RecordingNotifier::default());
        let page = TipJar::with_notifier(client, Arc::clone(&notifier));
        Self { wallet, notifier, page }
    }

    pub fn without_wallet() -> (Arc<RecordingNotifier>, Page) {
        coffee_test_utils::init_tracing();
        let client = ChainClient::new(None, BUY_ME_A_COFFEE, TIP);
        let notifier = Arc::new(RecordingNotifier::default());
        (Arc::clone(&notifier), TipJar::with_notifier(client, notifier))
    }
}

/// Waits until `f` holds, failing after a second.
pub async fn eventually(mut f: impl FnMut() -> bool) {
    for _ in 0..100 {
        if f() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met in time");
}
