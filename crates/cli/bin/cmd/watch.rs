use super::{memos::print_memo, report};
use coffee_dapp::{ChainClient, WalletProvider};
use eyre::Result;
use tokio::{signal::ctrl_c, sync::mpsc};

/// Prints memos as they are stored until interrupted.
pub async fn run<W: WalletProvider>(client: ChainClient<W>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let subscription = client
        .subscribe_new_memos(move |memo| {
            let _ = tx.send(memo);
        })
        .await
        .map_err(report)?;
    eprintln!("Watching {} for new memos, press ctrl-c to stop.", client.contract());

    loop {
        tokio::select! {
            memo = rx.recv() => match memo {
                Some(memo) => print_memo(&memo),
                None => break,
            },
            _ = ctrl_c() => break,
        }
    }

    subscription.unsubscribe();
    Ok(())
}
