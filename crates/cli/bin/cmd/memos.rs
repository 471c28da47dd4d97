use super::report;
use coffee_dapp::{ChainClient, Memo, MemoList, WalletProvider};
use eyre::Result;
use yansi::Paint;

pub async fn run<W: WalletProvider>(client: ChainClient<W>, json: bool) -> Result<()> {
    let memos = MemoList::from(client.fetch_memos().await.map_err(report)?);
    if json {
        println!("{}", serde_json::to_string_pretty(memos.as_slice())?);
        return Ok(());
    }
    if memos.is_empty() {
        println!("No memos yet.");
    }
    for memo in memos.newest_first() {
        print_memo(memo);
    }
    Ok(())
}

pub fn print_memo(memo: &Memo) {
    println!("{}", memo.message.bold());
    println!(
        "  From: {} ({}) at {}",
        memo.name.cyan(),
        memo.sender.dim(),
        memo.timestamp.dim()
    );
}
