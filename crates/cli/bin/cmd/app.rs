//! The interactive tip jar.

use coffee_cli::shell::ShellNotifier;
use coffee_dapp::{ChainClient, TipJar, WalletProvider};
use eyre::Result;
use std::{str::FromStr, sync::Arc};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    signal::ctrl_c,
};
use yansi::Paint;

const HELP: &str = "\
Commands:
  connect            connect your wallet
  name <text>        set your name
  message <text>     set your message
  send               buy a coffee
  refresh            reload every memo
  help               show this help
  quit               leave";

/// A line typed into the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppCommand {
    Connect,
    Name(String),
    Message(String),
    Send,
    Refresh,
    Help,
    Quit,
}

impl FromStr for AppCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (cmd, rest) = match s.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (s, ""),
        };
        Ok(match cmd {
            "connect" | "c" => Self::Connect,
            "name" | "n" => Self::Name(rest.to_string()),
            "message" | "m" => Self::Message(rest.to_string()),
            "send" | "s" => Self::Send,
            "refresh" | "r" => Self::Refresh,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{other}`, type `help` for a list")),
        })
    }
}

fn draw<W: WalletProvider>(page: &TipJar<W, ShellNotifier>) {
    println!("\n{}", page.render());
}

/// Runs the page until the user quits, stdin closes or ctrl-c is pressed.
///
/// Typing `connect` or `send` is the approval, there is no second prompt.
pub async fn run<W: WalletProvider>(client: ChainClient<W>) -> Result<()> {
    let page = Arc::new(TipJar::with_notifier(client, ShellNotifier));
    println!("{HELP}");
    page.mount().await;

    let changed = page.changed();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = changed.notified() => draw(&page),
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<AppCommand>() {
                    Ok(AppCommand::Connect) => {
                        page.connect().await;
                    }
                    Ok(AppCommand::Name(name)) => page.set_name(name),
                    Ok(AppCommand::Message(message)) => page.set_message(message),
                    Ok(AppCommand::Send) => {
                        eprintln!("{}", "Buying a coffee..".dim());
                        let page = Arc::clone(&page);
                        tokio::spawn(async move {
                            if let Some(tx_hash) = page.submit_tip().await {
                                eprintln!("{} {tx_hash}", "Coffee purchased!".green());
                            }
                        });
                    }
                    Ok(AppCommand::Refresh) => page.refresh().await,
                    Ok(AppCommand::Help) => println!("{HELP}"),
                    Ok(AppCommand::Quit) => break,
                    Err(err) => eprintln!("{}", err.red()),
                }
            }
            _ = ctrl_c() => break,
        }
    }

    page.unmount();
    Ok(())
}
