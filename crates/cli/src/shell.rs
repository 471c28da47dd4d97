use coffee_dapp::Notifier;
use yansi::Paint;

/// Prints page notices to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellNotifier;

impl Notifier for ShellNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {message}", "notice:".yellow().bold());
    }
}
