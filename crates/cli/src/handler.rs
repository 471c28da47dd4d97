use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Error reporting for `coffee` via `eyre`.
///
/// Prints the error chain on one line, dropping causes that the previous message already
/// contains.
pub struct Handler {
    debug_handler: Option<Box<dyn EyreHandler>>,
}

/// Returns the messages of `error` and its sources, with `msg1: msg2; msg2` collapsed to
/// `msg1: msg2`.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut next = Some(error);
    while let Some(err) = next {
        causes.push(err.to_string().trim().to_string());
        next = err.source();
    }
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(debug_handler) = &self.debug_handler {
            return debug_handler.debug(error, f);
        }

        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }
        let errors = dedup_chain(error);
        let Some((error, sources)) = errors.split_first() else { return Ok(()) };
        write!(f, "{error}")?;

        if !sources.is_empty() {
            write!(f, "\n\nCaused by:")?;
            for source in sources {
                write!(f, "\n  {source}")?;
            }
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(debug_handler) = &mut self.debug_handler {
            debug_handler.track_caller(location);
        }
    }
}

/// Installs the `coffee` [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// A short user-facing report is printed unless `COFFEE_DEBUG` is set, in which case the
/// `color-eyre` report with span traces and backtraces is used. Panics always get the verbose
/// report.
pub fn install() {
    let panic_section =
        "This is a bug. Consider reporting it at https://github.com/coffee-rs/coffee";
    let (panic_hook, debug_hook) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();
    let debug_hook = debug_hook.into_eyre_hook();
    let debug = std::env::var_os("COFFEE_DEBUG").is_some();
    if let Err(e) = eyre::set_hook(Box::new(move |e| {
        Box::new(Handler { debug_handler: debug.then(|| debug_hook(e)) })
    })) {
        debug!("failed to install eyre error hook: {e}");
    }
}
