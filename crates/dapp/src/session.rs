use alloy_primitives::Address;
use std::fmt;

/// The wallet session.
///
/// Starts [`Disconnected`](Self::Disconnected) and becomes [`Connected`](Self::Connected) once the
/// wallet grants account access. There is no way back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Session {
    #[default]
    Disconnected,
    Connected(Address),
}

impl Session {
    /// Returns the connected account.
    pub fn account(&self) -> Option<Address> {
        match self {
            Self::Disconnected => None,
            Self::Connected(account) => Some(*account),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Records the account the wallet granted access to.
    pub fn connect(&mut self, account: Address) {
        *self = Self::Connected(account);
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("disconnected"),
            Self::Connected(account) => write!(f, "connected as {account}"),
        }
    }
}

/// The tip form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftTip {
    pub name: String,
    pub message: String,
}

impl DraftTip {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), message: message.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.message.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.message.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn connect_never_downgrades() {
        let alice = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let mut session = Session::default();
        assert!(!session.is_connected());
        assert_eq!(session.to_string(), "disconnected");

        session.connect(alice);
        session.connect(alice);
        assert_eq!(session, Session::Connected(alice));
        assert_eq!(session.account(), Some(alice));
    }

    #[test]
    fn clearing_the_draft() {
        let mut draft = DraftTip::new("bob", "thanks");
        assert!(!draft.is_empty());
        draft.clear();
        assert_eq!(draft, DraftTip::default());
    }
}
