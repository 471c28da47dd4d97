use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use coffee_bindings::NewMemo;
use serde::Serialize;

/// A tip as shown in the feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Memo {
    pub sender: Address,
    pub name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Memo {
    /// Creates a memo from a block timestamp in seconds.
    ///
    /// Timestamps past what [`DateTime`] can represent saturate instead of failing.
    pub fn new(
        sender: Address,
        timestamp: U256,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            name: name.into(),
            message: message.into(),
            timestamp: to_datetime(timestamp),
        }
    }
}

fn to_datetime(secs: U256) -> DateTime<Utc> {
    let secs =
        u64::try_from(secs).ok().and_then(|secs| i64::try_from(secs).ok()).unwrap_or(i64::MAX);
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl From<coffee_bindings::Memo> for Memo {
    fn from(memo: coffee_bindings::Memo) -> Self {
        Self::new(memo.from, memo.timestamp, memo.name, memo.message)
    }
}

impl From<NewMemo> for Memo {
    fn from(event: NewMemo) -> Self {
        Self::new(event.from, event.timestamp, event.name, event.message)
    }
}

/// The feed, in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoList(Vec<Memo>);

impl MemoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole feed with a fresh read.
    pub fn replace(&mut self, memos: Vec<Memo>) {
        self.0 = memos;
    }

    /// Appends a memo delivered by the subscription.
    pub fn push(&mut self, memo: Memo) {
        self.0.push(memo);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Memo> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Memo] {
        &self.0
    }

    /// Iterates from the most recently received memo to the oldest.
    pub fn newest_first(&self) -> impl Iterator<Item = &Memo> {
        self.0.iter().rev()
    }
}

impl From<Vec<Memo>> for MemoList {
    fn from(memos: Vec<Memo>) -> Self {
        Self(memos)
    }
}

impl<'a> IntoIterator for &'a MemoList {
    type Item = &'a Memo;
    type IntoIter = std::slice::Iter<'a, Memo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
