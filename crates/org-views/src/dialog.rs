//! Dialog handle and close result
//!
//! A dialog owns a `DialogRef`; whoever opened it awaits the paired
//! `AfterClosed`. The first close wins. Dropping an open dialog resolves the
//! opener with `Dismissed`.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// How a dialog was closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult<T> {
    /// The confirm action succeeded
    Confirmed(T),
    /// The confirm action reached the backend and failed
    Failed,
    /// Cancelled, or dropped without closing
    Dismissed,
}

impl<T> DialogResult<T> {
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    pub fn confirmed(self) -> Option<T> {
        match self {
            Self::Confirmed(value) => Some(value),
            Self::Failed | Self::Dismissed => None,
        }
    }
}

/// Dialog side of the close channel
#[derive(Debug)]
pub struct DialogRef<T> {
    tx: Option<oneshot::Sender<DialogResult<T>>>,
    result: Option<DialogResult<T>>,
}

impl<T: Clone> DialogRef<T> {
    pub fn pair() -> (Self, AfterClosed<T>) {
        let (tx, rx) = oneshot::channel();
        let dialog = Self {
            tx: Some(tx),
            result: None,
        };
        (dialog, AfterClosed { rx })
    }

    /// Close with `result` unless already closed; returns the recorded result
    pub fn close(&mut self, result: DialogResult<T>) -> DialogResult<T> {
        if let Some(recorded) = &self.result {
            return recorded.clone();
        }
        if let Some(tx) = self.tx.take() {
            // The opener may have stopped listening
            let _ = tx.send(result.clone());
        }
        self.result = Some(result.clone());
        result
    }

    pub fn is_closed(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&DialogResult<T>> {
        self.result.as_ref()
    }
}

/// Opener side: resolves once the dialog closes
#[derive(Debug)]
pub struct AfterClosed<T> {
    rx: oneshot::Receiver<DialogResult<T>>,
}

impl<T> Future for AfterClosed<T> {
    type Output = DialogResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|closed| closed.unwrap_or(DialogResult::Dismissed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_opener_receives_result() {
        let (mut dialog, after_closed) = DialogRef::pair();
        dialog.close(DialogResult::Confirmed(7));
        assert_eq!(after_closed.await, DialogResult::Confirmed(7));
    }

    #[tokio::test]
    async fn test_first_close_wins() {
        let (mut dialog, after_closed) = DialogRef::<u8>::pair();
        dialog.close(DialogResult::Failed);

        assert_eq!(dialog.close(DialogResult::Confirmed(1)), DialogResult::Failed);
        assert_eq!(dialog.result(), Some(&DialogResult::Failed));
        assert_eq!(after_closed.await, DialogResult::Failed);
    }

    #[tokio::test]
    async fn test_drop_without_close_is_dismissed() {
        let (dialog, after_closed) = DialogRef::<()>::pair();
        assert!(!dialog.is_closed());
        drop(dialog);
        assert_eq!(after_closed.await, DialogResult::Dismissed);
    }

    #[test]
    fn test_close_without_listener() {
        let (mut dialog, after_closed) = DialogRef::pair();
        drop(after_closed);
        assert!(dialog.close(DialogResult::Confirmed("x")).is_confirmed());
        assert!(dialog.is_closed());
    }

    #[test]
    fn test_confirmed_value() {
        assert_eq!(DialogResult::Confirmed(3).confirmed(), Some(3));
        assert_eq!(DialogResult::<i32>::Failed.confirmed(), None);
    }
}
