//! User-facing failure notices.
//!
//! Cart operations never return errors to the caller; failures surface as
//! one of four fixed notices pushed through a [`NotificationSink`],
//! fire-and-forget. The UI layer decides how to render them.

use std::fmt;

/// A user-facing cart failure notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Adding a product to the cart failed.
    AddFailed,
    /// Removing a product from the cart failed.
    RemoveFailed,
    /// The requested quantity exceeds the available stock.
    OutOfStock,
    /// Updating a product's quantity failed.
    UpdateFailed,
}

impl Notice {
    /// The message shown to the user.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AddFailed => "Could not add the product to the cart",
            Self::RemoveFailed => "Could not remove the product from the cart",
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::UpdateFailed => "Could not update the product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receiver for cart failure notices.
///
/// No acknowledgment: a notice is emitted at most once per failed operation
/// and the operation does not wait on delivery.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notice to the user.
    fn notify(&self, notice: Notice);
}

/// Sink that surfaces notices through the `tracing` pipeline.
///
/// The default sink when no UI is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(notice = ?notice, "{notice}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages_are_distinct() {
        let notices = [
            Notice::AddFailed,
            Notice::RemoveFailed,
            Notice::OutOfStock,
            Notice::UpdateFailed,
        ];

        for (i, a) in notices.iter().enumerate() {
            for (j, b) in notices.iter().enumerate() {
                if i != j {
                    assert_ne!(a.message(), b.message());
                }
            }
        }
    }

    #[test]
    fn test_notice_display_matches_message() {
        assert_eq!(
            Notice::OutOfStock.to_string(),
            "Requested quantity is out of stock"
        );
    }
}
