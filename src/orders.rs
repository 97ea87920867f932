//! Orders

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a stored status or mode string is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    /// The field being parsed.
    pub kind: &'static str,

    /// The rejected raw value.
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Order status.
///
/// `InProgress` is the only non-terminal state; `Completed` and `Cancelled` never
/// transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed and awaiting payment.
    InProgress,

    /// Order paid for.
    Completed,

    /// Order withdrawn by its owner.
    Cancelled,
}

impl OrderStatus {
    /// Database / wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Returns the target status when `self -> target` is a legal transition.
    #[must_use]
    pub const fn transition(self, target: OrderStatus) -> Option<OrderStatus> {
        match (self, target) {
            (Self::InProgress, Self::Completed | Self::Cancelled) => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownVariant::new("order status", other)),
        }
    }
}

/// How the order is served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMode {
    /// Eaten at the restaurant, usually against a table.
    #[default]
    DineIn,

    /// Collected by the customer.
    Takeaway,
}

impl OrderMode {
    /// Database / wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DineIn => "dine_in",
            Self::Takeaway => "takeaway",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderMode {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dine_in" => Ok(Self::DineIn),
            "takeaway" => Ok(Self::Takeaway),
            other => Err(UnknownVariant::new("order mode", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn in_progress_can_complete_or_cancel() {
        assert_eq!(
            OrderStatus::InProgress.transition(OrderStatus::Completed),
            Some(OrderStatus::Completed)
        );
        assert_eq!(
            OrderStatus::InProgress.transition(OrderStatus::Cancelled),
            Some(OrderStatus::Cancelled)
        );
    }

    #[test]
    fn terminal_states_reject_every_transition() {
        for from in [OrderStatus::Completed, OrderStatus::Cancelled] {
            assert!(from.is_terminal());

            for to in [
                OrderStatus::InProgress,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ] {
                assert_eq!(from.transition(to), None, "{from} -> {to} should be rejected");
            }
        }
    }

    #[test]
    fn in_progress_cannot_loop_back_to_itself() {
        assert_eq!(
            OrderStatus::InProgress.transition(OrderStatus::InProgress),
            None
        );
    }

    #[test]
    fn status_parses_its_own_representation() -> TestResult {
        for status in [
            OrderStatus::InProgress,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        Ok(())
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result = "delivery".parse::<OrderMode>();

        assert_eq!(
            result,
            Err(UnknownVariant {
                kind: "order mode",
                value: "delivery".to_string()
            })
        );
    }
}
