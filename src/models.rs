use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Counter {
    pub id: i64,
    pub name: String,
    pub count: i64,
    pub created_at: DateTime<Utc>,
}

/// Direction of a counter change, derived from the stored value rather than
/// supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Action {
    Increment,
    Decrement,
}

impl Action {
    /// Only a strictly greater value counts as an increment; writing the same
    /// value again is recorded as a decrement.
    pub fn derive(previous: i64, next: i64) -> Self {
        if next > previous {
            Self::Increment
        } else {
            Self::Decrement
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HistoryEntry {
    pub id: i64,
    pub counter_id: i64,
    pub count: i64,
    pub action: Action,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GlobalHistoryEntry {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub entry: HistoryEntry,
    pub counter_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCounterRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCounterRequest {
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_derive_strictly_greater_is_increment() {
        assert_eq!(Action::derive(0, 1), Action::Increment);
        assert_eq!(Action::derive(-10, -9), Action::Increment);
        assert_eq!(Action::derive(5, 3), Action::Decrement);
    }

    #[test]
    fn action_derive_equal_values_is_decrement() {
        assert_eq!(Action::derive(5, 5), Action::Decrement);
        assert_eq!(Action::derive(0, 0), Action::Decrement);
    }

    #[test]
    fn global_history_entry_serializes_flat() {
        let entry = GlobalHistoryEntry {
            entry: HistoryEntry {
                id: 7,
                counter_id: 3,
                count: 10,
                action: Action::Increment,
                created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            },
            counter_name: "Tasks".to_string(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["counter_id"], 3);
        assert_eq!(value["action"], "increment");
        assert_eq!(value["counter_name"], "Tasks");
    }
}
