//! Backend-owned alerts awaiting delivery to a user.

use serde::{Deserialize, Deserializer, Serialize};

/// Stable unique alert key used for the acknowledgment handshake.
///
/// The backend emits numeric ids; string ids deserialize too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AlertId(String);

impl AlertId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AlertId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Str(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Self(n.to_string()),
            Raw::Str(s) => Self(s),
        })
    }
}

/// A pending notification fetched from `GET {backend}/alerts/pending`.
///
/// Stays pending server-side until delivery is acknowledged, so the
/// same alert may be fetched (and delivered) more than once.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingAlert {
    pub id: AlertId,
    pub phone: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PendingAlert {
    /// Text to deliver: the pre-formatted `message` when present,
    /// otherwise synthesized from level/reason/action with the
    /// backend's field defaults.
    pub fn display_text(&self) -> String {
        if let Some(message) = self.message.as_deref()
            && !message.trim().is_empty()
        {
            return message.to_string();
        }
        format!(
            "Alerta {}: {}. Acción: {}",
            self.level.as_deref().unwrap_or("medio"),
            self.reason.as_deref().unwrap_or("sin motivo"),
            self.action.as_deref().unwrap_or("sin accion"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_accepts_numbers_and_strings() {
        let a: PendingAlert =
            serde_json::from_value(serde_json::json!({ "id": 42, "phone": "+1555" })).unwrap();
        assert_eq!(a.id.as_str(), "42");

        let a: PendingAlert =
            serde_json::from_value(serde_json::json!({ "id": "a1", "phone": "+1555" })).unwrap();
        assert_eq!(a.id, AlertId::new("a1"));
    }

    #[test]
    fn preformatted_message_wins() {
        let a: PendingAlert = serde_json::from_value(serde_json::json!({
            "id": 1,
            "phone": "+1555",
            "level": "alto",
            "message": "Riego urgente en lote 3"
        }))
        .unwrap();
        assert_eq!(a.display_text(), "Riego urgente en lote 3");
    }

    #[test]
    fn synthesizes_from_fields() {
        let a: PendingAlert = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "phone": "+1555",
            "level": "high",
            "reason": "timeout",
            "action": "retry"
        }))
        .unwrap();
        assert_eq!(a.display_text(), "Alerta high: timeout. Acción: retry");
    }

    #[test]
    fn empty_message_synthesizes_with_defaults() {
        // The backend's column default is an empty string.
        let a: PendingAlert = serde_json::from_value(serde_json::json!({
            "id": 7,
            "phone": "+1555",
            "message": ""
        }))
        .unwrap();
        assert_eq!(a.display_text(), "Alerta medio: sin motivo. Acción: sin accion");
    }
}
