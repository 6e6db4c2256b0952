use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeChangeMessage {
    pub session_id: String,
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageChangeMessage {
    pub session_id: String,
    pub language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitSessionMessage {
    pub code: String,
    pub language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PongMessage {
    pub date: String,
}

/// Events sent by a client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "join-session")]
    JoinSession(String),
    #[serde(rename = "code-change")]
    CodeChange(CodeChangeMessage),
    #[serde(rename = "language-change")]
    LanguageChange(LanguageChangeMessage),
    #[serde(rename = "ping")]
    Ping,
}

/// Events sent by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "init-session")]
    InitSession(InitSessionMessage),
    #[serde(rename = "code-update")]
    CodeUpdate(String),
    #[serde(rename = "language-update")]
    LanguageUpdate(String),
    #[serde(rename = "pong")]
    Pong(PongMessage),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_session_carries_a_bare_id() {
        let event: ClientEvent =
            serde_json::from_value(json!({ "event": "join-session", "data": "s1" })).unwrap();
        assert_eq!(event, ClientEvent::JoinSession("s1".to_string()));
    }

    #[test]
    fn code_change_uses_camel_case_fields() {
        let event: ClientEvent = serde_json::from_value(json!({
            "event": "code-change",
            "data": { "sessionId": "s1", "code": "console.log(1)" }
        }))
        .unwrap();
        assert_eq!(
            event,
            ClientEvent::CodeChange(CodeChangeMessage {
                session_id: "s1".to_string(),
                code: "console.log(1)".to_string(),
            })
        );
    }

    #[test]
    fn ping_needs_no_payload() {
        let event: ClientEvent = serde_json::from_value(json!({ "event": "ping" })).unwrap();
        assert_eq!(event, ClientEvent::Ping);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let result = serde_json::from_value::<ClientEvent>(json!({
            "event": "language-change",
            "data": { "sessionId": "s1" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_events_are_rejected() {
        let result = serde_json::from_value::<ClientEvent>(json!({ "event": "leave", "data": "s1" }));
        assert!(result.is_err());
    }

    #[test]
    fn server_events_keep_wire_names() {
        let init = ServerEvent::InitSession(InitSessionMessage {
            code: "x".to_string(),
            language: "python".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&init).unwrap(),
            json!({ "event": "init-session", "data": { "code": "x", "language": "python" } })
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::CodeUpdate("y".to_string())).unwrap(),
            json!({ "event": "code-update", "data": "y" })
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::LanguageUpdate("rust".to_string())).unwrap(),
            json!({ "event": "language-update", "data": "rust" })
        );
    }
}
