use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::session::Session;

/// Current state of a single session
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub code: String,
    pub language: String,
    pub members: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry of the session listing
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub language: String,
    pub members: u32,
    pub updated_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            members: session.members.len() as u32,
            id: session.id,
            code: session.code,
            language: session.language,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

impl From<Session> for SessionSummary {
    fn from(session: Session) -> Self {
        Self {
            members: session.members.len() as u32,
            id: session.id,
            language: session.language,
            updated_at: session.updated_at,
        }
    }
}
