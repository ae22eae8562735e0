use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    #[serde(default, rename = "conversationId")]
    pub conversation_id: Option<Uuid>,
    pub content: String,
}
