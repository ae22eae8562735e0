use axum::{extract::State, http::StatusCode, Json};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use super::dto::PostMessageRequest;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::models::{ChatMessage, ChatSender, Conversation, FaqItem};

/// GET /chat/conversations: own conversations; admins see everything.
#[instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Conversation>>> {
    let chat = state.store.read().await.chat().await?;
    let conversations = if auth.is_admin() {
        chat.conversations
    } else {
        chat.conversations
            .into_iter()
            .filter(|c| c.user_id == auth.user_id)
            .collect()
    };
    Ok(Json(conversations))
}

/// POST /chat/message: append to a conversation; students without one
/// start a new conversation implicitly.
#[instrument(skip(state, body), fields(user_id = %auth.user_id))]
pub async fn post_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<PostMessageRequest>,
) -> ApiResult<(StatusCode, Json<ChatMessage>)> {
    let content = body.content.trim().to_string();
    if content.is_empty() {
        return Err(ApiError::Validation("message must not be empty".into()));
    }

    let now = OffsetDateTime::now_utc();
    let txn = state.store.write().await;
    let mut chat = txn.chat().await?;

    let position = body
        .conversation_id
        .and_then(|id| chat.conversations.iter().position(|c| c.id == id));

    let position = match position {
        Some(p) => p,
        None if !auth.is_admin() => {
            chat.conversations.push(Conversation {
                id: Uuid::new_v4(),
                user_id: auth.user_id,
                admin_id: None,
                messages: vec![],
                status: "open".into(),
                created_at: now,
            });
            chat.conversations.len() - 1
        }
        None => return Err(ApiError::NotFound("Conversation not found".into())),
    };

    let message = ChatMessage {
        id: Uuid::new_v4(),
        sender: if auth.is_admin() {
            ChatSender::Admin
        } else {
            ChatSender::User
        },
        content,
        timestamp: now,
        read: false,
    };

    let conversation = &mut chat.conversations[position];
    conversation.messages.push(message.clone());
    // The first admin reply claims the conversation.
    if auth.is_admin() && conversation.admin_id.is_none() {
        conversation.admin_id = Some(auth.user_id);
    }

    txn.save_chat(&chat).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /faq
#[instrument(skip(state), fields(user_id = %auth.user_id))]
pub async fn list_faq(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<FaqItem>>> {
    let faq = state.store.read().await.faqs().await?;
    Ok(Json(faq.faqs))
}
