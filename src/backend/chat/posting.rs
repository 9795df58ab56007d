/**
 * Message Posting
 *
 * Appends user-authored broadcast and direct messages to the message log.
 * Only present participants may post.
 */

use std::sync::Arc;

use crate::backend::clock::Clock;
use crate::backend::error::BackendError;
use crate::backend::store::Stores;
use crate::shared::validation::{validate_message, validate_sender};
use crate::shared::{ChatEvent, NewMessage};

#[derive(Clone)]
pub struct MessageService {
    stores: Stores,
    clock: Arc<dyn Clock>,
}

impl MessageService {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        Self { stores, clock }
    }

    /// Post a message on behalf of `from`
    ///
    /// # Arguments
    /// * `from` - Sender name, taken from the request identity
    /// * `message` - Recipient, text and kind
    ///
    /// # Errors
    /// * `InvalidInput` - empty sender, empty recipient, text shorter than
    ///   2 characters, or a kind other than broadcast/direct message
    /// * `SenderNotActive` - `from` is not a present participant
    /// * `Store` - the lookup or the append failed
    ///
    /// # Returns
    /// The event as written to the log
    pub async fn post(&self, from: &str, message: &NewMessage) -> Result<ChatEvent, BackendError> {
        let from = validate_sender(from)?;
        let valid = validate_message(message)?;

        if self.stores.find_participant(&from).await?.is_none() {
            return Err(BackendError::sender_not_active(from));
        }

        let event = ChatEvent::message(from, valid.to, valid.text, valid.kind, self.clock.now());
        self.stores.append_event(&event).await?;

        tracing::debug!("{} message from '{}' to '{}'", event.kind, event.from, event.to);
        Ok(event)
    }
}
