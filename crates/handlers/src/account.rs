//! `!id` and `!key` — link a chat identity to a radio account.

use std::sync::Arc;

use {
    async_trait::async_trait,
    tracing::warn,
    wavebot_commands::{BoundArgs, Handler},
    wavebot_common::{Origin, OutputBundle},
    wavebot_store::ConfigStore,
};

use crate::help::topic_lines;

const STORE_DOWN: &str = "I cannot reach my storage right now, sorry.";

fn id_key(nick: &str) -> String {
    format!("id:{nick}")
}

fn api_key_key(nick: &str) -> String {
    format!("key:{nick}")
}

/// Read a stored value, treating the empty-string tombstone as absent.
async fn read(store: &dyn ConfigStore, key: &str) -> Result<Option<String>, wavebot_store::Error> {
    Ok(store.get(key).await?.filter(|v| !v.is_empty()))
}

fn help_bundle(topic: &str) -> OutputBundle {
    let mut bundle = OutputBundle::new();
    for line in topic_lines(topic) {
        bundle.push_private(line);
    }
    bundle
}

/// `!id add|drop|show [<id>]` — radio user id for a nick. Output is always
/// private.
pub struct UserId {
    store: Arc<dyn ConfigStore>,
}

impl UserId {
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for UserId {
    async fn handle(&self, sender: &str, _origin: &Origin, args: BoundArgs) -> OutputBundle {
        let result = match (args.get("mode"), args.get("value")) {
            (Some("add"), Some(value)) => self
                .store
                .set(&id_key(sender), value)
                .await
                .map(|()| format!("I assigned the user id {value} to nick '{sender}'.")),
            (Some("drop"), _) => self
                .store
                .set(&id_key(sender), "")
                .await
                .map(|()| format!("I dropped the user id for nick '{sender}'.")),
            (Some("show"), _) => read(self.store.as_ref(), &id_key(sender))
                .await
                .map(|stored| match stored {
                    Some(id) => format!("The user id for nick '{sender}' is {id}."),
                    None => format!("I do not have a user id for nick '{sender}'."),
                }),
            _ => return help_bundle("id"),
        };
        match result {
            Ok(line) => OutputBundle::private(line),
            Err(error) => {
                warn!(%error, "config store unavailable");
                OutputBundle::private(STORE_DOWN)
            },
        }
    }
}

/// `!key add|drop|show [<key>]` — radio API key for a nick. Output is
/// always private.
pub struct ApiKey {
    store: Arc<dyn ConfigStore>,
}

impl ApiKey {
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for ApiKey {
    async fn handle(&self, sender: &str, _origin: &Origin, args: BoundArgs) -> OutputBundle {
        let result = match (args.get("mode"), args.get("value")) {
            (Some("add"), Some(value)) => self
                .store
                .set(&api_key_key(sender), value)
                .await
                .map(|()| format!("I assigned the API key '{value}' to nick '{sender}'.")),
            (Some("drop"), _) => self
                .store
                .set(&api_key_key(sender), "")
                .await
                .map(|()| format!("I dropped the API key for nick '{sender}'.")),
            (Some("show"), _) => read(self.store.as_ref(), &api_key_key(sender))
                .await
                .map(|stored| match stored {
                    Some(key) => format!("The API key for nick '{sender}' is '{key}'."),
                    None => format!("I do not have an API key for nick '{sender}'."),
                }),
            _ => return help_bundle("key"),
        };
        match result {
            Ok(line) => OutputBundle::private(line),
            Err(error) => {
                warn!(%error, "config store unavailable");
                OutputBundle::private(STORE_DOWN)
            },
        }
    }
}

/// Stored credentials for `!rate`.
pub(crate) async fn credentials(
    store: &dyn ConfigStore,
    nick: &str,
) -> Result<(Option<String>, Option<String>), wavebot_store::Error> {
    let id = read(store, &id_key(nick)).await?;
    let key = read(store, &api_key_key(nick)).await?;
    Ok((id, key))
}
