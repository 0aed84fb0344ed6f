//! `!rate <station> <rating>` — rate the currently playing song.

use std::sync::Arc;

use {
    async_trait::async_trait,
    tracing::warn,
    wavebot_commands::{BoundArgs, Handler},
    wavebot_common::{Origin, OutputBundle},
    wavebot_radio::{RadioClient, Station},
    wavebot_store::ConfigStore,
};

use crate::{SERVICE_DOWN, account::credentials, help::topic_lines};

/// Rating submission. Output is always private: a rating is between the
/// requester and the radio service.
pub struct Rate {
    radio: RadioClient,
    store: Arc<dyn ConfigStore>,
}

impl Rate {
    #[must_use]
    pub fn new(radio: RadioClient, store: Arc<dyn ConfigStore>) -> Self {
        Self { radio, store }
    }
}

#[async_trait]
impl Handler for Rate {
    async fn handle(&self, sender: &str, _origin: &Origin, args: BoundArgs) -> OutputBundle {
        let Some(station) = args.get("station").and_then(Station::from_code) else {
            return help_bundle();
        };
        let Some(rating) = args.get("rating").and_then(|r| r.parse::<f64>().ok()) else {
            return help_bundle();
        };

        let (user_id, api_key) = match credentials(self.store.as_ref(), sender).await {
            Ok(creds) => creds,
            Err(error) => {
                warn!(%error, "config store unavailable");
                return OutputBundle::private(SERVICE_DOWN);
            },
        };
        let user_id = match user_id {
            Some(id) => id,
            None => {
                // Fall back to the nick itself, as some accounts match.
                sender.to_string()
            },
        };
        let Some(api_key) = api_key else {
            return OutputBundle::private(
                "I do not have a key stored for you. Get one from the radio site and tell me \
                 about it with **!key add <key>**.",
            );
        };

        // The rating applies to whatever is playing right now.
        let song_id = match self.radio.info(station).await {
            Ok(info) => match info.sched_current.songs.first() {
                Some(song) => song.id,
                None => return OutputBundle::private(SERVICE_DOWN),
            },
            Err(error) => {
                warn!(station = station.name(), %error, "schedule fetch failed");
                return OutputBundle::private(SERVICE_DOWN);
            },
        };

        match self
            .radio
            .rate(station, &user_id, &api_key, song_id, rating)
            .await
        {
            Ok(text) => OutputBundle::private(text),
            Err(wavebot_radio::Error::Api { text }) => OutputBundle::private(text),
            Err(error) => {
                warn!(station = station.name(), %error, "rate call failed");
                OutputBundle::private(SERVICE_DOWN)
            },
        }
    }
}

fn help_bundle() -> OutputBundle {
    let mut bundle = OutputBundle::new();
    for line in topic_lines("rate") {
        bundle.push_private(line);
    }
    bundle
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wavebot_store::MemoryConfigStore;

    use super::*;

    fn args(station: &str, rating: &str) -> BoundArgs {
        let mut args = BoundArgs::new();
        args.insert("station", station);
        args.insert("rating", rating);
        args
    }

    #[tokio::test]
    async fn missing_key_is_an_instruction_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        let radio = RadioClient::with_base_url(server.url()).unwrap();
        let store = Arc::new(MemoryConfigStore::new());
        server
            .mock("GET", "/async/1/get")
            .with_status(200)
            .with_body(r#"{"sched_current": {"sched_id": 1}}"#)
            .create_async()
            .await;

        let bundle = Rate::new(radio, store)
            .handle("alice", &Origin::Private, args("game", "4.5"))
            .await;
        assert!(bundle.private_lines[0].contains("!key add"));
    }

    #[tokio::test]
    async fn malformed_rating_is_help_text() {
        let server = mockito::Server::new_async().await;
        let radio = RadioClient::with_base_url(server.url()).unwrap();
        let store = Arc::new(MemoryConfigStore::new());

        let bundle = Rate::new(radio, store)
            .handle("alice", &Origin::Private, args("game", "lots"))
            .await;
        assert!(bundle.private_lines[0].contains("!rate"));
    }

    #[tokio::test]
    async fn successful_rating_relays_api_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/async/5/get")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"sched_current": {"sched_id": 1, "sched_type": 0,
                    "song_data": [{"song_id": 77, "album_name": "A", "song_title": "T"}]}}"#,
            )
            .create_async()
            .await;
        server
            .mock("POST", "/async/5/rate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"rate_result": {"text": "rating saved"}}"#)
            .create_async()
            .await;

        let radio = RadioClient::with_base_url(server.url()).unwrap();
        let store = Arc::new(MemoryConfigStore::new());
        store.set("id:alice", "42").await.unwrap();
        store.set("key:alice", "secret").await.unwrap();

        let bundle = Rate::new(radio, store)
            .handle("alice", &Origin::Private, args("all", "4.5"))
            .await;
        assert_eq!(bundle.private_lines, vec!["rating saved"]);
    }
}
