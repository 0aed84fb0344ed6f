//! The dispatcher: one message in, zero or more sends out.

use std::{sync::Arc, time::Duration};

use {
    tokio::sync::mpsc,
    tracing::{debug, info, warn},
    wavebot_commands::CommandRegistry,
    wavebot_common::{DispatchOutcome, IncomingMessage, OutputBundle},
};

use crate::{Error, Result, router::OutputRouter, transport::Transport};

const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(30);

const TIMED_OUT: &str = "That took too long and I gave up, sorry.";

/// Orchestrates match → invoke → route → deliver for each message.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    router: OutputRouter,
    transport: Arc<dyn Transport>,
    handler_timeout: Duration,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        registry: Arc<CommandRegistry>,
        router: OutputRouter,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            registry,
            router,
            transport,
            handler_timeout: DEFAULT_HANDLER_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    /// Dispatch one message. A send failure is fatal for this message only;
    /// everything upstream of delivery (no match, handler trouble) resolves
    /// to a normal outcome.
    pub async fn dispatch(&self, msg: IncomingMessage) -> Result<DispatchOutcome> {
        let Some((spec, args)) = self.registry.find(&msg.text) else {
            // Most chat traffic is not a command. Silently ignore.
            debug!(sender = %msg.sender_id, "no command matched");
            return Ok(DispatchOutcome::NoMatch);
        };

        let handled = spec.handler.handle(&msg.sender_id, &msg.origin, args);
        let bundle = match tokio::time::timeout(self.handler_timeout, handled).await {
            Ok(bundle) => bundle,
            Err(_) => {
                warn!(command = %spec.name, sender = %msg.sender_id, "handler timed out");
                OutputBundle::private(TIMED_OUT)
            },
        };

        let plan = self
            .router
            .route(spec, &bundle, &msg.origin, &msg.sender_id)
            .await?;

        info!(
            command = %spec.name,
            sender = %msg.sender_id,
            sends = plan.len(),
            "dispatched"
        );

        for (destination, line) in &plan {
            self.transport
                .send(destination, line)
                .await
                .map_err(|source| Error::Delivery { source })?;
        }

        Ok(DispatchOutcome::Handled {
            command: spec.name.clone(),
            bundle,
        })
    }
}

/// Drive a dispatcher from a message stream, one independent task per
/// message so a slow handler never serializes unrelated traffic.
pub async fn serve(dispatcher: Arc<Dispatcher>, mut messages: mpsc::Receiver<IncomingMessage>) {
    while let Some(msg) = messages.recv().await {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            if let Err(error) = dispatcher.dispatch(msg).await {
                warn!(%error, "dispatch failed");
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use {
        async_trait::async_trait,
        std::sync::Mutex,
        wavebot_commands::{BoundArgs, CommandSpec, GatePolicy, Handler},
        wavebot_common::{Destination, Origin},
        wavebot_store::MemoryConfigStore,
    };

    use super::*;

    /// Transport that records every send.
    #[derive(Default)]
    struct Recorder {
        sends: Mutex<Vec<(Destination, String)>>,
    }

    impl Recorder {
        fn sends(&self) -> Vec<(Destination, String)> {
            self.sends.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, destination: &Destination, text: &str) -> anyhow::Result<()> {
            self.sends
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((destination.clone(), text.to_string()));
            Ok(())
        }
    }

    struct Stuck;

    #[async_trait]
    impl Handler for Stuck {
        async fn handle(&self, _: &str, _: &Origin, _: BoundArgs) -> OutputBundle {
            // Longer than any test timeout.
            tokio::time::sleep(Duration::from_secs(3600)).await;
            OutputBundle::public("never")
        }
    }

    fn dispatcher_with(registry: CommandRegistry, transport: Arc<Recorder>) -> Dispatcher {
        let store = Arc::new(MemoryConfigStore::new());
        Dispatcher::new(
            Arc::new(registry),
            OutputRouter::new(store, "!"),
            transport,
        )
    }

    #[tokio::test]
    async fn unmatched_text_sends_nothing() {
        let transport = Arc::new(Recorder::default());
        let dispatcher = dispatcher_with(CommandRegistry::new(), transport.clone());

        let outcome = dispatcher
            .dispatch(IncomingMessage {
                sender_id: "alice".into(),
                text: "hello there".into(),
                origin: Origin::Private,
            })
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::NoMatch);
        assert!(transport.sends().is_empty());
    }

    #[tokio::test]
    async fn timed_out_handler_reports_privately() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandSpec::new("slow", r"^!slow\b", GatePolicy::None, Arc::new(Stuck)).unwrap(),
        );
        let transport = Arc::new(Recorder::default());
        let dispatcher = dispatcher_with(registry, transport.clone())
            .with_handler_timeout(Duration::from_millis(10));

        let outcome = dispatcher
            .dispatch(IncomingMessage {
                sender_id: "alice".into(),
                text: "!slow".into(),
                origin: Origin::Public {
                    channel_id: "#lounge".into(),
                },
            })
            .await
            .unwrap();

        assert!(matches!(outcome, DispatchOutcome::Handled { .. }));
        let sends = transport.sends();
        assert_eq!(sends.len(), 1);
        assert!(matches!(sends[0].0, Destination::User { ref user_id } if user_id == "alice"));
        assert_eq!(sends[0].1, TIMED_OUT);
    }
}
