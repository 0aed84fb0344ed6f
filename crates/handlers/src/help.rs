//! `!help [topic]` — usage text, always delivered privately.

use {
    async_trait::async_trait,
    wavebot_commands::{BoundArgs, Handler},
    wavebot_common::{Origin, OutputBundle},
    wavebot_radio::Station,
};

/// Per-topic usage lines, shared with the other handlers so validation
/// failures can degrade to the same text.
#[must_use]
pub fn topic_lines(topic: &str) -> Vec<String> {
    let codes = format!("Station codes are **{}**.", Station::CODES.join("**, **"));
    match topic {
        "8ball" => vec!["Use **!8ball** to ask a question of the magic 8-ball.".into()],
        "election" => vec![
            "Use **!election <station> [<index>]** to see the candidates in an election.".into(),
            "Short version is **!el<station> [<index>]**.".into(),
            "Index should be 0 (current) or 1 (future), default is 0.".into(),
            codes,
        ],
        "flip" => vec!["Use **!flip** to flip a coin.".into()],
        "id" => vec![
            "Look up your radio user id and use **!id add <id>** to tell me about it.".into(),
            "Use **!id drop** to delete your user id and **!id show** to see it.".into(),
        ],
        "key" => vec![
            "Get an API key from the radio site and use **!key add <key>** to tell me about it."
                .into(),
            "Use **!key drop** to delete your key and **!key show** to see it.".into(),
        ],
        "nowplaying" => vec![
            "Use **!nowplaying <station>** to show what is now playing on the radio.".into(),
            "Short version is **!np<station>**.".into(),
            codes,
        ],
        "prevplayed" => vec![
            "Use **!prevplayed <station> [<index>]** to show what was previously playing."
                .into(),
            "Short version is **!pp<station> [<index>]**.".into(),
            "Index should be one of (0, 1, 2), 0 is default, higher numbers are further in the \
             past."
                .into(),
            codes,
        ],
        "rate" => vec![
            "Use **!rate <station> <rating>** to rate the currently playing song.".into(),
            "Short version is **!rt<station> <rating>**.".into(),
            codes,
        ],
        _ => vec![format!("I cannot help you with '{topic}'.")],
    }
}

fn overview() -> Vec<String> {
    vec![
        "Use **!help [<topic>]** with one of these topics: 8ball, election, flip, id, key, \
         nowplaying, prevplayed, rate."
            .into(),
    ]
}

/// `!help` handler.
pub struct Help;

#[async_trait]
impl Handler for Help {
    async fn handle(&self, _sender: &str, _origin: &Origin, args: BoundArgs) -> OutputBundle {
        let lines = match args.get("topic") {
            None | Some("all") => overview(),
            Some(topic) => topic_lines(topic),
        };
        let mut bundle = OutputBundle::new();
        for line in lines {
            bundle.push_private(line);
        }
        bundle
    }
}
