//! Stateless fun commands: coin flip and the magic 8-ball.

use {
    async_trait::async_trait,
    rand::seq::IndexedRandom,
    wavebot_commands::{BoundArgs, Handler},
    wavebot_common::{Origin, OutputBundle},
};

const FLIP_ANSWERS: [&str; 2] = ["Heads!", "Tails!"];

const EIGHTBALL_ANSWERS: [&str; 20] = [
    "As I see it, yes.",
    "Ask again later.",
    "Better not tell you now.",
    "Cannot predict now.",
    "Concentrate and ask again.",
    "Don't count on it.",
    "It is certain.",
    "It is decidedly so.",
    "Most likely.",
    "My reply is no.",
    "My sources say no.",
    "Outlook good.",
    "Outlook not so good.",
    "Reply hazy, try again.",
    "Signs point to yes.",
    "Very doubtful.",
    "Without a doubt.",
    "Yes.",
    "Yes - definitely.",
    "You may rely on it.",
];

/// `!flip` — simulate a coin flip.
pub struct Flip;

#[async_trait]
impl Handler for Flip {
    async fn handle(&self, _sender: &str, _origin: &Origin, _args: BoundArgs) -> OutputBundle {
        let mut rng = rand::rng();
        match FLIP_ANSWERS.choose(&mut rng) {
            Some(answer) => OutputBundle::public(*answer),
            None => OutputBundle::new(),
        }
    }
}

/// `!8ball` — ask a question of the magic 8-ball.
pub struct EightBall;

#[async_trait]
impl Handler for EightBall {
    async fn handle(&self, _sender: &str, _origin: &Origin, _args: BoundArgs) -> OutputBundle {
        let mut rng = rand::rng();
        match EIGHTBALL_ANSWERS.choose(&mut rng) {
            Some(answer) => OutputBundle::public(*answer),
            None => OutputBundle::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn flip_produces_one_public_line() {
        let bundle = Flip
            .handle("alice", &Origin::Private, BoundArgs::new())
            .await;
        assert_eq!(bundle.public_lines.len(), 1);
        assert!(FLIP_ANSWERS.contains(&bundle.public_lines[0].as_str()));
        assert!(bundle.private_lines.is_empty());
    }

    #[tokio::test]
    async fn eightball_answers_from_the_table() {
        let bundle = EightBall
            .handle("alice", &Origin::Private, BoundArgs::new())
            .await;
        assert!(EIGHTBALL_ANSWERS.contains(&bundle.public_lines[0].as_str()));
    }
}
