//! Status-line formatting for songs and elections.

use crate::{station::Station, types::Event};

/// Format a played-song event, e.g.
/// `Game channel: Now playing: Album / Title by Artist (3 votes, 12 ratings, rated 4.2)`.
///
/// `prefix` is the verb phrase: "Now playing" or "Previously".
#[must_use]
pub fn song_line(station: Station, prefix: &str, event: &Event) -> String {
    let Some(song) = event.songs.first().filter(|_| event.has_song()) else {
        return format!(
            "{}: I have no idea (sched_type = {})",
            station.name(),
            event.sched_type
        );
    };

    let mut line = format!(
        "{}: {}: {} / {} by {}",
        station.name(),
        prefix,
        song.album,
        song.title,
        song.artist_names()
    );

    line.push_str(&format!(" ({} vote{}", song.votes, plural(song.votes)));
    line.push_str(&format!(
        ", {} rating{}, rated {}",
        song.rating_count,
        plural(song.rating_count),
        song.rating_avg
    ));
    if song.is_request() {
        if let Some(requestor) = &song.requestor {
            line.push_str(&format!(", requested by {requestor}"));
        }
    } else if song.is_conflict() {
        line.push_str(", conflict");
    }
    line.push(')');
    line
}

/// Format an election event's candidate list, e.g.
/// `Current election on Game channel: [1] Album / Title by Artist [2] ...`.
///
/// `slot` is 0 for the current election, 1 for the future one.
#[must_use]
pub fn election_line(station: Station, slot: usize, event: &Event) -> String {
    let when = if slot == 0 { "Current" } else { "Future" };
    let mut line = format!("{} election on {}:", when, station.name());
    for (i, song) in event.songs.iter().enumerate() {
        line.push_str(&format!(
            " [{}] {} / {} by {}",
            i + 1,
            song.album,
            song.title,
            song.artist_names()
        ));
        if song.is_request() {
            if let Some(requestor) = &song.requestor {
                line.push_str(&format!(" (requested by {requestor})"));
            }
        } else if song.is_conflict() {
            line.push_str(" (conflict)");
        }
    }
    line
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn song_event() -> Event {
        serde_json::from_str(
            r#"{
                "sched_id": 81213,
                "sched_type": 0,
                "song_data": [{
                    "album_name": "Chrono Trigger",
                    "song_title": "Corridors of Time",
                    "artists": [{"artist_name": "Yasunori Mitsuda"}],
                    "elec_votes": 1,
                    "song_rating_count": 12,
                    "song_rating_avg": 4.2,
                    "elec_isrequest": 4,
                    "song_requestor": "crono"
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn now_playing_line_carries_votes_and_requestor() {
        let line = song_line(Station::Game, "Now playing", &song_event());
        assert_eq!(
            line,
            "Game channel: Now playing: Chrono Trigger / Corridors of Time by \
             Yasunori Mitsuda (1 vote, 12 ratings, rated 4.2, requested by crono)"
        );
    }

    #[test]
    fn non_song_event_degrades_honestly() {
        let event: Event =
            serde_json::from_str(r#"{"sched_id": 5, "sched_type": 2}"#).unwrap();
        assert_eq!(
            song_line(Station::Ocr, "Now playing", &event),
            "OCR channel: I have no idea (sched_type = 2)"
        );
    }

    #[test]
    fn election_line_numbers_candidates() {
        let line = election_line(Station::Game, 0, &song_event());
        assert!(line.starts_with("Current election on Game channel: [1] Chrono Trigger"));
        assert!(line.ends_with("(requested by crono)"));
    }
}
