//! PGN export of a session's move history.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::rules::chess_types::{Side, STARTING_POSITION_FEN};
use crate::rules::rules_engine::RulesEngine;
use crate::session::game_session::{GameSession, MoveRecord};

pub fn write_pgn<R: RulesEngine>(session: &GameSession<R>, date: NaiveDate) -> String {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Chess Session Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), date.format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert(
        "Result".to_owned(),
        session.status().pgn_result().to_owned(),
    );

    let initial_fen = session.start_snapshot();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(session.move_history(), session.start_move_number(), &headers)
}

pub fn write_pgn_with_headers(
    moves: &[MoveRecord],
    first_number: usize,
    headers: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(moves.len() + 1);
    let mut number = first_number;
    for (ply, record) in moves.iter().enumerate() {
        match record.mover {
            Side::White => movetext_parts.push(format!("{}. {}", number, record.notation)),
            Side::Black => {
                if ply == 0 {
                    movetext_parts.push(format!("{}... {}", number, record.notation));
                } else {
                    movetext_parts.push(record.notation.clone());
                }
                number += 1;
            }
        }
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

impl<R: RulesEngine> GameSession<R> {
    /// The game so far as PGN, dated today.
    pub fn to_pgn(&self) -> String {
        write_pgn(self, Local::now().date_naive())
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::rules::chess_types::MoveRequest;

    fn play_all(session: &mut GameSession, moves: &[&str]) {
        for lan in moves {
            let request = lan.parse::<MoveRequest>().expect("LAN should parse");
            assert!(session.attempt(request), "{lan} should be legal");
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
    }

    #[test]
    fn standard_game_movetext() {
        let mut session = GameSession::new();
        play_all(&mut session, &["e2e4", "e7e5", "g1f3", "b8c6"]);

        let pgn = write_pgn(&session, date());
        assert!(pgn.contains("[Date \"2024.03.09\"]\n"));
        assert!(pgn.contains("[Result \"*\"]\n"));
        assert!(!pgn.contains("[FEN "));
        assert!(pgn.ends_with("\n1. e4 e5 2. Nf3 Nc6 *\n"));
    }

    #[test]
    fn checkmate_sets_the_result() {
        let mut session = GameSession::new();
        play_all(&mut session, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        let pgn = write_pgn(&session, date());
        assert!(pgn.contains("[Result \"0-1\"]\n"));
        assert!(pgn.ends_with("1. f3 e5 2. g4 Qh4# 0-1\n"));
    }

    #[test]
    fn custom_start_is_declared() {
        let fen = "4k3/4p3/8/8/8/8/4P3/4K3 b - - 0 1";
        let mut session = GameSession::from_config(SessionConfig {
            start_fen: Some(fen.to_owned()),
            ..SessionConfig::default()
        })
        .expect("FEN should parse");
        play_all(&mut session, &["e7e5", "e2e4"]);

        let pgn = write_pgn(&session, date());
        assert!(pgn.contains("[SetUp \"1\"]\n"));
        assert!(pgn.contains(&format!("[FEN \"{fen}\"]\n")));
        assert!(pgn.ends_with("1... e5 2. e4 *\n"));
    }

    #[test]
    fn numbering_continues_from_the_start_position() {
        let fen = "4k3/4p3/8/8/8/8/4P3/4K3 w - - 0 40";
        let mut session = GameSession::from_config(SessionConfig {
            start_fen: Some(fen.to_owned()),
            ..SessionConfig::default()
        })
        .expect("FEN should parse");
        play_all(&mut session, &["e2e4", "e7e5", "e1d2"]);

        let pgn = write_pgn(&session, date());
        assert!(pgn.ends_with("\n40. e4 e5 41. Kd2 *\n"));
    }

    #[test]
    fn header_values_are_escaped() {
        let mut headers = BTreeMap::new();
        headers.insert("Event".to_owned(), "The \"Big\" One".to_owned());
        headers.insert("Result".to_owned(), "bogus".to_owned());

        let pgn = write_pgn_with_headers(&[], 1, &headers);
        assert!(pgn.contains("[Event \"The \\\"Big\\\" One\"]"));
        assert!(pgn.ends_with("\n*\n"));
    }
}
