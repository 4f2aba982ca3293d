//! Text board front-end and command loop.
//!
//! Reads one command per line, turns it into a session operation, and
//! re-renders from the session afterwards. The loop never holds game state of
//! its own; everything it prints comes from `GameSession`.

use std::io::{self, BufRead, Write};

use crate::errors::SessionErrors;
use crate::rules::chess_types::{BoardSquare, MoveRequest, PieceKind, Side};
use crate::session::draw_negotiation::DrawReply;
use crate::session::game_session::GameSession;
use crate::session::random_mover::play_random_move;
use crate::utils::render_board::{render_board, render_pieces};

const HELP_TEXT: &str = "\
commands:
  move <from> <to> [piece]   play a move (bare long algebraic like e2e4 also works)
  undo | redo | reset
  draw offer|accept|decline
  random                     play a random legal move
  board | status | history | captures | transcript | pgn | json
  set promotion <q|r|b|n>
  set drawaccept <reset|record>
  quit";

pub fn run_stdio_loop(session: GameSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut board = BoardLoop::new(session);

    board.show_position(&mut stdout)?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = board.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct BoardLoop {
    session: GameSession,
}

impl BoardLoop {
    fn new(session: GameSession) -> Self {
        Self { session }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args = parts.collect::<Vec<_>>();

        match cmd {
            "move" | "m" => match parse_move_args(&args) {
                Ok(request) => self.handle_move(request, out)?,
                Err(err) => writeln!(out, "info string move error: {}", err)?,
            },
            "undo" => {
                let notation = self.session.move_history().last().map(|r| r.notation.clone());
                if self.session.undo() {
                    writeln!(out, "undone {}", notation.unwrap_or_default())?;
                    self.show_position(out)?;
                } else {
                    writeln!(out, "nothing to undo")?;
                }
            }
            "redo" => {
                if self.session.redo() {
                    let notation = self.session.move_history().last().map(|r| r.notation.clone());
                    writeln!(out, "redone {}", notation.unwrap_or_default())?;
                    self.show_position(out)?;
                } else {
                    writeln!(out, "nothing to redo")?;
                }
            }
            "reset" | "new" => {
                self.session.reset_game();
                writeln!(out, "new game")?;
                self.show_position(out)?;
            }
            "draw" => {
                let action = args.first().copied().unwrap_or_default();
                self.handle_draw(action, out)?;
            }
            "random" => {
                let mut rng = rand::rng();
                match play_random_move(&mut self.session, &mut rng) {
                    Some(notation) => {
                        writeln!(out, "ok {}", notation)?;
                        self.show_position(out)?;
                    }
                    None => writeln!(out, "no legal moves")?,
                }
            }
            "board" => self.show_position(out)?,
            "status" => self.show_status(out)?,
            "history" => {
                for (number, white, black) in self.session.move_pairs() {
                    writeln!(
                        out,
                        "{:>3}. {:<8} {}",
                        number,
                        white.unwrap_or_else(|| "...".to_owned()),
                        black.unwrap_or_default()
                    )?;
                }
            }
            "captures" => {
                let captured = self.session.captured();
                for side in [Side::White, Side::Black] {
                    writeln!(
                        out,
                        "{} lost: {}",
                        side,
                        render_pieces(side, captured.lost_by(side))
                    )?;
                }
                writeln!(out, "material: {:+}", captured.material_balance())?;
            }
            "transcript" => {
                for entry in self.session.draw().transcript() {
                    writeln!(out, "{}", entry)?;
                }
            }
            "pgn" => {
                write!(out, "{}", self.session.to_pgn())?;
            }
            "json" => match self.session.view().to_json() {
                Ok(json) => writeln!(out, "{}", json)?,
                Err(err) => writeln!(out, "info string json error: {}", err)?,
            },
            "set" => {
                if let Err(err) = self.handle_set(&args) {
                    writeln!(out, "info string set error: {}", err)?;
                }
            }
            "help" => writeln!(out, "{}", HELP_TEXT)?,
            "quit" | "exit" => {
                return Ok(true);
            }
            _ => match trimmed.parse::<MoveRequest>() {
                Ok(request) => self.handle_move(request, out)?,
                Err(_) => writeln!(out, "info string unknown command '{}'", cmd)?,
            },
        }

        Ok(false)
    }

    fn handle_move(&mut self, request: MoveRequest, out: &mut impl Write) -> io::Result<()> {
        if self.session.attempt(request) {
            let notation = self
                .session
                .move_history()
                .last()
                .map(|r| r.notation.clone())
                .unwrap_or_default();
            writeln!(out, "ok {}", notation)?;
            self.show_position(out)?;
        } else {
            writeln!(out, "illegal {}", request)?;
        }
        Ok(())
    }

    fn handle_draw(&mut self, action: &str, out: &mut impl Write) -> io::Result<()> {
        let reply = match action {
            "offer" | "request" => self.session.request_draw(),
            "accept" => self.session.accept_draw(),
            "decline" => self.session.decline_draw(),
            other => {
                writeln!(out, "info string draw error: unknown action '{}'", other)?;
                return Ok(());
            }
        };

        match reply {
            DrawReply::Requested(side) => writeln!(out, "{} offers a draw", side)?,
            DrawReply::Accepted(side) => {
                writeln!(out, "{} accepts the draw", side)?;
                self.show_position(out)?;
            }
            DrawReply::Declined(side) => writeln!(out, "{} declines the draw", side)?,
            DrawReply::Rejected(reason) => writeln!(out, "draw refused: {}", reason)?,
        }
        Ok(())
    }

    fn handle_set(&mut self, args: &[&str]) -> Result<(), SessionErrors> {
        let (name, value) = match args {
            [name, value] => (*name, *value),
            _ => return Err(SessionErrors::UnknownOption(args.join(" "))),
        };
        self.session.set_option(name, value)
    }

    fn show_position(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            "{}",
            render_board(self.session.rules(), self.session.current_position())
        )?;
        self.show_status(out)
    }

    fn show_status(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Turn: {}", self.session.side_to_move())?;
        let status = self.session.status_text();
        if !status.is_empty() {
            writeln!(out, "{}", status)?;
        }
        Ok(())
    }
}

/// `e2 e4 [piece]` or a single long algebraic token.
fn parse_move_args(args: &[&str]) -> Result<MoveRequest, SessionErrors> {
    match args {
        [lan] => lan.parse(),
        [from, to] => Ok(MoveRequest::new(from.parse()?, to.parse()?, None)),
        [from, to, piece] => Ok(MoveRequest::new(
            from.parse::<BoardSquare>()?,
            to.parse::<BoardSquare>()?,
            Some(piece.parse::<PieceKind>()?),
        )),
        _ => Err(SessionErrors::InvalidMoveText(args.join(" "))),
    }
}
