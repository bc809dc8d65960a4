//! Line-driven play session.
//!
//! Reads one command per line, applies it to the engine, and prints the
//! resulting events and board. The round clock is checked before every
//! command, so an expired round is frozen before the next move is tried.

use crate::config::HanoiConfig;
use crate::render::{format_clock, render_board, render_status};
use derive_more::{Display, Error};
use derive_new::new;
use std::io::{BufRead, Write};
use std::time::Instant;
use strictly_hanoi::{DiskId, Engine, GameEvent, MoveError, Phase, TowerId, solve};
use tracing::{debug, info, instrument, warn};

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Move the top disk between towers.
    Move(TowerId, TowerId),
    /// Move a disk by number (1 = smallest).
    Drag(DiskId, TowerId),
    /// Take back the last move.
    Undo,
    /// Show where the top disk of a tower may go.
    Hint(TowerId),
    /// Print the engine state.
    State {
        /// Print as JSON.
        json: bool,
    },
    /// Print the optimal solution for the current disk count.
    Solve,
    /// Abandon the round.
    Reset,
    /// Start a new round, optionally with other settings.
    Start {
        /// Disk count override.
        disks: Option<usize>,
        /// Time limit override in seconds.
        time_limit_secs: Option<u64>,
    },
    /// Show the command list.
    Help,
    /// Leave the session.
    Quit,
}

/// Error parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct InputError {
    /// What was wrong with the line.
    pub message: String,
}

impl InputError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<MoveError> for InputError {
    fn from(err: MoveError) -> Self {
        Self::new(err.to_string())
    }
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  move <from> <to>   move the top disk (towers: 0-2, A-C or left/middle/right)
  <from> <to>        same as move
  drag <disk> <to>   move disk number <disk> (1 = smallest); must be on top
  undo               take back the last move
  hint <tower>       list towers the top disk of <tower> may move to
  state [--json]     print the game state
  solve              print the optimal solution
  start [disks] [seconds]  start a new round
  reset              abandon the round
  help               show this list
  quit               leave";

impl Input {
    /// Parses one command line. Blank lines yield `None`.
    #[instrument]
    pub fn parse(line: &str) -> Result<Option<Self>, InputError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((head, args)) = words.split_first() else {
            return Ok(None);
        };

        let input = match (head.to_lowercase().as_str(), args) {
            ("move" | "m", [from, to]) => Input::Move(from.parse()?, to.parse()?),
            ("drag" | "d", [disk, to]) => Input::Drag(parse_disk(disk)?, to.parse()?),
            ("undo" | "u", []) => Input::Undo,
            ("hint" | "h", [tower]) => Input::Hint(tower.parse()?),
            ("state" | "s", []) => Input::State { json: false },
            ("state" | "s", ["--json"]) => Input::State { json: true },
            ("solve", []) => Input::Solve,
            ("reset", []) => Input::Reset,
            ("start", rest) if rest.len() <= 2 => Input::Start {
                disks: rest.first().map(|d| parse_number(d)).transpose()?,
                time_limit_secs: rest
                    .get(1)
                    .map(|s| parse_number(s).map(|n| n as u64))
                    .transpose()?,
            },
            ("help" | "?", []) => Input::Help,
            ("quit" | "exit" | "q", []) => Input::Quit,
            (_, [to]) => match head.parse::<TowerId>() {
                Ok(from) => Input::Move(from, to.parse()?),
                Err(_) => return Err(unknown_command(line)),
            },
            _ => return Err(unknown_command(line)),
        };
        Ok(Some(input))
    }
}

fn unknown_command(line: &str) -> InputError {
    InputError::new(format!("Unknown command {:?} (type 'help')", line.trim()))
}

fn parse_number(s: &str) -> Result<usize, InputError> {
    s.parse::<usize>()
        .map_err(|_| InputError::new(format!("Not a number: {:?}", s)))
}

/// Disk numbers are 1-based for players.
fn parse_disk(s: &str) -> Result<DiskId, InputError> {
    match parse_number(s)? {
        0 => Err(InputError::new("Disks are numbered from 1")),
        n => Ok(DiskId(n - 1)),
    }
}

/// Wall-clock timer for one round.
#[derive(Debug, Clone, Copy, new)]
pub struct RoundClock {
    limit_secs: u64,
    #[new(value = "Instant::now()")]
    started_at: Instant,
}

impl RoundClock {
    /// Whole seconds since the round started.
    pub fn elapsed_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Seconds left, saturating at zero.
    pub fn remaining_secs(&self) -> u64 {
        self.limit_secs.saturating_sub(self.elapsed_secs())
    }

    /// Returns true once the limit has elapsed.
    pub fn expired(&self) -> bool {
        self.elapsed_secs() >= self.limit_secs
    }
}

/// An interactive session around one engine.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    config: HanoiConfig,
    clock: Option<RoundClock>,
}

impl Session {
    /// Creates a session; no round is running yet.
    #[instrument(skip(config))]
    pub fn new(config: HanoiConfig) -> Self {
        Self {
            engine: Engine::new(),
            config,
            clock: None,
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Starts a round, replacing any previous one.
    #[instrument(skip(self, out))]
    pub fn start_round(
        &mut self,
        disks: Option<usize>,
        time_limit_secs: Option<u64>,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let disks = disks.unwrap_or(*self.config.disks());
        if disks > *self.config.max_disks() {
            writeln!(
                out,
                "At most {} disks allowed in this configuration",
                self.config.max_disks()
            )?;
            return Ok(());
        }
        let limit = time_limit_secs.unwrap_or(*self.config.time_limit_secs());

        if self.engine.phase() != Phase::Idle {
            self.engine.reset();
        }
        match self.engine.start(disks, limit) {
            Ok(()) => {
                self.clock = (limit > 0).then(|| RoundClock::new(limit));
                self.flush_events(out)?;
                self.print_board(out)?;
            }
            Err(err) => {
                self.engine.drain_events();
                writeln!(out, "Cannot start: {}", err)?;
            }
        }
        Ok(())
    }

    /// Runs until `quit` or end of input.
    #[instrument(skip_all)]
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        self.start_round(None, None, out)?;
        writeln!(out, "Type 'help' for commands.")?;

        for line in input.lines() {
            let line = line?;
            self.check_clock(out)?;

            let parsed = match Input::parse(&line) {
                Ok(Some(input)) => input,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(out, "{}", err)?;
                    continue;
                }
            };
            debug!(?parsed, "Command read");
            if parsed == Input::Quit {
                info!("Session ended by player");
                break;
            }
            self.handle(parsed, out)?;
        }
        Ok(())
    }

    /// Applies one parsed command.
    #[instrument(skip(self, out))]
    pub fn handle(&mut self, input: Input, out: &mut impl Write) -> anyhow::Result<()> {
        match input {
            Input::Move(from, to) => {
                if let Err(err) = self.engine.request_move(from, to) {
                    debug!(%err, "Move refused");
                }
                self.after_move(out)?;
            }
            Input::Drag(disk, to) => {
                if let Err(err) = self.engine.move_disk(disk, to) {
                    debug!(%err, "Drag refused");
                }
                self.after_move(out)?;
            }
            Input::Undo => {
                if let Err(err) = self.engine.undo() {
                    writeln!(out, "Cannot undo: {}", err)?;
                }
                self.after_move(out)?;
            }
            Input::Hint(tower) => {
                let targets = self.engine.valid_destinations(tower);
                match self.top_disk_label(tower) {
                    None => writeln!(out, "{} is empty", tower)?,
                    Some(disk) if targets.is_empty() => {
                        writeln!(out, "{}: {} cannot move", tower, disk)?
                    }
                    Some(disk) => {
                        let names: Vec<String> =
                            targets.iter().map(ToString::to_string).collect();
                        writeln!(out, "{}: {} can move to: {}", tower, disk, names.join(", "))?;
                    }
                }
            }
            Input::State { json } => {
                let snapshot = self.engine.snapshot();
                if json {
                    writeln!(out, "{}", snapshot.to_json()?)?;
                } else {
                    self.print_board(out)?;
                }
            }
            Input::Solve => self.print_solution(out)?,
            Input::Reset => {
                self.engine.reset();
                self.clock = None;
                self.flush_events(out)?;
            }
            Input::Start {
                disks,
                time_limit_secs,
            } => self.start_round(disks, time_limit_secs, out)?,
            Input::Help => writeln!(out, "{}", HELP)?,
            Input::Quit => {}
        }
        Ok(())
    }

    /// Freezes the round once its time limit has passed.
    fn check_clock(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        let Some(clock) = self.clock else {
            return Ok(());
        };
        if self.engine.phase() != Phase::Active || !clock.expired() {
            return Ok(());
        }

        match self.engine.time_expire(clock.elapsed_secs()) {
            Ok(()) => {
                self.flush_events(out)?;
                if *self.config.show_solution_on_loss() {
                    self.print_solution(out)?;
                }
            }
            Err(err) => warn!(%err, "Clock expired but engine refused time-out"),
        }
        Ok(())
    }

    /// "disk 1 (Tiny)" for the top disk of `tower`.
    fn top_disk_label(&self, tower: TowerId) -> Option<String> {
        let registry = self.engine.round()?.registry();
        let disk = registry.disk(registry.top_of(tower)?)?;
        Some(format!(
            "disk {} ({})",
            disk.id().number(),
            disk.size_label(registry.disk_count())
        ))
    }

    fn after_move(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        self.flush_events(out)?;
        self.print_board(out)
    }

    fn flush_events(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        for event in self.engine.drain_events() {
            match event {
                GameEvent::Started {
                    disks,
                    time_limit_secs,
                } => {
                    let clock = if time_limit_secs == 0 {
                        "no time limit".to_string()
                    } else {
                        format!("{} on the clock", format_clock(time_limit_secs))
                    };
                    writeln!(out, "New round: {} disks, {}", disks, clock)?;
                }
                GameEvent::MoveAccepted { disk, from, to } => writeln!(
                    out,
                    "Moved disk {} from {} to {}",
                    disk.number(),
                    from.letter(),
                    to.letter()
                )?,
                GameEvent::MoveRejected { reason } => writeln!(out, "Invalid move: {}", reason)?,
                GameEvent::MoveUndone { disk, from, to } => writeln!(
                    out,
                    "Undid disk {}: back from {} to {}",
                    disk.number(),
                    from.letter(),
                    to.letter()
                )?,
                GameEvent::Won {
                    move_count,
                    efficiency,
                } => {
                    writeln!(out, "Solved!")?;
                    writeln!(out, "Total moves: {}", move_count)?;
                    writeln!(
                        out,
                        "Minimum moves: {}",
                        self.engine.min_moves_required()
                    )?;
                    writeln!(out, "Efficiency: {:.1}%", efficiency)?;
                    if let Some(rating) = self.engine.rating() {
                        writeln!(out, "{}", rating.message())?;
                    }
                }
                GameEvent::TimedOut => writeln!(out, "Time is up! Type 'start' to try again.")?,
                GameEvent::Reset => writeln!(out, "Round abandoned.")?,
            }
        }
        Ok(())
    }

    fn print_board(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let snapshot = self.engine.snapshot();
        if self.engine.phase() == Phase::Idle {
            writeln!(out, "No round running. Type 'start' to play.")?;
            return Ok(());
        }
        write!(out, "{}", render_board(&snapshot))?;
        let remaining = match (self.clock, self.engine.phase()) {
            (Some(clock), Phase::Active) => Some(clock.remaining_secs()),
            (Some(_), Phase::TimedOut) => Some(0),
            _ => None,
        };
        writeln!(out, "{}", render_status(&snapshot, remaining))?;
        Ok(())
    }

    fn print_solution(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let disks = match self.engine.disk_count() {
            0 => *self.config.disks(),
            n => n,
        };
        for step in solve(disks)? {
            writeln!(out, "{:>4}. {}", step.step, step)?;
        }
        Ok(())
    }
}
