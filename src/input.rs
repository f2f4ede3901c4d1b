//! Raw-mode terminal input adapter
//!
//! Translates stdin bytes into logical game commands. A reader thread feeds
//! an mpsc channel; `poll` drains it into a bounded buffer and decodes arrow
//! key escape sequences, the pause/restart toggle, difficulty digits and
//! quit. Everything else is discarded - the simulation never sees raw keys.

use std::io;
use std::io::Read;
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;

use circular_buffer::CircularBuffer;
use termios::{ECHO, ICANON, TCSANOW, Termios, tcsetattr};

use crate::sim::Direction;

/// Pending bytes not yet decoded (escape sequences can arrive split)
type InputBuffer = CircularBuffer<64, u8>;

const STDIN_FD: i32 = 0;
const ESC: u8 = 0x1b;

/// A decoded input command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePauseOrRestart,
    SetDifficulty(u8),
    Quit,
}

/// Owns the raw-mode terminal state and the stdin reader thread. Dropping it
/// restores the original terminal settings.
pub struct InputAdapter {
    rx: Receiver<u8>,
    buf: InputBuffer,
    original: Termios,
}

impl InputAdapter {
    /// Switch stdin to non-canonical, no-echo mode and start the reader
    /// thread.
    pub fn new() -> io::Result<Self> {
        let original = Termios::from_fd(STDIN_FD)?;
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN_FD, TCSANOW, &raw)?;

        Ok(Self {
            rx: spawn_stdin_channel(),
            buf: InputBuffer::new(),
            original,
        })
    }

    /// Drain everything the reader thread has seen and decode it. Never
    /// blocks.
    pub fn poll(&mut self) -> Vec<Command> {
        loop {
            match self.rx.try_recv() {
                Ok(byte) => {
                    // A full buffer means the player is mashing keys faster
                    // than we decode; drop the overflow.
                    if !self.buf.is_full() {
                        self.buf.push_back(byte);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        drain_commands(&mut self.buf)
    }
}

impl Drop for InputAdapter {
    fn drop(&mut self) {
        let _ = tcsetattr(STDIN_FD, TCSANOW, &self.original);
    }
}

fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut stdin = io::stdin();
        let mut byte = [0u8; 1];
        loop {
            if stdin.read_exact(&mut byte).is_err() {
                break;
            }
            if tx.send(byte[0]).is_err() {
                break;
            }
        }
    });
    rx
}

/// Decode as many complete commands as the buffer holds. A partial escape
/// sequence at the end stays buffered for the next poll.
fn drain_commands(buf: &mut InputBuffer) -> Vec<Command> {
    let mut commands = Vec::new();
    while let Some(&first) = buf.front() {
        match first {
            b' ' => {
                buf.pop_front();
                commands.push(Command::TogglePauseOrRestart);
            }
            b'1'..=b'3' => {
                buf.pop_front();
                commands.push(Command::SetDifficulty(first - b'0'));
            }
            b'q' | b'Q' => {
                buf.pop_front();
                commands.push(Command::Quit);
            }
            ESC => {
                // Arrow keys are ESC '[' letter
                if buf.len() < 3 {
                    break;
                }
                let second = buf.nth_front(1).copied();
                let third = buf.nth_front(2).copied();
                if second == Some(b'[') {
                    let dir = match third {
                        Some(b'A') => Some(Direction::Up),
                        Some(b'B') => Some(Direction::Down),
                        Some(b'C') => Some(Direction::Right),
                        Some(b'D') => Some(Direction::Left),
                        _ => None,
                    };
                    buf.pop_front();
                    buf.pop_front();
                    buf.pop_front();
                    if let Some(dir) = dir {
                        commands.push(Command::Turn(dir));
                    }
                } else {
                    buf.pop_front();
                }
            }
            _ => {
                buf.pop_front();
            }
        }
    }
    commands
}
