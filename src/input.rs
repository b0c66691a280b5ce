// raw stdin bytes are collected in a ring buffer and decoded into commands.
// arrow keys arrive as 3 bytes: ESC (27), '[' (91) and one of A/B/C/D
use circular_buffer::CircularBuffer;

use crate::grid::Direction;

type InputBuffer = CircularBuffer<1024, u8>; // 1024 bytes in input buffer

const ESC: u8 = 27;
const BRACKET: u8 = 91;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
}

#[derive(Debug)]
pub struct InputDecoder {
    buffer: InputBuffer,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self {
            buffer: InputBuffer::new(),
        }
    }

    pub fn push(&mut self, key: u8) {
        match key {
            ESC | BRACKET | b'A'..=b'D' | b'p' | b'P' | b' ' | b'r' | b'R' | b'q' | b'Q' => {
                // if the buffer is full, ignore the input
                if self.buffer.is_full() {
                    return;
                }
                self.buffer.push_back(key);
            }
            _ => {
                // not a key we react to
            }
        }
    }

    /// Next complete command in the buffer. An arrow sequence that has only
    /// partly arrived stays buffered until the rest comes in.
    pub fn next_command(&mut self) -> Option<Command> {
        while let Some(&key) = self.buffer.front() {
            let command = match key {
                ESC => match (self.buffer.nth_front(1), self.buffer.nth_front(2)) {
                    // wait for the rest of a possible arrow sequence
                    (None, _) | (Some(&BRACKET), None) => return None,
                    (Some(&BRACKET), Some(&third)) => match arrow(third) {
                        Some(direction) => {
                            self.buffer.pop_front();
                            self.buffer.pop_front();
                            self.buffer.pop_front();
                            return Some(Command::Turn(direction));
                        }
                        None => None,
                    },
                    // a lone escape, drop it and read on
                    _ => None,
                },
                b'p' | b'P' | b' ' => Some(Command::TogglePause),
                b'r' | b'R' => Some(Command::Restart),
                b'q' | b'Q' => Some(Command::Quit),
                _ => None,
            };
            // remove head of the buffer
            self.buffer.pop_front();
            if command.is_some() {
                return command;
            }
        }
        None
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn arrow(key: u8) -> Option<Direction> {
    match key {
        b'A' => Some(Direction::Up),
        b'B' => Some(Direction::Down),
        b'C' => Some(Direction::Right),
        b'D' => Some(Direction::Left),
        _ => None,
    }
}
