// the game loop: drain stdin, apply commands, tick when the interval has
// elapsed and redraw whenever something changed
use std::io::{self, Write};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::game::{GameState, TickOutcome};
use crate::input::{Command, InputDecoder};
use crate::render::render;
use crate::storage::{BestScoreStore, StorageError};
use crate::terminal::{clear_screen, spawn_stdin_channel, RawMode};

const POLL_INTERVAL: Duration = Duration::from_millis(3);

pub struct App {
    config: AppConfig,
    state: GameState,
    store: BestScoreStore,
    saved_best: u32,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let store = BestScoreStore::new(&config.storage.best_score_path);
        let best_score = store.load_or_default();
        log::info!("Loaded best score {} from {}", best_score, store.path().display());
        let state = GameState::new(&config.game, best_score);
        App {
            config,
            state,
            store,
            saved_best: best_score,
        }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        let result = {
            let _raw = RawMode::enable()?;
            let input = spawn_stdin_channel();
            self.game_loop(&input)
        };
        // the terminal is restored by now
        self.state.record_best_score();
        let saved = self.persist_best_score();
        self.display_final_screen();
        result?;
        saved?;
        Ok(())
    }

    fn game_loop(&mut self, input: &Receiver<u8>) -> Result<(), AppError> {
        let mut decoder = InputDecoder::new();
        let mut out = io::stdout();
        let mut frame_start_time = Instant::now();
        self.draw(&mut out)?;
        loop {
            let mut redraw = false;
            // receive everything typed since the last pass
            loop {
                match input.try_recv() {
                    Ok(key) => decoder.push(key),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return Err(AppError::InputClosed),
                }
            }
            while let Some(command) = decoder.next_command() {
                match command {
                    Command::Quit => return Ok(()),
                    Command::Turn(direction) => {
                        if !self.state.turn(direction) {
                            log::trace!("Ignored turn {:?}", direction);
                        }
                    }
                    Command::TogglePause => {
                        self.state.toggle_pause();
                        frame_start_time = Instant::now();
                        redraw = true;
                    }
                    Command::Restart => {
                        self.state.restart();
                        if let Err(e) = self.persist_best_score() {
                            log::warn!("Failed to save best score: {}", e);
                        }
                        frame_start_time = Instant::now();
                        redraw = true;
                    }
                }
            }

            let interval = self.config.speed.tick_interval_ms(self.state.score());
            if frame_start_time.elapsed() >= Duration::from_millis(interval) {
                frame_start_time = Instant::now();
                match self.state.tick() {
                    TickOutcome::Idle => {}
                    TickOutcome::Moved | TickOutcome::Ate => redraw = true,
                    TickOutcome::Ended(_) => {
                        if let Err(e) = self.persist_best_score() {
                            log::warn!("Failed to save best score: {}", e);
                        }
                        redraw = true;
                    }
                }
            }

            if redraw {
                self.draw(&mut out)?;
            } else {
                std::thread::sleep(POLL_INTERVAL);
            }
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        clear_screen(out)?;
        write!(out, "{}", render(&self.state))?;
        out.flush()
    }

    /// Writes the best score to disk when it went up since the last save
    fn persist_best_score(&mut self) -> Result<(), StorageError> {
        let best = self.state.best_score();
        if best > self.saved_best {
            self.store.save(best)?;
            self.saved_best = best;
        }
        Ok(())
    }

    fn display_final_screen(&self) {
        println!("Final Score: {}", self.state.score());
        println!("Best Score: {}", self.state.best_score());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn best_score_is_saved_when_it_goes_up() {
        let path = std::env::temp_dir().join(format!("termsnake-app-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        let mut config = AppConfig::default();
        config.storage.best_score_path = path.clone();

        let mut app = App::new(config.clone());
        assert_eq!(app.state.best_score(), 0);
        app.persist_best_score().unwrap();
        assert!(!path.exists());

        app.state = GameState::new(&config.game, 5);
        app.persist_best_score().unwrap();
        assert_eq!(App::new(config).state.best_score(), 5);

        fs::remove_file(&path).unwrap();
    }
}
