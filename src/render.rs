// the board is drawn two terminal columns per cell so cells look square
use colored::Colorize;
use rand::Rng;
use std::fmt::Write;

use crate::game::{EndReason, GameState, GameStatus};
use crate::grid::Cell;

const CONTROLS: &str = "arrows: move   p: pause   r: restart   q: quit";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Head,
    Body,
    Food,
}

/// Draws the whole screen for the current state
pub fn render<R: Rng>(game: &GameState<R>) -> String {
    let size = game.grid().size();
    let tiles = tiles(game);
    let mut out = String::new();

    // score board
    let _ = writeln!(out, "{}    Best Score : {}", "Snake Game".bold(), game.best_score());
    let _ = writeln!(out, "              Your Score : {}", game.score());

    //border up
    out.push('▗');
    for _ in 0..size {
        out.push_str("▄▄");
    }
    out.push_str("▖\n");
    for y in 0..size {
        out.push('▐');
        for x in 0..size {
            match tiles[(y * size + x) as usize] {
                Tile::Empty => out.push_str("  "),
                Tile::Head => out.push_str(&"Ӫ ".yellow().to_string()),
                Tile::Body => out.push_str(&"⏺ ".green().to_string()),
                Tile::Food => out.push_str(&"♦ ".red().to_string()),
            }
        }
        out.push_str("▌\n");
    }
    //border down
    out.push('▝');
    for _ in 0..size {
        out.push_str("▀▀");
    }
    out.push_str("▘\n");

    match game.status() {
        GameStatus::Running => {}
        GameStatus::Paused => {
            let _ = writeln!(out, "{}", "Paused - press p to continue".yellow().bold());
        }
        GameStatus::Over(reason) => game_over_panel(&mut out, game, reason),
    }
    let _ = writeln!(out, "{}", CONTROLS.dimmed());
    out
}

fn game_over_panel<R: Rng>(out: &mut String, game: &GameState<R>, reason: EndReason) {
    let title = match reason {
        EndReason::BoardFull => "You Win!",
        EndReason::Wall | EndReason::SelfCollision => "Game Over",
    };
    let _ = writeln!(out, "{}", title.red().bold());
    let _ = writeln!(out, "Your score : {}", game.score());
    let label = if game.is_new_record() { "New Record" } else { "Best Score" };
    let _ = writeln!(out, "{} : {}", label, game.best_score());
    let _ = writeln!(out, "Press r to play again");
}

fn tiles<R: Rng>(game: &GameState<R>) -> Vec<Tile> {
    let size = game.grid().size();
    let mut tiles = vec![Tile::Empty; game.grid().cell_count()];
    let index = |cell: &Cell| (cell.y * size + cell.x) as usize;

    let food = game.food();
    if game.grid().contains(&food) {
        tiles[index(&food)] = Tile::Food;
    }
    for segment in game.snake().segments() {
        tiles[index(segment)] = Tile::Body;
    }
    tiles[index(&game.snake().head())] = Tile::Head;
    tiles
}
