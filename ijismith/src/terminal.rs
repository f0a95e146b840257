//! Terminal input and output for the interactive session.

use async_trait::async_trait;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use ijismith_core::catalog::display_name;
use ijismith_core::{CatalogEntry, LineSource, ModelPicker};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const TITLE: &str = r"
  _    _  _                  _  _    _
 (_)  (_)(_) ___  _ __ ___  (_)| |_ | |__
 | |  | || |/ __|| '_ ` _ \ | || __|| '_ \
 | |  | || |\__ \| | | | | || || |_ | | | |
 |_| _/ ||_||___/|_| |_| |_||_| \__||_| |_|
    |__/
";

/// Print the title, greeting and usage hint.
pub fn print_banner(model: &str) {
    println!("{}", style(TITLE).magenta().bold());
    println!("{}", style("Greetings, traveler.").blue().bright());
    println!("{}", style("I am Iji, the forger of game worlds.").blue().bright());
    println!("{}", style("Forge your game world from a single idea.").blue().bright());
    println!(
        "{}",
        style(format!("Current model: {}", display_name(model))).dim()
    );
    println!(
        "{}",
        style("Type your game idea and press Enter. Type \"exit\" to quit and \"model\" to select a model").dim()
    );
}

/// Reads session lines from stdin, showing a prompt before each one.
pub struct StdinLines {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinLines {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSource for StdinLines {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        print!("{} ", style(">").blue());
        io::stdout().flush()?;
        self.lines.next_line().await
    }
}

/// Arrow-key model menu. Escape or `q` cancels.
pub struct MenuPicker;

impl ModelPicker for MenuPicker {
    fn pick(&mut self, catalog: &[CatalogEntry], current: Option<usize>) -> io::Result<Option<usize>> {
        let names: Vec<&str> = catalog.iter().map(|entry| entry.name).collect();

        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a model")
            .items(&names)
            .default(current.unwrap_or(0))
            .interact_opt()
            .map_err(io::Error::other)
    }
}
