mod fragments;
mod points;

use fragments::run_fragments;
use points::run_points;

use anyhow::Result;

use crate::cli::Command;
pub fn dispatch(command: Command, interactive: bool) -> Result<()> {
    match command {
        Command::Fragments(args) => run_fragments(args, interactive),
        Command::Points(args) => run_points(args, interactive),
    }
}
