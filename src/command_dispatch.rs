//! Purpose: Hold top-level CLI command dispatch for `tradelens`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: `show` emits the planet's item values before its trades.
//! Invariants: Lookups resolve fully before anything is written to stdout.

use super::*;

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "tradelens", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Show { file, planet } => {
            let export = load_export(&file)?;
            let values = export.item_values(&planet)?.clone();
            let trades = export.trades(&planet)?.clone();
            emit_json(values, color_mode);
            emit_json(trades, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Values { file, planet } => {
            let export = load_export(&file)?;
            emit_json(export.item_values(&planet)?.clone(), color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Trades { file, planet } => {
            let export = load_export(&file)?;
            emit_json(export.trades(&planet)?.clone(), color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Planets { file } => {
            let export = load_export(&file)?;
            emit_json(json!(export.planets()), color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Dump { file } => {
            let document = read_document(&file)?;
            emit_json(document, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Encode { file } => {
            let document = read_json_input(&file)?;
            let encoded = encode_document(&document)?;
            println!("{encoded}");
            Ok(RunOutcome::ok())
        }
    }
}
