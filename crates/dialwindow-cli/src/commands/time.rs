use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialwindow_core::time::{to_12_hour, to_24_hour, COMMON_TIMES};
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum TimeCommand {
    /// Convert HH:MM to a 12-hour clock label
    To12(ConvertArgs),
    /// Convert a 12-hour clock label to HH:MM
    To24(ConvertArgs),
    /// List the half-hour picker slots
    Common,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    pub value: String,
}

#[derive(Debug, Serialize)]
struct ConversionDto<'a> {
    input: &'a str,
    output: String,
}

pub fn run(ctx: &Context<'_>, command: TimeCommand) -> Result<()> {
    match command {
        TimeCommand::To12(args) => emit(ctx, &args.value, to_12_hour(&args.value)),
        TimeCommand::To24(args) => emit(ctx, &args.value, to_24_hour(&args.value)),
        TimeCommand::Common => {
            if ctx.json {
                let slots: Vec<ConversionDto<'_>> = COMMON_TIMES
                    .iter()
                    .map(|slot| ConversionDto {
                        input: slot,
                        output: to_24_hour(slot),
                    })
                    .collect();
                print_json(&slots)
            } else {
                for slot in COMMON_TIMES {
                    println!("{:>8}  {}", slot, to_24_hour(slot));
                }
                Ok(())
            }
        }
    }
}

fn emit(ctx: &Context<'_>, input: &str, output: String) -> Result<()> {
    if ctx.json {
        print_json(&ConversionDto { input, output })
    } else {
        println!("{output}");
        Ok(())
    }
}
