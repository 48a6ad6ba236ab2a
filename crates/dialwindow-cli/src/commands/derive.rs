use crate::commands::{print_json, Context};
use crate::util::parse_date_arg;
use anyhow::Result;
use clap::Args;
use dialwindow_core::dto::DerivedWeekdaysDto;
use dialwindow_core::rules::weekdays_in_range;

#[derive(Debug, Args)]
pub struct DeriveArgs {
    #[arg(long, value_name = "DATE")]
    pub start: String,
    #[arg(long, value_name = "DATE")]
    pub end: String,
}

pub fn derive_weekdays(ctx: &Context<'_>, args: DeriveArgs) -> Result<()> {
    let start_date = parse_date_arg("--start", &args.start)?;
    let end_date = parse_date_arg("--end", &args.end)?;
    let set = weekdays_in_range(start_date, end_date);

    if ctx.json {
        print_json(&DerivedWeekdaysDto {
            start_date,
            end_date,
            weekdays: set.days(),
            indices: set.indices(),
        })?;
    } else if set.is_empty() {
        println!("no weekdays");
    } else {
        let names: Vec<&str> = set.days().into_iter().map(|day| day.as_str()).collect();
        println!("{}", names.join(" "));
    }
    Ok(())
}
