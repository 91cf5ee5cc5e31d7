//! Show command implementation

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::package::archive;
use crate::ui;

pub fn run(args: ShowArgs) -> Result<()> {
    let summary = archive::inspect(&args.archive)?;

    if args.json {
        println!("{}", ui::to_json(&summary.definition)?);
    } else {
        print!("{}", ui::display::format_archive(&summary, args.files));
    }

    Ok(())
}
