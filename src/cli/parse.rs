use crate::cli::{read_input, ParseArgs};
use marketpulse::output::{render_report, write_output};
use marketpulse::report::normalize_text;

pub fn execute(args: ParseArgs) -> anyhow::Result<()> {
    let raw = read_input(args.file.as_deref())?;
    let report = normalize_text(&raw);
    let rendered = render_report(&report, args.format)?;
    write_output(&rendered, args.output.as_deref())?;
    Ok(())
}
