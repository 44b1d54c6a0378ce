use crate::cli::SampleArgs;
use marketpulse::output::{render_report, write_output};
use marketpulse::report::Report;

pub fn execute(args: SampleArgs) -> anyhow::Result<()> {
    let rendered = render_report(&Report::sample(), args.format)?;
    write_output(&rendered, None)?;
    Ok(())
}
