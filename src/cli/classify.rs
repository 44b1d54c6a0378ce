use crate::cli::ClassifyArgs;

pub fn execute(args: ClassifyArgs) -> anyhow::Result<()> {
    let bucket = args.axis.classify(&args.label);
    let indicator = bucket.indicator();
    println!("{}\t{}", bucket, indicator.icon);
    Ok(())
}
