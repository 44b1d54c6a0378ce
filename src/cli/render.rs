use crate::cli::{read_input, RenderArgs};
use marketpulse::markup::{render_blocks, Block, Span};

pub fn execute(args: RenderArgs) -> anyhow::Result<()> {
    let text = read_input(args.file.as_deref())?;
    for block in render_blocks(&text) {
        println!("{}", describe(&block));
    }
    Ok(())
}

/// One line per block, e.g. `h1: Title` or `li: *Key:* value`
fn describe(block: &Block<'_>) -> String {
    let kind = match block {
        Block::Heading { level, .. } => format!("h{}", level),
        Block::BulletItem(_) => "li".to_string(),
        Block::NumberedItem(_) => "ol".to_string(),
        Block::Blank => return "blank".to_string(),
        Block::Paragraph(_) => "p".to_string(),
    };
    let text: String = block
        .spans()
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.to_string(),
            Span::Emphasis(text) => format!("*{}*", text),
        })
        .collect();
    format!("{}: {}", kind, text)
}
