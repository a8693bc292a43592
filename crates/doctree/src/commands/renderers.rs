//! Renderers command - list registered renderers.

use clap::Args;

use crate::render::renderers;

#[derive(Args)]
pub struct RenderersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RenderersArgs) -> i32 {
    let list = renderers();
    if args.json {
        let entries: Vec<_> = list
            .iter()
            .map(|r| serde_json::json!({ "name": r.name(), "extension": r.extension() }))
            .collect();
        println!("{}", serde_json::Value::Array(entries));
    } else {
        for renderer in list {
            println!("{:<12} .{}", renderer.name(), renderer.extension());
        }
    }
    0
}
