use anyhow::Result;

use recall_lib::vault::build_link_graph;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let graph = build_link_graph(&app.notes);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
        OutputFormat::Plain => {
            let title = |id: &str| {
                app.note_by_id(id)
                    .map(|n| n.title.clone())
                    .unwrap_or_else(|| id.to_string())
            };

            for edge in &graph.edges {
                println!("{} -> {}", title(&edge.from), title(&edge.to));
            }
            println!("\n{} notes, {} links", graph.nodes.len(), graph.edges.len());
        }
    }

    Ok(())
}
