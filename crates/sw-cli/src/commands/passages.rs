use comfy_table::{ContentArrangement, Table};
use sw_core::{Passage, StoryConfig};

pub fn run(config: StoryConfig, json: bool) -> Result<(), String> {
    let engine = super::load_story(config)?;
    let registry = engine.registry();

    if json {
        let passages: Vec<&Passage> = registry.iter().collect();
        let out = serde_json::to_string_pretty(&passages)
            .map_err(|e| format!("failed to serialize passages: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    if registry.is_empty() {
        println!("  No passages found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Title", "Choices"]);

    for passage in registry.iter() {
        let choices = if passage.choices.is_empty() {
            "—".to_string()
        } else {
            passage
                .choices
                .iter()
                .map(|c| c.target.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![&passage.name, &passage.title, &choices]);
    }

    println!("{table}");
    println!();
    println!("  {} passages", registry.len());

    Ok(())
}
