use colored::Colorize;
use sw_core::{StoryConfig, StoryEngine};

pub fn run(config: StoryConfig) -> Result<(), String> {
    let engine = super::load_story(config)?;
    let issues = find_issues(&engine);

    if issues.is_empty() {
        let registry = engine.registry();
        let choices: usize = registry.iter().map(|p| p.choices.len()).sum();
        println!(
            "  {}",
            format!(
                "All checks passed: {} passages, {} choices.",
                registry.len(),
                choices
            )
            .green()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("  {} {issue}", "warning:".yellow().bold());
    }
    Err(format!(
        "{} problem{} found",
        issues.len(),
        if issues.len() == 1 { "" } else { "s" }
    ))
}

/// Describe every broken link in the story.
fn find_issues(engine: &StoryEngine) -> Vec<String> {
    let registry = engine.registry();
    let start = &engine.config().start_passage;
    let mut issues = Vec::new();

    if !registry.contains(start) {
        issues.push(format!("start passage '{start}' does not exist"));
    }

    for (passage, choice) in registry.unresolved_choices() {
        issues.push(format!(
            "{}: choice \"{}\" leads to missing passage '{}'",
            passage.name, choice.text, choice.target
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::Choice;

    #[test]
    fn demo_story_has_no_issues() {
        let engine = sw_core::demo::demo_story(StoryConfig::default()).unwrap();
        assert!(find_issues(&engine).is_empty());
    }

    #[test]
    fn reports_missing_start_and_dangling_choices() {
        let mut engine = StoryEngine::default();
        engine
            .registry_mut()
            .create_passage("intro", "Intro", "", [Choice::new("Onward", "void")])
            .unwrap();

        let issues = find_issues(&engine);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("start passage 'start'"));
        assert!(issues[1].contains("intro: choice \"Onward\" leads to missing passage 'void'"));
    }
}
