//! Line-based play session on stdin/stdout.

use std::io::{self, BufRead, Write};

use serde_json::Value;
use sw_core::{StoryConfig, StoryEngine, StoryResult};
use sw_tui::shared::plain_text;

const INTRO: &str = "Storyweave\nType a number to choose, 'help' for commands.";

const HELP: &str = "\
Commands:
  <number>        Choose a choice on the current passage
  go <passage>    Jump straight to a passage
  look            Show the current passage again
  set <key> <v>   Set a variable (JSON or plain text)
  get <key>       Show a variable
  vars            Show all variables
  history         Show visited passages
  restart         Start the story over
  quit            Leave the story";

/// Result of one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Text(String),
    Quit,
}

pub fn run(config: StoryConfig) -> Result<(), String> {
    let mut engine = super::load_story(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(&mut engine, stdin.lock(), stdout.lock()).map_err(|e| format!("I/O error: {e}"))
}

/// Run a session until `quit` or end of input.
fn session(engine: &mut StoryEngine, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "{INTRO}")?;
    writeln!(out)?;
    match engine.init() {
        Ok(()) => writeln!(out, "{}", describe(engine))?,
        Err(e) => writeln!(out, "Error: {e}")?,
    }

    for line in input.lines() {
        let line = line?;
        match process(engine, &line) {
            Ok(Outcome::Quit) => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            Ok(Outcome::Text(text)) if text.is_empty() => {}
            Ok(Outcome::Text(text)) => writeln!(out, "{text}")?,
            Err(e) => writeln!(out, "Error: {e}")?,
        }
    }
    out.flush()
}

/// Process a line of user input.
fn process(engine: &mut StoryEngine, input: &str) -> StoryResult<Outcome> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Outcome::Text(String::new()));
    }

    if let Ok(n) = trimmed.parse::<usize>() {
        if n == 0 {
            return Ok(Outcome::Text("Choices are numbered from 1.".to_string()));
        }
        engine.click_choice(n - 1)?;
        return Ok(Outcome::Text(describe(engine)));
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

    let text = match cmd.as_str() {
        "go" if !rest.is_empty() => {
            engine.show_passage(rest)?;
            describe(engine)
        }
        "look" | "l" => describe(engine),
        "set" => do_set(engine, rest),
        "get" if !rest.is_empty() => match engine.variable(rest) {
            Some(value) => format!("{rest} = {value}"),
            None => format!("{rest} is not set."),
        },
        "vars" => {
            let vars = engine.variables().sorted();
            if vars.is_empty() {
                "No variables set.".to_string()
            } else {
                vars.iter()
                    .map(|(k, v)| format!("  {k} = {v}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        "history" => engine
            .history()
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{:>3}. {name}", i + 1))
            .collect::<Vec<_>>()
            .join("\n"),
        "restart" => {
            engine.restart()?;
            format!("Story restarted.\n\n{}", describe(engine))
        }
        "help" | "?" => HELP.to_string(),
        "quit" | "q" | "exit" => return Ok(Outcome::Quit),
        _ => format!("Unknown command: {trimmed}. Type 'help' for commands."),
    };
    Ok(Outcome::Text(text))
}

fn do_set(engine: &mut StoryEngine, rest: &str) -> String {
    let mut parts = rest.splitn(2, ' ');
    let (Some(key), Some(raw)) = (parts.next(), parts.next()) else {
        return "usage: set <key> <value>".to_string();
    };
    let raw = raw.trim();
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    let shown = value.to_string();
    engine.set_variable(key, value);
    format!("{key} = {shown}")
}

/// Render the passage on display with its numbered choices.
fn describe(engine: &StoryEngine) -> String {
    let Some(passage) = engine.current() else {
        return "No passage on display.".to_string();
    };

    let mut output = format!("== {} ==\n", passage.title);
    for line in plain_text(&passage.content) {
        output.push_str(&line);
        output.push('\n');
    }

    output.push('\n');
    if passage.choices.is_empty() {
        output.push_str("(no choices)");
    } else {
        let choices: Vec<String> = passage
            .choices
            .iter()
            .enumerate()
            .map(|(i, c)| format!("  [{}] {}", i + 1, c.text))
            .collect();
        output.push_str(&choices.join("\n"));
    }
    output
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use serde_json::json;
    use sw_core::StoryError;

    use super::*;

    fn engine() -> StoryEngine {
        let mut engine = sw_core::demo::demo_story(StoryConfig::default()).unwrap();
        engine.init().unwrap();
        engine
    }

    fn text(outcome: Outcome) -> String {
        match outcome {
            Outcome::Text(t) => t,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn number_chooses() {
        let mut engine = engine();
        let out = text(process(&mut engine, "1").unwrap());
        assert!(out.starts_with("== Beginner's Luck =="));
        assert!(out.contains("[4] Find resources for help"));
        assert_eq!(engine.current_passage(), "choice1");
    }

    #[test]
    fn out_of_range_choice() {
        let mut engine = engine();
        let err = process(&mut engine, "7").unwrap_err();
        assert_eq!(err, StoryError::InvalidChoice(6));
        assert_eq!(err.to_string(), "invalid choice: 7");

        let out = text(process(&mut engine, "0").unwrap());
        assert_eq!(out, "Choices are numbered from 1.");
        assert_eq!(engine.history(), ["start"]);
    }

    #[test]
    fn go_to_missing_passage() {
        let mut engine = engine();
        let err = process(&mut engine, "go nowhere").unwrap_err();
        assert_eq!(err, StoryError::PassageNotFound("nowhere".to_string()));
        assert_eq!(engine.current_passage(), "start");
    }

    #[test]
    fn set_parses_json_or_text() {
        let mut engine = engine();
        assert_eq!(text(process(&mut engine, "set x 5").unwrap()), "x = 5");
        assert_eq!(engine.variable("x"), Some(&json!(5)));

        process(&mut engine, "set name Ada Lovelace").unwrap();
        assert_eq!(engine.variable("name"), Some(&json!("Ada Lovelace")));

        assert_eq!(text(process(&mut engine, "get x").unwrap()), "x = 5");
        assert_eq!(text(process(&mut engine, "get y").unwrap()), "y is not set.");
        assert!(text(process(&mut engine, "set lonely").unwrap()).starts_with("usage"));
    }

    #[test]
    fn history_and_restart() {
        let mut engine = engine();
        process(&mut engine, "1").unwrap();
        let history = text(process(&mut engine, "history").unwrap());
        assert_eq!(history, "  1. start\n  2. choice1");

        let out = text(process(&mut engine, "restart").unwrap());
        assert!(out.starts_with("Story restarted."));
        assert_eq!(engine.history(), ["start"]);
    }

    #[test]
    fn unknown_and_quit() {
        let mut engine = engine();
        let out = text(process(&mut engine, "dance").unwrap());
        assert!(out.contains("Unknown command: dance"));
        assert_eq!(process(&mut engine, "quit").unwrap(), Outcome::Quit);
    }

    #[test]
    fn full_session() {
        let mut engine = sw_core::demo::demo_story(StoryConfig::default()).unwrap();
        let input = Cursor::new("1\n3\nvars\ngo void\nquit\n1\n");
        let mut out = Vec::new();
        session(&mut engine, input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("== All In =="));
        assert!(out.contains("== Understanding the Odds =="));
        assert!(out.contains("passagesVisited = 3"));
        assert!(out.contains("Error: passage not found: void"));
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(engine.current_passage(), "understanding-odds");
    }
}
