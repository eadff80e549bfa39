//! "All In", a short gambling-awareness story used by the frontends.
//!
//! The base passages come first, then the authored extension passages are
//! layered on through the same public API any story script would use.

use crate::config::StoryConfig;
use crate::engine::StoryEngine;
use crate::error::StoryResult;
use crate::hook::VisitCounter;
use crate::passage::{Choice, Passage};

/// Build an engine holding the demo story, not yet initialized.
///
/// A [`VisitCounter`] is registered and `passagesVisited` starts at `0`.
/// The counter is live before [`StoryEngine::init`], so showing the start
/// passage already counts as a visit and the first screen reads `1`.
pub fn demo_story(config: StoryConfig) -> StoryResult<StoryEngine> {
    let mut engine = StoryEngine::new(config);
    add_base_passages(&mut engine)?;
    add_extension_passages(&mut engine)?;

    engine.set_variable(VisitCounter::DEFAULT_KEY, 0);
    engine.on_navigate(VisitCounter::default());
    Ok(engine)
}

fn add_base_passages(engine: &mut StoryEngine) -> StoryResult<()> {
    let start = engine.config().start_passage.clone();
    let registry = engine.registry_mut();

    registry.insert(
        Passage::new(
            start.as_str(),
            "All In",
            "<p>It's Friday night. Your phone buzzes: a free bet, just for you.</p>\
             <p>One tap and you're in.</p>",
        )
        .with_choice(Choice::new("Take the free bet", "choice1"))
        .with_choice(Choice::new("Put the phone away", "walk-away")),
    )?;

    registry.insert(
        Passage::new(
            "choice1",
            "Beginner's Luck",
            "<p>You win. The app congratulates you and offers to double it.</p>\
             <p>The feeling is hard to describe, and harder to forget.</p>",
        )
        .with_choice(Choice::new("Double it", "chasing"))
        .with_choice(Choice::new("Cash out", "walk-away")),
    )?;

    registry.insert(
        Passage::new(
            "chasing",
            "Chasing",
            "<p>You lose the doubled stake, then the next one.</p>\
             <p>Winning it back feels like only a matter of time.</p>",
        )
        .with_choice(Choice::new("Find out why it feels that way", "betting-patterns"))
        .with_choice(Choice::new("Start over", start.as_str())),
    )?;

    registry.insert(
        Passage::new(
            "walk-away",
            "Walking Away",
            "<p>You close the app. Tomorrow it will send another offer.</p>",
        )
        .with_choice(Choice::new("Return to start", start.as_str())),
    )?;

    Ok(())
}

fn add_extension_passages(engine: &mut StoryEngine) -> StoryResult<()> {
    let start = engine.config().start_passage.clone();
    let registry = engine.registry_mut();

    registry.create_passage(
        "understanding-odds",
        "Understanding the Odds",
        "<p>Most people don't realize that gambling odds are designed to favor the house.</p>\
         <p>For example, in roulette, even when you bet on red or black, the house edge is \
         about 5.26% due to the green zero slots.</p>",
        [
            Choice::new("Learn about slot machines", "slot-machines"),
            Choice::new("Return to start", start.as_str()),
        ],
    )?;

    registry.create_passage(
        "slot-machines",
        "The Truth About Slot Machines",
        "<p>Slot machines are programmed with a Return to Player (RTP) rate, typically \
         around 90-95%.</p>\
         <p>This means for every $100 wagered, the machine returns $90-95 on average, \
         keeping $5-10.</p>\
         <p>The random number generator ensures the house always wins in the long run.</p>",
        [
            Choice::new("Learn about betting patterns", "betting-patterns"),
            Choice::new("Back to understanding odds", "understanding-odds"),
        ],
    )?;

    registry.create_passage(
        "betting-patterns",
        "Common Betting Patterns",
        "<p>Many gamblers fall into the \"gambler's fallacy\" - believing past events \
         affect future outcomes.</p>\
         <p>For example, thinking that after 5 red spins, black is \"due\" to come up. \
         Each spin is independent.</p>",
        [
            Choice::new("Learn about resources", "resources"),
            Choice::new("Start over", start.as_str()),
        ],
    )?;

    registry.create_passage(
        "resources",
        "Getting Help",
        "<p>If you or someone you know has a gambling problem, help is available:</p>\
         <ul>\
         <li>National Problem Gambling Helpline: 1-800-522-4700</li>\
         <li>Gamblers Anonymous: www.gamblersanonymous.org</li>\
         <li>National Council on Problem Gambling: www.ncpgambling.org</li>\
         </ul>",
        [Choice::new("Return to start", start.as_str())],
    )?;

    registry.add_choice("choice1", "Learn about gambling odds", "understanding-odds")?;
    registry.add_choice("choice1", "Find resources for help", "resources")?;

    Ok(())
}
