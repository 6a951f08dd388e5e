use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use rust_i18n::t;

use wordform::app::App;
use wordform::session::{HintType, SessionSummary, Status, selectors};

fn lang(app: &App) -> &str {
    &app.config.locale
}

pub fn help() {
    println!("{}", t!("session.help"));
}

/// Progress line, block name and the prompt for the current case.
pub fn case_header(app: &App) -> Result<()> {
    let state = app.state();
    let progress = selectors::progress(state);
    let Some(case) = selectors::current_case(state) else {
        return Ok(());
    };

    println!();
    if let Some(block) = selectors::current_block(state) {
        println!(
            "{} {}",
            t!("session.progress", current = progress.current, total = progress.total),
            t!("session.block", name = &block.name)
        );
    }
    for hint_type in HintType::ALL {
        if let Some(text) = selectors::visible_hint(state, hint_type, lang(app)) {
            println!("  {}", hint_line(hint_type, text));
        }
    }
    prompt(&case.prompt)
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", t!("session.prompt", prompt = text));
    io::stdout().flush()?;
    Ok(())
}

fn hint_line(hint_type: HintType, text: &str) -> String {
    match hint_type {
        HintType::Name => t!("session.hint_name", text = text).to_string(),
        HintType::Prompt => t!("session.hint_prompt", text = text).to_string(),
        HintType::Additional => t!("session.hint_additional", text = text).to_string(),
    }
}

pub fn hint(app: &App, hint_type: HintType) -> Result<()> {
    let state = app.state();
    if !state.hints.is_shown(hint_type) {
        println!("{}", t!("session.hint_hidden"));
    } else if let Some(text) = selectors::visible_hint(state, hint_type, lang(app)) {
        println!("{}", hint_line(hint_type, text));
    } else {
        println!("{}", t!("session.no_hint"));
    }
    reprompt(app)
}

fn reprompt(app: &App) -> Result<()> {
    match selectors::current_case(app.state()) {
        Some(case) if app.state().status != Status::Completed => prompt(&case.prompt),
        _ => Ok(()),
    }
}

fn revealed(app: &App) -> Option<String> {
    selectors::revealed_answers(app.state()).map(|answers| answers.join(" / "))
}

/// Response to a submitted answer that did not move the cursor.
pub fn feedback(app: &App, now: Instant) -> Result<()> {
    let state = app.state();
    match state.status {
        Status::CorrectAnswer => {
            println!("{}", t!("session.correct"));
            match app.auto_advance_deadline() {
                Some(deadline) => {
                    let secs = deadline.saturating_duration_since(now).as_secs_f64();
                    println!("{}", t!("session.next_in", secs = format!("{secs:.1}")));
                }
                None => println!("{}", t!("session.press_enter")),
            }
        }
        Status::WrongAnswer | Status::RequireCorrection | Status::RequireContinue => {
            println!("{}", t!("session.wrong"));
            if !state.original_user_answer.is_empty() {
                println!("  {}", t!("session.your_answer", answer = &state.original_user_answer));
            }
            if let Some(answers) = revealed(app) {
                println!("  {}", t!("session.answer_was", answers = answers));
            }
            match state.status {
                Status::RequireCorrection => {
                    println!("{}", t!("session.retype"));
                    return reprompt(app);
                }
                Status::RequireContinue => println!("{}", t!("session.press_enter")),
                _ => {
                    println!("{}", t!("session.try_again_or_skip"));
                    return reprompt(app);
                }
            }
        }
        Status::WaitingInput | Status::Completed => {}
    }
    Ok(())
}

pub fn notice(app: &App, message: &str) -> Result<()> {
    println!("{message}");
    reprompt(app)
}

pub fn summary(summary: &SessionSummary) {
    println!();
    if summary.completed {
        println!("{}", t!("summary.title", title = &summary.exercise_title));
    } else {
        println!("{}", t!("summary.abandoned", title = &summary.exercise_title));
    }
    println!(
        "{}",
        t!(
            "summary.score",
            correct = summary.correct,
            incorrect = summary.incorrect,
            accuracy = summary.accuracy
        )
    );
    println!(
        "{}",
        t!("summary.time", secs = format!("{:.0}", summary.elapsed_secs))
    );
}
