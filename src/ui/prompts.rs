//! Interactive prompts.

use console::Term;
use dialoguer::{Confirm, Input};

use crate::error::{Result, ShellError};

use super::{parse_confirm, Prompt, PromptResult, PromptType};

/// Convert dialoguer errors to ShellError.
fn map_dialoguer_err(e: dialoguer::Error) -> ShellError {
    ShellError::Io(e.into())
}

/// Question text with the allowed answers and default appended.
pub fn format_question(prompt: &Prompt) -> String {
    match (&prompt.prompt_type, &prompt.default) {
        (PromptType::Choice { options }, Some(default)) => {
            format!("{} ({}) [{}]", prompt.question, options.join("/"), default)
        }
        (PromptType::Choice { options }, None) => {
            format!("{} ({})", prompt.question, options.join("/"))
        }
        _ => prompt.question.clone(),
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Choice { options } => prompt_choice(prompt, options, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt.default.as_deref().map(parse_confirm).unwrap_or(true);

    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let input = Input::<String>::new()
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    Ok(PromptResult::String(result))
}

fn prompt_choice(prompt: &Prompt, options: &[String], term: &Term) -> Result<PromptResult> {
    let allowed: Vec<String> = options.iter().map(|o| o.to_lowercase()).collect();
    let mut input = Input::<String>::new()
        .with_prompt(format_question(prompt))
        .show_default(false)
        .validate_with(move |answer: &String| -> std::result::Result<(), String> {
            if allowed.contains(&answer.to_lowercase()) {
                Ok(())
            } else {
                Err(format!("Please answer one of: {}", allowed.join(", ")))
            }
        });

    if let Some(default) = &prompt.default {
        input = input.default(default.clone());
    }

    let answer = input.interact_on(term).map_err(map_dialoguer_err)?;
    Ok(PromptResult::String(answer.to_lowercase()))
}
