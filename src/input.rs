use std::io;

use crate::config::ExplorerConfig;
use crate::console::{separator, Console};
use crate::data::filter::FilterSelection;

/// Capitalise the first letter of every word and lower-case the rest.
/// A word starts at any letter not preceded by another letter, so
/// `new york city` becomes `New York City`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Prompt until the answer matches one of `choices`, then return it
/// title-cased.
///
/// An answer matches when its title-cased or lower-cased form (surrounding
/// whitespace ignored) equals a choice, so both `Chicago` and `all` style
/// entries can be listed. Invalid answers are reported and asked again
/// without limit; only a failing console ends the loop early.
pub fn read_choice<C: Console>(
    console: &mut C,
    prompt: &str,
    choices: &[String],
) -> io::Result<String> {
    console.say(prompt)?;
    loop {
        let answer = console.ask("")?;
        let answer = answer.trim();
        let titled = title_case(answer);
        let lowered = answer.to_lowercase();
        if choices.iter().any(|c| *c == titled || *c == lowered) {
            return Ok(titled);
        }
        log::debug!("Rejected input {answer:?}");
        console.say(&format!(
            "Invalid input, please try again from the following: {}",
            choices.join(", ")
        ))?;
    }
}

/// Ask for city, month and day.
pub fn collect_filters<C: Console>(
    console: &mut C,
    config: &ExplorerConfig,
) -> io::Result<FilterSelection> {
    console.say("Hello! Let's explore some US bikeshare data!")?;

    let cities = config.city_names();
    let city = read_choice(
        console,
        &format!(
            "Please choose a city from the following: {} > ",
            cities.join(", ")
        ),
        &cities,
    )?;

    let months = with_all(&config.months);
    let month = read_choice(
        console,
        &format!(
            "Please choose a month from {} through {} or all for no filter > ",
            config.months.first().map(String::as_str).unwrap_or_default(),
            config.months.last().map(String::as_str).unwrap_or_default(),
        ),
        &months,
    )?;

    let days = with_all(&config.days);
    let day = read_choice(
        console,
        "Please choose a day of week or all for no filter > ",
        &days,
    )?;

    console.say(&separator())?;
    Ok(FilterSelection { city, month, day })
}

fn with_all(values: &[String]) -> Vec<String> {
    let mut all = values.to_vec();
    all.push("all".to_string());
    all
}
