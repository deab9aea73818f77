//! Mode 2: hand-pick recipients by display name and send coupons

use std::io::BufRead;

use chrono::NaiveDate;
use tracing::info;

use crate::commands::prompt_line;
use crate::dispatch::{build_message, Dispatcher, PREVIEW_CODE, PREVIEW_LINK};
use crate::error::Result;
use crate::store::Person;

/// Birthday used for dispatch in manual mode; only relevant when no
/// custom text is given.
pub const PLACEHOLDER_BIRTHDAY: &str = "01/01/2000";

/// Outcome of one display-name prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// User typed NONE: abort the whole run
    Abort,
    /// User typed DONE: selection finished
    Done,
    /// No person with that display name
    NotFound,
    /// Person exists but was already messaged
    AlreadySent(Person),
    /// Valid recipient
    Selected(Person),
}

/// Resolve one line of input against the people store.
pub fn resolve_selection(people: &[Person], input: &str) -> Selection {
    let input = input.trim();
    if input.eq_ignore_ascii_case("none") {
        return Selection::Abort;
    }
    if input.eq_ignore_ascii_case("done") {
        return Selection::Done;
    }

    match people.iter().find(|p| p.display_name == input) {
        None => Selection::NotFound,
        Some(person) if person.is_sent() => Selection::AlreadySent(person.clone()),
        Some(person) => Selection::Selected(person.clone()),
    }
}

/// Prompt for display names until DONE or NONE. Returns None on abort.
pub fn collect_recipients<R: BufRead>(
    people: &[Person],
    input: &mut R,
) -> Result<Option<Vec<Person>>> {
    let mut selected = Vec::new();

    loop {
        let line = prompt_line(
            input,
            "Which user do you want to send coupons to? \
             Enter a Slack Display Name (or type DONE to finish, NONE to abort): ",
        )?;

        match resolve_selection(people, &line) {
            Selection::Abort => {
                println!("Aborted by user.");
                return Ok(None);
            }
            Selection::Done => break,
            Selection::NotFound => println!("No match found. Please try again."),
            Selection::AlreadySent(person) => println!(
                "{} has already been sent a birthday message. Skipping.",
                person.display_name
            ),
            Selection::Selected(person) => {
                println!("Found: {} (ID: {})", person.display_name, person.slack_id);
                selected.push(person);
            }
        }
    }

    Ok(Some(selected))
}

/// Run the manual mode: select, customize, preview, dispatch.
/// Manual sends never flip the sent flag.
pub async fn run<R: BufRead>(
    dispatcher: &mut Dispatcher,
    people: &[Person],
    today: NaiveDate,
    input: &mut R,
) -> Result<()> {
    let Some(selected) = collect_recipients(people, input)? else {
        return Ok(());
    };

    if selected.is_empty() {
        println!("No valid users entered.");
        return Ok(());
    }

    let custom_line = prompt_line(input, "Enter a custom message for the birthday greeting: ")?;
    let custom_text = if custom_line.is_empty() {
        None
    } else {
        Some(custom_line)
    };

    println!("Message preview:");
    for person in &selected {
        let preview = build_message(
            dispatcher.translations(),
            &person.locale,
            &person.slack_id,
            &person.birthday,
            PREVIEW_LINK,
            PREVIEW_CODE,
            custom_text.as_deref(),
            today,
        );
        println!("{}", preview);
        println!("-");
    }

    println!(
        "The following {} birthday messages will be sent:",
        selected.len()
    );
    for person in &selected {
        println!(" - {} ({})", person.display_name, person.birthday);
    }

    info!(count = selected.len(), "Dispatching manual coupon sends");
    for person in &selected {
        dispatcher
            .send_birthday_message(
                person,
                PLACEHOLDER_BIRTHDAY,
                custom_text.as_deref(),
                today,
                false,
            )
            .await?;
    }

    dispatcher.report_invalid_users();
    Ok(())
}
