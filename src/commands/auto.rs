//! Mode 1: scan for eligible birthdays and send after confirmation

use std::io::BufRead;

use chrono::NaiveDate;
use tracing::info;

use crate::commands::{confirmed, prompt_line};
use crate::dispatch::Dispatcher;
use crate::eligibility::{eligible_people, last_sent_birthday, scan_range};
use crate::error::Result;
use crate::store::Person;

/// Compute the catch-up range and the people qualifying for it.
pub fn plan(people: &[Person], today: NaiveDate) -> Vec<Person> {
    let last_sent = last_sent_birthday(people, today);
    let dates = scan_range(last_sent, today);
    info!(
        from = %dates[0],
        to = %today,
        days = dates.len(),
        "Scanning catch-up range"
    );
    eligible_people(people, &dates, today)
}

/// Run the auto mode: preview, confirm, dispatch, report.
pub async fn run<R: BufRead>(
    dispatcher: &mut Dispatcher,
    people: &[Person],
    today: NaiveDate,
    input: &mut R,
) -> Result<()> {
    let birthday_people = plan(people, today);

    if birthday_people.is_empty() {
        println!("No birthdays found for the specified dates.");
        return Ok(());
    }

    println!(
        "The following {} birthday messages will be sent:",
        birthday_people.len()
    );
    for person in &birthday_people {
        println!(" - {} ({})", person.display_name, person.birthday);
    }

    let answer = prompt_line(input, "Do you want to send these messages? (Y/N): ")?;
    if !confirmed(&answer) {
        println!("Aborted by user.");
        return Ok(());
    }

    println!("Found {} birthdays.", birthday_people.len());

    for person in &birthday_people {
        let birthday = person.birthday.clone();
        dispatcher
            .send_birthday_message(person, &birthday, None, today, true)
            .await?;
    }

    dispatcher.report_invalid_users();
    Ok(())
}
