//! Messaging dispatcher: coupon claim, message composition, send,
//! sent-flag update, and invalid-recipient collection.
//!
//! The dispatcher owns the few pieces of run state (Slack client,
//! translation table, file paths, invalid-user list) so nothing lives in
//! module-level globals.

use std::path::PathBuf;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use tracing::{error, info, warn};

use crate::eligibility::is_belated;
use crate::error::Result;
use crate::i18n::Translations;
use crate::slack::SlackClient;
use crate::store::{self, Person};

/// Celebratory emoji set, one picked at random per message
pub const EMOJI_LIST: [&str; 4] = [
    ":happybirthday:",
    ":meow_birthday:",
    ":caker_appreciate:",
    ":cakerloveyou:",
];

/// Placeholder values shown in manual-mode previews
pub const PREVIEW_LINK: &str = "<LINK>";
pub const PREVIEW_CODE: &str = "CODE";

/// Pick a random emoji from the fixed set.
pub fn pick_emoji() -> &'static str {
    EMOJI_LIST
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(EMOJI_LIST[0])
}

/// Compose the full message text with an explicit emoji (deterministic,
/// used by tests; `build_message` picks the emoji at random).
#[allow(clippy::too_many_arguments)]
pub fn build_message_with_emoji(
    translations: &Translations,
    locale: &str,
    slack_id: &str,
    birthday_str: &str,
    link: &str,
    code: &str,
    custom_text: Option<&str>,
    today: NaiveDate,
    emoji: &str,
) -> String {
    let strings = translations.get(locale);
    let belated = is_belated(birthday_str, today);

    let main_text = match custom_text {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => strings.greeting(belated).to_string(),
    };

    let body = strings.render_body(emoji);
    let redeem = strings.render_redeem(link, code);

    format!("Hi <@{}>, \n{}\n{}\n{}", slack_id, main_text, body, redeem)
}

/// Compose the full message text with a random emoji.
#[allow(clippy::too_many_arguments)]
pub fn build_message(
    translations: &Translations,
    locale: &str,
    slack_id: &str,
    birthday_str: &str,
    link: &str,
    code: &str,
    custom_text: Option<&str>,
    today: NaiveDate,
) -> String {
    build_message_with_emoji(
        translations,
        locale,
        slack_id,
        birthday_str,
        link,
        code,
        custom_text,
        today,
        pick_emoji(),
    )
}

/// Run state for a dispatch pass
pub struct Dispatcher {
    slack: SlackClient,
    translations: Translations,
    birthday_file: PathBuf,
    coupon_file: PathBuf,
    invalid_users: Vec<(String, String)>,
}

impl Dispatcher {
    pub fn new(
        slack: SlackClient,
        translations: Translations,
        birthday_file: PathBuf,
        coupon_file: PathBuf,
    ) -> Self {
        Self {
            slack,
            translations,
            birthday_file,
            coupon_file,
            invalid_users: Vec::new(),
        }
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Recipients skipped because their Slack ID did not resolve
    pub fn invalid_users(&self) -> &[(String, String)] {
        &self.invalid_users
    }

    /// Claim a coupon and send one birthday message. Returns whether the
    /// message went out. `birthday_str` drives belated detection only and
    /// may be a placeholder when custom text is supplied. When
    /// `mark_sent` is set, the person's sent flag is flipped and
    /// persisted on success.
    pub async fn send_birthday_message(
        &mut self,
        person: &Person,
        birthday_str: &str,
        custom_text: Option<&str>,
        today: NaiveDate,
        mark_sent: bool,
    ) -> Result<bool> {
        let Some((link, code)) = store::claim_coupon(&self.coupon_file)? else {
            warn!(recipient = %person.display_name, "No unused coupons available");
            println!("No unused coupons available.");
            return Ok(false);
        };

        let message = build_message(
            &self.translations,
            &person.locale,
            &person.slack_id,
            birthday_str,
            &link,
            &code,
            custom_text,
            today,
        );

        if !self.slack.is_valid_user(&person.slack_id).await {
            warn!(
                slack_id = %person.slack_id,
                "Invalid Slack user ID, skipping message to {}",
                person.display_name
            );
            println!(
                "[WARNING] Invalid Slack user ID: {}. Skipping message to {}.",
                person.slack_id, person.display_name
            );
            self.invalid_users
                .push((person.display_name.clone(), person.slack_id.clone()));
            return Ok(false);
        }

        if let Err(e) = self.slack.post_message(&person.slack_id, &message).await {
            error!(
                slack_id = %person.slack_id,
                "Error sending message to {}: {}",
                person.display_name,
                e
            );
            println!(
                "Error sending message to {} (ID: {}): {}",
                person.display_name, person.slack_id, e
            );
            return Ok(false);
        }

        info!(
            slack_id = %person.slack_id,
            coupon = %code,
            "Birthday message sent to {}",
            person.display_name
        );
        println!(
            "Message sent successfully to {} (ID: {}) with link {} and code {}.",
            person.display_name, person.slack_id, link, code
        );

        if mark_sent {
            store::mark_person_sent(&self.birthday_file, &person.slack_id)?;
        }

        Ok(true)
    }

    /// Print the invalid-recipient report collected during the run.
    pub fn report_invalid_users(&self) {
        if self.invalid_users.is_empty() {
            return;
        }
        println!("The following Slack IDs were invalid and skipped:");
        for (name, uid) in &self.invalid_users {
            println!(" - {} ({})", uid, name);
        }
    }
}
