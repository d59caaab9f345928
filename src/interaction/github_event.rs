//! Runs a decoded GitHub event through the rules and delivers the results.

use tracing::{debug, error, info, instrument};

use crate::{
    base::{rules::RuleTable, types::Res},
    github::InboundEvent,
    service::notify::NotifyClient,
};

use super::{matcher::match_event, notification::format_match};

/// Matches `event` against `rules` and sends one notification per match.
///
/// Every match is attempted even if an earlier delivery fails; the first
/// failure is returned afterwards. On success, returns how many
/// notifications were delivered.
#[instrument(skip_all)]
pub async fn handle_github_event(event: &InboundEvent, rules: &RuleTable, notify: &NotifyClient) -> Res<usize> {
    if let InboundEvent::Unrecognized(event_type) = event {
        debug!("Ignoring unhandled `{}` event.", event_type);
        return Ok(0);
    }

    let matches = match_event(event, rules);

    if matches.is_empty() {
        debug!("No rule matched.");
        return Ok(0);
    }

    info!("{} rule(s) matched.", matches.len());

    let mut delivered = 0;
    let mut first_error = None;

    for m in &matches {
        let message = format_match(m);

        match notify.send_message(&message).await {
            Ok(()) => delivered += 1,
            Err(err) => {
                error!("Error while notifying `{}`: {}", message.channel, err);
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err.context(format!("{} of {} notification(s) failed", matches.len() - delivered, matches.len()))),
        None => Ok(delivered),
    }
}
