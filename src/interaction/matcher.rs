//! Evaluates the rule table against a decoded event.

use crate::{
    base::rules::{MentionRule, ProjectColumnRule, RuleTable},
    github::{InboundEvent, IssueCommentEvent, IssueEvent, ProjectCardEvent},
};

/// One (event, rule) pair that should produce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match<'a> {
    Issue { event: &'a IssueEvent, rule: &'a MentionRule },
    IssueComment { event: &'a IssueCommentEvent, rule: &'a MentionRule },
    ProjectCard { event: &'a ProjectCardEvent, rule: &'a ProjectColumnRule },
}

impl Match<'_> {
    /// Channel the notification is addressed to.
    pub fn channel(&self) -> &str {
        match self {
            Match::Issue { rule, .. } | Match::IssueComment { rule, .. } => &rule.channel,
            Match::ProjectCard { rule, .. } => &rule.channel,
        }
    }
}

/// Returns every rule that applies to `event`, in table order.
///
/// Mentions are plain case-sensitive substring checks, so `@andrkrnx`
/// also matches a rule for `@andrkrn`. Project cards match on column id
/// alone.
pub fn match_event<'a>(event: &'a InboundEvent, rules: &'a RuleTable) -> Vec<Match<'a>> {
    match event {
        InboundEvent::Issue(event) => mentioned_in(&event.body, &rules.mentions).map(|rule| Match::Issue { event, rule }).collect(),
        InboundEvent::IssueComment(event) => mentioned_in(&event.comment_body, &rules.mentions).map(|rule| Match::IssueComment { event, rule }).collect(),
        InboundEvent::ProjectCard(event) => rules
            .project_columns
            .iter()
            .filter(|rule| rule.column_id == event.column_id)
            .map(|rule| Match::ProjectCard { event, rule })
            .collect(),
        InboundEvent::Unrecognized(_) => Vec::new(),
    }
}

fn mentioned_in<'a>(text: &'a str, rules: &'a [MentionRule]) -> impl Iterator<Item = &'a MentionRule> {
    rules.iter().filter(move |rule| text.contains(rule.mention.as_str()))
}
