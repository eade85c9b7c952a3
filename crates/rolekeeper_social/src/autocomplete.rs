//! Suggestions for partially typed command options.

use crate::Platform;
use rolekeeper_core::{ALL_MEMBERS, WILDCARD_EMOJI};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// One suggestion: the label shown and the value submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label shown to the actor.
    pub name: String,
    /// Value submitted when picked.
    pub value: String,
}

impl Choice {
    /// Create a choice.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Suggests roles, emojis and members for the focused option.
pub struct Autocomplete<P> {
    platform: Arc<P>,
    max_choices: usize,
}

impl<P: Platform> Autocomplete<P> {
    /// Create a completer returning at most `max_choices` suggestions.
    pub fn new(platform: Arc<P>, max_choices: usize) -> Self {
        Self {
            platform,
            max_choices,
        }
    }

    /// Suggestions for `field` whose label starts with `typed`.
    ///
    /// Members are found by a prefix search, never by listing the guild.
    /// Unknown fields and failed lookups yield no suggestions.
    #[instrument(skip(self))]
    pub async fn suggest(&self, guild_id: &str, field: &str, typed: &str) -> Vec<Choice> {
        let candidates = match field {
            "cargo" => self.platform.roles(guild_id).await.map(|roles| {
                roles
                    .into_iter()
                    .map(|role| Choice::new(role.name, role.id))
                    .collect::<Vec<_>>()
            }),
            "emoji" => self.platform.emojis(guild_id).await.map(|emojis| {
                std::iter::once(Choice::new(WILDCARD_EMOJI, WILDCARD_EMOJI))
                    .chain(
                        emojis
                            .into_iter()
                            .map(|emoji| Choice::new(emoji.name, emoji.id)),
                    )
                    .collect()
            }),
            "member" => self
                .platform
                .search_members(guild_id, typed, self.max_choices)
                .await
                .map(|members| {
                    std::iter::once(Choice::new(ALL_MEMBERS, ALL_MEMBERS))
                        .chain(
                            members
                                .into_iter()
                                .filter(|member| !member.bot)
                                .map(|member| Choice::new(member.username, member.id)),
                        )
                        .collect()
                }),
            other => {
                debug!(field = other, "No suggestions for field");
                return Vec::new();
            }
        };

        match candidates {
            Ok(candidates) => filter_choices(candidates, typed, self.max_choices),
            Err(e) => {
                warn!(error = %e, "Failed to load autocomplete candidates");
                Vec::new()
            }
        }
    }
}

/// Keep choices whose label starts with `typed`, capped at `max`.
pub fn filter_choices(choices: Vec<Choice>, typed: &str, max: usize) -> Vec<Choice> {
    choices
        .into_iter()
        .filter(|choice| choice.name.starts_with(typed))
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_filter_is_case_sensitive() {
        let choices = vec![
            Choice::new("Members", "1"),
            Choice::new("members-old", "2"),
            Choice::new("Mods", "3"),
        ];
        let kept = filter_choices(choices, "M", 25);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|c| c.name.starts_with('M')));
    }

    #[test]
    fn test_filter_caps_results() {
        let choices = (0..40).map(|i| Choice::new(format!("role{}", i), i.to_string())).collect();
        assert_eq!(filter_choices(choices, "", 25).len(), 25);
    }
}
