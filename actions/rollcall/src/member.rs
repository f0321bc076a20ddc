//! Resolution of members named in free text against a vote's own position list.
//!
//! Names arrive as `"Lastname"` or, when two members share a last name, as
//! `"Lastname (ST)"`. The position entries carry everything needed to build a
//! [`VotingMember`], so no roster lookup happens here.

use crate::error::{Error, Result};
use crate::patterns;
use crate::raw::RawVotePosition;
use crate::types::Party;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// The label used in place of a nominee when a member cast no vote
pub const NOT_VOTING: &str = "Not Voting";

/// A member who cast a vote, as described by their position entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VotingMember {
    pub id: String,
    pub name: String,
    pub party: Party,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dw_nominate: Option<f64>,
}

impl VotingMember {
    /// Build a member from a position entry. Entries without a party cannot be
    /// represented and yield `None`.
    pub fn from_position(position: &RawVotePosition) -> Option<Self> {
        Some(VotingMember {
            id: position.member_id.clone(),
            name: position.name.clone(),
            party: position.party?,
            state: position.state.clone(),
            district: position.district.clone(),
            dw_nominate: position.dw_nominate,
        })
    }

    pub fn last_name(&self) -> &str {
        last_name(&self.name)
    }
}

/// Someone voted for who isn't a member of the chamber, or couldn't be told apart
/// from another member with the same last name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NamedNominee {
    pub name: String,
}

/// A speaker-election nominee
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Nominee {
    Member(VotingMember),
    Named(NamedNominee),
}

impl Nominee {
    /// Display name, used to match votes to nominees
    pub fn name(&self) -> &str {
        match self {
            Nominee::Member(member) => &member.name,
            Nominee::Named(named) => &named.name,
        }
    }

    pub fn member(&self) -> Option<&VotingMember> {
        match self {
            Nominee::Member(member) => Some(member),
            Nominee::Named(_) => None,
        }
    }
}

/// A parsed `"Lastname"` / `"Lastname (ST)"` search string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameQuery<'a> {
    pub last_name: &'a str,
    pub state: Option<&'a str>,
}

impl<'a> NameQuery<'a> {
    pub fn parse(search: &'a str) -> Self {
        static STATE_SUFFIX: OnceLock<Option<Regex>> = OnceLock::new();
        let search = search.trim();
        let caps = patterns::cached(&STATE_SUFFIX, r"^(.*?)\s*\((\w\w)\)$")
            .and_then(|re| re.captures(search));

        match caps {
            Some(caps) => {
                let (name, state) = (caps.get(1), caps.get(2));
                match (name, state) {
                    (Some(name), Some(state)) => NameQuery {
                        last_name: name.as_str(),
                        state: Some(state.as_str()),
                    },
                    _ => NameQuery { last_name: search, state: None },
                }
            }
            None => NameQuery {
                last_name: search,
                state: None,
            },
        }
    }

    pub fn matches(&self, position: &RawVotePosition) -> bool {
        last_name(&position.name) == self.last_name
            && self.state.map_or(true, |state| position.state == state)
    }

    /// Every entry matching this query, one per distinct member id
    pub fn candidates<'p>(&self, positions: &'p [RawVotePosition]) -> Vec<&'p RawVotePosition> {
        let mut found: Vec<&RawVotePosition> = Vec::new();
        for position in positions.iter().filter(|p| self.matches(p)) {
            if !found.iter().any(|f| f.member_id == position.member_id) {
                found.push(position);
            }
        }
        found
    }
}

/// Final whitespace-delimited token of a full name
pub fn last_name(full_name: &str) -> &str {
    full_name.split_whitespace().last().unwrap_or("")
}

/// Non-binding lookup. `"Not Voting"` resolves to nothing; anything that doesn't
/// identify exactly one member becomes a [`NamedNominee`] carrying the search text.
pub fn find_or_name(search: &str, positions: &[RawVotePosition]) -> Option<Nominee> {
    if search.trim() == NOT_VOTING {
        return None;
    }

    let named = || {
        Nominee::Named(NamedNominee {
            name: search.trim().to_string(),
        })
    };

    let candidates = NameQuery::parse(search).candidates(positions);
    let nominee = match candidates.as_slice() {
        [only] => VotingMember::from_position(only)
            .map(Nominee::Member)
            .unwrap_or_else(named),
        _ => named(),
    };
    Some(nominee)
}

/// Binding lookup: the named person is expected to be in `positions`.
///
/// `context` describes where the name came from and is carried on the error.
pub fn find_member(search: &str, positions: &[RawVotePosition], context: &str) -> Result<VotingMember> {
    let not_found = |detail: String| Error::MemberNotFound {
        search: search.to_string(),
        context: format!("{context}: {detail}"),
    };

    if search.trim() == NOT_VOTING {
        return Err(not_found("no member is named".to_string()));
    }

    let query = NameQuery::parse(search);
    let candidates = query.candidates(positions);
    match candidates.as_slice() {
        [only] => VotingMember::from_position(only)
            .ok_or_else(|| not_found(format!("member {} has no party", only.member_id))),
        [] => Err(not_found(format!(
            "no match among {} positions",
            positions.len()
        ))),
        many => Err(not_found(format!(
            "{} members share the last name {}",
            many.len(),
            query.last_name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::position;

    fn roster() -> Vec<RawVotePosition> {
        vec![
            position("R000570", "Paul Ryan", "WI", "Ryan (WI)"),
            position("R000577", "Tim Ryan", "OH", "Pelosi"),
            position("P000197", "Nancy Pelosi", "CA", "Pelosi"),
            position("C000754", "Jim Cooper", "TN", "Cooper"),
        ]
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(
            NameQuery::parse("Ryan (WI)"),
            NameQuery { last_name: "Ryan", state: Some("WI") }
        );
        assert_eq!(
            NameQuery::parse("Pelosi"),
            NameQuery { last_name: "Pelosi", state: None }
        );
    }

    #[test]
    fn test_name_with_state_resolves() {
        let positions = roster();
        match find_or_name("Ryan (WI)", &positions) {
            Some(Nominee::Member(member)) => {
                assert_eq!(member.id, "R000570");
                assert_eq!(member.state, "WI");
            }
            other => panic!("expected member, got {other:?}"),
        }
    }

    #[test]
    fn test_ambiguous_last_name_is_named_placeholder() {
        let positions = roster();
        assert_eq!(
            find_or_name("Ryan", &positions),
            Some(Nominee::Named(NamedNominee { name: "Ryan".to_string() }))
        );
        assert!(matches!(
            find_member("Ryan", &positions, "speaker election winner"),
            Err(Error::MemberNotFound { .. })
        ));
    }

    #[test]
    fn test_not_voting_resolves_to_nothing() {
        assert_eq!(find_or_name("Not Voting", &roster()), None);
    }

    #[test]
    fn test_unknown_name() {
        let positions = roster();
        assert_eq!(
            find_or_name("Biden", &positions).map(|n| n.name().to_string()),
            Some("Biden".to_string())
        );
        match find_member("Biden (DE)", &positions, "roll call 2") {
            Err(Error::MemberNotFound { search, context }) => {
                assert_eq!(search, "Biden (DE)");
                assert!(context.starts_with("roll call 2"));
            }
            other => panic!("expected MemberNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_state_does_not_match() {
        let positions = roster();
        assert!(matches!(
            find_or_name("Ryan (CA)", &positions),
            Some(Nominee::Named(_))
        ));
        assert_eq!(
            find_member("Ryan (OH)", &positions, "ctx").unwrap().id,
            "R000577"
        );
    }
}
