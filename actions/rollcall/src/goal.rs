//! Procedural purpose of a vote, read from its question and description text.

use crate::patterns;
use crate::vote::LegislativeVote;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// What a vote was trying to accomplish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteGoal {
    /// Agree to a resolution
    Agree,
    Pass,
    /// Ratify a treaty
    Ratify,
    Amend,
    /// Senate rules permit one motion to reconsider any question decided by vote.
    /// It is usually made and immediately tabled to lock in the outcome.
    Reconsider,
    Recommit,
    /// Accept the other chamber's changes to a bill
    Concur,
    /// Final version of a bill agreed to by both chambers' conferees
    ConferenceReport,
    GoToConference,
    /// Non-binding instructions to conferees
    InstructConferees,
    /// Also called the previous question
    EndDebate,
    /// Permanently kills a pending matter
    Table,
    Delay,
    /// Motion to proceed, bringing a measure up for consideration
    Introduce,
    Consider,
    Adjourn,
    /// Approval of the previous day's House journal
    Journal,
    /// Time limit on consideration; needs three-fifths of the Senate
    Cloture,
    Attendance,
    PointOfOrder,
    Election,
    Discharge,
    /// Appeal of the chair's ruling
    Appeal,
    CallByStates,
    FixTime,
}

/// How a rule tests the question (and sometimes the description)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Exact(&'static str),
    /// Exact question, description starting with the given text
    ExactWithDescription(&'static str, &'static str),
    Contains(&'static str),
    Prefix(&'static str),
    /// Whole-question regex
    Pattern(&'static str),
}

impl Matcher {
    /// Evaluation tier: exact rules, then substring rules, then patterns
    pub fn tier(&self) -> u8 {
        match self {
            Matcher::Exact(_) | Matcher::ExactWithDescription(..) => 0,
            Matcher::Contains(_) | Matcher::Prefix(_) => 1,
            Matcher::Pattern(_) => 2,
        }
    }

    pub fn matches(&self, question: &str, description: &str) -> bool {
        match *self {
            Matcher::Exact(q) => question == q,
            Matcher::ExactWithDescription(q, d) => question == q && description.starts_with(d),
            Matcher::Contains(s) => question.contains(s),
            Matcher::Prefix(s) => question.starts_with(s),
            Matcher::Pattern(p) => compiled_patterns()
                .get(p)
                .is_some_and(|re| re.is_match(question)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalRule {
    pub matcher: Matcher,
    pub goal: VoteGoal,
}

const fn rule(matcher: Matcher, goal: VoteGoal) -> GoalRule {
    GoalRule { matcher, goal }
}

use Matcher::{Contains, Exact, ExactWithDescription, Pattern, Prefix};
use VoteGoal::*;

/// Ordered rule table; the first matching rule wins.
pub const GOAL_RULES: &[GoalRule] = &[
    rule(Exact("On Passage"), Pass),
    rule(Exact("On Passage of the Bill"), Pass),
    rule(Exact("On the Resolution"), Agree),
    rule(Exact("On Motion to Adjourn"), Adjourn),
    rule(Exact("On the Motion to Adjourn"), Adjourn),
    rule(Exact("On Approving the Journal"), Journal),
    rule(Exact("On Motion to Fix the Convening Time"), FixTime),
    rule(Exact("On Motion to Reconsider"), Reconsider),
    rule(Exact("On the Motion to Reconsider"), Reconsider),
    rule(Exact("On Motion to go to Conference"), GoToConference),
    rule(Exact("On Motion to Instruct Conferees"), InstructConferees),
    rule(Exact("On Closing Portions of the Conference"), InstructConferees),
    rule(Exact("On the Nomination"), Election),
    rule(Exact("On the Amendment"), Amend),
    rule(Exact("On the Joint Resolution"), Pass),
    rule(Exact("On the Conference Report"), ConferenceReport),
    rule(Exact("On Agreeing to the Conference Report"), ConferenceReport),
    rule(Exact("On the Motion to Discharge"), Discharge),
    rule(Exact("On the Decision of the Chair"), Appeal),
    rule(Exact("On the Motion to Postpone"), Delay),
    rule(Exact("On the Resolution of Ratification"), Ratify),
    rule(Exact("On Consideration of the Resolution"), Consider),
    rule(Exact("On Agreeing to the Amendment"), Amend),
    rule(Exact("Motion to Commit"), GoToConference),
    rule(Exact("Election of the Speaker"), Election),
    rule(Exact("Call by States"), CallByStates),
    rule(Exact("Call of the House"), Attendance),
    rule(ExactWithDescription("On the Motion", "To amend"), Amend),
    rule(Exact("On the Motion"), Pass),
    rule(Contains("and Pass"), Pass),
    rule(Contains("Agree"), Agree),
    rule(Contains("Concur"), Concur),
    rule(Contains("Recommit"), Recommit),
    rule(Contains("Previous Question"), EndDebate),
    rule(Contains("Proceed"), Introduce),
    rule(Contains("Cloture Motion"), Cloture),
    rule(Contains("Attendance"), Attendance),
    rule(Contains("Call of the House"), Attendance),
    rule(Contains("Commit with Instructions"), Amend),
    rule(Contains("On the Point of Order"), PointOfOrder),
    rule(Prefix("Table"), Table),
    rule(Pattern(r"^On (the )?Motion to Table( .*)?$"), Table),
];

fn compiled_patterns() -> &'static HashMap<&'static str, Regex> {
    static PATTERNS: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        patterns::compile_table(GOAL_RULES.iter().filter_map(|rule| match rule.matcher {
            Pattern(p) => Some(p),
            _ => None,
        }))
    })
}

/// Fit a question (and description) to a goal. Unrecognised questions yield `None`.
pub fn categorize(question: &str, description: &str) -> Option<VoteGoal> {
    GOAL_RULES
        .iter()
        .find(|rule| rule.matcher.matches(question, description))
        .map(|rule| rule.goal)
}

const SUSPENSION_NOTE: &str = "For this vote, the House chose to suspend the rules, which is a common practice for bills that are not contentious.";

fn relevant_legislation(description: &str) -> &str {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    patterns::cached(&RE, r".*((H\.J\. Res\.|H\.R\.) ?\d+).*")
        .and_then(|re| re.captures(description))
        .and_then(|caps| caps.get(1))
        .map_or(description, |m| m.as_str())
}

/// A plain-language explanation of a legislative vote.
///
/// Unrecognised questions get a stock answer. Votes not tied to a bill, and goals
/// without anything useful to say, yield `None`.
pub fn explain(vote: &LegislativeVote) -> Option<String> {
    let Some(goal) = vote.goal() else {
        return Some("Unknown vote type.".to_string());
    };
    let bill = vote.bill()?;

    let body = match goal {
        Pass => match bill.bill_type.as_str() {
            "hjres" | "sjres" | "hr" | "s" => Some(format!(
                "This was a vote to pass {}, which is a piece of legislation. It requires passage from \
                 both the House and the Senate as well as approval from the President before it becomes law.",
                bill.name
            )),
            _ => None,
        },
        Cloture => Some(
            "This was a vote on cloture, which ends debate on a topic and moves towards a vote of passage. \
             This vote can be used to overcome a filibuster."
                .to_string(),
        ),
        Table => Some(
            "This was a vote to table a matter, which permanently kills the matter and any further debate."
                .to_string(),
        ),
        ConferenceReport => Some(
            "This was a vote to agree to a final version of legislation which has been passed by both the \
             House and the Senate. In other words, it resolves the differences between the chambers while \
             approving the legislation."
                .to_string(),
        ),
        Agree if vote.description.starts_with("Providing for consideration") => Some(format!(
            "This was a vote to set the rules for debate for {}, such as restricting amendments and floor \
             debate time.",
            bill.name
        )),
        EndDebate => Some(format!(
            "This was a vote to bring an end to the debate of legislation {}.",
            relevant_legislation(&vote.description)
        )),
        Recommit => Some(
            "This was a vote to recommit the bill, which is the final opportunity to amend and debate a bill. \
             This tactic is usually used by the minority party to present and vote on an alternate bill."
                .to_string(),
        ),
        _ => None,
    };

    let suspended = vote.question.contains("to Suspend the Rules");
    let paragraphs: Vec<String> = body
        .into_iter()
        .chain(suspended.then(|| SUSPENSION_NOTE.to_string()))
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}
