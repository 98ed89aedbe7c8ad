// Prompt templates for match-performance coaching advice.
//
// Two template policies are available. `Random` picks one of four coaching
// styles per request and inlines the whole stat record as a `key: value`
// listing. `Structured` uses a single template that names twenty fields
// directly, whether or not the record carries them.

use rand::Rng;
use serde::Deserialize;

use crate::stats::StatRecord;

// ---------------------------------------------------------------------------
// Completion parameters
// ---------------------------------------------------------------------------

/// System message sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are a professional football coach.";

pub const MAX_TOKENS: u32 = 400;

pub const TEMPERATURE: f64 = 0.7;

// ---------------------------------------------------------------------------
// Template policy
// ---------------------------------------------------------------------------

/// Which template policy renders the user prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    /// One of [`FLAT_TEMPLATES`], chosen uniformly at random per request.
    #[default]
    Random,
    /// The fixed field-by-field template.
    Structured,
}

impl std::fmt::Display for PromptMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptMode::Random => f.write_str("random"),
            PromptMode::Structured => f.write_str("structured"),
        }
    }
}

/// A rendered user prompt plus the name of the style that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub style: &'static str,
    pub text: String,
}

/// Render the user prompt for `record` under `mode`.
///
/// `rng` is only consulted in [`PromptMode::Random`].
pub fn build_prompt<R: Rng>(
    mode: PromptMode,
    record: &StatRecord,
    rng: &mut R,
) -> RenderedPrompt {
    match mode {
        PromptMode::Random => {
            let template = &FLAT_TEMPLATES[rng.gen_range(0..FLAT_TEMPLATES.len())];
            RenderedPrompt {
                style: template.style,
                text: render_flat(template, record),
            }
        }
        PromptMode::Structured => RenderedPrompt {
            style: "structured",
            text: render_structured(record),
        },
    }
}

// ---------------------------------------------------------------------------
// Flat templates
// ---------------------------------------------------------------------------

/// Placeholder replaced by the `key: value` stat listing.
pub const STATS_PLACEHOLDER: &str = "{stats}";

pub struct FlatTemplate {
    pub style: &'static str,
    pub body: &'static str,
}

pub static FLAT_TEMPLATES: [FlatTemplate; 4] = [
    FlatTemplate {
        style: "motivational",
        body: "You are an expert football coach AI. Analyze the following player's match performance\n\
               and give constructive, motivational advice. Be inspiring but also realistic.\n\
               \n\
               Player Stats:\n\
               {stats}\n\
               \n\
               Write the advice as:\n\
               - Highlight key strengths with praise.\n\
               - Mention 2-3 areas to improve.\n\
               - Give practical training tips.\n\
               - Keep the tone like a supportive coach.\n",
    },
    FlatTemplate {
        style: "tactical",
        body: "You are a tactical football coach. Based on the player's stats below,\n\
               provide feedback that mixes technical analysis with mindset coaching.\n\
               \n\
               Player Stats:\n\
               {stats}\n\
               \n\
               Write the advice as:\n\
               - Focus on tactical awareness and positioning.\n\
               - Highlight 1-2 strong attributes.\n\
               - Suggest drills or practice methods.\n\
               - End with a motivating message.\n",
    },
    FlatTemplate {
        style: "personal-trainer",
        body: "You are acting as a personal football trainer for this player.\n\
               Analyze the stats and create a short improvement plan.\n\
               \n\
               Player Stats:\n\
               {stats}\n\
               \n\
               Write the advice as:\n\
               - Point out fitness & stamina elements.\n\
               - Suggest skill-based exercises.\n\
               - Provide 1 mental/psychological tip.\n\
               - Keep it short and actionable.\n",
    },
    FlatTemplate {
        style: "commentary",
        body: "Imagine you are a football commentator turned coach.\n\
               Analyze the player's stats as if reviewing their match highlights.\n\
               \n\
               Player Stats:\n\
               {stats}\n\
               \n\
               Write the advice as:\n\
               - Praise strong \"moments\".\n\
               - Mention weak points as \"missed opportunities\".\n\
               - Suggest training improvements.\n\
               - Keep tone energetic and engaging.\n",
    },
];

pub fn render_flat(template: &FlatTemplate, record: &StatRecord) -> String {
    template
        .body
        .replace(STATS_PLACEHOLDER, &record.render_flat())
}

// ---------------------------------------------------------------------------
// Structured template
// ---------------------------------------------------------------------------

struct Section {
    heading: &'static str,
    fields: &'static [(&'static str, &'static str)],
}

/// Label and lookup path for every field the structured template names.
static STRUCTURED_SECTIONS: [Section; 4] = [
    Section {
        heading: "Match summary",
        fields: &[
            ("Position", "position"),
            ("Minutes played", "time"),
            ("Goals", "goals"),
            ("Assists", "assists"),
            ("Scoring streak", "streak"),
        ],
    },
    Section {
        heading: "Technical ratings",
        fields: &[
            ("Passing", "technical.passing"),
            ("Shooting", "technical.shooting"),
            ("Dribbling", "technical.dribbling"),
            ("Defending", "technical.defending"),
            ("Heading", "technical.heading"),
        ],
    },
    Section {
        heading: "Highlights",
        fields: &[
            ("Work rate", "highlights.workrate"),
            ("Key passes", "highlights.key_passes"),
            ("Shots on target", "highlights.shots_on_target"),
            ("Tackles won", "highlights.tackles_won"),
            ("Distance covered", "highlights.distance_covered"),
        ],
    },
    Section {
        heading: "Recent trend",
        fields: &[
            ("Form", "trend.form"),
            ("Average rating", "trend.rating"),
            ("Last five matches", "trend.last_five"),
            ("Goals per match", "trend.goals_per_match"),
            ("Improvement", "trend.improvement"),
        ],
    },
];

/// Render the fixed structured template. Absent fields print as
/// [`crate::stats::ABSENT`].
pub fn render_structured(record: &StatRecord) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are an expert football coach AI. Review this player's latest match\n\
         and give personalised, constructive advice.\n",
    );

    for section in &STRUCTURED_SECTIONS {
        prompt.push('\n');
        prompt.push_str(section.heading);
        prompt.push_str(":\n");
        for (label, path) in section.fields {
            prompt.push_str(&format!("- {label}: {}\n", record.display(path)));
        }
    }

    prompt.push_str(
        "\nWrite the advice as:\n\
         - Start with the strongest parts of the performance.\n\
         - Identify 2-3 concrete areas to improve, referring to the numbers above.\n\
         - Suggest specific drills for the next training week.\n\
         - Close with one motivating sentence.\n",
    );

    prompt
}
