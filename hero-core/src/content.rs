/// Wordmark shown above the hero
pub const WORDMARK: &str = "TOWER";

/// Position of the wordmark letter that swaps with the tower icon
pub const SWAP_GLYPH_INDEX: usize = 1;

/// Icon drawn in place of the swapped letter
pub const TOWER_ICON: char = '♜';

pub const TAGLINE: &str = "A one-year fellowship for";

/// Words typed after the tagline, one at a time
pub const CYCLING_WORDS: &[&str] = &[
    "founders",
    "builders",
    "researchers",
    "tinkerers",
    "dreamers",
];

/// The two lines of the terminal block
pub const TERMINAL_LINES: [&str; 2] = [
    "$ applications open for the 2027 cohort",
    "$ twelve fellows. one year. no strings attached.",
];

pub const BACKED_BY: &str = "backed by people from";

/// Backer names, shown three at a time
pub const BACKERS: &[[&str; 3]] = &[
    ["Stripe", "Anthropic", "Anduril"],
    ["OpenAI", "Figma", "Ramp"],
    ["SpaceX", "Notion", "Vercel"],
    ["Palantir", "Linear", "Scale AI"],
];

pub const CTA_LABEL: &str = "Apply now";

/// Opened in a new browsing context when the call to action is activated
pub const CTA_URL: &str = "https://tower.fellowship.dev/apply";

/// One block of the details section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailBlock {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
    pub bullets: &'static [&'static str],
}

pub const DETAILS: &[DetailBlock] = &[
    DetailBlock {
        heading: "What is the fellowship?",
        paragraphs: &[
            "Tower is a year-long program for people who want to build something ambitious \
             and need the time and room to do it.",
            "Fellows work on their own ideas. We provide funding, a workspace and a small \
             community of peers who take hard problems seriously.",
        ],
        bullets: &[],
    },
    DetailBlock {
        heading: "What you get",
        paragraphs: &[],
        bullets: &[
            "A stipend for the full year, with no equity taken",
            "A desk in a shared studio and a hardware budget",
            "Weekly dinners with fellows and mentors",
            "Introductions to operators and investors when you want them",
        ],
    },
    DetailBlock {
        heading: "Who should apply",
        paragraphs: &[
            "Anyone who has shipped something they are proud of. There is no age limit \
             and no degree requirement.",
        ],
        bullets: &[
            "Students taking a year off",
            "Engineers between jobs",
            "Researchers who want to turn a paper into a product",
        ],
    },
    DetailBlock {
        heading: "Timeline",
        paragraphs: &[],
        bullets: &[
            "Applications close March 1",
            "Interviews run through March",
            "The cohort starts in June",
        ],
    },
];
