//! Rule-based resolver for predefined answers.
//!
//! Matching is case-insensitive and runs over a fixed priority list: the
//! canonical question entries first, then the keyword rules. The first rule
//! whose trigger is satisfied wins, so the order of `RULES` is part of the
//! contract and must not be re-sorted.

/// Matching condition attached to one canned answer.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Fires when the lowercased input equals this canonical question.
    Exact(&'static str),
    /// Fires when the lowercased input contains every listed keyword.
    AllOf(&'static [&'static str]),
    /// Fires when the lowercased input contains at least one listed keyword.
    AnyOf(&'static [&'static str]),
}

impl Trigger {
    fn fires(&self, normalized: &str) -> bool {
        match self {
            Trigger::Exact(question) => normalized == question.to_lowercase(),
            Trigger::AllOf(keywords) => keywords.iter().all(|kw| normalized.contains(kw)),
            Trigger::AnyOf(keywords) => keywords.iter().any(|kw| normalized.contains(kw)),
        }
    }
}

/// One entry of the answer table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub trigger: Trigger,
    pub answer: &'static str,
}

/// Outcome of a lookup. `Unmatched` is a normal result, not an error;
/// picking a default reply is the caller's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched(&'static str),
    Unmatched,
}

pub const STUDENT_VISA_DOCUMENTS: &str = "📘 **Student Visa Documents**\n\n\
• A passport valid for at least six months\n\
• Admission or acceptance letter from the institution\n\
• Proof of tuition payment or scholarship award\n\
• Recent bank statements showing sufficient funds\n\
• Passport-size photographs and the completed application form";

pub const TOURIST_VISA_DOCUMENTS: &str = "🧳 **Tourist Visa Documents**\n\n\
• A valid passport\n\
• Round-trip flight reservation\n\
• Hotel booking or an invitation letter from your host\n\
• Travel insurance covering the whole stay\n\
• Recent bank statements";

pub const WORK_VISA_DOCUMENTS: &str = "💼 **Work Visa Documents**\n\n\
• A valid passport\n\
• Signed job offer or employment contract\n\
• Employer sponsorship or labor-market approval\n\
• Educational certificates and an updated CV\n\
• Police clearance and medical certificate";

pub const VISA_REJECTION: &str = "⚠️ **Common Visa Rejection Reasons**\n\n\
• Incomplete or inconsistent documents\n\
• Insufficient financial proof\n\
• Weak ties to your home country\n\
• Unclear purpose of travel\n\
• Previous immigration violations";

pub const PROCESSING_TIME: &str = "⏳ **Visa Processing Time**\n\n\
Most applications take 2 to 8 weeks depending on the visa type and the \
embassy workload. Apply well in advance and track your application online \
where the embassy offers it.";

pub const VISA_APPOINTMENT: &str = "📅 **Visa Appointment**\n\n\
Book through the embassy website or its visa application center. Bring the \
printed confirmation, your passport and the full document set, and arrive \
early. Rescheduling usually needs several days of notice.";

pub const VISA_INTERVIEW: &str = "🎤 **Visa Interview Tips**\n\n\
• Answer briefly and honestly\n\
• Know your travel or study plans in detail\n\
• Bring originals of every document\n\
• Be ready to explain how the trip is funded\n\
• Stay calm and consistent with your written application";

pub const FINANCIAL_PROOF: &str = "💰 **Financial Proof**\n\n\
Embassies usually expect bank statements for the last 3 to 6 months, a \
sponsorship letter if someone else funds you, and evidence of stable income. \
The required balance depends on the destination and the length of stay.";

/// Canonical answer table.
///
/// Exact-question entries come first because they are the most specific,
/// then the keyword rules in their fixed priority order. Inputs frequently
/// satisfy several rules' keywords ("my student documents were rejected"),
/// so the position of a rule decides ties.
pub const RULES: &[Rule] = &[
    Rule {
        trigger: Trigger::Exact("What are the three most important values in life?"),
        answer: "🌱 Many consider honesty, compassion, and perseverance as guiding values that shape a meaningful life.",
    },
    Rule {
        trigger: Trigger::Exact("How do I overcome fear of failure?"),
        answer: "💡 View failure as feedback, not defeat. Break goals into small steps and celebrate progress.",
    },
    Rule {
        trigger: Trigger::Exact("How can I make learning new skills faster?"),
        answer: "⚡ Use active recall, spaced repetition, and learn by teaching others.",
    },
    Rule {
        trigger: Trigger::Exact("What is AI?"),
        answer: "Computer actions that mimic human decision making based on learned experiences and data.",
    },
    Rule {
        trigger: Trigger::Exact("What is ML?"),
        answer: "Processes that allow computers to derive conclusions from data.",
    },
    Rule {
        trigger: Trigger::Exact("What is the difference between AI and ML?"),
        answer: "ML is a subset of AI that enables the ability for computers to learn outside of their programming.",
    },
    Rule {
        trigger: Trigger::Exact("How will AI change jobs in the next decade?"),
        answer: "🤖 AI will automate routine tasks, create new roles in AI ethics & engineering, and reshape industries.",
    },
    Rule {
        trigger: Trigger::Exact("What is quantum computing in simple terms?"),
        answer: "🌀 Quantum computing uses qubits that can be 0 and 1 at the same time, enabling powerful parallel processing.",
    },
    Rule {
        trigger: Trigger::Exact("How does blockchain work?"),
        answer: "⛓️ Blockchain is a decentralized ledger where data is stored in secure, linked blocks.",
    },
    Rule {
        trigger: Trigger::Exact("What is the future of renewable energy tech?"),
        answer: "🌞 Expect cheaper solar, efficient wind, and breakthroughs in energy storage and fusion.",
    },
    Rule {
        trigger: Trigger::Exact("What’s the fastest way to learn coding?"),
        answer: "💻 Build projects, practice daily, and learn by solving real-world problems.",
    },
    Rule {
        trigger: Trigger::Exact("What are the top 5 emerging technologies in 2025?"),
        answer: "🚀 AI assistants, quantum computing, advanced biotech, green hydrogen, and immersive AR/VR.",
    },
    Rule {
        trigger: Trigger::AllOf(&["student", "document"]),
        answer: STUDENT_VISA_DOCUMENTS,
    },
    Rule {
        trigger: Trigger::AllOf(&["tourist", "document"]),
        answer: TOURIST_VISA_DOCUMENTS,
    },
    Rule {
        trigger: Trigger::AllOf(&["work", "document"]),
        answer: WORK_VISA_DOCUMENTS,
    },
    Rule {
        trigger: Trigger::AllOf(&["reject"]),
        answer: VISA_REJECTION,
    },
    Rule {
        trigger: Trigger::AnyOf(&["process", "time"]),
        answer: PROCESSING_TIME,
    },
    Rule {
        trigger: Trigger::AllOf(&["appointment"]),
        answer: VISA_APPOINTMENT,
    },
    Rule {
        trigger: Trigger::AllOf(&["interview"]),
        answer: VISA_INTERVIEW,
    },
    Rule {
        trigger: Trigger::AnyOf(&["financial", "fund", "bank"]),
        answer: FINANCIAL_PROOF,
    },
];

/// Looks up a canned answer for the given user text.
///
/// Pure and total: same input, same result, no side effects. The caller
/// rejects empty or whitespace-only input before calling.
pub fn resolve(user_text: &str) -> Resolution {
    let normalized = user_text.to_lowercase();

    for rule in RULES {
        if rule.trigger.fires(&normalized) {
            return Resolution::Matched(rule.answer);
        }
    }

    Resolution::Unmatched
}
