//! FAQ chatbot: canned answers matched against typed questions.
//!
//! Suggestions and typed text both append a question and answer pair to a
//! [`Conversation`]. Typed text is matched case-insensitively, first against
//! questions containing it, then against questions it contains. Anything
//! else gets [`FALLBACK_REPLY`], which points at the WhatsApp link.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// One canned question and its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Reply when nothing matches.
pub const FALLBACK_REPLY: &str =
    "Please select a question from the suggestions below, or contact us on WhatsApp.";

/// WhatsApp number in E.164 form without the leading `+`.
pub const WHATSAPP_NUMBER: &str = "923296273720";

const WHATSAPP_GREETING: &str = "Hi Healthspire! I have a question.";

// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `wa.me` link opening a chat prefilled with a greeting.
///
/// # Examples
/// ```
/// assert_eq!(
///     site_client::chatbot::whatsapp_url(),
///     "https://wa.me/923296273720?text=Hi%20Healthspire!%20I%20have%20a%20question."
/// );
/// ```
#[must_use]
pub fn whatsapp_url() -> String {
    format!(
        "https://wa.me/{WHATSAPP_NUMBER}?text={}",
        utf8_percent_encode(WHATSAPP_GREETING, URI_COMPONENT)
    )
}

/// The questions offered as suggestions.
pub const FAQS: &[Faq] = &[
    Faq {
        question: "What is Healthspire?",
        answer: "Healthspire is a Gujranwala-based software company providing smart healthcare \
                 management solutions including Hospital, Pharmacy, and Laboratory Management \
                 Systems.",
    },
    Faq {
        question: "Where is Healthspire located?",
        answer: "Healthspire is located at Peoples Colony, Approach Road, Gujranwala, Pakistan.",
    },
    Faq {
        question: "What software solutions do you provide?",
        answer: "We provide three main software solutions: Hospital Management System, Pharmacy \
                 Management System, and Laboratory Management System.",
    },
    Faq {
        question: "What are the pricing plans for the Hospital Management System?",
        answer: "The Hospital Management System comes with three plans: Basic (PKR 50,000), \
                 Professional - Most Popular (PKR 450,000), and Enterprise (PKR 150,000). All \
                 are lifetime licenses.",
    },
    Faq {
        question: "What features are included in the Hospital Basic plan?",
        answer: "Hospital Basic plan includes OPD, data backup, receptionist features, doctor \
                 finance token generation, report management, manual prescription, patient \
                 medical history, and doctor salary management.",
    },
    Faq {
        question: "What features are included in the Hospital Professional plan?",
        answer: "Hospital Professional plan includes all Basic features plus salary, expenses, \
                 IPD, networking, attendance, staff management, doctor-wise revenue, and total \
                 finance management.",
    },
    Faq {
        question: "What features are included in the Hospital Enterprise plan?",
        answer: "Hospital Enterprise plan includes all Professional features plus panels, \
                 laboratory integration, pharmacy integration, networking, and an advanced \
                 finance system.",
    },
    Faq {
        question: "What are the pricing plans for the Pharmacy Management System?",
        answer: "The Pharmacy Management System has three plans: Basic (PKR 20,000), \
                 Professional - Most Popular (PKR 60,000), and Enterprise (PKR 40,000). All are \
                 lifetime licenses.",
    },
    Faq {
        question: "What features are included in the Pharmacy Basic plan?",
        answer: "Pharmacy Basic plan includes a dashboard, point of sale (POS), inventory, \
                 reports, user management, settings, and a built-in 20,000+ medicines database.",
    },
    Faq {
        question: "What features are included in the Pharmacy Professional plan?",
        answer: "Pharmacy Professional plan includes all Basic features plus daily reports, \
                 audit logs, expenses, prescriptions, staff attendance, salary management, modern \
                 analysis system, advanced modules, and a 50,000+ medicines database.",
    },
    Faq {
        question: "What features are included in the Pharmacy Enterprise plan?",
        answer: "Pharmacy Enterprise plan includes all Professional features plus supplier \
                 records, customer & supplier returns, credit-customer records, text modules, \
                 and enhanced reporting.",
    },
    Faq {
        question: "What are the pricing plans for the Lab Management System?",
        answer: "The Lab Management System has a single lifetime plan priced at PKR 50,000.",
    },
    Faq {
        question: "What features are included in the Lab Management System?",
        answer: "The Lab Management System includes sampling, sample tracking, patient records, \
                 reports with 20+ templates, token generation, finance management, analytics, \
                 backup system, and advanced settings.",
    },
    Faq {
        question: "Are your software solutions subscription-based or lifetime?",
        answer: "All of our software solutions are offered as lifetime licenses. You only pay \
                 once.",
    },
    Faq {
        question: "Can I upgrade my plan later?",
        answer: "Yes, you can upgrade from Basic to Professional or Enterprise anytime by paying \
                 the difference in cost.",
    },
    Faq {
        question: "Do you provide training and support?",
        answer: "Yes, we provide complete training, setup assistance, and lifetime support for \
                 all our software solutions.",
    },
    Faq {
        question: "Do you offer data backup and security?",
        answer: "Yes, all our systems have built-in data backup and follow strict security \
                 protocols to protect patient and financial records.",
    },
    Faq {
        question: "Can your software be customized for our hospital or pharmacy?",
        answer: "Yes, Healthspire provides customization options to meet specific needs of \
                 hospitals, pharmacies, and labs.",
    },
    Faq {
        question: "Do your systems support networking and multi-user access?",
        answer: "Yes, our Professional and Enterprise plans support networking and multiple \
                 users simultaneously.",
    },
    Faq {
        question: "Does the Pharmacy system come with a medicine database?",
        answer: "Yes, the Basic plan includes a 20,000+ medicines database, while Professional \
                 and Enterprise plans include a 50,000+ medicines database.",
    },
    Faq {
        question: "What makes the Professional plan the most popular?",
        answer: "The Professional plan balances affordability with powerful features like \
                 advanced reporting, expenses, staff management, networking, and financial \
                 tracking, making it ideal for most businesses.",
    },
    Faq {
        question: "How can I purchase your software?",
        answer: "You can contact Healthspire through our office at Gujranwala Peoples Colony or \
                 request a demo online. Payment can be made via bank transfer or in person.",
    },
];

/// Find the FAQ answering `text`.
///
/// Questions containing `text` win over questions contained in it; within
/// each pass the first FAQ in list order wins. Blank text matches nothing.
#[must_use]
pub fn match_faq<'a>(faqs: &'a [Faq], text: &str) -> Option<&'a Faq> {
    let wanted = text.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    faqs.iter()
        .find(|faq| faq.question.to_lowercase().contains(&wanted))
        .or_else(|| {
            faqs.iter()
                .find(|faq| wanted.contains(&faq.question.to_lowercase()))
        })
}

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
}

/// Message log of one chat panel.
#[derive(Debug, Clone)]
pub struct Conversation {
    faqs: &'static [Faq],
    messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Empty conversation over [`FAQS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_faqs(FAQS)
    }

    #[must_use]
    pub fn with_faqs(faqs: &'static [Faq]) -> Self {
        Self {
            faqs,
            messages: Vec::new(),
        }
    }

    /// Suggestions shown above the log, in list order.
    #[must_use]
    pub fn suggestions(&self) -> &'static [Faq] {
        self.faqs
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append `faq`'s question and answer.
    pub fn choose(&mut self, faq: &Faq) {
        self.push_pair(faq.question, faq.answer);
    }

    /// Answer typed `text` and return the reply.
    ///
    /// A match records the FAQ's own question, not the typed text. Blank
    /// input is ignored and returns `None`.
    ///
    /// # Examples
    /// ```
    /// use site_client::chatbot::{Conversation, FALLBACK_REPLY};
    ///
    /// let mut chat = Conversation::new();
    /// assert_eq!(chat.send("   "), None);
    /// assert_eq!(chat.send("weather?"), Some(FALLBACK_REPLY));
    /// assert_eq!(chat.messages().len(), 2);
    /// ```
    pub fn send(&mut self, text: &str) -> Option<&'static str> {
        let typed = text.trim();
        if typed.is_empty() {
            return None;
        }
        match match_faq(self.faqs, typed) {
            Some(faq) => {
                self.push_pair(faq.question, faq.answer);
                Some(faq.answer)
            }
            None => {
                self.push_pair(typed, FALLBACK_REPLY);
                Some(FALLBACK_REPLY)
            }
        }
    }

    fn push_pair(&mut self, question: &str, answer: &str) {
        self.messages.push(Message {
            speaker: Speaker::User,
            text: question.to_owned(),
        });
        self.messages.push(Message {
            speaker: Speaker::Bot,
            text: answer.to_owned(),
        });
    }
}
