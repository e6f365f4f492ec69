//! Inspirational quotes shown on the dashboard.

/// How often the dashboard advances to the next quote.
pub const QUOTE_ROTATE_MS: u32 = 7_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub static QUOTES: &[Quote] = &[
    Quote { text: "The only way to do great work is to love what you do.", author: "Steve Jobs" },
    Quote { text: "Strive not to be a success, but rather to be of value.", author: "Albert Einstein" },
    Quote { text: "The mind is everything. What you think you become.", author: "Buddha" },
    Quote { text: "Your time is limited, don't waste it living someone else's life.", author: "Steve Jobs" },
    Quote { text: "The best way to predict the future is to create it.", author: "Peter Drucker" },
    Quote { text: "Success is not final, failure is not fatal: It is the courage to continue that counts.", author: "Winston Churchill" },
    Quote { text: "Believe you can and you're halfway there.", author: "Theodore Roosevelt" },
    Quote { text: "It does not matter how slowly you go as long as you do not stop.", author: "Confucius" },
    Quote { text: "The future belongs to those who believe in the beauty of their dreams.", author: "Eleanor Roosevelt" },
    Quote { text: "Act as if what you do makes a difference. It does.", author: "William James" },
];

/// Cycles through `QUOTES` in order, wrapping at the end.
#[derive(Debug, Clone, Default)]
pub struct QuoteRotator {
    index: usize,
}

impl QuoteRotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static Quote {
        &QUOTES[self.index]
    }

    pub fn advance(&mut self) -> &'static Quote {
        self.index = (self.index + 1) % QUOTES.len();
        self.current()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
