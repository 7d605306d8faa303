use std::str::FromStr;

use crate::error::PageError;

// Everything that can happen to the page from outside: viewer input, tab
// visibility, errors raised elsewhere, and the end of the session.
// Timer ticks come from the scheduler, not through here.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Any checkout button pressed
    Checkout,

    // Plain checkout link, no tracking or query handling
    DirectCheckout,

    // Coupon box submitted with this text
    Coupon(String),

    // Thumbnail `index` of a product gallery picked
    Gallery { product: String, index: usize },

    // Review navigation button pressed
    ReviewGroup(u8),

    // Page scrolled to this offset (px)
    Scroll { y: f64 },

    // Tab hidden or shown again
    Visibility { hidden: bool },

    // Uncaught failure somewhere on the page
    RuntimeError(String),

    // Page closed / Ctrl+C
    Shutdown,
}

impl FromStr for Event {
    type Err = PageError;

    /// One line of the interactive driver, e.g. `coupon bfkit` or
    /// `gallery mouse 2`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let bad = || PageError::UnknownCommand(line.to_string());

        let event = match command {
            "checkout" => Event::Checkout,
            "direct" => Event::DirectCheckout,
            "coupon" => Event::Coupon(rest.to_string()),
            "gallery" => {
                let (product, index) = rest.split_once(char::is_whitespace).ok_or_else(bad)?;
                Event::Gallery {
                    product: product.to_string(),
                    index: index.trim().parse().map_err(|_| bad())?,
                }
            }
            "reviews" => Event::ReviewGroup(rest.parse().map_err(|_| bad())?),
            "scroll" => Event::Scroll {
                y: rest.parse().map_err(|_| bad())?,
            },
            "hide" => Event::Visibility { hidden: true },
            "show" => Event::Visibility { hidden: false },
            "error" => Event::RuntimeError(rest.to_string()),
            "quit" | "exit" => Event::Shutdown,
            _ => return Err(bad()),
        };
        Ok(event)
    }
}
