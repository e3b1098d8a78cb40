//! Billing types; their helpers live in `crate::model::StringUtil`.

use std::fmt;

use static_string_util::{CreateString, static_string_util};

use crate::model::StringUtil;

/// An issued invoice.
#[static_string_util]
pub struct Invoice {
    pub(crate) number: u32,
    pub(crate) total_cents: u64,
}

impl Invoice {
    /// Creates an invoice.
    #[must_use]
    pub const fn new(number: u32, total_cents: u64) -> Self {
        Self {
            number,
            total_cents,
        }
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&StringUtil::create_string(self))
    }
}
