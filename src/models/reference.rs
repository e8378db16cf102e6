//! Canonical reference tables for enumerated request parameters.
//!
//! Each table is a named, immutable set shared by every service that
//! accepts the parameter. Services validate caller input against these
//! sets before any request is built, so an invalid value never reaches the
//! network.

use std::fmt;

use crate::{Error, Result};

/// Case rule applied to input before it is compared with a [`NameSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Compare in upper case (statuses, symbols, option parameters)
    Upper,
    /// Compare in lower case (market ids, projections, chart types)
    Lower,
}

/// A whitelist of string values.
#[derive(Debug, Clone, Copy)]
pub struct NameSet {
    parameter: &'static str,
    case: Case,
    values: &'static [&'static str],
}

impl NameSet {
    const fn new(parameter: &'static str, case: Case, values: &'static [&'static str]) -> Self {
        Self {
            parameter,
            case,
            values,
        }
    }

    /// Name of the request parameter this set constrains.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// The valid values, in documented order.
    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    /// Trim and case-normalize raw input.
    pub fn normalize(&self, input: &str) -> String {
        match self.case {
            Case::Upper => input.trim().to_uppercase(),
            Case::Lower => input.trim().to_lowercase(),
        }
    }

    /// Returns `true` if the normalized input is in the set.
    pub fn contains(&self, input: &str) -> bool {
        let normalized = self.normalize(input);
        self.values.iter().any(|v| *v == normalized)
    }

    /// Normalize the input and return the matching canonical value.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] naming the normalized value and the full
    /// set.
    pub fn validate(&self, input: &str) -> Result<&'static str> {
        let normalized = self.normalize(input);
        self.values
            .iter()
            .copied()
            .find(|v| *v == normalized)
            .ok_or_else(|| Error::invalid_parameter(self.parameter, normalized, self.values))
    }

    /// Validate every input, preserving order.
    pub fn validate_all<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Vec<&'static str>> {
        inputs.iter().map(|i| self.validate(i.as_ref())).collect()
    }
}

impl fmt::Display for NameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values.join(", "))
    }
}

/// A whitelist of integer values.
#[derive(Debug, Clone, Copy)]
pub struct NumberSet {
    parameter: &'static str,
    values: &'static [u32],
}

impl NumberSet {
    const fn new(parameter: &'static str, values: &'static [u32]) -> Self {
        Self { parameter, values }
    }

    /// Name of the request parameter this set constrains.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    /// The valid values, in documented order.
    pub fn values(&self) -> &'static [u32] {
        self.values
    }

    /// Returns `true` if the value is in the set.
    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }

    /// Return the value if it is in the set.
    pub fn validate(&self, value: u32) -> Result<u32> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(Error::invalid_parameter(
                self.parameter,
                value.to_string(),
                self.values,
            ))
        }
    }
}

/// Market identifiers accepted by the market-hours endpoints.
pub const MARKETS: NameSet = NameSet::new(
    "market",
    Case::Lower,
    &["equity", "option", "bond", "future", "forex"],
);

/// Order statuses accepted as an order-list filter.
pub const ORDER_STATUSES: NameSet = NameSet::new(
    "status",
    Case::Upper,
    &[
        "AWAITING_PARENT_ORDER",
        "AWAITING_CONDITION",
        "AWAITING_STOP_CONDITION",
        "AWAITING_MANUAL_REVIEW",
        "ACCEPTED",
        "AWAITING_UR_OUT",
        "PENDING_ACTIVATION",
        "QUEUED",
        "WORKING",
        "REJECTED",
        "PENDING_CANCEL",
        "CANCELED",
        "PENDING_REPLACE",
        "REPLACED",
        "FILLED",
        "EXPIRED",
        "NEW",
        "AWAITING_RELEASE_TIME",
        "PENDING_ACKNOWLEDGEMENT",
        "PENDING_RECALL",
        "UNKNOWN",
    ],
);

/// Option chain contract types.
pub const CONTRACT_TYPES: NameSet =
    NameSet::new("contractType", Case::Upper, &["CALL", "PUT", "ALL"]);

/// Option chain strategies.
pub const OPTION_STRATEGIES: NameSet = NameSet::new(
    "strategy",
    Case::Upper,
    &[
        "SINGLE",
        "ANALYTICAL",
        "COVERED",
        "VERTICAL",
        "CALENDAR",
        "STRANGLE",
        "STRADDLE",
        "BUTTERFLY",
        "CONDOR",
        "DIAGONAL",
        "COLLAR",
        "ROLL",
    ],
);

/// Option chain strike ranges (in, near and out of the money).
pub const STRIKE_RANGES: NameSet = NameSet::new("range", Case::Upper, &["ITM", "NTM", "OTM"]);

/// Option chain expiration months.
pub const EXPIRATION_MONTHS: NameSet = NameSet::new(
    "expMonth",
    Case::Upper,
    &[
        "ALL", "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ],
);

/// Option chain option types: standard, non-standard, or both.
pub const OPTION_TYPES: NameSet = NameSet::new("optionType", Case::Upper, &["S", "NS", "ALL"]);

/// Client entitlements for option chains (non-pro, pro-non-pro, pro).
pub const ENTITLEMENTS: NameSet = NameSet::new("entitlement", Case::Upper, &["NP", "PN", "PP"]);

/// Indices and exchanges accepted by the movers endpoint.
pub const MOVER_INDICES: NameSet = NameSet::new(
    "symbol_id",
    Case::Upper,
    &[
        "$DJI",
        "$COMPX",
        "$SPX",
        "NYSE",
        "NASDAQ",
        "OTCBB",
        "INDEX_ALL",
        "EQUITY_ALL",
        "OPTION_ALL",
        "OPTION_PUT",
        "OPTION_CALL",
    ],
);

/// Sort keys for movers.
pub const MOVER_SORTS: NameSet = NameSet::new(
    "sort",
    Case::Upper,
    &["VOLUME", "TRADES", "PERCENT_CHANGE_UP", "PERCENT_CHANGE_DOWN"],
);

/// Mover frequencies in minutes; 0 means the provider default.
pub const MOVER_FREQUENCIES: NumberSet = NumberSet::new("frequency", &[0, 1, 5, 10, 30, 60]);

/// Instrument search projections.
pub const PROJECTIONS: NameSet = NameSet::new(
    "projection",
    Case::Lower,
    &[
        "symbol-search",
        "symbol-regex",
        "desc-search",
        "desc-regex",
        "search",
        "fundamental",
    ],
);

/// Root nodes that can be requested from the quote endpoints.
pub const QUOTE_FIELDS: NameSet = NameSet::new(
    "fields",
    Case::Lower,
    &["quote", "fundamental", "extended", "reference", "regular"],
);

/// Price history chart period types.
pub const PERIOD_TYPES: NameSet =
    NameSet::new("periodType", Case::Lower, &["day", "month", "year", "ytd"]);

/// Price history candle frequency types.
pub const FREQUENCY_TYPES: NameSet = NameSet::new(
    "frequencyType",
    Case::Lower,
    &["minute", "daily", "weekly", "monthly"],
);

/// What a price-history period type allows.
#[derive(Debug, Clone, Copy)]
pub struct PeriodRule {
    /// The period type this rule belongs to
    pub period_type: &'static str,
    /// Valid `period` values
    pub periods: &'static [u32],
    /// Period sent when the caller gives none
    pub default_period: u32,
    /// Valid `frequencyType` values
    pub frequency_types: &'static [&'static str],
    /// Frequency type the provider uses when none is sent
    pub default_frequency_type: &'static str,
}

/// What a price-history frequency type allows.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyRule {
    /// The frequency type this rule belongs to
    pub frequency_type: &'static str,
    /// Valid `frequency` values
    pub frequencies: &'static [u32],
    /// Frequency sent when the caller gives none
    pub default_frequency: u32,
}

/// Period rules, one per entry of [`PERIOD_TYPES`].
pub const PERIOD_RULES: &[PeriodRule] = &[
    PeriodRule {
        period_type: "day",
        periods: &[1, 2, 3, 4, 5, 10],
        default_period: 10,
        frequency_types: &["minute"],
        default_frequency_type: "minute",
    },
    PeriodRule {
        period_type: "month",
        periods: &[1, 2, 3, 6],
        default_period: 1,
        frequency_types: &["daily", "weekly"],
        default_frequency_type: "weekly",
    },
    PeriodRule {
        period_type: "year",
        periods: &[1, 2, 3, 5, 10, 15, 20],
        default_period: 1,
        frequency_types: &["daily", "weekly", "monthly"],
        default_frequency_type: "monthly",
    },
    PeriodRule {
        period_type: "ytd",
        periods: &[1],
        default_period: 1,
        frequency_types: &["daily", "weekly"],
        default_frequency_type: "weekly",
    },
];

/// Frequency rules, one per entry of [`FREQUENCY_TYPES`].
pub const FREQUENCY_RULES: &[FrequencyRule] = &[
    FrequencyRule {
        frequency_type: "minute",
        frequencies: &[1, 5, 10, 15, 30],
        default_frequency: 1,
    },
    FrequencyRule {
        frequency_type: "daily",
        frequencies: &[1],
        default_frequency: 1,
    },
    FrequencyRule {
        frequency_type: "weekly",
        frequencies: &[1],
        default_frequency: 1,
    },
    FrequencyRule {
        frequency_type: "monthly",
        frequencies: &[1],
        default_frequency: 1,
    },
];

/// Look up the rule for a canonical period type.
pub fn period_rule(period_type: &str) -> Option<&'static PeriodRule> {
    PERIOD_RULES.iter().find(|r| r.period_type == period_type)
}

/// Look up the rule for a canonical frequency type.
pub fn frequency_rule(frequency_type: &str) -> Option<&'static FrequencyRule> {
    FREQUENCY_RULES
        .iter()
        .find(|r| r.frequency_type == frequency_type)
}
