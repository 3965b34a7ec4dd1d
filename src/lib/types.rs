use std::fmt;
use std::ops::{Add, Div, Sub};

use im::HashMap;
use rust_decimal::Decimal;

#[derive(Default, Hash, Eq, PartialEq, Clone, Debug)]
pub struct Participant(String);

impl Participant {
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Debug)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    /// Parses a decimal currency string. Amounts come straight from the
    /// ledger as text, so they stay in fixed decimal rather than passing
    /// through binary floating point.
    pub fn parse(value: &str) -> Option<Self> {
        value.parse::<Decimal>().ok().map(Self)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Two fractional digits, banker's rounding. Accumulation keeps full
    /// precision; only the report formatter calls this.
    pub fn rounded_display(&self) -> Decimal {
        self.0.round_dp(2)
    }
}

impl Add for MonetaryAmount {
    type Output = MonetaryAmount;

    fn add(self, rhs: Self) -> Self::Output {
        MonetaryAmount(self.value() + rhs.value())
    }
}

impl Sub for MonetaryAmount {
    type Output = MonetaryAmount;

    fn sub(self, rhs: Self) -> Self::Output {
        MonetaryAmount(self.value() - rhs.value())
    }
}

impl Div<usize> for MonetaryAmount {
    type Output = MonetaryAmount;

    fn div(self, rhs: usize) -> Self::Output {
        MonetaryAmount(self.value() / Decimal::from(rhs))
    }
}

/// A single shared expense from the ledger.
///
/// `location` is informational only. `beneficiaries` is never empty; the
/// loader rejects rows with nobody to split with before they get here.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub location: String,
    pub amount: MonetaryAmount,
    pub payer: Participant,
    pub beneficiaries: Vec<Participant>,
}

/// The configured, closed set of recognized identifiers. The two lists may
/// overlap or be identical, and their order drives the report ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub payers: Vec<Participant>,
    pub payees: Vec<Participant>,
}

impl Roster {
    pub fn new(payers: Vec<Participant>, payees: Vec<Participant>) -> Self {
        Self { payers, payees }
    }

    pub fn is_payer(&self, participant: &Participant) -> bool {
        self.payers.contains(participant)
    }

    pub fn is_payee(&self, participant: &Participant) -> bool {
        self.payees.contains(participant)
    }
}

/// Gross amount each debtor owes each creditor, keyed `(creditor, debtor)`.
///
/// Every `payers x payees` pair starts at zero, and reads outside the
/// initialized key set also default to zero, so reverse lookups for
/// asymmetric rosters never fail.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct OweMatrix(HashMap<(Participant, Participant), MonetaryAmount>);

impl OweMatrix {
    pub fn for_roster(roster: &Roster) -> Self {
        let pairs = roster.payers.iter().flat_map(|creditor| {
            roster.payees.iter().map(move |debtor| {
                (
                    (creditor.clone(), debtor.clone()),
                    MonetaryAmount::default(),
                )
            })
        });
        Self(pairs.collect())
    }

    pub fn owed(&self, creditor: &Participant, debtor: &Participant) -> MonetaryAmount {
        self.0
            .get(&(creditor.clone(), debtor.clone()))
            .copied()
            .unwrap_or_default()
    }

    pub fn credit(
        &self,
        creditor: &Participant,
        debtor: &Participant,
        amount: MonetaryAmount,
    ) -> Self {
        let current = self.owed(creditor, debtor);
        self.with_owed(creditor, debtor, current + amount)
    }

    pub fn with_owed(
        &self,
        creditor: &Participant,
        debtor: &Participant,
        amount: MonetaryAmount,
    ) -> Self {
        Self(self.0.update((creditor.clone(), debtor.clone()), amount))
    }
}

/// A single netted debt: `debtor` pays `creditor` `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct Obligation {
    pub debtor: Participant,
    pub creditor: Participant,
    pub amount: MonetaryAmount,
}

#[derive(Default, Debug, PartialEq)]
pub struct Settlement(pub Vec<Obligation>);

/// Non-fatal accumulation skips. The engine returns these alongside the
/// matrix instead of logging them itself, so it stays free of I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineWarning {
    /// The row's payer is not a configured payer; the whole row was skipped.
    UnknownPayer {
        payer: Participant,
        location: String,
    },
    /// One beneficiary is not a configured payee; only their share was
    /// skipped. The beneficiary still counted toward the fair share divisor.
    UnknownPayee {
        payee: Participant,
        payer: Participant,
        location: String,
    },
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineWarning::UnknownPayer { payer, location } => write!(
                f,
                "payer '{}' is not a configured payer, skipping row for '{}'",
                payer, location
            ),
            EngineWarning::UnknownPayee {
                payee,
                payer,
                location,
            } => write!(
                f,
                "payee '{}' (paid by '{}' at '{}') is not a configured payee, skipping their share",
                payee, payer, location
            ),
        }
    }
}
