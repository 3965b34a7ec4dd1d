use std::{fmt, fs::File, io, io::Read, path::Path};

use crate::error::SettleError;
use crate::types::{MonetaryAmount, Participant, Settlement, Transaction};

/// Malformed ledger rows that were dropped rather than failing the run.
#[derive(Debug, Clone, PartialEq)]
pub enum RowWarning {
    /// The row has fewer columns than the configured layout needs.
    ShortRow { line: u64 },
    /// The beneficiaries field was empty after stripping whitespace.
    MissingBeneficiaries { line: u64 },
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowWarning::ShortRow { line } => {
                write!(f, "skipping malformed ledger row on line {}: too few columns", line)
            }
            RowWarning::MissingBeneficiaries { line } => {
                write!(f, "skipping ledger row on line {}: nobody to split with", line)
            }
        }
    }
}

pub fn load_transactions(
    path: &Path,
    split_column_index: usize,
) -> Result<(Vec<Transaction>, Vec<RowWarning>), SettleError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SettleError::InputNotFound(path.to_path_buf()),
        _ => SettleError::Io(e),
    })?;
    read_transactions(file, split_column_index)
}

/// Reads ledger rows from any source. The beneficiaries column index is
/// configuration driven, so rows are handled positionally rather than
/// through serde; the first three columns are always location, amount and
/// payer.
pub fn read_transactions<R: Read>(
    source: R,
    split_column_index: usize,
) -> Result<(Vec<Transaction>, Vec<RowWarning>), SettleError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut transactions: Vec<Transaction> = Vec::new();
    let mut warnings: Vec<RowWarning> = Vec::new();

    for row in reader.records() {
        let record = row?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let required_columns = split_column_index.max(2) + 1;
        if record.len() < required_columns {
            warnings.push(RowWarning::ShortRow { line });
            continue;
        }

        // Interior empty segments ("J,,P") are kept as beneficiary entries
        // so they count toward the divisor; only an entirely empty field
        // drops the row.
        let split_field: String = record[split_column_index]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if split_field.is_empty() {
            warnings.push(RowWarning::MissingBeneficiaries { line });
            continue;
        }
        let beneficiaries: Vec<Participant> =
            split_field.split(',').map(Participant::new).collect();

        // corrupt amounts fail the run, no point in an incomplete settlement
        let amount = match MonetaryAmount::parse(&record[1]) {
            Some(amount) => amount,
            None => {
                return Err(SettleError::InvalidTransaction(format!(
                    "could not interpret amount '{}' on line {}",
                    &record[1], line
                )))
            }
        };

        transactions.push(Transaction {
            location: record[0].to_string(),
            amount,
            payer: Participant::new(&record[2]),
            beneficiaries,
        });
    }

    Ok((transactions, warnings))
}

/// One line per obligation: `<debtor> owes <creditor> $ <amount>`, amounts
/// rounded to 2 fractional digits.
pub fn render_report(settlement: &Settlement) -> String {
    settlement
        .0
        .iter()
        .map(|obligation| {
            format!(
                "{} owes {} $ {:.2}\n",
                obligation.debtor,
                obligation.creditor,
                obligation.amount.rounded_display()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::error::SettleError;
    use crate::types::{MonetaryAmount, Obligation, Participant, Settlement, Transaction};

    use super::{read_transactions, render_report, RowWarning};

    fn read(ledger: &str) -> (Vec<Transaction>, Vec<RowWarning>) {
        read_transactions(ledger.as_bytes(), 3).unwrap()
    }

    fn participants(ids: &[&str]) -> Vec<Participant> {
        ids.iter().map(|id| Participant::new(id)).collect()
    }

    #[test]
    fn standard_rows_are_parsed() {
        let ledger = "Location,Amount,Paid By,Paid For\n\
                      Denny's,62.36,P,\"J,P,T,C,E\"\n\
                      Croissant,8,E,J\n";

        let (transactions, warnings) = read(ledger);

        assert_eq!(
            transactions,
            vec![
                Transaction {
                    location: "Denny's".to_string(),
                    amount: MonetaryAmount::parse("62.36").unwrap(),
                    payer: Participant::new("P"),
                    beneficiaries: participants(&["J", "P", "T", "C", "E"]),
                },
                Transaction {
                    location: "Croissant".to_string(),
                    amount: MonetaryAmount::parse("8").unwrap(),
                    payer: Participant::new("E"),
                    beneficiaries: participants(&["J"]),
                },
            ]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn short_rows_are_skipped_with_a_warning() {
        let ledger = "Location,Amount,Paid By,Paid For\n\
                      Denny's,62.36,P,\"J,P\"\n\
                      In-N-Out,48.45,J\n\
                      T Shirt,26.54,E,J\n";

        let (transactions, warnings) = read(ledger);

        assert_eq!(transactions.len(), 2);
        assert_eq!(warnings, vec![RowWarning::ShortRow { line: 3 }]);
    }

    #[test]
    fn empty_beneficiaries_field_skips_the_row() {
        let ledger = "Location,Amount,Paid By,Paid For\n\
                      Trip to Mars,10000,Elon,\"\"\n";

        let (transactions, warnings) = read(ledger);

        assert!(transactions.is_empty());
        assert_eq!(warnings, vec![RowWarning::MissingBeneficiaries { line: 2 }]);
    }

    #[test]
    fn whitespace_in_beneficiaries_is_stripped() {
        let ledger = "Location,Amount,Paid By,Paid For\n\
                      Dumplings,20,J,\"E, P\"\n";

        let (transactions, _) = read(ledger);

        assert_eq!(transactions[0].beneficiaries, participants(&["E", "P"]));
    }

    #[test]
    fn interior_empty_segments_are_preserved() {
        let ledger = "Location,Amount,Paid By,Paid For\n\
                      Dumplings,20,J,\"E,,P\"\n";

        let (transactions, _) = read(ledger);

        assert_eq!(transactions[0].beneficiaries, participants(&["E", "", "P"]));
    }

    #[test]
    fn blank_lines_are_tolerated() {
        let ledger = "Location,Amount,Paid By,Paid For\n\
                      Denny's,62.36,P,\"J,P\"\n\
                      \n\
                      Croissant,8,E,J\n";

        let (transactions, warnings) = read(ledger);

        assert_eq!(transactions.len(), 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unparseable_amount_is_fatal() {
        let ledger = "Location,Amount,Paid By,Paid For\n\
                      Groceries,not-a-number,P,J\n";

        let result = read_transactions(ledger.as_bytes(), 3);

        assert!(matches!(result, Err(SettleError::InvalidTransaction(_))));
    }

    #[test]
    fn beneficiaries_column_is_configurable() {
        let ledger = "Location,Amount,Paid By,Notes,Paid For\n\
                      Denny's,62.36,P,breakfast,\"J,P\"\n";

        let (transactions, _) = read_transactions(ledger.as_bytes(), 4).unwrap();

        assert_eq!(transactions[0].beneficiaries, participants(&["J", "P"]));
    }

    #[test]
    fn empty_ledger_produces_no_transactions() {
        let ledger = "Location,Amount,Paid By,Paid For\n";

        let (transactions, warnings) = read(ledger);

        assert!(transactions.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn report_lines_are_rendered_to_two_decimals() {
        let settlement = Settlement(vec![
            Obligation {
                debtor: Participant::new("Mike"),
                creditor: Participant::new("Bob"),
                amount: MonetaryAmount::parse("5").unwrap(),
            },
            Obligation {
                debtor: Participant::new("J"),
                creditor: Participant::new("P"),
                amount: MonetaryAmount::parse("28.525").unwrap(),
            },
        ]);

        let report = render_report(&settlement);

        assert_eq!(report, "Mike owes Bob $ 5.00\nJ owes P $ 28.52\n");
    }

    #[test]
    fn empty_settlement_renders_nothing() {
        assert_eq!(render_report(&Settlement::default()), "");
    }
}
