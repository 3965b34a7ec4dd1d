use im::Vector;

use crate::error::SettleError;
use crate::types::{
    EngineWarning, MonetaryAmount, Obligation, OweMatrix, Participant, Roster, Settlement,
    Transaction,
};
use crate::utils::Appended;

type Accumulated = (OweMatrix, Vector<EngineWarning>);

fn distribute_shares(
    matrix: OweMatrix,
    warnings: Vector<EngineWarning>,
    transaction: &Transaction,
    roster: &Roster,
) -> Accumulated {
    // Unknown beneficiaries still count toward the divisor; only their
    // share is withheld from the matrix.
    let fair_share = transaction.amount / transaction.beneficiaries.len();

    transaction
        .beneficiaries
        .iter()
        .fold((matrix, warnings), |(matrix, warnings), beneficiary| {
            if roster.is_payee(beneficiary) {
                (
                    matrix.credit(&transaction.payer, beneficiary, fair_share),
                    warnings,
                )
            } else {
                (
                    matrix,
                    warnings.appended(EngineWarning::UnknownPayee {
                        payee: beneficiary.clone(),
                        payer: transaction.payer.clone(),
                        location: transaction.location.clone(),
                    }),
                )
            }
        })
}

fn apply_transaction(
    accumulated: Accumulated,
    transaction: Transaction,
    roster: &Roster,
) -> Result<Accumulated, SettleError> {
    let (matrix, warnings) = accumulated;

    if !roster.is_payer(&transaction.payer) {
        return Ok((
            matrix,
            warnings.appended(EngineWarning::UnknownPayer {
                payer: transaction.payer.clone(),
                location: transaction.location.clone(),
            }),
        ));
    }

    // The loader never produces one of these; if one arrives anyway the
    // ledger contract is broken and a partial settlement would be wrong.
    if transaction.beneficiaries.is_empty() {
        return Err(SettleError::InvalidTransaction(format!(
            "expense at '{}' has no beneficiaries",
            transaction.location
        )));
    }

    Ok(distribute_shares(matrix, warnings, &transaction, roster))
}

/// Distributes every transaction's fair share into the owe matrix.
///
/// Transactions are processed in input order so warnings are reproducible;
/// the matrix itself is order independent since shares only ever add.
pub fn accumulate(
    transactions: Box<dyn Iterator<Item = Transaction>>,
    roster: &Roster,
) -> Result<Accumulated, SettleError> {
    transactions.fold(
        Ok((OweMatrix::for_roster(roster), Vector::new())),
        |accumulated, transaction| apply_transaction(accumulated?, transaction, roster),
    )
}

fn collapse_pair(matrix: OweMatrix, x: &Participant, y: &Participant) -> OweMatrix {
    let a = matrix.owed(x, y);
    let b = matrix.owed(y, x);

    if a.is_zero() || b.is_zero() {
        return matrix;
    }

    // Both directions owe. The side owed the larger gross amount keeps the
    // difference, the other drops to zero; equal debts cancel completely.
    if a > b {
        matrix
            .with_owed(x, y, a - b)
            .with_owed(y, x, MonetaryAmount::default())
    } else {
        matrix
            .with_owed(y, x, b - a)
            .with_owed(x, y, MonetaryAmount::default())
    }
}

/// Collapses mutual debts between every pair, then emits the surviving
/// obligations in roster order: creditors in configured payer order, and
/// within each creditor, debtors in configured payee order. Self entries
/// are tracked during accumulation but never emitted.
pub fn net(matrix: &OweMatrix, roster: &Roster) -> Settlement {
    let collapsed = roster
        .payers
        .iter()
        .flat_map(|x| roster.payees.iter().map(move |y| (x, y)))
        .fold(matrix.clone(), |acc, (x, y)| collapse_pair(acc, x, y));

    let obligations = roster
        .payers
        .iter()
        .flat_map(|creditor| roster.payees.iter().map(move |debtor| (creditor, debtor)))
        .filter(|(creditor, debtor)| creditor != debtor)
        .filter_map(|(creditor, debtor)| {
            let amount = collapsed.owed(creditor, debtor);
            amount.is_positive().then(|| Obligation {
                debtor: debtor.clone(),
                creditor: creditor.clone(),
                amount,
            })
        })
        .collect();

    Settlement(obligations)
}
