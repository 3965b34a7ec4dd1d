use std::fmt::Write;

// Only used during testing so no need to return result
pub fn create_report(rows: Vec<[&'static str; 3]>) -> String {
    let mut report = String::new();
    for [debtor, creditor, amount] in rows {
        writeln!(report, "{} owes {} $ {}", debtor, creditor, amount).unwrap();
    }
    report
}

#[cfg(test)]
mod tests {
    use crate::create_report;

    #[test]
    fn create_report_creates_single_line() {
        let sut = create_report(vec![["Mike", "Bob", "5.00"]]);
        let expected = String::from("Mike owes Bob $ 5.00\n");
        assert_eq!(sut, expected);
    }

    #[test]
    fn create_report_creates_multiple_lines() {
        let sut = create_report(vec![["Mike", "Bob", "5.00"], ["Mike", "Joseph", "5.00"]]);
        let expected = String::from("Mike owes Bob $ 5.00\nMike owes Joseph $ 5.00\n");
        assert_eq!(sut, expected);
    }

    #[test]
    fn empty_rows_create_empty_report() {
        let sut = create_report(vec![]);
        assert_eq!(sut, String::new());
    }
}
