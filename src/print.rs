use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::evaluate::{Answer, Evaluation};
use crate::report::Report;

pub fn tabulate_evaluations(evaluations: &[Evaluation]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(26))),
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec!["Problem".into(), "Exact".into(), "Decimal".into()],
        ));
    for evaluation in evaluations {
        let exact = match &evaluation.answer {
            Answer::Exact(value) => value.to_string(),
            Answer::Approx(_) => "–".into(),
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                evaluation.label.clone().into(),
                exact.into(),
                evaluation.answer.decimal(6).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_report(report: &Report) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(26))),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Centred)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Problem".into(),
                "Expected".into(),
                "Fraction".into(),
                "Decimal".into(),
                "Verdict".into(),
            ],
        ));
    for result in &report.results {
        let decimal = match result.decimal_repr_ok {
            None => "–",
            Some(true) => "OK",
            Some(false) => "MISMATCH",
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                result.label.clone().into(),
                result.expected.to_string().into(),
                if result.latex_repr_ok { "OK" } else { "MISSING" }.into(),
                decimal.into(),
                if result.passed() { "PASS" } else { "FAIL" }.into(),
            ],
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    use super::*;
    use crate::evaluate::ProblemSet;
    use crate::testing::write_up_with;
    use crate::validate::validate_document;

    #[test]
    fn evaluations_table() {
        let evaluations = ProblemSet::Statistics.evaluate().unwrap();
        let table = tabulate_evaluations(&evaluations);
        assert_eq!(1 + evaluations.len(), table.num_rows());
        let rendered = Console::default().render(&table).to_string();
        assert!(rendered.contains("98/285"), "{rendered}");
        assert!(rendered.contains("0.636620"), "{rendered}");
    }

    #[test]
    fn report_table() {
        let document = write_up_with("= 0.625", "= 0.63");
        let report = Report::new(validate_document(&document).unwrap());
        let table = tabulate_report(&report);
        assert_eq!(1 + report.results.len(), table.num_rows());
        let rendered = Console::default().render(&table).to_string();
        assert!(rendered.contains("MISMATCH"), "{rendered}");
        assert!(rendered.contains("FAIL"), "{rendered}");
    }
}
