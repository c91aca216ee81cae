//! End-to-end scoring against the embedded reaction table.

use defense_stress::{
    describe_severity, read_bulk, AnswerSet, CategoryCatalog, CategoryProvider, Diagnostics,
    ReactionTable, Report, Severity,
};

fn catalog() -> CategoryCatalog {
    let blocks = [(1, 1..=42), (2, 51..=88), (3, 101..=137), (4, 141..=183)]
        .into_iter()
        .map(|(id, questions)| {
            serde_json::json!({
                "id": id,
                "title": format!("level {}", id),
                "questions": questions.collect::<Vec<u32>>(),
            })
        })
        .collect::<Vec<_>>();
    CategoryCatalog::from_reader(serde_json::to_vec(&blocks).unwrap().as_slice()).unwrap()
}

fn answers(ids: &[u32]) -> AnswerSet {
    let json = serde_json::to_vec(
        &ids.iter()
            .map(|id| serde_json::json!({ "question_id": id }))
            .collect::<Vec<_>>(),
    )
    .unwrap();
    AnswerSet::from_reader(json.as_slice()).unwrap()
}

#[test]
fn test_embedded_table_diagnosis() {
    let catalog = catalog();
    let answers = answers(&[5, 7, 149, 150, 160, 162]);
    let engine = Diagnostics::with_embedded_table(&answers);
    let diagnosis = engine.evaluate(&catalog);

    let first = &diagnosis.categories[0];
    assert_eq!(first.metrics.reaction_count, 2);
    assert_eq!(first.metrics.effective_reaction_count, 1);
    assert_eq!(first.metrics.stress_factor, 0.5);

    let fourth = &diagnosis.categories[3];
    assert_eq!(fourth.stat.reaction_count, 4);
    assert_eq!(fourth.stat.effective_reaction_count, 2);
    assert_eq!(fourth.stat.f, 2.0);
    assert_eq!(fourth.stat.d_sf, 50.0);

    assert_eq!(diagnosis.summary.total_reaction_count, 6.0);
    assert_eq!(diagnosis.summary.summary_ratio, 0.5);
    assert_eq!(diagnosis.summary.general_ratio, 3.0);
    assert_eq!(diagnosis.severity, Severity::Threatening);
    assert_eq!(diagnosis.description, describe_severity(0.5));
}

#[test]
fn test_substitute_table() {
    let table = ReactionTable::from_reader(
        r#"[{"key": "effective_thinking", "title": "t", "levels": {"1": [5, 7]}}]"#.as_bytes(),
    )
    .unwrap();
    let answers = answers(&[5, 7]);
    let diagnosis = Diagnostics::new(&answers, &table).evaluate(&catalog());
    assert_eq!(diagnosis.summary.summary_ratio, 0.0);
    assert_eq!(diagnosis.severity, Severity::Ideal);
}

#[test]
fn test_bulk_to_report() {
    let catalog = catalog();
    let csv = "r1,1,2,3\nr2\nr3,141,oops\n";
    let rows = read_bulk(csv.as_bytes()).collect::<Vec<_>>();
    assert!(rows[2].is_err());

    let (id, answers) = rows[0].as_ref().unwrap();
    let engine = Diagnostics::with_embedded_table(answers);
    assert_eq!(engine.summary(catalog.categories()).general_ratio, 3.0);

    let report = Report::from_diagnosis(id, &engine.evaluate(&catalog));
    let mut buffer = Vec::new();
    report.write_csv(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("categories\n"));
    assert!(text.contains("\n1,level 1,3,1,0,3,100,1 2 3\n"));

    let (_, empty) = rows[1].as_ref().unwrap();
    let summary = Diagnostics::with_embedded_table(empty).summary(catalog.categories());
    assert_eq!(summary.summary_ratio, 0.0);
    assert_eq!(summary.general_ratio, 0.0);
}
