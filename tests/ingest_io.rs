use admit_dotplot::{ChartConfig, Dataset, DotPlotError, ingest, viz};
use std::fs;
use tempfile::tempdir;

const CSV: &str = "대학명_전형,등급,결과,비고\n가대_교과,1.8,합,\n가대_교과,2.4,불,\n나대_종합,,추합,면접 불참\n";

#[test]
fn csv_file_loads_into_dataset() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("results.CSV");
    fs::write(&p, CSV).unwrap();

    let table = ingest::load_table(&p).unwrap();
    assert_eq!(table.columns.len(), 4);
    let ds = Dataset::from_table(&table).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.records()[2].grade, None);

    // The empty grade still defines a category.
    let plan = viz::plan(&ds, &ChartConfig::default());
    assert_eq!(plan.categories, vec!["나대_종합", "가대_교과"]);
    assert_eq!(plan.point_count(), 2);
}

#[test]
fn json_file_loads_into_dataset() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("results.json");
    fs::write(
        &p,
        r#"[{"대학명_전형":"가대_교과","등급":1.8,"결과":"합"},{"대학명_전형":"나대_종합","등급":"3.1","결과":"불"}]"#,
    )
    .unwrap();
    let ds = Dataset::from_table(&ingest::load_table(&p).unwrap()).unwrap();
    assert_eq!(ds.records()[0].grade, Some(1.8));
    assert_eq!(ds.records()[1].grade, Some(3.1));
}

#[test]
fn json_must_be_an_array_of_objects() {
    let err = ingest::read_json(r#"{"대학명_전형": "A"}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, DotPlotError::Json(_)));
}

#[test]
fn plan_json_is_written() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("plan.json");
    let ds = Dataset::from_table(&ingest::read_csv(CSV.as_bytes()).unwrap()).unwrap();
    ingest::save_plan_json(&viz::plan(&ds, &ChartConfig::default()), &p).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
    assert_eq!(v["categories"][0], "나대_종합");
    assert_eq!(v["legend"]["position"], "upper-right");
    assert_eq!(v["ticks"].as_array().unwrap().len(), 8);
}

#[test]
fn missing_input_file_is_io_error() {
    let err = ingest::load_table("/definitely/missing.csv").unwrap_err();
    assert!(matches!(err, DotPlotError::Io(_)));
}

#[test]
fn cp949_csv_file_loads_into_dataset() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("legacy.csv");
    // "대학명_전형,등급,결과\n가대_교과,2.0,합\n" in CP949
    fs::write(
        &p,
        b"\xb4\xeb\xc7\xd0\xb8\xed\x5f\xc0\xfc\xc7\xfc,\xb5\xee\xb1\xde,\xb0\xe1\xb0\xfa\n\xb0\xa1\xb4\xeb\x5f\xb1\xb3\xb0\xfa,2.0,\xc7\xd5\n",
    )
    .unwrap();
    let ds = Dataset::from_table(&ingest::load_table(&p).unwrap()).unwrap();
    assert_eq!(ds.records()[0].track, "가대_교과");
    assert_eq!(ds.records()[0].grade, Some(2.0));
    assert_eq!(ds.records()[0].outcome, "합");
}
