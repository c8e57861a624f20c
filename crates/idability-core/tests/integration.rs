//! End-to-end tests: table text in, codes and hits text out.
//!
//! Tables are written inline as tab-delimited text so each test reads like
//! the files the CLI consumes.

use idability_core::config::builtin::load_preset;
use idability_core::config::Config;
use idability_core::decode::Category;
use idability_core::discretize::Discretizer;
use idability_core::model::{CodeSet, Table};
use idability_core::parsing::{load_codes, load_table, parse_codes, parse_table};
use idability_core::report::{render_codes, render_hits, write_atomic};
use idability_core::{decode, encode};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn tsv(lines: &[&str]) -> Table {
    parse_table(&lines.join("\n")).unwrap()
}

fn codes_text(table: &Table, config: &Config) -> String {
    render_codes(&encode(table, config).unwrap().codes)
}

// ---------------------------------------------------------------------------
// Test 1: Two mirrored subjects get each other's missing feature
// ---------------------------------------------------------------------------
#[test]
fn mirrored_subjects_round_trip() {
    let table = tsv(&["ID\tS1\tS2", "F1\t0\t1", "F2\t1\t0"]);
    let config = Config::default();

    let text = codes_text(&table, &config);
    assert_eq!(text, "#SAMPLE\tCODE\nS1\tF2\nS2\tF1\n");

    let codes = parse_codes(&text).unwrap();
    let evaluation = decode(&table, &codes, &config).unwrap();
    assert_eq!(
        render_hits(&evaluation),
        "# 1|TP: 2\n# 2|TP+FP: 0\n# 3|FN+FP: 0\n# 4|FN: 0\n# 5|NA: 0\n\
         S1\tmatches\tS1\n\
         S2\tmatches\tS2\n"
    );
}

// ---------------------------------------------------------------------------
// Test 2: A subject whose profile is contained in another's has no code
// ---------------------------------------------------------------------------
#[test]
fn subset_profile_reported_na() {
    let table = tsv(&[
        "ID\tS1\tS2\tS3",
        "F1\t1\t1\t0",
        "F2\t0\t1\t0",
        "F3\t0\t0\t1",
    ]);
    let config = Config::default();
    let text = codes_text(&table, &config);
    assert!(text.contains("\nS1\n"), "{text}");

    let codes = parse_codes(&text).unwrap();
    let evaluation = decode(&table, &codes, &config).unwrap();
    assert_eq!(evaluation.category_of("S1"), Some(Category::Na));
    assert_eq!(evaluation.confusion.na, 1);
    assert!(render_hits(&evaluation).contains("S1\tno_code\t#N/A\n"));
}

// ---------------------------------------------------------------------------
// Test 3: A code feature dropping out in a later table gives FN for its owner
// ---------------------------------------------------------------------------
#[test]
fn perturbed_feature_gives_false_negative() {
    let visit1 = tsv(&[
        "ID\tS1\tS2\tS3",
        "F1\t5\t0\t0",
        "F2\t0\t3\t0",
        "F3\t0\t0\t2",
    ]);
    let visit2 = tsv(&[
        "ID\tS1\tS2\tS3",
        "F1\t0\t0\t0",
        "F2\t0\t3\t0",
        "F3\t0\t0\t2",
    ]);
    let config = Config::default();
    let codes = encode(&visit1, &config).unwrap().codes;
    assert_eq!(codes["S1"].as_ref().unwrap().features(), &["F1".to_string()]);

    let before = decode(&visit1, &codes, &config).unwrap();
    let after = decode(&visit2, &codes, &config).unwrap();
    assert_eq!(after.category_of("S1"), Some(Category::Fn));
    for subject in ["S2", "S3"] {
        assert_eq!(after.category_of(subject), before.category_of(subject));
        assert_eq!(after.category_of(subject), Some(Category::Tp));
    }
}

// ---------------------------------------------------------------------------
// Test 4: Codes applied to a table with other subjects and features
// ---------------------------------------------------------------------------
#[test]
fn codes_against_different_population() {
    let built = tsv(&["ID\tA\tB", "F1\t1\t0", "F2\t0\t1"]);
    let other = tsv(&["ID\tB\tC", "F2\t1\t1", "F9\t0\t1"]);
    let config = Config::default();
    let codes = encode(&built, &config).unwrap().codes;

    let evaluation = decode(&other, &codes, &config).unwrap();
    // A is not in the second table; B's code now also hits C.
    assert_eq!(evaluation.category_of("A"), Some(Category::Na));
    assert_eq!(evaluation.category_of("B"), Some(Category::TpFp));
    assert_eq!(
        evaluation.subjects["B"].matches,
        Some(vec!["B".to_string(), "C".to_string()])
    );
}

// ---------------------------------------------------------------------------
// Test 5: rpkm preset builds padded codes that still identify their owners
// ---------------------------------------------------------------------------
#[test]
fn rpkm_preset_pads_to_min_size() {
    // S1 towers over everyone; the other carriers differ from row to row so
    // no two rows are similar enough to knock each other out.
    let table = tsv(&[
        "ID\tS1\tS2\tS3\tS4\tS5",
        "M0\t50\t0\t0\t0\t0",
        "M1\t51\t20\t0\t0\t0",
        "M2\t52\t0\t20\t0\t0",
        "M3\t53\t0\t0\t20\t0",
        "M4\t54\t0\t0\t0\t20",
        "M5\t55\t20\t20\t0\t0",
        "M6\t56\t0\t0\t20\t20",
        "M7\t57\t20\t0\t20\t0",
        "M8\t58\t0\t20\t0\t20",
        "M9\t59\t20\t0\t0\t20",
    ]);
    let config = load_preset("rpkm").unwrap();

    let encoding = encode(&table, &config).unwrap();
    let s1 = encoding.codes["S1"].as_ref().unwrap();
    // M0 alone is unique; the largest remaining gaps pad the code.
    assert_eq!(
        s1.features(),
        &["M0", "M9", "M8", "M7", "M6", "M5", "M4"].map(String::from)
    );

    let evaluation = decode(&table, &encoding.codes, &config).unwrap();
    assert_eq!(evaluation.category_of("S1"), Some(Category::Tp));
}

// ---------------------------------------------------------------------------
// Test 6: Files on disk: load, encode, write, read back, decode, write
// ---------------------------------------------------------------------------
#[test]
fn file_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("visit1.pcl");
    std::fs::write(
        &table_path,
        "ID\tS1\tS2\tS3\nF1\t1\t0\t0\nF2\t1\t1\t0\nF3\t0\t1\t1\nF4\t0\t0\t1\n",
    )
    .unwrap();

    let table = load_table(&table_path).unwrap();
    let config = Config::default();
    let codes_path = dir.path().join("visit1.codes.txt");
    write_atomic(&codes_path, &codes_text(&table, &config)).unwrap();

    let codes = load_codes(&codes_path).unwrap();
    assert_eq!(codes.len(), 3);
    let evaluation = decode(&table, &codes, &config).unwrap();
    let hits_path = dir.path().join("visit1.visit1.hits.txt");
    write_atomic(&hits_path, &render_hits(&evaluation)).unwrap();

    let hits = std::fs::read_to_string(&hits_path).unwrap();
    assert!(hits.starts_with("# 1|TP: 3\n"), "{hits}");
}

// ---------------------------------------------------------------------------
// Test 7: An ambiguous look-alike leaves the subject without a code
// ---------------------------------------------------------------------------
#[test]
fn lower_absence_threshold_adds_na() {
    let table = tsv(&["ID\tS1\tS2", "F1\t3\t1"]);
    let with_absence = |absence: Decimal| Config {
        discretizer: Discretizer::Thresholds {
            presence: dec!(3),
            absence,
        },
        ..Config::default()
    };

    // At absence 1, S2 reads absent and S1 is coded; at 0, S2 is ambiguous.
    assert_eq!(null_count(&table, &with_absence(dec!(1))), 1);
    assert_eq!(null_count(&table, &with_absence(dec!(0))), 2);
}

// ---------------------------------------------------------------------------
// Properties over random tables
// ---------------------------------------------------------------------------

fn table_from(values: &[Vec<u8>]) -> Table {
    let width = values.first().map(Vec::len).unwrap_or(0);
    let subjects = (0..width).map(|i| format!("S{i}")).collect();
    let rows = values
        .iter()
        .enumerate()
        .map(|(i, row)| {
            (
                format!("F{i:02}"),
                row.iter().map(|&v| Decimal::from(v)).collect(),
            )
        })
        .collect();
    Table::new("ID", subjects, rows).unwrap()
}

fn value_grid() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1usize..7, 1usize..9).prop_flat_map(|(subjects, features)| {
        prop::collection::vec(prop::collection::vec(0u8..4, subjects), features)
    })
}

/// True when `features` rule out every subject but `owner` (simple mode).
fn is_hitting_set(table: &Table, owner: usize, features: &[usize]) -> bool {
    (0..table.subjects().len())
        .filter(|&s| s != owner)
        .all(|s| features.iter().any(|&f| table.value(f, s) <= Decimal::ZERO))
}

fn null_count(table: &Table, config: &Config) -> usize {
    let codes: CodeSet = encode(table, config).unwrap().codes;
    decode(table, &codes, config).unwrap().confusion.na
}

proptest! {
    #[test]
    fn built_codes_identify_their_owner(grid in value_grid(), min_size in 1usize..4) {
        let table = table_from(&grid);
        for config in [
            Config { min_code_size: min_size, ..Config::default() },
            Config {
                discretizer: Discretizer::Thresholds { presence: dec!(3), absence: dec!(1) },
                min_code_size: min_size,
                similarity_cutoff: Some(dec!(0.8)),
                ..load_preset("rpkm").unwrap()
            },
        ] {
            let encoding = encode(&table, &config).unwrap();
            let evaluation = decode(&table, &encoding.codes, &config).unwrap();
            for (subject, code) in &encoding.codes {
                if code.is_some() {
                    prop_assert_eq!(evaluation.category_of(subject), Some(Category::Tp));
                }
            }
        }
    }

    #[test]
    fn encoding_is_deterministic(grid in value_grid()) {
        let table = table_from(&grid);
        let config = load_preset("relab").unwrap();
        prop_assert_eq!(codes_text(&table, &config), codes_text(&table, &config));
    }

    #[test]
    fn simple_codes_are_minimal(grid in value_grid()) {
        // With a single subject the minimum size alone forces one feature.
        prop_assume!(grid[0].len() > 1);
        let table = table_from(&grid);
        let encoding = encode(&table, &Config::default()).unwrap();
        for (subject, code) in &encoding.codes {
            let Some(code) = code else { continue };
            let owner = table.subject_position(subject).unwrap();
            let features: Vec<usize> = code
                .features()
                .iter()
                .map(|f| table.feature_position(f).unwrap())
                .collect();
            prop_assert!(is_hitting_set(&table, owner, &features));
            let n = features.len();
            for mask in 0..(1u32 << n) - 1 {
                let subset: Vec<usize> = (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| features[i])
                    .collect();
                prop_assert!(
                    !is_hitting_set(&table, owner, &subset),
                    "{:?} is a smaller code for {}", subset, subject
                );
            }
        }
    }

    #[test]
    fn wider_ambiguous_zone_never_lowers_na(grid in value_grid(), low in 0u8..3, widen in 0u8..2) {
        // Lowering the absence threshold turns absent cells ambiguous.
        let table = table_from(&grid);
        let narrow = Config {
            discretizer: Discretizer::Thresholds {
                presence: dec!(3),
                absence: Decimal::from(low + widen),
            },
            ..Config::default()
        };
        let wide = Config {
            discretizer: Discretizer::Thresholds {
                presence: dec!(3),
                absence: Decimal::from(low),
            },
            ..Config::default()
        };
        prop_assert!(null_count(&table, &wide) >= null_count(&table, &narrow));
    }
}
