use idability_core::config::Config;
use idability_core::decode::{Category, Confusion, Evaluation};
use idability_core::encode::Encoding;
use idability_core::trace::BuildOutcome;

pub fn print_encoding(encoding: &Encoding, config: &Config) {
    let count = |outcome: BuildOutcome| {
        encoding
            .traces
            .iter()
            .filter(|t| t.outcome == outcome)
            .count()
    };

    println!("=== Codes ({}) ===\n", config.ranking);
    println!("  Subjects:        {}", encoding.traces.len());
    println!("  Unique codes:    {}", count(BuildOutcome::Unique));
    if count(BuildOutcome::Short) > 0 {
        println!(
            "  Short codes:     {} (fewer than {} features available)",
            count(BuildOutcome::Short),
            config.min_code_size
        );
    }
    println!("  No code (NA):    {}", count(BuildOutcome::Null));

    let lengths: Vec<usize> = encoding
        .codes
        .values()
        .flatten()
        .map(|c| c.len())
        .collect();
    if let (Some(min), Some(max)) = (lengths.iter().min(), lengths.iter().max()) {
        println!("  Code length:     {min}..{max}");
    }
    println!();
}

pub fn print_evaluation(evaluation: &Evaluation) {
    println!("=== Confusion ===\n");
    print!("{}", format_confusion(&evaluation.confusion));
    println!();

    let misses: Vec<(&String, Category)> = evaluation
        .subjects
        .iter()
        .filter(|(_, h)| !matches!(h.category, Category::Tp | Category::Na))
        .map(|(s, h)| (s, h.category))
        .collect();

    if !misses.is_empty() {
        let width = misses.iter().map(|(s, _)| s.len()).max().unwrap_or(10);
        println!("  Codes not matching only their owner:");
        for (subject, category) in misses {
            let matches = evaluation.subjects[subject]
                .matches
                .as_deref()
                .unwrap_or_default();
            let hit_list = if matches.is_empty() {
                "no matches".to_string()
            } else {
                matches.join(", ")
            };
            println!(
                "    {:<width$}  {:<6} {}",
                subject,
                category.label(),
                hit_list,
                width = width
            );
        }
        println!();
    }
}

/// One aligned line per category, in reporting order, with its share.
fn format_confusion(confusion: &Confusion) -> String {
    let total = confusion.total();
    let mut out = String::new();
    for category in Category::ALL {
        let count = confusion.get(category);
        let share = if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        };
        out.push_str(&format!(
            "  {}|{:<6} {:>6}  ({:>5.1}%)\n",
            category.rank(),
            category.label(),
            count,
            share
        ));
    }
    out
}
