use idability_core::decode::Evaluation;
use idability_core::error::IdabilityError;

pub fn print(evaluation: &Evaluation) -> Result<(), IdabilityError> {
    let json = serde_json::to_string_pretty(evaluation)?;
    println!("{json}");
    Ok(())
}
