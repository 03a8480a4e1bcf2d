use crate::domain::catalog::CategoryId;
use crate::error::{PosError, Result};
use serde::Deserialize;
use std::io::Read;

/// One operator action as scripted in the input CSV.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add one unit of a product to the cart.
    Add(u64),
    /// Select a category, or show all when no id is given.
    Filter(Option<CategoryId>),
    /// Start the payment handoff for the current cart.
    Checkout,
    /// Acknowledge a shown payment outcome and return to the idle screen.
    Ack,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ActionKind {
    Add,
    Filter,
    Checkout,
    Ack,
}

#[derive(Debug, Deserialize)]
struct ActionRecord {
    action: ActionKind,
    #[serde(default)]
    value: Option<String>,
}

impl TryFrom<ActionRecord> for Action {
    type Error = PosError;

    fn try_from(record: ActionRecord) -> Result<Action> {
        let value = record
            .value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        match record.action {
            ActionKind::Add => {
                let raw = value
                    .ok_or_else(|| PosError::Validation("add requires a product id".to_string()))?;
                let id = raw
                    .parse()
                    .map_err(|_| PosError::Validation(format!("invalid product id {raw:?}")))?;
                Ok(Action::Add(id))
            }
            ActionKind::Filter => match value {
                None => Ok(Action::Filter(None)),
                Some(raw) => {
                    let id = raw
                        .parse()
                        .map_err(|_| PosError::Validation(format!("invalid category id {raw:?}")))?;
                    Ok(Action::Filter(Some(id)))
                }
            },
            ActionKind::Checkout => Ok(Action::Checkout),
            ActionKind::Ack => Ok(Action::Ack),
        }
    }
}

/// Reads operator actions from a CSV source.
///
/// Wraps `csv::Reader` with trimmed fields and flexible record lengths and
/// yields actions lazily, one `Result` per row.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn actions(self) -> impl Iterator<Item = Result<Action>> {
        self.reader
            .into_deserialize::<ActionRecord>()
            .map(|record| record.map_err(PosError::from).and_then(Action::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(data: &str) -> Vec<Result<Action>> {
        ActionReader::new(data.as_bytes()).actions().collect()
    }

    #[test]
    fn test_reader_valid_script() {
        let data = "action, value\nadd, 101\nfilter, 5\nfilter,\ncheckout,\nack,";
        let actions: Vec<Action> = read_all(data).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(
            actions,
            vec![
                Action::Add(101),
                Action::Filter(Some(CategoryId(5))),
                Action::Filter(None),
                Action::Checkout,
                Action::Ack,
            ]
        );
    }

    #[test]
    fn test_reader_unknown_action() {
        let results = read_all("action, value\nrefund, 101");
        assert!(results[0].is_err());
    }

    #[test]
    fn test_reader_add_without_id() {
        let results = read_all("action, value\nadd,");
        assert!(matches!(&results[0], Err(PosError::Validation(_))));
    }

    #[test]
    fn test_reader_non_numeric_id() {
        let results = read_all("action, value\nadd, espresso");
        assert!(matches!(&results[0], Err(PosError::Validation(_))));
    }

    #[test]
    fn test_reader_short_record() {
        // flexible(true) lets a row omit the value column entirely.
        let results = read_all("action, value\ncheckout");
        assert_eq!(results[0].as_ref().unwrap(), &Action::Checkout);
    }
}
