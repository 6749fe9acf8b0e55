use crate::domain::card::CreditCard;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 10] = [
    "id",
    "user",
    "network",
    "card_number",
    "credit_limit",
    "status",
    "approved_by",
    "rejection_reason",
    "created_at",
    "updated_at",
];

/// Writes applications as CSV, one row per card, with a header row.
pub struct CardWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CardWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_cards(&mut self, cards: Vec<CreditCard>) -> Result<()> {
        // Serde emits the header with the first row only.
        if cards.is_empty() {
            self.writer.write_record(HEADER)?;
        }
        for card in cards {
            self.writer.serialize(card)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes applications as a pretty-printed JSON array.
pub fn write_json<W: Write>(sink: W, cards: &[CreditCard]) -> Result<()> {
    serde_json::to_writer_pretty(sink, cards)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{CreditLimit, StatusDecision};
    use crate::domain::generator::derive;
    use crate::domain::network::CardNetwork;
    use rust_decimal_macros::dec;

    fn sample() -> CreditCard {
        let mut card = CreditCard::new(
            4,
            10,
            CardNetwork::Visa,
            derive(CardNetwork::Visa, "abc").unwrap(),
            CreditLimit::new(dec!(1500.50)).unwrap(),
        );
        card.decide(2, StatusDecision::Approve).unwrap();
        card
    }

    #[test]
    fn test_csv_output() {
        let mut buffer = Vec::new();
        CardWriter::new(&mut buffer)
            .write_cards(vec![sample()])
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,user,network,card_number,credit_limit,status,approved_by,rejection_reason,created_at,updated_at"
        );
        assert!(
            lines
                .next()
                .unwrap()
                .starts_with("4,10,VISA,4000007816801416,1500.50,APPROVED,2,,")
        );
    }

    #[test]
    fn test_empty_csv_output_has_header() {
        let mut buffer = Vec::new();
        CardWriter::new(&mut buffer).write_cards(Vec::new()).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(output, format!("{}\n", HEADER.join(",")));
    }

    #[test]
    fn test_json_output() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[sample()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value[0]["card_number"], "4000007816801416");
        assert_eq!(value[0]["status"], "APPROVED");
        assert_eq!(value[0]["network"], "VISA");
        assert_eq!(value[0]["rejection_reason"], serde_json::Value::Null);
    }
}
