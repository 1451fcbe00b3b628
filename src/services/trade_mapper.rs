//! Trade Mapper
//!
//! Translates an MT5 trade record into the property set of the Notion
//! trade journal database. Property names must match the database columns.

use crate::error::Result;
use crate::notion::{PropertyMap, PropertyValue};
use crate::webhook::TradeRecord;

/// Build the Notion properties for one trade.
///
/// Core properties are always present. `Strategy`, `Setup tags`,
/// `Screenshot` and `Notes` only appear when the trade carries a non-empty
/// value for them. Fails only on a numeric field that cannot be coerced.
pub fn map_trade(trade: &TradeRecord) -> Result<PropertyMap> {
    let mut props = PropertyMap::new();

    let title = format!(
        "{} {} {}",
        trade.text("symbol").unwrap_or_default(),
        trade.text("side").unwrap_or_default(),
        trade.text("lots").unwrap_or_default(),
    );
    props.insert("Title".into(), PropertyValue::title(title));

    let date = trade
        .non_empty_text("closeTime")
        .or_else(|| trade.non_empty_text("openTime"));
    props.insert("Date".into(), PropertyValue::date(date));

    props.insert(
        "Symbol".into(),
        PropertyValue::rich_text(trade.text("symbol").unwrap_or_default()),
    );
    props.insert("Side".into(), PropertyValue::select(trade.text("side")));

    props.insert("Lots".into(), PropertyValue::Number(Some(trade.number_or_zero("lots")?)));
    props.insert("Entry price".into(), PropertyValue::Number(trade.optional_number("entry")?));
    props.insert("Exit price".into(), PropertyValue::Number(trade.optional_number("exit")?));
    props.insert("SL".into(), PropertyValue::Number(trade.optional_number("sl")?));
    props.insert("TP".into(), PropertyValue::Number(trade.optional_number("tp")?));
    props.insert("Net PnL".into(), PropertyValue::Number(Some(trade.number_or_zero("pnl")?)));
    props.insert("Fees".into(), PropertyValue::Number(Some(trade.number_or_zero("fees")?)));

    if let Some(strategy) = trade.non_empty_text("strategy") {
        props.insert("Strategy".into(), PropertyValue::select(Some(strategy)));
    }

    let tags = trade.tags();
    if !tags.is_empty() {
        props.insert("Setup tags".into(), PropertyValue::multi_select(tags));
    }

    if let Some(screenshot) = trade.non_empty_text("screenshot") {
        props.insert("Screenshot".into(), PropertyValue::Url(screenshot));
    }

    if let Some(notes) = trade.non_empty_text("notes") {
        props.insert("Notes".into(), PropertyValue::rich_text(notes));
    }

    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::{json, Value};

    fn map(value: Value) -> Result<Value> {
        let trade = TradeRecord::try_from(value)?;
        Ok(serde_json::to_value(map_trade(&trade)?)?)
    }

    #[test]
    fn test_basic_trade() {
        let props = map(json!({
            "symbol": "EURUSD", "side": "Buy", "lots": 1.5, "entry": 1.1, "pnl": 25.0
        }))
        .unwrap();

        assert_eq!(props["Title"], json!({"title": [{"text": {"content": "EURUSD Buy 1.5"}}]}));
        assert_eq!(props["Symbol"], json!({"rich_text": [{"text": {"content": "EURUSD"}}]}));
        assert_eq!(props["Side"], json!({"select": {"name": "Buy"}}));
        assert_eq!(props["Lots"], json!({"number": 1.5}));
        assert_eq!(props["Entry price"], json!({"number": 1.1}));
        assert_eq!(props["Net PnL"], json!({"number": 25.0}));
        assert_eq!(props["Exit price"], json!({"number": null}));
        assert_eq!(props["SL"], json!({"number": null}));
        assert_eq!(props["TP"], json!({"number": null}));
        assert_eq!(props["Fees"], json!({"number": 0.0}));
        assert_eq!(props["Date"], json!({"date": null}));

        let obj = props.as_object().unwrap();
        for optional in ["Strategy", "Setup tags", "Screenshot", "Notes"] {
            assert!(!obj.contains_key(optional), "{} should be omitted", optional);
        }
        assert_eq!(obj.len(), 11);
    }

    #[test]
    fn test_full_trade() {
        let props = map(json!({
            "symbol": "XAUUSD",
            "side": "Sell",
            "lots": "0.10",
            "entry": "2034.5",
            "exit": 2020.25,
            "sl": 2040,
            "tp": 2010,
            "openTime": "2024-03-01T09:30:00Z",
            "closeTime": "2024-03-01T11:45:00Z",
            "pnl": 142.5,
            "fees": -3.5,
            "strategy": "London breakout",
            "tags": ["A+", "news"],
            "screenshot": "https://charts.example/abc.png",
            "notes": "Took partials at 1R",
            "ticket": 123456
        }))
        .unwrap();

        assert_eq!(props["Title"]["title"][0]["text"]["content"], "XAUUSD Sell 0.10");
        assert_eq!(props["Date"], json!({"date": {"start": "2024-03-01T11:45:00Z"}}));
        assert_eq!(props["Lots"], json!({"number": 0.1}));
        assert_eq!(props["Entry price"], json!({"number": 2034.5}));
        assert_eq!(props["Exit price"], json!({"number": 2020.25}));
        assert_eq!(props["SL"], json!({"number": 2040.0}));
        assert_eq!(props["TP"], json!({"number": 2010.0}));
        assert_eq!(props["Net PnL"], json!({"number": 142.5}));
        assert_eq!(props["Fees"], json!({"number": -3.5}));
        assert_eq!(props["Strategy"], json!({"select": {"name": "London breakout"}}));
        assert_eq!(
            props["Setup tags"],
            json!({"multi_select": [{"name": "A+"}, {"name": "news"}]})
        );
        assert_eq!(props["Screenshot"], json!({"url": "https://charts.example/abc.png"}));
        assert_eq!(props["Notes"], json!({"rich_text": [{"text": {"content": "Took partials at 1R"}}]}));
        assert_eq!(props.as_object().unwrap().len(), 15);
    }

    #[test]
    fn test_date_falls_back_to_open_time() {
        let props = map(json!({"openTime": "2024-03-01T09:30:00Z", "closeTime": ""})).unwrap();
        assert_eq!(props["Date"], json!({"date": {"start": "2024-03-01T09:30:00Z"}}));
    }

    #[test]
    fn test_empty_trade() {
        let props = map(json!({})).unwrap();
        assert_eq!(props["Title"]["title"][0]["text"]["content"], "  ");
        assert_eq!(props["Symbol"]["rich_text"][0]["text"]["content"], "");
        assert_eq!(props["Side"], json!({"select": null}));
        assert_eq!(props["Lots"], json!({"number": 0.0}));
    }

    #[test]
    fn test_empty_optionals_omitted() {
        let props = map(json!({
            "symbol": "EURUSD", "strategy": "", "tags": [], "screenshot": null, "notes": ""
        }))
        .unwrap();
        let obj = props.as_object().unwrap();
        assert!(!obj.contains_key("Strategy"));
        assert!(!obj.contains_key("Setup tags"));
        assert!(!obj.contains_key("Screenshot"));
        assert!(!obj.contains_key("Notes"));
    }

    #[test]
    fn test_numeric_strategy_rendered_as_text() {
        let props = map(json!({"strategy": 7})).unwrap();
        assert_eq!(props["Strategy"], json!({"select": {"name": "7"}}));
    }

    #[test]
    fn test_malformed_number_fails() {
        let err = map(json!({"symbol": "EURUSD", "entry": "abc"})).unwrap_err();
        match err {
            AppError::InvalidNumber { field, value } => {
                assert_eq!(field, "entry");
                assert_eq!(value, "\"abc\"");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
