use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

// Error Handling
use onetpl_error::FieldError;

/// A template attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Num(Number),
    Block(AttributeBag),
}

impl AttrValue {
    /// Scalar values as they would be written in a template body.
    /// Nested blocks have no scalar rendering.
    pub fn render(&self) -> Option<String> {
        match self {
            AttrValue::Str(s) => Some(s.to_owned()),
            AttrValue::Num(n) => Some(n.to_string()),
            AttrValue::Block(_) => None,
        }
    }
}
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.render() {
            Some(string) => write!(f, "{}", string),
            None => write!(f, "[...]"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(e: &str) -> Self {
        AttrValue::Str(e.to_owned())
    }
}
impl From<String> for AttrValue {
    fn from(e: String) -> Self {
        AttrValue::Str(e)
    }
}
impl From<i64> for AttrValue {
    fn from(e: i64) -> Self {
        AttrValue::Num(Number::from(e))
    }
}
impl From<i32> for AttrValue {
    fn from(e: i32) -> Self {
        AttrValue::Num(Number::from(e))
    }
}
impl From<f64> for AttrValue {
    fn from(e: f64) -> Self {
        match Number::from_f64(e) {
            Some(n) => AttrValue::Num(n),
            None => AttrValue::Str(e.to_string()),
        }
    }
}
impl From<AttributeBag> for AttrValue {
    fn from(e: AttributeBag) -> Self {
        AttrValue::Block(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub key: String,
    pub value: AttrValue,
}

/*
* Ordered key/value pairs and nested blocks.
* Keys may repeat: a repeated key is a list (several DISK blocks, ...).
*
* Deserialized from a map where arrays expand into repeated keys,
* so that `DISK = [{..}, {..}]` becomes two DISK blocks.
*/
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct AttributeBag {
    pairs: Vec<Pair>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push<V: Into<AttrValue>>(&mut self, key: &str, value: V) {
        self.pairs.push(Pair {
            key: key.to_owned(),
            value: value.into(),
        });
    }
    /// Chainable push.
    pub fn with<V: Into<AttrValue>>(mut self, key: &str, value: V) -> Self {
        self.push(key, value);
        self
    }
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
    /// First value stored under key.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.pairs.iter().find(|e| e.key == key).map(|e| &e.value)
    }
    pub fn get_all<'a, 'k>(&'a self, key: &'k str) -> impl Iterator<Item = &'a AttrValue> + use<'a, 'k> {
        self.pairs
            .iter()
            .filter(move |e| e.key == key)
            .map(|e| &e.value)
    }
    /// Nested blocks stored under key, in template order.
    /// Every value under key must be a block.
    pub fn try_blocks(&self, key: &str) -> Result<Vec<&AttributeBag>, FieldError> {
        self.get_all(key)
            .map(|e| match e {
                AttrValue::Block(bag) => Ok(bag),
                other => Err(FieldError::new(key, &other.to_string(), "block")),
            })
            .collect()
    }
    /// First scalar value stored under key, rendered as a string.
    /// Repeated keys resolve to their first occurrence, as in `get`.
    pub fn scalar(&self, key: &str) -> Option<String> {
        self.get_all(key).find_map(|e| e.render())
    }
    /// Scalar pairs, rendered as strings, in template order.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.pairs
            .iter()
            .filter_map(|e| e.value.render().map(|v| (e.key.as_str(), v)))
    }
}

// Field name toml gives datetimes when they are read as generic values.
const TOML_DATETIME: &str = "$__toml_private_datetime";

/// A toml datetime, read through a generic map, as its string rendering.
fn toml_datetime(map: &Map<String, Value>) -> Option<String> {
    match (map.len(), map.get(TOML_DATETIME)) {
        (1, Some(Value::String(s))) => Some(s.to_owned()),
        _ => None,
    }
}

fn from_value(key: &str, value: Value) -> Result<Vec<AttrValue>, FieldError> {
    let res = match value {
        Value::String(s) => vec![AttrValue::Str(s)],
        Value::Number(n) => vec![AttrValue::Num(n)],
        Value::Bool(b) => vec![AttrValue::Str(b.to_string())],
        Value::Object(map) => match toml_datetime(&map) {
            Some(s) => vec![AttrValue::Str(s)],
            None => vec![AttrValue::Block(AttributeBag::try_from(map)?)],
        },
        Value::Array(items) => {
            let mut values = vec![];
            for item in items {
                if item.is_array() {
                    return Err(FieldError::new(key, &item.to_string(), "scalar or block"));
                }
                values.extend(from_value(key, item)?);
            }
            values
        }
        Value::Null => return Err(FieldError::new(key, "null", "scalar or block")),
    };
    Ok(res)
}

impl TryFrom<Map<String, Value>> for AttributeBag {
    type Error = FieldError;
    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut bag = AttributeBag::new();
        for (key, value) in map {
            for e in from_value(&key, value)? {
                bag.push(&key, e);
            }
        }
        Ok(bag)
    }
}

fn to_value(value: AttrValue) -> Value {
    match value {
        AttrValue::Str(s) => Value::String(s),
        AttrValue::Num(n) => Value::Number(n),
        AttrValue::Block(bag) => Value::Object(bag.into()),
    }
}

impl From<AttributeBag> for Map<String, Value> {
    fn from(bag: AttributeBag) -> Self {
        let mut map = Map::new();
        for Pair { key, value } in bag.pairs {
            let value = to_value(value);
            match map.get_mut(&key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(key, value);
                }
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    // Error Handling
    use miette::{IntoDiagnostic, Result};

    #[test]
    fn arrays_expand_to_repeated_keys() -> Result<()> {
        let value = json!({
            "CPU": "0.5",
            "DISK": [{ "IMAGE_ID": 1 }, { "IMAGE_ID": 2 }],
            "LABELS": ["a", "b"]
        });
        let bag: AttributeBag = serde_json::from_value(value).into_diagnostic()?;

        let keys: Vec<&str> = bag.pairs().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["CPU", "DISK", "DISK", "LABELS", "LABELS"]);
        assert_eq!(bag.try_blocks("DISK")?.len(), 2);
        assert_eq!(bag.get("LABELS"), Some(&AttrValue::from("a")));
        Ok(())
    }

    #[test]
    fn null_attribute_is_rejected() {
        let value = json!({ "CPU": null });
        let res = serde_json::from_value::<AttributeBag>(value);
        assert!(res.is_err());
    }

    #[test]
    fn serialize_folds_repeated_keys() -> Result<()> {
        let bag = AttributeBag::new()
            .with("NIC", AttributeBag::new().with("NETWORK_ID", 0))
            .with("NIC", AttributeBag::new().with("NETWORK_ID", 1))
            .with("MEMORY", 512);
        let value = serde_json::to_value(&bag).into_diagnostic()?;
        assert_eq!(
            value,
            json!({
                "NIC": [{ "NETWORK_ID": 0 }, { "NETWORK_ID": 1 }],
                "MEMORY": 512
            })
        );
        Ok(())
    }

    #[test]
    fn scalar_under_block_key_is_rejected() {
        let bag = AttributeBag::new()
            .with("DISK", AttributeBag::new().with("IMAGE_ID", 1))
            .with("DISK", "raw-string");
        assert_eq!(
            bag.try_blocks("DISK"),
            Err(FieldError::new("DISK", "raw-string", "block"))
        );
        assert_eq!(bag.try_blocks("NIC"), Ok(vec![]));
    }

    #[test]
    fn scalars_skip_blocks() {
        let bag = AttributeBag::new()
            .with("CPU", 1.5)
            .with("DISK", AttributeBag::new())
            .with("LOGO", "images/logos/linux.png");
        let scalars: Vec<(&str, String)> = bag.scalars().collect();
        assert_eq!(
            scalars,
            vec![
                ("CPU", "1.5".to_owned()),
                ("LOGO", "images/logos/linux.png".to_owned())
            ]
        );
    }
}
